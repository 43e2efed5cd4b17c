//! Run the full ERE calculation for a batch of workers from escenarios.csv
//!
//! Outputs one summary row per worker for plan-level comparison

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use chrono::Local;
use rayon::prelude::*;

use ere_calculator::input::{load_scenarios, ScenarioRecord};
use ere_calculator::scenario::ScenarioOutcome;
use ere_calculator::{InputError, ScenarioRunner};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| "escenarios.csv".to_string());
    let output_path = args.next().unwrap_or_else(|| "resumen_ere.csv".to_string());

    let start = Instant::now();
    println!("Loading scenarios from {}...", input_path);

    let scenarios = load_scenarios(&input_path).expect("Failed to load scenarios");
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let as_of = Local::now().date_naive();
    let runner = ScenarioRunner::new();

    println!("Running calculations...");
    let calc_start = Instant::now();

    // Run all workers in parallel, keeping input order
    let results: Vec<(&ScenarioRecord, Result<ScenarioOutcome, InputError>)> = scenarios
        .par_iter()
        .map(|record| (record, runner.run(&record.input, as_of)))
        .collect();

    println!("Calculations complete in {:?}", calc_start.elapsed());

    let mut file = File::create(&output_path).expect("Failed to create output file");
    writeln!(
        file,
        "Nombre,FechaSalida,Ratio,TasaTesaAplicada,IndemnizacionTotal,LimitacionAplicada,\
         FechaObjetivo,Meses,TotalTesaNeto,TotalSepeNeto,TotalPensionNeto,TotalNeto"
    )
    .unwrap();

    let mut failures = 0;
    for (record, result) in &results {
        match result {
            Ok(outcome) => {
                let summary = outcome.projection.summary();
                writeln!(
                    file,
                    "{},{},{:.4},{:.2},{:.2},{},{},{},{:.2},{:.2},{:.2},{:.2}",
                    record.label,
                    record.input.exit_date,
                    outcome.exemption.ratio,
                    outcome.exemption.applied_tesa_rate,
                    outcome.indemnity.total_compensation,
                    outcome.indemnity.limitation_applied,
                    outcome
                        .target_exit_date
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                    summary.total_months,
                    summary.total_tesa_net,
                    summary.total_sepe_net,
                    summary.total_pension_net,
                    summary.total_net,
                )
                .unwrap();
            }
            Err(err) => {
                failures += 1;
                eprintln!("  {}: {}", record.label, err);
            }
        }
    }

    println!("Output written to {}", output_path);

    // Plan-level stats across the successful workers
    let outcomes: Vec<&ScenarioOutcome> =
        results.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
    let aggregate_net: f64 = outcomes.iter().map(|o| o.projection.summary().total_net).sum();
    let capped = outcomes.iter().filter(|o| o.indemnity.limitation_applied).count();
    let overridden = outcomes.iter().filter(|o| o.exemption.rate_overridden).count();

    println!("\nBatch Summary:");
    println!("  Scenarios:            {}", scenarios.len());
    println!("  Failed:               {}", failures);
    println!("  Capped indemnities:   {}", capped);
    println!("  Flat-rate overrides:  {}", overridden);
    println!("  Aggregate net income: {:.2}", aggregate_net);

    println!("\nTotal time: {:?}", start.elapsed());
}
