//! ERE Calculator CLI
//!
//! Command-line interface for running a single worker's ERE calculation

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};

use ere_calculator::export::{self, age_at, format_euro};
use ere_calculator::input::{CalculationInput, RetirementPlan};
use ere_calculator::scenario::ScenarioRunner;

/// Retirement option selected for the worker
#[derive(ValueEnum, Clone, Copy, Debug)]
enum RetirementAge {
    /// Early retirement at 63
    #[value(name = "63")]
    Age63,
    /// Ordinary retirement at 65
    #[value(name = "65")]
    Age65,
}

#[derive(Parser, Debug)]
#[command(
    name = "ere_calculator",
    version,
    about = "Severance and income projection for Spanish ERE plans"
)]
struct Cli {
    /// Worker's birth date (YYYY-MM-DD)
    #[arg(long, default_value = "1970-03-25")]
    birth_date: NaiveDate,

    /// First day of employment (YYYY-MM-DD)
    #[arg(long, default_value = "1989-06-01")]
    employment_start: NaiveDate,

    /// Contract termination date (YYYY-MM-DD)
    #[arg(long, default_value = "2026-03-01")]
    exit_date: NaiveDate,

    /// Gross annual salary at exit
    #[arg(long, default_value_t = 65_919.12)]
    annual_salary: f64,

    /// Requested IRPF rate on the employer top-up, in percent
    #[arg(long, default_value_t = 13.75)]
    irpf_tesa: f64,

    /// Gross monthly unemployment benefit
    #[arg(long, default_value_t = 1_181.0)]
    sepe_salary: f64,

    /// IRPF rate on the unemployment benefit, in percent
    #[arg(long, default_value_t = 5.0)]
    irpf_sepe: f64,

    /// Retirement option
    #[arg(long, value_enum, default_value = "63")]
    retirement_age: RetirementAge,

    /// Gross monthly pension; defaults to the plan amount for the option
    #[arg(long)]
    pension: Option<f64>,

    /// IRPF rate on the pension, in percent
    #[arg(long, default_value_t = 23.0)]
    irpf_jubilacion: f64,

    /// Date anchoring the target exit date scan; defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output CSV path for the monthly projection
    #[arg(long, default_value = "calculo_ere.csv")]
    output: PathBuf,

    /// Months of the projection to print to the console
    #[arg(long, default_value_t = 24)]
    preview_months: usize,

    /// Print the full outcome as JSON instead of the report
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn to_input(&self) -> CalculationInput {
        let retirement_plan = match self.retirement_age {
            RetirementAge::Age63 => RetirementPlan::Age63(self.pension.unwrap_or(3_771.25)),
            RetirementAge::Age65 => RetirementPlan::Age65(self.pension.unwrap_or(4_328.67)),
        };

        CalculationInput::new(
            self.birth_date,
            self.employment_start,
            self.exit_date,
            self.annual_salary,
            self.irpf_tesa,
            self.sepe_salary,
            self.irpf_sepe,
            retirement_plan,
            self.irpf_jubilacion,
        )
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let input = cli.to_input();
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    let outcome = ScenarioRunner::new().run(&input, as_of)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("Calculadora ERE v0.1.0");
    println!("======================\n");

    println!("Entrada:");
    println!("  Fecha de nacimiento:    {}", input.birth_date);
    println!("  Fecha de incorporación: {}", input.employment_start_date);
    println!("  Fecha de salida:        {}", input.exit_date);
    println!(
        "  Edad en la salida:      {} años",
        age_at(input.birth_date, input.exit_date)
    );
    println!("  Salario anual:          {}", format_euro(input.annual_salary));
    println!(
        "  Jubilación:             a los {} con {} al mes",
        input.retirement_plan.retirement_age(),
        format_euro(input.retirement_plan.monthly_pension())
    );
    println!("  Fecha de 65 años:       {}", input.age_65_date());
    println!();

    let exemption = &outcome.exemption;
    println!(
        "Ratio de exención: {:.4} ({} días trabajados / {} días hasta 2035-12-31)",
        exemption.ratio, exemption.days_worked, exemption.days_until_deadline
    );
    if exemption.rate_overridden {
        println!(
            "  Ratio < 2.0: se aplica el tipo fijo del {:.2}% al TESA",
            exemption.applied_tesa_rate
        );
    } else {
        println!("  Tipo IRPF TESA aplicado: {:.2}%", exemption.applied_tesa_rate);
    }
    match outcome.target_exit_date {
        Some(date) => println!("  Primera fecha de salida con ratio >= 2.0: {}", date),
        None => println!("  Ninguna fecha alcanza ratio >= 2.0 antes de 2035-12-31"),
    }
    println!();

    let indemnity = &outcome.indemnity;
    println!("Indemnización:");
    println!(
        "  Periodo hasta 2012-02-11 (45 días/año): {}",
        format_euro(indemnity.period1_compensation)
    );
    println!(
        "  Periodo desde 2012-02-11 (33 días/año): {}",
        format_euro(indemnity.period2_compensation)
    );
    println!(
        "  Total (exención fiscal):                {}",
        format_euro(indemnity.total_compensation)
    );
    if indemnity.limitation_applied {
        println!("  Limitación de 730 días aplicada");
    }
    println!();

    let records = &outcome.projection.records;
    println!("Proyección mensual ({} meses):", records.len());
    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Fecha", "TESA Bruto", "IRPF TESA", "TESA Neto", "SEPE Neto", "Pensión Neta", "Total Neto"
    );
    println!("{}", "-".repeat(88));

    for record in records.iter().take(cli.preview_months) {
        println!(
            "{:>10} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
            record.date.to_string(),
            record.tesa_gross,
            record.tesa_tax,
            record.tesa_net,
            record.sepe_net,
            record.pension_net,
            record.total_net,
        );
    }

    if records.len() > cli.preview_months {
        println!("... ({} meses más)", records.len() - cli.preview_months);
    }

    if let Some(idx) = outcome.projection.first_taxed_month() {
        let crossing = &outcome.projection.records[idx];
        println!(
            "\nPrimer mes con IRPF TESA: {} ({} acumulados frente a una exención de {})",
            crossing.date,
            format_euro(crossing.cumulative_tesa_gross),
            format_euro(indemnity.total_compensation)
        );
    }

    let file = File::create(&cli.output)
        .with_context(|| format!("cannot create {}", cli.output.display()))?;
    export::write_monthly_csv(file, records, input.birth_date)?;
    println!("\nProyección completa escrita en: {}", cli.output.display());

    println!("\nResumen Anual:");
    println!(
        "{:>6} {:>16} {:>16} {:>16} {:>16}",
        "Año", "TESA Neto", "SEPE Neto", "Pensión Neta", "Total Neto"
    );
    for year in outcome.projection.annual_summaries() {
        println!(
            "{:>6} {:>16} {:>16} {:>16} {:>16}",
            year.year,
            format_euro(year.tesa_net),
            format_euro(year.sepe_net),
            format_euro(year.pension_net),
            format_euro(year.total_net),
        );
    }

    let summary = outcome.projection.summary();
    println!("\nTotales Acumulados:");
    println!("  Meses proyectados: {}", summary.total_months);
    println!("  Total TESA Neto:   {}", format_euro(summary.total_tesa_net));
    println!("  Total SEPE Neto:   {}", format_euro(summary.total_sepe_net));
    println!("  Total Pensión:     {}", format_euro(summary.total_pension_net));
    println!("  Total Neto:        {}", format_euro(summary.total_net));

    Ok(())
}
