//! Load scenario batches from escenarios.csv

use super::{CalculationInput, RetirementPlan};
use chrono::NaiveDate;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// A labelled calculation input, one worker per CSV row
#[derive(Debug, Clone)]
pub struct ScenarioRecord {
    /// Worker label used in batch reports
    pub label: String,
    /// Calculation input parsed from the row
    pub input: CalculationInput,
}

/// Raw CSV row matching escenarios.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Nombre")]
    nombre: String,
    #[serde(rename = "FechaNacimiento")]
    fecha_nacimiento: NaiveDate,
    #[serde(rename = "FechaIncorporacion")]
    fecha_incorporacion: NaiveDate,
    #[serde(rename = "FechaSalida")]
    fecha_salida: NaiveDate,
    #[serde(rename = "SalarioAnual")]
    salario_anual: f64,
    #[serde(rename = "IrpfTesa")]
    irpf_tesa: f64,
    #[serde(rename = "SalarioSepe")]
    salario_sepe: f64,
    #[serde(rename = "IrpfSepe")]
    irpf_sepe: f64,
    #[serde(rename = "EdadJubilacion")]
    edad_jubilacion: u32,
    #[serde(rename = "PensionMensual")]
    pension_mensual: f64,
    #[serde(rename = "IrpfJubilacion")]
    irpf_jubilacion: f64,
}

impl CsvRow {
    fn to_record(self) -> Result<ScenarioRecord, Box<dyn Error>> {
        let retirement_plan = match self.edad_jubilacion {
            63 => RetirementPlan::Age63(self.pension_mensual),
            65 => RetirementPlan::Age65(self.pension_mensual),
            other => return Err(format!("Unknown EdadJubilacion: {} (must be 63 or 65)", other).into()),
        };

        Ok(ScenarioRecord {
            label: self.nombre,
            input: CalculationInput {
                birth_date: self.fecha_nacimiento,
                employment_start_date: self.fecha_incorporacion,
                exit_date: self.fecha_salida,
                annual_salary: self.salario_anual,
                tesa_tax_rate: self.irpf_tesa,
                sepe_salary: self.salario_sepe,
                sepe_tax_rate: self.irpf_sepe,
                retirement_plan,
                pension_tax_rate: self.irpf_jubilacion,
            },
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_path(&path)?;
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let record = row.to_record()?;
        scenarios.push(record);
    }

    log::info!(
        "loaded {} scenarios from {}",
        scenarios.len(),
        path.as_ref().display()
    );
    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, network stream)
pub fn load_scenarios_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ScenarioRecord>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let record = row.to_record()?;
        scenarios.push(record);
    }

    Ok(scenarios)
}
