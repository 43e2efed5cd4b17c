//! Input data structures for a single worker's ERE calculation

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Retirement option agreed in the ERE plan, with its gross monthly pension.
///
/// Exactly one option applies per worker. In both modes the pension is paid
/// from the age-63 date onward; the option only determines which agreed
/// amount applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RetirementPlan {
    /// Early retirement at 63
    Age63(f64),
    /// Ordinary retirement at 65
    Age65(f64),
}

impl RetirementPlan {
    /// Gross monthly pension for the agreed option
    pub fn monthly_pension(&self) -> f64 {
        match self {
            RetirementPlan::Age63(amount) | RetirementPlan::Age65(amount) => *amount,
        }
    }

    /// Statutory retirement age of the agreed option
    pub fn retirement_age(&self) -> u32 {
        match self {
            RetirementPlan::Age63(_) => 63,
            RetirementPlan::Age65(_) => 65,
        }
    }
}

/// Validation failure on a calculation input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// A withholding rate is outside the percent range
    #[error("{field} must be between 0 and 100, got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },

    /// A monetary amount is negative
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    /// The agreed monthly pension is zero or negative
    #[error("monthly pension must be positive, got {value}")]
    NonPositivePension { value: f64 },
}

/// Immutable input record for one worker's severance and income projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Worker's date of birth
    pub birth_date: NaiveDate,

    /// First day of employment with the company
    pub employment_start_date: NaiveDate,

    /// Contract termination date; first month of the projection
    pub exit_date: NaiveDate,

    /// Gross annual salary at exit
    pub annual_salary: f64,

    /// IRPF withholding rate on the employer top-up, in percent
    pub tesa_tax_rate: f64,

    /// Gross monthly unemployment benefit
    pub sepe_salary: f64,

    /// IRPF withholding rate on the unemployment benefit, in percent
    pub sepe_tax_rate: f64,

    /// Retirement option and its agreed gross monthly pension
    pub retirement_plan: RetirementPlan,

    /// IRPF withholding rate on the pension, in percent
    pub pension_tax_rate: f64,
}

impl CalculationInput {
    /// Create an input record from all required fields
    pub fn new(
        birth_date: NaiveDate,
        employment_start_date: NaiveDate,
        exit_date: NaiveDate,
        annual_salary: f64,
        tesa_tax_rate: f64,
        sepe_salary: f64,
        sepe_tax_rate: f64,
        retirement_plan: RetirementPlan,
        pension_tax_rate: f64,
    ) -> Self {
        Self {
            birth_date,
            employment_start_date,
            exit_date,
            annual_salary,
            tesa_tax_rate,
            sepe_salary,
            sepe_tax_rate,
            retirement_plan,
            pension_tax_rate,
        }
    }

    /// Reference scenario with the standard plan parameters
    pub fn default_scenario() -> Self {
        Self::new(
            NaiveDate::from_ymd_opt(1970, 3, 25).expect("valid date"),
            NaiveDate::from_ymd_opt(1989, 6, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
            65_919.12,
            13.75,
            1_181.0,
            5.0,
            RetirementPlan::Age63(3_771.25),
            23.0,
        )
    }

    /// Date the worker turns 63 (day-of-month clamped for short months)
    pub fn age_63_date(&self) -> NaiveDate {
        self.birth_date + Months::new(63 * 12)
    }

    /// Date the worker turns 65; end of the projection horizon
    pub fn age_65_date(&self) -> NaiveDate {
        self.birth_date + Months::new(65 * 12)
    }

    /// Check rate ranges and amount signs.
    ///
    /// Date ordering is deliberately not checked: an exit before the
    /// employment start yields zero indemnity, and an exit past the age-65
    /// date yields an empty projection.
    pub fn validate(&self) -> Result<(), InputError> {
        let rates = [
            ("tesa_tax_rate", self.tesa_tax_rate),
            ("sepe_tax_rate", self.sepe_tax_rate),
            ("pension_tax_rate", self.pension_tax_rate),
        ];
        for (field, value) in rates {
            if !(0.0..=100.0).contains(&value) {
                return Err(InputError::RateOutOfRange { field, value });
            }
        }

        let amounts = [
            ("annual_salary", self.annual_salary),
            ("sepe_salary", self.sepe_salary),
        ];
        for (field, value) in amounts {
            if value < 0.0 {
                return Err(InputError::NegativeAmount { field, value });
            }
        }

        let pension = self.retirement_plan.monthly_pension();
        if pension <= 0.0 {
            return Err(InputError::NonPositivePension { value: pension });
        }

        Ok(())
    }
}
