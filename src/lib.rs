//! ERE Calculator - Severance and post-layoff income projection for Spanish ERE plans
//!
//! This library provides:
//! - Mixed severance indemnity across the 2012 labor reform (45/33 days per year, 730-day cap)
//! - Month-by-month income projection to age 65 (employer top-up, unemployment benefit, pension)
//! - Fiscal-exemption tracking that shelters the top-up until the severance allowance is consumed
//! - Exemption ratio assessment with target exit date search
//! - Scenario batch loading and Spanish-locale CSV export

pub mod exemption;
pub mod export;
pub mod indemnity;
pub mod input;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use exemption::ExemptionAssessment;
pub use indemnity::{compute_indemnity, IndemnityResult};
pub use input::{CalculationInput, InputError, RetirementPlan};
pub use projection::{MonthlyRecord, ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::{ScenarioOutcome, ScenarioRunner};

/// Round a monetary amount to cents, half away from zero
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
