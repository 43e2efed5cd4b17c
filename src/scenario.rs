//! Scenario runner composing the full ERE calculation
//!
//! Validates the input, resolves the exemption ratio and the applied top-up
//! rate, computes the severance indemnity, and projects monthly income with
//! the indemnity as the fiscal exemption.

use chrono::NaiveDate;
use serde::Serialize;

use crate::exemption::{self, ExemptionAssessment};
use crate::indemnity::{compute_indemnity, IndemnityResult};
use crate::input::{CalculationInput, InputError};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Full outcome of one worker's ERE calculation
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// Exemption ratio check and the applied top-up rate
    pub exemption: ExemptionAssessment,

    /// First date on which the ratio reaches the threshold, if any
    pub target_exit_date: Option<NaiveDate>,

    /// Severance indemnity; its total is the fiscal exemption
    pub indemnity: IndemnityResult,

    /// Monthly income records from exit to age 65
    pub projection: ProjectionResult,
}

/// Runner holding the projection config shared by all scenarios
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create a runner with the standard plan parameters
    pub fn new() -> Self {
        Self {
            config: ProjectionConfig::default(),
        }
    }

    /// Create a runner with a custom projection config
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the full calculation for one worker.
    ///
    /// `as_of` anchors the target-date scan; exits in the past scan from
    /// `as_of` forward.
    pub fn run(
        &self,
        input: &CalculationInput,
        as_of: NaiveDate,
    ) -> Result<ScenarioOutcome, InputError> {
        input.validate()?;

        let exemption = exemption::assess(
            input.employment_start_date,
            input.exit_date,
            input.tesa_tax_rate,
        );
        log::debug!(
            "exemption ratio {:.4} ({} worked / {} remaining), applied rate {:.2}%",
            exemption.ratio,
            exemption.days_worked,
            exemption.days_until_deadline,
            exemption.applied_tesa_rate,
        );

        let target_exit_date =
            exemption::find_target_exit_date(input.employment_start_date, input.exit_date, as_of);

        let indemnity =
            compute_indemnity(input.employment_start_date, input.exit_date, input.annual_salary);

        let engine = ProjectionEngine::new(self.config.clone());
        let projection = engine.project(
            input,
            indemnity.total_compensation,
            exemption.applied_tesa_rate,
        );

        if let Some(first_taxed) = projection.first_taxed_month() {
            log::debug!(
                "fiscal exemption of {:.2} consumed at {}",
                indemnity.total_compensation,
                projection.records[first_taxed].date,
            );
        }
        log::info!(
            "projected {} months, total net {:.2}",
            projection.records.len(),
            projection.summary().total_net,
        );

        Ok(ScenarioOutcome {
            exemption,
            target_exit_date,
            indemnity,
            projection,
        })
    }

    /// Run the full calculation for several workers with the same config
    pub fn run_batch(
        &self,
        inputs: &[CalculationInput],
        as_of: NaiveDate,
    ) -> Result<Vec<ScenarioOutcome>, InputError> {
        inputs.iter().map(|input| self.run(input, as_of)).collect()
    }

    /// Get reference to the runner's projection config
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RetirementPlan;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_scenario_outcome() {
        let input = CalculationInput::default_scenario();
        let outcome = ScenarioRunner::new()
            .run(&input, ymd(2025, 9, 1))
            .expect("valid input");

        // Long tenure: no override, capped indemnity, 109-month horizon
        assert!(!outcome.exemption.rate_overridden);
        assert_eq!(outcome.exemption.applied_tesa_rate, 13.75);
        assert!(outcome.indemnity.limitation_applied);
        assert_eq!(outcome.projection.records.len(), 109);

        // Already above the threshold, so the scan hits its first candidate
        assert_eq!(outcome.target_exit_date, Some(input.exit_date));

        // The 184,583.43 indemnity shelters the top-up until 2030-12, where
        // only the excess over the allowance is withheld
        assert_eq!(outcome.projection.first_taxed_month(), Some(57));
        let crossing = &outcome.projection.records[57];
        assert_eq!(crossing.date, ymd(2030, 12, 1));
        assert!((crossing.tesa_tax - 512.43).abs() < 0.01);
        assert_eq!(outcome.projection.records[56].tesa_tax, 0.0);
    }

    #[test]
    fn test_short_tenure_applies_flat_rate_to_projection() {
        let input = CalculationInput::new(
            ymd(1970, 3, 25),
            ymd(2024, 1, 1),
            ymd(2026, 1, 1),
            40_000.0,
            13.75,
            1_181.0,
            5.0,
            RetirementPlan::Age63(3_000.0),
            23.0,
        );
        let outcome = ScenarioRunner::new()
            .run(&input, ymd(2026, 1, 1))
            .expect("valid input");

        assert!(outcome.exemption.rate_overridden);
        assert_eq!(outcome.exemption.applied_tesa_rate, 30.0);
        for record in &outcome.projection.records {
            assert_eq!(record.tesa_tax_rate, 30.0);
        }

        // A two-year indemnity is consumed quickly: withholding starts
        // within the horizon
        assert!(outcome.projection.first_taxed_month().is_some());
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut input = CalculationInput::default_scenario();
        input.pension_tax_rate = -5.0;

        let err = ScenarioRunner::new().run(&input, ymd(2025, 9, 1)).unwrap_err();
        assert!(matches!(err, InputError::RateOutOfRange { .. }));
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let a = CalculationInput::default_scenario();
        let mut b = CalculationInput::default_scenario();
        b.exit_date = ymd(2027, 3, 1);

        let outcomes = ScenarioRunner::new()
            .run_batch(&[a, b], ymd(2025, 9, 1))
            .expect("valid inputs");

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].projection.records[0].date, ymd(2026, 3, 1));
        assert_eq!(outcomes[1].projection.records[0].date, ymd(2027, 3, 1));
    }
}
