//! Core projection engine for monthly post-layoff income records

use chrono::{Datelike, NaiveDate};

use super::records::{MonthlyRecord, ProjectionResult};
use super::state::ProjectionState;
use crate::input::CalculationInput;
use crate::round2;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Months of unemployment benefit counted from the exit date
    pub sepe_benefit_months: u32,

    /// Salary fraction guaranteed by the employer before age 63
    pub salary_fraction_before_63: f64,

    /// Salary fraction guaranteed from age 63 to 65
    pub salary_fraction_from_63: f64,

    /// Annual increase applied to the 63-to-65 fraction
    pub annual_increase: f64,

    /// Last calendar year in which the annual increase accrues
    pub increase_final_year: i32,

    /// Calendar months in which the pension is paid twice
    pub double_pension_months: [u32; 2],
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            sepe_benefit_months: 24,
            salary_fraction_before_63: 0.68,
            salary_fraction_from_63: 0.38,
            annual_increase: 0.01,
            increase_final_year: 2033,
            double_pension_months: [6, 11], // June and November
        }
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Project monthly income records from the exit date through the age-65
    /// date, stepping one calendar month per record.
    ///
    /// # Arguments
    /// * `input` - Worker input record
    /// * `fiscal_exemption` - Severance amount sheltered from withholding;
    ///   top-up gross accumulates against it and only the excess is taxed
    /// * `tesa_tax_rate` - Applied top-up withholding rate in percent (after
    ///   any exemption-ratio override)
    pub fn project(
        &self,
        input: &CalculationInput,
        fiscal_exemption: f64,
        tesa_tax_rate: f64,
    ) -> ProjectionResult {
        let date_63 = input.age_63_date();
        let date_65 = input.age_65_date();

        let mut result = ProjectionResult::new();
        let mut state = ProjectionState::new(input.exit_date);

        while state.current_date <= date_65 {
            let record = self.calculate_month(
                input,
                &mut state,
                fiscal_exemption,
                tesa_tax_rate,
                date_63,
                date_65,
            );
            result.add_record(record);
            state.advance_month();
        }

        result
    }

    /// Calculate income for a single month
    fn calculate_month(
        &self,
        input: &CalculationInput,
        state: &mut ProjectionState,
        fiscal_exemption: f64,
        tesa_tax_rate: f64,
        date_63: NaiveDate,
        date_65: NaiveDate,
    ) -> MonthlyRecord {
        let date = state.current_date;
        let tesa_rate = tesa_tax_rate / 100.0;
        let sepe_rate = input.sepe_tax_rate / 100.0;
        let pension_rate = input.pension_tax_rate / 100.0;

        // Unemployment benefit covers the first sepe_benefit_months months
        let sepe_gross = if state.month_index < self.config.sepe_benefit_months {
            input.sepe_salary
        } else {
            0.0
        };
        let sepe_tax = sepe_gross * sepe_rate;
        let sepe_net = sepe_gross - sepe_tax;

        // The employer tops the guaranteed salary fraction up over the
        // unemployment benefit. From 63 the lower fraction applies, carrying
        // the annual increase; from 65 the top-up ends.
        let increase_factor = self.increase_factor(date, input.exit_date);
        let tesa_gross = if date < date_63 {
            input.annual_salary * self.config.salary_fraction_before_63 / 12.0 - sepe_gross
        } else if date < date_65 {
            input.annual_salary * self.config.salary_fraction_from_63 * increase_factor / 12.0
                - sepe_gross
        } else {
            0.0
        };

        state.cumulative_tesa_gross += tesa_gross;

        // The exemption shelters top-up gross until used up; the crossing
        // month taxes only the excess over the allowance
        let tesa_tax = if state.exemption_consumed {
            tesa_gross * tesa_rate
        } else if state.cumulative_tesa_gross >= fiscal_exemption {
            state.exemption_consumed = true;
            (state.cumulative_tesa_gross - fiscal_exemption) * tesa_rate
        } else {
            0.0
        };
        let tesa_net = tesa_gross - tesa_tax;

        // Pension runs from the age-63 date in both retirement modes, paid
        // twice in the double-payment months
        let pension_gross = if date >= date_63 {
            let base = input.retirement_plan.monthly_pension();
            if self.config.double_pension_months.contains(&date.month()) {
                base * 2.0
            } else {
                base
            }
        } else {
            0.0
        };
        let pension_tax = pension_gross * pension_rate;
        let pension_net = pension_gross - pension_tax;

        let total_net = tesa_net + sepe_net + pension_net;

        MonthlyRecord {
            date,
            tesa_gross: round2(tesa_gross),
            cumulative_tesa_gross: round2(state.cumulative_tesa_gross),
            tesa_tax_rate,
            tesa_tax: round2(tesa_tax),
            tesa_net: round2(tesa_net),
            sepe_gross: round2(sepe_gross),
            sepe_tax_rate: input.sepe_tax_rate,
            sepe_tax: round2(sepe_tax),
            sepe_net: round2(sepe_net),
            pension_gross: round2(pension_gross),
            pension_tax_rate: input.pension_tax_rate,
            pension_tax: round2(pension_tax),
            pension_net: round2(pension_net),
            total_net: round2(total_net),
        }
    }

    /// Cumulative increase factor for the 63-to-65 fraction.
    ///
    /// The exponent grows in fractional years since exit while the calendar
    /// year is at most `increase_final_year`, capped at the exit-to-final
    /// span; later years keep the final-year value.
    fn increase_factor(&self, date: NaiveDate, exit_date: NaiveDate) -> f64 {
        let final_span = (self.config.increase_final_year - exit_date.year()) as f64;
        let exponent = if date.year() <= self.config.increase_final_year {
            let years_since_exit = (date.year() - exit_date.year()) as f64
                + (date.month() as f64 - exit_date.month() as f64) / 12.0;
            years_since_exit.min(final_span)
        } else {
            final_span
        };
        (1.0 + self.config.annual_increase).powf(exponent)
    }
}
