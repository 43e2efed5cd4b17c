//! Mixed severance indemnity for contracts spanning the 2012 labor reform
//!
//! Service before 2012-02-11 accrues at 45 days of salary per year, service
//! from that date on at 33 days per year, and the payable total is limited
//! to a 730 day-unit budget charged against the post-reform share.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::round2;

/// Days of salary accrued per year of service before the reform
pub const PRE_REFORM_DAYS_PER_YEAR: f64 = 45.0;

/// Days of salary accrued per year of service from the reform onward
pub const POST_REFORM_DAYS_PER_YEAR: f64 = 33.0;

/// Cap on the combined accrual, in day-units (two years of salary)
pub const MAX_COMPENSATION_DAYS: f64 = 730.0;

/// Labor reform cutoff; the cutoff day itself still accrues at the old rate
pub fn legal_reform_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2012, 2, 11).expect("valid date")
}

/// Severance indemnity split across the two accrual regimes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndemnityResult {
    /// Payable indemnity after the day-unit cap
    pub total_compensation: f64,

    /// Uncapped accrual for service before the reform (45 days/year)
    pub period1_compensation: f64,

    /// Uncapped accrual for service from the reform on (33 days/year)
    pub period2_compensation: f64,

    /// Whether the cap reduced the payable total
    pub limitation_applied: bool,
}

/// Calculate the mixed severance indemnity for a period of service.
///
/// # Arguments
/// * `employment_start_date` - First day of employment
/// * `exit_date` - Contract termination date
/// * `annual_salary` - Gross annual salary at exit
///
/// # Returns
/// * `IndemnityResult` - Uncapped per-period accruals and the capped total,
///   all rounded to cents
pub fn compute_indemnity(
    employment_start_date: NaiveDate,
    exit_date: NaiveDate,
    annual_salary: f64,
) -> IndemnityResult {
    let daily_salary = annual_salary / 365.0;
    let reform = legal_reform_date();

    // Service before the reform
    let period1_end = reform.min(exit_date);
    let period1_years = if period1_end > employment_start_date {
        (period1_end - employment_start_date).num_days() as f64 / 365.0
    } else {
        0.0
    };

    // Service from the reform on
    let period2_start = reform.max(employment_start_date);
    let period2_years = if exit_date > period2_start {
        (exit_date - period2_start).num_days() as f64 / 365.0
    } else {
        0.0
    };

    let period1_compensation = period1_years * PRE_REFORM_DAYS_PER_YEAR * daily_salary;
    let period2_compensation = period2_years * POST_REFORM_DAYS_PER_YEAR * daily_salary;

    let accrued_days =
        period1_years * PRE_REFORM_DAYS_PER_YEAR + period2_years * POST_REFORM_DAYS_PER_YEAR;

    let (total, limitation_applied) = if accrued_days > MAX_COMPENSATION_DAYS {
        // The cap falls on the post-reform share: period 2 keeps at most the
        // tenure left under a two-year budget once period 1 is counted. A
        // period-1 accrual already past the budget is kept in full.
        let max_period2_years =
            (2.0 - period1_years * PRE_REFORM_DAYS_PER_YEAR / 365.0).max(0.0);
        let capped_period2 = max_period2_years * POST_REFORM_DAYS_PER_YEAR * daily_salary;
        (period1_compensation + capped_period2, true)
    } else {
        (period1_compensation + period2_compensation, false)
    };

    IndemnityResult {
        total_compensation: round2(total),
        period1_compensation: round2(period1_compensation),
        period2_compensation: round2(period2_compensation),
        limitation_applied,
    }
}
