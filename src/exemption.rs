//! Exemption ratio assessment and target exit date search
//!
//! The fiscal treatment of the employer top-up depends on the ratio of days
//! already worked to days remaining until the statutory deadline. A ratio
//! below the threshold forces a flat withholding rate on the top-up.

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Statutory deadline the remaining days are measured against
pub fn exemption_deadline() -> NaiveDate {
    NaiveDate::from_ymd_opt(2035, 12, 31).expect("valid date")
}

/// Minimum worked-to-remaining ratio for the requested rate to apply
pub const RATIO_THRESHOLD: f64 = 2.0;

/// Flat top-up withholding rate in percent, applied below the threshold
pub const FLAT_TESA_RATE: f64 = 30.0;

/// Outcome of the exemption ratio check for a given exit date
#[derive(Debug, Clone, Serialize)]
pub struct ExemptionAssessment {
    /// Days worked over days remaining until the deadline
    pub ratio: f64,

    /// Days from employment start to the exit date
    pub days_worked: i64,

    /// Days from the exit date to the deadline
    pub days_until_deadline: i64,

    /// Top-up withholding rate in percent after the threshold check
    pub applied_tesa_rate: f64,

    /// Whether the flat rate replaced the requested rate
    pub rate_overridden: bool,
}

/// Worked-to-remaining ratio for a candidate exit date.
///
/// Zero when no days remain before the deadline, so a candidate on or past
/// the deadline never qualifies.
pub fn ratio_at(employment_start_date: NaiveDate, candidate: NaiveDate) -> f64 {
    let days_worked = (candidate - employment_start_date).num_days();
    let days_until_deadline = (exemption_deadline() - candidate).num_days();
    if days_until_deadline > 0 {
        days_worked as f64 / days_until_deadline as f64
    } else {
        0.0
    }
}

/// Assess the exemption ratio at the exit date and resolve the top-up
/// withholding rate.
///
/// # Arguments
/// * `employment_start_date` - First day of employment
/// * `exit_date` - Contract termination date
/// * `requested_tesa_rate` - Top-up withholding rate in percent requested by
///   the worker's plan
pub fn assess(
    employment_start_date: NaiveDate,
    exit_date: NaiveDate,
    requested_tesa_rate: f64,
) -> ExemptionAssessment {
    let days_worked = (exit_date - employment_start_date).num_days();
    let days_until_deadline = (exemption_deadline() - exit_date).num_days();
    let ratio = ratio_at(employment_start_date, exit_date);

    let rate_overridden = ratio < RATIO_THRESHOLD;
    let applied_tesa_rate = if rate_overridden {
        FLAT_TESA_RATE
    } else {
        requested_tesa_rate
    };

    ExemptionAssessment {
        ratio,
        days_worked,
        days_until_deadline,
        applied_tesa_rate,
        rate_overridden,
    }
}

/// First date from `max(exit_date, as_of)` on which the ratio reaches the
/// threshold, scanning day by day up to the deadline.
///
/// The ratio never decreases along the scan (days worked grow while days
/// remaining shrink), so the first hit is the earliest qualifying date.
/// Returns `None` when no date up to the deadline qualifies.
pub fn find_target_exit_date(
    employment_start_date: NaiveDate,
    exit_date: NaiveDate,
    as_of: NaiveDate,
) -> Option<NaiveDate> {
    let deadline = exemption_deadline();
    let mut candidate = exit_date.max(as_of);

    while candidate <= deadline {
        if ratio_at(employment_start_date, candidate) >= RATIO_THRESHOLD {
            return Some(candidate);
        }
        candidate = candidate + Days::new(1);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ratio_for_long_tenure_clears_threshold() {
        // 36.75 years worked against 9.8 years remaining
        let a = assess(ymd(1989, 6, 1), ymd(2026, 3, 1), 13.75);

        assert!(a.ratio >= RATIO_THRESHOLD);
        assert!(!a.rate_overridden);
        assert_eq!(a.applied_tesa_rate, 13.75);
        assert_eq!(a.days_worked, 13_422);
        assert_eq!(a.days_until_deadline, 3_592);
    }

    #[test]
    fn test_short_tenure_forces_flat_rate() {
        let a = assess(ymd(2024, 1, 1), ymd(2026, 1, 1), 13.75);

        assert!(a.ratio < RATIO_THRESHOLD);
        assert!(a.rate_overridden);
        assert_eq!(a.applied_tesa_rate, FLAT_TESA_RATE);
    }

    #[test]
    fn test_ratio_is_zero_on_and_after_the_deadline() {
        assert_eq!(ratio_at(ymd(2000, 1, 1), exemption_deadline()), 0.0);
        assert_eq!(ratio_at(ymd(2000, 1, 1), ymd(2036, 6, 1)), 0.0);
    }

    #[test]
    fn test_target_date_is_earliest_qualifying_day() {
        let start = ymd(2010, 1, 1);
        let exit = ymd(2024, 1, 1);
        let target = find_target_exit_date(start, exit, ymd(2024, 1, 1))
            .expect("ratio must reach the threshold before the deadline");

        assert!(target > exit);
        assert!(ratio_at(start, target) >= RATIO_THRESHOLD);
        // The day before must still be short of the threshold
        assert!(ratio_at(start, target - Days::new(1)) < RATIO_THRESHOLD);
    }

    #[test]
    fn test_scan_starts_at_as_of_when_exit_is_in_the_past() {
        let start = ymd(1989, 6, 1);
        // Already above the threshold: first candidate wins
        let as_of = ymd(2026, 6, 15);
        let target = find_target_exit_date(start, ymd(2026, 3, 1), as_of);
        assert_eq!(target, Some(as_of));
    }

    #[test]
    fn test_no_target_once_the_deadline_has_passed() {
        let target = find_target_exit_date(ymd(1989, 6, 1), ymd(2026, 3, 1), ymd(2036, 6, 1));
        assert_eq!(target, None);
    }

    #[test]
    fn test_deadline_day_itself_never_qualifies() {
        // Scanning from the deadline leaves no day with remaining time
        let target = find_target_exit_date(ymd(2000, 1, 1), exemption_deadline(), exemption_deadline());
        assert_eq!(target, None);
    }
}
