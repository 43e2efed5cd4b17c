//! Projection state tracking for a single worker

use chrono::{Months, NaiveDate};

/// State of the projection at the current month
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Date of the current record
    pub current_date: NaiveDate,

    /// Months elapsed since the exit date (0-indexed)
    pub month_index: u32,

    /// Running employer top-up gross, carried unrounded across months
    pub cumulative_tesa_gross: f64,

    /// Whether the fiscal exemption has been used up
    pub exemption_consumed: bool,
}

impl ProjectionState {
    /// Initialize state at the exit date
    pub fn new(exit_date: NaiveDate) -> Self {
        Self {
            current_date: exit_date,
            month_index: 0,
            cumulative_tesa_gross: 0.0,
            exemption_consumed: false,
        }
    }

    /// Advance to the next month.
    ///
    /// The step is applied to the previous month's date, so a day-of-month
    /// clamped at a short month stays clamped for the rest of the horizon.
    pub fn advance_month(&mut self) {
        self.current_date = self.current_date + Months::new(1);
        self.month_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_month_clamps_and_stays_clamped() {
        let mut state = ProjectionState::new(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());

        state.advance_month();
        assert_eq!(state.current_date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(state.month_index, 1);

        state.advance_month();
        assert_eq!(state.current_date, NaiveDate::from_ymd_opt(2026, 3, 28).unwrap());
        assert_eq!(state.month_index, 2);
    }
}
