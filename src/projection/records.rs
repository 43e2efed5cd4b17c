//! Monthly output records for income projections

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::round2;

/// A single row of projection output for one month.
///
/// Monetary fields are rounded to cents; rates are percentages as applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    // Timing
    pub date: NaiveDate,

    // Employer top-up
    pub tesa_gross: f64,
    pub cumulative_tesa_gross: f64,
    pub tesa_tax_rate: f64,
    pub tesa_tax: f64,
    pub tesa_net: f64,

    // Unemployment benefit
    pub sepe_gross: f64,
    pub sepe_tax_rate: f64,
    pub sepe_tax: f64,
    pub sepe_net: f64,

    // Retirement pension
    pub pension_gross: f64,
    pub pension_tax_rate: f64,
    pub pension_tax: f64,
    pub pension_net: f64,

    // Summary
    pub total_net: f64,
}

/// Complete projection result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Monthly income records, one per month from exit to age 65
    pub records: Vec<MonthlyRecord>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Add a monthly record
    pub fn add_record(&mut self, record: MonthlyRecord) {
        self.records.push(record);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_tesa_net: f64 = self.records.iter().map(|r| r.tesa_net).sum();
        let total_sepe_net: f64 = self.records.iter().map(|r| r.sepe_net).sum();
        let total_pension_net: f64 = self.records.iter().map(|r| r.pension_net).sum();
        let total_net: f64 = self.records.iter().map(|r| r.total_net).sum();

        ProjectionSummary {
            total_months: self.records.len() as u32,
            total_tesa_net: round2(total_tesa_net),
            total_sepe_net: round2(total_sepe_net),
            total_pension_net: round2(total_pension_net),
            total_net: round2(total_net),
        }
    }

    /// Net income rolled up by calendar year, in record order
    pub fn annual_summaries(&self) -> Vec<AnnualSummary> {
        let mut summaries: Vec<AnnualSummary> = Vec::new();

        for record in &self.records {
            let year = record.date.year();
            match summaries.last_mut() {
                Some(s) if s.year == year => {
                    s.tesa_net += record.tesa_net;
                    s.sepe_net += record.sepe_net;
                    s.pension_net += record.pension_net;
                    s.total_net += record.total_net;
                }
                _ => summaries.push(AnnualSummary {
                    year,
                    tesa_net: record.tesa_net,
                    sepe_net: record.sepe_net,
                    pension_net: record.pension_net,
                    total_net: record.total_net,
                }),
            }
        }

        for s in &mut summaries {
            s.tesa_net = round2(s.tesa_net);
            s.sepe_net = round2(s.sepe_net);
            s.pension_net = round2(s.pension_net);
            s.total_net = round2(s.total_net);
        }

        summaries
    }

    /// Index of the first record with top-up withholding, if any
    pub fn first_taxed_month(&self) -> Option<usize> {
        self.records.iter().position(|r| r.tesa_tax > 0.0)
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_tesa_net: f64,
    pub total_sepe_net: f64,
    pub total_pension_net: f64,
    pub total_net: f64,
}

/// Net income for one calendar year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub year: i32,
    pub tesa_net: f64,
    pub sepe_net: f64,
    pub pension_net: f64,
    pub total_net: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: u32, tesa_net: f64, tesa_tax: f64) -> MonthlyRecord {
        MonthlyRecord {
            date: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
            tesa_gross: tesa_net + tesa_tax,
            cumulative_tesa_gross: 0.0,
            tesa_tax_rate: 13.75,
            tesa_tax,
            tesa_net,
            sepe_gross: 0.0,
            sepe_tax_rate: 5.0,
            sepe_tax: 0.0,
            sepe_net: 100.0,
            pension_gross: 0.0,
            pension_tax_rate: 23.0,
            pension_tax: 0.0,
            pension_net: 50.0,
            total_net: tesa_net + 150.0,
        }
    }

    #[test]
    fn test_summary_totals() {
        let mut result = ProjectionResult::new();
        result.add_record(record(2026, 11, 1000.0, 0.0));
        result.add_record(record(2026, 12, 1000.0, 0.0));
        result.add_record(record(2027, 1, 2000.0, 0.0));

        let summary = result.summary();
        assert_eq!(summary.total_months, 3);
        assert_eq!(summary.total_tesa_net, 4000.0);
        assert_eq!(summary.total_sepe_net, 300.0);
        assert_eq!(summary.total_pension_net, 150.0);
        assert_eq!(summary.total_net, 4450.0);
    }

    #[test]
    fn test_annual_summaries_group_by_calendar_year() {
        let mut result = ProjectionResult::new();
        result.add_record(record(2026, 11, 1000.0, 0.0));
        result.add_record(record(2026, 12, 1000.0, 0.0));
        result.add_record(record(2027, 1, 2000.0, 0.0));

        let years = result.annual_summaries();
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2026);
        assert_eq!(years[0].tesa_net, 2000.0);
        assert_eq!(years[0].total_net, 2300.0);
        assert_eq!(years[1].year, 2027);
        assert_eq!(years[1].tesa_net, 2000.0);
    }

    #[test]
    fn test_first_taxed_month() {
        let mut result = ProjectionResult::new();
        assert_eq!(result.first_taxed_month(), None);

        result.add_record(record(2026, 3, 1000.0, 0.0));
        result.add_record(record(2026, 4, 900.0, 110.5));
        result.add_record(record(2026, 5, 850.0, 160.0));
        assert_eq!(result.first_taxed_month(), Some(1));
    }
}
