//! Figures quoted in the chart annotations and the `summary` command.

use crate::analysis::Analysis;
use crate::rolling::trailing_mean;
use serde::Serialize;
use std::fmt;

/// Trailing periods, in rows, reported as recent average PR.
pub const TRAILING_PERIODS: [usize; 5] = [7, 30, 60, 90, 365];

/// How many days beat their Budget PR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetComparison {
    /// Days whose PR is strictly greater than Budget PR
    pub above: usize,
    pub total: usize,
}

impl BudgetComparison {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.above as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for BudgetComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Points above Target Budget PR {}/{} {:.1}%",
            self.above,
            self.total,
            self.percent()
        )
    }
}

/// Mean PR over the last `period` rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailingAverage {
    pub period: usize,
    pub mean: f64,
}

impl fmt::Display for TrailingAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Average PR last {}-d: {:.1}%", self.period, self.mean)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub comparison: BudgetComparison,
    /// One entry per [`TRAILING_PERIODS`] value, in that order
    pub trailing: Vec<TrailingAverage>,
}

impl Summary {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let days = analysis.days();
        let comparison = BudgetComparison {
            above: days.iter().filter(|day| day.is_above_budget()).count(),
            total: days.len(),
        };
        let pr = analysis.pr_values();
        let trailing = TRAILING_PERIODS
            .iter()
            .filter_map(|&period| trailing_mean(&pr, period).map(|mean| TrailingAverage { period, mean }))
            .collect();
        Summary {
            comparison,
            trailing,
        }
    }

    /// Annotation lines, budget comparison first.
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(self.comparison.to_string())
            .chain(self.trailing.iter().map(ToString::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::budget::BudgetPolicy;
    use chrono::{Duration, NaiveDate};
    use spr_data::{DailyPerformance, Dataset};

    #[test]
    fn test_percent_rounding() {
        let comparison = BudgetComparison { above: 2, total: 3 };
        assert_eq!(comparison.to_string(), "Points above Target Budget PR 2/3 66.7%");
        let none = BudgetComparison { above: 0, total: 0 };
        assert_eq!(none.percent(), 0.0);
    }

    #[test]
    fn test_equal_to_budget_is_not_above() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let dataset = Dataset::new(vec![
            DailyPerformance::new(start, 73.9, 3.0),
            DailyPerformance::new(start + Duration::days(1), 74.0, 3.0),
            DailyPerformance::new(start + Duration::days(2), 50.0, 3.0),
        ])
        .unwrap();
        let summary = analyze(&dataset, &BudgetPolicy::default()).summary();
        assert_eq!(summary.comparison, BudgetComparison { above: 1, total: 3 });
    }

    #[test]
    fn test_trailing_averages() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        // 100 days: the first 90 at PR 70, the last 10 at PR 90
        let days = (0..100)
            .map(|offset| {
                let pr = if offset < 90 { 70.0 } else { 90.0 };
                DailyPerformance::new(start + Duration::days(offset), pr, 3.0)
            })
            .collect();
        let summary = analyze(&Dataset::new(days).unwrap(), &BudgetPolicy::default()).summary();

        let periods: Vec<usize> = summary.trailing.iter().map(|t| t.period).collect();
        assert_eq!(periods, TRAILING_PERIODS.to_vec());
        assert_eq!(summary.trailing[0].mean, 90.0);
        // 10 at 90 and 20 at 70
        assert!((summary.trailing[1].mean - 76.666_666_666).abs() < 1e-6);
        // 365 requested, only 100 rows available
        assert!((summary.trailing[4].mean - 72.0).abs() < 1e-9);

        let lines = summary.lines();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "Average PR last 7-d: 90.0%");
        assert_eq!(lines[2], "Average PR last 30-d: 76.7%");
        assert_eq!(lines[5], "Average PR last 365-d: 72.0%");
    }
}
