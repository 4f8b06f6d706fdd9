//! Derived columns and summary statistics for daily PR data.
//!
//! This crate turns a loaded [`spr_data::Dataset`] into an [`Analysis`]:
//! every row gains a Budget PR, a 30-day moving average and an irradiation
//! band, and the whole table yields the numbers quoted in chart annotations.

mod analysis;
pub mod summary;

pub use analysis::{analyze, Analysis, AnalyzedDay, MOVING_AVERAGE_WINDOW};
pub use summary::{BudgetComparison, Summary, TrailingAverage, TRAILING_PERIODS};

/// Target budget PR that steps down once per period of operation.
pub mod budget {
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};
    use spr_utils::dates::days_since;

    /// Budget PR in the first year of operation, in percent.
    pub const INITIAL_BUDGET_PR: f64 = 73.9;

    /// Budget reduction applied at the start of each new period, in percent.
    pub const ANNUAL_DEGRADATION: f64 = 0.8;

    /// Length of one budget period, in days.
    pub const BUDGET_PERIOD_DAYS: i64 = 365;

    /// Parameters of the stepped budget line.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct BudgetPolicy {
        pub initial_pr: f64,
        pub annual_degradation: f64,
        pub period_days: i64,
    }

    impl Default for BudgetPolicy {
        fn default() -> Self {
            BudgetPolicy {
                initial_pr: INITIAL_BUDGET_PR,
                annual_degradation: ANNUAL_DEGRADATION,
                period_days: BUDGET_PERIOD_DAYS,
            }
        }
    }

    impl BudgetPolicy {
        /// Number of whole periods elapsed between `start` and `date`.
        pub fn periods_elapsed(&self, start: &NaiveDate, date: &NaiveDate) -> i64 {
            days_since(start, date).div_euclid(self.period_days)
        }

        /// Budget PR on `date` for a plant whose series begins at `start`.
        pub fn budget_pr(&self, start: &NaiveDate, date: &NaiveDate) -> f64 {
            self.initial_pr - self.periods_elapsed(start, date) as f64 * self.annual_degradation
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{Duration, NaiveDate};

        fn close(a: f64, b: f64) -> bool {
            (a - b).abs() < 1e-9
        }

        #[test]
        fn test_budget_steps_yearly() {
            let policy = BudgetPolicy::default();
            let start = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap();
            let at = |days: i64| policy.budget_pr(&start, &(start + Duration::days(days)));
            assert!(close(at(0), 73.9));
            assert!(close(at(364), 73.9));
            assert!(close(at(365), 73.1));
            assert!(close(at(729), 73.1));
            assert!(close(at(730), 72.3));
            assert!(close(at(1095), 71.5));
        }

        #[test]
        fn test_budget_over_three_years() {
            let policy = BudgetPolicy::default();
            let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let mut previous = f64::INFINITY;
            for offset in 0..(3 * 365 + 30) {
                let date = start + Duration::days(offset);
                let expected = 73.9 - 0.8 * (offset / 365) as f64;
                let budget = policy.budget_pr(&start, &date);
                assert!(close(budget, expected), "day {}: {} != {}", offset, budget, expected);
                assert!(budget <= previous);
                previous = budget;
            }
        }
    }
}

/// Trailing window means over row order.
pub mod rolling {
    /// Mean of each trailing `window` of values, inclusive of the current one.
    ///
    /// The first `window - 1` entries are `None`. A zero window yields no values.
    pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
        if window == 0 {
            return vec![None; values.len()];
        }
        let mut result = vec![None; values.len().min(window - 1)];
        result.extend(
            values
                .windows(window)
                .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
        );
        result
    }

    /// Mean of the last `n` values, or of all values if there are fewer.
    pub fn trailing_mean(values: &[f64], n: usize) -> Option<f64> {
        let take = n.min(values.len());
        if take == 0 {
            return None;
        }
        let tail = &values[values.len() - take..];
        Some(tail.iter().sum::<f64>() / take as f64)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_moving_average_30() {
            let values: Vec<f64> = (1..=40).map(f64::from).collect();
            let averages = moving_average(&values, 30);
            assert_eq!(averages.len(), 40);
            assert!(averages[..29].iter().all(Option::is_none));
            assert_eq!(averages[29], Some(15.5));
            assert_eq!(averages[39], Some(25.5));
        }

        #[test]
        fn test_moving_average_short_series() {
            let averages = moving_average(&[1.0, 2.0, 3.0], 30);
            assert_eq!(averages, vec![None, None, None]);
        }

        #[test]
        fn test_moving_average_zero_window() {
            assert_eq!(moving_average(&[1.0, 2.0], 0), vec![None, None]);
        }

        #[test]
        fn test_trailing_mean() {
            let values = [10.0, 20.0, 30.0, 40.0];
            assert_eq!(trailing_mean(&values, 2), Some(35.0));
            assert_eq!(trailing_mean(&values, 4), Some(25.0));
            // shorter than requested: use what is there
            assert_eq!(trailing_mean(&values, 365), Some(25.0));
            assert_eq!(trailing_mean(&[], 7), None);
            assert_eq!(trailing_mean(&values, 0), None);
        }
    }
}

/// Daily irradiation bands used to color the scatter.
pub mod irradiance {
    use serde::{Deserialize, Serialize};

    /// Band a day falls into by its GHI (kWh/m²).
    ///
    /// Bounds are half-open: `<2`, `[2, 4)`, `[4, 6)`, `>=6`. `Unclassified`
    /// is only reached by a NaN GHI.
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
    pub enum IrradianceBand {
        BelowTwo,
        TwoToFour,
        FourToSix,
        SixAndAbove,
        Unclassified,
    }

    impl IrradianceBand {
        /// The four bands shown in the chart legend, lowest first.
        pub const LEGEND: [IrradianceBand; 4] = [
            IrradianceBand::BelowTwo,
            IrradianceBand::TwoToFour,
            IrradianceBand::FourToSix,
            IrradianceBand::SixAndAbove,
        ];

        pub fn classify(ghi: f64) -> Self {
            if ghi < 2.0 {
                IrradianceBand::BelowTwo
            } else if (2.0..4.0).contains(&ghi) {
                IrradianceBand::TwoToFour
            } else if (4.0..6.0).contains(&ghi) {
                IrradianceBand::FourToSix
            } else if ghi >= 6.0 {
                IrradianceBand::SixAndAbove
            } else {
                IrradianceBand::Unclassified
            }
        }

        /// Named color of the band's markers.
        pub fn color_name(&self) -> &'static str {
            match self {
                IrradianceBand::BelowTwo => "navy",
                IrradianceBand::TwoToFour => "lightblue",
                IrradianceBand::FourToSix => "orange",
                IrradianceBand::SixAndAbove => "brown",
                IrradianceBand::Unclassified => "gray",
            }
        }

        /// RGB value of [`IrradianceBand::color_name`].
        pub fn rgb(&self) -> (u8, u8, u8) {
            match self {
                IrradianceBand::BelowTwo => (0, 0, 128),
                IrradianceBand::TwoToFour => (173, 216, 230),
                IrradianceBand::FourToSix => (255, 165, 0),
                IrradianceBand::SixAndAbove => (165, 42, 42),
                IrradianceBand::Unclassified => (128, 128, 128),
            }
        }

        /// GHI range as shown in the legend.
        pub fn label(&self) -> &'static str {
            match self {
                IrradianceBand::BelowTwo => "<2",
                IrradianceBand::TwoToFour => "2 - 4",
                IrradianceBand::FourToSix => "4 - 6",
                IrradianceBand::SixAndAbove => ">6",
                IrradianceBand::Unclassified => "n/a",
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::IrradianceBand;

        #[test]
        fn test_band_edges() {
            assert_eq!(IrradianceBand::classify(1.9).color_name(), "navy");
            assert_eq!(IrradianceBand::classify(2.0).color_name(), "lightblue");
            assert_eq!(IrradianceBand::classify(3.99).color_name(), "lightblue");
            assert_eq!(IrradianceBand::classify(4.0).color_name(), "orange");
            assert_eq!(IrradianceBand::classify(5.99).color_name(), "orange");
            assert_eq!(IrradianceBand::classify(6.0).color_name(), "brown");
            assert_eq!(IrradianceBand::classify(-1.0), IrradianceBand::BelowTwo);
            assert_eq!(IrradianceBand::classify(f64::INFINITY), IrradianceBand::SixAndAbove);
        }

        #[test]
        fn test_band_is_total() {
            let mut ghi = -5.0;
            while ghi < 15.0 {
                let band = IrradianceBand::classify(ghi);
                assert!(IrradianceBand::LEGEND.contains(&band), "{} unclassified", ghi);
                ghi += 0.01;
            }
            assert_eq!(IrradianceBand::classify(f64::NAN), IrradianceBand::Unclassified);
        }
    }
}
