use crate::error::{DataError, Result};
use crate::performance::DailyPerformance;
use chrono::NaiveDate;
use log::{info, warn};
use spr_utils::dates::{days_since, format_date};

/// Calendar continuity of a chronologically sorted series.
///
/// Window statistics are computed over rows, not calendar days, so a
/// series with gaps or repeated dates still averages the last `n` rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContinuityReport {
    /// Rows sharing a date with the previous row
    pub duplicate_dates: usize,
    /// Calendar days absent between the first and last date
    pub missing_days: i64,
}

impl ContinuityReport {
    fn from_sorted(days: &[DailyPerformance]) -> Self {
        let mut report = ContinuityReport::default();
        for window in days.windows(2) {
            match days_since(&window[0].date, &window[1].date) {
                0 => report.duplicate_dates += 1,
                1 => {}
                gap => report.missing_days += gap - 1,
            }
        }
        report
    }

    pub fn is_contiguous(&self) -> bool {
        self.duplicate_dates == 0 && self.missing_days == 0
    }
}

/// A non-empty, date-sorted table of daily performance rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    days: Vec<DailyPerformance>,
    continuity: ContinuityReport,
}

impl Dataset {
    /// Build a dataset, sorting rows chronologically.
    ///
    /// Rows with equal dates keep their input order.
    pub fn new(mut days: Vec<DailyPerformance>) -> Result<Self> {
        if days.is_empty() {
            return Err(DataError::Empty);
        }
        days.sort_by_key(|day| day.date);
        let continuity = ContinuityReport::from_sorted(&days);

        let dataset = Dataset { days, continuity };
        info!(
            "Loaded {} daily rows from {} to {}",
            dataset.len(),
            format_date(&dataset.start_date()),
            format_date(&dataset.end_date())
        );
        if continuity.duplicate_dates > 0 {
            warn!(
                "{} rows repeat the date of the previous row; windows are row based",
                continuity.duplicate_dates
            );
        }
        if continuity.missing_days > 0 {
            warn!(
                "{} calendar days are missing from the series; windows are row based",
                continuity.missing_days
            );
        }
        Ok(dataset)
    }

    pub fn days(&self) -> &[DailyPerformance] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Earliest date in the series, the epoch for budget ageing.
    pub fn start_date(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.days[self.days.len() - 1].date
    }

    pub fn pr_values(&self) -> Vec<f64> {
        self.days.iter().map(|day| day.pr).collect()
    }

    pub fn continuity(&self) -> ContinuityReport {
        self.continuity
    }
}
