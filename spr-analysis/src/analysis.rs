use crate::budget::BudgetPolicy;
use crate::irradiance::IrradianceBand;
use crate::rolling::moving_average;
use crate::summary::Summary;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use spr_data::Dataset;
use std::collections::HashMap;

/// Rows in the PR trend line window.
pub const MOVING_AVERAGE_WINDOW: usize = 30;

/// A measured day together with its derived values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalyzedDay {
    pub date: NaiveDate,
    pub pr: f64,
    pub ghi: f64,
    pub budget_pr: f64,
    /// `None` until a full window of rows is available
    pub moving_average_pr: Option<f64>,
    pub band: IrradianceBand,
}

impl AnalyzedDay {
    pub fn is_above_budget(&self) -> bool {
        self.pr > self.budget_pr
    }
}

/// The loaded table with its derived columns, in date order.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    days: Vec<AnalyzedDay>,
}

/// Derive Budget PR, moving average and band for every row.
///
/// The dataset's first date is the fixed epoch for budget ageing. Row order
/// and measured values are carried over unchanged.
pub fn analyze(dataset: &Dataset, policy: &BudgetPolicy) -> Analysis {
    let start = dataset.start_date();
    let averages = moving_average(&dataset.pr_values(), MOVING_AVERAGE_WINDOW);

    let days: Vec<AnalyzedDay> = dataset
        .days()
        .iter()
        .zip(averages)
        .map(|(day, moving_average_pr)| AnalyzedDay {
            date: day.date,
            pr: day.pr,
            ghi: day.ghi,
            budget_pr: policy.budget_pr(&start, &day.date),
            moving_average_pr,
            band: IrradianceBand::classify(day.ghi),
        })
        .collect();

    let analysis = Analysis { days };
    debug!("band counts: {:?}", analysis.band_counts());
    analysis
}

impl Analysis {
    pub fn days(&self) -> &[AnalyzedDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|day| day.date)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|day| day.date)
    }

    pub fn pr_values(&self) -> Vec<f64> {
        self.days.iter().map(|day| day.pr).collect()
    }

    /// Number of days in each irradiation band.
    pub fn band_counts(&self) -> HashMap<IrradianceBand, usize> {
        let mut counts: HashMap<IrradianceBand, usize> = HashMap::new();
        for day in &self.days {
            *counts.entry(day.band).or_default() += 1;
        }
        counts
    }

    pub fn summary(&self) -> Summary {
        Summary::from_analysis(self)
    }
}
