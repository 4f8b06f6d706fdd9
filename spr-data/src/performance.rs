use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Header of the date column in the input table.
pub const DATE_COLUMN: &str = "Date";

/// Header of the Performance Ratio column in the input table.
pub const PR_COLUMN: &str = "PR";

/// Header of the Global Horizontal Irradiation column in the input table.
pub const GHI_COLUMN: &str = "GHI";

/// One day of measured plant performance.
///
/// - `pr`: Performance Ratio, in percent
/// - `ghi`: Global Horizontal Irradiation, in kWh/m²
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPerformance {
    pub date: NaiveDate,
    pub pr: f64,
    pub ghi: f64,
}

impl DailyPerformance {
    pub fn new(date: NaiveDate, pr: f64, ghi: f64) -> Self {
        DailyPerformance { date, pr, ghi }
    }
}
