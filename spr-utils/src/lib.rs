//! Shared utility functions for SPR crates.

/// Date utility functions
pub mod dates {
    use chrono::{NaiveDate, NaiveDateTime};

    /// Text layouts accepted for a plain calendar date, tried in order.
    pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

    /// Text layouts accepted for a date with a time of day, tried in order.
    pub const DATETIME_FORMATS: [&str; 3] =
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Format a NaiveDate as "YYYY-MM", used for chart titles
    pub fn format_year_month(date: &NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }

    /// Format a NaiveDate as abbreviated month and two-digit year, e.g. "Jul/19"
    pub fn format_month_year(date: &NaiveDate) -> String {
        date.format("%b/%y").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse a date written in any of the accepted layouts.
    ///
    /// Datetime text is accepted too; the time of day is dropped.
    pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    /// Whole days from `start` to `date`; negative if `date` is earlier.
    pub fn days_since(start: &NaiveDate, date: &NaiveDate) -> i64 {
        (*date - *start).num_days()
    }

}
