//! Core types and input loading for solar plant daily performance data.
//!
//! A [`dataset::Dataset`] is the chronologically sorted table of
//! [`performance::DailyPerformance`] rows read from a spreadsheet or CSV.

pub mod dataset;
pub mod error;
pub mod loader;
pub mod performance;

pub use dataset::{ContinuityReport, Dataset};
pub use error::{DataError, Result};
pub use loader::{load_dataset, DEFAULT_INPUT};
pub use performance::DailyPerformance;
