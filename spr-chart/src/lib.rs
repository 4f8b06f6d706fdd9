//! Annotated PR evolution chart.
//!
//! Daily PR is drawn as diamonds colored by irradiation band, with the
//! stepped budget line, the 30-day moving average, two legends and text
//! annotations for the budget comparison and recent averages.

pub mod error;
pub mod layout;
mod render;

pub use error::{ChartError, Result};
pub use layout::{ChartConfig, DEFAULT_OUTPUT};
pub use render::{draw_figure, render_chart};
