//! Figure geometry and text, kept free of drawing so it can be tested
//! without a font backend.

use crate::error::{ChartError, Result};
use chrono::{Duration, NaiveDate};
use plotters::style::RGBColor;
use spr_analysis::Summary;
use spr_utils::dates::format_year_month;
use std::ops::Range;

/// Default output image name.
pub const DEFAULT_OUTPUT: &str = "plot.png";

/// Approximate number of x-axis intervals.
pub const X_TICK_DIVISIONS: usize = 11;

/// Upper bound of the y-axis unless the data goes higher.
pub const Y_AXIS_MAX: f64 = 100.0;

/// Points per inch; font sizes and line widths are given in points.
const POINTS_PER_INCH: f64 = 72.0;

pub const BUDGET_COLOR: RGBColor = RGBColor(0, 100, 0);
pub const TREND_COLOR: RGBColor = RGBColor(255, 0, 0);
pub const TEXT_COLOR: RGBColor = RGBColor(0, 0, 0);

pub const BUDGET_LABEL: &str = "Target Budget Yield PR";
pub const TREND_LABEL: &str = "30-d Moving Average of PR";
pub const BAND_LEGEND_TITLE: &str = "Daily Irradiation(kWh/m2)";
pub const Y_AXIS_LABEL: &str = "Performance Ratio (PR)";

/// Size and resolution of the output figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width_in: 12.0,
            height_in: 6.0,
            dpi: 300,
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 || self.width_in <= 0.0 || self.height_in <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "{}x{} in at {} dpi",
                self.width_in, self.height_in, self.dpi
            )));
        }
        Ok(())
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Pixels per typographic point.
    pub fn scale(&self) -> f64 {
        f64::from(self.dpi) / POINTS_PER_INCH
    }

    /// A length in points, in (fractional) pixels.
    pub fn pt(&self, points: f64) -> f64 {
        points * self.scale()
    }

    /// A length in points, in whole pixels, never below one.
    pub fn px(&self, points: f64) -> u32 {
        (self.pt(points).round() as u32).max(1)
    }
}

/// Every `len / 11`-th date, starting with the first.
pub fn x_tick_dates(dates: &[NaiveDate]) -> Vec<NaiveDate> {
    let step = (dates.len() / X_TICK_DIVISIONS).max(1);
    dates.iter().step_by(step).copied().collect()
}

/// Highest labelled y value.
pub const Y_TICK_MAX: f64 = 90.0;

/// Spacing of the labelled y values.
pub const Y_TICK_STEP: f64 = 10.0;

/// Number of y labels to request so the mesh lands on a step of 10.
pub fn y_label_count(y_max: f64) -> usize {
    (y_max / Y_TICK_STEP).ceil() as usize + 1
}

/// Label for a y key point; values above 90 stay unlabelled.
pub fn y_tick_label(value: f64) -> String {
    if value > Y_TICK_MAX + 1e-6 {
        String::new()
    } else {
        format!("{:.0}", value)
    }
}

/// Date span of the x-axis, padded so edge markers are not clipped.
pub fn x_range(start: NaiveDate, end: NaiveDate) -> Range<NaiveDate> {
    let pad = Duration::days(((end - start).num_days() / 50).max(1));
    (start - pad)..(end + pad)
}

pub fn y_range(max_pr: f64) -> Range<f64> {
    0.0..Y_AXIS_MAX.max(max_pr * 1.05)
}

pub fn title_lines(start: &NaiveDate, end: &NaiveDate) -> [String; 2] {
    [
        "Performance Evolution Ratio".to_string(),
        format!(
            "From {} to {}",
            format_year_month(start),
            format_year_month(end)
        ),
    ]
}

/// Pixel position of a point given as a fraction of the plotting area,
/// measured from its lower left corner.
pub fn axes_to_pixel(area: &(Range<i32>, Range<i32>), fx: f64, fy: f64) -> (i32, i32) {
    let (xs, ys) = area;
    let width = f64::from(xs.end - xs.start);
    let height = f64::from(ys.end - ys.start);
    (
        xs.start + (fx * width).round() as i32,
        ys.end - (fy * height).round() as i32,
    )
}

/// Horizontal anchoring of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A line of text placed relative to the plotting area.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    /// Fraction of the plotting area, from the lower left corner
    pub position: (f64, f64),
    pub align: Align,
    pub bold: bool,
    pub color: RGBColor,
}

impl Annotation {
    fn centered(text: impl Into<String>, y: f64, color: RGBColor) -> Self {
        Annotation {
            text: text.into(),
            position: (0.5, y),
            align: Align::Center,
            bold: true,
            color,
        }
    }
}

/// Horizontal pixel offsets to draw a line of text at. The bitmap font
/// lookup often has no bold face, so bold text is overstruck.
pub fn stroke_offsets(bold: bool, config: &ChartConfig) -> Vec<i32> {
    if bold {
        (0..=config.px(0.4) as i32).collect()
    } else {
        vec![0]
    }
}

/// Series captions, the budget comparison and the recent averages.
pub fn annotations(summary: &Summary) -> Vec<Annotation> {
    let mut notes = vec![
        Annotation::centered("Target Budget Yield Performance Ratio", 0.55, BUDGET_COLOR),
        Annotation::centered("30-d Moving Average of Performance Ratio", 0.50, TREND_COLOR),
        Annotation::centered(summary.comparison.to_string(), 0.45, TEXT_COLOR),
    ];
    notes.extend(summary.trailing.iter().enumerate().map(|(i, average)| Annotation {
        text: average.to_string(),
        position: (0.995, 0.25 - 0.04 * i as f64),
        align: Align::Right,
        bold: false,
        color: TEXT_COLOR,
    }));
    notes
}
