//! Augmented table export.
//!
//! Output columns: `Date,PR,GHI,Budget PR,30-d MA PR,Color`. The moving
//! average cell is empty for rows before the first full window.

use crate::load_analysis;
use anyhow::Context;
use log::info;
use serde::Serialize;
use spr_analysis::Analysis;
use spr_utils::dates::format_date;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ExportRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "PR")]
    pr: f64,
    #[serde(rename = "GHI")]
    ghi: f64,
    #[serde(rename = "Budget PR")]
    budget_pr: f64,
    #[serde(rename = "30-d MA PR")]
    moving_average_pr: Option<f64>,
    #[serde(rename = "Color")]
    color: &'static str,
}

pub fn run_export(input: &Path, output: &Path) -> anyhow::Result<()> {
    let analysis = load_analysis(input)?;
    let file = std::fs::File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_export(&analysis, file)?;
    info!("Exported {} rows to {}", analysis.len(), output.display());
    Ok(())
}

/// Write the analysis as CSV with a header row.
pub fn write_export<W: Write>(analysis: &Analysis, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for day in analysis.days() {
        wtr.serialize(ExportRow {
            date: format_date(&day.date),
            pr: day.pr,
            ghi: day.ghi,
            budget_pr: day.budget_pr,
            moving_average_pr: day.moving_average_pr,
            color: day.band.color_name(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("daily.csv");
        std::fs::write(
            &input,
            "Date,PR,GHI\n2020-01-02,80,1.5\n2020-01-01,70,6\n",
        )
        .unwrap();
        let output = dir.path().join("augmented.csv");
        run_export(&input, &output).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "Date,PR,GHI,Budget PR,30-d MA PR,Color");
        assert_eq!(lines[1], "2020-01-01,70.0,6.0,73.9,,brown");
        assert_eq!(lines[2], "2020-01-02,80.0,1.5,73.9,,navy");
        assert_eq!(lines.len(), 3);
    }
}
