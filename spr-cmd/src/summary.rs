//! Print the figures quoted in the chart annotations.

use crate::load_analysis;
use log::info;
use spr_utils::dates::format_date;
use std::path::Path;

pub fn run_summary(input: &Path) -> anyhow::Result<()> {
    let analysis = load_analysis(input)?;
    if let (Some(start), Some(end)) = (analysis.start_date(), analysis.end_date()) {
        info!(
            "{} days from {} to {}",
            analysis.len(),
            format_date(&start),
            format_date(&end)
        );
    }
    for line in analysis.summary().lines() {
        println!("{}", line);
    }
    Ok(())
}
