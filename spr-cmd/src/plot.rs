//! Chart rendering command.

use crate::{load_analysis, viewer, PlotArgs};
use anyhow::Context;
use log::{info, warn};
use spr_chart::{render_chart, ChartConfig};

/// Load the table, render the chart and optionally show it.
pub fn run_plot(args: &PlotArgs) -> anyhow::Result<()> {
    let analysis = load_analysis(&args.input)?;
    info!("{}", analysis.summary().comparison);

    let config = ChartConfig {
        dpi: args.dpi,
        ..ChartConfig::default()
    };
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    render_chart(&analysis, &config, &args.output)
        .with_context(|| format!("Failed to render chart to {}", args.output.display()))?;

    if args.show {
        if let Err(e) = viewer::open(&args.output) {
            warn!("Could not open {} in a viewer: {}", args.output.display(), e);
        }
    }
    Ok(())
}
