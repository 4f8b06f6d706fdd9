//! Command implementations for SPR CLI.
//!
//! Every command loads the daily table, derives the budget, trend and band
//! columns, then either renders the chart, prints the summary figures or
//! exports the augmented table.

use anyhow::Context;
use clap::{Args, Subcommand};
use spr_analysis::{analyze, budget::BudgetPolicy, Analysis};
use spr_chart::DEFAULT_OUTPUT;
use spr_data::DEFAULT_INPUT;
use std::path::{Path, PathBuf};

pub mod export;
pub mod plot;
pub mod summary;
pub mod viewer;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Render the annotated PR evolution chart (default)
    Plot(PlotArgs),

    /// Print the budget comparison and recent average PR
    Summary {
        /// Spreadsheet or CSV with Date, PR and GHI columns
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,
    },

    /// Write the table with its derived columns as CSV
    Export {
        /// Spreadsheet or CSV with Date, PR and GHI columns
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output path for the augmented CSV
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PlotArgs {
    /// Spreadsheet or CSV with Date, PR and GHI columns
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output path for the PNG chart
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output resolution in dots per inch
    #[arg(long, default_value_t = 300)]
    pub dpi: u32,

    /// Open the chart in the system image viewer once written
    #[arg(long)]
    pub show: bool,
}

impl Default for PlotArgs {
    fn default() -> Self {
        PlotArgs {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            dpi: 300,
            show: false,
        }
    }
}

/// Run a command; no command means `plot` with its defaults.
pub fn run(command: Option<Command>) -> anyhow::Result<()> {
    match command.unwrap_or_else(|| Command::Plot(PlotArgs::default())) {
        Command::Plot(args) => plot::run_plot(&args),
        Command::Summary { input } => summary::run_summary(&input),
        Command::Export { input, output } => export::run_export(&input, &output),
    }
}

/// Load a table and derive its columns with the default budget policy.
pub fn load_analysis(input: &Path) -> anyhow::Result<Analysis> {
    let dataset = spr_data::load_dataset(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    Ok(analyze(&dataset, &BudgetPolicy::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Option<Command>,
    }

    #[test]
    fn test_no_arguments_means_default_plot() {
        let cli = TestCli::try_parse_from(["spr-cli"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_plot_defaults() {
        let cli = TestCli::try_parse_from(["spr-cli", "plot"]).unwrap();
        assert_eq!(cli.command, Some(Command::Plot(PlotArgs::default())));
    }

    #[test]
    fn test_plot_overrides() {
        let cli = TestCli::try_parse_from([
            "spr-cli", "plot", "-i", "daily.csv", "-o", "out/chart.png", "--dpi", "96", "--show",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Plot(PlotArgs {
                input: PathBuf::from("daily.csv"),
                output: PathBuf::from("out/chart.png"),
                dpi: 96,
                show: true,
            }))
        );
    }

    #[test]
    fn test_export_requires_output() {
        assert!(TestCli::try_parse_from(["spr-cli", "export"]).is_err());
        let cli = TestCli::try_parse_from(["spr-cli", "export", "-o", "augmented.csv"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Export {
                input: PathBuf::from(DEFAULT_INPUT),
                output: PathBuf::from("augmented.csv"),
            })
        );
    }

    #[test]
    fn test_load_analysis_missing_file() {
        let err = load_analysis(Path::new("missing/input.csv")).unwrap_err();
        assert!(err.to_string().contains("missing/input.csv"));
    }
}
