//! SPR CLI - Chart daily solar plant performance ratio against its budget.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "spr-cli",
    version,
    about = "Solar plant performance ratio toolkit"
)]
struct Cli {
    /// Defaults to `plot` with default paths
    #[command(subcommand)]
    command: Option<spr_cmd::Command>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::debug!("command: {:?}", cli.command);
    spr_cmd::run(cli.command)
}
