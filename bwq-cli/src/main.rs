//! BWQ CLI - Command line tool for the Brisbane River water-quality datasets.

use bwq_cmd::config::{DashboardConfig, DataArgs};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bwq-cli",
    version,
    about = "Brisbane River water-quality dashboard toolkit"
)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    #[command(subcommand)]
    command: bwq_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = DashboardConfig::from_args(&cli.data)?;
    log::debug!("Running {:?}", cli.command);
    bwq_cmd::run(&config, cli.command)
}
