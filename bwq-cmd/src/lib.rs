//! Command implementations for the BWQ CLI.
//!
//! Every subcommand runs one pass over the two datasets: load them through
//! the file cache, put them in the in-memory database, query, print.

use bwq_core::export::EXPORT_FILE_NAME;
use bwq_core::source::Loader;
use clap::Subcommand;
use std::num::NonZeroUsize;
use std::path::PathBuf;

pub mod config;
pub mod export;
pub mod forecast;
pub mod session;
pub mod status;
#[cfg(test)]
mod test_support;

use config::DashboardConfig;
use session::Session;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show current river conditions and the weekly forecast outlook
    Status,

    /// List the dates covered by the forecast
    Dates,

    /// Summarize the forecast for one day
    Day {
        /// Day to summarize (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },

    /// Print the forecast chart's animation frames as JSON
    Frames {
        /// Points revealed per frame [default: 3]
        #[arg(short, long)]
        step: Option<NonZeroUsize>,
    },

    /// Show the most recent raw readings
    Recent {
        /// Days before the latest reading to include [default: 2]
        #[arg(long)]
        days: Option<u32>,

        /// Maximum number of rows [default: 300]
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Write the full historical dataset as CSV
    Export {
        /// Output path [default: brisbane_water_all.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(config: &DashboardConfig, command: Command) -> anyhow::Result<()> {
    let mut loader = Loader::new(config.paths.clone());
    let session = Session::load(&mut loader)?;

    match command {
        Command::Status => status::run_status(&session),
        Command::Dates => forecast::run_dates(&session),
        Command::Day { date } => forecast::run_day(&session, &date),
        Command::Frames { step } => {
            forecast::run_frames(&session, step.unwrap_or(config.frame_step))
        }
        Command::Recent { days, limit } => export::run_recent(
            &session,
            days.unwrap_or(config.recent_days),
            limit.unwrap_or(config.recent_limit),
        ),
        Command::Export { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
            let written = export::run_export(&session, &output)?;
            println!("Wrote {} bytes to {}", written, output.display());
            Ok(())
        }
    }
}
