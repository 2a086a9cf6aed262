//! Where the datasets live and how the outputs are shaped.

use bwq_core::source::DataPaths;
use bwq_data::frames::DEFAULT_FRAME_STEP;
use bwq_db::{RECENT_DAYS, RECENT_LIMIT};
use clap::Args;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Data location options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Directory holding df_final.csv and future_week_forecast.csv
    /// [default: data/ beside the executable]
    #[arg(short = 'd', long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Historical readings CSV (overrides the file in --data-dir)
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,

    /// Forecast CSV (overrides the file in --data-dir)
    #[arg(long, global = true)]
    pub forecast_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub paths: DataPaths,
    pub frame_step: NonZeroUsize,
    pub recent_days: u32,
    pub recent_limit: usize,
}

impl DashboardConfig {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            frame_step: DEFAULT_FRAME_STEP,
            recent_days: RECENT_DAYS,
            recent_limit: RECENT_LIMIT,
        }
    }

    pub fn from_args(args: &DataArgs) -> anyhow::Result<Self> {
        let mut paths = match &args.data_dir {
            Some(dir) => DataPaths::in_dir(dir),
            None => DataPaths::beside_executable()?,
        };
        if let Some(history) = &args.history_file {
            paths.history = history.clone();
        }
        if let Some(forecast) = &args.forecast_file {
            paths.forecast = forecast.clone();
        }
        log::debug!(
            "[BWQ] config: history={} forecast={}",
            paths.history.display(),
            paths.forecast.display()
        );
        Ok(Self::new(paths))
    }
}
