//! Sample datasets on disk for command tests.

use crate::config::DashboardConfig;
use crate::session::Session;
use bwq_core::source::{DataPaths, Loader};
use tempfile::TempDir;

pub const HISTORY_CSV: &str = "\
Timestamp,Chlorophyll_Kalman,Temperature_Kalman,Dissolved Oxygen_Kalman,Turbidity_Kalman
2024-11-01 12:00:00,2.0,23.9,7.1,10.0
2024-11-02 08:00:00,3.5,24.0,7.0,10.5
2024-11-03 00:00:00,4.2,24.4,6.9,11.5
2024-11-03 06:00:00,6.8,24.8,6.6,12.0
2024-11-03 12:00:00,5.5,,6.4,
2024-11-03 18:00:00,,25.1,,
";

pub const FORECAST_CSV: &str = "\
Timestamp,Forecast_Chlorophyll_Kalman
2024-11-04 00:00:00,3.0
2024-11-04 06:00:00,9.0
2024-11-04 12:00:00,
2024-11-05 00:00:00,9.0
2024-11-05 06:00:00,5.0
2024-11-06 00:00:00,
";

fn session_in(dir: &TempDir) -> Session {
    let config = DashboardConfig::new(DataPaths::in_dir(dir.path()));
    Session::load(&mut Loader::new(config.paths)).unwrap()
}

/// Both files present. The directory must outlive the session's use.
pub fn sample_session() -> (TempDir, Session) {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::in_dir(dir.path());
    std::fs::write(&paths.history, HISTORY_CSV).unwrap();
    std::fs::write(&paths.forecast, FORECAST_CSV).unwrap();
    let session = session_in(&dir);
    (dir, session)
}

/// Neither file present.
pub fn empty_session() -> (TempDir, Session) {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(&dir);
    (dir, session)
}
