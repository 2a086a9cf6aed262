//! One pass over the datasets: load through the cache, then query.

use bwq_core::reading::History;
use bwq_core::source::Loader;
use bwq_db::Database;
use std::sync::Arc;

pub struct Session {
    pub history: Arc<History>,
    pub db: Database,
}

impl Session {
    pub fn load(loader: &mut Loader) -> anyhow::Result<Self> {
        let paths = loader.paths();
        log::info!(
            "[BWQ] session: loading {} and {}",
            paths.history.display(),
            paths.forecast.display()
        );
        let history = loader.load_history();
        let forecast = loader.load_forecast();
        if let Some(notice) = &history.notice {
            log::warn!("[BWQ] session: {}", notice);
        } else if history.is_empty() {
            log::warn!("[BWQ] session: history has no readings");
        }
        let db = Database::with_datasets(&history.readings, forecast.as_deref())?;
        Ok(Self { history, db })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{empty_session, sample_session};
    use bwq_db::models::ForecastStatus;

    #[test]
    fn load_fills_the_database_from_both_files() {
        let (_dir, session) = sample_session();
        assert!(session.history.notice.is_none());
        assert_eq!(session.db.query_readings().unwrap().len(), 6);
        assert_eq!(session.db.query_forecast_series().unwrap().len(), 4);
    }

    #[test]
    fn load_without_files_keeps_the_notice_and_no_forecast() {
        let (_dir, session) = empty_session();
        assert!(session.history.notice.is_some());
        assert!(session.db.query_readings().unwrap().is_empty());
        assert_eq!(
            session.db.query_forecast_status().unwrap(),
            ForecastStatus::Absent
        );
    }
}
