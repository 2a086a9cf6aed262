//! File-backed dataset loading with an explicit, injectable cache.
//!
//! Each cached dataset is keyed by its file identity (length + modification
//! time). A lookup re-stats the file; a matching key hands back the cached
//! `Arc`, anything else re-reads the file. Cached values are never mutated,
//! so several viewers can share them without locking.

use crate::error::BwqError;
use crate::forecast::{forecast_from_source, ForecastPoint};
use crate::reading::History;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Directory, next to the executable, that holds both datasets.
pub const DATA_DIR_NAME: &str = "data";

/// Historical sensor readings with Kalman-filtered columns.
pub const HISTORY_FILE_NAME: &str = "df_final.csv";

/// One week of 10-minute chlorophyll forecasts.
pub const FORECAST_FILE_NAME: &str = "future_week_forecast.csv";

/// Locations of the two input datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub history: PathBuf,
    pub forecast: PathBuf,
}

impl DataPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            history: dir.join(HISTORY_FILE_NAME),
            forecast: dir.join(FORECAST_FILE_NAME),
        }
    }

    /// The `data/` directory beside the running executable.
    pub fn beside_executable() -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::in_dir(dir.join(DATA_DIR_NAME)))
    }
}

/// Identity of a source file at the time it was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKey {
    Missing,
    Present {
        len: u64,
        modified: Option<SystemTime>,
    },
}

impl SourceKey {
    pub fn probe(path: &Path) -> SourceKey {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => SourceKey::Present {
                len: meta.len(),
                modified: meta.modified().ok(),
            },
            _ => SourceKey::Missing,
        }
    }
}

#[derive(Debug)]
struct CacheEntry<T> {
    path: PathBuf,
    key: SourceKey,
    value: Arc<T>,
}

/// The forecast as cached: `None` means "no forecast available".
pub type CachedForecast = Option<Vec<ForecastPoint>>;

/// Read-through cache of both datasets, owned by whoever drives render passes.
#[derive(Debug, Default)]
pub struct DatasetCache {
    history: Option<CacheEntry<History>>,
    forecast: Option<CacheEntry<CachedForecast>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop both entries; the next load re-reads the files.
    pub fn clear(&mut self) {
        self.history = None;
        self.forecast = None;
    }
}

fn lookup<T>(
    slot: &mut Option<CacheEntry<T>>,
    path: &Path,
    read: impl FnOnce(SourceKey) -> T,
) -> Arc<T> {
    let key = SourceKey::probe(path);
    if let Some(entry) = slot.as_ref() {
        if entry.path == path && entry.key == key {
            log::debug!("[BWQ] cache: hit for {}", path.display());
            return Arc::clone(&entry.value);
        }
    }
    log::debug!("[BWQ] cache: miss for {}", path.display());
    let value = Arc::new(read(key));
    *slot = Some(CacheEntry {
        path: path.to_path_buf(),
        key,
        value: Arc::clone(&value),
    });
    value
}

fn read_source(path: &Path) -> Result<String, BwqError> {
    std::fs::read_to_string(path).map_err(|source| BwqError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the two datasets from disk through a [`DatasetCache`].
#[derive(Debug)]
pub struct Loader {
    paths: DataPaths,
    cache: DatasetCache,
}

impl Loader {
    pub fn new(paths: DataPaths) -> Self {
        Self::with_cache(paths, DatasetCache::new())
    }

    pub fn with_cache(paths: DataPaths, cache: DatasetCache) -> Self {
        Self { paths, cache }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Hand the cache back, e.g. to reuse it with other paths.
    pub fn into_cache(self) -> DatasetCache {
        self.cache
    }

    /// The historical dataset. Never fails: problems become the notice of
    /// an empty [`History`].
    pub fn load_history(&mut self) -> Arc<History> {
        let path = self.paths.history.clone();
        lookup(&mut self.cache.history, &path, |key| match key {
            SourceKey::Missing => History::not_found(&path),
            SourceKey::Present { .. } => match read_source(&path) {
                Ok(text) => History::from_csv(&text),
                Err(e) => {
                    log::error!("[BWQ] loader: {}", e);
                    History::with_notice(e)
                }
            },
        })
    }

    /// The forecast, or `None` when it is missing or unusable.
    pub fn load_forecast(&mut self) -> Arc<CachedForecast> {
        let path = self.paths.forecast.clone();
        lookup(&mut self.cache.forecast, &path, |key| match key {
            SourceKey::Missing => {
                log::info!("[BWQ] loader: no forecast at {}", path.display());
                None
            }
            SourceKey::Present { .. } => match read_source(&path) {
                Ok(text) => forecast_from_source(Some(&text)),
                Err(e) => {
                    log::warn!("[BWQ] loader: {}", e);
                    None
                }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HISTORY_CSV: &str = "\
Timestamp,Chlorophyll_Kalman,Temperature_Kalman,Dissolved Oxygen_Kalman,Turbidity_Kalman
2024-11-03 00:00:00,2.9,24.4,6.9,11.5
2024-11-03 00:10:00,3.1,24.5,6.8,12.0
";

    const FORECAST_CSV: &str = "\
Timestamp,Forecast_Chlorophyll_Kalman
2024-11-04 00:00:00,3.0
2024-11-04 00:10:00,4.5
";

    fn write_data(dir: &Path) -> DataPaths {
        let paths = DataPaths::in_dir(dir);
        fs::write(&paths.history, HISTORY_CSV).unwrap();
        fs::write(&paths.forecast, FORECAST_CSV).unwrap();
        paths
    }

    #[test]
    fn in_dir_uses_default_file_names() {
        let paths = DataPaths::in_dir("/srv/bwq");
        assert_eq!(paths.history, Path::new("/srv/bwq/df_final.csv"));
        assert_eq!(paths.forecast, Path::new("/srv/bwq/future_week_forecast.csv"));
    }

    #[test]
    fn missing_history_yields_empty_dataset_with_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = Loader::new(DataPaths::in_dir(dir.path()));
        let history = loader.load_history();
        assert!(history.is_empty());
        assert!(history.notice.as_deref().unwrap().contains("not found"));
    }

    #[test]
    fn missing_forecast_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = Loader::new(DataPaths::in_dir(dir.path()));
        assert!(loader.load_forecast().is_none());
    }

    #[test]
    fn loads_both_datasets() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = Loader::new(write_data(dir.path()));
        assert_eq!(loader.load_history().readings.len(), 2);
        let forecast = loader.load_forecast();
        assert_eq!(forecast.as_deref().map(|f| f.len()), Some(2));
    }

    #[test]
    fn repeated_loads_are_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = Loader::new(write_data(dir.path()));
        let first = loader.load_history();
        let second = loader.load_history();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);

        let f1 = loader.load_forecast();
        let f2 = loader.load_forecast();
        assert!(Arc::ptr_eq(&f1, &f2));
    }

    #[test]
    fn changed_file_invalidates_entry() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_data(dir.path());
        let mut loader = Loader::new(paths.clone());
        assert_eq!(loader.load_history().readings.len(), 2);

        let longer = format!("{}2024-11-03 00:20:00,3.3,24.6,6.7,12.1\n", HISTORY_CSV);
        fs::write(&paths.history, longer).unwrap();
        assert_eq!(loader.load_history().readings.len(), 3);
    }

    #[test]
    fn file_appearing_later_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::in_dir(dir.path());
        let mut loader = Loader::new(paths.clone());
        assert!(loader.load_history().notice.is_some());

        fs::write(&paths.history, HISTORY_CSV).unwrap();
        let history = loader.load_history();
        assert!(history.notice.is_none());
        assert_eq!(history.readings.len(), 2);
    }

    #[test]
    fn cache_survives_loader_handoff() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_data(dir.path());
        let mut loader = Loader::new(paths.clone());
        let first = loader.load_history();

        let mut again = Loader::with_cache(paths, loader.into_cache());
        assert!(Arc::ptr_eq(&first, &again.load_history()));
    }

    #[test]
    fn cleared_cache_rereads_with_equal_content() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_data(dir.path());
        let mut loader = Loader::with_cache(paths.clone(), DatasetCache::new());
        let first = loader.load_history();
        let mut cache = loader.into_cache();
        cache.clear();
        let mut loader = Loader::with_cache(paths, cache);
        let second = loader.load_history();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }
}
