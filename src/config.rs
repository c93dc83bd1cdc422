use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_MAX_WORKBOOK_MB: u64 = 100;
const DEFAULT_PREVIEW_ROWS: usize = 5;
const APP_DIR: &str = "pe-tracker";
const DB_FILE: &str = "pe_tracker.db";

/// Import limits and storage location.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    pub max_workbook_bytes: u64,
    pub preview_rows: usize,
    pub database_path: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_workbook_bytes: DEFAULT_MAX_WORKBOOK_MB * 1024 * 1024,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            database_path: default_database_path(),
        }
    }
}

fn load_env() {
    let _ = dotenvy::dotenv();
}

impl ImportConfig {
    /// Read `.env` (if any) and `PE_TRACKER_*` variables; bad values fall back to defaults.
    pub fn from_env() -> Self {
        load_env();
        let defaults = Self::default();
        let max_mb = env_parsed("PE_TRACKER_MAX_WORKBOOK_MB").unwrap_or(DEFAULT_MAX_WORKBOOK_MB);
        let preview_rows = env_parsed("PE_TRACKER_PREVIEW_ROWS").unwrap_or(defaults.preview_rows);
        let database_path = std::env::var("PE_TRACKER_DB")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);
        Self {
            max_workbook_bytes: max_mb.saturating_mul(1024 * 1024),
            preview_rows,
            database_path,
        }
    }
}

fn env_parsed<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "invalid configuration value, using default");
            None
        }
    }
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DB_FILE))
}
