use std::path::PathBuf;
use thiserror::Error;

/// Workbook-level failures. Per-field and per-row misses never reach this type.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("File too large ({size} bytes, max {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("Could not open Excel file: {0}")]
    Unreadable(String),

    #[error("Workbook is empty or has no sheets")]
    Empty,
}

impl ImportError {
    /// True when the bytes themselves could not be decoded, as opposed to a decodable but empty workbook.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, ImportError::Unreadable(_) | ImportError::Io(_) | ImportError::NotFound(_))
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Database lock poisoned")]
    Poisoned,
}
