// ABOUTME: Flat file-per-collection JSON storage for CSMS records
// ABOUTME: Reads collections in full and rewrites them in full on mutation

use thiserror::Error;

pub mod files;
pub mod store;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found")]
    NotFound,
}

pub type StorageResult<T> = Result<T, StorageError>;

pub use files::{ensure_collection, read_collection, write_collection};
pub use store::RecordStore;

/// Generate a unique record ID
pub fn generate_record_id() -> String {
    use uuid::Uuid;
    Uuid::new_v4().to_string()
}
