use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, warn};

use crate::StorageResult;

/// Ensures the collection file and its parent directory exist
pub async fn ensure_collection(path: &Path) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            debug!("Creating data directory: {:?}", parent);
            fs::create_dir_all(parent).await?;
        }
    }

    if !path.exists() {
        debug!("Creating collection file: {:?}", path);
        fs::write(path, "[]").await?;
    }

    Ok(())
}

/// Reads a whole collection from disk, in insertion order
///
/// A missing or unreadable file yields an empty collection rather than an
/// error; a corrupt file is logged and treated the same way.
pub async fn read_collection<T: DeserializeOwned>(path: &Path) -> StorageResult<Vec<T>> {
    ensure_collection(path).await?;

    debug!("Reading collection from: {:?}", path);

    match fs::read_to_string(path).await {
        Ok(content) => match serde_json::from_str::<Vec<T>>(&content) {
            Ok(records) => {
                debug!("Loaded {} records from {:?}", records.len(), path);
                Ok(records)
            }
            Err(e) => {
                error!("Failed to parse {:?}: {}", path, e);
                warn!("Treating collection as empty");
                Ok(Vec::new())
            }
        },
        Err(e) => {
            error!("Failed to read {:?}: {}", path, e);
            warn!("Treating collection as empty");
            Ok(Vec::new())
        }
    }
}

/// Writes a whole collection to disk
///
/// The file is rewritten in full on every mutation. Concurrent writers
/// racing on the same file is an accepted limitation of this store: last
/// write wins, with no locking.
pub async fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> StorageResult<()> {
    ensure_collection(path).await?;

    debug!("Writing collection to: {:?}", path);

    let json_content = serde_json::to_string_pretty(records)?;
    fs::write(path, json_content).await?;

    debug!("Wrote {} records to {:?}", records.len(), path);
    Ok(())
}
