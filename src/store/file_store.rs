//! File-backed implementation of the object store.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::{Collection, StoreError, StoreResult};

/// Object store keeping one JSON file per record.
///
/// Uniqueness on `create` is enforced by an exclusive-create open, so two
/// concurrent creators of the same key can never both succeed. `update` is
/// a truncate-and-write of an existing file: two concurrent updates of the
/// same key race and the last writer wins.
///
/// Cloning is cheap; the base directory is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: Arc<PathBuf>,
}

impl FileStore {
    /// Opens a store rooted at `base_dir`, creating the base directory and
    /// one sub-directory per collection when missing.
    pub async fn open(base_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let base_dir = base_dir.into();
        for collection in Collection::ALL {
            fs::create_dir_all(base_dir.join(collection.as_str())).await?;
        }
        tracing::info!(base_dir = %base_dir.display(), "Object store opened");
        Ok(Self {
            base_dir: Arc::new(base_dir),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Stores a new record. Fails with `AlreadyExists` if the key is taken.
    pub async fn create<T>(&self, collection: Collection, id: &str, record: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let path = self.record_path(collection, id)?;
        let bytes = encode(collection, id, record)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists {
                    collection,
                    id: id.to_string(),
                },
                _ => io_error(collection, id, source),
            })?;

        if let Err(source) = write_record(&mut file, &bytes).await {
            drop(file);
            // A half-written file would read back as a corrupt record
            if let Err(cleanup) = fs::remove_file(&path).await {
                tracing::warn!(
                    collection = %collection,
                    id = %id,
                    error = %cleanup,
                    "Failed to remove partially written record"
                );
            }
            return Err(io_error(collection, id, source));
        }

        tracing::debug!(collection = %collection, id = %id, "Record created");
        Ok(())
    }

    /// Loads a record. Fails with `NotFound` when absent and with
    /// `CorruptRecord` when the file is not a JSON object of type `T`.
    pub async fn read<T>(&self, collection: Collection, id: &str) -> StoreResult<T>
    where
        T: DeserializeOwned,
    {
        let path = self.record_path(collection, id)?;
        let contents = fs::read(&path)
            .await
            .map_err(|source| missing_or_io(collection, id, source))?;

        let value: Value = serde_json::from_slice(&contents)
            .map_err(|e| corrupt(collection, id, e.to_string()))?;
        if !value.is_object() {
            return Err(corrupt(collection, id, "content is not a JSON object".to_string()));
        }
        let record = serde_json::from_value(value)
            .map_err(|e| corrupt(collection, id, e.to_string()))?;

        tracing::debug!(collection = %collection, id = %id, "Record read");
        Ok(record)
    }

    /// Replaces the full content of an existing record. Never creates one.
    pub async fn update<T>(&self, collection: Collection, id: &str, record: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let path = self.record_path(collection, id)?;
        let bytes = encode(collection, id, record)?;

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|source| missing_or_io(collection, id, source))?;
        write_record(&mut file, &bytes)
            .await
            .map_err(|source| io_error(collection, id, source))?;

        tracing::debug!(collection = %collection, id = %id, "Record updated");
        Ok(())
    }

    /// Removes a record. Fails with `NotFound` when absent.
    pub async fn delete(&self, collection: Collection, id: &str) -> StoreResult<()> {
        let path = self.record_path(collection, id)?;
        fs::remove_file(&path)
            .await
            .map_err(|source| missing_or_io(collection, id, source))?;

        tracing::debug!(collection = %collection, id = %id, "Record deleted");
        Ok(())
    }

    fn record_path(&self, collection: Collection, id: &str) -> StoreResult<PathBuf> {
        if !is_valid_key(id) {
            return Err(StoreError::InvalidKey {
                collection,
                id: id.to_string(),
            });
        }
        Ok(self
            .base_dir
            .join(collection.as_str())
            .join(format!("{id}.json")))
    }
}

/// Keys become file names, so they must stay inside the collection directory.
fn is_valid_key(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.chars().any(|c| matches!(c, '/' | '\\' | '\0'))
}

fn encode<T>(collection: Collection, id: &str, record: &T) -> StoreResult<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    serde_json::to_vec(record).map_err(|source| StoreError::Serialize {
        collection,
        id: id.to_string(),
        source,
    })
}

async fn write_record(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

fn missing_or_io(collection: Collection, id: &str, source: io::Error) -> StoreError {
    match source.kind() {
        ErrorKind::NotFound => StoreError::NotFound {
            collection,
            id: id.to_string(),
        },
        _ => io_error(collection, id, source),
    }
}

fn io_error(collection: Collection, id: &str, source: io::Error) -> StoreError {
    StoreError::Io {
        collection,
        id: id.to_string(),
        source,
    }
}

fn corrupt(collection: Collection, id: &str, reason: String) -> StoreError {
    StoreError::CorruptRecord {
        collection,
        id: id.to_string(),
        reason,
    }
}
