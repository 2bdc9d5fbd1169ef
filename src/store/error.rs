//! Store error types

use thiserror::Error;

use super::Collection;

/// Failures reported by the object store.
///
/// Each variant names the record it concerns so callers can log it
/// without threading the key through separately.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `create` found a record already stored under the key
    #[error("Record {collection}/{id} already exists")]
    AlreadyExists { collection: Collection, id: String },

    /// No record is stored under the key
    #[error("Record {collection}/{id} not found")]
    NotFound { collection: Collection, id: String },

    /// The stored content is not a JSON object of the expected shape
    #[error("Record {collection}/{id} is corrupt: {reason}")]
    CorruptRecord {
        collection: Collection,
        id: String,
        reason: String,
    },

    /// The identifier cannot be used as a file name inside the collection
    #[error("Invalid record identifier '{id}' for {collection}")]
    InvalidKey { collection: Collection, id: String },

    /// Serializing the record failed before anything touched the disk
    #[error("Failed to serialize record {collection}/{id}")]
    Serialize {
        collection: Collection,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Any other filesystem failure
    #[error("I/O error on record {collection}/{id}")]
    Io {
        collection: Collection,
        id: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
