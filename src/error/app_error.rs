use thiserror::Error;

use crate::store::StoreError;

/// Application-wide error type for the request path.
///
/// Every variant carries what the client is allowed to see. Sources of
/// internal failures are kept for logging and never serialized.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or malformed
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        /// Names of the offending fields, for logs
        fields: Vec<String>,
    },

    /// Creating a record whose key is already taken
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Plain read of a record that does not exist
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Client error that is not a validation failure, e.g. mutating a
    /// missing record or a credential mismatch
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Method outside the resource's accepted set
    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },

    /// Operation exposed on the surface without a defined contract
    #[error("Not implemented: {operation}")]
    NotImplemented { operation: String },

    /// Hashing, filesystem or stored-data failure
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>, fields: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Wraps a store failure that the caller has no specific mapping for.
    ///
    /// A key the store refuses to turn into a file name is the client's
    /// fault and maps to a bad request; everything else is internal.
    pub fn storage(message: impl Into<String>, source: StoreError) -> Self {
        match source {
            StoreError::InvalidKey { .. } => Self::bad_request("Invalid record identifier"),
            other => Self::internal(message, other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        AppError::Validation {
            message: "Missing required fields".to_string(),
            fields,
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
