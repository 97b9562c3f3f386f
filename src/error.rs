//! Error types for teamdesk
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad config, validation failure, unknown record)
//! - 3: Not logged in or bad credentials
//! - 4: Operation failed (I/O, serialization, lock, persistence)

use std::path::PathBuf;
use thiserror::Error;

use crate::model::RecordKind;
use crate::validate::ValidationError;

/// Exit codes for the teamdesk CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const UNAUTHORIZED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for teamdesk operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: u64 },

    // Auth (exit code 3)
    #[error("Login required")]
    Unauthorized,

    #[error("Invalid Credentials. Please try again.")]
    InvalidCredentials,

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Failed to persist {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::Validation(_)
            | Error::NotFound { .. } => exit_codes::USER_ERROR,

            Error::Unauthorized | Error::InvalidCredentials => exit_codes::UNAUTHORIZED,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_)
            | Error::Persistence { .. } => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output, when the error carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::NotFound { kind, id } => Some(serde_json::json!({
                "kind": kind.as_str(),
                "id": id,
            })),
            Error::Persistence { path, .. } | Error::LockFailed(path) => {
                Some(serde_json::json!({ "path": path }))
            }
            _ => None,
        }
    }
}

/// Result type alias for teamdesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
