use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::session::selection::SelectionKind;

/// Failures raised by a [`CookieStore`](crate::cookies::store::CookieStore).
///
/// Store errors are surfaced to the operator verbatim; nothing retries them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database file '{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("Database is locked (is the browser still running?)")]
    Locked,
    #[error("Database error: {message}")]
    Database { message: String },
}

impl StoreError {
    pub fn database(message: impl Into<String>) -> Self {
        StoreError::Database {
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ffi::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ffi::ErrorCode::DatabaseLocked =>
            {
                StoreError::Locked
            }
            _ => StoreError::Database {
                message: err.to_string(),
            },
        }
    }
}

/// Every error a session command can report.
#[derive(Debug, Error)]
pub enum CrumbError {
    #[error("No selection. Try 'sca' first.")]
    NoSelection,
    #[error("Index '{0}' is out of range")]
    InvalidReference(String),
    #[error("'{command}' does not work on a {kind} selection")]
    WrongSelectionKind {
        command: &'static str,
        kind: SelectionKind,
    },
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to access '{}': {source}", path.display())]
    ListFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to load '{}', invalid JSON: {source}", path.display())]
    ListFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CrumbError {
    pub fn usage(message: impl Into<String>) -> Self {
        CrumbError::Usage(message.into())
    }

    pub fn missing_arg(name: &str) -> Self {
        CrumbError::Usage(format!("Missing argument: '{name}'"))
    }

    pub fn invalid_reference(spec: impl ToString) -> Self {
        CrumbError::InvalidReference(spec.to_string())
    }

    /// Fatal errors stop the remainder of a batch; everything else is
    /// reported and the next statement runs.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CrumbError::Store(_) | CrumbError::ListFile { .. } | CrumbError::ListFormat { .. }
        )
    }
}
