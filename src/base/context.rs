//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO and JSON errors into path-carrying `CrumbError` variants.

use crate::base::error::CrumbError;
use std::io;
use std::path::Path;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Attach the list file path to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use crumbs::base::context::IoResultExt;
    ///
    /// let body = std::fs::read_to_string(path).list_context(path)?;
    /// // Error: "Failed to access './blacklist.json': permission denied"
    /// ```
    fn list_context(self, path: &Path) -> Result<T, CrumbError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn list_context(self, path: &Path) -> Result<T, CrumbError> {
        self.map_err(|source| CrumbError::ListFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Extension trait for adding context to JSON Results.
pub trait JsonResultExt<T> {
    fn format_context(self, path: &Path) -> Result<T, CrumbError>;
}

impl<T> JsonResultExt<T> for Result<T, serde_json::Error> {
    fn format_context(self, path: &Path) -> Result<T, CrumbError> {
        self.map_err(|source| CrumbError::ListFormat {
            path: path.to_path_buf(),
            source,
        })
    }
}
