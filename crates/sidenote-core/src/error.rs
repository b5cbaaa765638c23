//! Storage error handling
//!
//! Provides typed errors for store operations. Validation failures and
//! missing entries get their own variants; filesystem failures carry the
//! offending path. Storage operations never retry internally; every failure
//! propagates to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required argument was missing or empty
    #[error("{0}")]
    InvalidArgument(String),

    /// One or more referenced entry IDs do not exist
    #[error("entry not found: {}", .ids.join(", "))]
    NotFound { ids: Vec<String> },

    /// An entry record file exists but could not be parsed
    #[error("Malformed entry record at '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create a storage directory
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read a file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to delete a file
    #[error("Failed to delete '{path}': {source}")]
    DeleteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Build a `NotFound` error naming one missing entry ID
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            ids: vec![id.into()],
        }
    }

    /// Check whether this error is a missing-entry failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_all_ids() {
        let err = StoreError::NotFound {
            ids: vec!["entry_00003".to_string(), "entry_00009".to_string()],
        };

        let msg = err.to_string();
        assert!(msg.contains("entry not found"));
        assert!(msg.contains("entry_00003"));
        assert!(msg.contains("entry_00009"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = StoreError::InvalidArgument("entries must contain at least one item".to_string());
        assert_eq!(err.to_string(), "entries must contain at least one item");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_write_error_includes_path() {
        let err = StoreError::WriteError {
            path: PathBuf::from("/store/entries/entry_00001.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let msg = err.to_string();
        assert!(msg.contains("Failed to write"));
        assert!(msg.contains("entry_00001.json"));
    }
}
