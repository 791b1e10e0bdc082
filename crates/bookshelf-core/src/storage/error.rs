//! Storage error handling
//!
//! Provides typed errors for storage operations with descriptive messages
//! and recovery suggestions.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create the directory holding the backing file
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
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

    /// Collection could not be encoded as JSON
    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    /// Create an error from a failed write with path context
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        classify(error, path, |path, source| StorageError::WriteError { path, source })
    }

    /// Create an error from a failed read with path context
    pub fn from_read_io(error: io::Error, path: PathBuf) -> Self {
        classify(error, path, |path, source| StorageError::ReadError { path, source })
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StorageError::DiskFull { .. } | StorageError::PermissionDenied { .. }
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions, or point --file at a writable location.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            StorageError::ReadError { .. } => {
                Some("Check that the data file path refers to a regular, readable file.")
            }
            _ => None,
        }
    }
}

fn classify(
    error: io::Error,
    path: PathBuf,
    fallback: fn(PathBuf, io::Error) -> StorageError,
) -> StorageError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
            path,
            source: error,
        },
        _ if is_disk_full_error(&error) => StorageError::DiskFull {
            path,
            source: error,
        },
        _ => fallback(path, error),
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Signal that the backing file held unparseable content
///
/// The collection was reset to empty. If a backup was made, the original
/// bytes are preserved at `backup_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// The backing file that failed to parse
    pub path: PathBuf,
    /// Parser error message
    pub details: String,
    /// Where the unparseable content was copied, if anywhere
    pub backup_path: Option<PathBuf>,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is corrupted ({}). Starting with an empty collection.",
            self.path.display(),
            self.details
        )?;
        if let Some(ref backup) = self.backup_path {
            write!(f, " The original was copied to '{}'.", backup.display())?;
        }
        Ok(())
    }
}
