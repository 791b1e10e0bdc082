//! JSON file persistence
//!
//! Handles saving and loading the book collection to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) so a failed save
//! never leaves a half-written backing file behind.
//!
//! Files (next to the configured backing file, `data.json` by default):
//! - `data.json` - The collection as a JSON array
//! - `data.json.tmp` - Transient, only exists during a save
//! - `data.json.corrupt.backup[.N]` - Copies of unparseable content, if any was found

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::{LoadWarning, StorageError, StorageResult};
use crate::config::Config;
use crate::models::Book;

/// Numbered backups tried before giving up
const MAX_CORRUPT_BACKUPS: u32 = 100;

/// Result of reading the backing file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    /// Records read from disk (empty when the file was missing or malformed)
    pub books: Vec<Book>,
    /// Set when the file existed but could not be parsed
    pub warning: Option<LoadWarning>,
}

/// Persistence layer for the JSON backing file
pub struct JsonPersistence {
    path: PathBuf,
    backup_corrupt: bool,
}

impl JsonPersistence {
    /// Create a persistence handler for the given backing file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_corrupt: true,
        }
    }

    /// Create a persistence handler from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_file.clone()).with_backup_corrupt(config.backup_corrupt)
    }

    /// Enable or disable copying unparseable files aside
    pub fn with_backup_corrupt(mut self, enabled: bool) -> Self {
        self.backup_corrupt = enabled;
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the backing file in bytes, if it exists
    pub fn file_size(&self) -> Option<u64> {
        fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Path used for the first copy of unparseable content
    pub fn backup_path(&self) -> PathBuf {
        sibling_path(&self.path, ".corrupt.backup")
    }

    /// Load the collection from disk
    ///
    /// A missing file yields an empty collection. Unparseable content yields
    /// an empty collection plus a [`LoadWarning`]. Any other read failure is
    /// returned as an error.
    pub fn load(&self) -> StorageResult<Loaded> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No backing file at {:?}, starting empty", self.path);
                return Ok(Loaded::default());
            }
            Err(e) => return Err(StorageError::from_read_io(e, self.path.clone())),
        };

        match serde_json::from_slice::<Vec<Book>>(&bytes) {
            Ok(books) => {
                debug!("Loaded {} book(s) from {:?}", books.len(), self.path);
                Ok(Loaded {
                    books,
                    warning: None,
                })
            }
            Err(e) => {
                let backup_path = if self.backup_corrupt {
                    self.backup(&bytes)
                } else {
                    None
                };
                let warning = LoadWarning {
                    path: self.path.clone(),
                    details: e.to_string(),
                    backup_path,
                };
                warn!("{}", warning);
                Ok(Loaded {
                    books: Vec::new(),
                    warning: Some(warning),
                })
            }
        }
    }

    /// Save the full collection, replacing the backing file
    pub fn save(&self, books: &[Book]) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(books)?;
        atomic_write(&self.path, &bytes)?;
        debug!("Saved {} book(s) to {:?}", books.len(), self.path);
        Ok(())
    }

    /// Copy unparseable content aside; failure is logged, not returned
    ///
    /// Earlier backups are never overwritten. Content identical to an
    /// existing backup reuses it, anything else goes to the next free
    /// numbered name (`.corrupt.backup.1`, `.corrupt.backup.2`, ...).
    fn backup(&self, bytes: &[u8]) -> Option<PathBuf> {
        let mut backup_path = self.backup_path();
        let mut n = 0u32;
        loop {
            match fs::read(&backup_path) {
                Ok(existing) if existing == bytes => {
                    debug!("Corrupted content already backed up at {:?}", backup_path);
                    return Some(backup_path);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => break,
                _ if n >= MAX_CORRUPT_BACKUPS => {
                    warn!(
                        "Not backing up corrupted file {:?}: no free backup name",
                        self.path
                    );
                    return None;
                }
                _ => {
                    n += 1;
                    backup_path = sibling_path(&self.path, &format!(".corrupt.backup.{}", n));
                }
            }
        }

        match atomic_write(&backup_path, bytes) {
            Ok(()) => Some(backup_path),
            Err(e) => {
                warn!("Could not back up corrupted file {:?}: {}", self.path, e);
                None
            }
        }
    }
}

/// Append a suffix to the file name, keeping the directory
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// The temp file is removed if any step fails.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let temp_path = sibling_path(path, ".tmp");

    if let Err(e) = write_synced(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::from_io(e, path.to_path_buf()));
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::AtomicWriteFailed {
            from: temp_path,
            to: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Write and sync through a handle that is closed when this returns
fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
