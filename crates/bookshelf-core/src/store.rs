//! Book collection store
//!
//! The `Store` owns the in-memory collection and mirrors it to the backing
//! file. Records are loaded eagerly when the store is opened; every mutating
//! command rewrites the whole file before returning.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open_at("data.json")?;
//!
//! store.add("Dune", "Frank Herbert", 1965)?;
//! store.mark_read("dune")?;
//!
//! let unread = store.unread();
//! ```
//!
//! If a save fails, the in-memory change is undone so the collection keeps
//! matching what is on disk.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::models::Book;
use crate::storage::{JsonPersistence, LoadWarning, Loaded, StorageResult};

/// Counts and on-disk size for the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStats {
    /// Number of books
    pub total: usize,
    /// Books marked as read
    pub read: usize,
    /// Books not yet read
    pub unread: usize,
    /// Size of the backing file, if it exists
    pub file_size: Option<u64>,
}

impl CollectionStats {
    /// Backing file size formatted for humans
    pub fn file_size_human(&self) -> String {
        match self.file_size {
            None => "(no file)".to_string(),
            Some(bytes) if bytes < 1024 => format!("{} B", bytes),
            Some(bytes) if bytes < 1024 * 1024 => format!("{:.1} KB", bytes as f64 / 1024.0),
            Some(bytes) => format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0)),
        }
    }
}

/// Book collection backed by a JSON file
pub struct Store {
    /// Records in insertion order
    books: Vec<Book>,
    /// Backing file handler
    persistence: JsonPersistence,
    /// Set when the last load found unparseable content
    load_warning: Option<LoadWarning>,
}

impl Store {
    /// Open the store with a specific configuration
    pub fn open_with_config(config: &Config) -> StorageResult<Self> {
        Self::with_persistence(JsonPersistence::from_config(config))
    }

    /// Open the store on a specific backing file
    pub fn open_at(path: impl Into<PathBuf>) -> StorageResult<Self> {
        Self::with_persistence(JsonPersistence::new(path))
    }

    /// Open the store with a prepared persistence handler
    pub fn with_persistence(persistence: JsonPersistence) -> StorageResult<Self> {
        let Loaded { books, warning } = persistence.load()?;
        Ok(Self {
            books,
            persistence,
            load_warning: warning,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.persistence.path()
    }

    /// Warning from the most recent load, if the file was unparseable
    pub fn load_warning(&self) -> Option<&LoadWarning> {
        self.load_warning.as_ref()
    }

    /// Re-read the backing file, discarding the in-memory collection
    pub fn reload(&mut self) -> StorageResult<Option<&LoadWarning>> {
        let Loaded { books, warning } = self.persistence.load()?;
        self.books = books;
        self.load_warning = warning;
        Ok(self.load_warning.as_ref())
    }

    /// Write the full collection to the backing file
    pub fn save(&self) -> StorageResult<()> {
        self.persistence.save(&self.books)
    }

    // ==================== Commands ====================

    /// Append a new unread book and persist
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> StorageResult<&Book> {
        self.books.push(Book::new(title, author, year));
        if let Err(e) = self.save() {
            self.books.pop();
            return Err(e);
        }
        Ok(&self.books[self.books.len() - 1])
    }

    /// Mark the book with this title as read
    ///
    /// Returns `false` without touching the file if no title matches.
    pub fn mark_read(&mut self, title: &str) -> StorageResult<bool> {
        let Some(index) = self.position_of(title) else {
            return Ok(false);
        };

        let was_read = self.books[index].read;
        self.books[index].mark_read();
        if let Err(e) = self.save() {
            self.books[index].read = was_read;
            return Err(e);
        }
        Ok(true)
    }

    /// Remove the book with this title
    ///
    /// Only a case-insensitive exact title match is removed, never a
    /// substring match. Returns `false` without touching the file if no
    /// title matches.
    pub fn remove(&mut self, title: &str) -> StorageResult<bool> {
        let Some(index) = self.position_of(title) else {
            return Ok(false);
        };

        let removed = self.books.remove(index);
        if let Err(e) = self.save() {
            self.books.insert(index, removed);
            return Err(e);
        }
        Ok(true)
    }

    // ==================== Queries ====================

    /// All books in insertion order
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    /// First book whose title equals `title`, ignoring case
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title_matches(title))
    }

    /// Books whose author contains `author`, ignoring case
    pub fn find_by_author(&self, author: &str) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|b| b.author_contains(author))
            .collect()
    }

    /// Books not yet read
    pub fn unread(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| !b.read).collect()
    }

    /// Number of books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Counts and file size
    pub fn stats(&self) -> CollectionStats {
        let read = self.books.iter().filter(|b| b.read).count();
        CollectionStats {
            total: self.books.len(),
            read,
            unread: self.books.len() - read,
            file_size: self.persistence.file_size(),
        }
    }

    fn position_of(&self, title: &str) -> Option<usize> {
        self.books.iter().position(|b| b.title_matches(title))
    }
}
