//! Storage layer
//!
//! Handles persistence of the book collection to a single JSON file.
//!
//! - **persistence**: load/save of the backing file with atomic writes
//! - **error**: typed storage errors and the malformed-data warning

pub mod error;
pub mod persistence;

pub use error::{LoadWarning, StorageError, StorageResult};
pub use persistence::{JsonPersistence, Loaded};
