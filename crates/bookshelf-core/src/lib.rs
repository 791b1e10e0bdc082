//! Bookshelf Core Library
//!
//! This crate provides the core functionality for Bookshelf, a small
//! personal book collection persisted to a single JSON file.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open_at("data.json")?;
//!
//! // Add a book
//! store.add("The Hobbit", "J.R.R. Tolkien", 1937)?;
//!
//! // Query books
//! let hobbit = store.find_by_title("the hobbit");
//! let tolkien = store.find_by_author("tolkien");
//! ```
//!
//! # Modules
//!
//! - `store`: The collection and its commands (main entry point)
//! - `models`: The `Book` record
//! - `storage`: JSON file persistence and storage errors
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::Book;
pub use storage::{JsonPersistence, LoadWarning, StorageError, StorageResult};
pub use store::{CollectionStats, Store};
