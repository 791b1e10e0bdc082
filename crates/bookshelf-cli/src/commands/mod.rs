//! Command handlers, one module per command group

pub mod book;
pub mod config;
pub mod status;
