//! Callbook - stock call journal.
//!
//! This crate hosts application startup: it loads configuration, opens the
//! journal database, reconciles its schema with the declared entities and
//! seeds lookup data. Row-level access only begins once a [`Database`]
//! has been returned.

pub mod config;
pub mod database;
pub mod error;
pub mod journal;

pub use config::{AppConfig, Args, Settings};
pub use database::Database;
pub use error::Error;
