//! Application configuration.

use std::path::{Path, PathBuf};

use callbook_core::MigrationConfig;
use clap::Parser;
use serde::Deserialize;

use crate::error::Error;

/// Default directory holding the database file.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default database file name.
pub const DEFAULT_DATABASE_FILE: &str = "callbook.db";

/// Market segments seeded into an empty `Types` table.
pub const DEFAULT_SEGMENT_TYPES: &[&str] =
    &["NIFTY 50", "NIFTY 100", "NIFTY 200", "NIFTY 500", "FUTURES"];

/// Callbook configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the database file. Created if missing.
    pub data_dir: PathBuf,

    /// Database file name inside `data_dir`.
    pub database_file: String,

    /// Segment names seeded into an empty `Types` table.
    pub seed_types: Vec<String>,

    /// Reconciliation settings.
    pub migration: MigrationConfig,
}

impl AppConfig {
    /// Create a configuration rooted at the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            seed_types: DEFAULT_SEGMENT_TYPES.iter().map(|s| s.to_string()).collect(),
            migration: MigrationConfig::default(),
        }
    }

    /// Set the database file name.
    pub fn with_database_file(mut self, file: impl Into<String>) -> Self {
        self.database_file = file.into();
        self
    }

    /// Set the seeded segment names.
    pub fn with_seed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seed_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Run reconciliation in a single transaction.
    pub fn with_atomic_migrations(mut self) -> Self {
        self.migration.atomic = true;
        self
    }

    /// Report schema changes without applying them.
    pub fn with_dry_run(mut self) -> Self {
        self.migration.dry_run = true;
        self
    }

    /// Apply values from a settings file.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        if let Some(file) = settings.database.file {
            self.database_file = file;
        }
        if let Some(types) = settings.types {
            self.seed_types = types;
        }
        self
    }

    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

/// Contents of the JSON settings file.
///
/// ```json
/// { "Database": { "File": "journal.db" }, "Types": ["NIFTY 50", "FUTURES"] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    /// Database section.
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Segment names to seed.
    #[serde(default)]
    pub types: Option<Vec<String>>,
}

/// Database section of the settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseSettings {
    /// Database file name.
    #[serde(default)]
    pub file: Option<String>,
}

impl Settings {
    /// Parse settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::Config(format!("invalid settings: {}", e)))
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read settings {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "callbook")]
#[command(version, about = "Stock call journal", long_about = None)]
pub struct Args {
    /// Directory holding the database file.
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Database file name (overrides the settings file).
    #[arg(long)]
    pub database_file: Option<String>,

    /// JSON settings file.
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Roll back every schema change if any table fails to migrate.
    #[arg(long)]
    pub atomic: bool,

    /// Print the schema changes that would be made, without making them.
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Convert command-line arguments to application configuration.
    pub fn into_config(self) -> Result<AppConfig, Error> {
        let mut config = AppConfig::new(self.data_dir);

        if let Some(path) = &self.settings {
            config = config.with_settings(Settings::load(path)?);
        }
        if let Some(file) = self.database_file {
            config = config.with_database_file(file);
        }
        if self.atomic {
            config = config.with_atomic_migrations();
        }
        if self.dry_run {
            config = config.with_dry_run();
        }

        Ok(config)
    }
}
