//! Shell configuration module.
//!
//! This module provides configuration loading for the myDB shell from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `MYDB_DATA_DIRECTORY`: Directory holding `<table>.meta` and `<table>.data` (default: `.`)
//! - `MYDB_TABLE`: Table to open; when unset the shell prompts for it
//!
//! # Invariants
//!
//! - `data_directory` names an existing directory
//! - `table`, when set, is non-empty and contains no path separators

use std::path::{Path, PathBuf};

/// Shell configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Directory where table files are stored.
    /// Table `t` is read from `{data_directory}/t.meta` and `{data_directory}/t.data`.
    pub data_directory: PathBuf,
    /// Table to open without prompting.
    pub table: Option<String>,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl DbConfig {
    /// Default data directory.
    pub const DEFAULT_DATA_DIRECTORY: &'static str = ".";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `MYDB_DATA_DIRECTORY` does not name an existing directory
    /// - `MYDB_TABLE` is set but empty or contains a path separator
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var("MYDB_DATA_DIRECTORY").ok(),
            std::env::var("MYDB_TABLE").ok(),
        )
    }

    /// Build a configuration from raw variable values.
    fn from_values(
        data_directory: Option<String>,
        table: Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_directory = Self::load_data_directory(data_directory)?;
        let table = table.map(|name| validate_table_name("MYDB_TABLE", name)).transpose()?;

        Ok(Self {
            data_directory,
            table,
        })
    }

    /// Resolve the data directory, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not an existing directory.
    fn load_data_directory(value: Option<String>) -> Result<PathBuf, ConfigError> {
        let directory = value.map_or_else(
            || PathBuf::from(Self::DEFAULT_DATA_DIRECTORY),
            PathBuf::from,
        );

        if !directory.is_dir() {
            return Err(ConfigError::InvalidValue {
                name: "MYDB_DATA_DIRECTORY".to_string(),
                message: format!("'{}' is not a directory", directory.display()),
            });
        }

        Ok(directory)
    }

    /// The data directory as a path.
    #[must_use]
    pub fn data_directory(&self) -> &Path {
        &self.data_directory
    }
}

/// Check a table name read from the environment or typed at the prompt.
///
/// # Errors
///
/// Returns an error if the name is empty or contains a path separator.
pub fn validate_table_name(source: &str, name: String) -> Result<String, ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: source.to_string(),
            message: "table name must not be empty".to_string(),
        });
    }
    if name.contains(['/', '\\']) {
        return Err(ConfigError::InvalidValue {
            name: source.to_string(),
            message: format!("'{name}' must be a bare table name, not a path"),
        });
    }
    Ok(name)
}
