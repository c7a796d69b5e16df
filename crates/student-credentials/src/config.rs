//! Store configuration.
//!
//! The record store location is supplied externally via environment
//! variables; a missing store path is a fatal startup condition for any
//! caller.

use std::path::PathBuf;

use crate::error::{CredentialError, Result};

/// Environment variable naming the store root directory. Required.
pub const STORE_PATH_VAR: &str = "REGISTRY_STORE_PATH";

/// Environment variable naming the target database. Optional.
pub const DB_NAME_VAR: &str = "REGISTRY_DB";

/// Database name used when `REGISTRY_DB` is unset.
pub const DEFAULT_DB_NAME: &str = "development";

/// Location of the record store: a root directory plus a database name.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory holding all databases.
    pub path: PathBuf,
    /// Target database name (a directory under `path`).
    pub database: String,
}

impl StoreConfig {
    /// Build a config from explicit values.
    pub fn new(path: impl Into<PathBuf>, database: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            database: database.into(),
        }
    }

    /// Read the config from the environment.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::MissingConfig` when `REGISTRY_STORE_PATH`
    /// is unset or empty.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(STORE_PATH_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CredentialError::MissingConfig(STORE_PATH_VAR.to_string()))?;

        let database = std::env::var(DB_NAME_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        Ok(Self::new(path, database))
    }
}
