//! Application settings loaded from config.toml
//!
//! Every section and field is optional so an empty or missing file still
//! yields a usable configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Storage settings
    #[serde(default)]
    pub store: StoreConfig,
}

/// The `[store]` section
#[derive(Debug, Default, Deserialize, Clone)]
pub struct StoreConfig {
    /// Database URL, overridden by the `DATABASE_URL` environment variable
    pub database_url: Option<String>,
    /// JSON document used to seed collections that do not exist yet
    pub seed_file: Option<PathBuf>,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads configuration from ./config.toml, falling back to defaults when the
/// file does not exist.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        tracing::info!("No config.toml found, using defaults");
        Ok(AppConfig::default())
    }
}
