//! Application settings loading from config.toml
//!
//! The config file is optional. When it is missing the built-in defaults
//! are used: a `$` currency symbol, the ten default member colours, and no
//! seed groups.

use super::groups::GroupSeed;
use crate::{
    core::roster::{DEFAULT_PALETTE, Palette},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "SPLIT_BUDDY_CONFIG";

/// Config file used when [`CONFIG_PATH_VAR`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(ToString::to_string).collect()
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Symbol prefixed to amounts in reports
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Member colours in hand-out order
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Groups created at start-up
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            palette: default_palette(),
            groups: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Validated member palette.
    pub fn palette(&self) -> Result<Palette> {
        Palette::new(self.palette.clone())
    }
}

/// Parses and validates configuration from a TOML string.
///
/// # Errors
/// Returns an error if:
/// - The TOML syntax is invalid
/// - The palette is empty or holds a value that is not `#rrggbb`
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.palette()?;
    Ok(config)
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or fails [`parse_config`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads configuration from `$SPLIT_BUDDY_CONFIG` or `./config.toml`.
///
/// See [`load_config_or_default`].
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config_or_default(path)
}

/// Loads configuration from `path`, or the defaults when no file exists there.
///
/// A file that exists but is invalid is an error.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        info!("No config file at {}, using defaults", path_ref.display());
        return Ok(AppConfig::default());
    }
    let config = load_config(path_ref)?;
    info!(
        "Loaded configuration from {} ({} seed group(s), {} palette colour(s))",
        path_ref.display(),
        config.groups.len(),
        config.palette.len()
    );
    Ok(config)
}
