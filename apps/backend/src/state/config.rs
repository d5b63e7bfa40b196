//! # Configuration State
//!
//! Store and currency settings loaded at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`shopkeep.toml`)
//! 3. Environment variables (`SHOPKEEP_*`)
//!
//! The result is validated before use.
//!
//! ## Example Config File
//! ```toml
//! store_name = "Corner Shop"
//! currency_code = "UZS"
//! currency_symbol = "сўм"
//! currency_decimals = 2
//! symbol_position = "after"
//! database_path = "/var/lib/shopkeep/shopkeep.db"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use shopkeep_core::Money;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "shopkeep.toml";
pub const DATABASE_FILE_NAME: &str = "shopkeep.db";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the application data directory")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// ConfigState
// =============================================================================

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    #[default]
    After,
}

/// Application configuration, as sent to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (page titles, reports)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Decimal places shown: 0 or 2
    pub currency_decimals: u8,

    pub symbol_position: SymbolPosition,

    /// Explicit database location; the platform data directory otherwise.
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// Defaults: Uzbek som, two decimals, symbol after the amount.
    fn default() -> Self {
        ConfigState {
            store_name: "Shopkeep".to_string(),
            currency_code: "UZS".to_string(),
            currency_symbol: "сўм".to_string(),
            currency_decimals: 2,
            symbol_position: SymbolPosition::After,
            database_path: None,
        }
    }
}

/// The subset of settings a config file may set. Anything absent keeps its
/// default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    store_name: Option<String>,
    currency_code: Option<String>,
    currency_symbol: Option<String>,
    currency_decimals: Option<u8>,
    symbol_position: Option<SymbolPosition>,
    database_path: Option<PathBuf>,
}

impl ConfigState {
    /// Loads configuration from defaults, file and environment.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = ConfigState::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
                config.merge_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Applies the settings present in a TOML document.
    pub fn merge_toml(&mut self, contents: &str) -> ConfigResult<()> {
        let file: ConfigFile = toml::from_str(contents)?;

        if let Some(name) = file.store_name {
            self.store_name = name;
        }
        if let Some(code) = file.currency_code {
            self.currency_code = code;
        }
        if let Some(symbol) = file.currency_symbol {
            self.currency_symbol = symbol;
        }
        if let Some(decimals) = file.currency_decimals {
            self.currency_decimals = decimals;
        }
        if let Some(position) = file.symbol_position {
            self.symbol_position = position;
        }
        if file.database_path.is_some() {
            self.database_path = file.database_path;
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SHOPKEEP_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("SHOPKEEP_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(symbol) = lookup("SHOPKEEP_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(path) = lookup("SHOPKEEP_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be blank".into()));
        }

        if !matches!(self.currency_decimals, 0 | 2) {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be 0 or 2, got {}",
                self.currency_decimals
            )));
        }

        if self.currency_code.len() != 3 || !self.currency_code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Invalid(format!(
                "currency_code must be a 3-letter ISO 4217 code, got '{}'",
                self.currency_code
            )));
        }

        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "shopkeep", "shopkeep")
    }

    /// `<platform config dir>/shopkeep.toml`
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The database file to open.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.shopkeep.shopkeep/shopkeep.db`
    /// - **Windows**: `%APPDATA%\shopkeep\shopkeep\data\shopkeep.db`
    /// - **Linux**: `~/.local/share/shopkeep/shopkeep.db`
    ///
    /// The parent directory is created when missing.
    pub fn resolve_database_path(&self) -> ConfigResult<PathBuf> {
        let path = match &self.database_path {
            Some(path) => path.clone(),
            None => Self::project_dirs()
                .ok_or(ConfigError::NoDataDir)?
                .data_dir()
                .join(DATABASE_FILE_NAME),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir(parent)?;
        }

        Ok(path)
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_minor(123456)), "1234.56 сўм");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let minor = amount.minor_units().unsigned_abs();

        let number = if self.currency_decimals == 0 {
            // round half away from zero
            ((minor + 50) / 100).to_string()
        } else {
            format!("{}.{:02}", minor / 100, minor % 100)
        };

        match self.symbol_position {
            SymbolPosition::Before => format!("{sign}{}{number}", self.currency_symbol),
            SymbolPosition::After => format!("{sign}{number} {}", self.currency_symbol),
        }
    }
}

fn create_dir(dir: &Path) -> ConfigResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
