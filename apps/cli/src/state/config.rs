//! # Configuration State
//!
//! Application configuration resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`STOCKLEDGER_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use stockledger_core::Money;
use thiserror::Error;

/// Overrides the database file location.
pub const ENV_DB_PATH: &str = "STOCKLEDGER_DB_PATH";
/// Currency prefix used in tables and summaries.
pub const ENV_CURRENCY_SYMBOL: &str = "STOCKLEDGER_CURRENCY_SYMBOL";
/// Default length of the dashboard's top-by-quantity ranking.
pub const ENV_TOP_LIMIT: &str = "STOCKLEDGER_TOP_LIMIT";

const DEFAULT_CURRENCY_SYMBOL: &str = "R$";
const DEFAULT_TOP_LIMIT: usize = 10;
const DATABASE_FILE_NAME: &str = "stockledger.db";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },

    #[error("Could not determine app data directory; set STOCKLEDGER_DB_PATH")]
    NoDataDir,

    #[error("Could not create data directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// SQLite database file, or `:memory:`.
    pub db_path: PathBuf,

    /// Currency symbol (for display). Empty means no prefix.
    pub currency_symbol: String,

    /// How many products the dashboard ranks by quantity.
    pub top_limit: usize,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env(db_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load(db_override, |var| std::env::var(var).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    ///
    /// ## Environment Variables
    /// - `STOCKLEDGER_DB_PATH`: database file (ignored when `--db` is given)
    /// - `STOCKLEDGER_CURRENCY_SYMBOL`: e.g. `"$"`, `"€"`, or empty
    /// - `STOCKLEDGER_TOP_LIMIT`: positive integer
    pub fn load<F>(db_override: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match db_override {
            Some(path) => path,
            None => match lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
                Some(path) => PathBuf::from(path),
                None => default_database_path()?,
            },
        };

        let currency_symbol = lookup(ENV_CURRENCY_SYMBOL)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string());

        let top_limit = match lookup(ENV_TOP_LIMIT) {
            Some(raw) => parse_top_limit(&raw)?,
            None => DEFAULT_TOP_LIMIT,
        };

        Ok(AppConfig {
            db_path,
            currency_symbol,
            top_limit,
        })
    }

    /// Creates the database file's parent directory if missing.
    pub fn ensure_data_dir(&self) -> Result<(), ConfigError> {
        if self.db_path == Path::new(":memory:") {
            return Ok(());
        }

        let parent = match self.db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        };

        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "R$ 12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Prefixes an already formatted decimal with the configured symbol.
    pub fn with_symbol(&self, decimal: &str) -> String {
        if self.currency_symbol.is_empty() {
            decimal.to_string()
        } else {
            format!("{} {}", self.currency_symbol, decimal)
        }
    }
}

fn parse_top_limit(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        var: ENV_TOP_LIMIT,
        reason: reason.to_string(),
    };

    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(invalid("expected a positive integer")),
    }
}

/// Platform data directory for the database file.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.stockledger.stockledger/stockledger.db`
/// - **Windows**: `%APPDATA%\stockledger\stockledger\data\stockledger.db`
/// - **Linux**: `~/.local/share/stockledger/stockledger.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("com", "stockledger", "stockledger").ok_or(ConfigError::NoDataDir)?;

    Ok(proj_dirs.data_dir().join(DATABASE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_values() {
        let config = AppConfig::load(
            None,
            lookup(&[
                (ENV_DB_PATH, "/tmp/ledger.db"),
                (ENV_CURRENCY_SYMBOL, "$"),
                (ENV_TOP_LIMIT, "3"),
            ]),
        )
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/ledger.db"));
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.top_limit, 3);
    }

    #[test]
    fn test_flag_beats_env() {
        let config = AppConfig::load(
            Some(PathBuf::from(":memory:")),
            lookup(&[(ENV_DB_PATH, "/tmp/ledger.db")]),
        )
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from(":memory:"));
        assert_eq!(config.currency_symbol, "R$");
        assert_eq!(config.top_limit, 10);
    }

    #[test]
    fn test_invalid_top_limit() {
        for raw in ["0", "-2", "ten"] {
            let err = AppConfig::load(
                Some(PathBuf::from(":memory:")),
                lookup(&[(ENV_TOP_LIMIT, raw)]),
            )
            .unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue {
                    var: ENV_TOP_LIMIT,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_format_money() {
        let mut config =
            AppConfig::load(Some(PathBuf::from(":memory:")), lookup(&[])).unwrap();
        assert_eq!(config.format_money(Money::from_cents(14000)), "R$ 140.00");
        assert_eq!(config.with_symbol("5.50"), "R$ 5.50");

        config.currency_symbol = String::new();
        assert_eq!(config.format_money(Money::from_cents(1)), "0.01");
        assert_eq!(config.with_symbol("5.50"), "5.50");
    }
}
