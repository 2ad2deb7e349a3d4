//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use cart::CartConfig;

/// Default location of the cart file, relative to the working directory.
pub const DEFAULT_CART_PATH: &str = ".storefront/cart.json";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Storefront configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `STOREFRONT_CART_PATH` — cart file (default: `".storefront/cart.json"`)
/// - `STOREFRONT_CART_KEY` — slot name inside the file (default: `"storefront.cart"`)
/// - `STOREFRONT_MATCH_POLICY` — `exact` or `permissive` (default: `exact`)
/// - `STOREFRONT_LOG_FORMAT` — `pretty` or `json` (default: `pretty`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub cart_path: PathBuf,
    pub cart: CartConfig,
    pub log_format: LogFormat,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            cart_path: value("STOREFRONT_CART_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CART_PATH)),
            cart: CartConfig::from_lookup(&lookup),
            log_format: value("STOREFRONT_LOG_FORMAT")
                .and_then(|f| f.parse().ok())
                .unwrap_or_default(),
            log_level: value("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cart_path: PathBuf::from(DEFAULT_CART_PATH),
            cart: CartConfig::default(),
            log_format: LogFormat::Pretty,
            log_level: "info".to_string(),
        }
    }
}
