//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `LOFT_CART_STORAGE_KEY` - Storage key for the persisted cart (default: `loft.cart`)
//! - `LOFT_CURRENCY` - Store currency, ISO 4217 (default: USD)
//! - `LOFT_STORAGE_DIR` - Directory for file-backed storage (default: `.loft`)
//! - `LOFT_STORAGE_QUOTA_BYTES` - Per-value size limit for file-backed storage
//! - `LOFT_CATALOG_PATH` - JSON catalog file (default: builtin catalog)

use std::path::PathBuf;

use loft_core::CurrencyCode;
use thiserror::Error;

pub const DEFAULT_STORAGE_KEY: &str = "loft.cart";
pub const DEFAULT_STORAGE_DIR: &str = ".loft";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key the cart blob is stored under
    pub storage_key: String,
    /// Currency all prices are in
    pub currency: CurrencyCode,
    /// Directory for file-backed storage
    pub storage_dir: PathBuf,
    /// Maximum bytes per stored value
    pub storage_quota_bytes: Option<usize>,
    /// Catalog file to load instead of the builtin listings
    pub catalog_path: Option<PathBuf>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_quota_bytes: None,
            catalog_path: None,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_key = match non_empty(lookup("LOFT_CART_STORAGE_KEY")) {
            Some(key) => key,
            None => defaults.storage_key,
        };

        let currency = match non_empty(lookup("LOFT_CURRENCY")) {
            Some(code) => code.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("LOFT_CURRENCY".to_string(), e.to_string())
            })?,
            None => defaults.currency,
        };

        let storage_dir = non_empty(lookup("LOFT_STORAGE_DIR"))
            .map_or(defaults.storage_dir, PathBuf::from);

        let storage_quota_bytes = match non_empty(lookup("LOFT_STORAGE_QUOTA_BYTES")) {
            Some(raw) => Some(parse_quota(&raw)?),
            None => None,
        };

        let catalog_path = non_empty(lookup("LOFT_CATALOG_PATH")).map(PathBuf::from);

        Ok(Self {
            storage_key,
            currency,
            storage_dir,
            storage_quota_bytes,
            catalog_path,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_quota(raw: &str) -> Result<usize, ConfigError> {
    let invalid =
        |msg: String| ConfigError::InvalidEnvVar("LOFT_STORAGE_QUOTA_BYTES".to_string(), msg);
    let quota = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| invalid(e.to_string()))?;
    if quota == 0 {
        return Err(invalid("must be greater than zero".to_string()));
    }
    Ok(quota)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CartConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "loft.cart");
        assert_eq!(config.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("LOFT_CART_STORAGE_KEY", "studio.cart"),
            ("LOFT_CURRENCY", "gbp"),
            ("LOFT_STORAGE_DIR", "/tmp/loft"),
            ("LOFT_STORAGE_QUOTA_BYTES", "5242880"),
            ("LOFT_CATALOG_PATH", "catalog.json"),
        ]))
        .unwrap();

        assert_eq!(config.storage_key, "studio.cart");
        assert_eq!(config.currency, CurrencyCode::GBP);
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/loft"));
        assert_eq!(config.storage_quota_bytes, Some(5_242_880));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config =
            CartConfig::from_lookup(lookup_from(&[("LOFT_CART_STORAGE_KEY", "  ")])).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_invalid_currency() {
        let err = CartConfig::from_lookup(lookup_from(&[("LOFT_CURRENCY", "XYZ")])).unwrap_err();
        assert!(err.to_string().contains("LOFT_CURRENCY"));
    }

    #[test]
    fn test_invalid_quota() {
        assert!(
            CartConfig::from_lookup(lookup_from(&[("LOFT_STORAGE_QUOTA_BYTES", "0")])).is_err()
        );
        assert!(
            CartConfig::from_lookup(lookup_from(&[("LOFT_STORAGE_QUOTA_BYTES", "lots")])).is_err()
        );
    }
}
