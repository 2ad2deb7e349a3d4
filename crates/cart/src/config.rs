//! Cart configuration loaded from environment variables.

use crate::MatchPolicy;

/// Storage key the cart is saved under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "storefront.cart";

/// Cart configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `STOREFRONT_CART_KEY` — storage slot name (default: `"storefront.cart"`)
/// - `STOREFRONT_MATCH_POLICY` — `exact` or `permissive` (default: `exact`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    pub storage_key: String,
    pub match_policy: MatchPolicy,
}

impl CartConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults.
    ///
    /// Blank values count as unset. An unrecognized match policy is
    /// logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let match_policy = match value("STOREFRONT_MATCH_POLICY") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring STOREFRONT_MATCH_POLICY");
                MatchPolicy::default()
            }),
            None => MatchPolicy::default(),
        };

        Self {
            storage_key: value("STOREFRONT_CART_KEY")
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            match_policy,
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            match_policy: MatchPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "storefront.cart");
        assert_eq!(config.match_policy, MatchPolicy::Exact);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(CartConfig::from_lookup(lookup(&[])), CartConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup(&[
            ("STOREFRONT_CART_KEY", "shop.cart.v2"),
            ("STOREFRONT_MATCH_POLICY", "permissive"),
        ]));
        assert_eq!(config.storage_key, "shop.cart.v2");
        assert_eq!(config.match_policy, MatchPolicy::Permissive);
    }

    #[test]
    fn test_invalid_policy_and_blank_key_fall_back() {
        let config = CartConfig::from_lookup(lookup(&[
            ("STOREFRONT_CART_KEY", "   "),
            ("STOREFRONT_MATCH_POLICY", "sloppy"),
        ]));
        assert_eq!(config, CartConfig::default());
    }
}
