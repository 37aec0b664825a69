//! Centralized configuration (environment variables + defaults).
//!
//! Every setting has a default the storefront can run with. A value that is
//! set but unparsable is reported and replaced by the default.

use crate::domain::cart::DuplicatePolicy;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_STATE_FILE: &str = "storefront_state.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

fn env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parsed<T: FromStr>(name: &str, default: T) -> T {
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            warn!(var = name, value = %raw, "Config: invalid value, using default");
            default
        }
    }
}

/// Path of the JSON file backing the shopper's durable storage.
pub fn state_file() -> PathBuf {
    PathBuf::from(env_string("STOREFRONT_STATE_FILE", DEFAULT_STATE_FILE))
}

/// Address the HTTP API listens on.
pub fn bind_addr() -> String {
    env_string("STOREFRONT_BIND_ADDR", DEFAULT_BIND_ADDR)
}

/// Quiescence window for search-as-you-type.
pub fn search_debounce() -> Duration {
    Duration::from_millis(env_parsed("SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS))
}

/// `increment` (default) or `reject`.
pub fn duplicate_policy() -> DuplicatePolicy {
    env_parsed("CART_DUPLICATE_POLICY", DuplicatePolicy::default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontSettings {
    pub state_file: PathBuf,
    pub bind_addr: String,
    pub search_debounce: Duration,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl StorefrontSettings {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            state_file: state_file(),
            bind_addr: bind_addr(),
            search_debounce: search_debounce(),
            duplicate_policy: duplicate_policy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Variable names are unique to each test so parallel tests do not race.
    #[test]
    fn invalid_numbers_fall_back() {
        env::set_var("STOREFRONT_TEST_DEBOUNCE", "soon");
        assert_eq!(env_parsed("STOREFRONT_TEST_DEBOUNCE", 300u64), 300);
        env::set_var("STOREFRONT_TEST_DEBOUNCE", " 150 ");
        assert_eq!(env_parsed("STOREFRONT_TEST_DEBOUNCE", 300u64), 150);
    }

    #[test]
    fn policy_parses_both_spellings() {
        env::set_var("STOREFRONT_TEST_POLICY", "reject");
        assert_eq!(
            env_parsed("STOREFRONT_TEST_POLICY", DuplicatePolicy::Increment),
            DuplicatePolicy::RejectDuplicate
        );
        env::set_var("STOREFRONT_TEST_POLICY", "sometimes");
        assert_eq!(
            env_parsed("STOREFRONT_TEST_POLICY", DuplicatePolicy::Increment),
            DuplicatePolicy::Increment
        );
    }

    #[test]
    fn blank_strings_use_default() {
        env::set_var("STOREFRONT_TEST_ADDR", "   ");
        assert_eq!(env_string("STOREFRONT_TEST_ADDR", DEFAULT_BIND_ADDR), DEFAULT_BIND_ADDR);
        assert_eq!(env_string("STOREFRONT_TEST_UNSET", "x"), "x");
    }
}
