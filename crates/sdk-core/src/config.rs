//! Decoder and context configuration.
//!
//! Values come from [`SdkConfig::default`] or, for native test runs and tooling,
//! from environment variables via [`SdkConfig::from_env`]:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `DAEMON_SDK_MAX_VALUE_DEPTH` | `max_value_depth` | 64 |
//! | `DAEMON_SDK_REJECT_TRAILING_BYTES` | `reject_trailing_bytes` | false |
//!
//! # Example
//!
//! ```
//! use daemon_sdk_core::config::SdkConfig;
//!
//! let config = SdkConfig::default().with_max_value_depth(16);
//! assert_eq!(config.max_value_depth, 16);
//! ```

use std::str::FromStr;

pub const ENV_MAX_VALUE_DEPTH: &str = "DAEMON_SDK_MAX_VALUE_DEPTH";
pub const ENV_REJECT_TRAILING_BYTES: &str = "DAEMON_SDK_REJECT_TRAILING_BYTES";

const DEFAULT_MAX_VALUE_DEPTH: usize = 64;

/// Limits applied while decoding host buffers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// Maximum nesting of list/struct/array/tuple values.
    pub max_value_depth: usize,
    /// Fail a collection or value load when bytes remain after it; otherwise warn.
    pub reject_trailing_bytes: bool,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            max_value_depth: DEFAULT_MAX_VALUE_DEPTH,
            reject_trailing_bytes: false,
        }
    }
}

impl SdkConfig {
    /// Build a config from environment variables, falling back to defaults
    /// for unset or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_value_depth: env_var_or(ENV_MAX_VALUE_DEPTH, defaults.max_value_depth),
            reject_trailing_bytes: env_bool_or(
                ENV_REJECT_TRAILING_BYTES,
                defaults.reject_trailing_bytes,
            ),
        }
    }

    /// Builder: set the value nesting limit.
    pub fn with_max_value_depth(mut self, depth: usize) -> Self {
        self.max_value_depth = depth;
        self
    }

    /// Builder: reject trailing bytes after collections and values.
    pub fn rejecting_trailing_bytes(mut self) -> Self {
        self.reject_trailing_bytes = true;
        self
    }
}

fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_bool_or(key: &str, default: bool) -> bool {
    match std::env::var(key).ok() {
        Some(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}
