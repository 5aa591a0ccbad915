//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the binder.
//!
//! ## Environment Variables
//!
//! ### `BINDER_ENCODE_PARAMS`
//!
//! Whether reverse routing percent-encodes substituted parameter values.
//! Default: `true`.
//!
//! ### `BINDER_TRACE_DISPATCH`
//!
//! Wrap every dispatch of a bound route in an `info` span carrying the route's method,
//! URL, controller and action. Default: `false`.
//!
//! Both accept `1`/`true`/`yes`/`on` and `0`/`false`/`no`/`off` (case-insensitive). Any
//! other value falls back to the default.
//!
//! ## Usage
//!
//! ```rust
//! use controller_binder::runtime_config::BinderConfig;
//!
//! let config = BinderConfig::from_env();
//! println!("encode params: {}", config.encode_params);
//! ```

use std::env;

use tracing::warn;

pub const ENV_ENCODE_PARAMS: &str = "BINDER_ENCODE_PARAMS";
pub const ENV_TRACE_DISPATCH: &str = "BINDER_TRACE_DISPATCH";

/// Binder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderConfig {
    /// Percent-encode parameter values in reverse routing (default: true)
    pub encode_params: bool,
    /// Enter a tracing span around every bound-route dispatch (default: false)
    pub trace_dispatch: bool,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            encode_params: true,
            trace_dispatch: false,
        }
    }
}

impl BinderConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            encode_params: flag(&lookup, ENV_ENCODE_PARAMS, defaults.encode_params),
            trace_dispatch: flag(&lookup, ENV_TRACE_DISPATCH, defaults.trace_dispatch),
        }
    }
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!(key = %key, value = %raw, default, "Unrecognized boolean, using default");
            default
        }
    }
}
