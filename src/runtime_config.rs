//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router's ambient behaviour.
//! Route matching semantics are not configurable; only logging is.
//!
//! ## Environment Variables
//!
//! ### `RADIX_SLOW_LOOKUP_US`
//!
//! Lookups through [`Router::lookup`](crate::router::Router::lookup) that take
//! longer than this many microseconds are logged at `warn`.
//!
//! Default: `1000` (1 ms)
//!
//! ### `RADIX_LOG_FORMAT`
//!
//! `json` for production, `pretty` for development.
//!
//! Default: `json`
//!
//! ## Usage
//!
//! ```rust
//! use radix_dispatch::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow lookup threshold: {:?}", config.slow_lookup);
//! ```

use std::env;
use std::time::Duration;

use crate::logging::LogFormat;

const DEFAULT_SLOW_LOOKUP_US: u64 = 1000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Threshold above which a lookup is reported as slow
    pub slow_lookup: Duration,
    pub log_format: LogFormat,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_lookup: Duration::from_micros(DEFAULT_SLOW_LOOKUP_US),
            log_format: LogFormat::Json,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let slow_lookup_us = get("RADIX_SLOW_LOOKUP_US")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_SLOW_LOOKUP_US);
        let log_format = get("RADIX_LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(LogFormat::Json);

        RuntimeConfig {
            slow_lookup: Duration::from_micros(slow_lookup_us),
            log_format,
        }
    }
}
