//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: SSE_RENDER_, `__` separates nested keys)
//! 2. Current working directory: ./sse-render.toml
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::encoder::NO_CACHE;
use crate::error::Result;

const CONFIG_FILE: &str = "sse-render.toml";
const ENV_PREFIX: &str = "SSE_RENDER_";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Event stream configuration
    #[serde(default)]
    pub sse: SseConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name, used in log output
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

/// Event stream response configuration.
///
/// # Example
///
/// ```toml
/// [sse]
/// cache_control = "no-cache"
/// default_retry_ms = 3000
/// initial_buffer_capacity = 256
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SseConfig {
    /// `Cache-Control` value set when the response has none (default: "no-cache").
    #[serde(default = "default_cache_control")]
    pub cache_control: String,

    /// Retry hint in milliseconds stamped on the first streamed event that
    /// carries none (0 = disabled, default: 0).
    #[serde(default)]
    pub default_retry_ms: u64,

    /// Initial capacity of the per-stream encode buffer (default: 256).
    #[serde(default = "default_initial_buffer_capacity")]
    pub initial_buffer_capacity: usize,
}

impl SseConfig {
    /// Get the default retry as a Duration, or None if disabled.
    #[must_use]
    pub fn default_retry(&self) -> Option<Duration> {
        if self.default_retry_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.default_retry_ms))
        }
    }
}

impl Default for SseConfig {
    fn default() -> Self {
        Self {
            cache_control: default_cache_control(),
            default_retry_ms: 0,
            initial_buffer_capacity: default_initial_buffer_capacity(),
        }
    }
}

impl Config {
    /// Load configuration from `./sse-render.toml` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; defaults and environment variables
    /// still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading configuration from: {}", path.display());
        }

        let config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            // Environment variables have highest priority
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }
}

fn default_service_name() -> String {
    "sse-render".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cache_control() -> String {
    NO_CACHE.to_string()
}

fn default_initial_buffer_capacity() -> usize {
    256
}
