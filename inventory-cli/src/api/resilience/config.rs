//! Resilience configuration with builder pattern
//!
//! Concurrency limiting and request timeouts for batch calls against the
//! inventory backend.

use serde::Deserialize;
use std::time::Duration;

/// Default number of requests a single batch call may have in flight
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 5;

/// Resilience settings shared by the HTTP client and the store
#[derive(Debug, Clone, Default)]
pub struct ResilienceConfig {
    pub concurrency: ConcurrencyConfig,
    /// Per-request timeout; `None` lets a hung request hold its slot forever
    pub request_timeout: Option<Duration>,
}

/// Concurrency limiting configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    /// Maximum concurrent HTTP requests issued by one batch call
    pub max_concurrent_requests: usize,
    /// Whether concurrency limiting is enabled
    pub enabled: bool,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            enabled: true,
        }
    }
}

impl ResilienceConfig {
    /// Create a new builder for ResilienceConfig
    pub fn builder() -> ResilienceConfigBuilder {
        ResilienceConfigBuilder::new()
    }
}

/// Builder for ResilienceConfig
#[derive(Debug)]
pub struct ResilienceConfigBuilder {
    config: ResilienceConfig,
}

impl ResilienceConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ResilienceConfig::default(),
        }
    }

    /// Configure concurrency limiting
    pub fn concurrency_config(mut self, concurrency: ConcurrencyConfig) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> ResilienceConfig {
        self.config
    }
}

impl Default for ResilienceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
