//! Request hardening features
//!
//! Provides concurrency limiting and timeout settings for batch calls against
//! the inventory backend.

pub mod concurrency;
pub mod config;

pub use concurrency::{ConcurrencyLimiter, ConcurrencyStats};
pub use config::{ConcurrencyConfig, DEFAULT_MAX_CONCURRENT_REQUESTS, ResilienceConfig};
