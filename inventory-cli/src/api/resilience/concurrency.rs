//! Concurrency limiter implementation
//!
//! Provides a semaphore-based limiter that bounds how many requests of a
//! batch call are in flight at once. Waiters are served in FIFO order.

use super::config::ConcurrencyConfig;
use anyhow::{Context, Result};
use log::debug;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Permit pool size used when limiting is disabled
const UNLIMITED_PERMITS: usize = 1_000_000;

/// Semaphore-based concurrency limiter for controlling concurrent API requests
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    config: ConcurrencyConfig,
    requests_acquired: Arc<AtomicU64>,
    requests_waited: Arc<AtomicU64>,
    peak_in_use: Arc<AtomicUsize>,
}

impl ConcurrencyLimiter {
    /// Create a new concurrency limiter with the given configuration
    pub fn new(config: ConcurrencyConfig) -> Self {
        let permits = if config.enabled {
            config.max_concurrent_requests.clamp(1, UNLIMITED_PERMITS)
        } else {
            UNLIMITED_PERMITS
        };

        Self {
            semaphore: Arc::new(Semaphore::new(permits)),
            config,
            requests_acquired: Arc::new(AtomicU64::new(0)),
            requests_waited: Arc::new(AtomicU64::new(0)),
            peak_in_use: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Limiter with the given bound and limiting enabled
    pub fn with_limit(max_concurrent_requests: usize) -> Self {
        Self::new(ConcurrencyConfig {
            max_concurrent_requests,
            enabled: true,
        })
    }

    /// Acquire a permit for making a request. Waits if at capacity.
    /// Returns an owned permit that releases automatically when dropped.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit> {
        if !self.config.enabled {
            return self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .context("Concurrency limiter closed");
        }

        if self.semaphore.available_permits() == 0 {
            self.requests_waited.fetch_add(1, Ordering::Relaxed);
            debug!(
                "Concurrency limiter: waiting for permit ({} in use)",
                self.max_concurrent_requests()
            );
        }

        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .context("Concurrency limiter closed")?;
        self.requests_acquired.fetch_add(1, Ordering::Relaxed);

        let in_use = self.max_concurrent_requests() - self.semaphore.available_permits();
        self.peak_in_use.fetch_max(in_use, Ordering::Relaxed);

        debug!(
            "Concurrency limiter: acquired permit ({}/{} in use)",
            in_use,
            self.max_concurrent_requests()
        );

        Ok(permit)
    }

    /// Run `task` once a permit is available, holding the permit until the
    /// task completes.
    pub async fn run<F>(&self, task: F) -> Result<F::Output>
    where
        F: Future,
    {
        let _permit = self.acquire().await?;
        Ok(task.await)
    }

    /// Get the number of available permits (requests that can start immediately)
    pub fn available_permits(&self) -> usize {
        if !self.config.enabled {
            return usize::MAX;
        }
        self.semaphore.available_permits()
    }

    /// Get the maximum number of concurrent HTTP requests
    pub fn max_concurrent_requests(&self) -> usize {
        if !self.config.enabled {
            return UNLIMITED_PERMITS;
        }
        self.config.max_concurrent_requests.clamp(1, UNLIMITED_PERMITS)
    }

    /// Get current statistics
    pub fn stats(&self) -> ConcurrencyStats {
        ConcurrencyStats {
            available_permits: self.available_permits(),
            max_concurrent_requests: self.max_concurrent_requests(),
            requests_acquired: self.requests_acquired.load(Ordering::Relaxed),
            requests_waited: self.requests_waited.load(Ordering::Relaxed),
            peak_in_use: self.peak_in_use.load(Ordering::Relaxed),
            enabled: self.config.enabled,
        }
    }
}

/// Statistics for the concurrency limiter
#[derive(Debug, Clone)]
pub struct ConcurrencyStats {
    /// Number of permits currently available
    pub available_permits: usize,
    /// Maximum concurrent requests allowed
    pub max_concurrent_requests: usize,
    /// Total permits acquired since creation/reset
    pub requests_acquired: u64,
    /// Number of times a request had to wait for a permit
    pub requests_waited: u64,
    /// Highest number of permits held at the same time
    pub peak_in_use: usize,
    /// Whether limiting is enabled
    pub enabled: bool,
}

impl ConcurrencyStats {
    /// Share of acquired permits that had to wait for a free slot
    pub fn wait_rate(&self) -> f64 {
        if self.requests_acquired == 0 {
            0.0
        } else {
            self.requests_waited as f64 / self.requests_acquired as f64
        }
    }
}
