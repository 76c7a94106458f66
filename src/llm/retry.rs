// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Exponential backoff for transient API failures.
//!
//! ```text
//! attempt 0 fails --> sleep base * 1 + jitter
//! attempt 1 fails --> sleep base * 2 + jitter
//! attempt 2 fails --> sleep base * 4 + jitter   (each capped at max_delay)
//! ...
//! permanent error or attempts exhausted --> Err
//! ```
//!
//! Jitter is deterministic (derived from the attempt number) and at most a
//! quarter of the delay.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::config::types::RetryConfig;
use crate::error::AnalysisError;

/// Retry schedule derived from [`RetryConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_secs(config.max_delay_secs),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO)
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after the failed attempt with index `attempt` (0-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let delay_ms = base_ms.saturating_mul(2u64.saturating_pow(attempt));
        let jitter_range = delay_ms / 4;
        let jitter_ms = if jitter_range > 0 {
            (u64::from(attempt) * 7919) % jitter_range
        } else {
            0
        };
        Duration::from_millis(delay_ms.saturating_add(jitter_ms)).min(self.max_delay)
    }

    /// Delay before retrying after `error`.
    ///
    /// A server-sent `Retry-After` wins over the schedule but is still capped
    /// at `max_delay`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32, error: &AnalysisError) -> Duration {
        error
            .retry_after()
            .map_or_else(|| self.delay_for(attempt), |wait| wait.min(self.max_delay))
    }

    /// Run `operation` until it succeeds, fails permanently, or attempts run out.
    ///
    /// # Errors
    ///
    /// Returns the last error seen.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, AnalysisError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AnalysisError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt + 1 < self.max_attempts => {
                    let delay = self.delay_after(attempt, &e);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "transient API failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
