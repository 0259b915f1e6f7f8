//! Redundant Log Suppression
//!
//! A partition that sits over its quota trips the same condition on every
//! consumed batch, potentially many times per second. This filter bounds
//! the noise: for a given identifier, `is_redundant` returns `false` at
//! most once per window (default one minute) and `true` for every call in
//! between.
//!
//! The filter is an injected collaborator shared across one ingestion
//! task, not a process-global.
//!
//! ## Usage
//!
//! ```ignore
//! use riverstore_ingestion::RedundantLogFilter;
//!
//! let filter = RedundantLogFilter::with_defaults();
//! if !filter.is_redundant("orders_v3_0_quota_exceeded").await {
//!     tracing::info!("Quota exceeded for partition 0");
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Configuration for the redundant log filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedundantLogConfig {
    /// Suppression window per identifier.
    pub window: Duration,
    /// Identifier count above which expired entries are pruned.
    pub max_tracked: usize,
}

impl Default for RedundantLogConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            max_tracked: 1024,
        }
    }
}

/// Suppresses repeated events per identifier within a time window.
pub struct RedundantLogFilter {
    config: RedundantLogConfig,
    seen: Mutex<HashMap<String, Instant>>,
}

impl RedundantLogFilter {
    /// Create a filter with the given configuration.
    pub fn new(config: RedundantLogConfig) -> Self {
        Self {
            config,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Create a filter with the default one-minute window.
    pub fn with_defaults() -> Self {
        Self::new(RedundantLogConfig::default())
    }

    /// Returns `false` the first time an identifier is seen within its
    /// window and `true` for every repeat until the window expires.
    ///
    /// The tracking map is pruned of expired identifiers once it grows past
    /// `max_tracked`, so memory stays proportional to the number of
    /// identifiers active inside one window.
    pub async fn is_redundant(&self, identifier: &str) -> bool {
        let mut seen = self.seen.lock().await;
        let now = Instant::now();

        if let Some(last) = seen.get(identifier) {
            if now.duration_since(*last) < self.config.window {
                return true;
            }
        }

        if seen.len() >= self.config.max_tracked {
            let window = self.config.window;
            seen.retain(|_, last| now.duration_since(*last) < window);
        }

        seen.insert(identifier.to_string(), now);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_event_passes_repeats_suppressed() {
        let filter = RedundantLogFilter::with_defaults();

        assert!(!filter.is_redundant("p0_quota_exceeded").await);
        assert!(filter.is_redundant("p0_quota_exceeded").await);
        assert!(filter.is_redundant("p0_quota_exceeded").await);
    }

    #[tokio::test]
    async fn test_identifiers_are_independent() {
        let filter = RedundantLogFilter::with_defaults();

        assert!(!filter.is_redundant("p0_quota_exceeded").await);
        assert!(!filter.is_redundant("p1_quota_exceeded").await);
        assert!(filter.is_redundant("p0_quota_exceeded").await);
    }

    #[tokio::test]
    async fn test_window_expiry_reopens_identifier() {
        let filter = RedundantLogFilter::new(RedundantLogConfig {
            window: Duration::from_millis(20),
            max_tracked: 16,
        });

        assert!(!filter.is_redundant("p0").await);
        assert!(filter.is_redundant("p0").await);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(!filter.is_redundant("p0").await);
    }

    #[tokio::test]
    async fn test_expired_entries_pruned_past_threshold() {
        let filter = RedundantLogFilter::new(RedundantLogConfig {
            window: Duration::from_millis(10),
            max_tracked: 4,
        });

        for i in 0..4 {
            assert!(!filter.is_redundant(&format!("id-{}", i)).await);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        // All four entries have expired; the next insert prunes them.
        assert!(!filter.is_redundant("id-new").await);
        assert_eq!(filter.seen.lock().await.len(), 1);
    }
}
