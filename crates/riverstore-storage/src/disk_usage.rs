//! Per-Partition Disk Usage Tracking
//!
//! Asking the storage engine for an exact partition size is too expensive
//! to do on every consumed batch, so usage is tracked as a blend:
//!
//! - a **baseline** sampled from the engine when the tracker is created
//!   (so a process restart does not reset usage to zero), plus
//! - **appended bytes** accumulated from batch size reports.
//!
//! The baseline is re-sampled once `sync_interval` has elapsed, at which
//! point the appended counter resets. Between re-samples the estimate only
//! grows; a re-sample may lower it when the engine compacted data away.
//!
//! ## Usage
//!
//! ```ignore
//! use riverstore_storage::{DiskUsageConfig, PartitionDiskUsage};
//!
//! let mut tracker = PartitionDiskUsage::new(0, engine, DiskUsageConfig::default()).await?;
//! tracker.add(4096);
//! let estimate = tracker.usage().await;
//! ```

use crate::engine::StorageEngine;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Configuration for disk usage tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskUsageConfig {
    /// How long an engine sample stays fresh before the tracker re-samples.
    pub sync_interval: Duration,
}

impl Default for DiskUsageConfig {
    fn default() -> Self {
        Self {
            sync_interval: Duration::from_secs(300),
        }
    }
}

/// Running on-disk byte estimate for a single partition.
pub struct PartitionDiskUsage {
    partition: u32,
    engine: Arc<dyn StorageEngine>,
    config: DiskUsageConfig,
    /// Engine-reported size at the last sample.
    engine_size_bytes: u64,
    /// Bytes reported via `add` since the last sample.
    appended_bytes: u64,
    last_sync: Instant,
}

impl PartitionDiskUsage {
    /// Create a tracker, sampling the engine for the initial baseline.
    ///
    /// A sampling failure here is fatal to the caller: without a baseline
    /// the estimate would silently undercount everything already on disk.
    pub async fn new(
        partition: u32,
        engine: Arc<dyn StorageEngine>,
        config: DiskUsageConfig,
    ) -> Result<Self> {
        let engine_size_bytes = engine.partition_size_bytes(partition).await?;
        Ok(Self {
            partition,
            engine,
            config,
            engine_size_bytes,
            appended_bytes: 0,
            last_sync: Instant::now(),
        })
    }

    /// Record `bytes` consumed into this partition.
    pub fn add(&mut self, bytes: u64) {
        self.appended_bytes = self.appended_bytes.saturating_add(bytes);
    }

    /// Current usage estimate, re-sampling the engine if the baseline is stale.
    ///
    /// A failed re-sample keeps the previous estimate and retries after
    /// another full `sync_interval`; only the creation-time sample is
    /// allowed to fail the caller.
    pub async fn usage(&mut self) -> u64 {
        if self.last_sync.elapsed() >= self.config.sync_interval {
            match self.engine.partition_size_bytes(self.partition).await {
                Ok(size) => {
                    self.engine_size_bytes = size;
                    self.appended_bytes = 0;
                }
                Err(e) => {
                    warn!(
                        partition = self.partition,
                        error = %e,
                        "Disk usage re-sample failed, keeping previous estimate"
                    );
                }
            }
            self.last_sync = Instant::now();
        }
        self.engine_size_bytes.saturating_add(self.appended_bytes)
    }

    /// Partition this tracker accounts for.
    pub fn partition(&self) -> u32 {
        self.partition
    }
}
