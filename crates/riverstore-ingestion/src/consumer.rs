//! Log Consumer Control Interface
//!
//! The quota enforcement controller does not poll the log itself; it only
//! needs to stop and restart delivery for individual partitions. This trait
//! is that control surface.
//!
//! One ingestion task may own several consumer handles (for example one per
//! upstream region), so pause and resume are always issued to every handle
//! the task holds.

use crate::error::Result;
use async_trait::async_trait;

/// Per-partition flow control on a log consumer.
///
/// Both operations are idempotent and thread-safe: pausing an
/// already-paused partition or resuming a partition that was never paused
/// is a no-op, not an error. Callers rely on this to re-issue commands
/// after a restart wiped their in-memory bookkeeping.
#[async_trait]
pub trait LogConsumer: Send + Sync {
    /// Stop delivering records for `partition` of `topic` without touching
    /// the subscription itself.
    async fn pause(&self, topic: &str, partition: u32) -> Result<()>;

    /// Restart delivery for a previously paused partition.
    async fn resume(&self, topic: &str, partition: u32) -> Result<()>;
}
