//! Ingestion Task Interface
//!
//! The surface of the owning ingestion task that embedded components (the
//! quota enforcement controller in particular) call back into. The task
//! owns those components, so they hold the task as a `Weak` handle: when
//! the task is dropped mid-call, an upgrade failure surfaces as
//! [`IngestionError::TaskShutdown`] instead of keeping the task alive
//! through a reference cycle.
//!
//! [`IngestionError::TaskShutdown`]: crate::error::IngestionError::TaskShutdown

use crate::consumer::LogConsumer;
use std::sync::Arc;

/// Callbacks into the ingestion task that owns the enforcement controller.
pub trait IngestionTask: Send + Sync {
    /// All consumer handles the task currently polls. Flow-control commands
    /// are issued to every one of them.
    fn consumers(&self) -> Vec<Arc<dyn LogConsumer>>;

    /// Whether this task emits metrics.
    fn is_metrics_emission_enabled(&self) -> bool;

    /// Bookkeeping signal: the partition was over quota in this batch.
    /// Fired on every batch, not only on transitions.
    fn report_quota_violated(&self, partition: u32);

    /// Bookkeeping signal: the partition was within quota in this batch.
    fn report_quota_not_violated(&self, partition: u32);
}
