//! Ingestion Notification Interface
//!
//! One-shot signals about a replica's ingestion progress, delivered to
//! whatever coordination layer tracks replica readiness (push monitor,
//! cluster manager, ...).

use crate::consumption_state::PartitionConsumptionState;
use crate::error::Result;
use async_trait::async_trait;

/// Dispatches replica lifecycle notifications.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Report that a partition replica reached the terminal ingestion
    /// condition for the current version.
    ///
    /// Implementations mark the state's completion latch once the signal
    /// is delivered, so callers checking `is_completion_reported` do not
    /// report twice.
    async fn report_completed(&self, state: &PartitionConsumptionState) -> Result<()>;
}
