//! Riverstore Ingestion
//!
//! Ingestion-side components for consuming a hybrid store's version topic:
//! the contracts an ingestion task implements (consumer flow control,
//! replica notifications, task callbacks), the per-partition consumption
//! state it maintains, and the quota enforcement controller embedded in
//! its hot path.
//!
//! ## Quota Enforcement At A Glance
//!
//! ```text
//! consumer worker threads                metadata bus
//!          │ batch byte counts                  │ store snapshot
//!          ▼                                    ▼
//! ┌────────────────────────────────────────────────────┐
//! │           HybridStoreQuotaEnforcer                 │
//! │  usage tracking → quota check → pause / resume     │
//! └───────┬──────────────────┬─────────────────┬───────┘
//!         │                  │                 │
//!         ▼                  ▼                 ▼
//!   StorageEngine      LogConsumer     NotificationDispatcher
//!   (disk sizes)      (pause/resume)    (completion report)
//! ```
//!
//! A partition whose estimated disk usage reaches its share of the store
//! quota is paused on every consumer the task owns; it resumes once the
//! quota is raised, switched to unlimited, or reconciliation shrinks the
//! estimate. See [`quota_enforcer`] for the full behavior.

pub mod consumer;
pub mod consumption_state;
pub mod error;
pub mod notifier;
pub mod quota_enforcer;
pub mod redundant_log;
pub mod stats;
pub mod task;

pub use consumer::LogConsumer;
pub use consumption_state::{
    ConsumptionStateMap, LeaderFollowerState, OffsetRecord, PartitionConsumptionState,
};
pub use error::{IngestionError, Result};
pub use notifier::NotificationDispatcher;
pub use quota_enforcer::HybridStoreQuotaEnforcer;
pub use redundant_log::{RedundantLogConfig, RedundantLogFilter};
pub use stats::IngestionStats;
pub use task::IngestionTask;
