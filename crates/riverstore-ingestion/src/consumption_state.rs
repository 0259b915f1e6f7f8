//! Partition Consumption State
//!
//! Per-partition replica state owned by the ingestion task and shared with
//! components that need a best-effort view of it, such as the quota
//! enforcement controller. Entries are created when a partition is
//! subscribed and removed when it is dropped; readers tolerate a missing
//! entry.
//!
//! ## Leader/Follower Handoff
//!
//! While a partition replica is the leader it may consume a real-time
//! topic instead of the version topic; the currently consumed topic is
//! recorded in the offset record's `leader_topic`. Flow-control commands
//! must be addressed to whichever topic the consumer is actually polling.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Replication role of a partition replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderFollowerState {
    Leader,
    Standby,
    InTransitionFromStandbyToLeader,
}

/// Consumption progress for one partition.
#[derive(Debug, Clone, Default)]
pub struct OffsetRecord {
    /// Last processed offset on the consumed topic.
    pub offset: u64,
    /// Topic the leader is consuming, when it differs from the version topic.
    pub leader_topic: Option<String>,
}

/// Mutable per-partition replica state.
///
/// The completion flag is a one-way latch: once a replica has reported
/// completion for a version it never un-reports it.
pub struct PartitionConsumptionState {
    partition: u32,
    leader_state: RwLock<LeaderFollowerState>,
    offset_record: RwLock<OffsetRecord>,
    completion_reported: AtomicBool,
}

impl PartitionConsumptionState {
    /// Create the state for a freshly subscribed partition.
    pub fn new(partition: u32) -> Self {
        Self {
            partition,
            leader_state: RwLock::new(LeaderFollowerState::Standby),
            offset_record: RwLock::new(OffsetRecord::default()),
            completion_reported: AtomicBool::new(false),
        }
    }

    pub fn partition(&self) -> u32 {
        self.partition
    }

    pub async fn leader_state(&self) -> LeaderFollowerState {
        *self.leader_state.read().await
    }

    pub async fn set_leader_state(&self, state: LeaderFollowerState) {
        *self.leader_state.write().await = state;
    }

    pub async fn offset_record(&self) -> OffsetRecord {
        self.offset_record.read().await.clone()
    }

    pub async fn set_offset_record(&self, record: OffsetRecord) {
        *self.offset_record.write().await = record;
    }

    /// Whether completion has already been reported for this replica.
    pub fn is_completion_reported(&self) -> bool {
        self.completion_reported.load(Ordering::SeqCst)
    }

    /// Latch the completion flag. One-way; there is no reset.
    pub fn mark_completion_reported(&self) {
        self.completion_reported.store(true, Ordering::SeqCst);
    }
}

/// Concurrently-updated `partition -> state` map owned by the ingestion task.
pub struct ConsumptionStateMap {
    states: RwLock<HashMap<u32, Arc<PartitionConsumptionState>>>,
}

impl ConsumptionStateMap {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Track a partition's state, keyed by its partition id.
    pub async fn insert(&self, state: Arc<PartitionConsumptionState>) {
        self.states.write().await.insert(state.partition(), state);
    }

    /// Drop a partition's state when the partition is unsubscribed.
    pub async fn remove(&self, partition: u32) -> Option<Arc<PartitionConsumptionState>> {
        self.states.write().await.remove(&partition)
    }

    pub async fn get(&self, partition: u32) -> Option<Arc<PartitionConsumptionState>> {
        self.states.read().await.get(&partition).cloned()
    }

    pub async fn contains(&self, partition: u32) -> bool {
        self.states.read().await.contains_key(&partition)
    }
}

impl Default for ConsumptionStateMap {
    fn default() -> Self {
        Self::new()
    }
}
