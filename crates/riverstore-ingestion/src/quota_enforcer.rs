//! Hybrid Store Quota Enforcement
//!
//! Enforces the per-partition disk quota for one version topic of a hybrid
//! store. On every consumed batch the controller folds the batch's byte
//! counts into per-partition usage estimates and compares each estimate
//! against the partition's share of the store quota. A partition over its
//! share is paused on every consumer handle the task owns; once headroom
//! returns (quota raised, usage reconciled downward, or quota switched to
//! unlimited) the partition is resumed.
//!
//! The controller also subscribes to store metadata changes, picking up
//! quota resizes and latching a version-online flag used to short-circuit
//! completion reporting for replicas that hit quota after the version went
//! online elsewhere.
//!
//! ## Pause/Resume Is Deliberately Re-Issued
//!
//! After a process restart the in-memory paused set is empty while the
//! consumers may or may not have retained pause state. Pause and resume
//! are therefore re-issued on every decision instead of being
//! short-circuited against the in-memory set; the consumer contract makes
//! both idempotent, and re-issuing makes the system self-healing without
//! persisting the set.
//!
//! ## Assumptions
//!
//! Partitions of a store are assumed to grow at similar rates. When one
//! partition dominates, it pauses first and stays paused while the others
//! continue; that is observable through the per-partition usage ratio
//! metric and is not an error.

use crate::consumption_state::{
    ConsumptionStateMap, LeaderFollowerState, PartitionConsumptionState,
};
use crate::error::{IngestionError, Result};
use crate::notifier::NotificationDispatcher;
use crate::redundant_log::RedundantLogFilter;
use crate::stats::IngestionStats;
use crate::task::IngestionTask;
use async_trait::async_trait;
use riverstore_metadata::{
    version_topic, MetadataError, StorageQuota, StoreChangeListener, StoreInfo, VersionStatus,
};
use riverstore_storage::{DiskUsageConfig, PartitionDiskUsage, StorageEngine};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Quota enforcement controller for one version topic.
///
/// Owned by its ingestion task; holds the task back as a [`Weak`] handle so
/// the pair does not form a reference cycle. Invoked concurrently from the
/// consumer worker threads (hot path) and the metadata bus; both entry
/// points serialize on one internal lock and observe a consistent snapshot
/// of quota, latch, usage, and paused-set state.
pub struct HybridStoreQuotaEnforcer {
    task: Weak<dyn IngestionTask>,
    storage_engine: Arc<dyn StorageEngine>,
    consumption_states: Arc<ConsumptionStateMap>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    stats: IngestionStats,
    log_filter: Arc<RedundantLogFilter>,
    store_name: String,
    version_topic: String,
    version_number: u64,
    partition_count: u32,
    usage_config: DiskUsageConfig,
    state: Mutex<EnforcerState>,
}

/// Mutable enforcement state, guarded as one unit.
struct EnforcerState {
    store_quota: StorageQuota,
    /// `floor(store quota / partition count)`; 0 and never compared while
    /// the quota is unlimited.
    partition_quota_bytes: u64,
    /// Latched true once the version is observed online; never reset.
    version_online: bool,
    usage_by_partition: HashMap<u32, PartitionDiskUsage>,
    paused_partitions: HashSet<u32>,
}

impl HybridStoreQuotaEnforcer {
    /// Create an enforcer from an initial store snapshot.
    ///
    /// Fails when the version encoded in `version_topic` is absent from the
    /// snapshot, when the topic name does not parse, or when
    /// `partition_count` is zero.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        task: Weak<dyn IngestionTask>,
        storage_engine: Arc<dyn StorageEngine>,
        store: &StoreInfo,
        version_topic: String,
        partition_count: u32,
        consumption_states: Arc<ConsumptionStateMap>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        stats: IngestionStats,
        log_filter: Arc<RedundantLogFilter>,
        usage_config: DiskUsageConfig,
    ) -> Result<Self> {
        if partition_count == 0 {
            return Err(IngestionError::InvalidPartitionCount);
        }
        let version_number = version_topic::parse_version_number(&version_topic)
            .map_err(IngestionError::Metadata)?;
        let version_online = version_is_online(store, version_number)?;
        let store_quota = store.storage_quota;

        Ok(Self {
            task,
            storage_engine,
            consumption_states,
            dispatcher,
            stats,
            log_filter,
            store_name: store.name.clone(),
            version_topic,
            version_number,
            partition_count,
            usage_config,
            state: Mutex::new(EnforcerState {
                store_quota,
                partition_quota_bytes: store_quota.per_partition_bytes(partition_count),
                version_online,
                usage_by_partition: HashMap::new(),
                paused_partitions: HashSet::new(),
            }),
        })
    }

    /// Enforce the partition quota for one consumed batch.
    ///
    /// `batch_bytes` maps each subscribed partition to the total record
    /// bytes consumed from it in this batch. Invoked by every consumer
    /// worker thread; invocations are serialized internally and are
    /// mutually exclusive with metadata updates.
    pub async fn check_partition_quota(&self, batch_bytes: &HashMap<u32, u64>) -> Result<()> {
        let mut state = self.state.lock().await;
        for (&partition, &bytes) in batch_bytes {
            self.enforce_partition_quota(&mut state, partition, bytes)
                .await?;
        }
        Ok(())
    }

    async fn enforce_partition_quota(
        &self,
        state: &mut EnforcerState,
        partition: u32,
        bytes: u64,
    ) -> Result<()> {
        let task = self.task.upgrade().ok_or(IngestionError::TaskShutdown)?;

        let tracker = match state.usage_by_partition.entry(partition) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let tracker = PartitionDiskUsage::new(
                    partition,
                    Arc::clone(&self.storage_engine),
                    self.usage_config.clone(),
                )
                .await?;
                entry.insert(tracker)
            }
        };
        tracker.add(bytes);
        let usage_bytes = tracker.usage().await;

        let pcs = self.consumption_states.get(partition).await;
        let consuming_topic = self.consuming_topic(pcs.as_deref()).await;

        // At most one quota-exceeded log per partition per filter window.
        let identifier = format!("{}_{}_quota_exceeded", consuming_topic, partition);
        let should_log = !self.log_filter.is_redundant(&identifier).await;

        if self.is_quota_exceeded(task.as_ref(), state, usage_bytes, should_log) {
            task.report_quota_violated(partition);
            self.stats.record_quota_violated(&self.store_name);

            // The version may already be online elsewhere while this
            // replica never reported completion. Report it before pausing,
            // or a rebalance of the online version turns the stuck replica
            // into an error replica.
            if state.version_online {
                if let Some(pcs) = pcs.as_deref() {
                    if !pcs.is_completion_reported() {
                        self.dispatcher.report_completed(pcs).await?;
                    }
                }
            }

            self.pause_partition(state, task.as_ref(), partition, &consuming_topic)
                .await?;
            if should_log {
                info!(
                    store = %self.store_name,
                    partition,
                    topic = %consuming_topic,
                    usage_bytes,
                    quota_bytes = state.partition_quota_bytes,
                    "Quota exceeded, paused partition"
                );
            }
        } else {
            task.report_quota_not_violated(partition);
            if state.paused_partitions.contains(&partition) {
                self.resume_partition(state, task.as_ref(), partition, &consuming_topic)
                    .await?;
                info!(
                    store = %self.store_name,
                    partition,
                    topic = %consuming_topic,
                    "Quota available, resumed partition"
                );
            }
        }
        Ok(())
    }

    /// Compare one partition's usage against its quota share and emit the
    /// usage ratio when metrics are enabled.
    fn is_quota_exceeded(
        &self,
        task: &dyn IngestionTask,
        state: &EnforcerState,
        usage_bytes: u64,
        should_log: bool,
    ) -> bool {
        if task.is_metrics_emission_enabled() {
            let ratio = if state.store_quota.is_unlimited() || state.partition_quota_bytes == 0 {
                0.0
            } else {
                usage_bytes as f64 / state.partition_quota_bytes as f64
            };
            self.stats.record_storage_quota_used(&self.store_name, ratio);
        }

        if state.store_quota.is_unlimited() {
            return false;
        }
        // Hitting the quota exactly counts as exceeded.
        if usage_bytes >= state.partition_quota_bytes {
            if should_log {
                warn!(
                    store = %self.store_name,
                    topic = %self.version_topic,
                    usage_bytes,
                    quota_bytes = state.partition_quota_bytes,
                    "Partition usage exceeded the storage quota"
                );
            }
            return true;
        }
        false
    }

    /// Topic the consumer is actually polling for this partition: the
    /// leader topic during a leader handoff, the version topic otherwise.
    async fn consuming_topic(&self, pcs: Option<&PartitionConsumptionState>) -> String {
        if let Some(pcs) = pcs {
            if pcs.leader_state().await == LeaderFollowerState::Leader {
                if let Some(leader_topic) = pcs.offset_record().await.leader_topic {
                    return leader_topic;
                }
            }
        }
        self.version_topic.clone()
    }

    /// Pause one partition on every consumer handle.
    ///
    /// Membership in the paused set is recorded only after every consumer
    /// accepted the command; on failure the next batch re-evaluates and
    /// re-issues.
    async fn pause_partition(
        &self,
        state: &mut EnforcerState,
        task: &dyn IngestionTask,
        partition: u32,
        topic: &str,
    ) -> Result<()> {
        for consumer in task.consumers() {
            consumer.pause(topic, partition).await?;
        }
        state.paused_partitions.insert(partition);
        self.stats.record_partition_paused(&self.store_name);
        Ok(())
    }

    async fn resume_partition(
        &self,
        state: &mut EnforcerState,
        task: &dyn IngestionTask,
        partition: u32,
        topic: &str,
    ) -> Result<()> {
        for consumer in task.consumers() {
            consumer.resume(topic, partition).await?;
        }
        state.paused_partitions.remove(&partition);
        self.stats.record_partition_resumed(&self.store_name);
        Ok(())
    }

    /// Whether this enforcer has paused the given partition.
    pub async fn is_partition_paused(&self, partition: u32) -> bool {
        self.state.lock().await.paused_partitions.contains(&partition)
    }

    /// Whether any partition is currently paused by this enforcer.
    pub async fn has_paused_partitions(&self) -> bool {
        !self.state.lock().await.paused_partitions.is_empty()
    }

    pub async fn store_quota(&self) -> StorageQuota {
        self.state.lock().await.store_quota
    }

    pub async fn partition_quota_bytes(&self) -> u64 {
        self.state.lock().await.partition_quota_bytes
    }

    pub async fn is_version_online(&self) -> bool {
        self.state.lock().await.version_online
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn version_topic(&self) -> &str {
        &self.version_topic
    }
}

#[async_trait]
impl StoreChangeListener for HybridStoreQuotaEnforcer {
    /// Refresh the cached quota and version-online flag from a new store
    /// snapshot. The listener is shared across stores, so snapshots for
    /// other stores are ignored.
    async fn handle_store_changed(&self, store: &StoreInfo) -> riverstore_metadata::Result<()> {
        if store.name != self.store_name {
            return Ok(());
        }
        let mut state = self.state.lock().await;
        // One-way latch: a later non-online status must not undo it.
        if version_is_online(store, self.version_number)? {
            state.version_online = true;
        }
        state.store_quota = store.storage_quota;
        state.partition_quota_bytes = store.storage_quota.per_partition_bytes(self.partition_count);
        Ok(())
    }
}

/// Look up the enforced version in a snapshot and report whether it is
/// online. A snapshot that lost the version is an error.
fn version_is_online(
    store: &StoreInfo,
    version_number: u64,
) -> std::result::Result<bool, MetadataError> {
    let version = store
        .version(version_number)
        .ok_or_else(|| MetadataError::VersionNotFound {
            store: store.name.clone(),
            version: version_number,
        })?;
    Ok(version.status == VersionStatus::Online)
}
