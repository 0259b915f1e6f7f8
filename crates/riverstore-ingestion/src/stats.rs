//! Ingestion Metrics
//!
//! Prometheus metrics for the quota enforcement path. Metrics are process
//! globals registered on the crate's `REGISTRY`; [`IngestionStats`] is the
//! thin, cloneable handle an ingestion task injects into components, so
//! recording stays an explicit collaborator rather than a hidden global.

use lazy_static::lazy_static;
use prometheus::{GaugeVec, IntCounterVec, Opts, Registry};
use std::sync::Once;

static INIT: Once = Once::new();

lazy_static! {
    /// Global Prometheus metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Ratio of a partition's disk usage to its per-partition quota
    pub static ref STORAGE_QUOTA_USED_RATIO: GaugeVec = GaugeVec::new(
        Opts::new(
            "riverstore_storage_quota_used_ratio",
            "Ratio of partition disk usage to the per-partition quota"
        ),
        &["store"]
    ).expect("metric can be created");

    /// Quota-exceeded decisions
    pub static ref QUOTA_VIOLATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "riverstore_quota_violations_total",
            "Batches that found a partition over its storage quota"
        ),
        &["store"]
    ).expect("metric can be created");

    /// Pause commands issued to consumers
    pub static ref PARTITIONS_PAUSED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "riverstore_partitions_paused_total",
            "Pause commands issued to log consumers"
        ),
        &["store"]
    ).expect("metric can be created");

    /// Resume commands issued to consumers
    pub static ref PARTITIONS_RESUMED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "riverstore_partitions_resumed_total",
            "Resume commands issued to log consumers"
        ),
        &["store"]
    ).expect("metric can be created");
}

/// Register all ingestion metrics on the global registry. Idempotent.
pub fn init() {
    INIT.call_once(|| {
        REGISTRY
            .register(Box::new(STORAGE_QUOTA_USED_RATIO.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(QUOTA_VIOLATIONS_TOTAL.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(PARTITIONS_PAUSED_TOTAL.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(PARTITIONS_RESUMED_TOTAL.clone()))
            .expect("collector can be registered");
    });
}

/// Handle for recording ingestion metrics, injected per task.
#[derive(Clone, Default)]
pub struct IngestionStats;

impl IngestionStats {
    pub fn new() -> Self {
        init();
        Self
    }

    /// Record the usage/quota ratio observed for a store's partition.
    pub fn record_storage_quota_used(&self, store: &str, ratio: f64) {
        STORAGE_QUOTA_USED_RATIO.with_label_values(&[store]).set(ratio);
    }

    pub fn record_quota_violated(&self, store: &str) {
        QUOTA_VIOLATIONS_TOTAL.with_label_values(&[store]).inc();
    }

    pub fn record_partition_paused(&self, store: &str) {
        PARTITIONS_PAUSED_TOTAL.with_label_values(&[store]).inc();
    }

    pub fn record_partition_resumed(&self, store: &str) {
        PARTITIONS_RESUMED_TOTAL.with_label_values(&[store]).inc();
    }
}
