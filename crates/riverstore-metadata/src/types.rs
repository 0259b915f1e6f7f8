//! Metadata Type Definitions
//!
//! This module defines the store and version metadata handed to ingestion
//! components as immutable snapshots.
//!
//! ## Types Overview
//!
//! ### StoreInfo
//! A point-in-time snapshot of one store: its storage quota, partition
//! count, and the versions it currently carries. Snapshots are cheap to
//! clone and are re-delivered in full on every metadata change.
//!
//! ### VersionInfo
//! One version of a store. A bulk push creates a new version in `Started`
//! status; it moves to `Online` once enough replicas have caught up, and to
//! `Error` or `Killed` if the push fails or is aborted.
//!
//! ### StorageQuota
//! The on-disk byte budget for a store, or `Unlimited` when enforcement is
//! disabled. Modeled as an enum rather than a sentinel integer so the
//! unlimited case cannot be compared by accident.
//!
//! ## Design Decisions
//!
//! - All types are Serialize/Deserialize for storage and API responses
//! - Snapshots own their data (no borrowed fields) so they can cross task
//!   boundaries freely

use serde::{Deserialize, Serialize};

/// Storage quota for a store: a byte budget, or unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageQuota {
    /// Enforcement disabled; no partition is ever paused for this store.
    Unlimited,
    /// Total on-disk byte budget across all partitions of the store.
    Limited(u64),
}

impl StorageQuota {
    /// Returns true when enforcement is disabled.
    pub fn is_unlimited(&self) -> bool {
        matches!(self, StorageQuota::Unlimited)
    }

    /// Per-partition share of the store budget: `floor(bytes / partition_count)`.
    ///
    /// Returns 0 for `Unlimited`; the value is meaningless in that case and
    /// callers must short-circuit on `is_unlimited` before comparing.
    /// `partition_count` must be non-zero.
    pub fn per_partition_bytes(&self, partition_count: u32) -> u64 {
        match self {
            StorageQuota::Unlimited => 0,
            StorageQuota::Limited(bytes) => bytes / u64::from(partition_count),
        }
    }
}

/// Lifecycle status of a store version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionStatus {
    /// Push started, replicas still catching up.
    Started,
    /// Bulk data fully produced, not yet serving.
    Pushed,
    /// Serving reads; the terminal status for a healthy push.
    Online,
    /// Push failed.
    Error,
    /// Push aborted by an operator.
    Killed,
}

/// One version of a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub number: u64,
    pub status: VersionStatus,
}

/// Point-in-time snapshot of a store's metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    pub name: String,
    pub storage_quota: StorageQuota,
    pub partition_count: u32,
    pub versions: Vec<VersionInfo>,
}

impl StoreInfo {
    /// Look up a version by number.
    pub fn version(&self, number: u64) -> Option<&VersionInfo> {
        self.versions.iter().find(|v| v.number == number)
    }
}
