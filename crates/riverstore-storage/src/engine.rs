//! Storage Engine Read Interface
//!
//! The quota enforcement path treats the storage engine as a read-only
//! oracle for "how many bytes does partition N occupy on disk right now".
//! Everything else about the engine (writes, compaction, snapshots) is
//! behind other interfaces and irrelevant here.
//!
//! ## Usage
//!
//! ```ignore
//! use riverstore_storage::{InMemoryStorageEngine, StorageEngine};
//!
//! let engine = InMemoryStorageEngine::new();
//! engine.set_partition_size(0, 1024).await;
//!
//! assert_eq!(engine.partition_size_bytes(0).await?, 1024);
//! ```

use crate::error::{Result, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Read-only view of per-partition disk usage.
///
/// Implementations are externally thread-safe; the same engine handle is
/// shared across consumer worker threads.
#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Current on-disk size of one partition, in bytes.
    ///
    /// Querying a partition the engine has never opened is an error
    /// ([`StorageError::PartitionNotFound`]); a partition that exists but
    /// holds no data reports 0.
    async fn partition_size_bytes(&self, partition: u32) -> Result<u64>;
}

/// Heap-backed storage engine for tests and embedded use.
///
/// Partitions come into existence via [`set_partition_size`] or
/// [`grow_partition`]; unknown partitions report `PartitionNotFound`, the
/// same contract a disk-backed engine has for partitions it never opened.
///
/// [`set_partition_size`]: InMemoryStorageEngine::set_partition_size
/// [`grow_partition`]: InMemoryStorageEngine::grow_partition
pub struct InMemoryStorageEngine {
    sizes: RwLock<HashMap<u32, u64>>,
}

impl InMemoryStorageEngine {
    /// Create an engine with no partitions.
    pub fn new() -> Self {
        Self {
            sizes: RwLock::new(HashMap::new()),
        }
    }

    /// Set the reported size of a partition, creating it if needed.
    pub async fn set_partition_size(&self, partition: u32, bytes: u64) {
        self.sizes.write().await.insert(partition, bytes);
    }

    /// Grow a partition's reported size, creating it at `bytes` if needed.
    pub async fn grow_partition(&self, partition: u32, bytes: u64) {
        let mut sizes = self.sizes.write().await;
        let size = sizes.entry(partition).or_insert(0);
        *size = size.saturating_add(bytes);
    }
}

impl Default for InMemoryStorageEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageEngine for InMemoryStorageEngine {
    async fn partition_size_bytes(&self, partition: u32) -> Result<u64> {
        self.sizes
            .read()
            .await
            .get(&partition)
            .copied()
            .ok_or(StorageError::PartitionNotFound(partition))
    }
}
