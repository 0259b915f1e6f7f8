//! Storage Error Types
//!
//! Errors surfaced by storage-engine reads. The quota enforcement path only
//! ever reads from the engine (per-partition byte sizes); write-side errors
//! belong to the engine implementation itself.
//!
//! All storage operations return `Result<T>` which is aliased to
//! `Result<T, StorageError>`. This allows clean error propagation with `?`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Partition not found: {0}")]
    PartitionNotFound(u32),

    #[error("Storage engine error: {0}")]
    Engine(String),
}
