//! Riverstore Storage
//!
//! Storage-side interfaces consumed by the ingestion path. This crate does
//! not implement a storage engine; it defines the read-only seam the quota
//! enforcement controller needs (per-partition disk size) and the usage
//! tracker built on top of it.
//!
//! ## Main Components
//!
//! ### StorageEngine
//! Read-only per-partition byte-size query, implemented by whatever engine
//! actually holds the data. [`InMemoryStorageEngine`] is the heap-backed
//! implementation used in tests and embedded setups.
//!
//! ### PartitionDiskUsage
//! Blends a periodically re-sampled engine baseline with cheap incremental
//! byte reports, so the hot path never waits on an exact size computation.

pub mod disk_usage;
pub mod engine;
pub mod error;

pub use disk_usage::{DiskUsageConfig, PartitionDiskUsage};
pub use engine::{InMemoryStorageEngine, StorageEngine};
pub use error::{Result, StorageError};
