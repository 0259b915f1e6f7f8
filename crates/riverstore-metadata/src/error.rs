//! Metadata Error Types
//!
//! Errors raised by the metadata model: malformed version topics, lookups
//! for versions that are not part of a store snapshot, and registry
//! operations against unknown stores.
//!
//! All metadata operations return `Result<T>` which is aliased to
//! `Result<T, MetadataError>`. This allows clean error propagation with `?`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetadataError>;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Invalid version topic: {0}")]
    InvalidVersionTopic(String),

    #[error("Version {version} doesn't exist in store: {store}")]
    VersionNotFound { store: String, version: u64 },

    #[error("Store not found: {0}")]
    StoreNotFound(String),
}
