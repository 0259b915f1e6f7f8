//! Ingestion Error Types
//!
//! Errors on the ingestion path. The quota enforcement controller recovers
//! nothing locally: metadata, storage, consumer-control, and report errors
//! all surface to the caller, which decides whether to fail the ingestion
//! task or carry on and re-evaluate on the next batch.

use riverstore_metadata::MetadataError;
use riverstore_storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestionError>;

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Ingestion task has shut down")]
    TaskShutdown,

    #[error("Partition count must be positive")]
    InvalidPartitionCount,

    #[error("Consumer control error: {0}")]
    ConsumerControl(String),

    #[error("Report error: {0}")]
    Report(String),
}
