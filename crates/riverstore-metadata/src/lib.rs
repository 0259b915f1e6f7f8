//! Riverstore Metadata
//!
//! This crate defines the metadata model shared by riverstore's ingestion
//! components: store snapshots, version lifecycle, the version-topic naming
//! scheme, and the change-notification machinery that keeps long-lived
//! components in sync with quota resizes and version transitions.
//!
//! ## What Lives Here?
//!
//! - **Store snapshots** ([`StoreInfo`], [`VersionInfo`], [`StorageQuota`]):
//!   immutable, cloneable views of one store's configuration
//! - **Version topic codec** ([`version_topic`]): `{store}_v{N}` naming
//! - **Change notification** ([`StoreChangeListener`], [`StoreRegistry`]):
//!   subscribers are told when a store's snapshot changes
//!
//! ## Usage
//!
//! ```ignore
//! use riverstore_metadata::{StoreRegistry, StoreChangeListener};
//!
//! let registry = StoreRegistry::new();
//! registry.subscribe(enforcer.clone()).await;
//!
//! // Control plane pushes a quota resize:
//! registry.update_store(resized_snapshot).await?;
//! ```

pub mod error;
pub mod listener;
pub mod registry;
pub mod types;
pub mod version_topic;

pub use error::{MetadataError, Result};
pub use listener::StoreChangeListener;
pub use registry::StoreRegistry;
pub use types::{StorageQuota, StoreInfo, VersionInfo, VersionStatus};
