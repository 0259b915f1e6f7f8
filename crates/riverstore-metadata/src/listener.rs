//! Store Change Listener Contract
//!
//! Components that cache store metadata (quota values, version status)
//! implement this trait and subscribe to a [`StoreRegistry`] to be told when
//! a snapshot changes. A single listener instance is typically shared across
//! stores, so implementations filter on `store.name` themselves.
//!
//! [`StoreRegistry`]: crate::registry::StoreRegistry

use crate::error::Result;
use crate::types::StoreInfo;
use async_trait::async_trait;

/// Callback interface for store metadata changes.
///
/// `handle_store_created` and `handle_store_deleted` default to no-ops;
/// most subscribers only care about changes to a store they already track.
#[async_trait]
pub trait StoreChangeListener: Send + Sync {
    /// A store was registered for the first time.
    async fn handle_store_created(&self, _store: &StoreInfo) -> Result<()> {
        Ok(())
    }

    /// A store was removed.
    async fn handle_store_deleted(&self, _store_name: &str) -> Result<()> {
        Ok(())
    }

    /// A store's snapshot changed (quota resize, version transition, ...).
    async fn handle_store_changed(&self, store: &StoreInfo) -> Result<()>;
}
