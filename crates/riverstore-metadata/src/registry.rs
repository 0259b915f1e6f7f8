//! In-Memory Store Registry
//!
//! Holds the current [`StoreInfo`] snapshot per store and fans metadata
//! events out to subscribed [`StoreChangeListener`]s. In a full deployment
//! the registry is refreshed from the control plane; embedded and test
//! setups drive it directly through `register_store` / `update_store`.
//!
//! ## Event Dispatch
//!
//! Every mutation notifies all subscribers, not just those interested in
//! the mutated store; listeners filter by name. A failing listener does not
//! prevent the remaining listeners from being notified, but the first
//! failure is returned to the caller once dispatch is complete.

use crate::error::{MetadataError, Result};
use crate::listener::StoreChangeListener;
use crate::types::StoreInfo;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// Registry of store snapshots with change notification.
pub struct StoreRegistry {
    stores: RwLock<HashMap<String, StoreInfo>>,
    listeners: RwLock<Vec<Arc<dyn StoreChangeListener>>>,
}

#[derive(Clone, Copy)]
enum StoreEvent<'a> {
    Created(&'a StoreInfo),
    Changed(&'a StoreInfo),
    Deleted(&'a str),
}

impl StoreRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Subscribe a listener to all subsequent store events.
    pub async fn subscribe(&self, listener: Arc<dyn StoreChangeListener>) {
        self.listeners.write().await.push(listener);
    }

    /// Get the current snapshot for a store, if registered.
    pub async fn get_store(&self, name: &str) -> Option<StoreInfo> {
        self.stores.read().await.get(name).cloned()
    }

    /// Register a new store and notify subscribers.
    ///
    /// Registering a name that already exists is treated as an update.
    pub async fn register_store(&self, store: StoreInfo) -> Result<()> {
        let existed = {
            let mut stores = self.stores.write().await;
            stores.insert(store.name.clone(), store.clone()).is_some()
        };
        if existed {
            self.dispatch(StoreEvent::Changed(&store)).await
        } else {
            self.dispatch(StoreEvent::Created(&store)).await
        }
    }

    /// Replace the snapshot of an existing store and notify subscribers.
    pub async fn update_store(&self, store: StoreInfo) -> Result<()> {
        {
            let mut stores = self.stores.write().await;
            if !stores.contains_key(&store.name) {
                return Err(MetadataError::StoreNotFound(store.name));
            }
            stores.insert(store.name.clone(), store.clone());
        }
        self.dispatch(StoreEvent::Changed(&store)).await
    }

    /// Remove a store and notify subscribers.
    pub async fn delete_store(&self, name: &str) -> Result<()> {
        {
            let mut stores = self.stores.write().await;
            if stores.remove(name).is_none() {
                return Err(MetadataError::StoreNotFound(name.to_string()));
            }
        }
        self.dispatch(StoreEvent::Deleted(name)).await
    }

    /// Deliver an event to every subscriber.
    ///
    /// All listeners run even if one fails; the first failure is returned.
    async fn dispatch(&self, event: StoreEvent<'_>) -> Result<()> {
        let listeners = self.listeners.read().await.clone();
        let mut first_error = None;
        for listener in &listeners {
            let result = match event {
                StoreEvent::Created(store) => listener.handle_store_created(store).await,
                StoreEvent::Changed(store) => listener.handle_store_changed(store).await,
                StoreEvent::Deleted(name) => listener.handle_store_deleted(name).await,
            };
            if let Err(e) = result {
                warn!(error = %e, "Store change listener failed");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StorageQuota, VersionInfo, VersionStatus};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingListener {
        events: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl StoreChangeListener for RecordingListener {
        async fn handle_store_created(&self, store: &StoreInfo) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("created:{}", store.name));
            Ok(())
        }

        async fn handle_store_deleted(&self, store_name: &str) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("deleted:{}", store_name));
            Ok(())
        }

        async fn handle_store_changed(&self, store: &StoreInfo) -> Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("changed:{}", store.name));
            Ok(())
        }
    }

    struct FailingListener;

    #[async_trait::async_trait]
    impl StoreChangeListener for FailingListener {
        async fn handle_store_changed(&self, store: &StoreInfo) -> Result<()> {
            Err(MetadataError::StoreNotFound(store.name.clone()))
        }
    }

    fn test_store(name: &str, quota: u64) -> StoreInfo {
        StoreInfo {
            name: name.to_string(),
            storage_quota: StorageQuota::Limited(quota),
            partition_count: 4,
            versions: vec![VersionInfo {
                number: 1,
                status: VersionStatus::Online,
            }],
        }
    }

    #[tokio::test]
    async fn test_register_update_delete_fire_events() {
        let registry = StoreRegistry::new();
        let listener = Arc::new(RecordingListener::default());
        registry.subscribe(listener.clone()).await;

        registry.register_store(test_store("orders", 400)).await.unwrap();
        registry.update_store(test_store("orders", 800)).await.unwrap();
        registry.delete_store("orders").await.unwrap();

        let events = listener.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec!["created:orders", "changed:orders", "deleted:orders"]
        );
    }

    #[tokio::test]
    async fn test_update_unknown_store_rejected() {
        let registry = StoreRegistry::new();
        let err = registry.update_store(test_store("ghost", 1)).await;
        assert!(matches!(err, Err(MetadataError::StoreNotFound(_))));
    }

    #[tokio::test]
    async fn test_failing_listener_does_not_starve_others() {
        let registry = StoreRegistry::new();
        let recording = Arc::new(RecordingListener::default());
        registry.subscribe(Arc::new(FailingListener)).await;
        registry.subscribe(recording.clone()).await;

        registry.register_store(test_store("orders", 400)).await.unwrap();
        // Re-register is an update and hits the failing listener's
        // handle_store_changed; the recording listener must still run.
        let err = registry.register_store(test_store("orders", 800)).await;
        assert!(err.is_err());

        let events = recording.events.lock().unwrap().clone();
        assert_eq!(events, vec!["created:orders", "changed:orders"]);
    }

    #[tokio::test]
    async fn test_get_store_returns_latest_snapshot() {
        let registry = StoreRegistry::new();
        registry.register_store(test_store("orders", 400)).await.unwrap();
        registry.update_store(test_store("orders", 800)).await.unwrap();

        let snapshot = registry.get_store("orders").await.unwrap();
        assert_eq!(snapshot.storage_quota, StorageQuota::Limited(800));
        assert!(registry.get_store("ghost").await.is_none());
    }
}
