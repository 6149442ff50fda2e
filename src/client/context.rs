use std::sync::Arc;

use tracing::debug;

use crate::{
    config::StoreConfig,
    store::{AdminApi, DataApi, InMemoryStore, InstanceName},
};

/// Session with a store: one admin handle and one data handle
///
/// Every workflow stage borrows the context instead of reaching for
/// global clients. Both handles are closed exactly once, either by
/// `close` or when the context is dropped, so an early `?` return still
/// releases them.
pub struct StoreContext {
    instance: InstanceName,
    admin: Arc<dyn AdminApi>,
    data: Arc<dyn DataApi>,
    closed: bool,
}

impl StoreContext {
    pub fn new(instance: InstanceName, admin: Arc<dyn AdminApi>, data: Arc<dyn DataApi>) -> Self {
        StoreContext {
            instance,
            admin,
            data,
            closed: false,
        }
    }

    /// Context over a fresh `InMemoryStore` for the configured instance
    pub fn in_memory(config: &StoreConfig) -> (Self, InMemoryStore) {
        let store = InMemoryStore::new(config.instance_name());
        let ctx = StoreContext::connect(&store);
        (ctx, store)
    }

    /// Context over an existing `InMemoryStore`
    pub fn connect(store: &InMemoryStore) -> Self {
        StoreContext::new(
            store.instance().clone(),
            Arc::new(store.admin_client()),
            Arc::new(store.data_client()),
        )
    }

    pub fn instance(&self) -> &InstanceName {
        &self.instance
    }

    pub fn admin(&self) -> &dyn AdminApi {
        self.admin.as_ref()
    }

    pub fn data(&self) -> &dyn DataApi {
        self.data.as_ref()
    }

    pub fn table_path(&self, table_id: &str) -> String {
        self.instance.table_path(table_id)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.data.close();
        self.admin.close();
        self.closed = true;
        debug!(instance = %self.instance, "store context closed");
    }
}

impl Drop for StoreContext {
    fn drop(&mut self) {
        self.close();
    }
}
