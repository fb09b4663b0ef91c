//! Application state.

use std::sync::Arc;

use cadastro_core::{EntitySchema, Store};

/// Shared application state
pub struct AppState {
    /// Entity served by this process
    pub schema: &'static EntitySchema,
    /// Record store accessor
    pub store: Store,
}

impl AppState {
    /// Create new application state around a store
    pub fn new(store: Store) -> Arc<Self> {
        Arc::new(Self {
            schema: store.schema(),
            store,
        })
    }
}
