//! Shared handler state

use std::sync::Arc;

use fw_services::RecordStore;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }
}
