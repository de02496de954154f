pub mod config;
pub mod item;
pub mod response;
pub mod store;
pub mod types;
pub mod users;
pub mod validation;

use std::sync::Arc;
use store::RecordStore;

/// Shared application state, built once per cold start and handed to every invocation
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub table_name: String,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, table_name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            store,
            table_name: table_name.into(),
        })
    }
}
