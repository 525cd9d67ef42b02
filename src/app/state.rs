use std::sync::Arc;

use crate::app::store::ClienteStore;

/// Router state. Cloned per request; the store behind it is shared.
#[derive(Clone)]
pub struct AppState {
    pub service_name: Arc<str>,
    pub store: Arc<dyn ClienteStore>,
}

impl AppState {
    pub fn new(service_name: &str, store: Arc<dyn ClienteStore>) -> Self {
        AppState {
            service_name: Arc::from(service_name),
            store,
        }
    }
}
