//! Shared application state for all routes. The store is the only long-lived resource.

use crate::store::NewsStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NewsStore>,
}

impl AppState {
    pub fn new<S: NewsStore + 'static>(store: S) -> Self {
        AppState { store: Arc::new(store) }
    }
}
