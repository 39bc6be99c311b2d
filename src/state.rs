use std::sync::Arc;

use crate::database::ProductStore;

/// Shared handler state: the store and the token secret, both read-only
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
        }
    }
}
