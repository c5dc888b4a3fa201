use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::TokenStore;
use crate::config::Config;

/// Shared application state. The `DatabaseConnection` is a pool handle;
/// each request checks a connection out for the duration of its queries and
/// returns it on every exit path, success or failure.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub tokens: TokenStore,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            tokens: TokenStore::new(),
        }
    }
}
