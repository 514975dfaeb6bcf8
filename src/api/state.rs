//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UserRepository, UserStore};
use crate::services::{AccountService, Accounts, SessionTokens};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account service
    pub accounts: Arc<dyn AccountService>,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Arc<Vec<String>>,
}

impl AppState {
    /// Wire the SeaORM store and the token issuer from configuration.
    pub fn from_config(database: &Database, config: &Config) -> Self {
        let store: Arc<dyn UserRepository> = Arc::new(UserStore::new(database.get_connection()));
        Self::with_store(store, config)
    }

    /// Build state around any account store (used by tests with an in-memory store).
    pub fn with_store(store: Arc<dyn UserRepository>, config: &Config) -> Self {
        let accounts = Arc::new(Accounts::new(store, SessionTokens::from_config(config)));
        Self::new(accounts, config.cors_origins.clone())
    }

    /// Create new application state with a manually injected service.
    pub fn new(accounts: Arc<dyn AccountService>, cors_origins: Vec<String>) -> Self {
        Self {
            accounts,
            cors_origins: Arc::new(cors_origins),
        }
    }
}
