//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, PostService, ServiceContainer, Services};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for the production wiring; `new()` accepts any
/// service implementations.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Post service
    pub post_service: Arc<dyn PostService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            post_service: container.posts(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        post_service: Arc<dyn PostService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            post_service,
            database,
        }
    }
}
