//! Service Container - Centralized service access.
//!
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{AuthService, Authenticator, JwtIssuer, PostManager, PostService};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get post service
    fn posts(&self) -> Arc<dyn PostService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    post_service: Arc<dyn PostService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(auth_service: Arc<dyn AuthService>, post_service: Arc<dyn PostService>) -> Self {
        Self {
            auth_service,
            post_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let tokens = Arc::new(JwtIssuer::new(config));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), tokens));
        let post_service = Arc::new(PostManager::new(uow));

        Self::new(auth_service, post_service)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn posts(&self) -> Arc<dyn PostService> {
        self.post_service.clone()
    }
}
