//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories so services depend on a single
//! abstraction instead of individual stores.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{PostRepository, PostStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
///
/// For testing, implement it over mock or in-memory repositories.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get post repository
    fn posts(&self) -> Arc<dyn PostRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM
pub struct Persistence {
    user_repo: Arc<UserStore>,
    post_repo: Arc<PostStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let post_repo = Arc::new(PostStore::new(db));
        Self {
            user_repo,
            post_repo,
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.post_repo.clone()
    }
}
