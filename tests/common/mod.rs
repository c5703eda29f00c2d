//! Shared test fixtures.
//!
//! An in-memory Unit of Work stands in for PostgreSQL so services and the
//! router can be exercised end to end without a database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use blog_api::api::AppState;
use blog_api::config::Config;
use blog_api::domain::{AuthorResponse, CurrentUser, Post, PostDetail, Registration, User};
use blog_api::errors::{AppError, AppResult};
use blog_api::infra::{Database, PostRepository, UnitOfWork, UserRepository};
use blog_api::services::{
    AuthService, Authenticator, JwtIssuer, PostManager, TokenIssuer, TokenResponse,
};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// In-memory repositories
// =============================================================================

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    posts: Mutex<Vec<Post>>,
}

impl MemoryStore {
    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn stored_user(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }

    /// Insert a post with an explicit creation time.
    pub fn insert_post_at(&self, user_id: i64, title: &str, created_at: DateTime<Utc>) -> Post {
        let mut posts = self.posts.lock().unwrap();
        let post = Post {
            id: posts.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            title: title.to_string(),
            content: format!("{} content", title),
            user_id,
            created_at,
            updated_at: created_at,
        };
        posts.push(post.clone());
        post
    }

    fn detail(&self, post: Post) -> AppResult<PostDetail> {
        let users = self.users.lock().unwrap();
        let author = users
            .iter()
            .find(|u| u.id == post.user_id)
            .map(AuthorResponse::from)
            .ok_or_else(|| AppError::internal(format!("Post {} has no author", post.id)))?;
        Ok(PostDetail::new(post, author))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.stored_user(email))
    }

    async fn create(&self, name: String, email: String, password_hash: String) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::conflict("User"));
        }

        let now = Utc::now();
        let user = User {
            id: users.len() as i64 + 1,
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn page(&self, offset: u64, limit: u64) -> AppResult<(Vec<PostDetail>, u64)> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        let total = posts.len() as u64;

        let data = posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|p| self.detail(p))
            .collect::<AppResult<Vec<_>>>()?;

        Ok((data, total))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Post>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_detail(&self, id: i64) -> AppResult<Option<PostDetail>> {
        match self.find_by_id(id).await? {
            Some(post) => self.detail(post).map(Some),
            None => Ok(None),
        }
    }

    async fn create(&self, user_id: i64, title: String, content: String) -> AppResult<Post> {
        let mut posts = self.posts.lock().unwrap();
        let now = Utc::now();
        let post = Post {
            id: posts.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            title,
            content,
            user_id,
            created_at: now,
            updated_at: now,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> AppResult<Post> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(title) = title {
            post.title = title;
        }
        if let Some(content) = content {
            post.content = content;
        }
        post.updated_at = Utc::now();

        Ok(post.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);

        if posts.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

pub struct MemoryUow {
    store: Arc<MemoryStore>,
}

impl MemoryUow {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl UnitOfWork for MemoryUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.store.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.store.clone()
    }
}

// =============================================================================
// Service wiring
// =============================================================================

pub fn test_config() -> Config {
    Config::new("postgres://localhost/blog_api_test", TEST_SECRET).unwrap()
}

pub struct TestServices {
    pub store: Arc<MemoryStore>,
    pub tokens: Arc<JwtIssuer>,
    pub auth: Arc<Authenticator<MemoryUow>>,
    pub posts: Arc<PostManager<MemoryUow>>,
}

impl TestServices {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let uow = Arc::new(MemoryUow::new(store.clone()));
        let tokens = Arc::new(JwtIssuer::new(&test_config()));
        let auth = Arc::new(Authenticator::new(uow.clone(), tokens.clone()));
        let posts = Arc::new(PostManager::new(uow));

        Self {
            store,
            tokens,
            auth,
            posts,
        }
    }

    /// Router state over the in-memory services; the database is never connected.
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.auth.clone(),
            self.posts.clone(),
            Arc::new(Database::from_connection(DatabaseConnection::Disconnected)),
        )
    }

    /// Register a user and resolve the identity carried by the issued token.
    pub async fn register(&self, name: &str, email: &str) -> (TokenResponse, CurrentUser) {
        let token = self
            .auth
            .register(Registration {
                name: name.to_string(),
                email: email.to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        let claims = self.tokens.verify(&token.token).unwrap();

        (token, CurrentUser::from(claims))
    }
}
