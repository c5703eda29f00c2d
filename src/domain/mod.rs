//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! Contains: Entities, Value Objects, input DTOs with their validation rules.

pub mod identity;
pub mod password;
pub mod post;
pub mod user;

pub use identity::CurrentUser;
pub use password::Password;
pub use post::{NewPost, Post, PostChanges, PostDetail, PostSummary};
pub use user::{AuthorResponse, Credentials, Registration, User};
