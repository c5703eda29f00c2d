//! Post domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::AuthorResponse;
use crate::config::{EXCERPT_LENGTH, LISTING_TIMESTAMP_FORMAT};

/// Post domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Hello world")]
    pub title: String,
    #[schema(example = "First post content")]
    pub content: String,
    /// Owner of the post, fixed at creation
    #[schema(example = 1)]
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post together with its owner's public details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PostDetail {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Hello world")]
    pub title: String,
    #[schema(example = "First post content")]
    pub content: String,
    #[schema(example = 1)]
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: AuthorResponse,
}

impl PostDetail {
    pub fn new(post: Post, author: AuthorResponse) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            user_id: post.user_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author,
        }
    }
}

/// Post creation input
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NewPost {
    #[validate(length(
        min = 1,
        max = 255,
        message = "The title field is required and may not be greater than 255 characters."
    ))]
    #[serde(default)]
    #[schema(example = "Hello world", max_length = 255)]
    pub title: String,
    #[validate(length(min = 1, message = "The content field is required."))]
    #[serde(default)]
    #[schema(example = "First post content")]
    pub content: String,
}

/// Partial post update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct PostChanges {
    #[validate(length(
        min = 1,
        max = 255,
        message = "The title field must not be empty and may not be greater than 255 characters."
    ))]
    #[schema(example = "Updated title", max_length = 255)]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "The content field must not be empty."))]
    #[schema(example = "Updated content")]
    pub content: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Listing entry for a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PostSummary {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Hello world")]
    pub title: String,
    /// First 100 characters of the content
    #[schema(example = "First post content")]
    pub excerpt: String,
    /// Owner's display name
    #[schema(example = "John Doe")]
    pub author: String,
    #[schema(example = "2024-01-01 12:00:00")]
    pub created_at: String,
}

impl From<PostDetail> for PostSummary {
    fn from(detail: PostDetail) -> Self {
        Self {
            id: detail.id,
            excerpt: excerpt(&detail.content),
            title: detail.title,
            author: detail.author.name,
            created_at: detail.created_at.format(LISTING_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Truncate content to the excerpt length, counted in characters.
pub fn excerpt(content: &str) -> String {
    content.chars().take(EXCERPT_LENGTH).collect()
}
