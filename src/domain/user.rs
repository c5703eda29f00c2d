//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration input, validated by the auth service before any write.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct Registration {
    /// Display name
    #[validate(length(
        min = 1,
        max = 255,
        message = "The name field is required and may not be greater than 255 characters."
    ))]
    #[serde(default)]
    #[schema(example = "John Doe", max_length = 255)]
    pub name: String,
    /// Email address, unique across users
    #[validate(
        email(message = "The email must be a valid email address."),
        length(
            max = 255,
            message = "The email may not be greater than 255 characters."
        )
    )]
    #[serde(default)]
    #[schema(example = "user@example.com", max_length = 255)]
    pub email: String,
    /// Plain password (minimum 6 characters)
    #[validate(length(min = 6, message = "The password must be at least 6 characters."))]
    #[serde(default)]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
}

/// Login input. Not validated: any mismatch is reported as invalid credentials.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct Credentials {
    /// Email address
    #[serde(default)]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Plain password
    #[serde(default)]
    #[schema(example = "secret123")]
    pub password: String,
}

/// Public view of a user, as embedded in post details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John Doe")]
    pub name: String,
}

impl From<&User> for AuthorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}
