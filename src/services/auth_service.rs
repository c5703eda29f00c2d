//! Authentication service - Handles registration, login and token checks.
//!
//! DDD: Uses domain Password value object for hashing.
//! DDD: Uses Unit of Work for repository access.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use super::token_issuer::{IssuedToken, TokenIssuer};
use crate::config::{AUTH_STATUS_SUCCESS, TOKEN_TYPE_BEARER};
use crate::domain::{Credentials, CurrentUser, Password, Registration, User};
use crate::errors::{AppError, AppResult, FieldErrors};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Message attached to the email field when the address is already registered
pub const EMAIL_TAKEN_MESSAGE: &str = "The email has already been taken.";

/// Hash verified for unknown emails so both login failure paths cost the same
static DUMMY_PASSWORD: Lazy<Password> = Lazy::new(|| {
    Password::new("dummy-password-for-timing")
        .unwrap_or_else(|_| Password::from_hash(String::new()))
});

/// Token response returned after successful registration or login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Bearer token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// Always "success"
    #[schema(example = "success")]
    pub status: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            status: AUTH_STATUS_SUCCESS.to_string(),
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: issued.expires_in,
        }
    }
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and issue a token
    async fn register(&self, input: Registration) -> AppResult<TokenResponse>;

    /// Check credentials and issue a token
    async fn login(&self, credentials: Credentials) -> AppResult<TokenResponse>;

    /// Resolve the user a bearer token was issued to
    fn verify_token(&self, token: &str) -> AppResult<CurrentUser>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<dyn TokenIssuer>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { uow, tokens }
    }

    fn issue(&self, user: &User) -> AppResult<TokenResponse> {
        self.tokens.issue(user).map(TokenResponse::from)
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, input: Registration) -> AppResult<TokenResponse> {
        let mut errors = match input.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        // Uniqueness is part of validation so it is reported with the other fields
        if self.uow.users().find_by_email(&input.email).await?.is_some() {
            errors.add("email", EMAIL_TAKEN_MESSAGE);
        }
        errors.into_result()?;

        let password_hash = Password::new(&input.password)?.into_string();
        let user = self
            .uow
            .users()
            .create(input.name, input.email, password_hash)
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration
                AppError::Conflict(_) => AppError::validation("email", EMAIL_TAKEN_MESSAGE),
                other => other,
            })?;

        tracing::info!(user_id = user.id, "User registered");
        self.issue(&user)
    }

    async fn login(&self, credentials: Credentials) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(&credentials.email).await?;

        // Verify even when the user is unknown so timing does not reveal
        // which emails are registered.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => DUMMY_PASSWORD.clone(),
        };
        let password_valid = stored.verify(&credentials.password);

        match user {
            Some(user) if password_valid => {
                tracing::debug!(user_id = user.id, "User logged in");
                self.issue(&user)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<CurrentUser> {
        self.tokens.verify(token).map(CurrentUser::from)
    }
}
