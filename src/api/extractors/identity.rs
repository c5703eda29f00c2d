//! Caller identity extractor.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::CurrentUser;
use crate::errors::{AppError, AppResult};

/// Identity resolved from the `Authorization: Bearer` header.
///
/// Never rejects: a missing header, another scheme or a token that fails
/// verification all resolve to `None`. Protected operations turn `None`
/// into `Unauthorized` themselves.
#[derive(Debug, Clone)]
pub struct Identity(pub Option<CurrentUser>);

impl Identity {
    /// The caller, or `Unauthorized` when no valid token was presented.
    pub fn require(self) -> AppResult<CurrentUser> {
        self.0.ok_or(AppError::Unauthorized)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let user = token.and_then(|token| match state.auth_service.verify_token(token) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("Bearer token rejected: {}", e);
                None
            }
        });

        Ok(Identity(user))
    }
}
