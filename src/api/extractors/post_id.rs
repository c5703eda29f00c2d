//! Post id path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

/// `:id` segment of a post route.
///
/// An id that does not parse as an integer cannot name a post, so it is
/// reported as `NotFound` in the usual error format.
#[derive(Debug, Clone, Copy)]
pub struct PostId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Unparseable post id: {}", e);
                AppError::NotFound
            })?;

        Ok(PostId(id))
    }
}
