//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::domain::{Credentials, Registration};
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::Created;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = Registration,
    responses(
        (status = 201, description = "User registered, token issued", body = TokenResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Validation error, including an email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Registration>,
) -> AppResult<Created<TokenResponse>> {
    let token = state.auth_service.register(payload).await?;
    Ok(Created(token))
}

/// Login and get a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Credentials>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth_service.login(payload).await?;
    Ok(Json(token))
}
