//! Post handlers.
//!
//! Reads are public. Writes resolve the caller through [`Identity`] first:
//! an anonymous request is rejected with `Unauthorized` before its path or
//! body is looked at. Ownership and field validation stay in the post service.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{Identity, JsonBody, PostId};
use crate::api::AppState;
use crate::config::POST_DELETED_MESSAGE;
use crate::domain::{NewPost, Post, PostChanges, PostDetail};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, MessageResponse, PageQuery, PostPage};

/// Create post routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/:id",
            get(show_post)
                .put(update_post)
                .patch(update_post)
                .delete(destroy_post),
        )
}

/// List posts, newest first
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of post summaries", body = PostPage)
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PostPage>> {
    let page = state.post_service.list(query.number()).await?;
    Ok(Json(page))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    request_body = NewPost,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Malformed JSON body"),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_post(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<JsonBody<NewPost>, AppError>,
) -> AppResult<Created<Post>> {
    let actor = identity.require()?;
    let JsonBody(payload) = body?;

    let post = state.post_service.create(Some(actor), payload).await?;
    Ok(Created(post))
}

/// Get a post with its author
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = PostDetail),
        (status = 404, description = "Post not found or id is not an integer")
    )
)]
pub async fn show_post(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> AppResult<Json<PostDetail>> {
    let post = state.post_service.show(id).await?;
    Ok(Json(post))
}

/// Update a post (owner only)
///
/// Serves both PUT and PATCH; absent fields are left unchanged.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = PostChanges,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the post"),
        (status = 404, description = "Post not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_post(
    State(state): State<AppState>,
    identity: Identity,
    id: Result<PostId, AppError>,
    body: Result<JsonBody<PostChanges>, AppError>,
) -> AppResult<Json<Post>> {
    let actor = identity.require()?;
    let PostId(id) = id?;
    let JsonBody(changes) = body?;

    let post = state.post_service.update(Some(actor), id, changes).await?;
    Ok(Json(post))
}

/// Delete a post (owner only)
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the post"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn destroy_post(
    State(state): State<AppState>,
    identity: Identity,
    id: Result<PostId, AppError>,
) -> AppResult<Json<MessageResponse>> {
    let actor = identity.require()?;
    let PostId(id) = id?;

    state.post_service.destroy(Some(actor), id).await?;
    Ok(Json(MessageResponse::new(POST_DELETED_MESSAGE)))
}
