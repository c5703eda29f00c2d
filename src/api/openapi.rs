//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, post_handler};
use crate::domain::{
    AuthorResponse, Credentials, NewPost, Post, PostChanges, PostDetail, PostSummary,
    Registration,
};
use crate::services::TokenResponse;
use crate::types::{MessageResponse, PostPage};

/// OpenAPI documentation for the Blog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        version = "0.1.0",
        description = "Blog backend with bearer token authentication and owner-scoped posts",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Post endpoints
        post_handler::list_posts,
        post_handler::create_post,
        post_handler::show_post,
        post_handler::update_post,
        post_handler::destroy_post,
    ),
    components(
        schemas(
            // Auth types
            Registration,
            Credentials,
            TokenResponse,
            // Post types
            Post,
            PostDetail,
            PostSummary,
            PostPage,
            NewPost,
            PostChanges,
            AuthorResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Posts", description = "Post listing and owner-scoped editing")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token obtained from /register or /login"))
                        .build(),
                ),
            );
        }
    }
}
