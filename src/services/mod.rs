//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach repositories through the Unit of Work.

mod auth_service;
pub mod container;
mod post_service;
mod token_issuer;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, TokenResponse, EMAIL_TAKEN_MESSAGE};
pub use post_service::{PostManager, PostService};
pub use token_issuer::{Claims, IssuedToken, JwtIssuer, TokenIssuer};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use post_service::MockPostService;
#[cfg(any(test, feature = "test-utils"))]
pub use token_issuer::MockTokenIssuer;
