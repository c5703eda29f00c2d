//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{PageQuery, Paginated, PostPage};
pub use response::{Created, MessageResponse};
