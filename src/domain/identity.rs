//! Resolved caller identity.

use super::Post;

/// Authenticated user resolved from a verified bearer token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl CurrentUser {
    /// Whether this user is the owner of the post.
    pub fn owns(&self, post: &Post) -> bool {
        post.user_id == self.id
    }
}
