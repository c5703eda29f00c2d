//! Custom request extractors.

mod identity;
mod json_body;
mod post_id;

pub use identity::Identity;
pub use json_body::JsonBody;
pub use post_id::PostId;
