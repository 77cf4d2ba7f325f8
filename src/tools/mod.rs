//! MCP tools implementation

pub mod create_post;
pub mod debug;
pub mod edit_post;
pub mod list_posts;
