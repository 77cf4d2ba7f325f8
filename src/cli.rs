//! CLI mode implementation
//!
//! Provides command-line interface for the ghostpost tools. The same
//! argument structs feed clap in CLI mode and schemars for the MCP tool
//! schemas.

use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ghostpost CLI
#[derive(Parser)]
#[command(name = "ghostpost")]
#[command(about = "Ghost CMS post management utility", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new post
    CreatePost(CreatePostArgs),
    /// List posts
    ListPosts(ListPostsArgs),
    /// Edit an existing post
    EditPost(EditPostArgs),
    /// Diagnose API connectivity and credentials
    DebugApiConnection(DebugArgs),
}

fn default_create_status() -> String {
    "draft".to_string()
}

fn default_list_status() -> String {
    "all".to_string()
}

fn default_list_limit() -> u32 {
    10
}

/// create_post tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct CreatePostArgs {
    /// The title of the post
    #[arg(short = 't', long)]
    #[schemars(description = "The title of the post")]
    pub title: String,

    /// The content/body of the post in HTML format
    #[arg(short = 'c', long)]
    #[schemars(description = "The content/body of the post in HTML format")]
    pub content: String,

    /// Post status (draft, published, scheduled)
    #[arg(short = 's', long, default_value = "draft")]
    #[serde(default = "default_create_status")]
    #[schemars(description = "Post status (draft, published, scheduled)")]
    pub status: String,

    /// Optional tags to associate with the post
    #[arg(long, value_delimiter = ',')]
    #[schemars(description = "Optional list of tags to associate with the post")]
    pub tags: Option<Vec<String>>,
}

/// list_posts tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct ListPostsArgs {
    /// Maximum number of posts to retrieve
    #[arg(short = 'l', long, default_value_t = 10)]
    #[serde(default = "default_list_limit")]
    #[schemars(description = "Maximum number of posts to retrieve (default: 10)")]
    pub limit: u32,

    /// Filter by post status (all, draft, published, scheduled)
    #[arg(short = 's', long, default_value = "all")]
    #[serde(default = "default_list_status")]
    #[schemars(description = "Filter by post status (all, draft, published, scheduled)")]
    pub status: String,
}

/// edit_post tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct EditPostArgs {
    /// The ID of the post to edit
    #[arg(short = 'i', long)]
    #[schemars(description = "The ID of the post to edit")]
    pub post_id: String,

    /// New title for the post
    #[arg(short = 't', long)]
    #[schemars(description = "New title for the post (optional)")]
    pub title: Option<String>,

    /// New content/body for the post in HTML format
    #[arg(short = 'c', long)]
    #[schemars(description = "New content/body for the post in HTML format (optional)")]
    pub content: Option<String>,

    /// New post status (draft, published, scheduled)
    #[arg(short = 's', long)]
    #[schemars(description = "New post status (draft, published, scheduled) (optional)")]
    pub status: Option<String>,

    /// New list of tags to associate with the post
    #[arg(long, value_delimiter = ',')]
    #[schemars(description = "New list of tags to associate with the post (optional)")]
    pub tags: Option<Vec<String>>,
}

/// debug_api_connection tool arguments (none)
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct DebugArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_args_defaults() {
        let args: CreatePostArgs = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "content": "<p>hi</p>"
        }))
        .unwrap();
        assert_eq!(args.status, "draft");
        assert!(args.tags.is_none());
    }

    #[test]
    fn test_list_posts_args_defaults() {
        let args: ListPostsArgs = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(args.limit, 10);
        assert_eq!(args.status, "all");
    }

    #[test]
    fn test_edit_post_args_optional_fields() {
        let args: EditPostArgs = serde_json::from_value(serde_json::json!({
            "post_id": "64f1a2b3c4d5e6f7a8b9c0d1",
            "status": "published"
        }))
        .unwrap();
        assert_eq!(args.post_id, "64f1a2b3c4d5e6f7a8b9c0d1");
        assert!(args.title.is_none());
        assert!(args.content.is_none());
        assert_eq!(args.status.as_deref(), Some("published"));
        assert!(args.tags.is_none());
    }

    #[test]
    fn test_cli_parses_create_post() {
        let cli = Cli::parse_from([
            "ghostpost",
            "create-post",
            "--title",
            "Hello",
            "--content",
            "<p>hi</p>",
            "--tags",
            "news,updates",
        ]);
        match cli.command {
            Some(Commands::CreatePost(args)) => {
                assert_eq!(args.title, "Hello");
                assert_eq!(args.status, "draft");
                assert_eq!(
                    args.tags,
                    Some(vec!["news".to_string(), "updates".to_string()])
                );
            }
            _ => panic!("expected create-post subcommand"),
        }
    }
}
