//! list_posts tool implementation
//!
//! Implements the `list_posts(limit, status)` MCP tool

use crate::cli::ListPostsArgs;
use crate::config::Config;
use crate::error::AppError;
use crate::ghost::types::{decode_posts, ListedPost};
use crate::ghost::{Endpoint, GhostClient};
use crate::mcp::{McpResponse, ToolResult};
use serde_json::Value;
use tokio::time::{timeout, Duration};
use tracing::info;

/// Handle list_posts tool call
pub async fn handle_list_posts(id: Option<Value>, args: Value, config: &Config) -> McpResponse {
    match timeout(Duration::from_secs(120), handle_list_posts_impl(args, config)).await {
        Ok(result) => match result {
            Ok(content) => McpResponse::success(id, serde_json::to_value(content).unwrap()),
            Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
        },
        Err(_) => McpResponse::error(
            id,
            "timeout",
            "list_posts request exceeded 120 second timeout",
        ),
    }
}

async fn handle_list_posts_impl(args: Value, config: &Config) -> Result<ToolResult, AppError> {
    let list_args: ListPostsArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_list_posts(list_args, config).await
}

/// Execute list_posts (shared implementation for MCP and CLI)
pub async fn execute_list_posts(
    args: ListPostsArgs,
    config: &Config,
) -> Result<ToolResult, AppError> {
    info!("Listing posts: limit={}, status={}", args.limit, args.status);

    let mut endpoint = Endpoint::posts().limit(args.limit);
    if args.status != "all" {
        endpoint = endpoint.status_filter(&args.status);
    }

    let client = GhostClient::new(config.clone());
    let text = match client.dispatch(endpoint, "GET", None).await {
        Ok(response) => format_post_list(&response),
        Err(e) => format!("Error listing posts: {}", e.message()),
    };

    Ok(ToolResult::text(text))
}

/// Render the post list in API order, or the literal empty-result message
fn format_post_list(response: &Value) -> String {
    match decode_posts::<ListedPost>(response) {
        Ok(posts) if posts.is_empty() => "No posts found matching the criteria.".to_string(),
        Ok(posts) => serde_json::to_string_pretty(&posts).unwrap_or_default(),
        Err(_) => format!("Unexpected response format: {}", response),
    }
}
