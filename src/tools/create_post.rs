//! create_post tool implementation
//!
//! Implements the `create_post(title, content, status, tags)` MCP tool

use crate::cli::CreatePostArgs;
use crate::config::Config;
use crate::error::AppError;
use crate::ghost::types::{first_post, CreatedPost};
use crate::ghost::{Endpoint, GhostClient};
use crate::mcp::{McpResponse, ToolResult};
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};
use tracing::info;

/// Handle create_post tool call
pub async fn handle_create_post(id: Option<Value>, args: Value, config: &Config) -> McpResponse {
    match timeout(Duration::from_secs(120), handle_create_post_impl(args, config)).await {
        Ok(result) => match result {
            Ok(content) => McpResponse::success(id, serde_json::to_value(content).unwrap()),
            Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
        },
        Err(_) => McpResponse::error(
            id,
            "timeout",
            "create_post request exceeded 120 second timeout",
        ),
    }
}

async fn handle_create_post_impl(args: Value, config: &Config) -> Result<ToolResult, AppError> {
    let create_args: CreatePostArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_create_post(create_args, config).await
}

/// Execute create_post (shared implementation for MCP and CLI)
///
/// Dispatcher failures are string-encoded into the returned text rather
/// than raised to the host.
pub async fn execute_create_post(
    args: CreatePostArgs,
    config: &Config,
) -> Result<ToolResult, AppError> {
    info!("Creating post: {}", args.title);

    let payload = build_create_payload(&args);

    let client = GhostClient::new(config.clone());
    let text = match client
        .dispatch(Endpoint::posts(), "POST", Some(&payload))
        .await
    {
        Ok(response) => format_created_post(&response),
        Err(e) => format!("Error creating post: {}", e.message()),
    };

    Ok(ToolResult::text(text))
}

/// Build the `{posts: [{...}]}` creation payload
fn build_create_payload(args: &CreatePostArgs) -> Value {
    let mut post = json!({
        "title": args.title,
        "html": args.content,
        "status": args.status,
    });

    if let Some(tags) = &args.tags {
        if !tags.is_empty() {
            post["tags"] = tags.iter().map(|tag| json!({ "name": tag })).collect();
        }
    }

    json!({ "posts": [post] })
}

/// Reduce the creation response to the fields a caller cares about
fn format_created_post(response: &Value) -> String {
    match first_post::<CreatedPost>(response) {
        Ok(post) => serde_json::to_string_pretty(&post).unwrap_or_default(),
        Err(_) => format!("Unexpected response format: {}", response),
    }
}
