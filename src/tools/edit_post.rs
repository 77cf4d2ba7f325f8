//! edit_post tool implementation
//!
//! Implements the `edit_post(post_id, title, content, status, tags)` MCP
//! tool. Editing is two-phase: read the stored post first, then write the
//! update carrying the fetched `updated_at` so the API can detect
//! conflicting concurrent edits.

use crate::cli::EditPostArgs;
use crate::config::Config;
use crate::error::AppError;
use crate::ghost::types::{first_post, CurrentPost, UpdatedPost};
use crate::ghost::{Endpoint, GhostClient};
use crate::mcp::{McpResponse, ToolResult};
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};
use tracing::info;

/// Handle edit_post tool call
pub async fn handle_edit_post(id: Option<Value>, args: Value, config: &Config) -> McpResponse {
    match timeout(Duration::from_secs(120), handle_edit_post_impl(args, config)).await {
        Ok(result) => match result {
            Ok(content) => McpResponse::success(id, serde_json::to_value(content).unwrap()),
            Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
        },
        Err(_) => McpResponse::error(
            id,
            "timeout",
            "edit_post request exceeded 120 second timeout",
        ),
    }
}

async fn handle_edit_post_impl(args: Value, config: &Config) -> Result<ToolResult, AppError> {
    let edit_args: EditPostArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;

    execute_edit_post(edit_args, config).await
}

/// Execute edit_post (shared implementation for MCP and CLI)
///
/// If the read phase fails, the write is never attempted.
pub async fn execute_edit_post(
    args: EditPostArgs,
    config: &Config,
) -> Result<ToolResult, AppError> {
    info!("Editing post: {}", args.post_id);

    let client = GhostClient::new(config.clone());

    let current = match client
        .dispatch(Endpoint::post(&args.post_id), "GET", None)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            return Ok(ToolResult::text(format!(
                "Error retrieving post: {}",
                e.message()
            )))
        }
    };

    let current_post: CurrentPost = match first_post(&current) {
        Ok(post) => post,
        Err(e) => {
            return Ok(ToolResult::text(format!(
                "Error processing post data: {}",
                e.message()
            )))
        }
    };

    let payload = build_update_payload(&args, &current_post);

    let text = match client
        .dispatch(Endpoint::post(&args.post_id), "PUT", Some(&payload))
        .await
    {
        Ok(response) => format_updated_post(&response),
        Err(e) => format!("Error updating post: {}", e.message()),
    };

    Ok(ToolResult::text(text))
}

/// Build the update payload: caller-supplied fields win, everything else
/// keeps the stored value, and the fetched `updated_at` is always included
fn build_update_payload(args: &EditPostArgs, current: &CurrentPost) -> Value {
    let mut post = json!({
        "id": args.post_id,
        "title": args.title.as_ref().unwrap_or(&current.title),
        "html": args.content.as_deref().or(current.html.as_deref()),
        "status": args.status.as_ref().unwrap_or(&current.status),
        "updated_at": current.updated_at,
    });

    if let Some(tags) = &args.tags {
        if !tags.is_empty() {
            post["tags"] = tags.iter().map(|tag| json!({ "name": tag })).collect();
        }
    }

    json!({ "posts": [post] })
}

fn format_updated_post(response: &Value) -> String {
    match first_post::<UpdatedPost>(response) {
        Ok(post) => serde_json::to_string_pretty(&post).unwrap_or_default(),
        Err(e) => format!("Error processing post data: {}", e.message()),
    }
}
