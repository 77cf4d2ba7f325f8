//! debug_api_connection tool implementation
//!
//! Operator diagnostic for credential and connectivity issues: probes the
//! unauthenticated site root and the signed admin `site/` endpoint, and
//! reports both statuses together with the headers that were sent. Every
//! failure path returns a structured `{"error": ...}` payload; nothing
//! propagates to the host.

use crate::cli::DebugArgs;
use crate::config::Config;
use crate::error::AppError;
use crate::ghost::GhostClient;
use crate::mcp::{McpResponse, ToolResult};
use serde_json::{json, Map, Value};
use tokio::time::{timeout, Duration};
use tracing::info;

/// Longest response snippet included in the diagnostic output
const SNIPPET_LIMIT: usize = 500;

/// Handle debug_api_connection tool call
pub async fn handle_debug(id: Option<Value>, args: Value, config: &Config) -> McpResponse {
    match timeout(Duration::from_secs(120), handle_debug_impl(args, config)).await {
        Ok(result) => match result {
            Ok(content) => McpResponse::success(id, serde_json::to_value(content).unwrap()),
            Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
        },
        Err(_) => McpResponse::error(
            id,
            "timeout",
            "debug_api_connection request exceeded 120 second timeout",
        ),
    }
}

async fn handle_debug_impl(args: Value, config: &Config) -> Result<ToolResult, AppError> {
    let _args: DebugArgs = serde_json::from_value(args).unwrap_or_default();
    execute_debug(config).await
}

/// Execute debug_api_connection (shared implementation for MCP and CLI)
pub async fn execute_debug(config: &Config) -> Result<ToolResult, AppError> {
    info!("Running API connection diagnostics");

    let text = match run_diagnostics(config).await {
        Ok(report) => report,
        Err(e) => {
            let client = GhostClient::new(config.clone());
            let error = json!({
                "error": e.message(),
                "api_url": client.admin_site_url().ok(),
            });
            serde_json::to_string_pretty(&error).unwrap_or_default()
        }
    };

    Ok(ToolResult::text(text))
}

async fn run_diagnostics(config: &Config) -> Result<String, AppError> {
    let client = GhostClient::new(config.clone());

    let site = client.probe_site_root().await?;
    let (api, headers_sent) = client.probe_admin_site().await?;

    let report = json!({
        "site_status": site.status,
        "site_url": site.url,
        "api_status": api.status,
        "api_url": api.url,
        "api_response": truncate_snippet(&api.body, SNIPPET_LIMIT),
        "headers_sent": headers_object(&headers_sent),
    });

    Ok(serde_json::to_string_pretty(&report).unwrap_or_default())
}

fn headers_object(headers: &[(String, String)]) -> Value {
    let mut map = Map::new();
    for (name, value) in headers {
        map.insert(name.clone(), Value::String(value.clone()));
    }
    Value::Object(map)
}

fn truncate_snippet(body: &str, limit: usize) -> String {
    if body.chars().count() > limit {
        body.chars().take(limit).collect()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_snippet_short_body_untouched() {
        assert_eq!(truncate_snippet("ok", SNIPPET_LIMIT), "ok");
    }

    #[test]
    fn test_truncate_snippet_long_body() {
        let body = "x".repeat(1200);
        let snippet = truncate_snippet(&body, SNIPPET_LIMIT);
        assert_eq!(snippet.chars().count(), 500);
    }

    #[test]
    fn test_truncate_snippet_multibyte_boundary() {
        let body = "é".repeat(600);
        let snippet = truncate_snippet(&body, SNIPPET_LIMIT);
        assert_eq!(snippet.chars().count(), 500);
    }

    #[test]
    fn test_headers_object() {
        let headers = vec![
            ("authorization".to_string(), "Ghost abc".to_string()),
            ("accept-version".to_string(), "v4".to_string()),
        ];
        let object = headers_object(&headers);
        assert_eq!(object["authorization"], "Ghost abc");
        assert_eq!(object["accept-version"], "v4");
    }
}
