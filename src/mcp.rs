//! MCP (Model Context Protocol) handling module
//!
//! This module implements the JSON-RPC 2.0 protocol for MCP communication.

use crate::config::Config;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info};

/// MCP JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version field - required by JSON-RPC 2.0 but not accessed in code
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// Initialize request parameters
#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information
#[derive(Debug, Deserialize, Clone)]
pub struct ClientInfo {
    pub name: Option<String>,
    #[allow(dead_code)]
    pub version: Option<String>,
}

/// MCP JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP Error structure
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: String,
    pub message: String,
}

/// MCP Tool call arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallArgs {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// MCP Content item
#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub r#type: String,
    pub text: String,
}

/// MCP Tool result
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: &str, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

impl ToolResult {
    /// Create a text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem {
                r#type: "text".to_string(),
                text: content.into(),
            }],
        }
    }
}

/// Parse MCP request from JSON string
pub fn parse_request(json: &str) -> Result<McpRequest> {
    let request: McpRequest = serde_json::from_str(json)?;
    Ok(request)
}

/// Serialize MCP response to JSON string
pub fn serialize_response(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Handle stdio MCP communication
pub async fn handle_stdio(config: Config) -> Result<()> {
    info!("Starting ghostpost MCP server on stdio");

    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = reader.next_line().await? {
        debug!("Received request: {}", line);

        let response = match parse_request(&line) {
            Ok(request) => handle_request(request, &config).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                McpResponse::error(None, "parse_error", &format!("Invalid JSON: {}", e))
            }
        };

        let response_json = serialize_response(&response)?;
        debug!("Sending response: {}", response_json);

        stdout.write_all(response_json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Handle a single MCP request
async fn handle_request(request: McpRequest, config: &Config) -> McpResponse {
    match request.method.as_str() {
        "initialize" => handle_initialize(request).await,
        "tools/call" => handle_tool_call(request, config).await,
        "tools/list" => handle_tools_list(request).await,
        _ => McpResponse::error(
            request.id,
            "method_not_found",
            &format!("Method '{}' not found", request.method),
        ),
    }
}

/// Handle tools/call method
async fn handle_tool_call(request: McpRequest, config: &Config) -> McpResponse {
    let args: ToolCallArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id.clone(),
                "invalid_params",
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    match args.name.as_str() {
        "create_post" => {
            crate::tools::create_post::handle_create_post(request.id, args.arguments, config).await
        }
        "list_posts" => {
            crate::tools::list_posts::handle_list_posts(request.id, args.arguments, config).await
        }
        "edit_post" => {
            crate::tools::edit_post::handle_edit_post(request.id, args.arguments, config).await
        }
        "debug_api_connection" => {
            crate::tools::debug::handle_debug(request.id, args.arguments, config).await
        }
        _ => McpResponse::error(
            request.id,
            "tool_not_found",
            &format!("Tool '{}' not found", args.name),
        ),
    }
}

/// Handle tools/list method
async fn handle_tools_list(request: McpRequest) -> McpResponse {
    let tools = build_tools_array();

    McpResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

/// Handle initialize method
async fn handle_initialize(request: McpRequest) -> McpResponse {
    if let Some(params) = request.params.clone() {
        if let Ok(init_params) = serde_json::from_value::<InitializeParams>(params) {
            let client_name = init_params
                .client_info
                .and_then(|info| info.name)
                .unwrap_or_else(|| "Unknown Client".to_string());
            info!("Client connected: {}", client_name);
        }
    }

    let tools = build_tools_array();
    let result = serde_json::json!({
        "serverInfo": {
            "name": "ghostpost",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": { "list": true, "call": true }
        },
        "tools": tools
    });
    McpResponse::success(request.id, result)
}

/// Build the tools array returned from tools/list and initialize
pub fn build_tools_array() -> serde_json::Value {
    use crate::cli::{CreatePostArgs, DebugArgs, EditPostArgs, ListPostsArgs};
    use schemars::schema_for;

    // Generate JSON schemas from the CLI argument structs
    let create_post_schema = schema_for!(CreatePostArgs);
    let list_posts_schema = schema_for!(ListPostsArgs);
    let edit_post_schema = schema_for!(EditPostArgs);
    let debug_schema = schema_for!(DebugArgs);

    serde_json::json!([
        {
            "name": "create_post",
            "description": "Create a new post in Ghost",
            "inputSchema": create_post_schema
        },
        {
            "name": "list_posts",
            "description": "List posts from Ghost",
            "inputSchema": list_posts_schema
        },
        {
            "name": "edit_post",
            "description": "Edit an existing post in Ghost",
            "inputSchema": edit_post_schema
        },
        {
            "name": "debug_api_connection",
            "description": "Debug the Ghost API connection to help diagnose issues",
            "inputSchema": debug_schema
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminApiKey;
    use serde_json::json;

    fn test_config() -> Config {
        let key = AdminApiKey::parse("5f1c1b2a3d4e5f6a7b8c9d0e:6261646465636166").unwrap();
        Config::new("http://127.0.0.1:9", key)
    }

    #[tokio::test]
    async fn test_initialize_response_contains_fields() {
        let req = McpRequest {
            jsonrpc: "2.0".into(),
            id: Some(json!(1)),
            method: "initialize".into(),
            params: None,
        };
        let resp = handle_request(req, &test_config()).await;
        assert!(resp.error.is_none());
        let result = resp.result.expect("result present");
        assert_eq!(
            result
                .get("serverInfo")
                .and_then(|v| v.get("name"))
                .and_then(|v| v.as_str()),
            Some("ghostpost")
        );
        assert_eq!(
            result
                .get("capabilities")
                .and_then(|v| v.get("tools"))
                .and_then(|v| v.get("list"))
                .and_then(|v| v.as_bool()),
            Some(true)
        );
        assert!(result.get("tools").and_then(|v| v.as_array()).is_some());
    }

    #[tokio::test]
    async fn test_tools_list_contains_all_four_tools() {
        let req = McpRequest {
            jsonrpc: "2.0".into(),
            id: Some(json!(2)),
            method: "tools/list".into(),
            params: None,
        };
        let resp = handle_request(req, &test_config()).await;
        assert!(resp.error.is_none());
        let result = resp.result.expect("result present");
        let tools = result
            .get("tools")
            .and_then(|v| v.as_array())
            .expect("tools array");
        let names: Vec<String> = tools
            .iter()
            .filter_map(|t| {
                t.get("name")
                    .and_then(|n| n.as_str())
                    .map(|s| s.to_string())
            })
            .collect();
        assert!(names.contains(&"create_post".to_string()));
        assert!(names.contains(&"list_posts".to_string()));
        assert!(names.contains(&"edit_post".to_string()));
        assert!(names.contains(&"debug_api_connection".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_method_is_rejected() {
        let req = McpRequest {
            jsonrpc: "2.0".into(),
            id: Some(json!(3)),
            method: "resources/list".into(),
            params: None,
        };
        let resp = handle_request(req, &test_config()).await;
        let error = resp.error.expect("error present");
        assert_eq!(error.code, "method_not_found");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_rejected() {
        let req = McpRequest {
            jsonrpc: "2.0".into(),
            id: Some(json!(4)),
            method: "tools/call".into(),
            params: Some(json!({ "name": "delete_post", "arguments": {} })),
        };
        let resp = handle_request(req, &test_config()).await;
        let error = resp.error.expect("error present");
        assert_eq!(error.code, "tool_not_found");
    }

    #[tokio::test]
    async fn test_tool_call_with_invalid_arguments() {
        let req = McpRequest {
            jsonrpc: "2.0".into(),
            id: Some(json!(5)),
            method: "tools/call".into(),
            // create_post requires title and content
            params: Some(json!({ "name": "create_post", "arguments": {} })),
        };
        let resp = handle_request(req, &test_config()).await;
        let error = resp.error.expect("error present");
        assert_eq!(error.code, "invalid_input");
    }

    #[test]
    fn test_tool_schemas_carry_required_fields() {
        let tools = build_tools_array();
        let tools_arr = tools.as_array().expect("tools array");
        let create = tools_arr
            .iter()
            .find(|t| t.get("name").and_then(|n| n.as_str()) == Some("create_post"))
            .expect("create_post tool present");
        let schema = serde_json::to_string(create.get("inputSchema").expect("schema")).unwrap();
        assert!(schema.contains("title"));
        assert!(schema.contains("content"));
    }
}
