//! ghostpost MCP Server & CLI (Rust)
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Implements four tools against the Ghost Admin API:
//! - `create_post(title, content, status, tags)` - Create a new post
//! - `list_posts(limit, status)` - List posts
//! - `edit_post(post_id, title, content, status, tags)` - Edit a post
//! - `debug_api_connection()` - Diagnose connectivity and credentials

mod auth;
mod cli;
mod config;
mod error;
mod ghost;
mod http;
mod mcp;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::AppError;
use mcp::ToolResult;
use std::future::Future;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        // CLI mode - parse arguments and execute
        run_cli_mode().await
    } else {
        // MCP server mode - default behavior
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Execute command
    let result = match cli.command {
        Some(Commands::CreatePost(args)) => {
            run_tool(tools::create_post::execute_create_post(args, &config)).await
        }
        Some(Commands::ListPosts(args)) => {
            run_tool(tools::list_posts::execute_list_posts(args, &config)).await
        }
        Some(Commands::EditPost(args)) => {
            run_tool(tools::edit_post::execute_edit_post(args, &config)).await
        }
        Some(Commands::DebugApiConnection(_)) => {
            run_tool(tools::debug::execute_debug(&config)).await
        }
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    // Handle result and exit with appropriate code
    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Execute a tool future with the shared CLI timeout and flatten its text
async fn run_tool<F>(tool: F) -> Result<String>
where
    F: Future<Output = Result<ToolResult, AppError>>,
{
    use tokio::time::{timeout, Duration};

    let result = timeout(Duration::from_secs(120), tool).await;

    match result {
        Ok(Ok(tool_result)) => Ok(tool_result
            .content
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_default()),
        Ok(Err(e)) => Err(anyhow::anyhow!(e.message())),
        Err(_) => Err(anyhow::anyhow!("Request exceeded 120 second timeout")),
    }
}

/// Map error text to exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    let err_str = err.to_string().to_lowercase();

    if err_str.contains("invalid") || err_str.contains("usage") {
        1 // Invalid arguments or usage error
    } else if err_str.contains("network") || err_str.contains("connection") {
        2 // Network or API error
    } else if err_str.contains("not found") {
        3 // Not found error
    } else if err_str.contains("timeout") {
        4 // Timeout error
    } else {
        5 // Other application errors
    }
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // Log to stderr; stdout carries the JSON-RPC stream
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    info!("Starting ghostpost MCP Server");

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Handle stdio MCP communication
    mcp::handle_stdio(config).await?;

    Ok(())
}
