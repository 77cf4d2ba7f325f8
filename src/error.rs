//! Error types and handling for the Ghost MCP server

use thiserror::Error;

/// Application error types covering credential, dispatch and response failures
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid API key format. Expected 'ID:SECRET'")]
    InvalidCredentialFormat,
    #[error("Failed to generate JWT token: {0}")]
    Signing(String),
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),
    #[error("Request to {url} failed with status {status}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        headers: Vec<(String, String)>,
        body: String,
    },
    #[error("{0}")]
    Transport(String),
    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),
}

impl AppError {
    /// Get the error code for MCP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::InvalidCredentialFormat => "invalid_credential_format",
            AppError::Signing(_) => "signing_error",
            AppError::UnsupportedMethod(_) => "unsupported_method",
            AppError::HttpStatus { .. } => "http_status_error",
            AppError::Transport(_) => "transport_error",
            AppError::ResponseShape(_) => "response_shape_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert reqwest::Error to AppError
///
/// Timeouts are not distinguished from other transport failures at this
/// layer; all of them carry the exception's string description.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ResponseShape(err.to_string())
    }
}

/// Convert jsonwebtoken errors to AppError
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Signing(err.to_string())
    }
}
