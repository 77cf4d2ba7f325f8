//! Process configuration
//!
//! Loaded once at startup from environment variables (a `.env` file in the
//! working directory is honored) and passed by reference into the request
//! path. Nothing reads the environment after startup.

use crate::error::AppError;
use anyhow::{Context, Result};

/// Ghost Admin API version consumed by this server
pub const API_VERSION: &str = "v4";

/// Admin API key split into its key identifier and hex-encoded secret
#[derive(Debug, Clone, PartialEq)]
pub struct AdminApiKey {
    pub id: String,
    pub secret: String,
}

impl AdminApiKey {
    /// Parse a composite `ID:SECRET` credential string
    ///
    /// Exactly one `:` separating two non-empty parts; anything else is
    /// rejected before any token is minted.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let parts: Vec<&str> = raw.split(':').collect();
        match parts.as_slice() {
            [id, secret] if !id.is_empty() && !secret.is_empty() => Ok(Self {
                id: (*id).to_string(),
                secret: (*secret).to_string(),
            }),
            _ => Err(AppError::InvalidCredentialFormat),
        }
    }
}

/// Immutable process-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the Ghost installation, without the API path
    pub base_url: String,
    pub admin_key: AdminApiKey,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Required variables: `GHOST_BASE_URL`, `GHOST_ADMIN_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("GHOST_BASE_URL")
            .context("GHOST_BASE_URL environment variable is required")?;
        let raw_key = std::env::var("GHOST_ADMIN_API_KEY")
            .context("GHOST_ADMIN_API_KEY environment variable is required")?;

        let admin_key = AdminApiKey::parse(&raw_key)
            .context("GHOST_ADMIN_API_KEY is malformed")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_key,
        })
    }

    /// Build a configuration directly, trimming any trailing slash
    pub fn new(base_url: &str, admin_key: AdminApiKey) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_key() {
        let key = AdminApiKey::parse("5f1c1b2a3d4e5f6a7b8c9d0e:6261646465636166").unwrap();
        assert_eq!(key.id, "5f1c1b2a3d4e5f6a7b8c9d0e");
        assert_eq!(key.secret, "6261646465636166");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(matches!(
            AdminApiKey::parse("nocolonhere"),
            Err(AppError::InvalidCredentialFormat)
        ));
    }

    #[test]
    fn test_parse_rejects_extra_separator() {
        assert!(matches!(
            AdminApiKey::parse("id:secret:extra"),
            Err(AppError::InvalidCredentialFormat)
        ));
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert!(AdminApiKey::parse(":secret").is_err());
        assert!(AdminApiKey::parse("id:").is_err());
        assert!(AdminApiKey::parse(":").is_err());
        assert!(AdminApiKey::parse("").is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let key = AdminApiKey::parse("id:6261646465636166").unwrap();
        let config = Config::new("https://blog.example.com/", key);
        assert_eq!(config.base_url, "https://blog.example.com");
    }
}
