//! Ghost Admin API client
//!
//! Issues one authenticated HTTP request per dispatch and normalizes the
//! outcome: parsed JSON on success, a structured `AppError` otherwise.
//! There are no retries; a failed call is reported once.

use crate::auth;
use crate::config::{Config, API_VERSION};
use crate::error::AppError;
use crate::ghost::endpoint::Endpoint;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::debug;

/// HTTP methods accepted by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    /// Parse a method name case-insensitively; anything outside
    /// GET/POST/PUT is rejected before any network I/O
    pub fn parse(method: &str) -> Result<Self, AppError> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            _ => Err(AppError::UnsupportedMethod(method.to_string())),
        }
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        }
    }
}

/// Outcome of a diagnostic probe
#[derive(Debug)]
pub struct ProbeResult {
    pub status: u16,
    pub url: String,
    pub body: String,
}

/// Admin API client holding the shared HTTP client and configuration
pub struct GhostClient {
    client: reqwest::Client,
    config: Config,
}

impl GhostClient {
    pub fn new(config: Config) -> Self {
        let client = crate::http::client_with_timeout(crate::http::REQUEST_TIMEOUT);
        Self { client, config }
    }

    /// Send one authenticated request to an Admin API endpoint
    ///
    /// A fresh token is minted per call; signing failure returns before any
    /// network I/O. GET sends no body; POST/PUT serialize `body` as JSON.
    /// Non-2xx responses carry the status, resolved URL, sent headers and
    /// the response body verbatim.
    pub async fn dispatch(
        &self,
        endpoint: Endpoint,
        method: &str,
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let method = HttpMethod::parse(method)?;
        let token = auth::sign_token(&self.config.admin_key)?;
        let url = endpoint.url(&self.config.base_url)?;

        let mut request = self
            .client
            .request(method.as_reqwest(), url)
            .header("Authorization", format!("Ghost {}", token))
            .header("Content-Type", "application/json")
            .header("Accept-Version", API_VERSION);

        if !matches!(method, HttpMethod::Get) {
            if let Some(body) = body {
                request = request.json(body);
            }
        }

        // Build first so the resolved URL and sent headers are available
        // for error reporting
        let request = request.build()?;
        let sent_headers = header_pairs(request.headers());

        debug!("Dispatching {:?} {}", method, request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let resolved_url = response.url().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                url: resolved_url,
                headers: sent_headers,
                body,
            });
        }

        let payload: Value = response.json().await?;
        Ok(payload)
    }

    /// Unauthenticated GET of the installation root (`{base}/ghost/`)
    pub async fn probe_site_root(&self) -> Result<ProbeResult, AppError> {
        let url = format!("{}/ghost/", self.config.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Ok(ProbeResult { status, url, body })
    }

    /// Signed GET of the admin `site/` endpoint, reporting the status
    /// regardless of success and the headers that were sent
    pub async fn probe_admin_site(
        &self,
    ) -> Result<(ProbeResult, Vec<(String, String)>), AppError> {
        let token = auth::sign_token(&self.config.admin_key)?;
        let url = Endpoint::site().url(&self.config.base_url)?;

        let request = self
            .client
            .get(url)
            .header("Authorization", format!("Ghost {}", token))
            .header("Content-Type", "application/json")
            .header("Accept-Version", API_VERSION)
            .build()?;
        let sent_headers = header_pairs(request.headers());

        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Ok((ProbeResult { status, url, body }, sent_headers))
    }

    /// Resolved URL of the admin `site/` endpoint, for diagnostics
    pub fn admin_site_url(&self) -> Result<String, AppError> {
        Ok(Endpoint::site().url(&self.config.base_url)?.to_string())
    }
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}
