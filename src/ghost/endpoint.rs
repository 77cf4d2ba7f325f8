//! Typed Admin API endpoint builder
//!
//! Paths and query parameters are assembled as structured fields and
//! serialized through the url crate, so ids, filters and tag names are
//! percent-encoded instead of being spliced into strings.

use crate::config::API_VERSION;
use crate::error::AppError;
use url::Url;

/// A relative Admin API endpoint: path segments plus query pairs
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    /// The posts collection, with `source=html` for HTML content handling
    pub fn posts() -> Self {
        Self {
            segments: vec!["posts".to_string()],
            query: vec![("source".to_string(), "html".to_string())],
        }
    }

    /// A single post by id, with `source=html`
    pub fn post(id: &str) -> Self {
        Self {
            segments: vec!["posts".to_string(), id.to_string()],
            query: vec![("source".to_string(), "html".to_string())],
        }
    }

    /// The site information endpoint
    pub fn site() -> Self {
        Self {
            segments: vec!["site".to_string()],
            query: vec![],
        }
    }

    /// Attach a `limit` query parameter
    pub fn limit(mut self, limit: u32) -> Self {
        self.query.push(("limit".to_string(), limit.to_string()));
        self
    }

    /// Attach a `filter=status:{status}` query parameter
    pub fn status_filter(mut self, status: &str) -> Self {
        self.query
            .push(("filter".to_string(), format!("status:{}", status)));
        self
    }

    /// Resolve against the installation root:
    /// `{base}/ghost/api/{version}/admin/{segments...}/?{query}`
    pub fn url(&self, base_url: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(base_url)
            .map_err(|e| AppError::InvalidInput(format!("Invalid base URL: {}", e)))?;

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AppError::InvalidInput("Base URL cannot be a base".to_string()))?;
            path.pop_if_empty();
            path.extend(["ghost", "api", API_VERSION, "admin"]);
            path.extend(self.segments.iter().map(String::as_str));
            // Ghost Admin API endpoints end with a trailing slash
            path.push("");
        }

        for (key, value) in &self.query {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://blog.example.com";

    #[test]
    fn test_posts_url() {
        let url = Endpoint::posts().url(BASE).unwrap();
        assert_eq!(
            url.as_str(),
            "https://blog.example.com/ghost/api/v4/admin/posts/?source=html"
        );
    }

    #[test]
    fn test_posts_with_limit_and_filter() {
        let url = Endpoint::posts()
            .limit(25)
            .status_filter("published")
            .url(BASE)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://blog.example.com/ghost/api/v4/admin/posts/?source=html&limit=25&filter=status%3Apublished"
        );
    }

    #[test]
    fn test_single_post_url() {
        let url = Endpoint::post("64f1a2b3c4d5e6f7a8b9c0d1").url(BASE).unwrap();
        assert_eq!(
            url.as_str(),
            "https://blog.example.com/ghost/api/v4/admin/posts/64f1a2b3c4d5e6f7a8b9c0d1/?source=html"
        );
    }

    #[test]
    fn test_post_id_is_escaped() {
        let url = Endpoint::post("id with/slash").url(BASE).unwrap();
        assert!(url.as_str().contains("id%20with%2Fslash"));
    }

    #[test]
    fn test_site_url() {
        let url = Endpoint::site().url(BASE).unwrap();
        assert_eq!(
            url.as_str(),
            "https://blog.example.com/ghost/api/v4/admin/site/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(Endpoint::site().url("not a url").is_err());
    }
}
