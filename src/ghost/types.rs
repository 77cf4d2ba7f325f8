//! Typed projections of Admin API responses
//!
//! Each endpoint decodes into the narrow struct its caller needs instead of
//! indexing into untyped JSON; a failed decode surfaces as
//! `AppError::ResponseShape` with the raw payload retained by the caller.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire envelope: the Admin API wraps post objects in a `posts` array
#[derive(Debug, Deserialize)]
pub struct PostsEnvelope<T> {
    pub posts: Vec<T>,
}

/// Fields reported back after creating a post
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedPost {
    pub id: String,
    pub title: String,
    pub url: String,
    pub status: String,
    pub created_at: String,
}

/// Fields reported per post when listing
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ListedPost {
    pub id: String,
    pub title: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields the edit flow reads from the stored post before writing
///
/// `html` is nullable for posts authored through the editor rather than the
/// HTML source. `updated_at` feeds the API's optimistic-concurrency check.
#[derive(Debug, Deserialize, PartialEq)]
pub struct CurrentPost {
    pub title: String,
    pub html: Option<String>,
    pub status: String,
    pub updated_at: String,
}

/// Fields reported back after updating a post
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdatedPost {
    pub id: String,
    pub title: String,
    pub url: String,
    pub status: String,
    pub updated_at: String,
}

/// Decode the full posts array from a response payload
pub fn decode_posts<T: DeserializeOwned>(response: &Value) -> Result<Vec<T>, AppError> {
    let envelope: PostsEnvelope<T> = serde_json::from_value(response.clone())?;
    Ok(envelope.posts)
}

/// Decode the first post from a response payload
pub fn first_post<T: DeserializeOwned>(response: &Value) -> Result<T, AppError> {
    decode_posts::<T>(response)?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::ResponseShape("posts array is empty".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_post_decodes_created_fields() {
        let response = json!({
            "posts": [{
                "id": "1",
                "title": "Hello",
                "url": "/hello/",
                "status": "draft",
                "created_at": "2024-01-01T00:00:00.000Z",
                "uuid": "ignored-extra-field"
            }]
        });

        let post: CreatedPost = first_post(&response).unwrap();
        assert_eq!(post.id, "1");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.url, "/hello/");
        assert_eq!(post.status, "draft");
        assert_eq!(post.created_at, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_first_post_rejects_empty_array() {
        let response = json!({ "posts": [] });
        let result = first_post::<CreatedPost>(&response);
        assert!(matches!(result, Err(AppError::ResponseShape(_))));
    }

    #[test]
    fn test_first_post_rejects_missing_key() {
        let response = json!({ "errors": [{ "message": "Unknown Admin API Key" }] });
        let result = first_post::<CreatedPost>(&response);
        assert!(matches!(result, Err(AppError::ResponseShape(_))));
    }

    #[test]
    fn test_first_post_rejects_missing_field() {
        // No `url` on the post object
        let response = json!({
            "posts": [{
                "id": "1",
                "title": "Hello",
                "status": "draft",
                "created_at": "2024-01-01T00:00:00.000Z"
            }]
        });
        let result = first_post::<CreatedPost>(&response);
        assert!(matches!(result, Err(AppError::ResponseShape(_))));
    }

    #[test]
    fn test_current_post_allows_null_html() {
        let response = json!({
            "posts": [{
                "title": "Editor post",
                "html": null,
                "status": "published",
                "updated_at": "2024-02-02T00:00:00.000Z"
            }]
        });
        let post: CurrentPost = first_post(&response).unwrap();
        assert_eq!(post.html, None);
        assert_eq!(post.updated_at, "2024-02-02T00:00:00.000Z");
    }

    #[test]
    fn test_decode_posts_preserves_order() {
        let response = json!({
            "posts": [
                { "id": "a", "title": "A", "status": "draft",
                  "created_at": "2024-01-01T00:00:00.000Z", "updated_at": "2024-01-02T00:00:00.000Z" },
                { "id": "b", "title": "B", "status": "published",
                  "created_at": "2024-01-03T00:00:00.000Z", "updated_at": "2024-01-04T00:00:00.000Z" }
            ]
        });
        let posts: Vec<ListedPost> = decode_posts(&response).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "a");
        assert_eq!(posts[1].id, "b");
    }
}
