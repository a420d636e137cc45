//! HTTP client for the shortening backend
//!
//! Two endpoints, nothing else:
//! - `POST /shorturl` with `{"url": ...}` returns `{"short_url": ...}`
//! - `DELETE /shorturl/<key>` returns any 2xx body
//!
//! Failures carry `{"message": ...}` with a non-2xx status. No retries, no
//! client-side timeout, no authentication.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::config::VERSION;

/// Error returned by a backend call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status
    #[error("backend rejected request ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        /// `message` field of the error payload, if the body had one
        message: Option<String>,
    },

    /// Backend could not be reached (connection refused, DNS, reset, ...)
    #[error("{0}")]
    Transport(String),

    /// 2xx response whose body did not have the expected shape
    #[error("unexpected response from backend ({0})")]
    InvalidResponse(String),
}

/// The operations the form needs from a backend
///
/// `ShortUrlClient` is the HTTP implementation; tests substitute an in-memory one.
pub trait Backend: Send + Sync {
    /// Create a short link for `url`, returning the full short URL
    fn create(&self, url: &str) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Remove the short link identified by `key`
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    short_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// Derive the backend key from a short link: its last `/`-delimited segment
///
/// Returns `None` when that segment is empty (e.g. a trailing slash).
pub fn key_from_short_url(short_url: &str) -> Option<&str> {
    short_url
        .trim()
        .rsplit('/')
        .next()
        .filter(|key| !key.is_empty())
}

/// reqwest-backed client bound to one base address
#[derive(Debug, Clone)]
pub struct ShortUrlClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl ShortUrlClient {
    /// Build a client for `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .with_context(|| format!("Invalid backend URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("Backend URL cannot carry a path: {}", base_url);
        }

        let client = reqwest::Client::builder()
            .user_agent(format!("shorturl/{}", VERSION))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::debug!("Backend client configured for {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Base URL with `segments` appended as individually encoded path segments
    fn endpoint(&self, segments: &[&str]) -> reqwest::Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Turn a non-2xx response into `ApiError::Rejected`, reading `message` if present
async fn rejection(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty());
    ApiError::Rejected { status, message }
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

impl Backend for ShortUrlClient {
    async fn create(&self, url: &str) -> Result<String, ApiError> {
        let endpoint = self.endpoint(&["shorturl"]);
        tracing::debug!("POST {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .json(&CreateRequest { url })
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            let error = rejection(response).await;
            tracing::warn!("Create rejected: {}", error);
            return Err(error);
        }

        let body: CreateResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        tracing::info!("Created short link {}", body.short_url);
        Ok(body.short_url)
    }

    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        let endpoint = self.endpoint(&["shorturl", key]);
        tracing::debug!("DELETE {}", endpoint);

        let response = self
            .client
            .delete(endpoint)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            let error = rejection(response).await;
            tracing::warn!("Delete of {} rejected: {}", key, error);
            return Err(error);
        }

        tracing::info!("Deleted short link {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{delete, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// Requests seen by the fake backend, as "METHOD path" lines
    type Seen = Arc<Mutex<Vec<String>>>;

    async fn create_ok(State(seen): State<Seen>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let url = body["url"].as_str().unwrap_or_default().to_string();
        seen.lock().unwrap().push(format!("POST /shorturl {}", url));
        (
            StatusCode::CREATED,
            Json(json!({
                "url": url,
                "key": "abcd",
                "short_url": "http://localhost:5000/abcd",
                "_id": "65f0c0ffee",
            })),
        )
    }

    async fn delete_ok(State(seen): State<Seen>, Path(key): Path<String>) -> Json<Value> {
        seen.lock().unwrap().push(format!("DELETE /shorturl/{}", key));
        Json(json!({ "message": format!("Key: {}  deleted successfully", key) }))
    }

    /// Serve `router` on an ephemeral port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn happy_backend() -> (String, Seen) {
        let seen: Seen = Arc::default();
        let router = Router::new()
            .route("/shorturl", post(create_ok))
            .route("/shorturl/:key", delete(delete_ok))
            .with_state(seen.clone());
        (serve(router).await, seen)
    }

    /// A base URL nothing is listening on
    async fn dead_backend() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[test]
    fn test_key_is_last_path_segment() {
        assert_eq!(key_from_short_url("http://host/abcd"), Some("abcd"));
        assert_eq!(key_from_short_url("http://localhost:5000/x1Y2"), Some("x1Y2"));
        assert_eq!(key_from_short_url("abcd"), Some("abcd"));
        assert_eq!(key_from_short_url("http://host/"), None);
        assert_eq!(key_from_short_url(""), None);
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(ShortUrlClient::new("not a url").is_err());
        assert!(ShortUrlClient::new("mailto:someone@example.com").is_err());
        assert!(ShortUrlClient::new("http://127.0.0.1:5000").is_ok());
    }

    #[test]
    fn test_endpoint_encodes_key_as_one_segment() {
        let client = ShortUrlClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(
            client.endpoint(&["shorturl"]).as_str(),
            "http://127.0.0.1:5000/shorturl"
        );
        assert_eq!(
            client.endpoint(&["shorturl", "a/b"]).as_str(),
            "http://127.0.0.1:5000/shorturl/a%2Fb"
        );
    }

    #[tokio::test]
    async fn test_create_returns_short_url() {
        let (base, seen) = happy_backend().await;
        let client = ShortUrlClient::new(&base).unwrap();

        let short = client.create("https://example.com/long").await.unwrap();

        assert_eq!(short, "http://localhost:5000/abcd");
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["POST /shorturl https://example.com/long"]
        );
    }

    #[tokio::test]
    async fn test_delete_hits_key_path() {
        let (base, seen) = happy_backend().await;
        let client = ShortUrlClient::new(&base).unwrap();

        client.delete("abcd").await.unwrap();

        assert_eq!(seen.lock().unwrap().as_slice(), ["DELETE /shorturl/abcd"]);
    }

    #[tokio::test]
    async fn test_create_rejection_carries_message() {
        let router = Router::new().route(
            "/shorturl",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "bad url" })),
                )
            }),
        );
        let client = ShortUrlClient::new(&serve(router).await).unwrap();

        let err = client.create("nope").await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                message: Some("bad url".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_blank_rejection_message_is_dropped() {
        let router = Router::new().route(
            "/shorturl",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "message": "" }))) }),
        );
        let client = ShortUrlClient::new(&serve(router).await).unwrap();

        let err = client.create("nope").await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                message: None,
            }
        );
    }

    #[tokio::test]
    async fn test_rejection_without_json_body_has_no_message() {
        let router = Router::new().route(
            "/shorturl/:key",
            delete(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = ShortUrlClient::new(&serve(router).await).unwrap();

        let err = client.delete("abcd").await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Rejected {
                status: 500,
                message: None,
            }
        );
    }

    #[tokio::test]
    async fn test_delete_accepts_any_success_body() {
        let router = Router::new().route(
            "/shorturl/:key",
            delete(|| async { StatusCode::NO_CONTENT }),
        );
        let client = ShortUrlClient::new(&serve(router).await).unwrap();

        assert!(client.delete("abcd").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_success_without_short_url_is_invalid() {
        let router = Router::new().route(
            "/shorturl",
            post(|| async { (StatusCode::CREATED, Json(json!({ "key": "abcd" }))) }),
        );
        let client = ShortUrlClient::new(&serve(router).await).unwrap();

        let err = client.create("https://example.com").await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = ShortUrlClient::new(&dead_backend().await).unwrap();

        let err = client.create("https://example.com").await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)), "got {:?}", err);
    }
}
