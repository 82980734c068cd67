//! HTTP executor trait for server-side git hosting clients.
//!
//! Provider crates describe requests with [`HttpRequest`] and hand them to
//! whatever [`HttpExecutor`] they were constructed with. Production code
//! injects a real HTTP client; tests inject a fake that replays canned
//! responses.

use async_trait::async_trait;

use crate::error::Result;

/// HTTP verbs used by the provider clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Uppercase method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A fully built request, ready for an executor.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body. `None` means no body is sent at all, which is distinct
    /// from sending an empty object.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Create a body-less request.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response as seen by the calling provider client.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for executing HTTP requests against a hosting server.
///
/// Implementations own transport concerns (TLS, connection pooling,
/// deadlines). Transport failures and non-2xx responses surface as `Err`;
/// callers never retry.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Execute a single request and return its response.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
