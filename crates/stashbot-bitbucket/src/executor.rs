//! reqwest-backed HTTP executor.

use async_trait::async_trait;
use stashbot_core::{Error, HttpExecutor, HttpMethod, HttpRequest, HttpResponse, Result};
use tracing::{debug, warn};

/// Production [`HttpExecutor`] backed by a shared [`reqwest::Client`].
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    /// Create a new executor with its own connection pool.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("stashbot-tools")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

impl Default for ReqwestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(
            method = request.method.as_str(),
            url = request.url,
            "Bitbucket request"
        );

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        // GET requests carry no body at all; POST bodies are attached only
        // when one was supplied.
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                message = body,
                "Bitbucket API error response"
            );
            return Err(Error::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
