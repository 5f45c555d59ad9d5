//! Traced HTTP client.
//!
//! Wraps `reqwest::Client` so every outgoing call runs inside an `outgoing_http`
//! span carrying method, URL and response status, and forwards a caller-chosen
//! `x-request-id` so server and client logs can be joined.

use reqwest::header::{HeaderName, HeaderValue};
use tracing::{field::Empty, Instrument, Level};

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone)]
pub struct TracedClient {
    inner: reqwest::Client,
    request_id: Option<HeaderValue>,
}

impl TracedClient {
    /// Create a new TracedClient wrapping the provided reqwest::Client
    pub fn new(inner: reqwest::Client) -> Self {
        Self {
            inner,
            request_id: None,
        }
    }

    /// Stamp every request sent through this client with the given request id.
    /// Invalid header values are ignored.
    pub fn with_request_id(mut self, id: &str) -> Self {
        self.request_id = HeaderValue::from_str(id).ok();
        self
    }

    /// Execute a built request inside an `outgoing_http` span.
    pub async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let span = tracing::span!(
            Level::INFO, "outgoing_http",
            http.method = %req.method(),
            http.url = %req.url(),
            http.status_code = Empty,
            error = Empty,
        );

        if let Some(id) = &self.request_id {
            req.headers_mut()
                .entry(REQUEST_ID)
                .or_insert_with(|| id.clone());
        }

        let response = self
            .inner
            .execute(req)
            .instrument(span.clone())
            .await
            .inspect_err(|e| {
                span.record("error", true);
                tracing::debug!(parent: &span, error = %e, "outgoing request failed");
            })?;

        span.record("http.status_code", response.status().as_u16());
        if response.status().is_client_error() || response.status().is_server_error() {
            span.record("error", true);
        }

        Ok(response)
    }

    /// Convenience method for GET requests
    pub async fn get(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        let req = self.inner.get(url).build()?;
        self.execute(req).await
    }

    /// Convenience method for DELETE requests
    pub async fn delete(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        let req = self.inner.delete(url).build()?;
        self.execute(req).await
    }

    /// Start a request builder; send it with [`TracedClient::send`].
    pub fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }

    /// Build and execute a request started with [`TracedClient::request`].
    pub async fn send(&self, builder: reqwest::RequestBuilder) -> reqwest::Result<reqwest::Response> {
        self.execute(builder.build()?).await
    }

    /// Get a reference to the underlying reqwest::Client for advanced usage
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

impl From<reqwest::Client> for TracedClient {
    fn from(c: reqwest::Client) -> Self {
        Self::new(c)
    }
}

impl Default for TracedClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}
