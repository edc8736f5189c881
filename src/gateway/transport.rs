//! The HTTP seam between [`GatewayClient`](super::GatewayClient) and the network.
//!
//! The client builds [`HttpRequest`]s and interprets [`HttpResponse`]s; a
//! [`Transport`] only moves bytes. [`ReqwestTransport`] is the production
//! implementation. Tests substitute their own.

use crate::app::filters::QueryParameters;
use crate::domain::error::{JobBoardError, Result};
use futures_util::future::BoxFuture;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Sent as `application/json`.
    Json(serde_json::Value),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

/// An outbound request, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Endpoint path such as `/jobs/`.
    pub path: String,
    pub query: QueryParameters,
    /// Bearer token for the `Authorization` header, if any.
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl HttpRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: QueryParameters::new(),
            bearer: None,
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: RequestBody) -> Self {
        Self { method: Method::Post, body, ..Self::get(path) }
    }

    #[must_use]
    pub fn with_query(mut self, query: QueryParameters) -> Self {
        self.query = query;
        self
    }

    /// Path plus encoded query string, e.g. `/jobs/?search=rust`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let query = self.query.to_query_string();
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{query}", self.path)
        }
    }
}

/// A response with any status code. Interpreting the status is the client's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failure to obtain any response at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Connection(String),
}

/// Sends requests and returns raw responses.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, std::result::Result<HttpResponse, TransportError>>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a transport rooted at `base_url` with a fixed per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Config`] if the URL is not absolute or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| JobBoardError::Config(format!("invalid API URL {base_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(JobBoardError::Config(format!("API URL must be http(s): {base_url:?}")));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JobBoardError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, url);
        if !request.query.is_empty() {
            builder = builder.query(request.query.pairs());
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse { status, body: body.to_vec() })
    }
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connection(error.to_string())
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, std::result::Result<HttpResponse, TransportError>> {
        Box::pin(self.execute(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_encoded_query() {
        let request = HttpRequest::get("/jobs/").with_query(QueryParameters::from([("tags", "React,Go")]));
        assert_eq!(request.endpoint(), "/jobs/?tags=React%2CGo");
        assert_eq!(HttpRequest::get("/tags/").endpoint(), "/tags/");
    }

    #[test]
    fn rejects_relative_base_url() {
        assert!(matches!(
            ReqwestTransport::new("localhost:8000", DEFAULT_TIMEOUT),
            Err(JobBoardError::Config(_))
        ));
        let transport = ReqwestTransport::new("http://localhost:8000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000");
    }
}
