//! HTTP transport for list requests.
//!
//! [`HttpClient`] is the seam between the list source and the network. The
//! source only needs a GET with query parameters and headers, and a response
//! exposing header lookup and a parsed JSON body. [`ReqwestClient`] is the
//! production implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::{ListSourceError, Result};
use crate::source::QueryParams;

/// Response as seen by the list source: headers plus a parsed body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    headers: HeaderMap,
    body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, headers: HeaderMap, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A 200 response with no headers.
    pub fn ok(body: Value) -> Self {
        Self::new(200, HeaderMap::new(), body)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Case-insensitive header lookup. Invalid header names and non-visible
    /// ASCII values yield `None`; use [`HttpResponse::headers`] to tell a
    /// missing header from an unreadable one.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Capability to issue a GET request.
pub trait HttpClient: Send + Sync {
    fn get(
        &self,
        url: &str,
        params: &QueryParams,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<HttpResponse>> + Send;
}

/// reqwest-backed [`HttpClient`].
///
/// Non-success statuses are turned into [`ListSourceError::Transport`]; an
/// empty body parses as `null`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Create a client with the given total and connect timeouts.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("remote-list-source/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestClient {
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
        headers: HeaderMap,
    ) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .query(params.pairs())
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("GET {} -> {}", response.url(), status);

        if !status.is_success() {
            return Err(ListSourceError::status(
                status.as_u16(),
                format!("HTTP {status}"),
            ));
        }

        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                ListSourceError::transport(format!("response body is not valid JSON: {e}"))
            })?
        };

        Ok(HttpResponse::new(status.as_u16(), headers, body))
    }
}
