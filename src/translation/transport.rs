//! HTTP seam between backends and the network.
//!
//! Backends never talk to reqwest directly: they go through [`Transport`],
//! which hands back the raw status and body. Tests swap in a stub.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Status and body of an HTTP exchange, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// The request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("failed to read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError>;

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport.
///
/// Without a timeout a request blocks until the peer answers or drops the
/// connection.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn finish(
        url: &str,
        result: reqwest::Result<reqwest::Response>,
    ) -> Result<RawResponse, TransportError> {
        let response = result.map_err(|source| classify(url, source))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| TransportError::Body {
            url: url.to_string(),
            source: source.without_url(),
        })?;
        tracing::debug!(url, status, bytes = body.len(), "received response");
        Ok(RawResponse { status, body })
    }
}

// Errors drop their URL so a query-string key never ends up in a message.
fn classify(url: &str, source: reqwest::Error) -> TransportError {
    let source = source.without_url();
    if source.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Connect {
            url: url.to_string(),
            source,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        tracing::debug!(url, "GET");
        Self::finish(url, self.client.get(url).query(query).send().await).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<RawResponse, TransportError> {
        tracing::debug!(url, "POST");
        Self::finish(url, self.client.post(url).form(form).send().await).await
    }
}
