//! Native HTTP transport.
//!
//! Issues wire-contract requests over the network with `reqwest`. A connect
//! timeout bounds establishing the connection and a request timeout bounds
//! the whole call, so a stalled endpoint surfaces as
//! [`TransportError::Timeout`] instead of hanging the caller.

use super::{Transport, TransportError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use std::time::Duration;
use sync_types::{wire, SyncScope, SyncState, TriggerResponse};
use tracing::debug;

/// Transport that reaches the coordination endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the endpoint rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if `base_url` is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| TransportError::Request(format!("invalid base URL {}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::Request(format!(
                "unsupported scheme in base URL {}",
                base_url
            )));
        }

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

fn map_body_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Body(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn trigger(&self, scope: &SyncScope) -> Result<TriggerResponse, TransportError> {
        let url = self.url(wire::TRIGGER_PATH);
        debug!("POST {} for {}", url, scope);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(wire::trigger_request_body(scope))
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_body_error)?;
        Ok(wire::parse_trigger_response(status, &body, scope))
    }

    async fn state(&self, scope: &SyncScope) -> Result<SyncState, TransportError> {
        let url = self.url(&wire::state_path(scope));

        let response = self.client.get(&url).send().await.map_err(map_send_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_body_error)?;
        Ok(wire::parse_state_response(status, &body, scope))
    }
}
