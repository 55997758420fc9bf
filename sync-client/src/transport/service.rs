//! In-process transport.
//!
//! Issues the same wire-contract requests as [`super::HttpTransport`], but
//! hands them straight to a `tower::Service` instead of the network. Mounting
//! the coordination endpoint's router in the same process gives a loopback
//! deployment with no sockets involved.

use super::{Transport, TransportError};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use std::time::Duration;
use sync_types::{wire, SyncScope, SyncState, TriggerResponse};
use tower::util::ServiceExt;
use tower::{BoxError, Service};

/// Default bound on a single in-process call.
pub const DEFAULT_SERVICE_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport that calls a `tower::Service` directly.
///
/// The service is cloned per call, so routers and other cheaply clonable
/// services work as-is.
#[derive(Debug, Clone)]
pub struct ServiceTransport<S> {
    service: S,
    prefix: String,
    timeout: Duration,
}

impl<S> ServiceTransport<S> {
    /// Create a transport over `service`, with wire paths at its root.
    pub fn new(service: S) -> Self {
        Self {
            service,
            prefix: String::new(),
            timeout: DEFAULT_SERVICE_TIMEOUT,
        }
    }

    /// Mount wire paths under `prefix` (e.g. `/api`).
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    /// Bound each call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<S> ServiceTransport<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
{
    async fn call(&self, request: Request<Body>) -> Result<(u16, String), TransportError> {
        let call = self.service.clone().oneshot(request);
        let response = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| TransportError::Timeout)?
            .map_err(|e| {
                let e: BoxError = e.into();
                TransportError::Connection(e.to_string())
            })?;

        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|e| TransportError::Body(e.to_string()))?;

        Ok((status, body))
    }
}

#[async_trait]
impl<S> Transport for ServiceTransport<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
{
    async fn trigger(&self, scope: &SyncScope) -> Result<TriggerResponse, TransportError> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("{}{}", self.prefix, wire::TRIGGER_PATH))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(wire::trigger_request_body(scope)))
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let (status, body) = self.call(request).await?;
        Ok(wire::parse_trigger_response(status, &body, scope))
    }

    async fn state(&self, scope: &SyncScope) -> Result<SyncState, TransportError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(format!("{}{}", self.prefix, wire::state_path(scope)))
            .body(Body::empty())
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let (status, body) = self.call(request).await?;
        Ok(wire::parse_state_response(status, &body, scope))
    }
}
