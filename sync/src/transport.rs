//! Request execution: the I/O half of the build/parse split.
//!
//! # Design
//! The core crate describes requests as plain data; `Transport` is the seam
//! where they become real round-trips. `UreqTransport` runs the blocking
//! ureq client on the blocking pool. `BearerTransport` wraps any transport
//! and attaches the credential from the external session provider — the
//! request-interceptor role. Tests substitute their own `Transport` to
//! script responses without a network.

use std::sync::Arc;

use admin_core::{HttpMethod, HttpRequest, HttpResponse};
use async_trait::async_trait;

use crate::error::SyncError;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, SyncError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, SyncError> {
        (**self).execute(request).await
    }
}

/// The external identity provider's session. `token` is cheap and
/// synchronous; `None` means no active session.
pub trait SessionProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A fixed-token session, for tools and tests.
#[derive(Debug, Clone)]
pub struct StaticSession(pub String);

impl SessionProvider for StaticSession {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Attaches `Authorization: Bearer {token}` to every request before
/// delegating. With no active session the request proceeds uncredentialed
/// and the server rejects it.
pub struct BearerTransport<T> {
    inner: T,
    session: Arc<dyn SessionProvider>,
}

impl<T> BearerTransport<T> {
    pub fn new(inner: T, session: Arc<dyn SessionProvider>) -> Self {
        Self { inner, session }
    }
}

#[async_trait]
impl<T: Transport> Transport for BearerTransport<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, SyncError> {
        let request = match self.session.token() {
            Some(token) => request.with_header("authorization", &format!("Bearer {token}")),
            None => request,
        };
        self.inner.execute(request).await
    }
}

/// Executes requests with ureq on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct UreqTransport;

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, SyncError> {
        tokio::task::spawn_blocking(move || round_trip(request))
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?
    }
}

fn apply_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    builder
}

/// Execute an `HttpRequest` with ureq. Automatic status-as-error behavior is
/// disabled so 4xx/5xx responses come back as data — status interpretation
/// belongs to the core parsers.
fn round_trip(request: HttpRequest) -> Result<HttpResponse, SyncError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (request.method, request.body) {
        (HttpMethod::Get, _) => apply_headers(agent.get(&request.url), &request.headers).call(),
        (HttpMethod::Delete, _) => {
            apply_headers(agent.delete(&request.url), &request.headers).call()
        }
        (HttpMethod::Post, Some(body)) => {
            apply_headers(agent.post(&request.url), &request.headers).send(&body[..])
        }
        (HttpMethod::Post, None) => {
            apply_headers(agent.post(&request.url), &request.headers).send_empty()
        }
        (HttpMethod::Put, Some(body)) => {
            apply_headers(agent.put(&request.url), &request.headers).send(&body[..])
        }
        (HttpMethod::Put, None) => {
            apply_headers(agent.put(&request.url), &request.headers).send_empty()
        }
        (HttpMethod::Patch, Some(body)) => {
            apply_headers(agent.patch(&request.url), &request.headers).send(&body[..])
        }
        (HttpMethod::Patch, None) => {
            apply_headers(agent.patch(&request.url), &request.headers).send_empty()
        }
    };

    let mut response = result.map_err(|e| SyncError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| SyncError::Transport(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}
