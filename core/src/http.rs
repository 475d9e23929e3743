//! HTTP transport types for the sync-layer-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the sync layer is responsible for executing
//! the actual round-trip. This separation keeps the core deterministic and
//! easy to test.
//!
//! Bodies are raw bytes because write operations are multipart/form-data
//! encoded and may carry file attachments.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `AdminClient::build_*` methods. The sync layer executes this
/// request against the network and returns the corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Append a header, returning the modified request. Used by the sync
    /// layer to attach the bearer credential without rebuilding the request.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the sync layer after executing an `HttpRequest`, then
/// passed to `AdminClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
