//! Minimal multipart/form-data encoder for write operations.
//!
//! # Design
//! The API accepts every write as a multipart form so records can carry a
//! file attachment alongside their scalar fields. `MultipartForm` builds the
//! RFC 7578 body in memory: scalar parts carry only a `Content-Disposition`,
//! file parts add a `filename` and their own `Content-Type`, and the body is
//! closed with the terminal boundary. The boundary is a random UUID, so
//! field values never need escaping against it.

use std::fmt::Display;

use uuid::Uuid;

use crate::types::FilePart;

/// An in-memory multipart/form-data body under construction.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: format!("form-{}", Uuid::new_v4().simple()),
            buf: Vec::new(),
        }
    }

    /// Append a scalar field. Values are encoded with their `Display`
    /// representation (dates as `YYYY-MM-DD`, booleans as `true`/`false`).
    pub fn text(mut self, name: &str, value: impl Display) -> Self {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.buf.extend_from_slice(format!("{value}\r\n").as_bytes());
        self
    }

    /// Append a file field.
    pub fn file(mut self, name: &str, part: &FilePart) -> Self {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{}\"\r\n",
                part.file_name
            )
            .as_bytes(),
        );
        self.buf
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        self.buf.extend_from_slice(&part.bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Close the body and return the `Content-Type` header value plus the
    /// encoded bytes.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        let content_type = format!("multipart/form-data; boundary={}", self.boundary);
        (content_type, self.buf)
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}
