//! Deterministic core for the NGO admin API client.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (the sync layer executes the round-trips), and
//! provides the pure pieces every resource page composes: list transforms
//! (search / sort / pagination) and form validation.
//!
//! # Design
//! - `AdminClient` is stateless — it holds only `base_url`.
//! - Each API operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Writes are multipart/form-data encoded; `multipart` builds the bodies.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod list;
pub mod multipart;
pub mod types;
pub mod validate;

pub use client::AdminClient;
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{filter_items, sort_items, Pagination, SortDirection, SortKey, SortState};
pub use types::{
    Activity, ActivityInput, ActivityMetrics, Contact, ContactInput, Donation, DonationInput,
    DonationMetrics, Event, EventInput, FilePart, Partner, PartnerInput, Poster, PosterInput,
    RsvpEntry, RsvpInput,
};
pub use validate::{FieldError, ValidationResult};
