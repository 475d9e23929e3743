//! Data-synchronization layer for the NGO admin API.
//!
//! # Overview
//! Sits between the deterministic `admin_core` crate and the UI: executes
//! the core's `HttpRequest` values over real HTTP with a bearer credential
//! attached, caches collections under hierarchical query keys with a
//! freshness window, invalidates by key prefix after mutations, and turns
//! every failure into a single user-visible notification.
//!
//! # Design
//! - No ambient singletons: `AdminApi` is constructed with its cache,
//!   transport and notifier, and everything is injectable for tests.
//! - No optimistic merging: mutations invalidate and refetch, never patch
//!   cached state speculatively.
//! - Per cache key, at most one fetch is in flight at a time.

pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod notify;
pub mod resources;
pub mod transport;

pub use cache::{QueryCache, QueryKey, DEFAULT_FRESHNESS};
pub use config::{Config, ConfigError};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::SyncError;
pub use notify::{Notification, NotificationKind, Notifier};
pub use resources::AdminApi;
pub use transport::{BearerTransport, SessionProvider, StaticSession, Transport, UreqTransport};
