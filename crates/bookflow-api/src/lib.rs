//! Bookflow API client and reconciliation engine
//!
//! Converges declared accounting resources in Zoho Books to their desired
//! state: locate the target (across however many listing pages it takes),
//! diff it against the declaration, and issue at most one mutating request.
//! Dry-run computes the identical plan and stops at the execution boundary.
//!
//! The only external boundary is the [`Transport`] capability; everything
//! above it is deterministic given the transport's responses. No retries,
//! no caching across invocations, no optimistic-concurrency checks — the
//! remote system is the sole source of truth.

pub mod client;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod locate;
pub mod reconcile;
pub mod report;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

// Re-exports
pub use client::BooksClient;
pub use envelope::{CODE_NOT_FOUND, Envelope};
pub use error::{ApiError, Result, TransportError};
pub use fetch::fetch_all;
pub use locate::{Selector, find, find_by_id, find_by_identity, find_by_secondary};
pub use reconcile::{Reconciler, plan};
pub use report::outcome;
pub use transport::{HttpTransport, Method, Transport, TransportResponse};
