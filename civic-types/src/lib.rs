//! Core type definitions for the civic portal content core.
//!
//! This crate defines the small, content-agnostic types shared by every
//! other crate:
//! - Page, block and event identifiers (UUID v7)
//! - The optimistic-concurrency [`Revision`] counter
//! - The acting party ([`Actor`]) behind a mutation
//! - Audit events emitted by committed page mutations
//!
//! Content blocks, headers and validation live in `civic-model`.

mod actor;
mod event;
mod ids;
mod revision;

pub use actor::Actor;
pub use event::{MoveDirection, PageEvent, PageEventPayload};
pub use ids::{BlockId, EventId, PageId};
pub use revision::Revision;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
