//! Error types for the storage layer.

use civic_types::{PageId, Revision};
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Page not found.
    #[error("page not found: {0}")]
    NotFound(PageId),

    /// Another page already uses the slug.
    #[error("slug already taken: {0}")]
    DuplicateSlug(String),

    /// A page with this id already exists.
    #[error("page already exists: {0}")]
    AlreadyExists(PageId),

    /// The writer's base revision is stale.
    #[error("revision conflict on page {page_id}: expected {expected}, found {actual}")]
    RevisionConflict {
        page_id: PageId,
        expected: Revision,
        actual: Revision,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A writer panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}
