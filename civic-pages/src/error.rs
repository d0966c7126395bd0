//! Error types for the page content core.

use civic_model::{BlockType, Violation};
use civic_storage::StorageError;
use civic_types::{BlockId, PageId, Revision};
use thiserror::Error;

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Errors that can occur in page operations.
///
/// Every failing operation leaves the page exactly as it was.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("slug already taken: {0}")]
    DuplicateSlug(String),

    #[error("page not found: {0}")]
    PageNotFound(PageId),

    #[error("no page with slug {0:?}")]
    SlugNotFound(String),

    #[error("block {block_id} not found on page {page_id}")]
    BlockNotFound { page_id: PageId, block_id: BlockId },

    /// Notice blocks are created, removed and rewritten only by the system actor.
    #[error("block {0} appears more than once")]
    DuplicateBlockId(BlockId),

    #[error("{0} blocks are managed by the system")]
    SystemManagedType(BlockType),

    #[error("a page may contain at most one map block")]
    MapLimitExceeded,

    #[error("block {0} is structure-locked")]
    StructureLocked(BlockId),

    #[error("block {0} is content-locked")]
    ContentLocked(BlockId),

    #[error("block {block_id} is a {expected} block, got {actual} content")]
    BlockTypeMismatch {
        block_id: BlockId,
        expected: BlockType,
        actual: BlockType,
    },

    #[error("validation failed: {}", summarize(.0))]
    ValidationFailed(Vec<Violation>),

    #[error("page {0} has no published snapshot")]
    NoPublishedSnapshot(PageId),

    #[error("page {page_id} changed concurrently: based on {expected}, now at {actual}")]
    Conflict {
        page_id: PageId,
        expected: Revision,
        actual: Revision,
    },

    #[error("storage error: {0}")]
    Storage(StorageError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Outcome class of a failure, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself is unacceptable; retrying it unchanged will fail again.
    Validation,
    /// The page moved on underneath the caller; refetch and retry.
    Conflict,
    NotFound,
    Internal,
}

impl PageError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidSlug(_)
            | Self::DuplicateBlockId(_)
            | Self::SystemManagedType(_)
            | Self::MapLimitExceeded
            | Self::StructureLocked(_)
            | Self::ContentLocked(_)
            | Self::BlockTypeMismatch { .. }
            | Self::ValidationFailed(_)
            | Self::NoPublishedSnapshot(_) => ErrorClass::Validation,
            Self::DuplicateSlug(_) | Self::Conflict { .. } => ErrorClass::Conflict,
            Self::PageNotFound(_) | Self::SlugNotFound(_) | Self::BlockNotFound { .. } => {
                ErrorClass::NotFound
            }
            Self::Storage(_) | Self::Config(_) => ErrorClass::Internal,
        }
    }

    /// Field-level violations carried by a validation failure.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::ValidationFailed(v) => v,
            _ => &[],
        }
    }
}

impl From<StorageError> for PageError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => Self::PageNotFound(id),
            StorageError::DuplicateSlug(slug) => Self::DuplicateSlug(slug),
            StorageError::RevisionConflict {
                page_id,
                expected,
                actual,
            } => Self::Conflict {
                page_id,
                expected,
                actual,
            },
            other => Self::Storage(other),
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
