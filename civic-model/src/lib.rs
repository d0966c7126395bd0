//! Content model for the civic portal's static pages.
//!
//! Defines the types every other layer builds on:
//! - [`Page`]: the aggregate holding a mutable draft and an optional
//!   published snapshot, with `has_unpublished_changes` derived by
//!   structural comparison
//! - [`Header`] and [`ContentBlock`]: the page header and the lock-carrying
//!   block envelope around one of eight [`BlockContent`] kinds
//! - [`BlockType`]: the closed block registry and its schemas
//! - [`validate_block`], [`validate_header`], [`validate_snapshot`]: pure
//!   field-level validation
//! - [`Slug`]: the immutable URL identifier of a page

mod block;
mod header;
mod page;
mod registry;
mod slug;
mod validate;

pub use block::{
    BlockContent, Card, CardListContent, ContactContent, ContactItem, ContentBlock,
    HighlightContent, HighlightVariant, LinkItem, LinkListContent, LinkTarget, MapContent,
    MediaContent, MediaImage, NoticeContent, TextContent,
};
pub use header::{Header, HeaderKind, MAX_HEADER_IMAGES};
pub use page::{Page, PageSnapshot, PageView, PublishedSnapshot};
pub use registry::{BlockSchema, BlockType, addable_types, can_add_map};
pub use slug::{MAX_SLUG_LEN, Slug, is_valid_slug};
pub use validate::{
    LAT_RANGE, LNG_RANGE, MAX_MEDIA_IMAGES, Violation, ViolationKind, ZOOM_RANGE, is_http_url,
    validate_block, validate_content, validate_header, validate_snapshot,
};

/// Errors raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("unknown block type: {0}")]
    UnknownBlockType(String),
}
