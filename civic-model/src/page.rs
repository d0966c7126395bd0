//! The page aggregate: an always-present draft and an optional published snapshot.

use chrono::{DateTime, Utc};
use civic_types::{BlockId, PageId, Revision};
use serde::{Deserialize, Serialize};

use crate::block::ContentBlock;
use crate::header::Header;
use crate::slug::Slug;

/// Header and blocks as one value. Drafts and published copies share this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub header: Header,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

impl PageSnapshot {
    pub fn new(header: Header, blocks: Vec<ContentBlock>) -> Self {
        Self { header, blocks }
    }

    pub fn block(&self, id: BlockId) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut ContentBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }
}

/// The externally visible copy of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedSnapshot {
    #[serde(flatten)]
    pub content: PageSnapshot,
    pub published_at: DateTime<Utc>,
}

/// A static content page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    slug: Slug,
    pub draft: PageSnapshot,
    #[serde(default)]
    pub published: Option<PublishedSnapshot>,
    pub created_at: DateTime<Utc>,
    pub draft_updated_at: DateTime<Utc>,
    pub revision: Revision,
}

impl Page {
    /// Creates an unpublished page at the initial revision.
    pub fn new(slug: Slug, draft: PageSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            id: PageId::new(),
            slug,
            draft,
            published: None,
            created_at: now,
            draft_updated_at: now,
            revision: Revision::INITIAL,
        }
    }

    /// Fixed at creation.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn is_published(&self) -> bool {
        self.published.is_some()
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published.as_ref().map(|p| p.published_at)
    }

    /// True whenever the draft differs from the live snapshot, and always
    /// true while there is no live snapshot.
    pub fn has_unpublished_changes(&self) -> bool {
        match &self.published {
            Some(published) => published.content != self.draft,
            None => true,
        }
    }

    /// Flat view with the field names the admin console expects.
    pub fn view(&self) -> PageView<'_> {
        PageView {
            id: self.id,
            slug: self.slug.as_str(),
            draft_header: &self.draft.header,
            draft_blocks: &self.draft.blocks,
            published_header: self.published.as_ref().map(|p| &p.content.header),
            published_blocks: self.published.as_ref().map(|p| p.content.blocks.as_slice()),
            published_at: self.published_at(),
            has_unpublished_changes: self.has_unpublished_changes(),
            draft_updated_at: self.draft_updated_at,
            revision: self.revision,
        }
    }
}

/// Serializable full page view.
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub id: PageId,
    pub slug: &'a str,
    pub draft_header: &'a Header,
    pub draft_blocks: &'a [ContentBlock],
    pub published_header: Option<&'a Header>,
    pub published_blocks: Option<&'a [ContentBlock]>,
    pub published_at: Option<DateTime<Utc>>,
    pub has_unpublished_changes: bool,
    pub draft_updated_at: DateTime<Utc>,
    pub revision: Revision,
}
