//! Content blocks: the lock-carrying envelope and the eight payload kinds.
//!
//! The envelope ([`ContentBlock`]) holds identity, ordering and the two
//! independent lock bits. The payload ([`BlockContent`]) is a closed sum
//! type with one variant per block kind, so lock state stays orthogonal to
//! content shape.
//!
//! On the wire a block is a flat object:
//! `{"id": ..., "order": 0, "structure_locked": false, "content_locked": false,
//!   "type": "text", "content": {...}}`.

use civic_types::BlockId;
use serde::{Deserialize, Serialize};

use crate::registry::BlockType;

/// One unit of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: BlockId,
    /// Position hint. `None` or a negative value counts as missing and
    /// sorts after every valid order.
    #[serde(default)]
    pub order: Option<i64>,
    /// Forbids removal and reordering, by any actor.
    #[serde(default)]
    pub structure_locked: bool,
    /// Forbids content replacement, by any actor.
    #[serde(default)]
    pub content_locked: bool,
    #[serde(flatten)]
    pub content: BlockContent,
}

impl ContentBlock {
    /// Creates an unlocked block with a fresh id.
    #[must_use]
    pub fn new(content: BlockContent, order: i64) -> Self {
        Self {
            id: BlockId::new(),
            order: Some(order),
            structure_locked: false,
            content_locked: false,
            content,
        }
    }

    #[must_use]
    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }

    /// Returns the order if it is present and non-negative.
    #[must_use]
    pub fn valid_order(&self) -> Option<i64> {
        self.order.filter(|o| *o >= 0)
    }

    /// Returns the notice id carried by a notice block.
    #[must_use]
    pub fn notice_id(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Notice(n) => Some(n.notice_id.as_str()),
            _ => None,
        }
    }
}

/// Type-specific block payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum BlockContent {
    Text(TextContent),
    Highlight(HighlightContent),
    CardList(CardListContent),
    Media(MediaContent),
    Map(MapContent),
    Contact(ContactContent),
    LinkList(LinkListContent),
    Notice(NoticeContent),
}

impl BlockContent {
    #[must_use]
    pub fn block_type(&self) -> BlockType {
        match self {
            Self::Text(_) => BlockType::Text,
            Self::Highlight(_) => BlockType::Highlight,
            Self::CardList(_) => BlockType::CardList,
            Self::Media(_) => BlockType::Media,
            Self::Map(_) => BlockType::Map,
            Self::Contact(_) => BlockType::Contact,
            Self::LinkList(_) => BlockType::LinkList,
            Self::Notice(_) => BlockType::Notice,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_hr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default)]
    pub body_hr: String,
    #[serde(default)]
    pub body_en: String,
}

/// Visual emphasis of a highlight block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightVariant {
    #[default]
    Info,
    Warning,
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightContent {
    #[serde(default)]
    pub title_hr: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub body_hr: String,
    #[serde(default)]
    pub body_en: String,
    #[serde(default)]
    pub variant: HighlightVariant,
}

/// Where a link points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkTarget {
    /// Off-site address; must use `http://` or `https://`.
    External { url: String },
    /// Path within the portal; must start with `/`.
    Internal { path: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub title_hr: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_hr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardListContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_hr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaImage {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_hr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_en: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaContent {
    #[serde(default)]
    pub images: Vec<MediaImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_hr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_en: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapContent {
    pub lat: f64,
    pub lng: f64,
    pub zoom: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_hr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactItem {
    #[serde(default)]
    pub name_hr: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_hr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default)]
    pub contacts: Vec<ContactItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkItem {
    #[serde(default)]
    pub label_hr: String,
    #[serde(default)]
    pub label_en: String,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkListContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_hr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default)]
    pub links: Vec<LinkItem>,
}

/// Content of a system-owned notice block.
///
/// The payload is produced and validated by the notification subsystem;
/// the content core treats it as opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeContent {
    /// Identity of the notice in the notification subsystem.
    pub notice_id: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}
