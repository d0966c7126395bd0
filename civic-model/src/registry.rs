//! The closed registry of block kinds and their declared content schemas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::block::ContentBlock;

/// One of the eight fixed block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Text,
    Highlight,
    CardList,
    Media,
    Map,
    Contact,
    LinkList,
    Notice,
}

impl BlockType {
    /// Every block kind, in admin-console display order.
    pub const ALL: [BlockType; 8] = [
        Self::Text,
        Self::Highlight,
        Self::CardList,
        Self::Media,
        Self::Map,
        Self::Contact,
        Self::LinkList,
        Self::Notice,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Highlight => "highlight",
            Self::CardList => "card_list",
            Self::Media => "media",
            Self::Map => "map",
            Self::Contact => "contact",
            Self::LinkList => "link_list",
            Self::Notice => "notice",
        }
    }

    /// Whether an ordinary editor may add a block of this kind.
    pub fn is_addable(&self) -> bool {
        !self.is_system_managed()
    }

    /// Kinds whose lifecycle and content belong to the system actor.
    pub fn is_system_managed(&self) -> bool {
        matches!(self, Self::Notice)
    }

    /// Kinds limited to a single instance per page.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Map)
    }

    /// Declared content schema for this kind.
    pub fn schema(&self) -> BlockSchema {
        match self {
            Self::Text => BlockSchema::flat(*self, &["body_hr", "body_en"]),
            Self::Highlight => {
                BlockSchema::flat(*self, &["title_hr", "title_en", "body_hr", "body_en"])
            }
            Self::CardList => BlockSchema::list(*self, "cards", &["title_hr", "title_en"]),
            Self::Media => BlockSchema::list(*self, "images", &["url"]),
            Self::Map => BlockSchema::flat(*self, &["lat", "lng", "zoom"]),
            Self::Contact => BlockSchema::list(*self, "contacts", &["name_hr", "name_en"]),
            Self::LinkList => {
                BlockSchema::list(*self, "links", &["label_hr", "label_en", "target"])
            }
            Self::Notice => BlockSchema::flat(*self, &["notice_id"]),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = crate::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| crate::ModelError::UnknownBlockType(s.to_string()))
    }
}

/// Required-field declaration for a block kind.
///
/// List-of-item kinds declare the item collection and the fields each
/// item must carry on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSchema {
    pub block_type: BlockType,
    pub required_fields: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_field: Option<&'static str>,
    pub item_required_fields: &'static [&'static str],
}

impl BlockSchema {
    fn flat(block_type: BlockType, required: &'static [&'static str]) -> Self {
        Self {
            block_type,
            required_fields: required,
            items_field: None,
            item_required_fields: &[],
        }
    }

    fn list(
        block_type: BlockType,
        items_field: &'static str,
        item_required: &'static [&'static str],
    ) -> Self {
        Self {
            block_type,
            required_fields: &[],
            items_field: Some(items_field),
            item_required_fields: item_required,
        }
    }

    /// True for kinds whose content is a list of independently validated items.
    pub fn is_item_list(&self) -> bool {
        self.items_field.is_some()
    }
}

/// True iff no existing block is a map.
pub fn can_add_map(blocks: &[ContentBlock]) -> bool {
    !blocks.iter().any(|b| b.block_type() == BlockType::Map)
}

/// Kinds an ordinary editor may offer in an "add block" menu.
pub fn addable_types() -> impl Iterator<Item = BlockType> {
    BlockType::ALL.into_iter().filter(BlockType::is_addable)
}
