//! Audit events emitted by committed page mutations.
//!
//! Each event is immutable and carries the revision the page reached when
//! the mutation committed, so a page's history can be replayed in order.
//! Block types travel as their wire names so this crate stays independent
//! of the content model.

use crate::{Actor, BlockId, EventId, PageId, Revision};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a single-step block move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// What happened to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data", rename_all = "snake_case")]
pub enum PageEventPayload {
    PageCreated {
        slug: String,
    },

    /// The whole-draft surface was used.
    DraftUpdated {
        header_changed: bool,
        blocks_replaced: bool,
    },

    BlockAdded {
        block_id: BlockId,
        block_type: String,
    },

    BlockRemoved {
        block_id: BlockId,
        block_type: String,
    },

    BlockContentUpdated {
        block_id: BlockId,
    },

    StructureLockToggled {
        block_id: BlockId,
        locked: bool,
    },

    ContentLockToggled {
        block_id: BlockId,
        locked: bool,
    },

    BlockMoved {
        block_id: BlockId,
        direction: MoveDirection,
    },

    Published {
        published_at: DateTime<Utc>,
    },

    /// The live snapshot was withdrawn. `previous_published_at` is the
    /// only record of when it went live, since the page itself forgets it.
    Unpublished {
        previous_published_at: DateTime<Utc>,
    },

    PageDeleted {
        slug: String,
    },
}

/// A committed change to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEvent {
    pub id: EventId,
    pub page_id: PageId,
    pub actor: Actor,
    /// Revision of the page after the change. Deletion events carry the
    /// last revision the page had.
    pub revision: Revision,
    pub timestamp: DateTime<Utc>,
    pub payload: PageEventPayload,
}

impl PageEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(page_id: PageId, actor: Actor, revision: Revision, payload: PageEventPayload) -> Self {
        Self {
            id: EventId::new(),
            page_id,
            actor,
            revision,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Serializes the event to JSON for hand-off to an external audit sink.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses an event previously produced by [`PageEvent::to_json`].
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
