//! The party on whose behalf a mutation is performed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is mutating a page.
///
/// Editors are identified by an opaque account handle supplied by the
/// session layer. [`Actor::System`] is reserved for the notice
/// synchronization boundary; its commits are recorded under that name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Actor {
    Editor(String),
    System,
}

impl Actor {
    /// Convenience constructor for an editor actor.
    pub fn editor(id: impl Into<String>) -> Self {
        Self::Editor(id.into())
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editor(id) => write!(f, "editor:{id}"),
            Self::System => write!(f, "system"),
        }
    }
}
