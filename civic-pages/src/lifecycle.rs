//! Publish lifecycle: promoting a validated draft and withdrawing it.
//!
//! ```text
//!   Unpublished ──publish──▶ PublishedCurrent ──draft edit──▶ PublishedStale
//!        ▲                        │    ▲                          │
//!        └────────unpublish───────┘    └──────────publish─────────┘
//! ```
//!
//! Publish is all-or-nothing: the whole draft is validated first and the
//! page is only touched if there are no violations.

use chrono::{DateTime, Utc};
use civic_model::{Page, PublishedSnapshot, validate_snapshot};
use serde::Serialize;

use crate::error::{PageError, PageResult};

/// Where a page stands relative to its live snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishState {
    Unpublished,
    /// The live snapshot equals the draft.
    PublishedCurrent,
    /// The draft has diverged from the live snapshot.
    PublishedStale,
}

pub fn publish_state(page: &Page) -> PublishState {
    match (page.is_published(), page.has_unpublished_changes()) {
        (false, _) => PublishState::Unpublished,
        (true, false) => PublishState::PublishedCurrent,
        (true, true) => PublishState::PublishedStale,
    }
}

/// Validates the entire draft and, if clean, makes it the live snapshot.
///
/// Allowed from every state. Publishing an unchanged draft again still
/// stamps a fresh `published_at`. Returns that timestamp.
pub fn publish(page: &mut Page, now: DateTime<Utc>) -> PageResult<DateTime<Utc>> {
    let violations = validate_snapshot(&page.draft);
    if !violations.is_empty() {
        return Err(PageError::ValidationFailed(violations));
    }

    page.published = Some(PublishedSnapshot {
        content: page.draft.clone(),
        published_at: now,
    });
    Ok(now)
}

/// Withdraws the live snapshot, leaving the draft untouched.
///
/// `published_at` goes with the snapshot. The previous value is returned
/// so it can be recorded in the audit trail.
pub fn unpublish(page: &mut Page) -> PageResult<DateTime<Utc>> {
    let previous = page
        .published
        .take()
        .ok_or(PageError::NoPublishedSnapshot(page.id))?;
    Ok(previous.published_at)
}
