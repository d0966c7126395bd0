//! Page service: loads a page, applies one editor or lifecycle operation,
//! commits it with a revision check and records the audit event.
//!
//! Every mutation follows the same path:
//!
//! ```text
//!   load ──▶ apply to a private copy ──▶ save (compare revision) ──▶ append event
//! ```
//!
//! A failed operation never reaches the store. A save that loses the race
//! against another writer surfaces as [`PageError::Conflict`].

use chrono::{DateTime, Utc};
use civic_model::{BlockContent, BlockType, ContentBlock, Header, Page};
use civic_storage::{EventStore, MemoryEventStore, MemoryPageStore, PageStore};
use civic_types::{Actor, BlockId, MoveDirection, PageEvent, PageEventPayload, PageId, Revision};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::PagesConfig;
use crate::editor::{self, DraftChange, DraftEditor, DraftPatch};
use crate::error::{PageError, PageResult};
use crate::lifecycle;
use crate::order::{self, ReorderOutcome};

/// The value an operation produced and the revision the page is now at.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed<T> {
    pub value: T,
    pub revision: Revision,
}

/// What an operation did to the page copy it was handed.
///
/// `event: None` means nothing changed and nothing is written.
pub(crate) struct Applied<T> {
    pub value: T,
    pub event: Option<PageEventPayload>,
}

impl<T> Applied<T> {
    pub(crate) fn changed(value: T, event: PageEventPayload) -> Self {
        Self {
            value,
            event: Some(event),
        }
    }

    pub(crate) fn unchanged(value: T) -> Self {
        Self { value, event: None }
    }
}

/// One page of a page listing.
#[derive(Debug, Clone, Serialize)]
pub struct PageList {
    pub pages: Vec<Page>,
    pub total: usize,
    /// 1-based.
    pub page: usize,
    pub per_page: usize,
}

/// The live copy of a page as the public site renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedPage {
    pub id: PageId,
    pub slug: String,
    pub header: Header,
    /// In visual order.
    pub blocks: Vec<ContentBlock>,
    pub published_at: DateTime<Utc>,
}

/// Entry point for every page operation.
pub struct PageService {
    pages: Arc<dyn PageStore>,
    events: Arc<dyn EventStore>,
    editor: DraftEditor,
    config: PagesConfig,
}

impl PageService {
    pub fn new(
        pages: Arc<dyn PageStore>,
        events: Arc<dyn EventStore>,
        config: PagesConfig,
    ) -> PageResult<Self> {
        config.validate()?;
        Ok(Self {
            pages,
            events,
            editor: DraftEditor::new(&config),
            config,
        })
    }

    /// A service over fresh in-memory stores.
    pub fn in_memory(config: PagesConfig) -> PageResult<Self> {
        Self::new(
            Arc::new(MemoryPageStore::new()),
            Arc::new(MemoryEventStore::new()),
            config,
        )
    }

    pub fn config(&self) -> &PagesConfig {
        &self.config
    }

    // ── Queries ──────────────────────────────────────────────────

    pub fn get_page(&self, id: PageId) -> PageResult<Page> {
        self.pages.get(id)?.ok_or(PageError::PageNotFound(id))
    }

    pub fn get_page_by_slug(&self, slug: &str) -> PageResult<Page> {
        self.pages
            .get_by_slug(slug)?
            .ok_or_else(|| PageError::SlugNotFound(slug.to_string()))
    }

    /// Pages ordered by slug. `page` is 1-based; 0 is read as 1.
    pub fn list_pages(&self, page: usize, per_page: Option<usize>) -> PageResult<PageList> {
        let per_page = self.config.page_size(per_page);
        let page = page.max(1);
        let offset = (page - 1).saturating_mul(per_page);
        Ok(PageList {
            pages: self.pages.list(per_page, offset)?,
            total: self.pages.count()?,
            page,
            per_page,
        })
    }

    /// The live copy of the page at `slug`.
    ///
    /// Unpublished pages are reported as missing.
    pub fn published_view(&self, slug: &str) -> PageResult<PublishedPage> {
        let page = self.get_page_by_slug(slug)?;
        let published = page
            .published
            .as_ref()
            .ok_or_else(|| PageError::SlugNotFound(slug.to_string()))?;
        Ok(PublishedPage {
            id: page.id,
            slug: page.slug().as_str().to_string(),
            header: published.content.header.clone(),
            blocks: order::sorted(&published.content.blocks)
                .into_iter()
                .cloned()
                .collect(),
            published_at: published.published_at,
        })
    }

    /// Block kinds an editor could add to the page right now.
    pub fn addable_types(&self, id: PageId) -> PageResult<Vec<BlockType>> {
        let page = self.get_page(id)?;
        Ok(BlockType::ALL
            .into_iter()
            .filter(|t| editor::can_add(&page, *t))
            .collect())
    }

    /// Audit trail of one page in commit order.
    pub fn events_for_page(&self, id: PageId) -> PageResult<Vec<PageEvent>> {
        Ok(self.events.events_for_page(id)?)
    }

    /// Latest events across every page, newest first.
    pub fn recent_activity(&self, limit: usize, offset: usize) -> PageResult<Vec<PageEvent>> {
        Ok(self.events.recent(limit, offset)?)
    }

    // ── Page lifecycle ───────────────────────────────────────────

    pub fn create_page(
        &self,
        actor: &Actor,
        slug: &str,
        header: Header,
        blocks: Vec<ContentBlock>,
    ) -> PageResult<Page> {
        let page = self.editor.create_page(slug, header, blocks, Utc::now())?;
        self.pages.insert(page.clone())?;
        info!(page_id = %page.id, slug = %slug, actor = %actor, "Page created");
        self.record(
            actor,
            &page,
            PageEventPayload::PageCreated {
                slug: slug.to_string(),
            },
        );
        Ok(page)
    }

    /// Removes a page and its live copy. Its audit trail is kept.
    pub fn delete_page(&self, actor: &Actor, id: PageId) -> PageResult<Page> {
        let page = self.pages.delete(id)?;
        info!(page_id = %id, slug = %page.slug(), actor = %actor, "Page deleted");
        self.record(
            actor,
            &page,
            PageEventPayload::PageDeleted {
                slug: page.slug().as_str().to_string(),
            },
        );
        Ok(page)
    }

    pub fn publish(&self, actor: &Actor, id: PageId) -> PageResult<Committed<DateTime<Utc>>> {
        let committed = self.mutate(actor, id, None, |_, page, now| {
            let published_at = lifecycle::publish(page, now)?;
            Ok(Applied::changed(
                published_at,
                PageEventPayload::Published { published_at },
            ))
        })?;
        info!(page_id = %id, revision = %committed.revision, "Page published");
        Ok(committed)
    }

    /// Withdraws the live copy. Returns the `published_at` it carried.
    pub fn unpublish(&self, actor: &Actor, id: PageId) -> PageResult<Committed<DateTime<Utc>>> {
        let committed = self.mutate(actor, id, None, |_, page, _| {
            let previous = lifecycle::unpublish(page)?;
            Ok(Applied::changed(
                previous,
                PageEventPayload::Unpublished {
                    previous_published_at: previous,
                },
            ))
        })?;
        info!(page_id = %id, revision = %committed.revision, "Page unpublished");
        Ok(committed)
    }

    // ── Draft editing ────────────────────────────────────────────

    /// Applies a whole-draft patch built from the page at `base_revision`.
    pub fn update_draft(
        &self,
        actor: &Actor,
        id: PageId,
        base_revision: Revision,
        patch: DraftPatch,
    ) -> PageResult<Committed<DraftChange>> {
        self.mutate(actor, id, Some(base_revision), |editor, page, now| {
            let change = editor.update_draft(page, patch, now)?;
            if change.is_empty() {
                return Ok(Applied::unchanged(change));
            }
            Ok(Applied::changed(
                change,
                PageEventPayload::DraftUpdated {
                    header_changed: change.header_changed,
                    blocks_replaced: change.blocks_replaced,
                },
            ))
        })
    }

    pub fn add_block(
        &self,
        actor: &Actor,
        id: PageId,
        content: BlockContent,
    ) -> PageResult<Committed<BlockId>> {
        self.mutate(actor, id, None, |editor, page, now| {
            let block_type = content.block_type();
            let block_id = editor.add_block(page, content, now)?;
            Ok(Applied::changed(
                block_id,
                PageEventPayload::BlockAdded {
                    block_id,
                    block_type: block_type.to_string(),
                },
            ))
        })
    }

    pub fn remove_block(
        &self,
        actor: &Actor,
        id: PageId,
        block_id: BlockId,
    ) -> PageResult<Committed<ContentBlock>> {
        self.mutate(actor, id, None, |editor, page, now| {
            let removed = editor.remove_block(page, block_id, now)?;
            let block_type = removed.block_type().to_string();
            Ok(Applied::changed(
                removed,
                PageEventPayload::BlockRemoved {
                    block_id,
                    block_type,
                },
            ))
        })
    }

    pub fn update_block_content(
        &self,
        actor: &Actor,
        id: PageId,
        block_id: BlockId,
        content: BlockContent,
    ) -> PageResult<Committed<()>> {
        self.mutate(actor, id, None, |editor, page, now| {
            editor.update_block_content(page, block_id, content, now)?;
            Ok(Applied::changed(
                (),
                PageEventPayload::BlockContentUpdated { block_id },
            ))
        })
    }

    /// Returns the new lock state.
    pub fn toggle_structure_lock(
        &self,
        actor: &Actor,
        id: PageId,
        block_id: BlockId,
    ) -> PageResult<Committed<bool>> {
        self.mutate(actor, id, None, |editor, page, now| {
            let locked = editor.toggle_structure_lock(page, block_id, now)?;
            Ok(Applied::changed(
                locked,
                PageEventPayload::StructureLockToggled { block_id, locked },
            ))
        })
    }

    /// Returns the new lock state.
    pub fn toggle_content_lock(
        &self,
        actor: &Actor,
        id: PageId,
        block_id: BlockId,
    ) -> PageResult<Committed<bool>> {
        self.mutate(actor, id, None, |editor, page, now| {
            let locked = editor.toggle_content_lock(page, block_id, now)?;
            Ok(Applied::changed(
                locked,
                PageEventPayload::ContentLockToggled { block_id, locked },
            ))
        })
    }

    /// Moves a block one step. A move past either end is a no-op and is
    /// not committed.
    pub fn reorder_block(
        &self,
        actor: &Actor,
        id: PageId,
        block_id: BlockId,
        direction: MoveDirection,
    ) -> PageResult<Committed<ReorderOutcome>> {
        self.mutate(actor, id, None, |editor, page, now| {
            match editor.reorder(page, block_id, direction, now)? {
                ReorderOutcome::NoOp => Ok(Applied::unchanged(ReorderOutcome::NoOp)),
                ReorderOutcome::Moved => Ok(Applied::changed(
                    ReorderOutcome::Moved,
                    PageEventPayload::BlockMoved {
                        block_id,
                        direction,
                    },
                )),
            }
        })
    }

    // ── Commit path ──────────────────────────────────────────────

    /// Runs `op` against a copy of the page and commits the result.
    ///
    /// With `base` set, the caller's view must still be current before the
    /// operation runs. Without it, only the store's compare-and-swap
    /// guards against concurrent writers.
    pub(crate) fn mutate<T>(
        &self,
        actor: &Actor,
        id: PageId,
        base: Option<Revision>,
        op: impl FnOnce(&DraftEditor, &mut Page, DateTime<Utc>) -> PageResult<Applied<T>>,
    ) -> PageResult<Committed<T>> {
        let mut page = self.get_page(id)?;
        if let Some(base) = base
            && base != page.revision
        {
            debug!(page_id = %id, base = %base, current = %page.revision, "Stale base revision");
            return Err(PageError::Conflict {
                page_id: id,
                expected: base,
                actual: page.revision,
            });
        }

        let applied = match op(&self.editor, &mut page, Utc::now()) {
            Ok(applied) => applied,
            Err(e) => {
                debug!(page_id = %id, actor = %actor, error = %e, "Page operation refused");
                return Err(e);
            }
        };

        let Some(payload) = applied.event else {
            return Ok(Committed {
                value: applied.value,
                revision: page.revision,
            });
        };

        let saved = self.pages.save(page)?;
        debug!(page_id = %id, revision = %saved.revision, actor = %actor, "Page committed");
        self.record(actor, &saved, payload);
        Ok(Committed {
            value: applied.value,
            revision: saved.revision,
        })
    }

    /// Appends the audit event for a change that is already committed.
    ///
    /// The page write stands even if the append fails.
    fn record(&self, actor: &Actor, page: &Page, payload: PageEventPayload) {
        let event = PageEvent::new(page.id, actor.clone(), page.revision, payload);
        if let Err(e) = self.events.append(event) {
            warn!(
                page_id = %page.id,
                revision = %page.revision,
                error = %e,
                "Failed to record page event"
            );
        }
    }
}
