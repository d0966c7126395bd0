//! Draft editor: every mutation of a page's working copy.
//!
//! Operations act on a [`Page`] in place and either succeed completely or
//! return an error with the page unchanged. They never touch the published
//! snapshot. Ordinary editor operations refuse to create, remove or rewrite
//! notice blocks whoever calls them; the notice boundary reaches the same
//! primitives through the crate-private `*_notice` methods, which still
//! honour both locks.

use chrono::{DateTime, Utc};
use civic_model::{
    BlockContent, BlockType, ContentBlock, Header, NoticeContent, Page, PageSnapshot, Slug,
    Violation, validate_block, validate_header,
};
use civic_types::{BlockId, MoveDirection};
use serde::{Deserialize, Serialize};

use crate::config::PagesConfig;
use crate::error::{PageError, PageResult};
use crate::lock_guard::{
    check_replacement, ensure_content_unlocked, ensure_editor_managed, ensure_room_for,
    ensure_structure_unlocked, ensure_unique_ids,
};
use crate::order::{self, ReorderOutcome};

/// Whole-draft update. Absent fields are left as they are.
///
/// Prefer the per-block operations for block edits: replacing the whole
/// array is only safe against the notice boundary because the service
/// demands the caller's base revision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftPatch {
    #[serde(default)]
    pub header: Option<Header>,
    #[serde(default)]
    pub blocks: Option<Vec<ContentBlock>>,
}

/// What a [`DraftPatch`] actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftChange {
    pub header_changed: bool,
    pub blocks_replaced: bool,
}

impl DraftChange {
    pub fn is_empty(&self) -> bool {
        !self.header_changed && !self.blocks_replaced
    }
}

/// Applies draft mutations under lock, authorship and content rules.
#[derive(Debug, Clone)]
pub struct DraftEditor {
    validate_on_draft: bool,
}

impl DraftEditor {
    pub fn new(config: &PagesConfig) -> Self {
        Self {
            validate_on_draft: config.validate_on_draft,
        }
    }

    /// Builds a new unpublished page.
    ///
    /// Initial blocks are unlocked and numbered in list order. Uniqueness
    /// of the slug is the store's concern.
    pub fn create_page(
        &self,
        slug: &str,
        header: Header,
        blocks: Vec<ContentBlock>,
        now: DateTime<Utc>,
    ) -> PageResult<Page> {
        let slug = Slug::parse(slug).map_err(|_| PageError::InvalidSlug(slug.to_string()))?;
        ensure_unique_ids(&blocks)?;

        let mut accepted: Vec<ContentBlock> = Vec::with_capacity(blocks.len());
        for (i, mut block) in blocks.into_iter().enumerate() {
            let block_type = block.block_type();
            ensure_editor_managed(block_type)?;
            ensure_room_for(&accepted, block_type)?;
            block.order = Some(i as i64);
            block.structure_locked = false;
            block.content_locked = false;
            accepted.push(block);
        }

        self.check_header(&header)?;
        self.check_blocks(accepted.iter())?;
        Ok(Page::new(slug, PageSnapshot::new(header, accepted), now))
    }

    /// Merges a whole-draft patch.
    pub fn update_draft(
        &self,
        page: &mut Page,
        patch: DraftPatch,
        now: DateTime<Utc>,
    ) -> PageResult<DraftChange> {
        if let Some(header) = &patch.header {
            self.check_header(header)?;
        }
        if let Some(blocks) = &patch.blocks {
            check_replacement(&page.draft.blocks, blocks)?;
            let touched = blocks.iter().filter(|b| match page.draft.block(b.id) {
                Some(old) => old.content != b.content,
                None => true,
            });
            self.check_blocks(touched)?;
        }

        let change = DraftChange {
            header_changed: patch
                .header
                .as_ref()
                .is_some_and(|h| *h != page.draft.header),
            blocks_replaced: patch
                .blocks
                .as_ref()
                .is_some_and(|b| *b != page.draft.blocks),
        };
        if let Some(header) = patch.header {
            page.draft.header = header;
        }
        if let Some(blocks) = patch.blocks {
            page.draft.blocks = blocks;
        }
        if !change.is_empty() {
            page.draft_updated_at = now;
        }
        Ok(change)
    }

    /// Appends an editor-authored block. Notice blocks are always refused.
    pub fn add_block(
        &self,
        page: &mut Page,
        content: BlockContent,
        now: DateTime<Utc>,
    ) -> PageResult<BlockId> {
        ensure_editor_managed(content.block_type())?;
        self.insert_block(page, content, now)
    }

    /// Removes an editor-managed block. Notice blocks are always refused.
    pub fn remove_block(
        &self,
        page: &mut Page,
        id: BlockId,
        now: DateTime<Utc>,
    ) -> PageResult<ContentBlock> {
        ensure_editor_managed(find(page, id)?.block_type())?;
        self.delete_block(page, id, now)
    }

    /// Replaces a block's content wholesale.
    ///
    /// The new content must be of the block's kind. Notice content is
    /// always refused.
    pub fn update_block_content(
        &self,
        page: &mut Page,
        id: BlockId,
        content: BlockContent,
        now: DateTime<Utc>,
    ) -> PageResult<()> {
        ensure_editor_managed(find(page, id)?.block_type())?;
        self.replace_content(page, id, content, now)
    }

    /// Flips the structure lock. Returns the new state.
    pub fn toggle_structure_lock(
        &self,
        page: &mut Page,
        id: BlockId,
        now: DateTime<Utc>,
    ) -> PageResult<bool> {
        let block = find_mut(page, id)?;
        block.structure_locked = !block.structure_locked;
        let locked = block.structure_locked;
        page.draft_updated_at = now;
        Ok(locked)
    }

    /// Flips the content lock. Returns the new state.
    pub fn toggle_content_lock(
        &self,
        page: &mut Page,
        id: BlockId,
        now: DateTime<Utc>,
    ) -> PageResult<bool> {
        let block = find_mut(page, id)?;
        block.content_locked = !block.content_locked;
        let locked = block.content_locked;
        page.draft_updated_at = now;
        Ok(locked)
    }

    /// Moves a block one step and renumbers every block `0..N`.
    pub fn reorder(
        &self,
        page: &mut Page,
        id: BlockId,
        direction: MoveDirection,
        now: DateTime<Utc>,
    ) -> PageResult<ReorderOutcome> {
        let outcome = order::move_block(page.id, &mut page.draft.blocks, id, direction)?;
        if outcome == ReorderOutcome::Moved {
            page.draft_updated_at = now;
        }
        Ok(outcome)
    }

    // ── System primitives ────────────────────────────────────────

    /// Appends a notice block on behalf of the notification subsystem.
    pub(crate) fn add_notice(
        &self,
        page: &mut Page,
        notice: NoticeContent,
        now: DateTime<Utc>,
    ) -> PageResult<BlockId> {
        self.insert_block(page, BlockContent::Notice(notice), now)
    }

    /// Removes a notice block on behalf of the notification subsystem.
    pub(crate) fn remove_notice(
        &self,
        page: &mut Page,
        id: BlockId,
        now: DateTime<Utc>,
    ) -> PageResult<ContentBlock> {
        let block_type = find(page, id)?.block_type();
        if block_type != BlockType::Notice {
            return Err(PageError::BlockTypeMismatch {
                block_id: id,
                expected: BlockType::Notice,
                actual: block_type,
            });
        }
        self.delete_block(page, id, now)
    }

    /// Rewrites a notice block's content on behalf of the notification subsystem.
    pub(crate) fn update_notice(
        &self,
        page: &mut Page,
        id: BlockId,
        notice: NoticeContent,
        now: DateTime<Utc>,
    ) -> PageResult<()> {
        self.replace_content(page, id, BlockContent::Notice(notice), now)
    }

    fn insert_block(
        &self,
        page: &mut Page,
        content: BlockContent,
        now: DateTime<Utc>,
    ) -> PageResult<BlockId> {
        let block_type = content.block_type();
        ensure_room_for(&page.draft.blocks, block_type)?;

        let block = ContentBlock::new(content, order::next_order(&page.draft.blocks));
        self.check_blocks(std::iter::once(&block))?;

        let id = block.id;
        page.draft.blocks.push(block);
        page.draft_updated_at = now;
        Ok(id)
    }

    fn delete_block(
        &self,
        page: &mut Page,
        id: BlockId,
        now: DateTime<Utc>,
    ) -> PageResult<ContentBlock> {
        ensure_structure_unlocked(find(page, id)?)?;
        let index = page.draft.position(id).ok_or(PageError::BlockNotFound {
            page_id: page.id,
            block_id: id,
        })?;
        // Remaining orders keep their gaps until the next move.
        let removed = page.draft.blocks.remove(index);
        page.draft_updated_at = now;
        Ok(removed)
    }

    fn replace_content(
        &self,
        page: &mut Page,
        id: BlockId,
        content: BlockContent,
        now: DateTime<Utc>,
    ) -> PageResult<()> {
        let block = find(page, id)?;
        ensure_content_unlocked(block)?;
        if content.block_type() != block.block_type() {
            return Err(PageError::BlockTypeMismatch {
                block_id: id,
                expected: block.block_type(),
                actual: content.block_type(),
            });
        }

        let mut replacement = block.clone();
        replacement.content = content;
        self.check_blocks(std::iter::once(&replacement))?;

        *find_mut(page, id)? = replacement;
        page.draft_updated_at = now;
        Ok(())
    }

    // ── Draft-time validation ────────────────────────────────────

    fn check_header(&self, header: &Header) -> PageResult<()> {
        if !self.validate_on_draft {
            return Ok(());
        }
        reject_blocking(validate_header(header))
    }

    fn check_blocks<'a>(&self, blocks: impl Iterator<Item = &'a ContentBlock>) -> PageResult<()> {
        if !self.validate_on_draft {
            return Ok(());
        }
        reject_blocking(blocks.flat_map(validate_block).collect())
    }
}

fn reject_blocking(violations: Vec<Violation>) -> PageResult<()> {
    let blocking: Vec<Violation> = violations.into_iter().filter(Violation::blocks_draft).collect();
    if blocking.is_empty() {
        Ok(())
    } else {
        Err(PageError::ValidationFailed(blocking))
    }
}

fn find(page: &Page, id: BlockId) -> PageResult<&ContentBlock> {
    page.draft.block(id).ok_or(PageError::BlockNotFound {
        page_id: page.id,
        block_id: id,
    })
}

fn find_mut(page: &mut Page, id: BlockId) -> PageResult<&mut ContentBlock> {
    let page_id = page.id;
    page.draft.block_mut(id).ok_or(PageError::BlockNotFound {
        page_id,
        block_id: id,
    })
}

/// True if an editor may add a block of `block_type` to `page` right now.
pub fn can_add(page: &Page, block_type: BlockType) -> bool {
    block_type.is_addable() && ensure_room_for(&page.draft.blocks, block_type).is_ok()
}
