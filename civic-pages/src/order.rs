//! Block ordering: visual order, append position and single-step moves.
//!
//! Orders are hints, not positions. Removal leaves gaps, imported data may
//! carry duplicates or no order at all. Visual order sorts valid orders
//! ascending, puts missing or negative orders last, and breaks every tie
//! by list position. A successful move rewrites every block's order to its
//! new index, so after a move the orders are exactly `0..N`.

use civic_model::ContentBlock;
use civic_types::{BlockId, MoveDirection, PageId};

use crate::error::{PageError, PageResult};
use crate::lock_guard::ensure_structure_unlocked;

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    Moved,
    /// The block already sits at the boundary in the requested direction.
    NoOp,
}

/// Indices into `blocks` in visual order.
pub fn visual_order(blocks: &[ContentBlock]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..blocks.len()).collect();
    // Stable sort keeps list position as the tie-break.
    indices.sort_by_key(|&i| match blocks[i].valid_order() {
        Some(order) => (0u8, order),
        None => (1u8, 0),
    });
    indices
}

/// Blocks in visual order.
pub fn sorted(blocks: &[ContentBlock]) -> Vec<&ContentBlock> {
    visual_order(blocks).into_iter().map(|i| &blocks[i]).collect()
}

/// Order to give a newly appended block: one past the highest valid order.
pub fn next_order(blocks: &[ContentBlock]) -> i64 {
    blocks
        .iter()
        .filter_map(ContentBlock::valid_order)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Rewrites every order to its visual index and sorts the list to match.
pub fn renormalize(blocks: &mut Vec<ContentBlock>) {
    let visual = visual_order(blocks);
    apply_visual_order(blocks, &visual);
}

fn apply_visual_order(blocks: &mut Vec<ContentBlock>, visual: &[usize]) {
    for (rank, &idx) in visual.iter().enumerate() {
        blocks[idx].order = Some(rank as i64);
    }
    blocks.sort_by_key(|b| b.order);
}

/// Moves `id` one step in `direction`.
///
/// Fails if the block, or the neighbour it would swap with, is
/// structure-locked. Leaves `blocks` untouched on failure and on
/// [`ReorderOutcome::NoOp`].
pub fn move_block(
    page_id: PageId,
    blocks: &mut Vec<ContentBlock>,
    id: BlockId,
    direction: MoveDirection,
) -> PageResult<ReorderOutcome> {
    let mut visual = visual_order(blocks);
    let pos = visual
        .iter()
        .position(|&i| blocks[i].id == id)
        .ok_or(PageError::BlockNotFound {
            page_id,
            block_id: id,
        })?;
    ensure_structure_unlocked(&blocks[visual[pos]])?;

    let neighbour = match direction {
        MoveDirection::Up => pos.checked_sub(1),
        MoveDirection::Down => Some(pos + 1).filter(|n| *n < visual.len()),
    };
    let Some(neighbour) = neighbour else {
        return Ok(ReorderOutcome::NoOp);
    };
    ensure_structure_unlocked(&blocks[visual[neighbour]])?;

    visual.swap(pos, neighbour);
    apply_visual_order(blocks, &visual);
    Ok(ReorderOutcome::Moved)
}
