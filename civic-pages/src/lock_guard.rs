//! Enforcement of the two independent lock bits and of notice authorship.
//!
//! The structure lock forbids removing or moving a block. The content lock
//! forbids replacing its content. Both bind every actor, the system actor
//! included, so an editor can pin a notice in place. Authorship is a
//! separate axis: only the system actor creates, removes or rewrites
//! notice blocks; that is enforced by entry point, not by actor identity.

use civic_model::{BlockType, ContentBlock, can_add_map};
use civic_types::BlockId;
use std::collections::{HashMap, HashSet};

use crate::error::{PageError, PageResult};

/// Fails if the block may not be removed or moved.
pub fn ensure_structure_unlocked(block: &ContentBlock) -> PageResult<()> {
    if block.structure_locked {
        Err(PageError::StructureLocked(block.id))
    } else {
        Ok(())
    }
}

/// Fails if the block's content may not be replaced.
pub fn ensure_content_unlocked(block: &ContentBlock) -> PageResult<()> {
    if block.content_locked {
        Err(PageError::ContentLocked(block.id))
    } else {
        Ok(())
    }
}

/// Fails for block kinds whose lifecycle and content belong to the system.
pub fn ensure_editor_managed(block_type: BlockType) -> PageResult<()> {
    if block_type.is_system_managed() {
        Err(PageError::SystemManagedType(block_type))
    } else {
        Ok(())
    }
}

/// Fails if two blocks share an id.
pub fn ensure_unique_ids(blocks: &[ContentBlock]) -> PageResult<()> {
    let mut seen = HashSet::with_capacity(blocks.len());
    match blocks.iter().find(|b| !seen.insert(b.id)) {
        Some(dup) => Err(PageError::DuplicateBlockId(dup.id)),
        None => Ok(()),
    }
}

/// Checks a whole-array block replacement submitted by an editor.
///
/// The replacement may reorder unlocked blocks, flip lock bits and edit,
/// add or drop ordinary blocks. It may not:
/// - introduce, drop or rewrite a notice block,
/// - drop or move a structure-locked block,
/// - rewrite a content-locked block,
/// - end up with more than one map,
/// - carry the same block id twice.
pub fn check_replacement(current: &[ContentBlock], proposed: &[ContentBlock]) -> PageResult<()> {
    ensure_unique_ids(proposed)?;
    let proposed_by_id: HashMap<BlockId, &ContentBlock> =
        proposed.iter().map(|b| (b.id, b)).collect();
    let current_by_id: HashMap<BlockId, &ContentBlock> =
        current.iter().map(|b| (b.id, b)).collect();

    for old in current {
        let Some(new) = proposed_by_id.get(&old.id) else {
            if old.block_type().is_system_managed() {
                return Err(PageError::SystemManagedType(old.block_type()));
            }
            ensure_structure_unlocked(old)?;
            continue;
        };

        if old.structure_locked && new.order != old.order {
            return Err(PageError::StructureLocked(old.id));
        }
        if new.content != old.content {
            if old.block_type().is_system_managed() || new.block_type().is_system_managed() {
                return Err(PageError::SystemManagedType(BlockType::Notice));
            }
            ensure_content_unlocked(old)?;
        }
    }

    if let Some(added) = proposed
        .iter()
        .find(|b| !current_by_id.contains_key(&b.id) && b.block_type().is_system_managed())
    {
        return Err(PageError::SystemManagedType(added.block_type()));
    }

    let maps = proposed
        .iter()
        .filter(|b| b.block_type() == BlockType::Map)
        .count();
    if maps > 1 {
        return Err(PageError::MapLimitExceeded);
    }
    Ok(())
}

/// Fails if adding a block of `block_type` would exceed its per-page limit.
pub fn ensure_room_for(blocks: &[ContentBlock], block_type: BlockType) -> PageResult<()> {
    if block_type == BlockType::Map && !can_add_map(blocks) {
        Err(PageError::MapLimitExceeded)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_model::{BlockContent, MapContent, NoticeContent, TextContent};

    fn text(body: &str, order: i64) -> ContentBlock {
        ContentBlock::new(
            BlockContent::Text(TextContent {
                body_hr: body.into(),
                body_en: body.into(),
                ..Default::default()
            }),
            order,
        )
    }

    fn notice(order: i64) -> ContentBlock {
        ContentBlock::new(
            BlockContent::Notice(NoticeContent {
                notice_id: "n-1".into(),
                payload: serde_json::json!({"title": "Road works"}),
            }),
            order,
        )
    }

    fn map(order: i64) -> ContentBlock {
        ContentBlock::new(
            BlockContent::Map(MapContent {
                lat: 45.0,
                lng: 15.0,
                zoom: 10,
                label_hr: None,
                label_en: None,
            }),
            order,
        )
    }

    #[test]
    fn notice_is_not_editor_managed() {
        assert!(matches!(
            ensure_editor_managed(BlockType::Notice),
            Err(PageError::SystemManagedType(BlockType::Notice))
        ));
        for t in BlockType::ALL.into_iter().filter(BlockType::is_addable) {
            assert!(ensure_editor_managed(t).is_ok());
        }
    }

    #[test]
    fn replacement_may_reorder_unlocked_and_toggle_locks() {
        let current = vec![text("a", 0), notice(1)];
        let mut proposed = current.clone();
        proposed[0].order = Some(1);
        proposed[1].order = Some(0);
        proposed[1].structure_locked = true;
        assert!(check_replacement(&current, &proposed).is_ok());
    }

    #[test]
    fn replacement_may_not_drop_notice() {
        let current = vec![text("a", 0), notice(1)];
        let proposed = vec![current[0].clone()];
        assert!(matches!(
            check_replacement(&current, &proposed),
            Err(PageError::SystemManagedType(_))
        ));
    }

    #[test]
    fn replacement_may_not_introduce_notice() {
        let current = vec![text("a", 0)];
        let proposed = vec![current[0].clone(), notice(1)];
        assert!(matches!(
            check_replacement(&current, &proposed),
            Err(PageError::SystemManagedType(_))
        ));
    }

    #[test]
    fn replacement_may_not_rewrite_notice() {
        let current = vec![notice(0)];
        let mut proposed = current.clone();
        proposed[0].content = BlockContent::Notice(NoticeContent {
            notice_id: "n-1".into(),
            payload: serde_json::json!({"title": "Edited"}),
        });
        assert!(check_replacement(&current, &proposed).is_err());
    }

    #[test]
    fn replacement_respects_structure_lock() {
        let mut locked = text("a", 0);
        locked.structure_locked = true;
        let current = vec![locked, text("b", 1)];

        let dropped = vec![current[1].clone()];
        assert!(matches!(
            check_replacement(&current, &dropped),
            Err(PageError::StructureLocked(_))
        ));

        let mut moved = current.clone();
        moved[0].order = Some(5);
        assert!(matches!(
            check_replacement(&current, &moved),
            Err(PageError::StructureLocked(_))
        ));
    }

    #[test]
    fn replacement_respects_content_lock() {
        let mut locked = text("a", 0);
        locked.content_locked = true;
        let current = vec![locked];
        let mut proposed = current.clone();
        proposed[0].content = text("changed", 0).content;
        assert!(matches!(
            check_replacement(&current, &proposed),
            Err(PageError::ContentLocked(_))
        ));
    }

    #[test]
    fn replacement_may_not_hold_two_maps() {
        let current = vec![map(0)];
        let proposed = vec![current[0].clone(), map(1)];
        assert!(matches!(
            check_replacement(&current, &proposed),
            Err(PageError::MapLimitExceeded)
        ));
    }

    #[test]
    fn replacement_may_not_repeat_an_id() {
        let mut locked = text("original", 0);
        locked.content_locked = true;
        let current = vec![locked];

        let mut rewritten = current[0].clone();
        rewritten.content = text("edited", 0).content;
        let proposed = vec![rewritten, current[0].clone()];
        assert!(matches!(
            check_replacement(&current, &proposed),
            Err(PageError::DuplicateBlockId(id)) if id == current[0].id
        ));
    }

    #[test]
    fn replacement_may_not_copy_notice() {
        let current = vec![text("a", 0), notice(1)];
        let mut proposed = current.clone();
        let mut copy = current[1].clone();
        copy.order = Some(2);
        proposed.push(copy);
        assert!(matches!(
            check_replacement(&current, &proposed),
            Err(PageError::DuplicateBlockId(_))
        ));
    }

    #[test]
    fn unique_ids_pass() {
        assert!(ensure_unique_ids(&[text("a", 0), text("b", 1)]).is_ok());
        assert!(ensure_unique_ids(&[]).is_ok());
    }

    #[test]
    fn room_for_second_map_is_refused() {
        assert!(ensure_room_for(&[map(0)], BlockType::Map).is_err());
        assert!(ensure_room_for(&[map(0)], BlockType::Text).is_ok());
        assert!(ensure_room_for(&[], BlockType::Map).is_ok());
    }
}
