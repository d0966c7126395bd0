//! Boundary through which the notification subsystem places, refreshes and
//! withdraws notice blocks on pages.
//!
//! Commands run as [`Actor::System`] and go through the same commit path as
//! editor operations, so they honour both lock bits and the revision check.
//! A command that loses a revision race is retried against a fresh copy of
//! the page, up to the configured limit.

use civic_model::{BlockContent, BlockType, NoticeContent, Page};
use civic_types::{Actor, BlockId, PageEventPayload, PageId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{PageError, PageResult};
use crate::service::{Applied, Committed, PageService};

/// Instruction from the notification subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum NoticeCommand {
    /// Place the notice on the page, or refresh it if already there.
    Upsert { page_id: PageId, notice: NoticeContent },
    /// Take the notice off the page.
    Withdraw { page_id: PageId, notice_id: String },
}

impl NoticeCommand {
    pub fn page_id(&self) -> PageId {
        match self {
            Self::Upsert { page_id, .. } | Self::Withdraw { page_id, .. } => *page_id,
        }
    }

    pub fn notice_id(&self) -> &str {
        match self {
            Self::Upsert { notice, .. } => &notice.notice_id,
            Self::Withdraw { notice_id, .. } => notice_id,
        }
    }
}

/// What a command did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeOutcome {
    Added(BlockId),
    Updated(BlockId),
    /// The notice was already on the page with identical content.
    Unchanged(BlockId),
    Removed(BlockId),
    /// Withdraw for a notice the page does not carry.
    NotPresent,
}

/// Totals reported when the command stream ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoticeSyncStats {
    pub applied: usize,
    pub failed: usize,
}

/// Applies [`NoticeCommand`]s to pages.
pub struct NoticeSync {
    service: Arc<PageService>,
    retry_limit: u32,
}

impl NoticeSync {
    pub fn new(service: Arc<PageService>) -> Self {
        let retry_limit = service.config().notice_retry_limit;
        Self {
            service,
            retry_limit,
        }
    }

    /// Applies one command, retrying after revision conflicts.
    pub fn apply(&self, command: &NoticeCommand) -> PageResult<Committed<NoticeOutcome>> {
        let mut attempt = 0;
        loop {
            match self.try_apply(command) {
                Err(PageError::Conflict { actual, .. }) if attempt < self.retry_limit => {
                    attempt += 1;
                    warn!(
                        page_id = %command.page_id(),
                        notice_id = %command.notice_id(),
                        attempt,
                        current = %actual,
                        "Notice lost a revision race, retrying"
                    );
                }
                result => return result,
            }
        }
    }

    /// Drains `commands` until every sender is dropped.
    ///
    /// A failing command is logged and skipped; it never stops the loop.
    pub async fn run(&self, mut commands: mpsc::Receiver<NoticeCommand>) -> NoticeSyncStats {
        let mut stats = NoticeSyncStats::default();
        while let Some(command) = commands.recv().await {
            match self.apply(&command) {
                Ok(committed) => {
                    stats.applied += 1;
                    debug!(
                        page_id = %command.page_id(),
                        notice_id = %command.notice_id(),
                        outcome = ?committed.value,
                        revision = %committed.revision,
                        "Notice command applied"
                    );
                }
                Err(e) => {
                    stats.failed += 1;
                    warn!(
                        page_id = %command.page_id(),
                        notice_id = %command.notice_id(),
                        error = %e,
                        "Notice command failed"
                    );
                }
            }
        }
        info!(
            applied = stats.applied,
            failed = stats.failed,
            "Notice command stream closed"
        );
        stats
    }

    fn try_apply(&self, command: &NoticeCommand) -> PageResult<Committed<NoticeOutcome>> {
        self.service.mutate(
            &Actor::System,
            command.page_id(),
            None,
            |editor, page, now| match command {
                NoticeCommand::Upsert { notice, .. } => {
                    let existing = find_notice(page, &notice.notice_id)
                        .map(|(id, current)| (id, current == notice));
                    match existing {
                        Some((block_id, true)) => {
                            Ok(Applied::unchanged(NoticeOutcome::Unchanged(block_id)))
                        }
                        Some((block_id, false)) => {
                            editor.update_notice(page, block_id, notice.clone(), now)?;
                            Ok(Applied::changed(
                                NoticeOutcome::Updated(block_id),
                                PageEventPayload::BlockContentUpdated { block_id },
                            ))
                        }
                        None => {
                            let block_id = editor.add_notice(page, notice.clone(), now)?;
                            Ok(Applied::changed(
                                NoticeOutcome::Added(block_id),
                                PageEventPayload::BlockAdded {
                                    block_id,
                                    block_type: BlockType::Notice.to_string(),
                                },
                            ))
                        }
                    }
                }
                NoticeCommand::Withdraw { notice_id, .. } => {
                    let Some((block_id, _)) = find_notice(page, notice_id) else {
                        return Ok(Applied::unchanged(NoticeOutcome::NotPresent));
                    };
                    editor.remove_notice(page, block_id, now)?;
                    Ok(Applied::changed(
                        NoticeOutcome::Removed(block_id),
                        PageEventPayload::BlockRemoved {
                            block_id,
                            block_type: BlockType::Notice.to_string(),
                        },
                    ))
                }
            },
        )
    }
}

fn find_notice<'a>(page: &'a Page, notice_id: &str) -> Option<(BlockId, &'a NoticeContent)> {
    page.draft.blocks.iter().find_map(|b| match &b.content {
        BlockContent::Notice(n) if n.notice_id == notice_id => Some((b.id, n)),
        _ => None,
    })
}
