//! Append-only audit log of page events.

use civic_types::{PageEvent, PageId};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{StorageError, StorageResult};

/// Append-only sink for committed page events.
pub trait EventStore: Send + Sync {
    fn append(&self, event: PageEvent) -> StorageResult<()>;

    /// Events for one page in commit order.
    fn events_for_page(&self, page_id: PageId) -> StorageResult<Vec<PageEvent>>;

    /// Most recent events across all pages, newest first.
    fn recent(&self, limit: usize, offset: usize) -> StorageResult<Vec<PageEvent>>;
}

/// In-process event log.
#[derive(Clone, Default)]
pub struct MemoryEventStore {
    events: Arc<Mutex<Vec<PageEvent>>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Vec<PageEvent>>> {
        self.events.lock().map_err(|_| StorageError::LockPoisoned)
    }

    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.lock()?.is_empty())
    }
}

impl EventStore for MemoryEventStore {
    fn append(&self, event: PageEvent) -> StorageResult<()> {
        self.lock()?.push(event);
        Ok(())
    }

    fn events_for_page(&self, page_id: PageId) -> StorageResult<Vec<PageEvent>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|e| e.page_id == page_id)
            .cloned()
            .collect())
    }

    fn recent(&self, limit: usize, offset: usize) -> StorageResult<Vec<PageEvent>> {
        Ok(self
            .lock()?
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
