//! Page persistence with optimistic revision checks.

use civic_model::Page;
use civic_types::PageId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Repository for page aggregates.
///
/// Implementations must make [`PageStore::save`] a compare-and-swap on the
/// page revision: the write only lands if the stored revision still equals
/// the revision the caller loaded.
pub trait PageStore: Send + Sync {
    /// Stores a new page. Fails if the id or slug is already taken.
    fn insert(&self, page: Page) -> StorageResult<()>;

    fn get(&self, id: PageId) -> StorageResult<Option<Page>>;

    fn get_by_slug(&self, slug: &str) -> StorageResult<Option<Page>>;

    /// Commits `page`, whose `revision` must be the revision it was loaded
    /// at. Returns the committed page carrying the next revision.
    fn save(&self, page: Page) -> StorageResult<Page>;

    /// Removes a page regardless of its lifecycle state.
    fn delete(&self, id: PageId) -> StorageResult<Page>;

    /// Pages ordered by slug.
    fn list(&self, limit: usize, offset: usize) -> StorageResult<Vec<Page>>;

    fn count(&self) -> StorageResult<usize>;
}

#[derive(Default)]
struct Inner {
    pages: HashMap<PageId, Page>,
    slugs: HashMap<String, PageId>,
}

/// In-process page store.
#[derive(Clone, Default)]
pub struct MemoryPageStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Serializes every page, ordered by slug.
    pub fn dump_json(&self) -> StorageResult<String> {
        let pages = self.list(usize::MAX, 0)?;
        Ok(serde_json::to_string(&pages)?)
    }

    /// Builds a store from the output of [`MemoryPageStore::dump_json`].
    pub fn load_json(json: &str) -> StorageResult<Self> {
        let pages: Vec<Page> = serde_json::from_str(json)?;
        let store = Self::new();
        for page in pages {
            store.insert(page)?;
        }
        Ok(store)
    }
}

impl PageStore for MemoryPageStore {
    fn insert(&self, page: Page) -> StorageResult<()> {
        let mut inner = self.lock()?;
        if inner.pages.contains_key(&page.id) {
            return Err(StorageError::AlreadyExists(page.id));
        }
        let slug = page.slug().as_str().to_string();
        if inner.slugs.contains_key(&slug) {
            return Err(StorageError::DuplicateSlug(slug));
        }
        debug!(page_id = %page.id, slug = %slug, "Inserted page");
        inner.slugs.insert(slug, page.id);
        inner.pages.insert(page.id, page);
        Ok(())
    }

    fn get(&self, id: PageId) -> StorageResult<Option<Page>> {
        Ok(self.lock()?.pages.get(&id).cloned())
    }

    fn get_by_slug(&self, slug: &str) -> StorageResult<Option<Page>> {
        let inner = self.lock()?;
        Ok(inner
            .slugs
            .get(slug)
            .and_then(|id| inner.pages.get(id))
            .cloned())
    }

    fn save(&self, mut page: Page) -> StorageResult<Page> {
        let mut inner = self.lock()?;
        let stored = inner
            .pages
            .get_mut(&page.id)
            .ok_or(StorageError::NotFound(page.id))?;

        if stored.revision != page.revision {
            return Err(StorageError::RevisionConflict {
                page_id: page.id,
                expected: page.revision,
                actual: stored.revision,
            });
        }

        page.revision = page.revision.next();
        *stored = page.clone();
        debug!(page_id = %page.id, revision = %page.revision, "Saved page");
        Ok(page)
    }

    fn delete(&self, id: PageId) -> StorageResult<Page> {
        let mut inner = self.lock()?;
        let page = inner.pages.remove(&id).ok_or(StorageError::NotFound(id))?;
        inner.slugs.remove(page.slug().as_str());
        debug!(page_id = %id, "Deleted page");
        Ok(page)
    }

    fn list(&self, limit: usize, offset: usize) -> StorageResult<Vec<Page>> {
        let inner = self.lock()?;
        let mut pages: Vec<&Page> = inner.pages.values().collect();
        pages.sort_by(|a, b| a.slug().cmp(b.slug()));
        Ok(pages
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn count(&self) -> StorageResult<usize> {
        Ok(self.lock()?.pages.len())
    }
}

