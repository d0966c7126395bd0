//! Storage layer for the civic portal content core.
//!
//! The persistence engine is pluggable: the core talks to
//! the [`PageStore`] and [`EventStore`] traits, and this crate ships
//! in-process implementations backed by `Arc<Mutex<..>>`.
//!
//! # Concurrency
//!
//! Two writers may touch the same page at once: an editor in the admin
//! console and the notice synchronization boundary. [`PageStore::save`] is
//! a compare-and-swap on the page [`Revision`](civic_types::Revision), so
//! the second writer working from a stale copy receives
//! [`StorageError::RevisionConflict`] instead of silently overwriting the
//! first.

mod error;
mod event_store;
mod page_store;

pub use error::{StorageError, StorageResult};
pub use event_store::{EventStore, MemoryEventStore};
pub use page_store::{MemoryPageStore, PageStore};
