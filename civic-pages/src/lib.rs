//! Content management core for the civic portal's static pages.
//!
//! Editors work on a draft; the public site only ever sees the last
//! published snapshot. This crate owns every rule that sits between the two:
//! - [`DraftEditor`]: draft mutations under lock and authorship rules
//! - [`lock_guard`]: the structure and content lock bits
//! - [`order`]: visual ordering and single-step moves
//! - [`lifecycle`]: all-or-nothing publish and unpublish
//! - [`PageService`]: load, apply, revision-checked commit, audit event
//! - [`NoticeSync`]: the only way notice blocks enter, change or leave a page
//!
//! # Example
//!
//! ```
//! use civic_model::{BlockContent, Header, TextContent};
//! use civic_pages::{PageService, PagesConfig};
//! use civic_types::Actor;
//!
//! let service = PageService::in_memory(PagesConfig::default()).unwrap();
//! let ana = Actor::editor("ana");
//!
//! let page = service
//!     .create_page(&ana, "parking", Header::simple("Parkiranje", "Parking"), vec![])
//!     .unwrap();
//! service
//!     .add_block(
//!         &ana,
//!         page.id,
//!         BlockContent::Text(TextContent {
//!             body_hr: "Zona 1".into(),
//!             body_en: "Zone 1".into(),
//!             ..Default::default()
//!         }),
//!     )
//!     .unwrap();
//! service.publish(&ana, page.id).unwrap();
//!
//! let live = service.published_view("parking").unwrap();
//! assert_eq!(live.blocks.len(), 1);
//! ```

mod config;
mod editor;
mod error;
pub mod lifecycle;
pub mod lock_guard;
mod notice;
pub mod order;
mod service;

pub use config::PagesConfig;
pub use editor::{DraftChange, DraftEditor, DraftPatch, can_add};
pub use error::{ErrorClass, PageError, PageResult};
pub use lifecycle::PublishState;
pub use notice::{NoticeCommand, NoticeOutcome, NoticeSync, NoticeSyncStats};
pub use order::ReorderOutcome;
pub use service::{Committed, PageList, PageService, PublishedPage};
