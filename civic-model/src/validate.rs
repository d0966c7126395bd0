//! Field-level content validation.
//!
//! Every function here is pure: it inspects a header or block and returns
//! the complete list of violations it finds, never stopping at the first.
//! Field paths are rooted at the page, e.g. `header.title_en` or
//! `blocks[<block-id>].cards[2].title_en`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::block::{
    BlockContent, CardListContent, ContactContent, ContentBlock, HighlightContent, LinkListContent,
    LinkTarget, MapContent, MediaContent, TextContent,
};
use crate::header::{Header, HeaderKind, MAX_HEADER_IMAGES};
use crate::page::PageSnapshot;

/// Maximum number of images in a media block.
pub const MAX_MEDIA_IMAGES: usize = 10;

pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LNG_RANGE: (f64, f64) = (-180.0, 180.0);
pub const ZOOM_RANGE: (i64, i64) = (1, 20);

/// A single field-level problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Whether this violation must stop a draft mutation.
    ///
    /// Incomplete content (missing text, empty lists) is normal while
    /// drafting and is only enforced at publish. Malformed content is
    /// rejected as soon as it is written.
    pub fn blocks_draft(&self) -> bool {
        !matches!(self.kind, ViolationKind::Missing | ViolationKind::TooFew { .. })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required value is absent or blank.
    Missing,
    OutOfRange { min: f64, max: f64 },
    /// Link target lacks an `http://` or `https://` scheme.
    InvalidUrl,
    InvalidFormat,
    TooFew { min: usize },
    TooMany { max: usize },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "required"),
            Self::OutOfRange { min, max } => write!(f, "must be between {min} and {max}"),
            Self::InvalidUrl => write!(f, "must be an http:// or https:// URL"),
            Self::InvalidFormat => write!(f, "invalid format"),
            Self::TooFew { min } => write!(f, "needs at least {min} item(s)"),
            Self::TooMany { max } => write!(f, "allows at most {max} item(s)"),
        }
    }
}

/// Returns true for `http://` and `https://` URLs with a non-empty remainder.
pub fn is_http_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.len() > scheme.len() && lower.starts_with(scheme))
}

fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.contains('@') && domain.contains('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

// ── Header ───────────────────────────────────────────────────────

/// Validates a page header for publish.
pub fn validate_header(header: &Header) -> Vec<Violation> {
    let mut out = Vec::new();
    require_text(&mut out, "header.title_hr", &header.title_hr);
    require_text(&mut out, "header.title_en", &header.title_en);

    if let HeaderKind::Media { images } = &header.kind {
        check_count(&mut out, "header.images", images.len(), 1, MAX_HEADER_IMAGES);
        for (i, url) in images.iter().enumerate() {
            check_url(&mut out, &format!("header.images[{i}]"), url);
        }
    }
    out
}

// ── Blocks ───────────────────────────────────────────────────────

/// Validates one block against the schema of its kind.
///
/// Notice blocks are pre-validated by their producer and always pass.
pub fn validate_block(block: &ContentBlock) -> Vec<Violation> {
    let mut out = Vec::new();
    let path = format!("blocks[{}]", block.id);
    validate_content(&mut out, &path, &block.content);
    out
}

/// Validates a payload, reporting fields under `path`.
pub fn validate_content(out: &mut Vec<Violation>, path: &str, content: &BlockContent) {
    match content {
        BlockContent::Text(c) => validate_text(out, path, c),
        BlockContent::Highlight(c) => validate_highlight(out, path, c),
        BlockContent::CardList(c) => validate_card_list(out, path, c),
        BlockContent::Media(c) => validate_media(out, path, c),
        BlockContent::Map(c) => validate_map(out, path, c),
        BlockContent::Contact(c) => validate_contact(out, path, c),
        BlockContent::LinkList(c) => validate_link_list(out, path, c),
        BlockContent::Notice(_) => {}
    }
}

/// Validates a whole draft: header plus every block.
pub fn validate_snapshot(snapshot: &PageSnapshot) -> Vec<Violation> {
    let mut out = validate_header(&snapshot.header);
    for block in &snapshot.blocks {
        out.extend(validate_block(block));
    }
    out
}

fn validate_text(out: &mut Vec<Violation>, path: &str, c: &TextContent) {
    require_text(out, &format!("{path}.body_hr"), &c.body_hr);
    require_text(out, &format!("{path}.body_en"), &c.body_en);
}

fn validate_highlight(out: &mut Vec<Violation>, path: &str, c: &HighlightContent) {
    require_text(out, &format!("{path}.title_hr"), &c.title_hr);
    require_text(out, &format!("{path}.title_en"), &c.title_en);
    require_text(out, &format!("{path}.body_hr"), &c.body_hr);
    require_text(out, &format!("{path}.body_en"), &c.body_en);
}

fn validate_card_list(out: &mut Vec<Violation>, path: &str, c: &CardListContent) {
    check_count(out, &format!("{path}.cards"), c.cards.len(), 1, usize::MAX);
    for (i, card) in c.cards.iter().enumerate() {
        let item = format!("{path}.cards[{i}]");
        require_text(out, &format!("{item}.title_hr"), &card.title_hr);
        require_text(out, &format!("{item}.title_en"), &card.title_en);
        if let Some(url) = card.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
            check_url(out, &format!("{item}.image_url"), url);
        }
        if let Some(target) = &card.link {
            check_link_target(out, &format!("{item}.link"), target);
        }
    }
}

fn validate_media(out: &mut Vec<Violation>, path: &str, c: &MediaContent) {
    check_count(out, &format!("{path}.images"), c.images.len(), 1, MAX_MEDIA_IMAGES);
    for (i, image) in c.images.iter().enumerate() {
        check_url(out, &format!("{path}.images[{i}].url"), &image.url);
    }
}

fn validate_map(out: &mut Vec<Violation>, path: &str, c: &MapContent) {
    check_range(out, &format!("{path}.lat"), c.lat, LAT_RANGE);
    check_range(out, &format!("{path}.lng"), c.lng, LNG_RANGE);
    if !(ZOOM_RANGE.0..=ZOOM_RANGE.1).contains(&c.zoom) {
        out.push(Violation::new(
            format!("{path}.zoom"),
            ViolationKind::OutOfRange {
                min: ZOOM_RANGE.0 as f64,
                max: ZOOM_RANGE.1 as f64,
            },
        ));
    }
}

fn validate_contact(out: &mut Vec<Violation>, path: &str, c: &ContactContent) {
    check_count(out, &format!("{path}.contacts"), c.contacts.len(), 1, usize::MAX);
    for (i, contact) in c.contacts.iter().enumerate() {
        let item = format!("{path}.contacts[{i}]");
        require_text(out, &format!("{item}.name_hr"), &contact.name_hr);
        require_text(out, &format!("{item}.name_en"), &contact.name_en);
        if let Some(email) = contact.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !is_plausible_email(email) {
                out.push(Violation::new(format!("{item}.email"), ViolationKind::InvalidFormat));
            }
        }
    }
}

fn validate_link_list(out: &mut Vec<Violation>, path: &str, c: &LinkListContent) {
    check_count(out, &format!("{path}.links"), c.links.len(), 1, usize::MAX);
    for (i, link) in c.links.iter().enumerate() {
        let item = format!("{path}.links[{i}]");
        require_text(out, &format!("{item}.label_hr"), &link.label_hr);
        require_text(out, &format!("{item}.label_en"), &link.label_en);
        check_link_target(out, &format!("{item}.target"), &link.target);
    }
}

// ── Field helpers ────────────────────────────────────────────────

fn require_text(out: &mut Vec<Violation>, field: &str, value: &str) {
    if value.trim().is_empty() {
        out.push(Violation::new(field, ViolationKind::Missing));
    }
}

fn check_url(out: &mut Vec<Violation>, field: &str, url: &str) {
    if url.trim().is_empty() {
        out.push(Violation::new(field, ViolationKind::Missing));
    } else if !is_http_url(url) {
        out.push(Violation::new(field, ViolationKind::InvalidUrl));
    }
}

fn check_link_target(out: &mut Vec<Violation>, field: &str, target: &LinkTarget) {
    match target {
        LinkTarget::External { url } => check_url(out, &format!("{field}.url"), url),
        LinkTarget::Internal { path } => {
            let field = format!("{field}.path");
            if path.trim().is_empty() {
                out.push(Violation::new(field, ViolationKind::Missing));
            } else if !path.starts_with('/') {
                out.push(Violation::new(field, ViolationKind::InvalidFormat));
            }
        }
    }
}

fn check_range(out: &mut Vec<Violation>, field: &str, value: f64, (min, max): (f64, f64)) {
    // NaN fails the range test as well.
    if !(value >= min && value <= max) {
        out.push(Violation::new(field, ViolationKind::OutOfRange { min, max }));
    }
}

fn check_count(out: &mut Vec<Violation>, field: &str, len: usize, min: usize, max: usize) {
    if len < min {
        out.push(Violation::new(field, ViolationKind::TooFew { min }));
    } else if len > max {
        out.push(Violation::new(field, ViolationKind::TooMany { max }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_detection() {
        assert!(is_http_url("https://grad.hr"));
        assert!(is_http_url("HTTP://grad.hr/x"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("ftp://grad.hr"));
        assert!(!is_http_url("javascript:alert(1)"));
        assert!(!is_http_url("grad.hr"));
    }

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("info@grad.hr"));
        assert!(!is_plausible_email("info.grad.hr"));
        assert!(!is_plausible_email("@grad.hr"));
        assert!(!is_plausible_email("info@grad"));
        assert!(!is_plausible_email("a@b@c.hr"));
    }

    #[test]
    fn nan_is_out_of_range() {
        let mut out = Vec::new();
        check_range(&mut out, "lat", f64::NAN, LAT_RANGE);
        assert_eq!(out.len(), 1);
    }
}
