use chrono::Utc;
use civic_model::{
    BlockContent, ContentBlock, Header, HeaderKind, Page, PageSnapshot, PublishedSnapshot, Slug,
    TextContent, is_valid_slug,
};
use civic_types::Revision;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

fn text_block(body: &str) -> ContentBlock {
    ContentBlock::new(
        BlockContent::Text(TextContent {
            body_hr: body.into(),
            body_en: body.into(),
            ..Default::default()
        }),
        0,
    )
}

fn page() -> Page {
    Page::new(
        Slug::parse("city-hall").unwrap(),
        PageSnapshot::new(Header::simple("Vijećnica", "City Hall"), vec![]),
        Utc::now(),
    )
}

// ── Lifecycle flags ──────────────────────────────────────────────

#[test]
fn new_page_is_unpublished_at_initial_revision() {
    let p = page();
    assert!(!p.is_published());
    assert_eq!(p.published_at(), None);
    assert_eq!(p.revision, Revision::INITIAL);
    assert!(p.has_unpublished_changes());
}

#[test]
fn matching_snapshot_clears_unpublished_changes() {
    let mut p = page();
    p.published = Some(PublishedSnapshot {
        content: p.draft.clone(),
        published_at: Utc::now(),
    });
    assert!(!p.has_unpublished_changes());

    p.draft.blocks.push(text_block("x"));
    assert!(p.has_unpublished_changes());

    p.draft.blocks.clear();
    assert!(!p.has_unpublished_changes());
}

#[test]
fn lock_flip_counts_as_a_change() {
    let mut p = page();
    p.draft.blocks.push(text_block("x"));
    p.published = Some(PublishedSnapshot {
        content: p.draft.clone(),
        published_at: Utc::now(),
    });
    p.draft.blocks[0].content_locked = true;
    assert!(p.has_unpublished_changes());
}

// ── Wire format ──────────────────────────────────────────────────

#[test]
fn block_serializes_as_flat_envelope() {
    let b = text_block("Dobro došli");
    let v = serde_json::to_value(&b).unwrap();
    assert_eq!(v["type"], "text");
    assert_eq!(v["order"], 0);
    assert_eq!(v["structure_locked"], false);
    assert_eq!(v["content"]["body_hr"], "Dobro došli");
}

#[test]
fn block_with_missing_order_deserializes() {
    let v = json!({
        "id": civic_types::BlockId::new(),
        "type": "map",
        "content": {"lat": 45.0, "lng": 15.0, "zoom": 12}
    });
    let b: ContentBlock = serde_json::from_value(v).unwrap();
    assert_eq!(b.order, None);
    assert_eq!(b.valid_order(), None);
    assert!(!b.structure_locked);
    assert!(!b.content_locked);
}

#[test]
fn negative_order_is_not_valid() {
    let mut b = text_block("x");
    b.order = Some(-3);
    assert_eq!(b.valid_order(), None);
}

#[test]
fn header_kind_is_tagged_by_type() {
    let h = Header::media("a", "b", vec!["https://cdn.grad.hr/1.jpg".into()]);
    let v = serde_json::to_value(&h).unwrap();
    assert_eq!(v["type"], "media");
    assert_eq!(v["images"][0], "https://cdn.grad.hr/1.jpg");

    let back: Header = serde_json::from_value(v).unwrap();
    assert!(matches!(back.kind, HeaderKind::Media { .. }));
}

#[test]
fn view_uses_console_field_names() {
    let p = page();
    let v = serde_json::to_value(p.view()).unwrap();
    assert_eq!(v["slug"], "city-hall");
    assert_eq!(v["draft_header"]["title_en"], "City Hall");
    assert_eq!(v["published_header"], serde_json::Value::Null);
    assert_eq!(v["published_at"], serde_json::Value::Null);
    assert_eq!(v["has_unpublished_changes"], true);
    assert_eq!(v["revision"], 1);
}

#[test]
fn page_json_roundtrip_preserves_slug() {
    let p = page();
    let json = serde_json::to_string(&p).unwrap();
    let back: Page = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
    assert_eq!(back.slug().as_str(), "city-hall");
}

#[test]
fn page_json_with_bad_slug_is_rejected() {
    let mut v = serde_json::to_value(page()).unwrap();
    v["slug"] = json!("City Hall");
    assert!(serde_json::from_value::<Page>(v).is_err());
}

// ── Slug properties ──────────────────────────────────────────────

proptest! {
    #[test]
    fn generated_slugs_are_valid(s in "[a-z0-9]{1,10}(-[a-z0-9]{1,10}){0,4}") {
        prop_assert!(is_valid_slug(&s));
        prop_assert!(Slug::parse(&s).is_ok());
    }

    #[test]
    fn uppercase_is_never_valid(s in "[a-z]{0,5}[A-Z][a-z]{0,5}") {
        prop_assert!(!is_valid_slug(&s));
    }
}
