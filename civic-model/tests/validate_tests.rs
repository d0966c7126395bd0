use civic_model::{
    BlockContent, Card, CardListContent, ContactContent, ContactItem, ContentBlock, Header,
    HighlightContent, LinkItem, LinkListContent, LinkTarget, MapContent, MediaContent, MediaImage,
    NoticeContent, PageSnapshot, TextContent, Violation, ViolationKind, validate_block,
    validate_header, validate_snapshot,
};
use pretty_assertions::assert_eq;

fn fields(violations: &[Violation]) -> Vec<String> {
    violations.iter().map(|v| v.field.clone()).collect()
}

fn block(content: BlockContent) -> ContentBlock {
    ContentBlock::new(content, 0)
}

fn text(hr: &str, en: &str) -> BlockContent {
    BlockContent::Text(TextContent {
        title_hr: None,
        title_en: None,
        body_hr: hr.into(),
        body_en: en.into(),
    })
}

fn map(lat: f64, lng: f64, zoom: i64) -> BlockContent {
    BlockContent::Map(MapContent {
        lat,
        lng,
        zoom,
        label_hr: None,
        label_en: None,
    })
}

// ── Header ───────────────────────────────────────────────────────

#[test]
fn header_with_both_titles_is_valid() {
    assert!(validate_header(&Header::simple("Gradska vijećnica", "City Hall")).is_empty());
}

#[test]
fn header_missing_english_title() {
    let v = validate_header(&Header::simple("Gradska vijećnica", ""));
    assert_eq!(fields(&v), vec!["header.title_en"]);
    assert_eq!(v[0].kind, ViolationKind::Missing);
}

#[test]
fn whitespace_title_counts_as_missing() {
    let v = validate_header(&Header::simple("   ", "City Hall"));
    assert_eq!(fields(&v), vec!["header.title_hr"]);
}

#[test]
fn media_header_needs_one_to_five_images() {
    let none = validate_header(&Header::media("a", "b", vec![]));
    assert_eq!(none[0].kind, ViolationKind::TooFew { min: 1 });

    let six = (0..6).map(|i| format!("https://cdn.grad.hr/{i}.jpg")).collect();
    let too_many = validate_header(&Header::media("a", "b", six));
    assert_eq!(too_many[0].kind, ViolationKind::TooMany { max: 5 });

    let ok = validate_header(&Header::media("a", "b", vec!["https://cdn.grad.hr/1.jpg".into()]));
    assert!(ok.is_empty());
}

#[test]
fn media_header_rejects_non_http_image() {
    let v = validate_header(&Header::media("a", "b", vec!["file:///etc/passwd".into()]));
    assert_eq!(fields(&v), vec!["header.images[0]"]);
    assert_eq!(v[0].kind, ViolationKind::InvalidUrl);
}

// ── Text and highlight ───────────────────────────────────────────

#[test]
fn text_block_requires_both_bodies() {
    let b = block(text("", ""));
    let v = validate_block(&b);
    assert_eq!(
        fields(&v),
        vec![format!("blocks[{}].body_hr", b.id), format!("blocks[{}].body_en", b.id)]
    );
}

#[test]
fn highlight_block_requires_title_and_body() {
    let b = block(BlockContent::Highlight(HighlightContent {
        title_hr: "Pažnja".into(),
        body_hr: "Zatvoreno".into(),
        ..Default::default()
    }));
    let v = validate_block(&b);
    assert_eq!(v.len(), 2);
    assert!(v.iter().all(|v| v.kind == ViolationKind::Missing));
}

// ── Map ──────────────────────────────────────────────────────────

#[test]
fn map_within_ranges_is_valid() {
    assert!(validate_block(&block(map(-90.0, 180.0, 1))).is_empty());
    assert!(validate_block(&block(map(90.0, -180.0, 20))).is_empty());
}

#[test]
fn map_out_of_range_reports_each_field() {
    let b = block(map(91.0, -181.0, 0));
    let v = validate_block(&b);
    let id = b.id;
    assert_eq!(
        fields(&v),
        vec![
            format!("blocks[{id}].lat"),
            format!("blocks[{id}].lng"),
            format!("blocks[{id}].zoom"),
        ]
    );
    assert!(v.iter().all(|v| v.blocks_draft()));
}

#[test]
fn map_zoom_above_twenty_is_rejected() {
    let v = validate_block(&block(map(45.0, 15.0, 21)));
    assert_eq!(v[0].kind, ViolationKind::OutOfRange { min: 1.0, max: 20.0 });
}

// ── Media ────────────────────────────────────────────────────────

#[test]
fn media_block_requires_http_urls() {
    let b = block(BlockContent::Media(MediaContent {
        images: vec![
            MediaImage {
                url: "https://cdn.grad.hr/a.jpg".into(),
                ..Default::default()
            },
            MediaImage {
                url: "ftp://cdn.grad.hr/b.jpg".into(),
                ..Default::default()
            },
        ],
        ..Default::default()
    }));
    let v = validate_block(&b);
    assert_eq!(fields(&v), vec![format!("blocks[{}].images[1].url", b.id)]);
    assert_eq!(v[0].kind, ViolationKind::InvalidUrl);
}

#[test]
fn empty_media_block_is_incomplete_not_malformed() {
    let v = validate_block(&block(BlockContent::Media(MediaContent::default())));
    assert_eq!(v.len(), 1);
    assert!(!v[0].blocks_draft());
}

// ── List-of-item kinds ───────────────────────────────────────────

#[test]
fn card_list_validates_each_card_independently() {
    let b = block(BlockContent::CardList(CardListContent {
        cards: vec![
            Card {
                title_hr: "Knjižnica".into(),
                title_en: "Library".into(),
                link: Some(LinkTarget::External {
                    url: "https://knjiznica.hr".into(),
                }),
                ..Default::default()
            },
            Card {
                title_hr: "Bazen".into(),
                link: Some(LinkTarget::External {
                    url: "knjiznica.hr".into(),
                }),
                ..Default::default()
            },
        ],
        ..Default::default()
    }));
    let id = b.id;
    let v = validate_block(&b);
    assert_eq!(
        fields(&v),
        vec![
            format!("blocks[{id}].cards[1].title_en"),
            format!("blocks[{id}].cards[1].link.url"),
        ]
    );
}

#[test]
fn internal_links_need_leading_slash() {
    let b = block(BlockContent::LinkList(LinkListContent {
        links: vec![LinkItem {
            label_hr: "Obavijesti".into(),
            label_en: "Notices".into(),
            target: LinkTarget::Internal {
                path: "notices".into(),
            },
        }],
        ..Default::default()
    }));
    let v = validate_block(&b);
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].kind, ViolationKind::InvalidFormat);
    assert!(v[0].field.ends_with(".links[0].target.path"));
}

#[test]
fn internal_link_needs_no_scheme() {
    let b = block(BlockContent::LinkList(LinkListContent {
        links: vec![LinkItem {
            label_hr: "Obavijesti".into(),
            label_en: "Notices".into(),
            target: LinkTarget::Internal {
                path: "/notices".into(),
            },
        }],
        ..Default::default()
    }));
    assert!(validate_block(&b).is_empty());
}

#[test]
fn contact_list_requires_names_and_plausible_email() {
    let b = block(BlockContent::Contact(ContactContent {
        contacts: vec![ContactItem {
            name_hr: "Pisarnica".into(),
            name_en: String::new(),
            phone: Some("+385 1 000 000".into()),
            email: Some("pisarnica.grad.hr".into()),
        }],
        ..Default::default()
    }));
    let kinds: Vec<_> = validate_block(&b).into_iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![ViolationKind::Missing, ViolationKind::InvalidFormat]);
}

#[test]
fn empty_item_lists_are_too_few() {
    for content in [
        BlockContent::CardList(CardListContent::default()),
        BlockContent::Contact(ContactContent::default()),
        BlockContent::LinkList(LinkListContent::default()),
    ] {
        let v = validate_block(&block(content));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, ViolationKind::TooFew { min: 1 });
    }
}

// ── Notice and whole snapshot ────────────────────────────────────

#[test]
fn notice_content_is_exempt() {
    let b = block(BlockContent::Notice(NoticeContent {
        notice_id: String::new(),
        payload: serde_json::json!({"garbage": true}),
    }));
    assert!(validate_block(&b).is_empty());
}

#[test]
fn snapshot_collects_every_violation() {
    let good = block(text("Dobro došli", "Welcome"));
    let bad = block(text("", "Welcome"));
    let bad_id = bad.id;
    let snapshot = PageSnapshot::new(Header::simple("Naslov", ""), vec![good, bad]);

    let v = validate_snapshot(&snapshot);
    assert_eq!(
        fields(&v),
        vec!["header.title_en".to_string(), format!("blocks[{bad_id}].body_hr")]
    );
}

#[test]
fn violation_display_names_field_and_problem() {
    let v = Violation::new("header.title_en", ViolationKind::Missing);
    assert_eq!(v.to_string(), "header.title_en: required");
}

#[test]
fn violation_serializes_flat() {
    let v = Violation::new("blocks[x].zoom", ViolationKind::OutOfRange { min: 1.0, max: 20.0 });
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["field"], "blocks[x].zoom");
    assert_eq!(json["kind"], "out_of_range");
    assert_eq!(json["max"], 20.0);
}
