use civic_model::{
    BlockContent, BlockType, ContentBlock, MapContent, NoticeContent, TextContent, addable_types,
    can_add_map,
};
use std::str::FromStr;

fn map_block() -> ContentBlock {
    ContentBlock::new(
        BlockContent::Map(MapContent {
            lat: 45.81,
            lng: 15.98,
            zoom: 14,
            label_hr: None,
            label_en: None,
        }),
        0,
    )
}

// ── Addability ───────────────────────────────────────────────────

#[test]
fn every_type_but_notice_is_addable() {
    for t in BlockType::ALL {
        assert_eq!(t.is_addable(), t != BlockType::Notice, "{t}");
    }
}

#[test]
fn addable_types_excludes_notice() {
    let types: Vec<_> = addable_types().collect();
    assert_eq!(types.len(), 7);
    assert!(!types.contains(&BlockType::Notice));
}

#[test]
fn only_map_is_singleton() {
    let singletons: Vec<_> = BlockType::ALL.into_iter().filter(|t| t.is_singleton()).collect();
    assert_eq!(singletons, vec![BlockType::Map]);
}

// ── can_add_map ──────────────────────────────────────────────────

#[test]
fn can_add_map_on_empty_page() {
    assert!(can_add_map(&[]));
}

#[test]
fn can_add_map_ignores_other_types() {
    let text = ContentBlock::new(BlockContent::Text(TextContent::default()), 0);
    let notice = ContentBlock::new(
        BlockContent::Notice(NoticeContent {
            notice_id: "n-1".into(),
            payload: serde_json::Value::Null,
        }),
        1,
    );
    assert!(can_add_map(&[text, notice]));
}

#[test]
fn cannot_add_second_map() {
    assert!(!can_add_map(&[map_block()]));
}

// ── Names and schemas ────────────────────────────────────────────

#[test]
fn wire_names_roundtrip() {
    for t in BlockType::ALL {
        assert_eq!(BlockType::from_str(t.as_str()).unwrap(), t);
        assert_eq!(serde_json::to_value(t).unwrap(), t.as_str());
    }
}

#[test]
fn unknown_wire_name_is_rejected() {
    assert!(BlockType::from_str("carousel").is_err());
}

#[test]
fn list_kinds_declare_item_fields() {
    for t in [BlockType::CardList, BlockType::Contact, BlockType::LinkList, BlockType::Media] {
        let schema = t.schema();
        assert!(schema.is_item_list(), "{t}");
        assert!(!schema.item_required_fields.is_empty());
    }
    assert_eq!(BlockType::Contact.schema().items_field, Some("contacts"));
}

#[test]
fn bilingual_text_kinds_require_both_languages() {
    let text = BlockType::Text.schema();
    assert!(text.required_fields.contains(&"body_hr"));
    assert!(text.required_fields.contains(&"body_en"));
    assert!(!BlockType::Map.schema().is_item_list());
}
