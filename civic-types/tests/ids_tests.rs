use civic_types::{BlockId, PageId, Revision};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

// ── Identifiers ──────────────────────────────────────────────────

#[test]
fn page_ids_are_unique() {
    let ids: HashSet<PageId> = (0..1000).map(|_| PageId::new()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn block_ids_are_time_ordered() {
    let first = BlockId::new();
    let second = BlockId::new();
    assert!(first < second);
}

#[test]
fn page_id_display_parse_roundtrip() {
    let id = PageId::new();
    let parsed = PageId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn page_id_parse_rejects_garbage() {
    assert!(PageId::parse("not-a-uuid").is_err());
    assert!(BlockId::from_str("").is_err());
}

#[test]
fn block_id_serializes_transparently() {
    let id = BlockId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
}

// ── Revision ─────────────────────────────────────────────────────

#[test]
fn revision_starts_at_one() {
    assert_eq!(Revision::INITIAL.value(), 1);
    assert_eq!(Revision::default(), Revision::INITIAL);
}

#[test]
fn revision_next_increments_by_one() {
    assert_eq!(Revision::new(7).next(), Revision::new(8));
}

#[test]
fn revision_next_saturates() {
    assert_eq!(Revision::new(u64::MAX).next(), Revision::new(u64::MAX));
}

#[test]
fn revision_display() {
    assert_eq!(Revision::new(12).to_string(), "r12");
}

proptest! {
    #[test]
    fn revision_next_is_strictly_greater(v in 0u64..u64::MAX) {
        let r = Revision::new(v);
        prop_assert!(r.next() > r);
    }
}
