use harvest::{FixedClock, SharedBasket, StoredBasket, constants::INITIAL_TAG};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_create_without_tag_has_one_tag_and_one_version() {
    let basket = create(json!({"park": "PB", "agent": "PDP01"}), None);

    assert_eq!(basket.tags.len(), 1);
    assert_eq!(basket.versions.len(), 1);
    assert_eq!(basket.head, INITIAL_TAG);
}

#[test]
fn test_create_with_tag_has_two_tags_and_two_versions() {
    let basket = create(json!({"park": "PB", "agent": "PDP01"}), Some("engine"));

    assert_eq!(basket.tags.len(), 2);
    assert_eq!(basket.versions.len(), 2);
    assert!(basket.tags.contains_key("initial"));
    assert!(basket.tags.contains_key("engine"));
    // Consumers select the tag they want; head stays on the root.
    assert_eq!(basket.head, INITIAL_TAG);
}

#[test]
fn test_root_version_holds_initial_view() {
    let basket = create(json!({"park": "PB", "agent": "PDP01"}), Some("engine"));
    let root = &basket.versions[&key_of(&basket, "initial")];

    assert!(root.is_root());
    assert_eq!(root.tag, "initial");
    assert_eq!(root.additions, view(json!({"park": "PB", "agent": "PDP01"})));
    assert!(root.subtractions.is_empty());
}

#[test]
fn test_tagged_child_is_empty_and_based_on_root() {
    let basket = create(json!({"park": "PB", "agent": "PDP01"}), Some("engine"));
    let root_key = key_of(&basket, "initial");
    let child = &basket.versions[&key_of(&basket, "engine")];

    assert_eq!(child.base.as_ref(), Some(&root_key));
    assert_eq!(child.tag, "engine");
    assert!(child.is_empty_delta());
}

#[test]
fn test_engine_view_inherits_root_before_first_save() {
    let basket = create(json!({"park": "PB", "agent": "PDP01"}), Some("engine"));
    assert_eq!(
        data_of(&basket, "engine"),
        view(json!({"park": "PB", "agent": "PDP01"}))
    );
}

#[test]
fn test_create_attaches_external_id() {
    let shared = SharedBasket::new(json!({})).with_id("basket-42");
    let basket = StoredBasket::create(&shared).unwrap();

    assert_eq!(basket.id.as_deref(), Some("basket-42"));
    assert_eq!(basket.rev, None);
}

#[test]
fn test_create_stamps_timestamps_from_clock() {
    let clock = FixedClock::new(1_704_067_200_000);
    let shared = SharedBasket::new(json!({"park": "PB"})).with_tag("engine");
    let basket = StoredBasket::create_with_clock(&shared, &clock).unwrap();

    let root = &basket.versions[&key_of(&basket, "initial")];
    let child = &basket.versions[&key_of(&basket, "engine")];
    assert_eq!(root.created_at.timestamp_millis(), 1_704_067_200_000);
    assert!(child.created_at > root.created_at);
    assert!(basket.created_at > child.created_at);
}

#[test]
fn test_create_extracts_searchable_keys() {
    let basket = create(
        json!({
            "brand": "PB",
            "customer": {},
            "orderId": "5XXXXXX",
            "pin": "3333",
            "notSearchableKey": "notSearchableValue"
        }),
        Some("engine"),
    );

    assert_eq!(basket.searchable_keys.len(), 4);
    assert!(!basket.searchable_keys.contains_key("notSearchableKey"));
}

#[test]
fn test_create_with_empty_data() {
    let basket = create(json!({}), Some("engine"));
    assert!(data_of(&basket, "initial").is_empty());
    assert!(basket.searchable_keys.is_empty());
}

#[test]
fn test_create_treats_empty_tag_as_absent() {
    let basket = create(json!({"park": "PB"}), Some(""));
    assert_eq!(basket.tags.len(), 1);
}

#[test]
fn test_create_rejects_invalid_shared_basket() {
    for data in [json!(null), json!([]), json!("park")] {
        let err = StoredBasket::create(&SharedBasket::new(data)).unwrap_err();
        assert!(err.is_invalid_input());
    }
}

#[test]
fn test_create_rejects_initial_as_requested_tag() {
    let shared = SharedBasket::new(json!({})).with_tag(INITIAL_TAG);
    let err = StoredBasket::create(&shared).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_create_yields_distinct_keys() {
    let basket = create(json!({}), Some("engine"));
    assert_ne!(key_of(&basket, "initial"), key_of(&basket, "engine"));
}
