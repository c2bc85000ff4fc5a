use std::collections::HashSet;

use harvest::{FixedClock, SharedBasket, StoredBasket, VersionKey};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_version_tag_is_fixed_at_creation() {
    let mut basket = create(json!({}), Some("engine"));
    let old_engine = key_of(&basket, "engine");
    let root = key_of(&basket, "initial");

    basket.branch(&root, "engine").unwrap();

    // The tag table moved on, the record did not.
    assert_eq!(basket.versions[&old_engine].tag, "engine");
    assert_ne!(key_of(&basket, "engine"), old_engine);
}

#[test]
fn test_keys_are_unique_within_a_basket() {
    let mut basket = create(json!({}), Some("step"));
    for i in 0..200 {
        let parent = key_of(&basket, &basket.head.clone());
        basket.branch(&parent, &format!("step{i}")).unwrap();
    }

    let keys: HashSet<&VersionKey> = basket.versions.keys().collect();
    assert_eq!(keys.len(), basket.versions.len());
    assert_eq!(basket.versions.len(), 202);
}

#[test]
fn test_versions_record_creation_order() {
    let clock = FixedClock::default();
    let shared = SharedBasket::new(json!({})).with_tag("engine");
    let mut basket = StoredBasket::create_with_clock(&shared, &clock).unwrap();
    let engine = key_of(&basket, "engine");
    let availability = basket
        .branch_with_clock(&engine, "availability", &clock)
        .unwrap();

    let root = &basket.versions[&key_of(&basket, "initial")];
    assert!(root.created_at < basket.versions[&engine].created_at);
    assert!(basket.versions[&engine].created_at < basket.versions[&availability].created_at);
}

#[test]
fn test_long_chain_materializes() {
    let mut basket = create(json!({"step": 0}), Some("s0"));
    for i in 1..500 {
        let parent = key_of(&basket, &format!("s{}", i - 1));
        basket.branch(&parent, &format!("s{i}")).unwrap();
        save(&mut basket, &format!("s{i}"), json!({"step": i}));
    }

    assert_eq!(data_of(&basket, "s499"), view(json!({"step": 499})));
    assert_eq!(data_of(&basket, "s250"), view(json!({"step": 250})));
}
