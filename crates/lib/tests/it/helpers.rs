use harvest::{FixedClock, FlatView, SharedBasket, StoredBasket, VersionKey};
use serde_json::{Value, json};

// ==========================
// FIXTURES
// ==========================

/// A stored basket created with `{park, agent}` and an empty `engine` child,
/// with head on `engine`. Keys are fixed so expected output can be written
/// out in full.
pub fn stored_basket_with_park_and_agent() -> StoredBasket {
    StoredBasket::from_value(json!({
        "_id": "basket-1",
        "_rev": "1-abc",
        "head": "engine",
        "tags": {
            "initial": "a1b2c3d4",
            "engine": "e5f6a7b8"
        },
        "versions": {
            "a1b2c3d4": {
                "base": null,
                "tag": "initial",
                "createdAt": "2024-01-01T00:00:00Z",
                "+": {"park": "PB", "agent": "PDP01"},
                "-": []
            },
            "e5f6a7b8": {
                "base": "a1b2c3d4",
                "tag": "engine",
                "createdAt": "2024-01-01T00:00:00.001Z",
                "+": {},
                "-": []
            }
        },
        "searchableKeys": {},
        "createdAt": "2024-01-01T00:00:00.002Z"
    }))
    .expect("fixture should parse")
}

/// A four-step chain exercising overwrites and removals:
/// initial {park, agent} -> engine (+party, -park) -> availability (+date)
/// -> extras (+insurance, -date, agent changed). Head is `extras`.
pub fn stored_basket_with_additions_and_subtractions() -> StoredBasket {
    StoredBasket::from_value(json!({
        "head": "extras",
        "tags": {
            "initial": "00000001",
            "engine": "00000002",
            "availability": "00000003",
            "extras": "00000004"
        },
        "versions": {
            "00000001": {
                "base": null,
                "tag": "initial",
                "createdAt": "2024-01-01T00:00:00Z",
                "+": {"park": "PB", "agent": "PDP01"},
                "-": []
            },
            "00000002": {
                "base": "00000001",
                "tag": "engine",
                "createdAt": "2024-01-01T00:01:00Z",
                "+": {"adults": 2, "children": 1},
                "-": ["park"]
            },
            "00000003": {
                "base": "00000002",
                "tag": "availability",
                "createdAt": "2024-01-01T00:02:00Z",
                "+": {"date": "2024-06-01"},
                "-": []
            },
            "00000004": {
                "base": "00000003",
                "tag": "extras",
                "createdAt": "2024-01-01T00:03:00Z",
                "+": {"insurance": true, "agent": "PDP02"},
                "-": ["date"]
            }
        },
        "searchableKeys": {},
        "createdAt": "2024-01-01T00:00:00Z"
    }))
    .expect("fixture should parse")
}

/// The request sent after the engine page is filled in.
pub fn shared_basket_with_agent_and_party_composition() -> SharedBasket {
    SharedBasket::new(json!({
        "agent": "PDP01",
        "adults": 1,
        "children": 2,
        "infants": 0
    }))
    .with_tag("engine")
}

// ==========================
// BUILDERS
// ==========================

/// Converts a `json!` object literal into a flattened view.
pub fn view(value: Value) -> FlatView {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Creates a basket on a fixed clock.
pub fn create(data: Value, tag: Option<&str>) -> StoredBasket {
    let mut shared = SharedBasket::new(data);
    if let Some(tag) = tag {
        shared = shared.with_tag(tag);
    }
    StoredBasket::create_with_clock(&shared, &FixedClock::default()).expect("create should succeed")
}

/// Saves `data` under `tag`.
pub fn save(basket: &mut StoredBasket, tag: &str, data: Value) {
    basket
        .save(&SharedBasket::new(data).with_tag(tag))
        .expect("save should succeed");
}

/// Flattened view of `tag`.
pub fn data_of(basket: &StoredBasket, tag: &str) -> FlatView {
    basket
        .materialize(Some(tag))
        .expect("tag should materialize")
        .data
}

/// Version key currently behind `tag`.
pub fn key_of(basket: &StoredBasket, tag: &str) -> VersionKey {
    basket
        .version_for_tag(tag)
        .expect("tag should exist")
        .clone()
}

// ==========================
// ASSERTIONS
// ==========================

/// Asserts every tag and every base resolves to a stored version.
pub fn assert_referential_integrity(basket: &StoredBasket) {
    for (tag, key) in &basket.tags {
        assert!(
            basket.versions.contains_key(key),
            "tag {tag} points at missing version {key}"
        );
    }
    for (key, version) in &basket.versions {
        if let Some(base) = &version.base {
            assert!(
                basket.versions.contains_key(base),
                "version {key} has missing base {base}"
            );
        }
    }
    basket.validate().expect("basket should validate");
}

/// Asserts a version's delta is minimal against the view it produces.
pub fn assert_delta_minimal(basket: &StoredBasket, tag: &str) {
    let version = &basket.versions[&key_of(basket, tag)];
    let produced = data_of(basket, tag);
    for field in &version.subtractions {
        assert!(
            !version.additions.contains_key(field),
            "{field} is both added and subtracted"
        );
        assert!(
            !produced.contains_key(field),
            "{field} is subtracted but still present"
        );
    }
}
