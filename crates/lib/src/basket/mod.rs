//! The stored basket: a tag table, a version table and a head pointer.
//!
//! A basket never stores full copies of the data it accumulates. Each version
//! holds a delta against its `base`, and any tag's flattened view is rebuilt
//! by replaying the chain from the root (see [`reconstruct`]).
//!
//! # Lifecycle
//!
//! ```
//! use harvest::{SharedBasket, StoredBasket};
//! use serde_json::json;
//!
//! // Step 1: the client lands on the engine page.
//! let request = SharedBasket::new(json!({"park": "PB", "agent": "PDP01"})).with_tag("engine");
//! let mut basket = StoredBasket::create(&request)?;
//! let engine = basket.materialize(Some("engine"))?;
//! assert_eq!(engine.data["park"], json!("PB"));
//!
//! // Step 2: the client fills in the engine form.
//! let request = SharedBasket::new(json!({"agent": "PDP01", "adults": 1})).with_tag("engine");
//! basket.save(&request)?;
//!
//! // Step 3: move on to availability, starting from what engine holds.
//! basket.branch(&engine.version, "availability")?;
//! let availability = basket.materialize(None)?;
//! assert_eq!(availability.tag, "availability");
//! assert_eq!(availability.data["adults"], json!(1));
//! # Ok::<(), harvest::Error>(())
//! ```
//!
//! Operations validate every precondition before touching the basket, so a
//! failed call leaves it exactly as it was.

mod errors;
mod integrity;
pub mod reconstruct;
pub mod searchable;
mod shared;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
pub use errors::BasketError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
pub use shared::{SharedBasket, SharedMeta, SharedView};

use crate::{
    Clock, Result, SystemClock,
    constants::INITIAL_TAG,
    version::{FlatView, Version, VersionKey},
};

/// The persisted representation of a basket.
///
/// The owner of a `StoredBasket` is responsible for storing it and for
/// serializing access: `save` and `branch` take `&mut self`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredBasket {
    /// External identifier, opaque to the store.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// External revision token, opaque to the store.
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    /// Tag considered current; moved by `branch`.
    pub head: String,
    pub tags: BTreeMap<String, VersionKey>,
    pub versions: BTreeMap<VersionKey, Version>,
    /// Allow-listed fields of the most recently created or saved view.
    #[serde(default)]
    pub searchable_keys: FlatView,
    pub created_at: DateTime<Utc>,
}

/// What a `save` wrote into the target version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaSummary {
    pub version: VersionKey,
    pub additions: usize,
    pub subtractions: usize,
}

impl StoredBasket {
    /// Creates a basket seeded with `shared`'s data, stamped by the system clock.
    pub fn create(shared: &SharedBasket) -> Result<Self> {
        Self::create_with_clock(shared, &SystemClock)
    }

    /// Creates a basket seeded with `shared`'s data.
    ///
    /// The data becomes the root version under the `initial` tag. If `shared`
    /// requests a tag, an empty child of the root is registered under it.
    /// `head` starts at `initial`.
    pub fn create_with_clock(shared: &SharedBasket, clock: &dyn Clock) -> Result<Self> {
        let data = shared.view()?;
        let requested = shared.requested_tag();
        if requested == Some(INITIAL_TAG) {
            return Err(BasketError::invalid_input(format!(
                "\"{INITIAL_TAG}\" is reserved for the root version"
            ))
            .into());
        }

        let mut tags = BTreeMap::new();
        let mut versions = BTreeMap::new();

        let root_key = VersionKey::random();
        versions.insert(
            root_key.clone(),
            Version::root(INITIAL_TAG, data.clone(), clock.now()),
        );
        tags.insert(INITIAL_TAG.to_string(), root_key.clone());

        if let Some(tag) = requested {
            let key = VersionKey::random_unused(|key| versions.contains_key(key));
            versions.insert(key.clone(), Version::child(root_key.clone(), tag, clock.now()));
            tags.insert(tag.to_string(), key);
        }

        let basket = Self {
            id: shared.id.clone(),
            rev: None,
            head: INITIAL_TAG.to_string(),
            tags,
            versions,
            searchable_keys: searchable::extract_searchable(data),
            created_at: clock.now(),
        };

        tracing::debug!(
            root = %root_key,
            tag = ?requested,
            fields = data.len(),
            "Created basket"
        );
        Ok(basket)
    }

    /// Recomputes the delta stored under `shared.tag`.
    ///
    /// The delta is taken against the view of the tagged version's *base*, not
    /// against whatever the version held before. Saving the same data twice
    /// therefore stores the same delta.
    pub fn save(&mut self, shared: &SharedBasket) -> Result<DeltaSummary> {
        let data = shared.view()?;
        let tag = shared
            .requested_tag()
            .ok_or_else(|| BasketError::invalid_input("a tag is required to save"))?;
        self.validate()?;
        let key = self.version_for_tag(tag)?.clone();

        let base = self.versions.get(&key).and_then(|v| v.base.clone());
        let previous = reconstruct::build_view_from(self, base.as_ref())?;
        let (additions, subtractions) = diff_views(&previous, data);

        let summary = DeltaSummary {
            version: key.clone(),
            additions: additions.len(),
            subtractions: subtractions.len(),
        };

        let version = self
            .versions
            .get_mut(&key)
            .ok_or_else(|| BasketError::UnknownVersion {
                version: key.clone(),
            })?;
        version.set_delta(additions, subtractions);
        self.searchable_keys = searchable::extract_searchable(data);

        tracing::debug!(
            tag,
            version = %key,
            additions = summary.additions,
            subtractions = summary.subtractions,
            "Saved basket"
        );
        Ok(summary)
    }

    /// Appends an empty version based on `parent` under `tag` and moves head
    /// to it, stamped by the system clock.
    pub fn branch(&mut self, parent: &VersionKey, tag: &str) -> Result<VersionKey> {
        self.branch_with_clock(parent, tag, &SystemClock)
    }

    /// Appends an empty version based on `parent` under `tag` and moves head
    /// to it.
    ///
    /// Reusing an existing tag repoints it; the version it pointed at stays in
    /// the basket but is no longer reachable by tag.
    pub fn branch_with_clock(
        &mut self,
        parent: &VersionKey,
        tag: &str,
        clock: &dyn Clock,
    ) -> Result<VersionKey> {
        self.validate()?;
        if tag.is_empty() {
            return Err(BasketError::invalid_input("tag must not be empty").into());
        }
        if !self.versions.contains_key(parent) {
            return Err(BasketError::UnknownVersion {
                version: parent.clone(),
            }
            .into());
        }

        let key = VersionKey::random_unused(|key| self.versions.contains_key(key));
        self.versions.insert(
            key.clone(),
            Version::child(parent.clone(), tag, clock.now()),
        );
        if let Some(previous) = self.tags.insert(tag.to_string(), key.clone()) {
            tracing::warn!(tag, previous = %previous, "Tag repointed to a new version");
        }
        self.head = tag.to_string();

        tracing::debug!(tag, version = %key, parent = %parent, "Branched basket");
        Ok(key)
    }

    /// Reconstructs the view of `tag`, or of `head` when `tag` is `None`.
    pub fn materialize(&self, tag: Option<&str>) -> Result<SharedView> {
        self.validate()?;
        let tag = tag.unwrap_or(self.head.as_str());
        let key = self.version_for_tag(tag)?;
        let data = reconstruct::build_view(self, key)?;

        tracing::debug!(tag, version = %key, fields = data.len(), "Materialized basket");
        Ok(SharedView {
            id: self.id.clone(),
            rev: self.rev.clone(),
            version: key.clone(),
            tag: tag.to_string(),
            created_at: self.created_at,
            data,
            meta: SharedMeta {
                tags: self.tags.clone(),
            },
        })
    }

    /// Resolves `tag` to its version key.
    pub fn version_for_tag(&self, tag: &str) -> Result<&VersionKey> {
        self.tags.get(tag).ok_or_else(|| {
            BasketError::UnknownTag {
                tag: tag.to_string(),
            }
            .into()
        })
    }

    /// Version key `head` currently points at.
    pub fn head_version(&self) -> Result<&VersionKey> {
        self.version_for_tag(&self.head)
    }

    /// Reconstructs the view of a specific version, tagged or not.
    pub fn view_of(&self, key: &VersionKey) -> Result<FlatView> {
        reconstruct::build_view(self, key)
    }

    /// Parses a stored basket, reporting shape errors as `InvalidStore`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| BasketError::invalid_store(e.to_string()).into())
    }

    /// Converts a JSON value into a stored basket, reporting shape errors as
    /// `InvalidStore`.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| BasketError::invalid_store(e.to_string()).into())
    }

    /// Serializes the basket as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Computes the delta that turns `previous` into `next`.
///
/// Additions hold every field of `next` that is missing from or structurally
/// different in `previous`; subtractions name every field of `previous` that
/// `next` lacks. The two never overlap.
///
/// Numbers compare by value, so `1` and `1.0` are the same field value.
pub fn diff_views(previous: &FlatView, next: &FlatView) -> (FlatView, Vec<String>) {
    let additions = next
        .iter()
        .filter(|&(field, value)| {
            !previous
                .get(field)
                .is_some_and(|old| same_value(old, value))
        })
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect();
    let subtractions = previous
        .keys()
        .filter(|field| !next.contains_key(*field))
        .cloned()
        .collect();
    (additions, subtractions)
}

/// Deep equality on JSON values with numbers compared numerically.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x == y || ((x.is_f64() || y.is_f64()) && x.as_f64() == y.as_f64())
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_value(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(field, x)| ys.get(field).is_some_and(|y| same_value(x, y)))
        }
        _ => a == b,
    }
}
