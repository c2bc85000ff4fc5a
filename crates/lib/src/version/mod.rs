//!
//! Defines the version record (`Version`) and its key (`VersionKey`).
//!
//! A version stores only a delta: the fields it adds or changes relative to
//! the flattened view of its `base`, and the fields it removes. The root
//! version of a basket has no base, so its additions are the whole initial
//! view.

pub mod key;

use chrono::{DateTime, Utc};
pub use key::VersionKey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The complete field -> value state of a basket at one point in time.
pub type FlatView = Map<String, Value>;

/// One node in a basket's version chain.
///
/// On the wire the delta is written as `+` (additions) and `-`
/// (subtractions); the long names are accepted when reading.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Parent version, `None` for the root.
    pub base: Option<VersionKey>,
    /// Tag this version was created under. Fixed even if the tag is later
    /// pointed elsewhere.
    pub tag: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "+", alias = "additions", default)]
    pub additions: FlatView,
    #[serde(rename = "-", alias = "subtractions", default)]
    pub subtractions: Vec<String>,
}

impl Version {
    /// A root version seeded with the whole initial view.
    pub fn root(tag: impl Into<String>, data: FlatView, created_at: DateTime<Utc>) -> Self {
        Self {
            base: None,
            tag: tag.into(),
            created_at,
            additions: data,
            subtractions: Vec::new(),
        }
    }

    /// An empty child of `base`. Its view equals the base's view until saved.
    pub fn child(base: VersionKey, tag: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            base: Some(base),
            tag: tag.into(),
            created_at,
            additions: FlatView::new(),
            subtractions: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.base.is_none()
    }

    /// True when this version changes nothing relative to its base.
    pub fn is_empty_delta(&self) -> bool {
        self.additions.is_empty() && self.subtractions.is_empty()
    }

    /// Replaces the stored delta wholesale.
    pub(crate) fn set_delta(&mut self, additions: FlatView, subtractions: Vec<String>) {
        self.additions = additions;
        self.subtractions = subtractions;
    }

    /// Applies this version's delta on top of `view`.
    pub(crate) fn apply_to(&self, view: &mut FlatView) {
        view.extend(
            self.additions
                .iter()
                .map(|(field, value)| (field.clone(), value.clone())),
        );
        for field in &self.subtractions {
            view.remove(field);
        }
    }
}
