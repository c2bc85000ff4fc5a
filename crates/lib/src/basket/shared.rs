//! The client-facing shapes of a basket.
//!
//! A [`SharedBasket`] is what a caller submits: the flattened view it holds,
//! plus the tag it belongs to. A [`SharedView`] is what the store hands back
//! from [`StoredBasket::materialize`](super::StoredBasket::materialize).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BasketError;
use crate::{
    Result,
    version::{FlatView, VersionKey},
};

/// A flattened view submitted by a client, shaped `{id, version, tag, data}`.
///
/// `data` is kept as a raw JSON value so that a malformed payload can be
/// reported as [`BasketError::InvalidInput`] instead of failing to parse.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SharedBasket {
    #[serde(default)]
    pub id: Option<String>,
    /// Version the client last saw. Informational only.
    #[serde(default)]
    pub version: Option<VersionKey>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl SharedBasket {
    pub fn new(data: impl Into<Value>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<VersionKey>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The submitted flattened view, or `InvalidInput` if `data` is not an object.
    pub fn view(&self) -> Result<&FlatView> {
        match &self.data {
            Value::Object(map) => Ok(map),
            Value::Null => Err(BasketError::invalid_input("data is missing").into()),
            other => Err(BasketError::invalid_input(format!(
                "data must be an object, got {}",
                json_kind(other)
            ))
            .into()),
        }
    }

    /// The requested tag, treating an empty string as absent.
    pub fn requested_tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|tag| !tag.is_empty())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A reconstructed view of one tag.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SharedView {
    pub id: Option<String>,
    pub rev: Option<String>,
    /// Version the tag resolved to.
    pub version: VersionKey,
    pub tag: String,
    /// Creation time of the basket, not of the version.
    pub created_at: DateTime<Utc>,
    pub data: FlatView,
    pub meta: SharedMeta,
}

/// Snapshot of the basket's tag table taken at materialize time.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SharedMeta {
    pub tags: BTreeMap<String, VersionKey>,
}

impl SharedView {
    /// A request a client would send back after editing this view's data.
    pub fn to_request(&self) -> SharedBasket {
        SharedBasket {
            id: self.id.clone(),
            version: Some(self.version.clone()),
            tag: Some(self.tag.clone()),
            data: Value::Object(self.data.clone()),
        }
    }
}
