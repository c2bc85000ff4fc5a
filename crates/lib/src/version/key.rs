//! Opaque identifier for a single version record.
//!
//! Keys are random hex tokens. They are never parsed or hashed from content;
//! two versions with identical deltas still get distinct keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of random bytes behind a freshly generated key.
pub const VERSION_KEY_BYTES: usize = 8;

/// Identifies one version record within a stored basket.
///
/// Serialized as a bare string so stored baskets stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionKey(String);

impl VersionKey {
    /// Generates a new random key.
    pub fn random() -> Self {
        let bytes: [u8; VERSION_KEY_BYTES] = rand::random();
        Self(hex::encode(bytes))
    }

    /// Generates a random key that is not accepted by `taken`.
    pub(crate) fn random_unused(taken: impl Fn(&VersionKey) -> bool) -> Self {
        loop {
            let key = Self::random();
            if !taken(&key) {
                return key;
            }
            tracing::debug!(version = %key, "Version key collision, regenerating");
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for VersionKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VersionKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&VersionKey> for VersionKey {
    fn from(key: &VersionKey) -> Self {
        key.clone()
    }
}

impl From<VersionKey> for String {
    fn from(key: VersionKey) -> Self {
        key.0
    }
}

impl AsRef<str> for VersionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for VersionKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for VersionKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
