//! Structural checks run before any basket operation touches a stored basket.

use std::collections::HashSet;

use super::{BasketError, StoredBasket};
use crate::{Result, version::VersionKey};

impl StoredBasket {
    /// Verifies referential integrity.
    ///
    /// Checks that `head` names a known tag, that every tag and every `base`
    /// resolves to a stored version, that roots carry no subtractions, and
    /// that every chain ends at a root.
    pub fn validate(&self) -> Result<()> {
        if self.head.is_empty() {
            return Err(BasketError::invalid_store("head is empty").into());
        }
        if !self.tags.contains_key(&self.head) {
            return Err(BasketError::invalid_store(format!(
                "head \"{}\" is not a tag in this basket",
                self.head
            ))
            .into());
        }

        for (tag, key) in &self.tags {
            if !self.versions.contains_key(key) {
                return Err(BasketError::invalid_store(format!(
                    "tag \"{tag}\" points at missing version \"{key}\""
                ))
                .into());
            }
        }

        for (key, version) in &self.versions {
            match &version.base {
                Some(base) if !self.versions.contains_key(base) => {
                    return Err(BasketError::invalid_store(format!(
                        "version \"{key}\" is based on missing version \"{base}\""
                    ))
                    .into());
                }
                None if !version.subtractions.is_empty() => {
                    return Err(BasketError::invalid_store(format!(
                        "root version \"{key}\" has subtractions"
                    ))
                    .into());
                }
                _ => {}
            }
        }

        self.check_acyclic()
    }

    /// Every base exists at this point; walk each chain until it reaches a root
    /// or a version already known to reach one.
    fn check_acyclic(&self) -> Result<()> {
        let mut rooted: HashSet<&VersionKey> = HashSet::with_capacity(self.versions.len());
        for start in self.versions.keys() {
            let mut path: HashSet<&VersionKey> = HashSet::new();
            let mut current = Some(start);
            while let Some(key) = current {
                if rooted.contains(key) {
                    break;
                }
                if !path.insert(key) {
                    return Err(BasketError::invalid_store(format!(
                        "version \"{key}\" is its own ancestor"
                    ))
                    .into());
                }
                current = self
                    .versions
                    .get(key)
                    .and_then(|version| version.base.as_ref());
            }
            rooted.extend(path);
        }
        Ok(())
    }
}
