//! Basket error types.
//!
//! Every precondition failure in the basket operations maps to one of the
//! variants below. Operations check all preconditions before mutating, so a
//! returned error always leaves the stored basket untouched.

use thiserror::Error;

use crate::version::VersionKey;

/// Errors raised by basket operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BasketError {
    /// A supplied shared basket or argument is missing or malformed.
    #[error("Invalid shared basket: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: String,
    },

    /// A stored basket is missing required parts or breaks referential integrity.
    #[error("Invalid stored basket: {reason}")]
    InvalidStore {
        /// Which check failed
        reason: String,
    },

    /// The tag is not present in the basket's tag table.
    #[error("\"{tag}\" is not a valid tag in this basket")]
    UnknownTag {
        /// The tag that was looked up
        tag: String,
    },

    /// The version key is not present in the basket's version table.
    #[error("\"{version}\" is not a valid version key in this basket")]
    UnknownVersion {
        /// The key that was looked up
        version: VersionKey,
    },
}

impl BasketError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        BasketError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_store(reason: impl Into<String>) -> Self {
        BasketError::InvalidStore {
            reason: reason.into(),
        }
    }

    /// Check if this error indicates a tag or version was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BasketError::UnknownTag { .. } | BasketError::UnknownVersion { .. }
        )
    }

    /// Check if this error was caused by a malformed shared basket or argument.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, BasketError::InvalidInput { .. })
    }

    /// Check if this error was caused by a malformed stored basket.
    pub fn is_invalid_store(&self) -> bool {
        matches!(self, BasketError::InvalidStore { .. })
    }

    /// Get the tag if this error is about a specific tag.
    pub fn tag(&self) -> Option<&str> {
        match self {
            BasketError::UnknownTag { tag } => Some(tag),
            _ => None,
        }
    }

    /// Get the version key if this error is about a specific version.
    pub fn version(&self) -> Option<&VersionKey> {
        match self {
            BasketError::UnknownVersion { version } => Some(version),
            _ => None,
        }
    }
}

impl From<BasketError> for crate::Error {
    fn from(err: BasketError) -> Self {
        crate::Error::Basket(err)
    }
}
