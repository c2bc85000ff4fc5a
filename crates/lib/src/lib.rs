//! Harvest: versioned, tag-addressable baskets of accumulating user data.
//!
//! A client that fills in a record over several request/response cycles (a
//! multi-step form, say) submits its whole flattened view at every step.
//! Harvest keeps every step reconstructable without storing a full copy per
//! step.
//!
//! ## Core Concepts
//!
//! * **Flattened views (`version::FlatView`)**: the complete field -> value state of a basket at one point in time.
//! * **Versions (`version::Version`)**: delta records (additions and subtractions) against a `base` version, forming a chain back to a root.
//! * **Tags**: human-meaningful labels (`"engine"`, `"availability"`) pointing at one version key each. `"initial"` always names the root.
//! * **Stored baskets (`basket::StoredBasket`)**: the tag table, the version table and the `head` tag. This is the only state a caller needs to persist.
//! * **Shared baskets (`basket::SharedBasket`, `basket::SharedView`)**: the client-facing `{id, version, tag, data}` shape going in and coming out.
//!
//! The library performs no I/O. Persisting a `StoredBasket` (it is
//! `Serialize`/`Deserialize`) and serializing access to it are the caller's
//! concern.

pub mod basket;
pub mod clock;
pub mod constants;
pub mod version;

pub use basket::{BasketError, DeltaSummary, SharedBasket, SharedView, StoredBasket};
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use version::{FlatView, Version, VersionKey};

/// Result type used throughout the harvest library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the harvest library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured basket errors from the basket module
    #[error(transparent)]
    Basket(basket::BasketError),
}

impl Error {
    /// Check if this error indicates a tag or version was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Basket(basket_err) => basket_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error was caused by malformed caller input.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Error::Basket(basket_err) => basket_err.is_invalid_input(),
            _ => false,
        }
    }

    /// Check if this error was caused by a malformed stored basket.
    pub fn is_invalid_store(&self) -> bool {
        match self {
            Error::Basket(basket_err) => basket_err.is_invalid_store(),
            _ => false,
        }
    }
}
