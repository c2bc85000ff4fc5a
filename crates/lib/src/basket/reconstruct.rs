//! Rebuilding a flattened view from a version chain.
//!
//! The chain is collected leaf to root, then replayed root to leaf. Each call
//! starts from an empty map, so the result never shares state with the stored
//! records.

use super::{BasketError, StoredBasket};
use crate::{
    Result,
    version::{FlatView, Version, VersionKey},
};

/// Reconstructs the flattened view of `key`.
pub fn build_view(basket: &StoredBasket, key: &VersionKey) -> Result<FlatView> {
    let chain = ancestry(basket, key)?;
    let mut view = FlatView::new();
    for version in chain.iter().rev() {
        version.apply_to(&mut view);
    }
    Ok(view)
}

/// Like [`build_view`], but `None` (the base of a root) yields an empty view.
pub fn build_view_from(basket: &StoredBasket, key: Option<&VersionKey>) -> Result<FlatView> {
    match key {
        Some(key) => build_view(basket, key),
        None => Ok(FlatView::new()),
    }
}

/// Versions from `key` up to and including the root.
pub(crate) fn ancestry<'a>(basket: &'a StoredBasket, key: &VersionKey) -> Result<Vec<&'a Version>> {
    let mut chain: Vec<&Version> = Vec::new();
    let mut next = Some(key);
    while let Some(current) = next {
        // A chain can never be longer than the version table.
        if chain.len() >= basket.versions.len() {
            return Err(BasketError::invalid_store(format!(
                "version chain from \"{key}\" does not reach a root"
            ))
            .into());
        }
        let version = basket
            .versions
            .get(current)
            .ok_or_else(|| BasketError::UnknownVersion {
                version: current.clone(),
            })?;
        chain.push(version);
        next = version.base.as_ref();
    }
    tracing::trace!(version = %key, depth = chain.len(), "Collected version chain");
    Ok(chain)
}
