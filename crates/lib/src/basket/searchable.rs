//! Fields mirrored out of the current view so baskets can be found without
//! reconstructing them.

use crate::{constants::SEARCHABLE_KEYS, version::FlatView};

/// Restricts `view` to the searchable allow-list. Missing fields are omitted.
pub fn extract_searchable(view: &FlatView) -> FlatView {
    SEARCHABLE_KEYS
        .iter()
        .filter_map(|&field| {
            view.get(field)
                .map(|value| (field.to_string(), value.clone()))
        })
        .collect()
}
