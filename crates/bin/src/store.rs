//! Reading and writing the stored basket file.
//!
//! The library performs no I/O; this binary keeps one basket per JSON file.

use std::path::Path;

use harvest::{SharedBasket, StoredBasket};
use serde_json::Value;

/// Load a stored basket from `path`.
pub fn load_basket(path: &Path) -> Result<StoredBasket, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read basket {}: {e}", path.display()))?;
    let basket = StoredBasket::from_json(&json)?;
    tracing::debug!(path = %path.display(), versions = basket.versions.len(), "Loaded basket");
    Ok(basket)
}

/// Write a stored basket to `path`, replacing any previous contents.
pub fn write_basket(path: &Path, basket: &StoredBasket) -> Result<(), Box<dyn std::error::Error>> {
    let json = basket.to_json()?;
    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write basket {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), head = %basket.head, "Wrote basket");
    Ok(())
}

/// Parse a command-line data argument into a shared basket.
///
/// Shape checks are left to the library so that a non-object payload is
/// reported the same way it would be for any other caller.
pub fn parse_request(data: &str) -> Result<SharedBasket, Box<dyn std::error::Error>> {
    let value: Value =
        serde_json::from_str(data).map_err(|e| format!("Data is not valid JSON: {e}"))?;
    Ok(SharedBasket::new(value))
}
