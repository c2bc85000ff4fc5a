//! Constants used throughout the harvest library.

/// Tag of the root version every basket starts with.
pub const INITIAL_TAG: &str = "initial";

/// Fields copied into a basket's `searchableKeys` on every create and save.
pub const SEARCHABLE_KEYS: [&str; 4] = ["brand", "customer", "orderId", "pin"];
