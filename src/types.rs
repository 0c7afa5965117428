//! Common types used throughout the crate
//!
//! Type aliases shared by several modules.

use serde::{Deserialize, Deserializer};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Leadpages page identifier, always carried as a string
pub type PageId = String;

/// Opaque continuation token issued by the list endpoint
pub type CursorToken = String;

// ============================================================================
// Serde Helpers
// ============================================================================

/// Decode an explicit `null` the same as a missing field
///
/// Pair with `#[serde(default)]` so both absence and `null` yield `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
