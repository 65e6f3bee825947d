//! Serde helpers

use serde::{Deserialize, Deserializer};

/// Keeps an explicit `null` distinct from a missing key.
///
/// Used with `#[serde(default)]`: a missing key yields `None`, a present key
/// (including `null`) is handed to `T`.
pub(crate) fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
