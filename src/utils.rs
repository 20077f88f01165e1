use serde::{Deserialize, Deserializer};

pub mod error;
pub mod extract;

/// Deserializes a field that is present in the payload, so that an explicit
/// `null` becomes `Some(None)` while a missing key stays `None` via `#[serde(default)]`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(deserializer).map(Some)
}
