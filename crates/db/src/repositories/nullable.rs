//! Serde helper for PATCH fields that may be explicitly set to `null`.
//!
//! Use with `#[serde(default, deserialize_with = "nullable::deserialize")]`
//! on an `Option<Option<T>>`: a missing key stays `None`, `null` becomes
//! `Some(None)` and a value becomes `Some(Some(v))`.

use serde::{Deserialize, Deserializer};

/// Deserializes a present field, distinguishing `null` from absence.
///
/// # Errors
///
/// Returns the deserializer's error if the value has the wrong type.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::deserialize")]
        score: Option<Option<i32>>,
    }

    #[test]
    fn test_missing_null_and_value() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.score, None);

        let null: Patch = serde_json::from_str(r#"{"score": null}"#).unwrap();
        assert_eq!(null.score, Some(None));

        let value: Patch = serde_json::from_str(r#"{"score": 42}"#).unwrap();
        assert_eq!(value.score, Some(Some(42)));
    }
}
