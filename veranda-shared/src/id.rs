use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-assigned offer identifier.
///
/// Offer definitions arrive from the content store, which keys them by
/// integer or by string depending on the collection. Both collapse to the
/// string form so the id works directly as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(String);

impl OfferId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OfferId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OfferId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for OfferId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_string_ids_interoperate() {
        assert_eq!(OfferId::from(42), OfferId::from("42"));
        assert_eq!(OfferId::from("spa-day").as_str(), "spa-day");
    }

    #[test]
    fn test_serializes_transparently() {
        let id = OfferId::from(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }
}
