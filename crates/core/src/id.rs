//! Strongly-typed identifiers used across the fleet.
//!
//! Fleet records are keyed by short, human-assigned strings (`"2"`,
//! `"route-a"`), so identifiers wrap a non-empty `String` rather than a UUID.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

/// Identifier of a delivery route candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

/// Identifier of a driver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DriverId(String);

/// Identifier of a scheduled delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeliveryId(String);

/// Identifier of a dispatch chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageId(String);

macro_rules! impl_string_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create an identifier, rejecting empty or whitespace-only input.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: must not be empty", $name)));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_string_id!(ItemId, "ItemId");
impl_string_id!(RouteId, "RouteId");
impl_string_id!(DriverId, "DriverId");
impl_string_id!(DeliveryId, "DeliveryId");
impl_string_id!(MessageId, "MessageId");

impl MessageId {
    /// Generate a fresh message identifier.
    ///
    /// Uses UUIDv7 (time-ordered) so ids sort in send order.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_blank_identifiers() {
        assert!(matches!(ItemId::new(""), Err(DomainError::InvalidId(_))));
        assert!(matches!(RouteId::new("   "), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = RouteId::new("route-a").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"route-a\"");

        let back: RouteId = serde_json::from_str("\"route-a\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn deserialize_rejects_empty_string() {
        let res: Result<ItemId, _> = serde_json::from_str("\"\"");
        assert!(res.is_err());
    }

    #[test]
    fn generated_message_ids_are_distinct() {
        let a = MessageId::generate();
        let b = MessageId::generate();
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn display_round_trips_non_blank_input(s in "[a-z0-9-]{1,16}") {
            let id = ItemId::new(s.clone()).unwrap();
            prop_assert_eq!(id.to_string(), s.clone());
            prop_assert_eq!(id.as_str().parse::<ItemId>().unwrap(), id);
        }
    }
}
