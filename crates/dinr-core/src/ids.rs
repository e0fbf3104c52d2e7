//! Typed entity ids.
//!
//! Every persisted entity is keyed by a positive 64-bit integer assigned by the
//! store. The newtypes keep option, session, group and user ids from being mixed
//! up at call sites, and serialize transparently as plain numbers.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Common surface of the id newtypes, used by error constructors and
/// validation helpers that work across entity kinds.
pub trait EntityId: Copy + fmt::Display {
    /// Human-readable entity name used in error messages (e.g. `"option"`).
    const ENTITY: &'static str;

    /// The raw integer value.
    fn get(self) -> i64;

    /// Ids assigned by a store are always positive.
    fn is_valid(self) -> bool {
        self.get() > 0
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            JsonSchema,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl EntityId for $name {
            const ENTITY: &'static str = $entity;

            fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identity of a dining option.
    OptionId,
    "option"
);
define_id!(
    /// Identity of a voting session.
    SessionId,
    "session"
);
define_id!(
    /// Identity of a dining group.
    GroupId,
    "group"
);
define_id!(
    /// Identity of a user.
    UserId,
    "user"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_numbers() {
        let json = serde_json::to_string(&OptionId(42)).unwrap();
        assert_eq!(json, "42");
        let back: SessionId = serde_json::from_str("7").unwrap();
        assert_eq!(back, SessionId(7));
    }

    #[test]
    fn non_positive_ids_are_invalid() {
        assert!(OptionId(1).is_valid());
        assert!(!OptionId(0).is_valid());
        assert!(!GroupId(-3).is_valid());
    }

    #[test]
    fn entity_names() {
        assert_eq!(OptionId::ENTITY, "option");
        assert_eq!(SessionId::ENTITY, "session");
        assert_eq!(GroupId::ENTITY, "group");
        assert_eq!(UserId::ENTITY, "user");
    }
}
