//! Stable string identifiers for items and containers.
//!
//! Both ID types are thin newtypes around `String` so that item IDs and
//! container IDs cannot be confused at the type level, while still being
//! cheap to construct from the wire formats ingest hands us.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_owned())
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(ItemId);
string_id!(ContainerId);

/// Reserved symbolic container ID used by rearrangement and retrieval plans
/// to stage an item outside the managed inventory. Never resolves to a real
/// [`crate::container::Container`].
pub const TEMPORARY_STORAGE: &str = "temporary_storage";

impl ContainerId {
    /// Returns true if this ID is the reserved `temporary_storage` slot
    /// rather than a real container.
    pub fn is_temporary_storage(&self) -> bool {
        self.0 == TEMPORARY_STORAGE
    }
}
