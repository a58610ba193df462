//! Type-safe identifier wrappers for transport and engine entities.
//!
//! The chat transport assigns `u64` snowflake identifiers to channels,
//! users, and messages. Each gets a strongly-typed newtype to prevent
//! accidental mixing at compile time. Amendments are engine-side entities
//! and carry a UUID v7 (time-ordered) assigned at proposal time, used for
//! log correlation and exactly-once tracking across snapshots.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around a transport-assigned `u64` snowflake.
macro_rules! define_snowflake_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Wrap a raw snowflake value from the transport.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner raw value.
            pub const fn into_inner(self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_snowflake_id! {
    /// Identifier of a chat channel. A language is bound to the channel it
    /// was created in for its whole lifetime.
    ChannelId
}

define_snowflake_id! {
    /// Identifier of a chat user (message author, dictionary requester).
    UserId
}

define_snowflake_id! {
    /// Reference to a message the transport has delivered (ballots, rules
    /// summaries). Opaque to the core; only ever handed back to the
    /// transport for edit/fetch/delete.
    MessageRef
}

/// Unique identifier for an amendment, assigned at proposal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AmendmentId(pub Uuid);

impl AmendmentId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AmendmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AmendmentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
