//! The [`Amendment`]: a time-boxed pending change awaiting a vote.

use serde::{Deserialize, Serialize};

use crate::change::ChangeRequest;
use crate::ids::{AmendmentId, MessageRef};

/// A pending change to a language, open for voting.
///
/// Pending is implicit: an amendment exists only while it sits in its
/// language's open list. Resolution removes it from that list in the same
/// step that applies or discards it, so no terminal state is ever stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amendment {
    /// Engine-assigned identifier, stable across snapshots.
    pub id: AmendmentId,
    /// The change this amendment proposes.
    pub request: ChangeRequest,
    /// Voting time left, in milliseconds. Decremented by elapsed
    /// wall-clock time each reconciliation pass; allowed to go negative —
    /// a non-positive value is the expiry signal.
    pub remaining_ms: i64,
    /// The ballot message voters react to.
    pub ballot: MessageRef,
}

impl Amendment {
    /// Create a pending amendment with a full voting window.
    pub fn new(request: ChangeRequest, ballot: MessageRef, window_ms: i64) -> Self {
        Self {
            id: AmendmentId::new(),
            request,
            remaining_ms: window_ms,
            ballot,
        }
    }

    /// Age the amendment by the given elapsed wall-clock milliseconds.
    pub const fn tick(&mut self, elapsed_ms: i64) {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
    }

    /// Whether the voting window has closed.
    pub const fn expired(&self) -> bool {
        self.remaining_ms <= 0
    }

    /// Remaining time in whole seconds, for display. Rounds toward zero.
    pub const fn remaining_secs(&self) -> i64 {
        self.remaining_ms / 1000
    }
}
