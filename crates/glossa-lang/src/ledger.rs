//! Vote tallying for expired amendments.

use glossa_types::BallotDecision;

/// Tally a ballot's yes/no counts into a decision.
///
/// Approval requires strictly more yes than no votes: ties reject, and
/// a ballot nobody voted on rejects. The reconciliation loop only calls
/// this once an amendment's voting window has closed.
pub const fn tally(yes: u32, no: u32) -> BallotDecision {
    if yes > no {
        BallotDecision::Approved
    } else {
        BallotDecision::Rejected
    }
}
