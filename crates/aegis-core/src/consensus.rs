//! Deterministic consensus check over one debate round

use serde::{Deserialize, Serialize};

use crate::history::DebateRound;
use crate::report::Claim;

/// Result of a moderator pass over a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsensusOutcome {
    /// All committed specialists fall on the same side.
    Consensus,
    /// Sides disagree, or nobody committed to a side.
    Conflict,
}

/// Decide whether one round's reports agree.
///
/// Phishing claims form one side, Benign the other; Unknown reports are
/// excluded from the vote. At most one represented side means consensus.
/// An all-Unknown round is Conflict: the group cannot affirmatively agree
/// on nothing, so the debate continues. That conservative default is a
/// tunable policy choice, not an invariant.
pub fn consensus_rule(round: &DebateRound) -> ConsensusOutcome {
    let mut phishing = false;
    let mut benign = false;
    for report in round.reports.values() {
        match report.claim {
            Claim::Phishing => phishing = true,
            Claim::Benign => benign = true,
            Claim::Unknown => {}
        }
    }
    match (phishing, benign) {
        (true, false) | (false, true) => ConsensusOutcome::Consensus,
        _ => ConsensusOutcome::Conflict,
    }
}
