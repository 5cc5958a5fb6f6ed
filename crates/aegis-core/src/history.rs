//! Debate rounds and the bounded, append-only debate history

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;
use crate::report::SpecialistReport;

/// Hard cap on debate rounds. Termination of the debate loop depends on
/// this bound, not on consensus ever being reached.
pub const MAX_DEBATE_ROUNDS: u32 = 2;

/// One synchronized batch of specialist reports.
///
/// Immutable once appended to a [`DebateHistory`]. Each specialist appears
/// exactly once; `BTreeMap` keeps iteration order deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateRound {
    /// Round number, starting at 1.
    pub round: u32,
    /// Specialist name → structured report.
    pub reports: BTreeMap<String, SpecialistReport>,
}

impl DebateRound {
    /// Create a round from a set of reports, keyed by agent name.
    pub fn new(round: u32, reports: Vec<SpecialistReport>) -> Self {
        let reports = reports
            .into_iter()
            .map(|r| (r.agent.clone(), r))
            .collect();
        Self { round, reports }
    }

    /// Number of reports in this round.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// True if the round holds no reports.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Look up one specialist's report.
    pub fn report(&self, agent: &str) -> Option<&SpecialistReport> {
        self.reports.get(agent)
    }
}

/// Append-only ordered sequence of rounds, numbered 1..N, N ≤
/// [`MAX_DEBATE_ROUNDS`]. Never truncated or reordered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebateHistory {
    rounds: Vec<DebateRound>,
}

impl DebateHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next round. Rejects wrong numbering or overflow.
    pub fn push(&mut self, round: DebateRound) -> Result<(), HistoryError> {
        let expected = self.rounds.len() as u32 + 1;
        if round.round != expected {
            return Err(HistoryError::OutOfOrder {
                expected,
                got: round.round,
            });
        }
        if expected > MAX_DEBATE_ROUNDS {
            return Err(HistoryError::Full {
                max: MAX_DEBATE_ROUNDS,
            });
        }
        self.rounds.push(round);
        Ok(())
    }

    /// Number of rounds recorded so far.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// True before round 1 has run.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// The most recent round, if any. The judge aggregates over this one.
    pub fn latest(&self) -> Option<&DebateRound> {
        self.rounds.last()
    }

    /// All rounds in order.
    pub fn rounds(&self) -> &[DebateRound] {
        &self.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Claim;

    fn report(agent: &str, claim: Claim) -> SpecialistReport {
        SpecialistReport {
            agent: agent.to_string(),
            claim,
            confidence: 0.8,
            evidence: String::new(),
        }
    }

    #[test]
    fn test_push_in_order() {
        let mut history = DebateHistory::new();
        history
            .push(DebateRound::new(1, vec![report("A", Claim::Phishing)]))
            .unwrap();
        history
            .push(DebateRound::new(2, vec![report("A", Claim::Benign)]))
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().round, 2);
    }

    #[test]
    fn test_push_out_of_order_rejected() {
        let mut history = DebateHistory::new();
        let err = history
            .push(DebateRound::new(3, vec![]))
            .unwrap_err();
        assert!(matches!(err, HistoryError::OutOfOrder { expected: 1, got: 3 }));
    }

    #[test]
    fn test_push_beyond_cap_rejected() {
        let mut history = DebateHistory::new();
        history.push(DebateRound::new(1, vec![])).unwrap();
        history.push(DebateRound::new(2, vec![])).unwrap();
        let err = history.push(DebateRound::new(3, vec![])).unwrap_err();
        assert!(matches!(err, HistoryError::Full { max: MAX_DEBATE_ROUNDS }));
    }

    #[test]
    fn test_round_lookup() {
        let round = DebateRound::new(1, vec![report("URL Analyst", Claim::Phishing)]);
        assert_eq!(round.len(), 1);
        assert!(round.report("URL Analyst").is_some());
        assert!(round.report("Visual Analyst").is_none());
    }
}
