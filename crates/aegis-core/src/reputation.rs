//! Per-specialist reputation scores and logistic vote weights
//!
//! Scores are unbounded reals with process lifetime, mutated only by the
//! trial-outcome rule in [`ReputationStore::apply_trial`] and the explicit
//! [`ReputationStore::reset`]. The store is an injected object, never a
//! module-level singleton, so concurrent test runs get isolated instances.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::debug;

use crate::history::DebateRound;
use crate::judge::Verdict;
use crate::report::Claim;

/// Smooth logistic mapping from score to weight.
///
/// `logistic(0) == 0.5`, non-decreasing, range (0, 1) for any finite
/// score. The raw f64 curve saturates to exactly 0.0 or 1.0 around
/// |score| ≈ 37, so the result is clamped back into the open interval:
/// a weight of exactly 0 would silently drop an agent from the judge's
/// denominator, and exactly 1 would overstate certainty the model never
/// claims.
pub fn logistic(score: f64) -> f64 {
    (1.0 / (1.0 + (-score).exp())).clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON)
}

/// Process-wide mapping of specialist identity → cumulative score.
///
/// Interior mutex serializes all mutation (single-writer discipline per
/// the concurrency model); overlapping writers without going through the
/// store would be a programming error, not a runtime condition.
#[derive(Debug, Default)]
pub struct ReputationStore {
    scores: Mutex<BTreeMap<String, f64>>,
}

impl ReputationStore {
    /// A fresh store; every agent implicitly starts at score 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score for an agent (0 if never seen).
    pub fn score(&self, agent: &str) -> f64 {
        self.scores
            .lock()
            .expect("reputation lock poisoned")
            .get(agent)
            .copied()
            .unwrap_or(0.0)
    }

    /// Derived vote weight: `logistic(score)`. Never stored independently.
    pub fn weight(&self, agent: &str) -> f64 {
        logistic(self.score(agent))
    }

    /// Ordered snapshot of all known scores.
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.scores
            .lock()
            .expect("reputation lock poisoned")
            .clone()
    }

    /// Ordered snapshot of derived weights.
    pub fn weights(&self) -> BTreeMap<String, f64> {
        self.snapshot()
            .into_iter()
            .map(|(agent, score)| (agent, logistic(score)))
            .collect()
    }

    /// Zero all scores. The only operation that ever lowers history.
    pub fn reset(&self) {
        self.scores
            .lock()
            .expect("reputation lock poisoned")
            .clear();
    }

    /// Apply the trial-outcome update to every agent in the final round.
    ///
    /// | agent claim | trial verdict | delta |
    /// |-------------|---------------|-------|
    /// | Phishing    | Phishing      | +1    |
    /// | Benign      | Phishing      | −1    |
    /// | Benign      | Benign        | −2    |
    /// | Phishing    | Benign        |  0    |
    ///
    /// Votes that enabled a bypass are punished twice as hard as missed
    /// detections, biasing the ensemble toward recall across cycles.
    /// Unknown claims carry no delta.
    pub fn apply_trial(&self, final_round: &DebateRound, verdict: Verdict) {
        let mut scores = self.scores.lock().expect("reputation lock poisoned");
        for report in final_round.reports.values() {
            let delta = match (report.claim, verdict) {
                (Claim::Phishing, Verdict::Phishing) => 1.0,
                (Claim::Benign, Verdict::Phishing) => -1.0,
                (Claim::Benign, Verdict::Benign) => -2.0,
                (Claim::Phishing, Verdict::Benign) => 0.0,
                (Claim::Unknown, _) => 0.0,
            };
            if delta != 0.0 {
                let score = scores.entry(report.agent.clone()).or_insert(0.0);
                *score += delta;
                debug!(agent = %report.agent, delta, score = *score, "reputation updated");
            } else {
                scores.entry(report.agent.clone()).or_insert(0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SpecialistReport;

    fn round(claims: &[(&str, Claim)]) -> DebateRound {
        let reports = claims
            .iter()
            .map(|(agent, claim)| SpecialistReport {
                agent: agent.to_string(),
                claim: *claim,
                confidence: 0.9,
                evidence: String::new(),
            })
            .collect();
        DebateRound::new(1, reports)
    }

    #[test]
    fn test_logistic_at_zero() {
        assert_eq!(logistic(0.0), 0.5);
    }

    #[test]
    fn test_logistic_strictly_increasing() {
        let samples = [-10.0, -1.0, -0.1, 0.0, 0.1, 1.0, 10.0];
        for pair in samples.windows(2) {
            assert!(logistic(pair[0]) < logistic(pair[1]));
        }
    }

    #[test]
    fn test_logistic_open_unit_range() {
        for score in [-500.0, -3.0, 0.0, 3.0, 500.0] {
            let w = logistic(score);
            assert!(w > 0.0 && w < 1.0, "weight {w} out of (0,1) for {score}");
        }
    }

    #[test]
    fn test_fresh_agent_weight_is_half() {
        let store = ReputationStore::new();
        assert_eq!(store.weight("URL Analyst"), 0.5);
    }

    #[test]
    fn test_score_update_table() {
        // Each (claim, verdict) pair exactly matches the update table.
        let cases = [
            (Claim::Phishing, Verdict::Phishing, 1.0),
            (Claim::Benign, Verdict::Phishing, -1.0),
            (Claim::Benign, Verdict::Benign, -2.0),
            (Claim::Phishing, Verdict::Benign, 0.0),
        ];
        for (claim, verdict, expected) in cases {
            let store = ReputationStore::new();
            store.apply_trial(&round(&[("A", claim)]), verdict);
            assert_eq!(store.score("A"), expected, "{claim:?}/{verdict:?}");
        }
    }

    #[test]
    fn test_unknown_claim_neutral() {
        let store = ReputationStore::new();
        store.apply_trial(&round(&[("A", Claim::Unknown)]), Verdict::Phishing);
        assert_eq!(store.score("A"), 0.0);
    }

    #[test]
    fn test_scores_accumulate_without_bound() {
        let store = ReputationStore::new();
        for _ in 0..5 {
            store.apply_trial(&round(&[("A", Claim::Phishing)]), Verdict::Phishing);
        }
        assert_eq!(store.score("A"), 5.0);
    }

    #[test]
    fn test_reset_zeroes_all_agents() {
        let store = ReputationStore::new();
        store.apply_trial(
            &round(&[("A", Claim::Phishing), ("B", Claim::Benign)]),
            Verdict::Phishing,
        );
        store.reset();
        assert_eq!(store.score("A"), 0.0);
        assert_eq!(store.score("B"), 0.0);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_post_trial_weights_match_expected() {
        // after one detected trial, weight(+1) ≈ 0.731 and weight(−1) ≈ 0.269
        let store = ReputationStore::new();
        store.apply_trial(
            &round(&[
                ("URL Analyst", Claim::Phishing),
                ("HTML Analyst", Claim::Benign),
            ]),
            Verdict::Phishing,
        );
        assert!((store.weight("URL Analyst") - 0.731).abs() < 1e-3);
        assert!((store.weight("HTML Analyst") - 0.269).abs() < 1e-3);
    }
}
