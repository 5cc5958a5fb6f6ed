//! Reputation-weighted verdict aggregation

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::history::DebateRound;
use crate::report::{extract_labeled_line, Claim};
use crate::reputation::ReputationStore;

/// Final binary verdict for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Phishing,
    Benign,
}

impl Verdict {
    /// Parse a judge capability's free text for a `Final Verdict:` line.
    ///
    /// Absence defaults to [`Verdict::Benign`]. This default is distinct
    /// from the numeric aggregation's degenerate default (Phishing): one
    /// guards unparseable rationale text, the other an empty round. They
    /// must not be unified.
    pub fn parse_rationale(raw: &str) -> Verdict {
        match extract_labeled_line(raw, "Final Verdict") {
            Some(value) if value.to_uppercase().contains("PHISHING") => Verdict::Phishing,
            _ => Verdict::Benign,
        }
    }
}

/// External lookup results passed through to the judge's rationale.
///
/// Opaque to the numeric aggregation; only the rationale prompt reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Search results for the page's domain.
    pub domain_results: Vec<String>,
    /// Known-legitimate domains for the identified brand.
    pub brand_results: Vec<String>,
    /// Brand the Brand Analyst identified ("Unknown" when absent).
    pub identified_brand: String,
}

/// The judge's full decision for one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgment {
    /// Authoritative verdict from the weighted aggregation.
    pub verdict: Verdict,
    /// The weighted phishing score that produced it.
    pub weighted_score: f64,
    /// Free-text rationale from the judge capability.
    pub rationale: String,
    /// Verdict extracted from the rationale text (informational only).
    pub rationale_verdict: Verdict,
    /// Malicious-intent label, present only for phishing verdicts.
    pub intent: Option<String>,
}

/// Aggregates the final round's reports into a verdict using reputation
/// weights.
#[derive(Debug, Default)]
pub struct WeightedJudge;

impl WeightedJudge {
    /// Weighted phishing score over one round:
    ///
    /// ```text
    /// Σ weight(agent) · 1[claim = Phishing] · confidence(agent)
    /// ─────────────────────────────────────────────────────────
    ///                  Σ weight(agent)
    /// ```
    ///
    /// Every report contributes its weight to the denominator, including
    /// Unknown claims, so a degraded round drifts toward Benign.
    /// An empty round yields the degenerate score 0.5, which the ≥ 0.5
    /// rule resolves to Phishing (caution on degenerate input).
    pub fn weighted_score(round: &DebateRound, reputation: &ReputationStore) -> f64 {
        let mut weighted = 0.0;
        let mut total = 0.0;
        for report in round.reports.values() {
            let weight = reputation.weight(&report.agent);
            if report.claim == Claim::Phishing {
                weighted += weight * report.confidence;
            }
            total += weight;
        }
        if total > 0.0 {
            weighted / total
        } else {
            0.5
        }
    }

    /// Score the round and apply the ≥ 0.5 decision rule.
    pub fn decide(round: &DebateRound, reputation: &ReputationStore) -> (f64, Verdict) {
        let score = Self::weighted_score(round, reputation);
        let verdict = if score >= 0.5 {
            Verdict::Phishing
        } else {
            Verdict::Benign
        };
        info!(weighted_score = score, ?verdict, "weighted verdict");
        (score, verdict)
    }
}
