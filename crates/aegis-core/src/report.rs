//! Specialist report parsing
//!
//! Specialists answer in free text. The parser is deliberately heuristic
//! and total: it always produces a best-effort triple, never an error.
//! Keeping it isolated here lets the extraction rules be swapped for a
//! structured-output contract without touching the orchestrator.

use serde::{Deserialize, Serialize};

/// A specialist's categorical verdict about a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Claim {
    /// The page is a phishing attempt.
    Phishing,
    /// The page is legitimate.
    Benign,
    /// The report did not commit either way.
    Unknown,
}

/// Structured form of one specialist's report for one round.
///
/// Derived from raw capability output via [`SpecialistReport::parse`];
/// hand-construction is reserved for tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistReport {
    /// Specialist identity (e.g. "URL Analyst").
    pub agent: String,
    /// The extracted claim.
    pub claim: Claim,
    /// Confidence in [0, 1]; defaults to 0.5 when absent or unparseable.
    pub confidence: f64,
    /// The raw free-text report, kept as evidence.
    pub evidence: String,
}

impl SpecialistReport {
    /// Parse a raw free-text report into a structured triple.
    ///
    /// Claim extraction scans case-insensitively: phishing-leaning tokens
    /// ("phishing", "suspicious", "malicious") win over benign-leaning ones
    /// ("benign", "legitimate"); neither yields [`Claim::Unknown`].
    pub fn parse(agent: &str, raw: &str) -> Self {
        Self {
            agent: agent.to_string(),
            claim: extract_claim(raw),
            confidence: extract_confidence(raw),
            evidence: raw.to_string(),
        }
    }

    /// A placeholder report for a specialist whose capability call failed
    /// or timed out. The round proceeds with this instead of aborting.
    pub fn degraded(agent: &str, reason: &str) -> Self {
        Self {
            agent: agent.to_string(),
            claim: Claim::Unknown,
            confidence: 0.5,
            evidence: format!("Evaluation unavailable: {reason}"),
        }
    }
}

/// Extract the claim label from free text.
pub fn extract_claim(raw: &str) -> Claim {
    let text = raw.to_lowercase();
    if text.contains("phishing") || text.contains("suspicious") || text.contains("malicious") {
        Claim::Phishing
    } else if text.contains("benign") || text.contains("legitimate") {
        Claim::Benign
    } else {
        Claim::Unknown
    }
}

/// Extract the confidence value from free text.
///
/// Looks for the first line containing "confidence" and parses the number
/// after the first colon on that line. Defaults to 0.5 and clamps to [0, 1].
pub fn extract_confidence(raw: &str) -> f64 {
    for line in raw.lines() {
        if !line.to_lowercase().contains("confidence") {
            continue;
        }
        if let Some((_, value)) = line.split_once(':') {
            let trimmed = value.trim().trim_end_matches(|c: char| {
                !c.is_ascii_digit() && c != '.' && c != '-'
            });
            if let Ok(conf) = trimmed.trim().parse::<f64>() {
                return conf.clamp(0.0, 1.0);
            }
        }
        break;
    }
    0.5
}

/// Find a line containing `label` and return the text after its first colon.
///
/// Shared line-scan idiom for "Identified Brand:", "Final Verdict:" and
/// similar labeled fields in capability output.
pub fn extract_labeled_line<'a>(raw: &'a str, label: &str) -> Option<&'a str> {
    raw.lines()
        .find(|line| line.contains(label))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim())
}
