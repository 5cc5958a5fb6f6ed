//! # Aegis Core
//!
//! Core types for the Aegis phishing-debate engine:
//! - [`SpecialistReport`] — structured claim/confidence/evidence triple
//!   parsed from a specialist's free-text report
//! - [`DebateRound`] / [`DebateHistory`] — append-only, bounded debate record
//! - [`consensus_rule`] — deterministic agreement check over one round
//! - [`ReputationStore`] — per-agent cumulative scores with logistic weights
//! - [`WeightedJudge`] — reputation-weighted binary verdict over the final round
//!
//! Everything here is pure state transformation; capability calls (the
//! specialists' actual reasoning) live behind the `aegis-llm` crate.

pub mod consensus;
pub mod error;
pub mod history;
pub mod judge;
pub mod report;
pub mod reputation;

pub use consensus::{consensus_rule, ConsensusOutcome};
pub use error::HistoryError;
pub use history::{DebateHistory, DebateRound, MAX_DEBATE_ROUNDS};
pub use judge::{Judgment, Verdict, VerificationRecord, WeightedJudge};
pub use report::{extract_labeled_line, Claim, SpecialistReport};
pub use reputation::{logistic, ReputationStore};
