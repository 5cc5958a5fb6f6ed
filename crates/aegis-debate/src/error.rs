//! Debate pipeline errors

use aegis_core::HistoryError;
use aegis_llm::CapabilityError;
use thiserror::Error;

/// Errors surfaced by the debate engine.
///
/// Specialist failures never appear here: a failed or timed-out specialist
/// call degrades that report to Unknown and the round proceeds. Moderator,
/// judge and intent outages are different: fabricating a verdict on a
/// capability outage is worse than failing, so those surface to the caller.
#[derive(Debug, Error)]
pub enum DebateError {
    /// A coordination-stage capability (moderator, judge, intent) was
    /// unavailable or produced undecodable output.
    #[error("{stage} evaluation unavailable: {source}")]
    EvaluationUnavailable {
        stage: &'static str,
        #[source]
        source: CapabilityError,
    },

    /// A debate-history invariant was violated (caller bug).
    #[error(transparent)]
    History(#[from] HistoryError),
}
