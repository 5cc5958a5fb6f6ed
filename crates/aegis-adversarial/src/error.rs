//! Adversarial training errors

use aegis_debate::DebateError;
use thiserror::Error;

/// Errors surfaced by the attack generator and the training loop.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// The attacker capability's output held no decodable attack JSON.
    /// The trial is skipped; the training loop continues.
    #[error("malformed attack output: {reason}")]
    MalformedAttack { reason: String },

    /// The attacker capability was unreachable or exceeded its deadline.
    /// The trial is skipped under the same policy as malformed output.
    #[error("attacker capability unavailable: {0}")]
    AttackerUnavailable(#[from] aegis_llm::CapabilityError),

    /// The defending debate pipeline failed.
    #[error(transparent)]
    Debate(#[from] DebateError),

    /// Reading or writing a training-curve file failed.
    #[error("training curve io: {0}")]
    Io(#[from] std::io::Error),

    /// A training-curve file did not parse as CSV.
    #[error("training curve format: {0}")]
    Csv(#[from] csv::Error),
}
