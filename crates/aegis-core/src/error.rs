//! Core error types

use thiserror::Error;

/// Violations of the debate-history invariants.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Rounds must be numbered 1..N with no gaps.
    #[error("round {got} appended out of order (expected {expected})")]
    OutOfOrder { expected: u32, got: u32 },
    /// The debate is bounded; appending past the cap is a caller bug.
    #[error("debate history full ({max} rounds)")]
    Full { max: u32 },
}
