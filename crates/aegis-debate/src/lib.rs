//! # Aegis Debate
//!
//! The bounded multi-round debate engine:
//!
//! - [`Specialist`] — the five-analyst roster (URL, HTML, Content, Brand,
//!   Visual); the Visual Analyst reports once and never debates
//! - [`DebateOrchestrator`] — the Initial → Debating → Converged/Exhausted
//!   state machine, fanning specialist capability calls out concurrently
//!   per round
//! - [`Moderator`] — the consensus seam, deterministic rule or external
//!   capability
//! - [`Analyzer`] — the full pipeline: debate → reputation-weighted verdict
//!   → judge rationale → malicious-intent classification
//!
//! Termination is unconditional: the round cap bounds the loop whether or
//! not the specialists ever agree, and both terminal phases hand the final
//! round to the weighted judge.

pub mod analyzer;
pub mod error;
pub mod moderator;
pub mod orchestrator;
pub mod prompts;
pub mod specialist;

pub use analyzer::{AnalysisReport, Analyzer};
pub use error::DebateError;
pub use moderator::{CapabilityModerator, Moderator, RuleModerator};
pub use orchestrator::{DebateConfig, DebateOrchestrator, DebateOutcome, DebatePhase};
pub use specialist::{default_roster, PageData, Specialist, VisualInput};
