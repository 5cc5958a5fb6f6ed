//! # Aegis Adversarial
//!
//! Adversarial hardening for the debate pipeline:
//!
//! - [`Attacker`] — generates synthetic phishing pages against a brand
//!   through an attacker capability, decoding the JSON attack description
//! - [`Trainer`] — runs attack/defend cycles, feeding each trial's
//!   weighted verdict back into the shared [`ReputationStore`]
//! - [`export_results`] / [`load_results`] — the
//!   `cycle,bypass_rate,detect_rate` training-curve CSV
//!
//! All attack content is synthetic and exists only to exercise the
//! defending debate; nothing here fetches or serves real pages.
//!
//! [`ReputationStore`]: aegis_core::ReputationStore

pub mod attack;
pub mod error;
pub mod export;
pub mod trainer;

pub use attack::{AttackAttempt, Attacker};
pub use error::TrainerError;
pub use export::{export_results, load_results};
pub use trainer::{CycleReport, Trainer, TrainerConfig, TrainingCycleResult};
