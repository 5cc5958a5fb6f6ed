//! The bounded debate state machine
//!
//! Initial → Debating(1) → … → Converged | Exhausted. Round 1 runs the
//! full roster; later rounds replay the whole history to the debating
//! specialists while the Visual Analyst's report is copied forward
//! verbatim. The round cap guarantees termination whether or not the
//! moderator ever sees agreement.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use aegis_core::{
    extract_labeled_line, Claim, ConsensusOutcome, DebateHistory, DebateRound, SpecialistReport,
    MAX_DEBATE_ROUNDS,
};
use aegis_llm::{Capability, CapabilityRequest};

use crate::error::DebateError;
use crate::moderator::Moderator;
use crate::prompts;
use crate::specialist::{default_roster, PageData, Specialist, VisualInput};

/// Orchestrator knobs.
#[derive(Debug, Clone)]
pub struct DebateConfig {
    /// Upper bound on rounds; clamped to [`MAX_DEBATE_ROUNDS`].
    pub max_rounds: u32,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_DEBATE_ROUNDS,
        }
    }
}

/// Phase of a debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebatePhase {
    /// No round has run yet.
    Initial,
    /// Round `r` is in flight.
    Debating(u32),
    /// The moderator saw agreement before the cap.
    Converged,
    /// The round cap was hit, consensus or not.
    Exhausted,
}

/// Terminal result of one debate. Always holds at least round 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateOutcome {
    /// Unique id for this debate.
    pub id: Uuid,
    /// Every round, in order.
    pub history: DebateHistory,
    /// Terminal phase (`Converged` or `Exhausted`).
    pub phase: DebatePhase,
    /// The moderator's outcome for the final round.
    pub consensus: ConsensusOutcome,
    /// Brand the Brand Analyst identified in round 1 ("Unknown" if none).
    pub identified_brand: String,
}

/// Runs the bounded multi-round debate loop.
pub struct DebateOrchestrator<C: Capability> {
    capability: Arc<C>,
    moderator: Box<dyn Moderator>,
    config: DebateConfig,
}

impl<C: Capability + 'static> DebateOrchestrator<C> {
    pub fn new(capability: Arc<C>, moderator: Box<dyn Moderator>, config: DebateConfig) -> Self {
        Self {
            capability,
            moderator,
            config,
        }
    }

    /// Run the debate to a terminal phase.
    ///
    /// Per-round specialist calls are mutually independent and issued
    /// concurrently; a failed or timed-out call degrades that specialist's
    /// report to Unknown and the round proceeds.
    pub async fn run(
        &self,
        page: &PageData,
        visual: &VisualInput,
    ) -> Result<DebateOutcome, DebateError> {
        let max_rounds = self.config.max_rounds.clamp(1, MAX_DEBATE_ROUNDS);
        let roster = default_roster();
        let debaters: Vec<&Specialist> = roster.iter().filter(|s| s.debates).collect();

        let id = Uuid::new_v4();
        let mut history = DebateHistory::new();

        // Round 1: full roster. The visual report is computed exactly once.
        info!(debate = %id, round = 1, "initial analysis");
        let prompts: Vec<String> = debaters
            .iter()
            .map(|s| prompts::initial_prompt(s, page))
            .collect();
        let mut reports = self.fan_out(&debaters, prompts).await;
        let visual_report = self.visual_report(visual).await;
        reports.push(visual_report.clone());

        let mut round_number = 1;
        let mut round = DebateRound::new(round_number, reports);
        let identified_brand = identify_brand(&round);

        loop {
            let consensus = self.moderator.evaluate(&round).await?;
            history.push(round)?;

            if round_number >= max_rounds {
                // The cap wins regardless of consensus.
                info!(debate = %id, round = round_number, "max rounds reached, proceeding to judge");
                return Ok(DebateOutcome {
                    id,
                    history,
                    phase: DebatePhase::Exhausted,
                    consensus,
                    identified_brand,
                });
            }
            if consensus == ConsensusOutcome::Consensus {
                info!(debate = %id, round = round_number, "consensus reached, proceeding to judge");
                return Ok(DebateOutcome {
                    id,
                    history,
                    phase: DebatePhase::Converged,
                    consensus,
                    identified_brand,
                });
            }

            round_number += 1;
            info!(debate = %id, round = round_number, "conflict detected, starting debate round");
            let prompts: Vec<String> = debaters
                .iter()
                .map(|s| prompts::debate_prompt(s, round_number, &history, page))
                .collect();
            let mut reports = self.fan_out(&debaters, prompts).await;
            reports.push(visual_report.clone());
            round = DebateRound::new(round_number, reports);
        }
    }

    /// Issue one round's specialist calls concurrently.
    async fn fan_out(
        &self,
        debaters: &[&Specialist],
        prompts: Vec<String>,
    ) -> Vec<SpecialistReport> {
        let calls = debaters
            .iter()
            .zip(prompts)
            .map(|(specialist, prompt)| self.call_specialist(specialist, prompt));
        join_all(calls).await
    }

    async fn call_specialist(&self, specialist: &Specialist, prompt: String) -> SpecialistReport {
        match self
            .capability
            .complete(CapabilityRequest::with_role(specialist.persona, &prompt))
            .await
        {
            Ok(response) => SpecialistReport::parse(specialist.name, &response.content),
            Err(e) => {
                warn!(specialist = specialist.name, error = %e, "specialist degraded to Unknown");
                SpecialistReport::degraded(specialist.name, &e.to_string())
            }
        }
    }

    async fn visual_report(&self, visual: &VisualInput) -> SpecialistReport {
        match visual {
            VisualInput::Skipped { reason } => SpecialistReport {
                agent: "Visual Analyst".to_string(),
                claim: Claim::Unknown,
                confidence: 0.5,
                evidence: format!("Skipped: {reason}"),
            },
            VisualInput::Screenshots {
                suspicious,
                legitimate,
            } => {
                let visual_specialist = default_roster()
                    .iter()
                    .find(|s| !s.debates)
                    .copied()
                    .unwrap_or(default_roster()[0]);
                self.call_specialist(
                    &visual_specialist,
                    prompts::visual_prompt(suspicious, legitimate),
                )
                .await
            }
        }
    }
}

/// Scan the round-1 Brand Analyst report for an `Identified Brand:` line.
fn identify_brand(round: &DebateRound) -> String {
    match round
        .report("Brand Analyst")
        .and_then(|r| extract_labeled_line(&r.evidence, "Identified Brand"))
    {
        Some(brand) if !brand.is_empty() && !brand.eq_ignore_ascii_case("n/a") => {
            brand.to_string()
        }
        _ => "Unknown".to_string(),
    }
}
