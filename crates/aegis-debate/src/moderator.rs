//! The consensus seam
//!
//! The moderator decides, from one round's structured reports, whether the
//! group agrees. The deterministic rule is the default; an external
//! capability can replace it, in which case an outage surfaces as an error
//! instead of a fabricated outcome.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use aegis_core::{consensus_rule, ConsensusOutcome, DebateRound};
use aegis_llm::{Capability, CapabilityError, CapabilityRequest};

use crate::error::DebateError;
use crate::prompts;

/// Decides whether one round's reports agree.
#[async_trait]
pub trait Moderator: Send + Sync {
    async fn evaluate(&self, round: &DebateRound) -> Result<ConsensusOutcome, DebateError>;
}

/// The deterministic side-partition rule. Infallible.
#[derive(Debug, Default)]
pub struct RuleModerator;

#[async_trait]
impl Moderator for RuleModerator {
    async fn evaluate(&self, round: &DebateRound) -> Result<ConsensusOutcome, DebateError> {
        let outcome = consensus_rule(round);
        info!(round = round.round, ?outcome, "moderator decision");
        Ok(outcome)
    }
}

/// A moderator backed by an external capability that must answer with the
/// token `CONSENSUS` or `CONFLICT`.
#[derive(Debug)]
pub struct CapabilityModerator<C: Capability> {
    capability: Arc<C>,
}

impl<C: Capability> CapabilityModerator<C> {
    pub fn new(capability: Arc<C>) -> Self {
        Self { capability }
    }
}

#[async_trait]
impl<C: Capability + 'static> Moderator for CapabilityModerator<C> {
    async fn evaluate(&self, round: &DebateRound) -> Result<ConsensusOutcome, DebateError> {
        let prompt = prompts::moderator_prompt(round);
        let response = self
            .capability
            .complete(CapabilityRequest::with_role(
                "You are a debate moderator.",
                &prompt,
            ))
            .await
            .map_err(|source| DebateError::EvaluationUnavailable {
                stage: "moderator",
                source,
            })?;

        let text = response.content.to_uppercase();
        let outcome = if text.contains("CONSENSUS") {
            ConsensusOutcome::Consensus
        } else if text.contains("CONFLICT") {
            ConsensusOutcome::Conflict
        } else {
            return Err(DebateError::EvaluationUnavailable {
                stage: "moderator",
                source: CapabilityError::InvalidResponse(format!(
                    "expected CONSENSUS or CONFLICT, got: {}",
                    response.content
                )),
            });
        };
        info!(round = round.round, ?outcome, "moderator decision");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_core::SpecialistReport;
    use aegis_llm::MockCapability;

    fn round(texts: &[(&str, &str)]) -> DebateRound {
        DebateRound::new(
            1,
            texts
                .iter()
                .map(|(agent, raw)| SpecialistReport::parse(agent, raw))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_rule_moderator_agrees_with_core_rule() {
        let moderator = RuleModerator;
        let agreeing = round(&[("A", "Claim: Phishing"), ("B", "Claim: suspicious")]);
        assert_eq!(
            moderator.evaluate(&agreeing).await.unwrap(),
            ConsensusOutcome::Consensus
        );
        let split = round(&[("A", "Claim: Phishing"), ("B", "Claim: Benign")]);
        assert_eq!(
            moderator.evaluate(&split).await.unwrap(),
            ConsensusOutcome::Conflict
        );
    }

    #[tokio::test]
    async fn test_capability_moderator_parses_tokens() {
        let moderator = CapabilityModerator::new(Arc::new(MockCapability::constant("CONSENSUS")));
        assert_eq!(
            moderator.evaluate(&round(&[])).await.unwrap(),
            ConsensusOutcome::Consensus
        );

        let moderator = CapabilityModerator::new(Arc::new(MockCapability::constant(
            "There is still CONFLICT between the analysts.",
        )));
        assert_eq!(
            moderator.evaluate(&round(&[])).await.unwrap(),
            ConsensusOutcome::Conflict
        );
    }

    #[tokio::test]
    async fn test_capability_moderator_surfaces_outage() {
        let moderator = CapabilityModerator::new(Arc::new(MockCapability::failing()));
        let err = moderator.evaluate(&round(&[])).await.unwrap_err();
        assert!(matches!(
            err,
            DebateError::EvaluationUnavailable { stage: "moderator", .. }
        ));
    }

    #[tokio::test]
    async fn test_capability_moderator_rejects_garbage() {
        let moderator =
            CapabilityModerator::new(Arc::new(MockCapability::constant("I am not sure.")));
        assert!(moderator.evaluate(&round(&[])).await.is_err());
    }
}
