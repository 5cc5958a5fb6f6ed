//! Full analysis pipeline: debate → weighted verdict → rationale → intent

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use aegis_core::{
    ConsensusOutcome, DebateHistory, Judgment, ReputationStore, Verdict, VerificationRecord,
    WeightedJudge,
};
use aegis_llm::{Capability, CapabilityRequest};

use crate::error::DebateError;
use crate::orchestrator::{DebateOrchestrator, DebatePhase};
use crate::prompts;
use crate::specialist::{PageData, VisualInput};

/// The closed set of intent labels the intent capability chooses from.
const INTENT_LABELS: &[&str] = &[
    "Credential Theft",
    "Financial Fraud",
    "Malware Distribution",
    "Personal Information Harvesting",
];

/// Final report for one analyzed page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Debate id.
    pub debate_id: Uuid,
    /// The judge's decision, rationale and intent label.
    pub judgment: Judgment,
    /// How the debate terminated.
    pub phase: DebatePhase,
    /// The moderator's final outcome.
    pub consensus: ConsensusOutcome,
    /// Every debate round.
    pub history: DebateHistory,
    /// Verification data the rationale was shown.
    pub verification: VerificationRecord,
}

/// Runs a debate and hands the final round to the reputation-weighted judge.
pub struct Analyzer<C: Capability> {
    orchestrator: DebateOrchestrator<C>,
    capability: Arc<C>,
    reputation: Arc<ReputationStore>,
}

impl<C: Capability + 'static> Analyzer<C> {
    pub fn new(
        orchestrator: DebateOrchestrator<C>,
        capability: Arc<C>,
        reputation: Arc<ReputationStore>,
    ) -> Self {
        Self {
            orchestrator,
            capability,
            reputation,
        }
    }

    /// The injected reputation store.
    pub fn reputation(&self) -> &Arc<ReputationStore> {
        &self.reputation
    }

    /// Analyze one page end to end.
    ///
    /// The numeric weighted verdict is authoritative. The judge capability
    /// contributes rationale text only; its own `Final Verdict:` line is
    /// recorded but never overrides the aggregation. Judge or intent
    /// outages surface as errors; a verdict is never fabricated.
    pub async fn analyze(
        &self,
        page: &PageData,
        visual: &VisualInput,
        verification: Option<VerificationRecord>,
    ) -> Result<AnalysisReport, DebateError> {
        let outcome = self.orchestrator.run(page, visual).await?;

        let (weighted_score, verdict) = match outcome.history.latest() {
            Some(round) => WeightedJudge::decide(round, &self.reputation),
            // run() always records round 1; degenerate guard only.
            None => (0.5, Verdict::Phishing),
        };

        let mut verification = verification.unwrap_or_default();
        if verification.identified_brand.is_empty() {
            verification.identified_brand = outcome.identified_brand.clone();
        }

        let rationale = self
            .capability
            .complete(CapabilityRequest::with_role(
                "You are an expert cybersecurity judge.",
                &prompts::judge_prompt(&outcome.history, &verification),
            ))
            .await
            .map_err(|source| DebateError::EvaluationUnavailable {
                stage: "judge",
                source,
            })?
            .content;
        let rationale_verdict = Verdict::parse_rationale(&rationale);

        let intent = if verdict == Verdict::Phishing {
            Some(self.classify_intent(&outcome.history).await?)
        } else {
            None
        };

        info!(debate = %outcome.id, ?verdict, weighted_score, "analysis complete");

        Ok(AnalysisReport {
            debate_id: outcome.id,
            judgment: Judgment {
                verdict,
                weighted_score,
                rationale,
                rationale_verdict,
                intent,
            },
            phase: outcome.phase,
            consensus: outcome.consensus,
            history: outcome.history,
            verification,
        })
    }

    /// Invoke the intent capability over the final round's reports and
    /// normalize the label against the closed set where possible.
    async fn classify_intent(&self, history: &DebateHistory) -> Result<String, DebateError> {
        let prompt = match history.latest() {
            Some(round) => prompts::intent_prompt(round),
            None => return Ok("Unknown".to_string()),
        };
        let raw = self
            .capability
            .complete(CapabilityRequest::with_role(
                "You are a threat-intent analyst.",
                &prompt,
            ))
            .await
            .map_err(|source| DebateError::EvaluationUnavailable {
                stage: "intent",
                source,
            })?
            .content;

        let normalized = INTENT_LABELS
            .iter()
            .find(|label| raw.to_lowercase().contains(&label.to_lowercase()))
            .map(|label| label.to_string());
        Ok(normalized.unwrap_or_else(|| raw.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderator::RuleModerator;
    use crate::orchestrator::DebateConfig;
    use aegis_llm::MockCapability;

    fn page() -> PageData {
        PageData {
            url: "https://secure-pay.example/checkout".to_string(),
            domain: "secure-pay.example".to_string(),
            html_content: "<input type=password>".to_string(),
            cleaned_text: "confirm your details".to_string(),
        }
    }

    fn analyzer(capability: MockCapability) -> Analyzer<MockCapability> {
        let capability = Arc::new(capability);
        let orchestrator = DebateOrchestrator::new(
            capability.clone(),
            Box::new(RuleModerator),
            DebateConfig::default(),
        );
        Analyzer::new(orchestrator, capability, Arc::new(ReputationStore::new()))
    }

    #[tokio::test]
    async fn test_phishing_analysis_carries_intent() {
        // 4 specialists agree in round 1, then judge rationale, then intent.
        let analyzer = analyzer(MockCapability::scripted(vec![
            "Claim: Phishing\nConfidence: 0.9".to_string(),
            "Claim: Phishing\nConfidence: 0.9".to_string(),
            "Claim: Phishing\nConfidence: 0.9".to_string(),
            "Claim: Phishing\nConfidence: 0.9".to_string(),
            "Reviewed the debate.\nFinal Verdict: PHISHING".to_string(),
            "Credential Theft".to_string(),
        ]));
        let report = analyzer
            .analyze(&page(), &VisualInput::skipped("no screenshot"), None)
            .await
            .unwrap();
        assert_eq!(report.judgment.verdict, Verdict::Phishing);
        assert_eq!(report.judgment.rationale_verdict, Verdict::Phishing);
        assert_eq!(report.judgment.intent.as_deref(), Some("Credential Theft"));
    }

    #[tokio::test]
    async fn test_benign_analysis_skips_intent() {
        let analyzer = analyzer(MockCapability::scripted(vec![
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Looks fine.\nFinal Verdict: BENIGN".to_string(),
        ]));
        let report = analyzer
            .analyze(&page(), &VisualInput::skipped("no screenshot"), None)
            .await
            .unwrap();
        assert_eq!(report.judgment.verdict, Verdict::Benign);
        assert!(report.judgment.intent.is_none());
    }

    #[tokio::test]
    async fn test_supplied_verification_passes_through() {
        let analyzer = analyzer(MockCapability::scripted(vec![
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Final Verdict: BENIGN".to_string(),
        ]));
        let verification = VerificationRecord {
            domain_results: vec!["registered 2009".to_string()],
            brand_results: vec!["example.com".to_string()],
            identified_brand: "Example".to_string(),
        };
        let report = analyzer
            .analyze(
                &page(),
                &VisualInput::skipped("no screenshot"),
                Some(verification),
            )
            .await
            .unwrap();
        assert_eq!(report.verification.identified_brand, "Example");
        assert_eq!(report.verification.brand_results.len(), 1);
    }

    #[tokio::test]
    async fn test_report_serializes_to_json() {
        let analyzer = analyzer(MockCapability::scripted(vec![
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Claim: Benign\nConfidence: 0.9".to_string(),
            "Final Verdict: BENIGN".to_string(),
        ]));
        let report = analyzer
            .analyze(&page(), &VisualInput::skipped("no screenshot"), None)
            .await
            .unwrap();
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("Benign"));
        assert!(json.contains("weighted_score"));
    }
}
