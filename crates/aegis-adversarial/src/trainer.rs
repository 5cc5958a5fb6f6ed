//! The adversarial hardening loop
//!
//! Each cycle pits a generated attack against the full debate pipeline,
//! then feeds the trial verdict back into the reputation store. Trials
//! run sequentially: every verdict must see the weights left by the
//! previous trial.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use aegis_core::{ReputationStore, Verdict, WeightedJudge};
use aegis_debate::{DebateOrchestrator, VisualInput};
use aegis_llm::Capability;

use crate::attack::Attacker;
use crate::error::TrainerError;

/// Training loop knobs.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Brand the generated attacks impersonate.
    pub brand: String,
    /// Number of training cycles.
    pub cycles: u32,
    /// Attack trials per cycle.
    pub attacks_per_cycle: u32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            brand: "PayPal".to_string(),
            cycles: 5,
            attacks_per_cycle: 4,
        }
    }
}

/// One row of the training curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingCycleResult {
    pub cycle: u32,
    /// Percentage of completed trials the defense judged Benign.
    pub bypass_rate: f64,
    /// `100 − bypass_rate`.
    pub detect_rate: f64,
}

/// Full record of one cycle: the curve row plus diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    pub result: TrainingCycleResult,
    /// Reputation weights after the cycle, per agent.
    pub weights: BTreeMap<String, f64>,
    /// Trials that ran to a verdict.
    pub completed: u32,
    /// Trials skipped for malformed attacker output.
    pub skipped: u32,
}

/// Runs attack/defend cycles and tracks the training curve.
pub struct Trainer<A: Capability, D: Capability> {
    attacker: Attacker<A>,
    defense: DebateOrchestrator<D>,
    reputation: Arc<ReputationStore>,
    config: TrainerConfig,
}

impl<A: Capability + 'static, D: Capability + 'static> Trainer<A, D> {
    pub fn new(
        attacker: Attacker<A>,
        defense: DebateOrchestrator<D>,
        reputation: Arc<ReputationStore>,
        config: TrainerConfig,
    ) -> Self {
        Self {
            attacker,
            defense,
            reputation,
            config,
        }
    }

    /// Run every cycle to completion.
    ///
    /// A malformed attack or an unreachable/timed-out attacker skips its
    /// trial and leaves the rate denominator; defense failures abort the
    /// run.
    pub async fn run(&self) -> Result<Vec<CycleReport>, TrainerError> {
        let mut reports = Vec::with_capacity(self.config.cycles as usize);
        for cycle in 1..=self.config.cycles {
            reports.push(self.run_cycle(cycle).await?);
        }
        Ok(reports)
    }

    async fn run_cycle(&self, cycle: u32) -> Result<CycleReport, TrainerError> {
        let mut completed = 0u32;
        let mut skipped = 0u32;
        let mut bypasses = 0u32;

        for trial in 1..=self.config.attacks_per_cycle {
            // Malformed output and attacker timeouts/outages fail only
            // their own trial; the defense failing aborts the run.
            let attempt = match self.attacker.generate(&self.config.brand).await {
                Ok(attempt) => attempt,
                Err(TrainerError::MalformedAttack { reason }) => {
                    warn!(cycle, trial, %reason, "skipping malformed attack");
                    skipped += 1;
                    metrics::counter!("aegis_training_skipped_total").increment(1);
                    continue;
                }
                Err(TrainerError::AttackerUnavailable(e)) => {
                    warn!(cycle, trial, error = %e, "skipping trial, attacker unavailable");
                    skipped += 1;
                    metrics::counter!("aegis_training_skipped_total").increment(1);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let page = attempt.to_page_data();
            let outcome = self
                .defense
                .run(&page, &VisualInput::skipped("training trial"))
                .await?;
            // run() always records round 1.
            let Some(round) = outcome.history.latest() else {
                continue;
            };

            let (score, verdict) = WeightedJudge::decide(round, &self.reputation);
            self.reputation.apply_trial(round, verdict);

            completed += 1;
            metrics::counter!("aegis_training_trials_total").increment(1);
            if verdict == Verdict::Benign {
                bypasses += 1;
                metrics::counter!("aegis_training_bypasses_total").increment(1);
            }
            info!(
                cycle,
                trial,
                strategy = %attempt.evasion_strategy,
                score,
                ?verdict,
                "trial complete"
            );
        }

        let bypass_rate = if completed > 0 {
            f64::from(bypasses) / f64::from(completed) * 100.0
        } else {
            0.0
        };
        let detect_rate = 100.0 - bypass_rate;
        metrics::gauge!("aegis_training_bypass_rate").set(bypass_rate);
        info!(cycle, bypass_rate, detect_rate, completed, skipped, "cycle complete");

        Ok(CycleReport {
            result: TrainingCycleResult {
                cycle,
                bypass_rate,
                detect_rate,
            },
            weights: self.reputation.weights(),
            completed,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_debate::{DebateConfig, RuleModerator};
    use aegis_llm::MockCapability;

    const ATTACK_JSON: &str = r#"{"fake_url": "https://acct-paypa1.example/billing",
        "page_text": "Your statement is ready",
        "html_snippet": "<div>Statement</div>",
        "evasion_strategy": "billing pretext"}"#;

    fn trainer(
        attacker: MockCapability,
        defender: MockCapability,
        config: TrainerConfig,
    ) -> (Trainer<MockCapability, MockCapability>, Arc<ReputationStore>) {
        let reputation = Arc::new(ReputationStore::new());
        let defense = DebateOrchestrator::new(
            Arc::new(defender),
            Box::new(RuleModerator),
            DebateConfig::default(),
        );
        let t = Trainer::new(
            Attacker::new(Arc::new(attacker)),
            defense,
            reputation.clone(),
            config,
        );
        (t, reputation)
    }

    fn config(cycles: u32, attacks: u32) -> TrainerConfig {
        TrainerConfig {
            brand: "PayPal".to_string(),
            cycles,
            attacks_per_cycle: attacks,
        }
    }

    #[tokio::test]
    async fn test_detected_attacks_yield_zero_bypass_rate() {
        let (trainer, reputation) = trainer(
            MockCapability::constant(ATTACK_JSON),
            MockCapability::constant("Claim: Phishing\nConfidence: 0.9"),
            config(2, 3),
        );
        let reports = trainer.run().await.unwrap();
        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert_eq!(report.result.bypass_rate, 0.0);
            assert_eq!(report.result.detect_rate, 100.0);
            assert_eq!(report.completed, 3);
            assert_eq!(report.skipped, 0);
        }
        // Correct phishing calls raise every debating analyst's weight.
        assert!(reputation.weight("URL Analyst") > 0.5);
    }

    #[tokio::test]
    async fn test_bypassing_attacks_drive_the_rate_to_100() {
        let (trainer, reputation) = trainer(
            MockCapability::constant(ATTACK_JSON),
            MockCapability::constant("Claim: Benign\nConfidence: 0.9"),
            config(1, 2),
        );
        let reports = trainer.run().await.unwrap();
        assert_eq!(reports[0].result.bypass_rate, 100.0);
        assert_eq!(reports[0].result.detect_rate, 0.0);
        // Benign votes that enabled a bypass take the double penalty.
        assert!(reputation.weight("URL Analyst") < 0.5);
    }

    #[tokio::test]
    async fn test_malformed_attacks_are_skipped_not_counted() {
        // Attacker alternates garbage and valid JSON; with four trials the
        // two garbage outputs skip and the denominator is the two valid ones.
        let (trainer, _) = trainer(
            MockCapability::scripted(vec![
                "I cannot help with that.".to_string(),
                ATTACK_JSON.to_string(),
                "no json here".to_string(),
                ATTACK_JSON.to_string(),
            ]),
            MockCapability::constant("Claim: Benign\nConfidence: 0.9"),
            config(1, 4),
        );
        let reports = trainer.run().await.unwrap();
        assert_eq!(reports[0].skipped, 2);
        assert_eq!(reports[0].completed, 2);
        assert_eq!(reports[0].result.bypass_rate, 100.0);
    }

    #[tokio::test]
    async fn test_attacker_timeout_skips_trial() {
        // A slow attacker behind a short deadline times out every
        // generation; the trials skip instead of aborting the run.
        use aegis_llm::TimedCapability;
        use std::time::Duration;

        let attacker = TimedCapability::new(
            MockCapability::constant(ATTACK_JSON).with_latency(200),
            Duration::from_millis(10),
        );
        let reputation = Arc::new(ReputationStore::new());
        let defense = DebateOrchestrator::new(
            Arc::new(MockCapability::constant("Claim: Phishing\nConfidence: 0.9")),
            Box::new(RuleModerator),
            DebateConfig::default(),
        );
        let trainer = Trainer::new(
            Attacker::new(Arc::new(attacker)),
            defense,
            reputation,
            config(1, 2),
        );

        let reports = trainer.run().await.unwrap();
        assert_eq!(reports[0].skipped, 2);
        assert_eq!(reports[0].completed, 0);
        assert_eq!(reports[0].result.bypass_rate, 0.0);
    }

    #[tokio::test]
    async fn test_all_trials_skipped_reports_zero_rates() {
        let (trainer, _) = trainer(
            MockCapability::constant("not json"),
            MockCapability::constant("Claim: Benign\nConfidence: 0.9"),
            config(1, 3),
        );
        let reports = trainer.run().await.unwrap();
        assert_eq!(reports[0].completed, 0);
        assert_eq!(reports[0].skipped, 3);
        assert_eq!(reports[0].result.bypass_rate, 0.0);
    }

    #[tokio::test]
    async fn test_weights_shift_across_cycles() {
        // Detected attacks accumulate reputation, so later snapshots show
        // strictly larger weights for consistent analysts.
        let (trainer, _) = trainer(
            MockCapability::constant(ATTACK_JSON),
            MockCapability::constant("Claim: Phishing\nConfidence: 0.9"),
            config(2, 2),
        );
        let reports = trainer.run().await.unwrap();
        let first = reports[0].weights["URL Analyst"];
        let second = reports[1].weights["URL Analyst"];
        assert!(second > first);
    }
}
