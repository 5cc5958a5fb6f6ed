//! Train command - adversarial hardening cycles
//!
//! Usage:
//! ```bash
//! aegis train --brand PayPal --cycles 5 --attacks 4 --out curve.csv
//! aegis train --brand PayPal --provider mock
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use aegis_adversarial::{export_results, Attacker, CycleReport, Trainer, TrainerConfig};
use aegis_core::ReputationStore;
use aegis_debate::{DebateConfig, DebateOrchestrator, RuleModerator};
use aegis_llm::{Capability, LlmConfig, MockCapability, OllamaCapability, TimedCapability};

/// Attack the mock provider replays; lets the loop run offline.
const MOCK_ATTACK: &str = r#"{"fake_url": "https://billing.paypa1-secure.example/session",
    "page_text": "A payment method on your account was updated.",
    "html_snippet": "<section><h1>Payment update</h1></section>",
    "evasion_strategy": "neutral billing notice"}"#;

/// Report the mock defender replays for every specialist call.
const MOCK_DEFENSE: &str = "Claim: Phishing\nConfidence: 0.8\nEvidence: offline mock";

/// Arguments for the train command
#[derive(Args)]
pub struct TrainArgs {
    /// Brand the generated attacks impersonate
    #[arg(long, default_value = "PayPal")]
    brand: String,

    /// Number of training cycles
    #[arg(long, default_value_t = 5)]
    cycles: u32,

    /// Attack trials per cycle
    #[arg(long, default_value_t = 4)]
    attacks: u32,

    /// Write the training curve CSV here
    #[arg(long, short = 'o', value_name = "FILE")]
    out: Option<PathBuf>,

    /// Capability backend ("ollama" or "mock"; default from AEGIS_PROVIDER)
    #[arg(long)]
    provider: Option<String>,
}

/// Run the train command
pub async fn run(args: TrainArgs) -> Result<()> {
    let config = LlmConfig::from_env();
    let provider = args.provider.clone().unwrap_or_else(|| config.provider.clone());

    let trainer_config = TrainerConfig {
        brand: args.brand.clone(),
        cycles: args.cycles,
        attacks_per_cycle: args.attacks,
    };

    println!("{}", "Aegis Adversarial Training".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!(
        "  {} {} | {} cycles × {} attacks | provider {}",
        "Target:".dimmed(),
        args.brand,
        args.cycles,
        args.attacks,
        provider
    );
    println!();

    let reports = match provider.as_str() {
        "mock" => {
            train_with(
                MockCapability::constant(MOCK_ATTACK),
                MockCapability::constant(MOCK_DEFENSE),
                &config,
                trainer_config,
            )
            .await?
        }
        "ollama" => {
            train_with(
                OllamaCapability::with_url(&config.ollama_url, &config.model),
                OllamaCapability::with_url(&config.ollama_url, &config.model),
                &config,
                trainer_config,
            )
            .await?
        }
        other => anyhow::bail!("unknown provider '{other}' (expected 'ollama' or 'mock')"),
    };

    for report in &reports {
        let row = &report.result;
        let bypass = format!("{:.2}%", row.bypass_rate);
        let bypass = if row.bypass_rate > 50.0 {
            bypass.red()
        } else {
            bypass.green()
        };
        println!(
            "  {} {:>2} | bypass {} | detect {:.2}% | {} trials, {} skipped",
            "Cycle".bold(),
            row.cycle,
            bypass,
            row.detect_rate,
            report.completed,
            report.skipped
        );
        let weights: Vec<String> = report
            .weights
            .iter()
            .map(|(agent, weight)| format!("{agent} {weight:.3}"))
            .collect();
        println!("           {} {}", "weights:".dimmed(), weights.join(", "));
    }

    if let Some(path) = &args.out {
        let curve: Vec<_> = reports.iter().map(|r| r.result.clone()).collect();
        export_results(path, &curve)
            .with_context(|| format!("failed to write curve: {}", path.display()))?;
        println!();
        println!("  {} {}", "Curve written to".dimmed(), path.display());
    }
    Ok(())
}

async fn train_with<A, D>(
    attacker: A,
    defender: D,
    config: &LlmConfig,
    trainer_config: TrainerConfig,
) -> Result<Vec<CycleReport>>
where
    A: Capability + 'static,
    D: Capability + 'static,
{
    let attacker = Arc::new(TimedCapability::new(attacker, config.call_timeout()));
    let defender = Arc::new(TimedCapability::new(defender, config.call_timeout()));
    let defense = DebateOrchestrator::new(
        defender,
        Box::new(RuleModerator),
        DebateConfig::default(),
    );
    let trainer = Trainer::new(
        Attacker::new(attacker),
        defense,
        Arc::new(ReputationStore::new()),
        trainer_config,
    );
    Ok(trainer.run().await?)
}
