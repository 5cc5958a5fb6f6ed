//! Analyze command - run the debate pipeline over a captured page
//!
//! Usage:
//! ```bash
//! aegis analyze --page page.json
//! aegis analyze --page page.json --provider mock --json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use aegis_core::{ReputationStore, Verdict};
use aegis_debate::{
    AnalysisReport, Analyzer, DebateConfig, DebateOrchestrator, PageData, RuleModerator,
    VisualInput,
};
use aegis_llm::{Capability, LlmConfig, MockCapability, OllamaCapability, TimedCapability};

/// Canned response the mock provider replays for offline smoke runs.
const MOCK_RESPONSE: &str =
    "Claim: Benign\nConfidence: 0.5\nEvidence: offline mock\nFinal Verdict: BENIGN";

/// Arguments for the analyze command
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a captured page JSON file (url, domain, html_content,
    /// cleaned_text)
    #[arg(long, short = 'p', value_name = "FILE")]
    page: PathBuf,

    /// Capability backend ("ollama" or "mock"; default from AEGIS_PROVIDER)
    #[arg(long)]
    provider: Option<String>,

    /// Screenshot of the suspect page, for the visual comparison
    #[arg(long, value_name = "FILE", requires = "reference")]
    screenshot: Option<String>,

    /// Screenshot of the legitimate counterpart page
    #[arg(long, value_name = "FILE", requires = "screenshot")]
    reference: Option<String>,

    /// Emit the full report as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

/// Run the analyze command
pub async fn run(args: AnalyzeArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.page)
        .with_context(|| format!("failed to read page file: {}", args.page.display()))?;
    let page: PageData = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse page JSON: {}", args.page.display()))?;

    let config = LlmConfig::from_env();
    let provider = args.provider.unwrap_or_else(|| config.provider.clone());

    let visual = match (args.screenshot, args.reference) {
        (Some(suspicious), Some(legitimate)) => VisualInput::Screenshots {
            suspicious,
            legitimate,
        },
        _ => VisualInput::skipped("screenshots not provided"),
    };

    let report = match provider.as_str() {
        "mock" => {
            analyze_with(MockCapability::constant(MOCK_RESPONSE), &config, &page, &visual).await?
        }
        "ollama" => {
            analyze_with(
                OllamaCapability::with_url(&config.ollama_url, &config.model),
                &config,
                &page,
                &visual,
            )
            .await?
        }
        other => anyhow::bail!("unknown provider '{other}' (expected 'ollama' or 'mock')"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_summary(&page, &report);
    Ok(())
}

async fn analyze_with<C: Capability + 'static>(
    capability: C,
    config: &LlmConfig,
    page: &PageData,
    visual: &VisualInput,
) -> Result<AnalysisReport> {
    let capability = Arc::new(TimedCapability::new(capability, config.call_timeout()));
    let orchestrator = DebateOrchestrator::new(
        capability.clone(),
        Box::new(RuleModerator),
        DebateConfig::default(),
    );
    let analyzer = Analyzer::new(orchestrator, capability, Arc::new(ReputationStore::new()));
    let report = analyzer.analyze(page, visual, None).await?;
    Ok(report)
}

fn print_summary(page: &PageData, report: &AnalysisReport) {
    println!("{}", "Aegis Analysis".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!();
    println!("  {} {}", "URL:".dimmed(), page.url);
    println!("  {} {}", "Brand:".dimmed(), report.verification.identified_brand);
    println!("  {} {} rounds, {:?}", "Debate:".dimmed(), report.history.rounds().len(), report.consensus);
    println!();

    let verdict = match report.judgment.verdict {
        Verdict::Phishing => "PHISHING".red().bold(),
        Verdict::Benign => "BENIGN".green().bold(),
    };
    println!(
        "  {} {} (weighted score {:.3})",
        "Verdict:".bold(),
        verdict,
        report.judgment.weighted_score
    );
    if let Some(intent) = &report.judgment.intent {
        println!("  {} {}", "Intent:".bold(), intent.yellow());
    }
    println!();
    println!("{}", "Rationale:".bold());
    for line in report.judgment.rationale.lines() {
        println!("  {line}");
    }
}
