//! Info command - Show system information
//!
//! Usage:
//! ```bash
//! aegis info
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use aegis_core::MAX_DEBATE_ROUNDS;
use aegis_debate::default_roster;
use aegis_llm::LlmConfig;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs;

/// Run the info command
pub fn run(_args: InfoArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let config = LlmConfig::from_env();

    println!("{}", "Aegis - Adversarial Phishing Detection".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!();

    println!("{}", "Version Information:".bold());
    println!("  {} {}", "CLI Version:".dimmed(), version.green());
    println!();

    println!("{}", "Specialist Roster:".bold());
    for specialist in default_roster() {
        let role = if specialist.debates {
            "debates"
        } else {
            "reports once"
        };
        println!("  {} {} ({})", "•".cyan(), specialist.name.green(), role.dimmed());
    }
    println!(
        "  {} round cap: {}",
        "•".cyan(),
        MAX_DEBATE_ROUNDS.to_string().green()
    );
    println!();

    println!("{}", "Configuration:".bold());
    println!("  {} {}", "Provider:".dimmed(), config.provider);
    println!("  {} {}", "Model:".dimmed(), config.model);
    println!("  {} {}", "Ollama URL:".dimmed(), config.ollama_url);
    println!("  {} {}s", "Call timeout:".dimmed(), config.call_timeout_secs);
    println!(
        "  {} {}",
        "Backends:".dimmed(),
        config.available_providers().join(", ")
    );
    println!();

    println!("{}", "Environment:".bold());
    println!("  {} AEGIS_PROVIDER, AEGIS_MODEL, AEGIS_OLLAMA_URL,", "ℹ".blue());
    println!("    AEGIS_CALL_TIMEOUT_SECS");
    println!();

    Ok(())
}
