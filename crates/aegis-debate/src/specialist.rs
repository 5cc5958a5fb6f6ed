//! The specialist roster and the inputs it analyzes

use serde::{Deserialize, Serialize};

/// One specialist analyst in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Specialist {
    /// Identity used in rounds and the reputation store.
    pub name: &'static str,
    /// Persona injected as the capability's system prompt.
    pub persona: &'static str,
    /// Whether this specialist re-evaluates in later rounds. The Visual
    /// Analyst's comparison is factual, so its single report is carried
    /// forward verbatim instead.
    pub debates: bool,
}

/// The standard five-analyst roster.
pub fn default_roster() -> &'static [Specialist] {
    &[
        Specialist {
            name: "URL Analyst",
            persona: "You are a cybersecurity expert specializing in URL analysis for phishing detection.",
            debates: true,
        },
        Specialist {
            name: "HTML Analyst",
            persona: "You are an expert in web security and HTML structure.",
            debates: true,
        },
        Specialist {
            name: "Content Analyst",
            persona: "You are a cybersecurity-focused language expert.",
            debates: true,
        },
        Specialist {
            name: "Brand Analyst",
            persona: "You are a brand impersonation detection expert.",
            debates: true,
        },
        Specialist {
            name: "Visual Analyst",
            persona: "You are a visual forensics expert comparing webpage designs.",
            debates: false,
        },
    ]
}

/// Pre-fetched, pre-cleaned webpage artifacts.
///
/// Acquisition and HTML cleaning are external collaborators; the engine
/// accepts their output as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageData {
    /// Full URL of the candidate page.
    pub url: String,
    /// Host/authority component of the URL.
    pub domain: String,
    /// Truncated HTML structure.
    pub html_content: String,
    /// Visible text extracted from the page.
    pub cleaned_text: String,
}

/// Input to the Visual Analyst.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VisualInput {
    /// Screenshot references of the suspicious page and its legitimate
    /// counterpart, compared by the visual capability.
    Screenshots {
        suspicious: String,
        legitimate: String,
    },
    /// No comparison possible (no screenshot exists, or no legitimate
    /// counterpart was found). Always used for synthetic attack pages.
    Skipped { reason: String },
}

impl VisualInput {
    /// The standard skip marker for synthetic input.
    pub fn skipped(reason: &str) -> Self {
        Self::Skipped {
            reason: reason.to_string(),
        }
    }
}
