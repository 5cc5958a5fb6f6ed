//! Prompt builders for every capability role
//!
//! Each specialist answers in the `Claim:/Confidence:/Evidence:` format the
//! report parser expects. Debate-round prompts replay the serialized full
//! history plus the original artifacts so a specialist can revise or defend
//! its position.

use aegis_core::{DebateHistory, DebateRound, VerificationRecord};

use crate::specialist::{PageData, Specialist};

const REPORT_FORMAT: &str = "Provide your response in the following format:\n\
    - Claim: [PHISHING or BENIGN]\n\
    - Confidence: [a score between 0 and 1]\n\
    - Evidence: [the key observations supporting your claim]";

/// Round-1 prompt for a text specialist.
pub fn initial_prompt(specialist: &Specialist, page: &PageData) -> String {
    match specialist.name {
        "URL Analyst" => format!(
            "Examine the provided URL for suspicious patterns: domain characteristics, \
             subdomain usage, URL structure, and any indicators of phishing or \
             legitimate intent.\n\nURL: {}\n\n{REPORT_FORMAT}",
            page.url
        ),
        "HTML Analyst" => format!(
            "Review the HTML structure of this webpage for characteristics typical of \
             phishing sites: hidden forms, suspicious input fields, iframe usage, \
             obfuscated JavaScript, deceptive redirection.\n\nHTML: {}\n\n{REPORT_FORMAT}",
            page.html_content
        ),
        "Content Analyst" => format!(
            "Read the visible text extracted from this webpage and decide whether the \
             language indicates phishing intent: emotionally manipulative wording, \
             requests for sensitive information, urgency, impersonation of known \
             organizations.\n\nVisible Text: {}\n\n{REPORT_FORMAT}",
            page.cleaned_text
        ),
        "Brand Analyst" => format!(
            "Based on the URL and visible content, evaluate whether this page attempts \
             to impersonate a known brand. Consider brand names, company references, \
             and misused identity.\n\nURL: {}\nVisible Text: {}\n\n\
             Also include a line of the form:\n- Identified Brand: [brand name or N/A]\n\n\
             {REPORT_FORMAT}",
            page.url, page.cleaned_text
        ),
        _ => format!(
            "Assess this webpage for phishing.\n\nURL: {}\n\n{REPORT_FORMAT}",
            page.url
        ),
    }
}

/// Debate-round prompt for a text specialist: re-evaluate given the full
/// history and the original artifacts.
pub fn debate_prompt(
    specialist: &Specialist,
    round_number: u32,
    history: &DebateHistory,
    page: &PageData,
) -> String {
    let history_json = serde_json::to_string_pretty(history).unwrap_or_default();
    format!(
        "This is round {round_number} of a debate between specialist analysts about \
         whether a webpage is phishing. Review the positions taken so far, then restate \
         or revise your own assessment. You are the {}.\n\n\
         Debate history:\n{history_json}\n\n\
         Original artifacts:\nURL: {}\nHTML: {}\nVisible Text: {}\n\n{REPORT_FORMAT}",
        specialist.name, page.url, page.html_content, page.cleaned_text
    )
}

/// Prompt for the visual comparison capability.
pub fn visual_prompt(suspicious: &str, legitimate: &str) -> String {
    format!(
        "Compare a screenshot of a suspicious webpage with its legitimate counterpart. \
         Look for low-resolution logos, awkward layouts, unusual fonts, and differences \
         in branding, color scheme, and component placement.\n\n\
         Suspicious Screenshot: {suspicious}\nLegitimate Screenshot: {legitimate}\n\n\
         {REPORT_FORMAT}"
    )
}

/// Prompt for an externally moderated consensus check.
pub fn moderator_prompt(round: &DebateRound) -> String {
    let formatted: Vec<String> = round
        .reports
        .values()
        .map(|r| format!("**{}**:\n{}", r.agent, r.evidence))
        .collect();
    format!(
        "Specialist analysts have each assessed a webpage. Decide whether they agree. \
         Answer with the single token CONSENSUS if all committed assessments fall on \
         the same side, or CONFLICT otherwise.\n\n{}",
        formatted.join("\n\n")
    )
}

/// Prompt for the judge capability's rationale.
pub fn judge_prompt(history: &DebateHistory, verification: &VerificationRecord) -> String {
    let history_json = serde_json::to_string_pretty(history).unwrap_or_default();
    let verification_json = serde_json::to_string_pretty(verification).unwrap_or_default();
    format!(
        "You are an expert cybersecurity judge. Review the entire debate history and \
         the real-world verification results, then explain your decision.\n\n\
         Debate history:\n{history_json}\n\n\
         Verification results:\n{verification_json}\n\n\
         End with a line of the form:\nFinal Verdict: PHISHING or BENIGN"
    )
}

/// Prompt for malicious-intent classification (phishing verdicts only).
pub fn intent_prompt(final_round: &DebateRound) -> String {
    let analyses_json = serde_json::to_string_pretty(&final_round.reports).unwrap_or_default();
    format!(
        "A webpage has been confirmed as PHISHING. Based on the specialist analyses, \
         identify its malicious intention from: 'Credential Theft', 'Financial Fraud', \
         'Malware Distribution', 'Personal Information Harvesting'.\n\n\
         Analyses:\n{analyses_json}\n\nIntention:"
    )
}
