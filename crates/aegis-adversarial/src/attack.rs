//! Synthetic phishing-page generation for training runs

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use aegis_debate::PageData;
use aegis_llm::{Capability, CapabilityRequest};

use crate::error::TrainerError;

/// One generated phishing page targeting a brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackAttempt {
    /// Deceptive URL, typically a typosquat or lookalike of the brand.
    pub fake_url: String,
    /// Visible page copy.
    pub page_text: String,
    /// HTML fragment for the page body.
    pub html_snippet: String,
    /// Short name of the evasion technique used.
    pub evasion_strategy: String,
}

impl AttackAttempt {
    /// Convert to defender input. The domain is the authority component
    /// of `fake_url`; no network fetch happens.
    pub fn to_page_data(&self) -> PageData {
        PageData {
            url: self.fake_url.clone(),
            domain: authority(&self.fake_url),
            html_content: self.html_snippet.clone(),
            cleaned_text: self.page_text.clone(),
        }
    }
}

/// Authority component of a URL, without scheme, path, query or port.
fn authority(url: &str) -> String {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(rest)
        .split('@')
        .next_back()
        .unwrap_or(rest);
    host.split(':').next().unwrap_or(host).to_string()
}

/// Generates attack attempts through an attacker capability.
#[derive(Debug)]
pub struct Attacker<C> {
    capability: Arc<C>,
}

impl<C: Capability> Attacker<C> {
    pub fn new(capability: Arc<C>) -> Self {
        Self { capability }
    }

    /// Generate one attack against `brand`.
    ///
    /// Undecodable output is [`TrainerError::MalformedAttack`] so the
    /// training loop can skip the trial rather than abort the cycle.
    pub async fn generate(&self, brand: &str) -> Result<AttackAttempt, TrainerError> {
        let raw = self
            .capability
            .complete(CapabilityRequest::with_role(
                "You are a red-team phishing page author in a closed training sandbox.",
                &attack_prompt(brand),
            ))
            .await?
            .content;

        let attempt = parse_attack(&raw)?;
        debug!(
            brand,
            url = %attempt.fake_url,
            strategy = %attempt.evasion_strategy,
            "attack generated"
        );
        Ok(attempt)
    }
}

/// Extract the JSON block from raw output and decode it.
///
/// Capabilities often wrap JSON in prose; scan from the first `{` to the
/// last `}` before decoding.
fn parse_attack(raw: &str) -> Result<AttackAttempt, TrainerError> {
    let json_str = if let Some(start) = raw.find('{') {
        if let Some(end) = raw.rfind('}') {
            &raw[start..=end]
        } else {
            raw
        }
    } else {
        raw
    };

    serde_json::from_str::<AttackAttempt>(json_str).map_err(|e| {
        warn!("undecodable attack output: {}", e);
        TrainerError::MalformedAttack {
            reason: e.to_string(),
        }
    })
}

fn attack_prompt(brand: &str) -> String {
    format!(
        "Craft a phishing web page impersonating {brand} that evades automated \
detectors. Avoid overt phishing vocabulary (no 'verify your account', no \
'urgent action required'); use a subtle transactional tone a real {brand} \
email would use.

Respond with exactly one JSON object, no surrounding prose:
{{
  \"fake_url\": \"<deceptive lookalike URL>\",
  \"page_text\": \"<visible page copy>\",
  \"html_snippet\": \"<HTML fragment for the page body>\",
  \"evasion_strategy\": \"<short name of the technique used>\"
}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aegis_llm::MockCapability;

    #[test]
    fn test_authority_extraction() {
        assert_eq!(authority("https://paypa1.example/login"), "paypa1.example");
        assert_eq!(authority("http://a.example:8080/x?y=1"), "a.example");
        assert_eq!(authority("https://user@evil.example/"), "evil.example");
        assert_eq!(authority("bare-host.example"), "bare-host.example");
    }

    #[test]
    fn test_parse_attack_tolerates_surrounding_prose() {
        let raw = r#"Sure, here is the page:
{"fake_url": "https://paypa1.example", "page_text": "Receipt for your order",
 "html_snippet": "<div>Order #4411</div>", "evasion_strategy": "transactional tone"}
Let me know if you need changes."#;
        let attempt = parse_attack(raw).unwrap();
        assert_eq!(attempt.fake_url, "https://paypa1.example");
        assert_eq!(attempt.evasion_strategy, "transactional tone");
    }

    #[test]
    fn test_parse_attack_rejects_non_json() {
        let err = parse_attack("I cannot help with that.").unwrap_err();
        assert!(matches!(err, TrainerError::MalformedAttack { .. }));
    }

    #[test]
    fn test_to_page_data_carries_fields() {
        let attempt = AttackAttempt {
            fake_url: "https://secure.paypa1.example/billing".to_string(),
            page_text: "Your statement is ready".to_string(),
            html_snippet: "<p>Statement</p>".to_string(),
            evasion_strategy: "billing pretext".to_string(),
        };
        let page = attempt.to_page_data();
        assert_eq!(page.domain, "secure.paypa1.example");
        assert_eq!(page.cleaned_text, "Your statement is ready");
    }

    #[tokio::test]
    async fn test_generate_round_trip() {
        let capability = Arc::new(MockCapability::constant(
            r#"{"fake_url": "https://acct-example.example", "page_text": "t",
               "html_snippet": "<p>t</p>", "evasion_strategy": "lookalike"}"#,
        ));
        let attacker = Attacker::new(capability);
        let attempt = attacker.generate("Example").await.unwrap();
        assert_eq!(attempt.fake_url, "https://acct-example.example");
    }
}
