//! Capability trait and common types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from capability backends
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Call exceeded {0}ms deadline")]
    Timeout(u64),
    #[error("Capability not available")]
    NotAvailable,
}

/// A request to a capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityRequest {
    /// System prompt (role/persona)
    pub system: String,
    /// The task prompt
    pub prompt: String,
    /// Temperature (0.0 = deterministic)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl CapabilityRequest {
    /// Create a simple request with default settings
    pub fn simple(prompt: &str) -> Self {
        Self {
            system: "You are a cybersecurity analyst.".to_string(),
            prompt: prompt.to_string(),
            temperature: 0.0,
            max_tokens: 1024,
        }
    }

    /// Create a request with a specific persona
    pub fn with_role(system: &str, prompt: &str) -> Self {
        Self {
            system: system.to_string(),
            prompt: prompt.to_string(),
            temperature: 0.0,
            max_tokens: 1024,
        }
    }
}

/// Response from a capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityResponse {
    /// The generated text
    pub content: String,
    /// Model that produced it
    pub model: String,
    /// Tokens used (if reported by the backend)
    pub tokens_used: Option<u32>,
    /// Wall time in milliseconds
    pub latency_ms: u64,
}

/// Trait for opaque reasoning backends.
///
/// One method does the work: structured input → free text. Deterministic
/// test doubles implement the same trait, which isolates the debate state
/// machine and scoring logic from the non-deterministic reasoning they wrap.
#[async_trait]
pub trait Capability: Send + Sync + std::fmt::Debug {
    /// Backend name
    fn name(&self) -> &str;

    /// Check if the backend is reachable
    async fn is_available(&self) -> bool;

    /// Generate a completion
    async fn complete(&self, request: CapabilityRequest)
        -> Result<CapabilityResponse, CapabilityError>;

    /// Generate with a bare prompt (convenience method)
    async fn ask(&self, prompt: &str) -> Result<String, CapabilityError> {
        let response = self.complete(CapabilityRequest::simple(prompt)).await?;
        Ok(response.content)
    }
}
