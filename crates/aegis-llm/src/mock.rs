//! Mock capability for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::capability::{Capability, CapabilityError, CapabilityRequest, CapabilityResponse};

/// A mock capability that returns predefined responses.
///
/// Cycles through its scripted responses, so a test can stage round 1 and
/// round 2 specialist output, a judge rationale and an intent label in
/// order without any real backend.
#[derive(Debug)]
pub struct MockCapability {
    /// Name of this mock
    pub name: String,
    /// Canned responses (cycles through them)
    responses: Vec<String>,
    /// Current response index
    index: AtomicUsize,
    /// Simulated latency in ms
    latency_ms: u64,
    /// When true, every call fails with `NotAvailable`
    failing: bool,
}

impl MockCapability {
    /// Create a mock that cycles through the given responses
    pub fn scripted(responses: Vec<String>) -> Self {
        Self {
            name: "mock".to_string(),
            responses,
            index: AtomicUsize::new(0),
            latency_ms: 0,
            failing: false,
        }
    }

    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::scripted(vec![response.to_string()])
    }

    /// Create a mock whose every call fails, for degradation paths
    pub fn failing() -> Self {
        Self {
            name: "failing-mock".to_string(),
            responses: vec![],
            index: AtomicUsize::new(0),
            latency_ms: 0,
            failing: true,
        }
    }

    /// Add simulated latency (for timeout tests)
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Number of calls served so far
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Capability for MockCapability {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        !self.failing
    }

    async fn complete(
        &self,
        request: CapabilityRequest,
    ) -> Result<CapabilityResponse, CapabilityError> {
        let start = Instant::now();

        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }

        let idx = self.index.fetch_add(1, Ordering::Relaxed);

        if self.failing {
            return Err(CapabilityError::NotAvailable);
        }

        let content = if self.responses.is_empty() {
            // char-based cut; a byte slice could split a multibyte char
            let preview: String = request.prompt.chars().take(50).collect();
            format!("Acknowledged: {preview}")
        } else {
            self.responses[idx % self.responses.len()].clone()
        };

        Ok(CapabilityResponse {
            content,
            model: self.name.clone(),
            tokens_used: Some((request.prompt.len() / 4) as u32),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
