//! Per-call deadline wrapper
//!
//! Capability calls are external, potentially slow network calls and are
//! the only suspending operations in the system. Every backend used by the
//! debate engine goes through this wrapper so a hung call cannot stall a
//! round; the caller degrades the affected specialist instead of aborting.

use async_trait::async_trait;
use std::time::Duration;

use crate::capability::{Capability, CapabilityError, CapabilityRequest, CapabilityResponse};

/// Wraps any capability with a `tokio::time::timeout` per call.
#[derive(Debug)]
pub struct TimedCapability<C: Capability> {
    inner: C,
    deadline: Duration,
}

impl<C: Capability> TimedCapability<C> {
    /// Wrap a capability with the given per-call deadline
    pub fn new(inner: C, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    /// The configured deadline
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[async_trait]
impl<C: Capability + 'static> Capability for TimedCapability<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn is_available(&self) -> bool {
        matches!(
            tokio::time::timeout(self.deadline, self.inner.is_available()).await,
            Ok(true)
        )
    }

    async fn complete(
        &self,
        request: CapabilityRequest,
    ) -> Result<CapabilityResponse, CapabilityError> {
        match tokio::time::timeout(self.deadline, self.inner.complete(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    capability = %self.inner.name(),
                    deadline_ms = self.deadline.as_millis() as u64,
                    "capability call timed out"
                );
                Err(CapabilityError::Timeout(self.deadline.as_millis() as u64))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockCapability;

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let timed = TimedCapability::new(
            MockCapability::constant("ok"),
            Duration::from_millis(500),
        );
        assert_eq!(timed.ask("x").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let timed = TimedCapability::new(
            MockCapability::constant("late").with_latency(200),
            Duration::from_millis(10),
        );
        assert!(matches!(
            timed.ask("x").await,
            Err(CapabilityError::Timeout(10))
        ));
    }
}
