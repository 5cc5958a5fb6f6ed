//! # Aegis LLM
//!
//! The capability layer: every specialist, moderator, judge, intent and
//! attacker interaction is one polymorphic call: structured input in,
//! free text out. The debate engine never sees a concrete backend.
//!
//! ## Backends
//!
//! | Capability | Type | Notes |
//! |-----------|------|-------|
//! | Ollama | Local HTTP | `AEGIS_OLLAMA_URL`, no key |
//! | Mock | Testing | Deterministic scripted responses |
//!
//! ## Quick Start
//!
//! ```rust
//! use aegis_llm::{Capability, MockCapability};
//!
//! #[tokio::main]
//! async fn main() {
//!     let llm = MockCapability::constant("Claim: Benign\nConfidence: 0.9");
//!     let text = llm.ask("Assess https://example.com").await.unwrap();
//!     assert!(text.contains("Benign"));
//! }
//! ```
//!
//! ## Per-call timeouts
//!
//! Capability calls are the only suspending operations in the system and
//! must be bounded; wrap any backend in [`TimedCapability`]:
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use aegis_llm::{OllamaCapability, TimedCapability};
//!
//! let llm = TimedCapability::new(OllamaCapability::new("llama3"), Duration::from_secs(30));
//! ```

pub mod capability;
pub mod config;
pub mod mock;
pub mod ollama;
pub mod timeout;

pub use capability::{Capability, CapabilityError, CapabilityRequest, CapabilityResponse};
pub use config::LlmConfig;
pub use mock::MockCapability;
pub use ollama::OllamaCapability;
pub use timeout::TimedCapability;
