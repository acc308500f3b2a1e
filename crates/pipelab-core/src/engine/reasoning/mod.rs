//! # External Reasoning
//!
//! The composer may ask an external text-generation service to draft a pipeline.
//! This module owns everything on the library side of that exchange:
//!
//! - [`ReasoningClient`] - The seam implemented by concrete HTTP clients (or test fakes)
//! - [`prompt`] - System and user prompts enumerating the catalog and the output schema
//! - [`response`] - The single parse-or-fail boundary for whatever text comes back
//!
//! The library makes at most one call per composition and never retries. Timeouts
//! belong to the client implementation.

pub mod prompt;
pub mod response;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReasoningError {
    #[error("Reasoning service is not configured: {0}")]
    NotConfigured(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Reasoning service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Reasoning call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Reasoning service returned an empty response")]
    EmptyResponse,
}

#[async_trait]
pub trait ReasoningClient: Send + Sync {
    /// Sends one completion request and returns the raw text of the reply.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ReasoningError>;
}
