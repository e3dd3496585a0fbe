//! AI Adjudicator
//!
//! Second opinion for the contested case rules (Title Case and Sentence
//! case) from an external language-model service. The adjudicator never
//! raises into the validation pipeline: every failure mode collapses to
//! `AiOutcome::Unavailable`, which the resolver treats exactly like
//! "AI disabled".

pub mod client;
pub mod prompt;

use async_trait::async_trait;

use crate::document::Field;
use crate::rules::FieldRequirement;

pub use client::OpenAiAdjudicator;

/// Judgment parsed from the AI service.
#[derive(Debug, Clone, PartialEq)]
pub struct AiVerdict {
    pub passed: bool,
    /// Self-reported confidence, clamped to [0, 1].
    pub confidence: f64,
    pub suggested_text: Option<String>,
}

/// Outcome of one adjudication call.
#[derive(Debug, Clone, PartialEq)]
pub enum AiOutcome {
    Delivered(AiVerdict),
    /// Network error, malformed response, missing credential, timeout,
    /// or adjudication disabled. Carries a reason for logging only.
    Unavailable(String),
}

impl AiOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

/// Seam for substituting scripted adjudicators in tests.
#[async_trait]
pub trait Adjudicate: Send + Sync {
    async fn adjudicate(&self, field: &Field, requirement: &FieldRequirement) -> AiOutcome;
}
