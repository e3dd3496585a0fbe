//! Engine Configuration
//!
//! Policy constants for the hybrid engine. The confidence threshold, the
//! minor-word list, and the sentence-terminator set are deliberate policy
//! choices pending confirmation against the editorial rule table, so they
//! live here rather than hard-coded in the classifier or resolver.

use std::time::Duration;

use crate::casing::CasePolicy;
use crate::error::{BriefError, BriefResult};

/// Environment variable holding the adjudication service credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum AI confidence for an override of the rule verdict.
    pub confidence_threshold: f64,
    /// Hard per-call deadline; exceeding it counts as unavailable.
    pub ai_timeout: Duration,
    /// Upper bound on in-flight adjudication calls.
    pub max_concurrent_ai_calls: usize,
    /// Chat-completions endpoint of the adjudication service.
    pub ai_endpoint: String,
    pub ai_model: String,
    /// Absence of a key never prevents rule-only validation.
    pub api_key: Option<String>,
    pub case_policy: CasePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.75,
            ai_timeout: Duration::from_secs(10),
            max_concurrent_ai_calls: 4,
            ai_endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            ai_model: "gpt-4o-mini".to_string(),
            api_key: None,
            case_policy: CasePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with the credential picked up from the
    /// environment, if set.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            ..Self::default()
        }
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> BriefResult<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(BriefError::config(format!(
                "confidence threshold {} outside [0, 1]",
                self.confidence_threshold
            )));
        }
        if self.max_concurrent_ai_calls == 0 {
            return Err(BriefError::config(
                "max_concurrent_ai_calls must be at least 1",
            ));
        }
        if self.ai_timeout.is_zero() {
            return Err(BriefError::config("ai_timeout must be non-zero"));
        }
        if self.case_policy.sentence_terminators.is_empty() {
            return Err(BriefError::config(
                "sentence terminator set must not be empty",
            ));
        }
        Ok(())
    }
}
