//! Error Taxonomy
//!
//! Only structural and systemic problems are faults. Per-field findings
//! (casing violations, AI disagreement) are data, never errors, and AI
//! unavailability is recovered locally by the resolver.

use thiserror::Error;

/// Fatal errors surfaced to the caller.
#[derive(Debug, Error)]
pub enum BriefError {
    /// The document is missing expected structure. The run aborts before
    /// any verdicts are produced.
    #[error("malformed input document: {reason}")]
    MalformedInput { reason: String },

    /// The rule table or engine configuration is invalid. Fatal at
    /// construction time, not a per-run condition.
    #[error("invalid configuration: {reason}")]
    ConfigurationInvalid { reason: String },
}

impl BriefError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigurationInvalid {
            reason: reason.into(),
        }
    }
}

pub type BriefResult<T> = Result<T, BriefError>;
