//! Brief Lint
//!
//! Hybrid validation engine for structured marketing briefs.
//!
//! This library provides:
//! - Case classification (Capital Case / Title Case / Sentence case)
//! - A term registry of product names and acronyms exempt from case rules
//! - A declarative per-field rule table with length and pattern checks
//! - Optional AI adjudication of contested case rules
//! - A resolver merging rule and AI verdicts under a precedence policy
//!
//! The crate is a library invoked by an application shell; extraction of
//! briefs from documents or web pages, report formatting, and any CLI or
//! dashboard surface live outside it.

pub mod adjudicator;
pub mod casing;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod rules;
pub mod terms;
pub mod validation;

// Re-exports for clean public API
pub use adjudicator::{Adjudicate, AiOutcome, AiVerdict};
pub use config::EngineConfig;
pub use document::{DocumentSource, ExtractedDocument, Field, FieldKind};
pub use engine::{BriefValidator, ValidationReport};
pub use error::{BriefError, BriefResult};
pub use resolver::{resolve, FinalVerdict, VerdictSource};
pub use rules::{CaseRule, FieldRequirement, RuleSet};
pub use terms::TermRegistry;
pub use validation::{RuleValidator, RuleVerdict, ViolationReason};
