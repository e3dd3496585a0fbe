//! Rule Validation
//!
//! Deterministic validation of an extracted document against the section
//! rule set and the case classifier. No network or I/O side effects.

pub mod engine;

pub use engine::{RuleValidator, RuleVerdict, ViolationReason};
