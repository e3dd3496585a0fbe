//! Case Classifier
//!
//! Decides whether a string conforms to a required case rule, given the
//! term registry, and reports the offending tokens when it does not.

pub mod classifier;
pub mod tokenizer;

pub use classifier::{classify, CasePolicy, CaseReport, CasingViolation};
pub use tokenizer::{tokenize, WordToken};
