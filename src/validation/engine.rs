//! Rule Validation Engine
//!
//! Applies the section rule set and the case classifier to an extracted
//! document, producing one verdict per field plus synthetic failures for
//! missing required fields. Pure function of its input and the static
//! tables; running it twice yields identical verdicts.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::casing::{classify, CasePolicy};
use crate::document::{ExtractedDocument, Field, FieldKind};
use crate::error::{BriefError, BriefResult};
use crate::rules::{FieldRequirement, RuleSet};
use crate::terms::TermRegistry;

/// One ground on which a field failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    /// A required kind has zero occurrences in the document.
    MissingField { kind: FieldKind },
    /// A required field is present but unfilled.
    EmptyRequired,
    TooShort { len: usize, min: usize },
    TooLong { len: usize, max: usize },
    ForbiddenPattern { description: String },
    /// A token violating the active case rule.
    Casing {
        token: String,
        position: usize,
        expected: String,
    },
    /// A registry term present with non-canonical casing.
    TermCasing {
        token: String,
        position: usize,
        expected: String,
    },
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationReason::MissingField { kind } => {
                write!(f, "missing field: {kind} is required but absent")
            }
            ViolationReason::EmptyRequired => write!(f, "required field is empty"),
            ViolationReason::TooShort { len, min } => {
                write!(f, "length {len} below minimum {min}")
            }
            ViolationReason::TooLong { len, max } => {
                write!(f, "length {len} exceeds maximum {max}")
            }
            ViolationReason::ForbiddenPattern { description } => {
                write!(f, "forbidden pattern: {description}")
            }
            ViolationReason::Casing {
                token,
                position,
                expected,
            } => write!(f, "'{token}' (token {position}) should be '{expected}'"),
            ViolationReason::TermCasing {
                token,
                position,
                expected,
            } => write!(
                f,
                "'{token}' (token {position}) must use canonical casing '{expected}'"
            ),
        }
    }
}

/// The rule stage's verdict for one field. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleVerdict {
    pub field: Field,
    pub passed: bool,
    /// Violations in check order; casing violations ordered by position.
    pub violations: Vec<ViolationReason>,
    /// The text as the rules would render it, when it differs.
    pub suggested_text: Option<String>,
}

impl RuleVerdict {
    /// Render the violation list for explanations.
    pub fn describe_violations(&self) -> String {
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// The deterministic half of the hybrid engine.
pub struct RuleValidator {
    registry: Arc<TermRegistry>,
    rules: Arc<RuleSet>,
    policy: CasePolicy,
}

impl RuleValidator {
    pub fn new(registry: Arc<TermRegistry>, rules: Arc<RuleSet>, policy: CasePolicy) -> Self {
        Self {
            registry,
            rules,
            policy,
        }
    }

    /// Validate a whole document.
    ///
    /// Returns one verdict per field in document order, then one synthetic
    /// failing verdict for each required kind with zero occurrences, in
    /// `FieldKind` declaration order. A structurally broken document aborts
    /// before any verdicts are produced.
    pub fn validate(&self, doc: &ExtractedDocument) -> BriefResult<Vec<RuleVerdict>> {
        check_structure(doc)?;

        let mut verdicts: Vec<RuleVerdict> =
            doc.fields.iter().map(|f| self.validate_field(f)).collect();

        for req in self.rules.requirements() {
            if req.required && doc.count_of(req.kind) == 0 {
                log::debug!("required field {} missing from document", req.kind);
                verdicts.push(RuleVerdict {
                    field: Field::new(req.kind, ""),
                    passed: false,
                    violations: vec![ViolationReason::MissingField { kind: req.kind }],
                    suggested_text: None,
                });
            }
        }

        Ok(verdicts)
    }

    /// Validate a single field against its requirement. Violations
    /// accumulate: a field can fail on several grounds at once.
    pub fn validate_field(&self, field: &Field) -> RuleVerdict {
        let req = self.rules.requirement_for(field.kind);
        let mut violations = Vec::new();

        if field.is_empty() {
            // Empty string is a valid value meaning "not filled"; it only
            // fails when the field is required.
            if req.required {
                violations.push(ViolationReason::EmptyRequired);
            }
            return RuleVerdict {
                field: field.clone(),
                passed: violations.is_empty(),
                violations,
                suggested_text: None,
            };
        }

        self.check_length(field, req, &mut violations);
        self.check_forbidden(field, req, &mut violations);
        let suggested_text = self.check_casing(field, req, &mut violations);

        RuleVerdict {
            field: field.clone(),
            passed: violations.is_empty(),
            violations,
            suggested_text,
        }
    }

    fn check_length(
        &self,
        field: &Field,
        req: &FieldRequirement,
        violations: &mut Vec<ViolationReason>,
    ) {
        let len = field.raw_text.chars().count();
        if let Some(min) = req.min_len {
            if len < min {
                violations.push(ViolationReason::TooShort { len, min });
            }
        }
        if let Some(max) = req.max_len {
            if len > max {
                violations.push(ViolationReason::TooLong { len, max });
            }
        }
    }

    fn check_forbidden(
        &self,
        field: &Field,
        req: &FieldRequirement,
        violations: &mut Vec<ViolationReason>,
    ) {
        for forbidden in &req.forbidden_patterns {
            if forbidden.pattern.is_match(&field.raw_text) {
                violations.push(ViolationReason::ForbiddenPattern {
                    description: forbidden.description.clone(),
                });
            }
        }
    }

    fn check_casing(
        &self,
        field: &Field,
        req: &FieldRequirement,
        violations: &mut Vec<ViolationReason>,
    ) -> Option<String> {
        let report = classify(
            &field.raw_text,
            req.case_rule,
            &self.registry,
            &self.policy,
            req.multi_sentence,
        );
        if report.passed {
            return None;
        }

        for v in report.violations {
            let reason = if v.term_mismatch {
                ViolationReason::TermCasing {
                    token: v.token,
                    position: v.position,
                    expected: v.expected,
                }
            } else {
                ViolationReason::Casing {
                    token: v.token,
                    position: v.position,
                    expected: v.expected,
                }
            };
            violations.push(reason);
        }
        Some(report.expected_text)
    }
}

/// Reject documents the downstream stages cannot reason about: duplicate
/// occurrence indices within a kind, or repeated singleton kinds.
fn check_structure(doc: &ExtractedDocument) -> BriefResult<()> {
    let mut seen: HashSet<(FieldKind, usize)> = HashSet::new();
    for field in &doc.fields {
        if !seen.insert((field.kind, field.occurrence_index)) {
            return Err(BriefError::malformed(format!(
                "duplicate occurrence index {} for {}",
                field.occurrence_index, field.kind
            )));
        }
    }
    for kind in FieldKind::ALL {
        if kind.is_singleton() && doc.count_of(kind) > 1 {
            return Err(BriefError::malformed(format!(
                "{kind} may appear at most once, found {}",
                doc.count_of(kind)
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentSource;

    fn validator() -> RuleValidator {
        RuleValidator::new(
            Arc::new(TermRegistry::builtin()),
            Arc::new(RuleSet::standard().expect("standard rules")),
            CasePolicy::default(),
        )
    }

    fn doc_with(fields: &[(FieldKind, &str)]) -> ExtractedDocument {
        let mut doc = ExtractedDocument::new(DocumentSource::File("brief.docx".to_string()));
        for (kind, text) in fields {
            doc.push(*kind, *text);
        }
        doc
    }

    #[test]
    fn test_field_can_fail_on_several_grounds() {
        let v = validator();
        let field = Field::new(
            FieldKind::CtaLabel,
            "learn more about everything we offer today.",
        );
        let verdict = v.validate_field(&field);
        assert!(!verdict.passed);
        // Too long, trailing punctuation, and casing all at once.
        assert!(verdict
            .violations
            .iter()
            .any(|r| matches!(r, ViolationReason::TooLong { .. })));
        assert!(verdict
            .violations
            .iter()
            .any(|r| matches!(r, ViolationReason::ForbiddenPattern { .. })));
        assert!(verdict
            .violations
            .iter()
            .any(|r| matches!(r, ViolationReason::Casing { .. })));
    }

    #[test]
    fn test_missing_required_fields_get_synthetic_verdicts() {
        let v = validator();
        let doc = doc_with(&[(FieldKind::H2, "Key Benefits")]);
        let verdicts = v.validate(&doc).expect("validate");

        let missing: Vec<FieldKind> = verdicts
            .iter()
            .filter(|v| {
                matches!(
                    v.violations.first(),
                    Some(ViolationReason::MissingField { .. })
                )
            })
            .map(|v| v.field.kind)
            .collect();
        assert_eq!(
            missing,
            vec![
                FieldKind::MetaTitle,
                FieldKind::MetaDescription,
                FieldKind::H1
            ]
        );
        // Exactly one synthetic verdict per missing kind.
        assert_eq!(verdicts.len(), 4);
    }

    #[test]
    fn test_empty_required_field() {
        let v = validator();
        let verdict = v.validate_field(&Field::new(FieldKind::MetaTitle, ""));
        assert!(!verdict.passed);
        assert_eq!(verdict.violations, vec![ViolationReason::EmptyRequired]);
    }

    #[test]
    fn test_empty_optional_field_passes() {
        let v = validator();
        let verdict = v.validate_field(&Field::new(FieldKind::H2, ""));
        assert!(verdict.passed);
    }

    #[test]
    fn test_duplicate_singleton_is_malformed() {
        let v = validator();
        let doc = doc_with(&[
            (FieldKind::MetaTitle, "First Title"),
            (FieldKind::MetaTitle, "Second Title"),
        ]);
        assert!(matches!(
            v.validate(&doc),
            Err(BriefError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let v = validator();
        let doc = doc_with(&[
            (FieldKind::MetaTitle, "Cloud Security with FortiCNAPP"),
            (FieldKind::H2, "why it matters"),
        ]);
        let first = v.validate(&doc).expect("first run");
        let second = v.validate(&doc).expect("second run");
        assert_eq!(first, second);
    }

    #[test]
    fn test_suggested_text_on_casing_failure() {
        let v = validator();
        let verdict = v.validate_field(&Field::new(FieldKind::H2, "key benefits"));
        assert!(!verdict.passed);
        assert_eq!(verdict.suggested_text.as_deref(), Some("Key Benefits"));
    }
}
