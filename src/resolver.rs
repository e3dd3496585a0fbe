//! Hybrid Resolver
//!
//! Merges the deterministic rule verdict with the optional AI judgment
//! into one final verdict per field. The rule engine is the source of
//! truth but over-flags legitimate stylistic exceptions; the confidence
//! gate bounds how much we trust the probabilistic source. Pure function:
//! the precedence policy is tested exhaustively, not implied by call
//! order.

use crate::adjudicator::{AiOutcome, AiVerdict};
use crate::document::Field;
use crate::validation::RuleVerdict;

/// Which validator the final verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    /// AI unavailable or its dissent ignored; rule verdict stands.
    RuleOnly,
    /// Both validators agreed.
    Agreement,
    /// A confident AI verdict overrode the rule verdict.
    AiOverride,
}

/// The unit consumed by the reporting layer. Created once per field per
/// run, immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalVerdict {
    pub field: Field,
    pub passed: bool,
    pub source: VerdictSource,
    pub explanation: String,
}

/// Apply the precedence policy.
///
/// 1. AI unavailable: rule verdict verbatim, `RuleOnly`.
/// 2. Both pass: `Agreement`, pass.
/// 3. Both fail: `Agreement`, fail, both violation sets concatenated.
/// 4. Disagreement with confidence at or above `threshold`: AI wins,
///    `AiOverride`, overridden rule violations recorded for audit.
/// 5. Disagreement below threshold: rule wins, `RuleOnly`, dissent noted.
pub fn resolve(rule: &RuleVerdict, ai: &AiOutcome, threshold: f64) -> FinalVerdict {
    let ai_verdict = match ai {
        AiOutcome::Unavailable(_) => {
            return FinalVerdict {
                field: rule.field.clone(),
                passed: rule.passed,
                source: VerdictSource::RuleOnly,
                explanation: rule_explanation(rule),
            };
        }
        AiOutcome::Delivered(v) => v,
    };

    match (rule.passed, ai_verdict.passed) {
        (true, true) => FinalVerdict {
            field: rule.field.clone(),
            passed: true,
            source: VerdictSource::Agreement,
            explanation: "rule checks and AI review both passed".to_string(),
        },
        (false, false) => FinalVerdict {
            field: rule.field.clone(),
            passed: false,
            source: VerdictSource::Agreement,
            explanation: agreement_fail_explanation(rule, ai_verdict),
        },
        _ if ai_verdict.confidence >= threshold => {
            log::warn!(
                "AI override for {} #{}: rule passed={} overridden (confidence {:.2})",
                rule.field.kind,
                rule.field.occurrence_index,
                rule.passed,
                ai_verdict.confidence
            );
            FinalVerdict {
                field: rule.field.clone(),
                passed: ai_verdict.passed,
                source: VerdictSource::AiOverride,
                explanation: override_explanation(rule, ai_verdict),
            }
        }
        _ => FinalVerdict {
            field: rule.field.clone(),
            passed: rule.passed,
            source: VerdictSource::RuleOnly,
            explanation: format!(
                "{}; AI dissent (confidence {:.2} below threshold {:.2}) ignored",
                rule_explanation(rule),
                ai_verdict.confidence,
                threshold
            ),
        },
    }
}

fn rule_explanation(rule: &RuleVerdict) -> String {
    if rule.passed {
        "all rule checks passed".to_string()
    } else {
        rule.describe_violations()
    }
}

fn agreement_fail_explanation(rule: &RuleVerdict, ai: &AiVerdict) -> String {
    let mut explanation = rule.describe_violations();
    if let Some(suggested) = &ai.suggested_text {
        explanation.push_str(&format!("; AI suggests: \"{suggested}\""));
    }
    explanation
}

fn override_explanation(rule: &RuleVerdict, ai: &AiVerdict) -> String {
    let direction = if ai.passed {
        "accepted despite rule violations"
    } else {
        "rejected despite passing rule checks"
    };
    let mut explanation = format!(
        "AI override (confidence {:.2}): {direction}; rule verdict was: {}",
        ai.confidence,
        rule_explanation(rule)
    );
    if let Some(suggested) = &ai.suggested_text {
        explanation.push_str(&format!("; AI suggests: \"{suggested}\""));
    }
    explanation
}
