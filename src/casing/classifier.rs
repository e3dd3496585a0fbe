//! Case Classification
//!
//! Pure functions deciding whether a string satisfies a case rule.
//! Registry terms are checked first: a matching token is accepted only in
//! its canonical casing, regardless of the active rule. Classification
//! depends solely on the input string, the registry snapshot, and the
//! policy constants - no hidden state.

use std::collections::HashSet;

use crate::rules::CaseRule;
use crate::terms::TermRegistry;

use super::tokenizer::{tokenize, WordToken};

/// Policy constants the classifier needs. The minor-word list and the
/// sentence-terminator set are deliberate policy choices, not grammar
/// facts, so they stay configurable.
#[derive(Debug, Clone)]
pub struct CasePolicy {
    /// Words kept lowercase in Title Case unless first or last token.
    pub minor_words: HashSet<String>,
    /// Punctuation that ends a sentence in multi-sentence fields.
    pub sentence_terminators: Vec<char>,
}

impl Default for CasePolicy {
    fn default() -> Self {
        // Articles, coordinating conjunctions, and prepositions of four
        // letters or fewer.
        let minor_words = [
            "a", "an", "the", "and", "but", "or", "nor", "vs", "in", "of", "to", "for", "at",
            "by", "on", "with", "from", "into", "as", "per",
        ]
        .iter()
        .map(|w| w.to_string())
        .collect();

        Self {
            minor_words,
            sentence_terminators: vec!['.', '!', '?'],
        }
    }
}

/// A single offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasingViolation {
    pub token: String,
    pub position: usize,
    pub expected: String,
    /// True when the token matched a registry term but not its canonical
    /// casing.
    pub term_mismatch: bool,
}

/// Result of classifying one string against one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub passed: bool,
    /// Violations ordered by token position.
    pub violations: Vec<CasingViolation>,
    /// The string rendered as the rule expects it.
    pub expected_text: String,
}

impl CaseReport {
    fn pass(text: &str) -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
            expected_text: text.to_string(),
        }
    }
}

/// Classify `text` against `rule`.
///
/// `multi_sentence` enables capitalization after sentence-ending
/// punctuation (FAQ answers, meta descriptions).
pub fn classify(
    text: &str,
    rule: CaseRule,
    registry: &TermRegistry,
    policy: &CasePolicy,
    multi_sentence: bool,
) -> CaseReport {
    if text.trim().is_empty() || rule == CaseRule::NoCaseCheck {
        return CaseReport::pass(text);
    }

    let tokens = tokenize(text);
    let first_alpha = tokens.iter().position(WordToken::has_alphabetic);
    let last_alpha = tokens.iter().rposition(WordToken::has_alphabetic);

    let mut violations = Vec::new();
    let mut expected_words = Vec::with_capacity(tokens.len());
    let mut sentence_start = true;

    for (i, token) in tokens.iter().enumerate() {
        if !token.has_alphabetic() {
            // Nothing to case-check; a trailing terminator still opens a
            // new sentence in multi-sentence fields.
            expected_words.push(token.text.clone());
            if multi_sentence && token.ends_sentence(&policy.sentence_terminators) {
                sentence_start = true;
            }
            continue;
        }

        let core = token.core();
        let at_sentence_start = sentence_start;
        sentence_start = multi_sentence && token.ends_sentence(&policy.sentence_terminators);

        // Registry terms bypass the rule: canonical casing is the only
        // acceptable casing.
        if let Some(entry) = registry.lookup(core) {
            if core == entry.canonical {
                expected_words.push(token.text.clone());
            } else {
                let expected = replace_core(&token.text, &entry.canonical);
                violations.push(CasingViolation {
                    token: token.text.clone(),
                    position: token.position,
                    expected: expected.clone(),
                    term_mismatch: true,
                });
                expected_words.push(expected);
            }
            continue;
        }

        let expected_core = match rule {
            CaseRule::CapitalCase => capitalize_first(core),
            CaseRule::TitleCase => {
                let is_first = first_alpha == Some(i);
                let is_last = last_alpha == Some(i);
                let minor =
                    !is_first && !is_last && policy.minor_words.contains(&core.to_lowercase());
                if minor {
                    core.to_lowercase()
                } else {
                    title_word(core)
                }
            }
            CaseRule::SentenceCase => {
                if first_alpha == Some(i) || at_sentence_start {
                    title_word(core)
                } else {
                    core.to_lowercase()
                }
            }
            CaseRule::NoCaseCheck => unreachable!("handled above"),
        };

        if expected_core == core {
            expected_words.push(token.text.clone());
        } else {
            let expected = replace_core(&token.text, &expected_core);
            violations.push(CasingViolation {
                token: token.text.clone(),
                position: token.position,
                expected: expected.clone(),
                term_mismatch: false,
            });
            expected_words.push(expected);
        }
    }

    CaseReport {
        passed: violations.is_empty(),
        expected_text: expected_words.join(" "),
        violations,
    }
}

/// Uppercase the first character if alphabetic, leave the rest alone.
/// Capital Case constrains only the first letter of each token.
fn capitalize_first(core: &str) -> String {
    let mut chars = core.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() => c.to_uppercase().chain(chars).collect(),
        Some(c) => std::iter::once(c).chain(chars).collect(),
        None => String::new(),
    }
}

/// First character uppercase, the rest lowercase.
fn title_word(core: &str) -> String {
    let mut chars = core.chars();
    match chars.next() {
        Some(c) => c
            .to_uppercase()
            .collect::<String>()
            + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Swap the alphanumeric core of a token while preserving attached
/// punctuation ("(fortinet)," becomes "(Fortinet),").
fn replace_core(token: &str, new_core: &str) -> String {
    let start = token
        .find(|c: char| c.is_alphanumeric())
        .unwrap_or(0);
    let end = token
        .rfind(|c: char| c.is_alphanumeric())
        .map(|i| i + token[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(token.len());
    format!("{}{}{}", &token[..start], new_core, &token[end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::{TermCategory, TermEntry};

    fn registry_with(terms: &[&str]) -> TermRegistry {
        TermRegistry::from_entries(terms.iter().map(|t| TermEntry {
            canonical: t.to_string(),
            category: TermCategory::Product,
        }))
    }

    fn run(text: &str, rule: CaseRule, registry: &TermRegistry) -> CaseReport {
        classify(text, rule, registry, &CasePolicy::default(), false)
    }

    #[test]
    fn test_capital_case_first_letter_only() {
        let registry = TermRegistry::empty();
        // Remaining letters are unconstrained in Capital Case.
        let report = run("Protect YOUR Network", CaseRule::CapitalCase, &registry);
        assert!(report.passed);

        let report = run("protect Your Network", CaseRule::CapitalCase, &registry);
        assert!(!report.passed);
        assert_eq!(report.violations[0].expected, "Protect");
    }

    #[test]
    fn test_title_case_minor_words() {
        let registry = registry_with(&["FortiCNAPP"]);
        let report = run(
            "Protect Your Network with FortiCNAPP",
            CaseRule::TitleCase,
            &registry,
        );
        assert!(report.passed, "violations: {:?}", report.violations);
    }

    #[test]
    fn test_title_case_minor_word_at_boundary() {
        let registry = TermRegistry::empty();
        // "with" must be capitalized when it is the first token.
        let report = run("with Great Power", CaseRule::TitleCase, &registry);
        assert!(!report.passed);
        assert_eq!(report.violations[0].expected, "With");
    }

    #[test]
    fn test_title_case_flags_lowercase_words() {
        let registry = registry_with(&["Fortinet"]);
        let report = run(
            "fortinet firewall security solutions",
            CaseRule::TitleCase,
            &registry,
        );
        assert!(!report.passed);
        assert_eq!(report.violations.len(), 4);
        assert_eq!(report.violations[0].expected, "Fortinet");
        assert!(report.violations[0].term_mismatch);
        assert_eq!(report.violations[1].expected, "Firewall");
        assert_eq!(report.expected_text, "Fortinet Firewall Security Solutions");
    }

    #[test]
    fn test_sentence_case_basic() {
        let registry = registry_with(&["FortiGate"]);
        let report = run(
            "Secure your network with FortiGate",
            CaseRule::SentenceCase,
            &registry,
        );
        assert!(report.passed);

        let report = run(
            "Secure Your network",
            CaseRule::SentenceCase,
            &registry,
        );
        assert!(!report.passed);
        assert_eq!(report.violations[0].token, "Your");
        assert_eq!(report.violations[0].expected, "your");
    }

    #[test]
    fn test_sentence_case_multi_sentence_restart() {
        let registry = TermRegistry::empty();
        let policy = CasePolicy::default();
        let report = classify(
            "First point. Second point here.",
            CaseRule::SentenceCase,
            &registry,
            &policy,
            true,
        );
        assert!(report.passed, "violations: {:?}", report.violations);

        // Without the multi-sentence flag, the restart capital is flagged.
        let report = classify(
            "First point. Second point here.",
            CaseRule::SentenceCase,
            &registry,
            &policy,
            false,
        );
        assert!(!report.passed);
        assert_eq!(report.violations[0].token, "Second");
    }

    #[test]
    fn test_standalone_terminator_token_obeys_multi_sentence_flag() {
        let registry = TermRegistry::empty();
        let policy = CasePolicy::default();
        // Single-sentence field: a bare "1." never restarts capitalization.
        let report = classify(
            "Step 1. configure the firewall",
            CaseRule::SentenceCase,
            &registry,
            &policy,
            false,
        );
        assert!(report.passed, "violations: {:?}", report.violations);

        let report = classify(
            "Step 1. configure the firewall",
            CaseRule::SentenceCase,
            &registry,
            &policy,
            true,
        );
        assert!(!report.passed);
        assert_eq!(report.violations[0].expected, "Configure");
    }

    #[test]
    fn test_registry_term_wrong_casing_is_violation() {
        let registry = registry_with(&["FortiCNAPP"]);
        let report = run("forticnapp Overview", CaseRule::TitleCase, &registry);
        assert!(!report.passed);
        assert_eq!(report.violations[0].expected, "FortiCNAPP");
        assert!(report.violations[0].term_mismatch);
    }

    #[test]
    fn test_all_registry_tokens_pass_every_rule() {
        let registry = registry_with(&["FortiGate", "SIEM", "SD-WAN"]);
        for rule in [
            CaseRule::CapitalCase,
            CaseRule::TitleCase,
            CaseRule::SentenceCase,
            CaseRule::NoCaseCheck,
        ] {
            let report = run("FortiGate SD-WAN SIEM", rule, &registry);
            assert!(report.passed, "rule {rule:?} failed: {:?}", report.violations);
        }
    }

    #[test]
    fn test_punctuation_preserved_in_expected_form() {
        let registry = registry_with(&["Fortinet"]);
        let report = run("(fortinet) solutions", CaseRule::TitleCase, &registry);
        assert_eq!(report.violations[0].expected, "(Fortinet)");
    }

    #[test]
    fn test_hyphenated_compound_single_unit() {
        let registry = TermRegistry::empty();
        let report = run("Multi-Cloud Security", CaseRule::TitleCase, &registry);
        // "Multi-Cloud" is one token; Title Case lowers everything after
        // the first letter.
        assert!(!report.passed);
        assert_eq!(report.violations[0].expected, "Multi-cloud");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let registry = registry_with(&["Fortinet"]);
        let a = run("fortinet firewall Security", CaseRule::TitleCase, &registry);
        let b = run("fortinet firewall Security", CaseRule::TitleCase, &registry);
        assert_eq!(a, b);
    }
}
