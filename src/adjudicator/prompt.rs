//! Instruction Templates
//!
//! Rule-specific prompts sent to the language-model service. The model
//! must answer with a bare JSON object so parsing stays trivial; anything
//! else is treated as a malformed response upstream.

use crate::document::FieldKind;
use crate::rules::CaseRule;

pub const SYSTEM_PROMPT: &str = "You are a precise text formatting reviewer \
for cybersecurity marketing content. Respond only with a JSON object of the \
form {\"passed\": bool, \"confidence\": number between 0 and 1, \
\"suggested_text\": string or null}. No prose, no code fences.";

const TITLE_CASE_RULES: &str = "Strict US-English Title Case: capitalize \
nouns, verbs, adjectives, adverbs, and pronouns. Lowercase articles, \
coordinating conjunctions (and, but, or, for, nor, vs), and prepositions of \
four letters or fewer, unless they are the first or last word.";

const SENTENCE_CASE_RULES: &str = "US professional English Sentence case: \
capitalize the first word of each sentence and proper nouns only. Generic \
cybersecurity terms (firewall, threat actor, endpoint detection) are not \
proper nouns.";

const PRESERVED_TERMS: &str = "Preserve exactly as-is: vendor product names \
(any word starting with \"Forti\", e.g. FortiCNAPP, FortiGate), uppercase \
technical acronyms (SIEM, SOAR, XDR, DDoS), and acronym plurals ending in a \
lowercase s (VPNs, APIs, URLs).";

/// Render the user prompt for one field.
pub fn render(rule: CaseRule, kind: FieldKind, raw_text: &str) -> String {
    let rules = match rule {
        CaseRule::TitleCase => TITLE_CASE_RULES,
        CaseRule::SentenceCase => SENTENCE_CASE_RULES,
        // Not AI-eligible; kept total so callers cannot panic.
        CaseRule::CapitalCase | CaseRule::NoCaseCheck => "",
    };

    format!(
        "Field: {field}\nRequired style: {style}\n\n{rules}\n\n{preserved}\n\n\
         Judge whether the input already conforms. Set \"passed\" accordingly, \
         report your confidence, and put the corrected line in \
         \"suggested_text\" (null if no change is needed).\n\nInput:\n{text}",
        field = kind.label(),
        style = rule.label(),
        rules = rules,
        preserved = PRESERVED_TERMS,
        text = raw_text,
    )
}
