//! Section Rule Set
//!
//! Declarative table mapping each field kind to the checks it must pass.
//! This table is the single source of truth for "what correct looks like":
//! changing a rule means changing one match arm here, never classifier code.

use regex::Regex;

use crate::document::FieldKind;
use crate::error::{BriefError, BriefResult};

/// The case discipline required for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseRule {
    /// Every token begins with an uppercase letter, minor words included.
    CapitalCase,
    /// Standard heading capitalization; minor words lowercase except at
    /// string boundaries.
    TitleCase,
    /// Only sentence-initial tokens (and registry terms) capitalized.
    SentenceCase,
    /// No casing requirement.
    NoCaseCheck,
}

impl CaseRule {
    pub fn label(&self) -> &'static str {
        match self {
            CaseRule::CapitalCase => "Capital Case",
            CaseRule::TitleCase => "Title Case",
            CaseRule::SentenceCase => "Sentence case",
            CaseRule::NoCaseCheck => "No case check",
        }
    }

    /// Title and Sentence case carry the contested edge cases; only those
    /// are worth a second opinion from the AI adjudicator.
    pub fn ai_eligible(&self) -> bool {
        matches!(self, CaseRule::TitleCase | CaseRule::SentenceCase)
    }
}

impl std::fmt::Display for CaseRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A pattern the field text must not match.
#[derive(Debug, Clone)]
pub struct ForbiddenPattern {
    pub pattern: Regex,
    pub description: String,
}

impl ForbiddenPattern {
    fn new(pattern: &str, description: &str) -> BriefResult<Self> {
        Ok(Self {
            pattern: Regex::new(pattern).map_err(|e| {
                BriefError::config(format!("forbidden pattern {pattern:?}: {e}"))
            })?,
            description: description.to_string(),
        })
    }
}

/// The static checks for one field kind.
#[derive(Debug, Clone)]
pub struct FieldRequirement {
    pub kind: FieldKind,
    pub required: bool,
    pub case_rule: CaseRule,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub forbidden_patterns: Vec<ForbiddenPattern>,
    /// Whether the field may contain several sentences, enabling
    /// capitalization after sentence-ending punctuation.
    pub multi_sentence: bool,
}

/// The full rule table, one requirement per field kind.
#[derive(Debug, Clone)]
pub struct RuleSet {
    // Indexed in FieldKind::ALL order.
    requirements: Vec<FieldRequirement>,
}

impl RuleSet {
    /// Build the standard publishing rule table.
    pub fn standard() -> BriefResult<Self> {
        let requirements = FieldKind::ALL
            .iter()
            .map(|kind| standard_requirement(*kind))
            .collect::<BriefResult<Vec<_>>>()?;

        let set = Self { requirements };
        set.check()?;
        Ok(set)
    }

    /// Build a rule set from explicit requirements. Every field kind must
    /// appear exactly once.
    pub fn from_requirements(mut requirements: Vec<FieldRequirement>) -> BriefResult<Self> {
        for kind in FieldKind::ALL {
            let count = requirements.iter().filter(|r| r.kind == kind).count();
            if count != 1 {
                return Err(BriefError::config(format!(
                    "rule table must define {kind} exactly once, found {count}"
                )));
            }
        }
        requirements.sort_by_key(|r| FieldKind::ALL.iter().position(|k| *k == r.kind));
        let set = Self { requirements };
        set.check()?;
        Ok(set)
    }

    /// Look up the requirement for a kind. Total by construction.
    pub fn requirement_for(&self, kind: FieldKind) -> &FieldRequirement {
        let idx = FieldKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        &self.requirements[idx]
    }

    pub fn requirements(&self) -> impl Iterator<Item = &FieldRequirement> {
        self.requirements.iter()
    }

    /// Sanity-check the table. A corrupted table is fatal at startup.
    fn check(&self) -> BriefResult<()> {
        for req in &self.requirements {
            if let (Some(min), Some(max)) = (req.min_len, req.max_len) {
                if min > max {
                    return Err(BriefError::config(format!(
                        "{}: min_len {min} exceeds max_len {max}",
                        req.kind
                    )));
                }
            }
        }
        Ok(())
    }
}

fn standard_requirement(kind: FieldKind) -> BriefResult<FieldRequirement> {
    let html_remnants =
        || ForbiddenPattern::new(r"<[^>]+>|&[a-zA-Z]+;", "HTML markup remnants");
    let trailing_punctuation =
        || ForbiddenPattern::new(r"[.!?,;:]\s*$", "trailing punctuation");

    let requirement = match kind {
        FieldKind::MetaTitle => FieldRequirement {
            kind,
            required: true,
            case_rule: CaseRule::TitleCase,
            min_len: None,
            max_len: Some(70),
            forbidden_patterns: vec![html_remnants()?],
            multi_sentence: false,
        },
        FieldKind::MetaDescription => FieldRequirement {
            kind,
            required: true,
            case_rule: CaseRule::SentenceCase,
            min_len: None,
            max_len: Some(160),
            forbidden_patterns: vec![html_remnants()?],
            multi_sentence: true,
        },
        FieldKind::H1 => FieldRequirement {
            kind,
            required: true,
            case_rule: CaseRule::CapitalCase,
            min_len: None,
            max_len: Some(90),
            forbidden_patterns: Vec::new(),
            multi_sentence: false,
        },
        FieldKind::HeaderCaption => FieldRequirement {
            kind,
            required: false,
            case_rule: CaseRule::SentenceCase,
            min_len: None,
            max_len: None,
            forbidden_patterns: Vec::new(),
            multi_sentence: false,
        },
        FieldKind::H2 => FieldRequirement {
            kind,
            required: false,
            case_rule: CaseRule::CapitalCase,
            min_len: None,
            max_len: None,
            forbidden_patterns: Vec::new(),
            multi_sentence: false,
        },
        FieldKind::H3 | FieldKind::H4 => FieldRequirement {
            kind,
            required: false,
            case_rule: CaseRule::SentenceCase,
            min_len: None,
            max_len: None,
            forbidden_patterns: Vec::new(),
            multi_sentence: false,
        },
        FieldKind::FaqHeader => FieldRequirement {
            kind,
            required: false,
            case_rule: CaseRule::CapitalCase,
            min_len: None,
            max_len: None,
            forbidden_patterns: Vec::new(),
            multi_sentence: false,
        },
        FieldKind::FaqQuestion => FieldRequirement {
            kind,
            required: false,
            case_rule: CaseRule::SentenceCase,
            min_len: None,
            max_len: None,
            forbidden_patterns: Vec::new(),
            multi_sentence: false,
        },
        FieldKind::FaqAnswer => FieldRequirement {
            kind,
            required: false,
            case_rule: CaseRule::SentenceCase,
            min_len: None,
            max_len: None,
            forbidden_patterns: Vec::new(),
            multi_sentence: true,
        },
        FieldKind::NavTab => FieldRequirement {
            kind,
            required: false,
            case_rule: CaseRule::TitleCase,
            min_len: None,
            max_len: Some(40),
            forbidden_patterns: Vec::new(),
            multi_sentence: false,
        },
        FieldKind::CtaLabel => FieldRequirement {
            kind,
            required: false,
            case_rule: CaseRule::TitleCase,
            min_len: None,
            max_len: Some(30),
            forbidden_patterns: vec![trailing_punctuation()?],
            multi_sentence: false,
        },
    };

    Ok(requirement)
}
