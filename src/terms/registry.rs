//! Term Registry
//!
//! Simple in-memory registry keyed by case-insensitive exact-token match.
//! A token inside a longer word never matches.

use std::collections::HashMap;

use super::schema::{TermEntry, TermFile};
use crate::error::{BriefError, BriefResult};

/// In-memory term registry. Immutable once constructed and handed to the
/// validator; share via `Arc` across concurrent AI calls.
#[derive(Debug, Clone)]
pub struct TermRegistry {
    name: String,
    terms: HashMap<String, TermEntry>,
}

impl Default for TermRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl TermRegistry {
    pub fn empty() -> Self {
        Self {
            name: "empty".to_string(),
            terms: HashMap::new(),
        }
    }

    /// Load the embedded built-in registry (Fortinet products plus common
    /// cybersecurity acronyms).
    pub fn builtin() -> Self {
        let embedded = include_str!("../../resources/terms/builtin.terms.toml");
        match Self::from_toml_str(embedded) {
            Ok(registry) => registry,
            Err(e) => {
                // The embedded table ships with the crate; a parse failure
                // here means a broken build, not a user error.
                log::warn!("failed to parse embedded term registry: {e}. Using empty registry.");
                Self::empty()
            }
        }
    }

    /// Parse a registry from TOML text.
    pub fn from_toml_str(src: &str) -> BriefResult<Self> {
        let file: TermFile = toml::from_str(src)
            .map_err(|e| BriefError::config(format!("term registry TOML: {e}")))?;

        let mut registry = Self {
            name: file.registry.name,
            terms: HashMap::new(),
        };
        for def in file.terms {
            registry.add_term(def.into());
        }
        Ok(registry)
    }

    /// Build a registry from entries directly (useful for testing with
    /// substituted registries).
    pub fn from_entries(entries: impl IntoIterator<Item = TermEntry>) -> Self {
        let mut registry = Self {
            name: "custom".to_string(),
            terms: HashMap::new(),
        };
        for entry in entries {
            registry.add_term(entry);
        }
        registry
    }

    /// Add a term to the registry. Later entries win on collision.
    pub fn add_term(&mut self, entry: TermEntry) {
        self.terms.insert(entry.canonical.to_lowercase(), entry);
    }

    /// Look up a token. Leading and trailing punctuation is ignored,
    /// internal hyphens are kept, and the match is case-insensitive but
    /// exact on the remaining core - no substring or fuzzy matching.
    pub fn lookup(&self, token: &str) -> Option<&TermEntry> {
        let core = token_core(token);
        if core.is_empty() {
            return None;
        }
        self.terms.get(&core.to_lowercase())
    }

    pub fn all_terms(&self) -> impl Iterator<Item = &TermEntry> {
        self.terms.values()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Strip attached punctuation from both ends of a token, keeping internal
/// characters (hyphens, slashes) intact.
pub fn token_core(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::schema::TermCategory;

    fn entry(canonical: &str, category: TermCategory) -> TermEntry {
        TermEntry {
            canonical: canonical.to_string(),
            category,
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry =
            TermRegistry::from_entries([entry("FortiGate", TermCategory::Product)]);

        assert!(registry.lookup("fortigate").is_some());
        assert!(registry.lookup("FORTIGATE").is_some());
        assert_eq!(
            registry.lookup("FortiGate").unwrap().canonical,
            "FortiGate"
        );
    }

    #[test]
    fn test_lookup_ignores_attached_punctuation() {
        let registry = TermRegistry::from_entries([entry("SIEM", TermCategory::Acronym)]);

        assert!(registry.lookup("(SIEM)").is_some());
        assert!(registry.lookup("siem,").is_some());
        assert!(registry.lookup("SIEM?").is_some());
    }

    #[test]
    fn test_lookup_never_matches_inside_longer_word() {
        let registry = TermRegistry::from_entries([entry("FortiGate", TermCategory::Product)]);

        assert!(registry.lookup("FortiGates").is_none());
        assert!(registry.lookup("xFortiGate").is_none());
    }

    #[test]
    fn test_hyphenated_terms() {
        let registry = TermRegistry::from_entries([entry("SD-WAN", TermCategory::Acronym)]);

        assert!(registry.lookup("sd-wan").is_some());
        assert!(registry.lookup("(SD-WAN)").is_some());
    }

    #[test]
    fn test_builtin_registry_loads() {
        let registry = TermRegistry::builtin();
        assert!(registry.len() >= 80, "expected at least 80 built-in terms");
        assert_eq!(registry.lookup("forticnapp").unwrap().canonical, "FortiCNAPP");
        assert_eq!(registry.lookup("siem").unwrap().canonical, "SIEM");
        assert_eq!(
            registry.lookup("fortiapigateway").unwrap().canonical,
            "FortiAPIGateway"
        );
        assert_eq!(registry.lookup("zam").unwrap().canonical, "ZAM");
        assert_eq!(registry.lookup("fabric").unwrap().canonical, "Fabric");
    }
}
