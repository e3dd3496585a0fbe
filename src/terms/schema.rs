//! Term Registry Schema Types
//!
//! Serde types matching the TOML registry file format, plus the runtime
//! entry type.

use serde::Deserialize;

/// Root registry file structure (matches TOML).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TermFile {
    pub registry: TermFileMeta,
    pub terms: Vec<TermDef>,
}

/// Registry file metadata.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TermFileMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// A single term definition as written in the file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TermDef {
    pub canonical: String,
    pub category: TermCategory,
}

/// What a registry term is.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TermCategory {
    Product,
    Acronym,
}

/// Runtime term entry. `canonical` preserves the exact casing that must
/// appear in output (e.g. "FortiCNAPP", "SIEM").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    pub canonical: String,
    pub category: TermCategory,
}

impl From<TermDef> for TermEntry {
    fn from(def: TermDef) -> Self {
        Self {
            canonical: def.canonical,
            category: def.category,
        }
    }
}
