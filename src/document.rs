//! Extracted Document Model
//!
//! Pure data representation of a brief after extraction.
//! No validation logic here - extractors produce it, the engine reads it.

/// The kind of a brief field.
///
/// Closed enum so the rule table can be checked for exhaustiveness by the
/// compiler instead of relying on runtime lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    MetaTitle,
    MetaDescription,
    H1,
    HeaderCaption,
    H2,
    H3,
    H4,
    FaqHeader,
    FaqQuestion,
    FaqAnswer,
    NavTab,
    CtaLabel,
}

impl FieldKind {
    /// All kinds in reporting order.
    pub const ALL: [FieldKind; 12] = [
        FieldKind::MetaTitle,
        FieldKind::MetaDescription,
        FieldKind::H1,
        FieldKind::HeaderCaption,
        FieldKind::H2,
        FieldKind::H3,
        FieldKind::H4,
        FieldKind::FaqHeader,
        FieldKind::FaqQuestion,
        FieldKind::FaqAnswer,
        FieldKind::NavTab,
        FieldKind::CtaLabel,
    ];

    /// Human-readable label used in reports and AI prompts.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::MetaTitle => "Meta Title",
            FieldKind::MetaDescription => "Meta Description",
            FieldKind::H1 => "H1",
            FieldKind::HeaderCaption => "Header Caption",
            FieldKind::H2 => "H2",
            FieldKind::H3 => "H3",
            FieldKind::H4 => "H4",
            FieldKind::FaqHeader => "FAQ Header",
            FieldKind::FaqQuestion => "FAQ Question",
            FieldKind::FaqAnswer => "FAQ Answer",
            FieldKind::NavTab => "Product Nav Tab",
            FieldKind::CtaLabel => "CTA Label",
        }
    }

    /// Whether at most one occurrence of this kind may appear in a document.
    pub fn is_singleton(&self) -> bool {
        matches!(
            self,
            FieldKind::MetaTitle
                | FieldKind::MetaDescription
                | FieldKind::H1
                | FieldKind::HeaderCaption
                | FieldKind::FaqHeader
        )
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One named, addressable unit of content within a brief.
///
/// `raw_text` is never null; an empty string means "field not filled".
/// `occurrence_index` disambiguates repeated kinds (H2-H4, FAQ, nav tabs)
/// and preserves document order for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub kind: FieldKind,
    pub raw_text: String,
    pub occurrence_index: usize,
}

impl Field {
    pub fn new(kind: FieldKind, raw_text: impl Into<String>) -> Self {
        Self::with_occurrence(kind, raw_text, 0)
    }

    pub fn with_occurrence(
        kind: FieldKind,
        raw_text: impl Into<String>,
        occurrence_index: usize,
    ) -> Self {
        Self {
            kind,
            raw_text: raw_text.into(),
            occurrence_index,
        }
    }

    /// Whether the field was left unfilled by the author.
    pub fn is_empty(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

/// Where the document was extracted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(String),
    Url(String),
}

/// An ordered collection of fields produced by an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub source: DocumentSource,
    pub fields: Vec<Field>,
}

impl ExtractedDocument {
    pub fn new(source: DocumentSource) -> Self {
        Self {
            source,
            fields: Vec::new(),
        }
    }

    /// Append a field, assigning the next occurrence index for its kind.
    pub fn push(&mut self, kind: FieldKind, raw_text: impl Into<String>) {
        let occurrence_index = self.fields.iter().filter(|f| f.kind == kind).count();
        self.fields
            .push(Field::with_occurrence(kind, raw_text, occurrence_index));
    }

    /// Number of occurrences of a kind in the document.
    pub fn count_of(&self, kind: FieldKind) -> usize {
        self.fields.iter().filter(|f| f.kind == kind).count()
    }
}
