//! Document-level types.

use super::{Block, BoardRoster, IcpProfile, Persona};
use serde::{Deserialize, Serialize};

/// A fully parsed board report.
///
/// A `Document` is immutable once built: every settle event of the streaming
/// source produces a brand-new value rather than mutating the old one, so
/// renderers never observe torn partial state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Report sections in source order
    pub sections: Vec<Section>,

    /// Board roster side-data, merged without reparsing
    pub roster: Option<BoardRoster>,

    /// Persona breakdown side-data
    pub personas: Vec<Persona>,

    /// ICP (ideal customer profile) side-data
    pub icp: Option<IcpProfile>,

    /// Character length of the sanitized source text
    pub source_len: usize,

    /// Whether the sanitizer truncated the source at its length ceiling
    pub truncated: bool,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            roster: None,
            personas: Vec::new(),
            icp: None,
            source_len: 0,
            truncated: false,
        }
    }

    /// Get the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check if the document has any sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Find a section by its identifier.
    pub fn get_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Find the first section of the given kind.
    pub fn section_of_kind(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A top-level titled division of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Stable identifier within the document (e.g. "section-3")
    pub id: String,

    /// Title from the heading line, if usable
    pub title: Option<String>,

    /// Semantic classification label; always assigned
    pub kind: SectionKind,

    /// Parsed block tree of the section body
    pub blocks: Vec<Block>,

    /// Raw sanitized body text, retained for the fault-boundary fallback
    pub raw: String,
}

impl Section {
    /// Get plain text content of the section.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        if let Some(ref title) = self.title {
            out.push_str(title);
            out.push('\n');
        }
        out.push_str(
            &self
                .blocks
                .iter()
                .map(|b| b.plain_text())
                .collect::<Vec<_>>()
                .join("\n"),
        );
        out
    }

    /// Count the top-level blocks in the section.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Semantic label assigned to every section.
///
/// The label is a pure deterministic function of `(title, body)`; see
/// [`crate::parser::classify`]. `Generic` is the total-function fallback and
/// never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Status-style overview, usually table-shaped
    ExecutiveSummary,
    /// Research findings
    KeyFindings,
    /// Detailed analysis or pricing-tier discussion
    DeepDive,
    /// The "Roast" and "Gold" feedback pairing
    RoastAndGold,
    /// Meeting transcript
    Transcript,
    /// Anything else
    Generic,
}

impl SectionKind {
    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::ExecutiveSummary => "Executive Summary",
            SectionKind::KeyFindings => "Key Findings",
            SectionKind::DeepDive => "Deep Dive",
            SectionKind::RoastAndGold => "Roast & Gold",
            SectionKind::Transcript => "Transcript",
            SectionKind::Generic => "Section",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.section_count(), 0);
    }

    #[test]
    fn test_section_lookup() {
        let mut doc = Document::new();
        doc.sections.push(Section {
            id: "section-1".to_string(),
            title: Some("Key Findings".to_string()),
            kind: SectionKind::KeyFindings,
            blocks: vec![Block::literal("finding one")],
            raw: "finding one".to_string(),
        });

        assert!(doc.get_section("section-1").is_some());
        assert!(doc.get_section("section-9").is_none());
        assert!(doc.section_of_kind(SectionKind::KeyFindings).is_some());
        assert!(doc.section_of_kind(SectionKind::Transcript).is_none());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(SectionKind::RoastAndGold.label(), "Roast & Gold");
        assert_eq!(SectionKind::Generic.label(), "Section");
    }
}
