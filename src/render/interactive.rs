//! Interactive render tree with per-section fault boundaries.
//!
//! The renderer materializes a parsed [`Document`] into a UI-facing tree.
//! Each section renders inside its own boundary: a failure (error or panic)
//! in one section degrades that section to a raw-text preview and leaves
//! every other section untouched. Faults are reported through [`Telemetry`]
//! and never propagate to the caller.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{
    Block, BoardRoster, Document, IcpProfile, Inline, List, Persona, Section, SectionKind,
    TableCell,
};

use super::options::RenderOptions;
use super::telemetry::{LogTelemetry, Telemetry};
use super::visitor::{DefaultVisitor, NodeVisitor, VisitorAction};

/// Root of the interactive render output.
///
/// `Pending` means no settled document exists yet (still streaming).
/// `NoContent` means the source settled to nothing renderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderTree {
    /// Source is still streaming; nothing to show yet.
    Pending,

    /// Source settled but produced no sections.
    NoContent,

    /// A settled report, section by section.
    Report(Box<ReportView>),
}

impl RenderTree {
    /// Get the report view if this tree holds one.
    pub fn as_report(&self) -> Option<&ReportView> {
        match self {
            RenderTree::Report(view) => Some(view),
            _ => None,
        }
    }
}

/// A fully materialized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    /// Sections in source order
    pub sections: Vec<SectionView>,

    /// Board roster side data, when attached and requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster: Option<BoardRoster>,

    /// Audience personas side data
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub personas: Vec<Persona>,

    /// Ideal customer profile side data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icp: Option<IcpProfile>,

    /// Whether the source was truncated during sanitization
    pub truncated: bool,

    /// Rendering statistics (all zero unless collection was enabled)
    pub stats: RenderStats,
}

/// One rendered section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    /// Stable section identifier
    pub id: String,

    /// Usable title, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Classified section kind
    pub kind: SectionKind,

    /// Display label derived from the kind
    pub label: String,

    /// Rendered body, or the fault fallback
    pub body: SectionBody,
}

/// Body of a section: rendered nodes or the raw-text fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionBody {
    /// Materialized render nodes
    Rendered { nodes: Vec<RenderNode> },

    /// Bounded raw-text preview installed after a render fault
    Fallback { preview: String },
}

impl SectionBody {
    /// Check whether this body is the fault fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, SectionBody::Fallback { .. })
    }
}

/// A node in the interactive tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderNode {
    /// Heading with level 1-6
    Heading { level: u8, runs: Vec<Inline> },

    /// Paragraph text
    Text { runs: Vec<Inline> },

    /// Ordered or unordered list
    List {
        ordered: bool,
        items: Vec<RenderItem>,
    },

    /// Blockquote containing nested nodes
    Quote { children: Vec<RenderNode> },

    /// Table with header and data rows
    Table {
        header: Vec<CellView>,
        rows: Vec<Vec<CellView>>,
    },

    /// Fenced code block
    Code {
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        text: String,
    },

    /// Horizontal rule
    Divider,
}

/// A list item in the interactive tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    /// Inline content of the item
    pub runs: Vec<Inline>,

    /// Nested sublist, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<Box<RenderNode>>,
}

/// A table cell holding block-level nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    /// Cell content as nodes
    pub nodes: Vec<RenderNode>,
}

/// Statistics collected during rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Total sections in the document
    pub sections: usize,

    /// Sections that rendered without a fault
    pub rendered: usize,

    /// Sections degraded to the raw-text fallback
    pub fallbacks: usize,

    /// Top-level nodes materialized across all sections
    pub nodes: usize,

    /// Tables materialized
    pub tables: usize,

    /// Lists materialized
    pub lists: usize,
}

/// Renderer producing the interactive tree.
pub struct InteractiveRenderer {
    options: RenderOptions,
}

impl InteractiveRenderer {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Create a renderer with custom options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render with the default visitor and log-backed telemetry.
    pub fn render(&self, document: Option<&Document>) -> RenderTree {
        let mut visitor = DefaultVisitor::new();
        self.render_with(document, &mut visitor, &LogTelemetry::new())
    }

    /// Render with a custom visitor and telemetry sink.
    ///
    /// `None` means the source has not settled yet and yields `Pending`.
    pub fn render_with(
        &self,
        document: Option<&Document>,
        visitor: &mut dyn NodeVisitor,
        telemetry: &dyn Telemetry,
    ) -> RenderTree {
        let Some(document) = document else {
            return RenderTree::Pending;
        };
        if document.is_empty() {
            return RenderTree::NoContent;
        }

        let mut sections = Vec::with_capacity(document.sections.len());
        for section in &document.sections {
            sections.push(self.render_section(section, visitor, telemetry));
        }

        let stats = if self.options.collect_stats {
            collect_stats(&sections)
        } else {
            RenderStats::default()
        };

        let view = ReportView {
            roster: document
                .roster
                .clone()
                .filter(|_| self.options.include_side_data),
            personas: if self.options.include_side_data {
                document.personas.clone()
            } else {
                Vec::new()
            },
            icp: document
                .icp
                .clone()
                .filter(|_| self.options.include_side_data),
            truncated: document.truncated,
            sections,
            stats,
        };

        RenderTree::Report(Box::new(view))
    }

    /// Render one section inside its fault boundary.
    ///
    /// A panic anywhere in materialization (including visitor code) is caught
    /// here; the section degrades to a bounded raw-text preview and its
    /// neighbors render as usual.
    fn render_section(
        &self,
        section: &Section,
        visitor: &mut dyn NodeVisitor,
        telemetry: &dyn Telemetry,
    ) -> SectionView {
        let outcome = catch_unwind(AssertUnwindSafe(|| materialize_section(section, visitor)));

        let body = match outcome {
            Ok(Ok(nodes)) => SectionBody::Rendered { nodes },
            Ok(Err(err)) => self.install_fallback(section, err.to_string(), telemetry),
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                self.install_fallback(section, reason, telemetry)
            }
        };

        SectionView {
            id: section.id.clone(),
            title: section.title.clone(),
            kind: section.kind,
            label: section.kind.label().to_string(),
            body,
        }
    }

    fn install_fallback(
        &self,
        section: &Section,
        reason: String,
        telemetry: &dyn Telemetry,
    ) -> SectionBody {
        let fault = Error::SectionFault {
            id: section.id.clone(),
            reason,
        };
        telemetry.render_fault(&section.id, section.kind, &fault);
        SectionBody::Fallback {
            preview: preview_of(&section.raw, self.options.preview_chars),
        }
    }
}

impl Default for InteractiveRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a settled document into the interactive tree with defaults.
pub fn render_interactive(document: Option<&Document>, options: &RenderOptions) -> RenderTree {
    InteractiveRenderer::with_options(options.clone()).render(document)
}

fn materialize_section(
    section: &Section,
    visitor: &mut dyn NodeVisitor,
) -> crate::error::Result<Vec<RenderNode>> {
    visitor.on_section_start(section)?;

    let mut nodes = Vec::with_capacity(section.blocks.len());
    for block in &section.blocks {
        match visitor.visit_block(section, block) {
            VisitorAction::Skip => continue,
            VisitorAction::Replace(node) => nodes.push(node),
            VisitorAction::Continue => nodes.push(materialize_block(block)),
        }
    }
    Ok(nodes)
}

fn materialize_block(block: &Block) -> RenderNode {
    match block {
        Block::Heading { level, runs } => RenderNode::Heading {
            level: *level,
            runs: runs.clone(),
        },
        Block::Paragraph { runs } => RenderNode::Text { runs: runs.clone() },
        Block::List(list) => materialize_list(list),
        Block::Blockquote { blocks } => RenderNode::Quote {
            children: blocks.iter().map(materialize_block).collect(),
        },
        Block::Table(table) => RenderNode::Table {
            header: table.header.iter().map(materialize_cell).collect(),
            rows: table
                .rows
                .iter()
                .map(|row| row.iter().map(materialize_cell).collect())
                .collect(),
        },
        Block::CodeBlock { language, text } => RenderNode::Code {
            language: language.clone(),
            text: text.clone(),
        },
        Block::Rule => RenderNode::Divider,
    }
}

fn materialize_list(list: &List) -> RenderNode {
    RenderNode::List {
        ordered: list.ordered,
        items: list
            .items
            .iter()
            .map(|item| RenderItem {
                runs: item.runs.clone(),
                nested: item
                    .nested
                    .as_deref()
                    .map(|sub| Box::new(materialize_list(sub))),
            })
            .collect(),
    }
}

fn materialize_cell(cell: &TableCell) -> CellView {
    CellView {
        nodes: cell.blocks.iter().map(materialize_block).collect(),
    }
}

/// Bounded raw-text preview for the fault fallback.
fn preview_of(raw: &str, max_chars: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut preview: String = trimmed.chars().take(max_chars).collect();
    preview.push('…');
    preview
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during render".to_string()
    }
}

fn collect_stats(sections: &[SectionView]) -> RenderStats {
    let mut stats = RenderStats {
        sections: sections.len(),
        ..RenderStats::default()
    };
    for section in sections {
        match &section.body {
            SectionBody::Rendered { nodes } => {
                stats.rendered += 1;
                stats.nodes += nodes.len();
                for node in nodes {
                    match node {
                        RenderNode::Table { .. } => stats.tables += 1,
                        RenderNode::List { .. } => stats.lists += 1,
                        _ => {}
                    }
                }
            }
            SectionBody::Fallback { .. } => stats.fallbacks += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::ReportParser;
    use crate::render::telemetry::NullTelemetry;

    struct FailOn {
        target: String,
    }

    impl NodeVisitor for FailOn {
        fn on_section_start(&mut self, section: &Section) -> crate::error::Result<()> {
            if section.id == self.target {
                return Err(Error::Render("injected".to_string()));
            }
            Ok(())
        }
    }

    struct PanicOn {
        target: String,
    }

    impl NodeVisitor for PanicOn {
        fn on_section_start(&mut self, section: &Section) -> crate::error::Result<()> {
            if section.id == self.target {
                panic!("injected panic");
            }
            Ok(())
        }
    }

    fn sample_document() -> Document {
        ReportParser::new().parse(
            "# Executive Summary\nAll systems go.\n# Key Findings\n- first finding here\n- second finding here\n# Deep Dive\nDetail paragraph.",
        )
    }

    #[test]
    fn test_pending_when_no_document() {
        let tree = InteractiveRenderer::new().render(None);
        assert_eq!(tree, RenderTree::Pending);
    }

    #[test]
    fn test_no_content_for_empty_document() {
        let doc = ReportParser::new().parse("");
        let tree = InteractiveRenderer::new().render(Some(&doc));
        assert_eq!(tree, RenderTree::NoContent);
    }

    #[test]
    fn test_renders_all_sections() {
        let doc = sample_document();
        let tree = InteractiveRenderer::new().render(Some(&doc));
        let view = tree.as_report().unwrap();
        assert_eq!(view.sections.len(), 3);
        assert!(view.sections.iter().all(|s| !s.body.is_fallback()));
    }

    #[test]
    fn test_fault_isolated_to_one_section() {
        let doc = sample_document();
        let renderer = InteractiveRenderer::new();
        let mut visitor = FailOn {
            target: "section-2".to_string(),
        };
        let tree = renderer.render_with(Some(&doc), &mut visitor, &NullTelemetry);
        let view = tree.as_report().unwrap();

        assert!(!view.sections[0].body.is_fallback());
        assert!(view.sections[1].body.is_fallback());
        assert!(!view.sections[2].body.is_fallback());
    }

    #[test]
    fn test_panic_is_contained() {
        let doc = sample_document();
        let renderer = InteractiveRenderer::new();
        let mut visitor = PanicOn {
            target: "section-1".to_string(),
        };
        let tree = renderer.render_with(Some(&doc), &mut visitor, &NullTelemetry);
        let view = tree.as_report().unwrap();

        assert!(view.sections[0].body.is_fallback());
        assert!(!view.sections[1].body.is_fallback());
    }

    #[test]
    fn test_fallback_preview_is_bounded() {
        let long_body = "x".repeat(2000);
        let doc = ReportParser::new().parse(&format!("# Title\n{long_body}"));
        let renderer = InteractiveRenderer::with_options(RenderOptions::new().with_preview_chars(100));
        let mut visitor = FailOn {
            target: "section-1".to_string(),
        };
        let tree = renderer.render_with(Some(&doc), &mut visitor, &NullTelemetry);
        let view = tree.as_report().unwrap();

        let SectionBody::Fallback { preview } = &view.sections[0].body else {
            panic!("expected fallback");
        };
        assert!(preview.chars().count() <= 101);
    }

    #[test]
    fn test_stats_collection() {
        let doc = ReportParser::new()
            .parse("# A\n- one item here\n- two item here\n# B\n| h | h |\n| --- | --- |\n| a | b |");
        let renderer =
            InteractiveRenderer::with_options(RenderOptions::new().with_stats(true));
        let tree = renderer.render(Some(&doc));
        let stats = &tree.as_report().unwrap().stats;

        assert_eq!(stats.sections, 2);
        assert_eq!(stats.rendered, 2);
        assert_eq!(stats.fallbacks, 0);
        assert_eq!(stats.lists, 1);
        assert_eq!(stats.tables, 1);
    }

    #[test]
    fn test_side_data_respects_options() {
        let mut doc = sample_document();
        doc.personas = vec![Persona {
            name: "Skeptic".to_string(),
            description: "questions everything".to_string(),
            share: Some(0.4),
        }];

        let with = InteractiveRenderer::new().render(Some(&doc));
        assert_eq!(with.as_report().unwrap().personas.len(), 1);

        let without = InteractiveRenderer::with_options(RenderOptions::new().with_side_data(false))
            .render(Some(&doc));
        assert!(without.as_report().unwrap().personas.is_empty());
    }
}
