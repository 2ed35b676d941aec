//! # reportml
//!
//! Fault-tolerant parsing and rendering for AI-generated board reports.
//!
//! Raw report text from an upstream generator is sanitized, split into
//! sections, classified, and parsed into typed blocks. The result renders
//! two ways: an interactive tree where every section sits behind its own
//! fault boundary, and a single self-contained HTML artifact for export.
//!
//! ## Quick Start
//!
//! ```
//! use reportml::Reportml;
//!
//! let html = Reportml::new()
//!     .with_product("Acme")
//!     .parse("# Executive Summary\nAll systems healthy.")
//!     .to_html();
//! assert!(html.contains("Executive Summary"));
//! ```
//!
//! ## Features
//!
//! - **Total parsing**: malformed input degrades to literal text, never an error
//! - **Fault isolation**: a render failure in one section never touches its neighbors
//! - **Streaming settle gate**: chunks accumulate; the pipeline runs only on settle
//! - **Structured side data**: board roster, personas, and ICP merge into fixed slots
//! - **Dual output**: interactive render tree and self-contained HTML export
//! - **Parallel sections**: opt-in Rayon across independent sections

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod stream;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Block, BoardMember, BoardRoster, Document, IcpProfile, Inline, List, ListItem, Persona,
    Section, SectionKind, Table, TableCell, TextStyle,
};
pub use parser::{CellPolicy, ParseOptions, ReportParser, SanitizeOptions};
pub use render::{
    ExportOptions, JsonFormat, NodeVisitor, RenderOptions, RenderTree, Telemetry,
};
pub use stream::ReportStream;

/// Parse raw report text into a structured document.
///
/// Parsing is total: any input yields a document, malformed constructs
/// degrade to literal paragraphs.
///
/// # Example
///
/// ```
/// use reportml::parse_report;
///
/// let doc = parse_report("# Key Findings\n- users want speed");
/// assert_eq!(doc.section_count(), 1);
/// ```
pub fn parse_report(raw: &str) -> Document {
    ReportParser::new().parse(raw)
}

/// Parse raw report text with custom options.
///
/// # Example
///
/// ```
/// use reportml::{parse_report_with_options, ParseOptions};
///
/// let options = ParseOptions::new().parallel();
/// let doc = parse_report_with_options("# Summary\ntext", options);
/// assert_eq!(doc.section_count(), 1);
/// ```
pub fn parse_report_with_options(raw: &str, options: ParseOptions) -> Document {
    ReportParser::with_options(options).parse(raw)
}

/// Parse only once the source has settled.
///
/// Returns `None` while `is_streaming` is true; the pipeline never runs
/// over a partial stream.
pub fn parse_settled(raw: &str, is_streaming: bool) -> Option<Document> {
    ReportParser::new().parse_settled(raw, is_streaming)
}

/// Parse raw text and export it as self-contained HTML in one step.
///
/// # Example
///
/// ```
/// use reportml::report_to_html;
///
/// let html = report_to_html("# Summary\nAll good.");
/// assert!(html.starts_with("<!DOCTYPE html>"));
/// ```
pub fn report_to_html(raw: &str) -> String {
    let doc = parse_report(raw);
    render::export_html(&doc, &ExportOptions::default())
}

/// Parse raw text and serialize the document as JSON.
pub fn report_to_json(raw: &str, format: JsonFormat) -> Result<String> {
    let doc = parse_report(raw);
    render::to_json(&doc, format)
}

/// Builder for parsing and rendering board reports.
///
/// # Example
///
/// ```
/// use reportml::{Reportml, BoardRoster, BoardMember};
///
/// let roster = BoardRoster {
///     members: vec![BoardMember {
///         name: "Ada".to_string(),
///         role: "CFO".to_string(),
///         perspective: None,
///     }],
/// };
///
/// let result = Reportml::new()
///     .with_product("Acme")
///     .with_roster(roster)
///     .sequential()
///     .parse("# Executive Summary\nRunway is fine.");
///
/// assert!(result.document().roster.is_some());
/// ```
pub struct Reportml {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    export_options: ExportOptions,
    roster: Option<BoardRoster>,
    personas: Vec<Persona>,
    icp: Option<IcpProfile>,
}

impl Reportml {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            export_options: ExportOptions::default(),
            roster: None,
            personas: Vec::new(),
            icp: None,
        }
    }

    /// Enable parallel section parsing.
    pub fn parallel(mut self) -> Self {
        self.parse_options = self.parse_options.parallel();
        self
    }

    /// Force sequential section parsing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Set sanitization options.
    pub fn with_sanitize(mut self, sanitize: SanitizeOptions) -> Self {
        self.parse_options = self.parse_options.with_sanitize(sanitize);
        self
    }

    /// Set the table-cell post-processing policy.
    pub fn with_cell_policy(mut self, policy: CellPolicy) -> Self {
        self.parse_options = self.parse_options.with_cell_policy(policy);
        self
    }

    /// Set the fault-fallback preview bound in characters.
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.render_options = self.render_options.with_preview_chars(chars);
        self
    }

    /// Set the product name used in export titles and filenames.
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.export_options = self.export_options.with_product(product);
        self
    }

    /// Include or exclude side data in both render and export output.
    pub fn with_side_data(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_side_data(include);
        self.export_options = self.export_options.with_side_data(include);
        self
    }

    /// Attach a board roster to the parsed document.
    pub fn with_roster(mut self, roster: BoardRoster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Attach audience personas to the parsed document.
    pub fn with_personas(mut self, personas: Vec<Persona>) -> Self {
        self.personas = personas;
        self
    }

    /// Attach an ideal customer profile to the parsed document.
    pub fn with_icp(mut self, icp: IcpProfile) -> Self {
        self.icp = Some(icp);
        self
    }

    /// Parse raw report text and return a result wrapper.
    pub fn parse(self, raw: &str) -> ReportmlResult {
        let parser = ReportParser::with_options(self.parse_options);
        let mut document = parser.parse(raw);
        document.roster = self.roster;
        document.personas = self.personas;
        document.icp = self.icp;

        ReportmlResult {
            document,
            render_options: self.render_options,
            export_options: self.export_options,
        }
    }
}

impl Default for Reportml {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a board report.
pub struct ReportmlResult {
    /// The parsed document
    pub document: Document,
    render_options: RenderOptions,
    export_options: ExportOptions,
}

impl ReportmlResult {
    /// Render the interactive tree with default visitor and telemetry.
    pub fn render(&self) -> RenderTree {
        render::render_interactive(Some(&self.document), &self.render_options)
    }

    /// Render the interactive tree with a custom visitor and telemetry sink.
    pub fn render_with(
        &self,
        visitor: &mut dyn NodeVisitor,
        telemetry: &dyn Telemetry,
    ) -> RenderTree {
        render::InteractiveRenderer::with_options(self.render_options.clone()).render_with(
            Some(&self.document),
            visitor,
            telemetry,
        )
    }

    /// Export as a self-contained HTML artifact.
    pub fn to_html(&self) -> String {
        render::export_html(&self.document, &self.export_options)
    }

    /// Serialize the document as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Build the timestamped export filename for this report.
    pub fn export_filename(&self) -> String {
        render::export_filename(&self.export_options, chrono::Local::now())
    }

    /// Get plain text of the whole document.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the parsed document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_attaches_side_data() {
        let result = Reportml::new()
            .with_personas(vec![Persona {
                name: "Operator".to_string(),
                description: "runs the day-to-day".to_string(),
                share: Some(0.6),
            }])
            .parse("# Summary\ntext");

        assert_eq!(result.document().personas.len(), 1);
    }

    #[test]
    fn test_builder_chained() {
        let builder = Reportml::new()
            .with_product("Acme")
            .with_preview_chars(200)
            .sequential();

        assert_eq!(builder.export_options.product, "Acme");
        assert_eq!(builder.render_options.preview_chars, 200);
        assert!(!builder.parse_options.parallel);
    }

    #[test]
    fn test_parse_report_total_on_garbage() {
        let doc = parse_report("||| broken | table\n```unclosed\nstuff");
        assert_eq!(doc.section_count(), 1);
        assert!(!doc.sections[0].blocks.is_empty());
    }

    #[test]
    fn test_parse_settled_gate() {
        assert!(parse_settled("# A\nx", true).is_none());
        assert!(parse_settled("# A\nx", false).is_some());
    }

    #[test]
    fn test_report_to_html_one_step() {
        let html = report_to_html("# Key Findings\n- first finding here");
        assert!(html.contains("Key Findings"));
        assert!(html.contains("<li>"));
    }

    #[test]
    fn test_result_render_tree() {
        let result = Reportml::new().parse("# Summary\nhealthy");
        let tree = result.render();
        assert!(tree.as_report().is_some());
    }

    #[test]
    fn test_json_format_variants() {
        let result = Reportml::new().parse("# Summary\ntext");
        assert!(result.to_json(JsonFormat::Pretty).is_ok());
        assert!(result.to_json(JsonFormat::Compact).is_ok());
    }
}
