//! Rendering: the interactive tree with fault boundaries, the static HTML
//! exporter, and JSON serialization.

mod export;
mod interactive;
mod json;
mod options;
mod telemetry;
mod visitor;

pub use export::{export_filename, export_html, HtmlExporter};
pub use interactive::{
    render_interactive, CellView, InteractiveRenderer, RenderItem, RenderNode, RenderStats,
    RenderTree, ReportView, SectionBody, SectionView,
};
pub use json::{to_json, tree_to_json, JsonFormat};
pub use options::{ExportOptions, RenderOptions};
pub use telemetry::{LogTelemetry, NullTelemetry, Telemetry};
pub use visitor::{
    DefaultVisitor, HeadingClampVisitor, NodeVisitor, SkipCodeVisitor, VisitorAction,
};
