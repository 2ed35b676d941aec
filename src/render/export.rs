//! Static HTML export.
//!
//! Produces a single self-contained artifact: all styling is inlined in one
//! `<style>` element, no scripts, no external references. The artifact is
//! meant to be saved to disk and opened anywhere.

use chrono::{DateTime, Local};

use crate::model::{Block, Document, Inline, List, Section, Table, TableCell};

use super::options::ExportOptions;

const STYLE: &str = "\
body{font-family:-apple-system,'Segoe UI',Roboto,sans-serif;max-width:860px;margin:0 auto;padding:2rem;color:#1a1a2e;line-height:1.6}\
h1{font-size:1.7rem;border-bottom:2px solid #1a1a2e;padding-bottom:.4rem}\
h2{font-size:1.25rem;margin-top:2rem}\
h3{font-size:1.05rem}\
section{margin-bottom:1.5rem}\
.kind{display:inline-block;font-size:.7rem;text-transform:uppercase;letter-spacing:.08em;color:#666;margin-bottom:.3rem}\
table{border-collapse:collapse;width:100%;margin:1rem 0}\
th,td{border:1px solid #ccc;padding:.45rem .6rem;text-align:left;vertical-align:top}\
th{background:#f4f4f6}\
blockquote{border-left:3px solid #ccc;margin:.8rem 0;padding:.2rem 1rem;color:#555}\
pre{background:#f4f4f6;padding:.8rem;overflow-x:auto;border-radius:4px}\
code{font-family:ui-monospace,'SF Mono',Menlo,monospace;font-size:.9em}\
hr{border:0;border-top:1px solid #ddd;margin:1.5rem 0}\
.notice{background:#fff6e0;border:1px solid #e6c96a;padding:.6rem 1rem;border-radius:4px;font-size:.9rem}\
.side{background:#f8f8fa;border:1px solid #e2e2e8;border-radius:6px;padding:1rem;margin-top:2rem}\
footer{margin-top:2.5rem;font-size:.8rem;color:#888}";

/// Exports a document as a self-contained HTML artifact.
pub struct HtmlExporter {
    options: ExportOptions,
}

impl HtmlExporter {
    /// Create an exporter with default options.
    pub fn new() -> Self {
        Self::with_options(ExportOptions::default())
    }

    /// Create an exporter with custom options.
    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Render the document into one HTML string.
    pub fn export(&self, document: &Document) -> String {
        let title = format!("{} Board Report", self.options.product);
        let mut out = String::with_capacity(4096 + document.source_len);

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape(&title)));
        out.push_str(&format!("<style>{STYLE}</style>\n"));
        out.push_str("</head>\n<body>\n");

        out.push_str(&format!("<h1>{}</h1>\n", escape(&title)));
        if document.truncated {
            out.push_str(
                "<p class=\"notice\">Source content was truncated before parsing.</p>\n",
            );
        }

        for section in &document.sections {
            self.write_section(&mut out, section);
        }

        if self.options.include_side_data {
            self.write_side_data(&mut out, document);
        }

        out.push_str(&format!(
            "<footer>Generated {}</footer>\n",
            Local::now().format("%Y-%m-%d %H:%M")
        ));
        out.push_str("</body>\n</html>\n");
        out
    }

    fn write_section(&self, out: &mut String, section: &Section) {
        out.push_str(&format!("<section id=\"{}\">\n", escape_attr(&section.id)));
        out.push_str(&format!(
            "<span class=\"kind\">{}</span>\n",
            escape(section.kind.label())
        ));
        if let Some(ref title) = section.title {
            out.push_str(&format!("<h2>{}</h2>\n", escape(title)));
        }
        for block in &section.blocks {
            write_block(out, block);
        }
        out.push_str("</section>\n");
    }

    fn write_side_data(&self, out: &mut String, document: &Document) {
        if let Some(ref roster) = document.roster {
            if !roster.is_empty() {
                out.push_str("<div class=\"side\">\n<h3>Board</h3>\n<table>\n<thead><tr><th>Name</th><th>Role</th><th>Perspective</th></tr></thead>\n<tbody>\n");
                for member in &roster.members {
                    out.push_str(&format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                        escape(&member.name),
                        escape(&member.role),
                        escape(member.perspective.as_deref().unwrap_or("—")),
                    ));
                }
                out.push_str("</tbody>\n</table>\n</div>\n");
            }
        }

        if !document.personas.is_empty() {
            out.push_str("<div class=\"side\">\n<h3>Personas</h3>\n<ul>\n");
            for persona in &document.personas {
                let share = persona
                    .share
                    .map(|s| format!(" ({:.0}%)", s * 100.0))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "<li><strong>{}</strong>{} — {}</li>\n",
                    escape(&persona.name),
                    share,
                    escape(&persona.description),
                ));
            }
            out.push_str("</ul>\n</div>\n");
        }

        if let Some(ref icp) = document.icp {
            out.push_str("<div class=\"side\">\n<h3>Ideal Customer Profile</h3>\n");
            out.push_str(&format!("<p>{}</p>\n", escape(&icp.segment)));
            if !icp.pains.is_empty() {
                out.push_str("<p><strong>Pains</strong></p>\n<ul>\n");
                for pain in &icp.pains {
                    out.push_str(&format!("<li>{}</li>\n", escape(pain)));
                }
                out.push_str("</ul>\n");
            }
            if !icp.gains.is_empty() {
                out.push_str("<p><strong>Gains</strong></p>\n<ul>\n");
                for gain in &icp.gains {
                    out.push_str(&format!("<li>{}</li>\n", escape(gain)));
                }
                out.push_str("</ul>\n");
            }
            out.push_str("</div>\n");
        }
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Export a document as self-contained HTML.
pub fn export_html(document: &Document, options: &ExportOptions) -> String {
    HtmlExporter::with_options(options.clone()).export(document)
}

/// Build the export filename: `<product>_Report_<YYYYMMDD>_<HHMMSS>.<ext>`.
///
/// The product name is reduced to filesystem-safe characters.
pub fn export_filename(options: &ExportOptions, now: DateTime<Local>) -> String {
    let product: String = options
        .product
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!(
        "{}_Report_{}.{}",
        product,
        now.format("%Y%m%d_%H%M%S"),
        options.extension
    )
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading { level, runs } => {
            // Section titles occupy h2, so content headings shift down one.
            let level = (*level + 1).min(6);
            out.push_str(&format!("<h{level}>"));
            write_runs(out, runs);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph { runs } => {
            out.push_str("<p>");
            write_runs(out, runs);
            out.push_str("</p>\n");
        }
        Block::List(list) => write_list(out, list),
        Block::Blockquote { blocks } => {
            out.push_str("<blockquote>\n");
            for inner in blocks {
                write_block(out, inner);
            }
            out.push_str("</blockquote>\n");
        }
        Block::Table(table) => write_table(out, table),
        Block::CodeBlock { language, text } => {
            match language {
                Some(lang) => out.push_str(&format!(
                    "<pre><code class=\"language-{}\">",
                    escape_attr(lang)
                )),
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&escape(text));
            out.push_str("</code></pre>\n");
        }
        Block::Rule => out.push_str("<hr>\n"),
    }
}

fn write_list(out: &mut String, list: &List) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push_str(&format!("<{tag}>\n"));
    for item in &list.items {
        out.push_str("<li>");
        write_runs(out, &item.runs);
        if let Some(ref nested) = item.nested {
            out.push('\n');
            write_list(out, nested);
        }
        out.push_str("</li>\n");
    }
    out.push_str(&format!("</{tag}>\n"));
}

fn write_table(out: &mut String, table: &Table) {
    out.push_str("<table>\n");
    if !table.header.is_empty() {
        out.push_str("<thead>\n<tr>");
        for cell in &table.header {
            out.push_str("<th>");
            write_cell(out, cell);
            out.push_str("</th>");
        }
        out.push_str("</tr>\n</thead>\n");
    }
    out.push_str("<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            write_cell(out, cell);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn write_cell(out: &mut String, cell: &TableCell) {
    // Single paragraph collapses to bare runs to avoid <p> padding in cells.
    if let [Block::Paragraph { runs }] = cell.blocks.as_slice() {
        write_runs(out, runs);
        return;
    }
    for block in &cell.blocks {
        write_block(out, block);
    }
}

fn write_runs(out: &mut String, runs: &[Inline]) {
    for run in runs {
        match run {
            Inline::Text { text, style } => {
                let mut open = String::new();
                let mut close = String::new();
                if style.bold {
                    open.push_str("<strong>");
                    close.insert_str(0, "</strong>");
                }
                if style.italic {
                    open.push_str("<em>");
                    close.insert_str(0, "</em>");
                }
                if style.code {
                    open.push_str("<code>");
                    close.insert_str(0, "</code>");
                }
                out.push_str(&open);
                out.push_str(&escape(text));
                out.push_str(&close);
            }
            Inline::LineBreak => out.push_str("<br>\n"),
            Inline::Link { text, url } => {
                out.push_str(&format!(
                    "<a href=\"{}\">{}</a>",
                    escape_attr(url),
                    escape(text)
                ));
            }
        }
    }
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).to_string()
}

fn escape_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).to_string()
}
