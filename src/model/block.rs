//! Block and inline content types.

use serde::{Deserialize, Serialize};

/// A typed structural unit within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading with level 1-6.
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Inline runs of the heading text
        runs: Vec<Inline>,
    },

    /// A paragraph of inline runs.
    Paragraph {
        /// Inline runs
        runs: Vec<Inline>,
    },

    /// An ordered or unordered list.
    List(List),

    /// A blockquote containing nested blocks.
    Blockquote {
        /// Quoted blocks
        blocks: Vec<Block>,
    },

    /// A pipe table.
    Table(Table),

    /// A fenced code block.
    CodeBlock {
        /// Language tag from the opening fence, if any
        language: Option<String>,
        /// Verbatim code text
        text: String,
    },

    /// A horizontal rule.
    Rule,
}

impl Block {
    /// Create a paragraph from plain text (single unstyled run).
    ///
    /// This is the universal fallback: any construct the parser cannot
    /// resolve becomes a literal paragraph, never an error.
    pub fn literal(text: impl Into<String>) -> Self {
        Block::Paragraph {
            runs: vec![Inline::text(text)],
        }
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this block is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Block::List(_))
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } => plain_runs(runs),
            Block::List(list) => list.plain_text(),
            Block::Blockquote { blocks } => blocks
                .iter()
                .map(|b| b.plain_text())
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Table(table) => table.plain_text(),
            Block::CodeBlock { text, .. } => text.clone(),
            Block::Rule => String::new(),
        }
    }
}

/// Join the plain text of a run sequence.
pub(crate) fn plain_runs(runs: &[Inline]) -> String {
    runs.iter()
        .map(|r| match r {
            Inline::Text { text, .. } => text.clone(),
            Inline::LineBreak => "\n".to_string(),
            Inline::Link { text, .. } => text.clone(),
        })
        .collect()
}

/// Inline content within a paragraph, heading, or list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A run of text with consistent styling.
    Text {
        /// The text content
        text: String,
        /// Text styling
        style: TextStyle,
    },

    /// An explicit line break.
    LineBreak,

    /// A hyperlink.
    Link {
        /// Link text
        text: String,
        /// Link URL
        url: String,
    },
}

impl Inline {
    /// Create an unstyled text run.
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Inline::Text {
            text: text.into(),
            style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Inline::Text {
            text: text.into(),
            style: TextStyle {
                italic: true,
                ..Default::default()
            },
        }
    }

    /// Check whether this run carries bold styling.
    pub fn is_bold(&self) -> bool {
        matches!(
            self,
            Inline::Text {
                style: TextStyle { bold: true, .. },
                ..
            }
        )
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Inline code
    pub code: bool,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.code
    }
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Whether the list is numbered
    pub ordered: bool,

    /// List items in source order
    pub items: Vec<ListItem>,
}

impl List {
    /// Create a new empty list.
    pub fn new(ordered: bool) -> Self {
        Self {
            ordered,
            items: Vec::new(),
        }
    }

    /// Check if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get plain text representation, one item per line.
    pub fn plain_text(&self) -> String {
        let mut out = Vec::new();
        for item in &self.items {
            out.push(plain_runs(&item.runs));
            if let Some(ref nested) = item.nested {
                out.push(nested.plain_text());
            }
        }
        out.join("\n")
    }
}

/// A single list item, possibly carrying a nested sub-list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Inline runs of the item text
    pub runs: Vec<Inline>,

    /// Nested sub-list, if any
    pub nested: Option<Box<List>>,
}

impl ListItem {
    /// Create a list item from inline runs.
    pub fn new(runs: Vec<Inline>) -> Self {
        Self { runs, nested: None }
    }

    /// Create a list item from plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Inline::text(text)])
    }
}

/// A table structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Header cells
    pub header: Vec<TableCell>,

    /// Data rows (the markdown separator row is never materialized here)
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            header: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Get the number of columns (based on the header row).
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no header and no rows.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        if !self.header.is_empty() {
            lines.push(row_plain_text(&self.header));
        }
        for row in &self.rows {
            lines.push(row_plain_text(row));
        }
        lines.join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

fn row_plain_text(cells: &[TableCell]) -> String {
    cells
        .iter()
        .map(|c| c.plain_text())
        .collect::<Vec<_>>()
        .join("\t")
}

/// A table cell holding post-processed blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content (paragraphs or a re-parsed nested list)
    pub blocks: Vec<Block>,
}

impl TableCell {
    /// Create a cell with plain text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::literal(text)],
        }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Create a cell with pre-built blocks.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.plain_text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() || self.plain_text().trim().is_empty()
    }
}
