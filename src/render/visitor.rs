//! Visitor seam for customizing interactive rendering.
//!
//! A visitor can replace or skip individual nodes without touching the core
//! materialization logic. Visitor failures (errors or panics) are contained
//! by the per-section fault boundary in the interactive renderer.

use crate::error::Result;
use crate::model::{Block, Inline, Section};

use super::interactive::RenderNode;

/// Action returned by visitor methods to control materialization.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Continue with default materialization.
    #[default]
    Continue,

    /// Replace the block with a custom node.
    Replace(RenderNode),

    /// Skip this block entirely.
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the block should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Get the replacement node if available.
    pub fn into_replacement(self) -> Option<RenderNode> {
        match self {
            VisitorAction::Replace(node) => Some(node),
            _ => None,
        }
    }
}

/// Trait for visiting blocks during interactive materialization.
///
/// All methods default to no-op / `Continue`.
pub trait NodeVisitor: Send + Sync {
    /// Called before a section's blocks are materialized.
    ///
    /// Returning an error trips the section's fault boundary: the section
    /// falls back to raw text, siblings are unaffected.
    fn on_section_start(&mut self, section: &Section) -> Result<()> {
        let _ = section;
        Ok(())
    }

    /// Called for every top-level block of a section.
    fn visit_block(&mut self, section: &Section, block: &Block) -> VisitorAction {
        let _ = (section, block);
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl NodeVisitor for DefaultVisitor {}

/// Visitor that clamps heading depth in the materialized tree.
#[derive(Debug, Clone)]
pub struct HeadingClampVisitor {
    max_level: u8,
}

impl HeadingClampVisitor {
    /// Create a visitor limiting headings to the given max level.
    pub fn new(max_level: u8) -> Self {
        Self {
            max_level: max_level.clamp(1, 6),
        }
    }
}

impl NodeVisitor for HeadingClampVisitor {
    fn visit_block(&mut self, _section: &Section, block: &Block) -> VisitorAction {
        match block {
            Block::Heading { level, runs } if *level > self.max_level => {
                VisitorAction::Replace(RenderNode::Heading {
                    level: self.max_level,
                    runs: runs.clone(),
                })
            }
            _ => VisitorAction::Continue,
        }
    }
}

/// Visitor that replaces code blocks with a short notice.
#[derive(Debug, Clone, Default)]
pub struct SkipCodeVisitor;

impl NodeVisitor for SkipCodeVisitor {
    fn visit_block(&mut self, _section: &Section, block: &Block) -> VisitorAction {
        if matches!(block, Block::CodeBlock { .. }) {
            VisitorAction::Replace(RenderNode::Text {
                runs: vec![Inline::italic("(code omitted)")],
            })
        } else {
            VisitorAction::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionKind;

    fn section_with(blocks: Vec<Block>) -> Section {
        Section {
            id: "section-1".to_string(),
            title: None,
            kind: SectionKind::Generic,
            blocks,
            raw: String::new(),
        }
    }

    #[test]
    fn test_default_visitor_continues() {
        let mut visitor = DefaultVisitor::new();
        let section = section_with(vec![Block::literal("x")]);
        let action = visitor.visit_block(&section, &section.blocks[0]);
        assert!(matches!(action, VisitorAction::Continue));
        assert!(visitor.on_section_start(&section).is_ok());
    }

    #[test]
    fn test_heading_clamp() {
        let mut visitor = HeadingClampVisitor::new(2);
        let block = Block::Heading {
            level: 5,
            runs: vec![Inline::text("deep")],
        };
        let section = section_with(vec![block.clone()]);
        let action = visitor.visit_block(&section, &block);
        let Some(RenderNode::Heading { level, .. }) = action.into_replacement() else {
            panic!("expected replacement heading");
        };
        assert_eq!(level, 2);
    }

    #[test]
    fn test_skip_code_visitor() {
        let mut visitor = SkipCodeVisitor;
        let block = Block::CodeBlock {
            language: None,
            text: "secret".to_string(),
        };
        let section = section_with(vec![block.clone()]);
        let action = visitor.visit_block(&section, &block);
        assert!(action.into_replacement().is_some());
    }
}
