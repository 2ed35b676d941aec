//! Report parser: the full sanitize → segment → classify → parse pipeline.

use rayon::prelude::*;

use crate::model::{Document, Section};

use super::classify::{classify, usable_title};
use super::options::ParseOptions;
use super::sanitize::SanitizePipeline;
use super::segment::{segment, RawSection};
use super::blocks::parse_blocks;

/// Parses raw report text into a [`Document`].
///
/// The pipeline is a pure function of its input: no shared mutable state, so
/// concurrent invocations on distinct inputs are trivially safe. Parsing is
/// total; malformed input degrades to literal blocks, never an error.
pub struct ReportParser {
    options: ParseOptions,
    sanitizer: SanitizePipeline,
}

impl ReportParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        let sanitizer = SanitizePipeline::new(options.sanitize.clone());
        Self { options, sanitizer }
    }

    /// Access the configured options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse raw report text into a fresh document.
    pub fn parse(&self, raw: &str) -> Document {
        let (clean, truncated) = self.sanitizer.process_tracked(raw);
        let raws = segment(&clean);

        let sections: Vec<Section> = if self.options.parallel {
            raws.par_iter()
                .enumerate()
                .map(|(i, rs)| self.build_section(i, rs))
                .collect()
        } else {
            raws.iter()
                .enumerate()
                .map(|(i, rs)| self.build_section(i, rs))
                .collect()
        };

        log::debug!(
            "parsed report: {} chars, {} sections, truncated={}",
            clean.chars().count(),
            sections.len(),
            truncated
        );

        Document {
            sections,
            roster: None,
            personas: Vec::new(),
            icp: None,
            source_len: clean.chars().count(),
            truncated,
        }
    }

    /// Parse only when the source has settled.
    ///
    /// The segmenter must not run mid-stream; this is the pipeline's only
    /// suspension point. Each settle produces a brand-new document, with no
    /// incremental diffing.
    pub fn parse_settled(&self, raw: &str, is_streaming: bool) -> Option<Document> {
        if is_streaming {
            return None;
        }
        Some(self.parse(raw))
    }

    fn build_section(&self, index: usize, raw: &RawSection) -> Section {
        let kind = classify(raw.title.as_deref(), &raw.body);
        Section {
            id: format!("section-{}", index + 1),
            title: raw.title.as_deref().and_then(usable_title),
            kind,
            blocks: parse_blocks(&raw.body, &self.options),
            raw: raw.body.clone(),
        }
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::sanitize::{SanitizeOptions, TRUNCATION_MARKER};
    use crate::model::SectionKind;

    #[test]
    fn test_full_pipeline() {
        let parser = ReportParser::new();
        let doc = parser.parse("# Executive Summary\n| Area | Status |\n| --- | --- |\n| Growth | On Track |\n# Key Findings\n- finding one here\n- finding two here");

        assert_eq!(doc.section_count(), 2);
        assert_eq!(doc.sections[0].kind, SectionKind::ExecutiveSummary);
        assert_eq!(doc.sections[1].kind, SectionKind::KeyFindings);
        assert!(doc.sections[0].blocks.iter().any(|b| b.is_table()));
    }

    #[test]
    fn test_streaming_gate() {
        let parser = ReportParser::new();
        assert!(parser.parse_settled("# A\nbody", true).is_none());
        let doc = parser.parse_settled("# A\nbody", false).unwrap();
        assert_eq!(doc.section_count(), 1);
    }

    #[test]
    fn test_empty_input_gives_empty_document() {
        let parser = ReportParser::new();
        let doc = parser.parse("   \n  ");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_section_ids_are_stable() {
        let parser = ReportParser::new();
        let doc = parser.parse("# One\na\n# Two\nb");
        assert_eq!(doc.sections[0].id, "section-1");
        assert_eq!(doc.sections[1].id, "section-2");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input = "# A\nalpha text\n# B\n- one\n- two\n# C\n| x | y |\n| --- | --- |\n| 1 | 2 |";
        let seq = ReportParser::new().parse(input);
        let par = ReportParser::with_options(ParseOptions::default().parallel()).parse(input);
        assert_eq!(seq.section_count(), par.section_count());
        for (a, b) in seq.sections.iter().zip(par.sections.iter()) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.blocks, b.blocks);
        }
    }

    #[test]
    fn test_truncated_flag_matches_emitted_text() {
        let options = ParseOptions::default()
            .with_sanitize(SanitizeOptions::new().with_max_chars(100));

        // Blank-line padding pushes this ceiling-length input over the
        // ceiling; the flag must agree with the marker in the output.
        let doc = ReportParser::with_options(options.clone())
            .parse(&format!("# Plan\n{}\n- item", "x".repeat(86)));
        assert!(doc.truncated);
        assert!(doc
            .sections
            .iter()
            .any(|s| s.raw.contains(TRUNCATION_MARKER)));

        // Control stripping pulls this over-ceiling input back under it.
        let doc = ReportParser::with_options(options)
            .parse(&format!("# Plan\n{}", "\u{0}".repeat(200)));
        assert!(!doc.truncated);
    }

    #[test]
    fn test_unusable_title_dropped_but_kind_assigned() {
        let parser = ReportParser::new();
        let long = format!("# {}\ntranscript of the meeting", "t".repeat(60));
        let doc = parser.parse(&long);
        assert!(doc.sections[0].title.is_none());
        assert_eq!(doc.sections[0].kind, SectionKind::Transcript);
    }
}
