//! Integration tests for the full parse pipeline.

use reportml::parser::{SanitizeOptions, SanitizePipeline, TRUNCATION_MARKER};
use reportml::{parse_report, parse_report_with_options, Block, ParseOptions, SectionKind};

#[test]
fn test_sanitize_is_idempotent() {
    let pipeline = SanitizePipeline::new(SanitizeOptions::default());
    let samples = [
        "# Title\r\nSome text.  - bullet one\n- bullet two",
        "Decision made: 1. ship it 2. measure",
        "plain text with no structure at all",
        "café résumé naïve \u{0007} control chars",
    ];
    for sample in samples {
        let once = pipeline.process(sample);
        let twice = pipeline.process(&once);
        assert_eq!(once, twice, "sanitizer not idempotent for {sample:?}");
    }
}

#[test]
fn test_truncation_is_idempotent_and_bounded() {
    let options = SanitizeOptions::default().with_max_chars(100);
    let pipeline = SanitizePipeline::new(options);
    let long = "a".repeat(500);

    let once = pipeline.process(&long);
    let twice = pipeline.process(&once);

    assert!(once.ends_with(TRUNCATION_MARKER));
    assert_eq!(once, twice);
    assert_eq!(once.chars().count(), 100 + TRUNCATION_MARKER.chars().count());
}

#[test]
fn test_parsing_is_total_on_garbage() {
    let inputs = [
        "",
        "|||||",
        "| lonely table line",
        "```\nunclosed fence forever",
        "> > > > > quotes",
        "**unclosed bold and *stray italics",
        "# \n# \n# ",
    ];
    for input in inputs {
        // Must never panic and never produce an error; totality is the contract.
        let _ = parse_report(input);
    }
}

#[test]
fn test_section_order_preserved() {
    let doc = parse_report("# Zebra\nz\n# Alpha\na\n# Mango\nm");
    let titles: Vec<_> = doc
        .sections
        .iter()
        .map(|s| s.title.clone().unwrap_or_default())
        .collect();
    assert_eq!(titles, vec!["Zebra", "Alpha", "Mango"]);
}

#[test]
fn test_separator_rows_never_become_data() {
    let doc = parse_report(
        "# Status\n| Area | Health |\n| --- | --- |\n| Growth | Good |\n| --- | --- |\n| Churn | Bad |",
    );
    let table = doc.sections[0]
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
        .expect("expected a table");

    assert_eq!(table.row_count(), 2);
    for row in &table.rows {
        for cell in row {
            assert!(!cell.plain_text().contains("---"));
        }
    }
}

#[test]
fn test_single_line_table_falls_back_to_literal() {
    let doc = parse_report("# Data\n| just | one | line |");
    assert!(doc.sections[0].blocks.iter().all(|b| !b.is_table()));
    assert!(doc.sections[0]
        .blocks
        .iter()
        .any(|b| b.plain_text().contains("just")));
}

#[test]
fn test_classification_is_total() {
    let doc = parse_report("# Weird Unmatched Heading\nbody text here");
    assert_eq!(doc.sections[0].kind, SectionKind::Generic);
}

#[test]
fn test_classification_by_title_and_body() {
    let doc = parse_report(
        "# The Roast & The Gold\nbrutal truths\n# Untitled Analysis\nThis deep dive covers pricing tiers.",
    );
    assert_eq!(doc.sections[0].kind, SectionKind::RoastAndGold);
    assert_eq!(doc.sections[1].kind, SectionKind::DeepDive);
}

#[test]
fn test_fenced_headings_do_not_split_sections() {
    let doc = parse_report("# Code Sample\n```\n# not a heading\n```\nafter");
    assert_eq!(doc.section_count(), 1);
    assert!(doc.sections[0].blocks.iter().any(|b| matches!(
        b,
        Block::CodeBlock { text, .. } if text.contains("# not a heading")
    )));
}

#[test]
fn test_long_paragraph_is_split() {
    let sentence = "This sentence talks about the product direction in some detail. ";
    let long = sentence.repeat(8);
    let doc = parse_report(&format!("# Summary\n{long}"));

    let paragraphs = doc.sections[0]
        .blocks
        .iter()
        .filter(|b| matches!(b, Block::Paragraph { .. }))
        .count();
    assert!(paragraphs > 1, "expected the long paragraph to be split");
}

#[test]
fn test_nested_list_structure() {
    let doc = parse_report("# Plan\n- top level item\n  - nested child\n- second top item");
    let list = doc.sections[0]
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::List(l) => Some(l),
            _ => None,
        })
        .expect("expected a list");

    assert_eq!(list.items.len(), 2);
    assert!(list.items[0].nested.is_some());
    assert!(list.items[1].nested.is_none());
}

#[test]
fn test_list_opening_with_indented_item_loses_nothing() {
    let doc = parse_report("# Plan\n  - indented child first\n- top level after");
    let list = doc.sections[0]
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::List(l) => Some(l),
            _ => None,
        })
        .expect("expected a list");

    assert_eq!(list.items.len(), 2);
    let text = doc.sections[0]
        .blocks
        .iter()
        .map(|b| b.plain_text())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(text.contains("indented child first"));
    assert!(text.contains("top level after"));
}

#[test]
fn test_overbold_cells_are_stripped() {
    let doc = parse_report(
        "# Status\n| Metric | Note |\n| --- | --- |\n| **Churn** | **everything here is bold text** |",
    );
    let table = doc.sections[0]
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
        .expect("expected a table");

    let cell = &table.rows[0][1];
    for block in &cell.blocks {
        if let Block::Paragraph { runs } = block {
            assert!(runs.iter().all(|r| !r.is_bold()), "over-bold cell kept bold");
        }
    }
}

#[test]
fn test_parallel_output_matches_sequential() {
    let input = "\
# Executive Summary
| Area | Status |
| --- | --- |
| Growth | On Track |
# Key Findings
- finding one with detail
- finding two with detail
# Transcript
> Speaker one said a thing.
> Speaker two replied.";

    let seq = parse_report(input);
    let par = parse_report_with_options(input, ParseOptions::new().parallel());

    assert_eq!(seq.section_count(), par.section_count());
    for (a, b) in seq.sections.iter().zip(par.sections.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.blocks, b.blocks);
    }
}

#[test]
fn test_title_usability_cap() {
    let long_title = "An Extremely Long Section Title That Goes Well Past The Fifty Character Cap";
    let doc = parse_report(&format!("# {long_title}\nbody"));
    assert!(doc.sections[0].title.is_none());
}

#[test]
fn test_preamble_before_first_heading() {
    let doc = parse_report("intro text before any heading\n# First Section\nbody");
    assert_eq!(doc.section_count(), 2);
    assert!(doc.sections[0].title.is_none());
    assert_eq!(doc.sections[1].title.as_deref(), Some("First Section"));
}
