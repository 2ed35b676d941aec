//! Table-cell post-processor.
//!
//! LLM-generated tables routinely pack whole lists, `<br>` runs, and
//! wall-to-wall bold into a single cell. This pass re-interprets such cell
//! text into proper nested blocks. The visual heuristics (over-bold
//! stripping, lead-word bolding) are product policy, so their thresholds
//! live in [`CellPolicy`] rather than being hard-coded.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Block, Inline, List, ListItem};

use super::blocks::list_marker;
use super::inline::{bold_ratio, parse_inline, strip_styles};

/// Configurable policy for cell-level visual heuristics.
#[derive(Debug, Clone)]
pub struct CellPolicy {
    /// Strip all emphasis when the bold ratio exceeds the threshold
    pub strip_overbold: bool,

    /// Bold-character ratio above which a cell counts as over-bolded
    pub overbold_max_ratio: f32,

    /// Bold the leading words of list items that carry no explicit bold
    pub lead_bold: bool,

    /// Maximum characters of the bolded lead run
    pub lead_bold_max_chars: usize,

    /// Minimum words an item needs before lead-bolding applies
    pub lead_bold_min_words: usize,
}

impl CellPolicy {
    /// Create a policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the over-bold ratio threshold.
    pub fn with_overbold_ratio(mut self, ratio: f32) -> Self {
        self.overbold_max_ratio = ratio;
        self
    }

    /// Disable the lead-bold heuristic.
    pub fn without_lead_bold(mut self) -> Self {
        self.lead_bold = false;
        self
    }
}

impl Default for CellPolicy {
    fn default() -> Self {
        Self {
            strip_overbold: true,
            overbold_max_ratio: 0.5,
            lead_bold: true,
            lead_bold_max_chars: 30,
            lead_bold_min_words: 3,
        }
    }
}

/// Re-interpret raw cell text as a block sequence.
pub fn process_cell(raw: &str, policy: &CellPolicy) -> Vec<Block> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let overbold =
        policy.strip_overbold && bold_ratio(&parse_inline(raw)) > policy.overbold_max_ratio;

    let lines = split_on_breaks(raw);
    if !lines.iter().any(|l| list_marker(l).is_some()) {
        // Plain cell: one paragraph; break markers become explicit breaks.
        let mut runs = parse_inline(raw);
        if overbold {
            runs = strip_styles(runs);
        }
        return vec![Block::Paragraph { runs }];
    }

    // Mixed cell: marker lines form a list, the rest form paragraphs.
    let mut blocks = Vec::new();
    let mut pending_list: Option<List> = None;

    for line in &lines {
        if let Some((_, ordered, content)) = list_marker(line) {
            let mut runs = parse_inline(content);
            if overbold {
                runs = strip_styles(runs);
            } else if policy.lead_bold {
                runs = apply_lead_bold(runs, policy);
            }
            pending_list
                .get_or_insert_with(|| List::new(ordered))
                .items
                .push(ListItem::new(runs));
        } else {
            if let Some(list) = pending_list.take() {
                blocks.push(Block::List(list));
            }
            if !line.trim().is_empty() {
                let mut runs = parse_inline(line.trim());
                if overbold {
                    runs = strip_styles(runs);
                }
                blocks.push(Block::Paragraph { runs });
            }
        }
    }
    if let Some(list) = pending_list {
        blocks.push(Block::List(list));
    }

    blocks
}

/// Split cell text on `<br>`-style markers and real newlines.
fn split_on_breaks(raw: &str) -> Vec<String> {
    static BREAK_RE: OnceLock<Regex> = OnceLock::new();
    let re = BREAK_RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?\s*>|\n").unwrap());
    re.split(raw).map(|s| s.to_string()).collect()
}

/// Bold the leading word run of an item that carries no explicit bold.
///
/// The lead is capped at `lead_bold_max_chars`, breaking only at word
/// boundaries; an item below `lead_bold_min_words` is left alone.
fn apply_lead_bold(runs: Vec<Inline>, policy: &CellPolicy) -> Vec<Inline> {
    if runs.iter().any(Inline::is_bold) {
        return runs;
    }

    let word_count: usize = runs
        .iter()
        .map(|r| match r {
            Inline::Text { text, .. } => text.split_whitespace().count(),
            _ => 0,
        })
        .sum();
    if word_count < policy.lead_bold_min_words {
        return runs;
    }

    let Some(Inline::Text { text, style }) = runs.first() else {
        return runs;
    };
    if style.has_styling() {
        return runs;
    }

    let Some(split_at) = lead_boundary(text, policy.lead_bold_max_chars) else {
        return runs;
    };

    let (lead, rest) = text.split_at(split_at);
    let mut out = vec![Inline::bold(lead)];
    if !rest.is_empty() {
        out.push(Inline::text(rest));
    }
    out.extend(runs.into_iter().skip(1));
    out
}

/// Byte offset of the last word boundary within `max_chars` characters.
/// None when even the first word exceeds the cap.
fn lead_boundary(text: &str, max_chars: usize) -> Option<usize> {
    let mut boundary = None;
    let mut chars_seen = 0;
    let mut in_word = false;

    for (offset, c) in text.char_indices() {
        if chars_seen > max_chars {
            break;
        }
        if c.is_whitespace() {
            if in_word {
                boundary = Some(offset);
            }
            in_word = false;
        } else {
            in_word = true;
        }
        chars_seen += 1;
    }

    // The whole text fits: bold it all.
    if in_word && text.chars().count() <= max_chars {
        return Some(text.len());
    }
    boundary
}
