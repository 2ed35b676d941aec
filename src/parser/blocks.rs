//! Block grammar parser: section body text into a typed block tree.
//!
//! Total by design: any construct that cannot be resolved becomes a literal
//! paragraph, never an error. Nesting depth is capped to bound stack usage
//! against pathological input.

use crate::model::{Block, List, ListItem, Table, TableCell};

use super::cell::process_cell;
use super::inline::parse_inline;
use super::options::ParseOptions;

/// Parse a section body into a block tree.
pub fn parse_blocks(body: &str, options: &ParseOptions) -> Vec<Block> {
    let lines: Vec<&str> = body.split('\n').collect();
    parse_lines(&lines, options, 0)
}

fn parse_lines(lines: &[&str], options: &ParseOptions, depth: u8) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if trimmed.is_empty() {
            i += 1;
            continue;
        }

        // Fenced code. An unclosed fence swallows the rest of the section
        // rather than erroring.
        if let Some(fence_rest) = trimmed.strip_prefix("```") {
            let language = match fence_rest.trim() {
                "" => None,
                lang => Some(lang.to_string()),
            };
            let mut code = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim().starts_with("```") {
                code.push(lines[i]);
                i += 1;
            }
            i += 1; // closing fence, if present
            blocks.push(Block::CodeBlock {
                language,
                text: code.join("\n"),
            });
            continue;
        }

        if let Some((level, text)) = heading_line(trimmed) {
            blocks.push(Block::Heading {
                level,
                runs: parse_inline(text),
            });
            i += 1;
            continue;
        }

        if is_rule_line(trimmed) {
            blocks.push(Block::Rule);
            i += 1;
            continue;
        }

        if trimmed.starts_with('>') {
            let start = i;
            while i < lines.len() && lines[i].trim_start().starts_with('>') {
                i += 1;
            }
            blocks.push(parse_blockquote(&lines[start..i], options, depth));
            continue;
        }

        if is_table_line(trimmed) {
            let start = i;
            while i < lines.len() && is_table_line(lines[i].trim()) {
                i += 1;
            }
            blocks.extend(parse_table(&lines[start..i], options));
            continue;
        }

        if list_marker(line).is_some() {
            let start = i;
            while i < lines.len() && list_marker(lines[i]).is_some() {
                i += 1;
            }
            blocks.push(parse_list(&lines[start..i], options, depth));
            continue;
        }

        // Paragraph: consecutive plain lines soft-wrapped with spaces.
        let start = i;
        while i < lines.len() && is_paragraph_line(lines[i]) {
            i += 1;
        }
        let text = lines[start..i]
            .iter()
            .map(|l| l.trim())
            .collect::<Vec<_>>()
            .join(" ");
        for chunk in split_long_paragraph(&text, options) {
            blocks.push(Block::Paragraph {
                runs: parse_inline(&chunk),
            });
        }
    }

    blocks
}

fn heading_line(trimmed: &str) -> Option<(u8, &str)> {
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &trimmed[hashes..];
    rest.strip_prefix(' ')
        .map(|text| (hashes as u8, text.trim()))
}

fn is_rule_line(trimmed: &str) -> bool {
    trimmed.len() >= 3
        && (trimmed.chars().all(|c| c == '-')
            || trimmed.chars().all(|c| c == '*')
            || trimmed.chars().all(|c| c == '_'))
}

fn is_table_line(trimmed: &str) -> bool {
    trimmed.starts_with('|') && trimmed.chars().filter(|&c| c == '|').count() >= 2
}

fn is_paragraph_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && !trimmed.starts_with("```")
        && heading_line(trimmed).is_none()
        && !is_rule_line(trimmed)
        && !trimmed.starts_with('>')
        && !is_table_line(trimmed)
        && list_marker(line).is_none()
}

/// Detect a list marker line; returns (indent columns, ordered, content).
pub(crate) fn list_marker(line: &str) -> Option<(usize, bool, &str)> {
    let indent = line.len() - line.trim_start().len();
    let trimmed = line.trim_start();

    for bullet in ["- ", "* ", "• "] {
        if let Some(content) = trimmed.strip_prefix(bullet) {
            return Some((indent, false, content));
        }
    }

    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && digits <= 3 {
        let rest = &trimmed[digits..];
        if (rest.starts_with(". ") || rest.starts_with(") ")) && rest.len() > 2 {
            return Some((indent, true, rest[2..].trim_start()));
        }
    }
    None
}

fn parse_blockquote(lines: &[&str], options: &ParseOptions, depth: u8) -> Block {
    if depth >= options.max_depth {
        return Block::literal(lines.join("\n"));
    }
    let inner: Vec<&str> = lines
        .iter()
        .map(|l| {
            let t = l.trim_start();
            t.strip_prefix("> ").unwrap_or_else(|| t.strip_prefix('>').unwrap_or(t))
        })
        .collect();
    Block::Blockquote {
        blocks: parse_lines(&inner, options, depth + 1),
    }
}

/// Parse a run of pipe lines into a table.
///
/// The second raw line must be the all-punctuation separator that confirms a
/// table; it is excluded from data rows. Fewer than 2 raw lines, or a missing
/// separator, falls back to literal text instead of being dropped.
fn parse_table(lines: &[&str], options: &ParseOptions) -> Vec<Block> {
    if lines.len() < 2 || !is_separator_row(lines[1]) {
        log::debug!("pipe run of {} lines is not a confirmed table", lines.len());
        return lines
            .iter()
            .map(|l| Block::literal(l.trim()))
            .collect();
    }

    let mut table = Table::new();
    table.header = split_row(lines[0])
        .into_iter()
        .map(|raw| TableCell::with_blocks(process_cell(&raw, &options.cell_policy)))
        .collect();

    for line in &lines[2..] {
        // A stray separator-shaped row further down is never data either.
        if is_separator_row(line) {
            continue;
        }
        let cells: Vec<TableCell> = split_row(line)
            .into_iter()
            .map(|raw| TableCell::with_blocks(process_cell(&raw, &options.cell_policy)))
            .collect();
        table.rows.push(cells);
    }

    vec![Block::Table(table)]
}

/// A separator row contains only `|`, `-`, `:`, and whitespace.
pub(crate) fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

/// Split a pipe row into trimmed cell texts, dropping the outer empties.
fn split_row(line: &str) -> Vec<String> {
    let mut inner = line.trim();
    inner = inner.strip_prefix('|').unwrap_or(inner);
    inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

fn parse_list(lines: &[&str], options: &ParseOptions, depth: u8) -> Block {
    let items: Vec<(usize, bool, String)> = lines
        .iter()
        .filter_map(|l| list_marker(l))
        .map(|(indent, ordered, content)| (indent / 2, ordered, content.to_string()))
        .collect();

    // Seed at the run's shallowest level: a run opening with an over-indented
    // item must not strand later shallower items behind the level check.
    let level = items.iter().map(|(lvl, _, _)| *lvl).min().unwrap_or(0);
    let mut idx = 0;
    Block::List(build_list(&items, level, &mut idx, options, depth))
}

fn build_list(
    items: &[(usize, bool, String)],
    level: usize,
    idx: &mut usize,
    options: &ParseOptions,
    depth: u8,
) -> List {
    let ordered = items.get(*idx).map(|(_, o, _)| *o).unwrap_or(false);
    let mut list = List::new(ordered);

    while *idx < items.len() {
        let (item_level, _, ref content) = items[*idx];

        if item_level < level {
            break;
        }

        if item_level > level {
            // Deeper items nest under the previous item; with no previous
            // item (malformed indentation) they join this level instead.
            if let Some(last) = list.items.last_mut() {
                if depth + 1 < options.max_depth {
                    let sub = build_list(items, item_level, idx, options, depth + 1);
                    match last.nested.as_mut() {
                        // A dedent landing between levels reopens the same
                        // nested list instead of overwriting it.
                        Some(existing) => existing.items.extend(sub.items),
                        None => last.nested = Some(Box::new(sub)),
                    }
                    continue;
                }
            }
            *idx += 1;
            list.items.push(ListItem::new(parse_inline(content)));
            continue;
        }

        *idx += 1;
        list.items.push(ListItem::new(parse_inline(content)));
    }

    list
}

/// Split an over-long paragraph into sub-paragraphs of a few sentences each.
///
/// Applies only above both thresholds; shorter paragraphs pass through whole.
fn split_long_paragraph(text: &str, options: &ParseOptions) -> Vec<String> {
    let sentences = split_sentences(text);
    if sentences.len() <= options.split_min_sentences
        || text.chars().count() <= options.split_min_chars
    {
        return vec![text.to_string()];
    }

    sentences
        .chunks(options.split_chunk_sentences)
        .map(|chunk| chunk.join(" ").trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Sentence boundary: a text run ending in `.`, `!`, or `?`.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let next_is_break = chars.peek().map(|n| n.is_whitespace()).unwrap_or(true);
            if next_is_break {
                sentences.push(current.trim().to_string());
                current.clear();
            }
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}
