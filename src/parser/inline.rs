//! Inline run parsing: emphasis, bold, code, links, and break markers.
//!
//! Total by construction: any delimiter that never closes is kept as literal
//! text, so no input can fail to parse.

use crate::model::{Inline, TextStyle};

/// Parse inline markup into a run sequence.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    parse_with_style(text, TextStyle::default(), &mut out, 0);
    out
}

/// Maximum emphasis nesting; beyond this, delimiters are literal text.
const MAX_INLINE_DEPTH: u8 = 8;

fn parse_with_style(text: &str, base: TextStyle, out: &mut Vec<Inline>, depth: u8) {
    let bytes = text.as_bytes();
    let mut pending = String::new();
    let mut i = 0;

    let flush = |pending: &mut String, out: &mut Vec<Inline>| {
        if !pending.is_empty() {
            out.push(Inline::Text {
                text: std::mem::take(pending),
                style: base,
            });
        }
    };

    while i < bytes.len() {
        let rest = &text[i..];

        // Explicit break markers embedded by the generator.
        if let Some(len) = break_marker_len(rest) {
            flush(&mut pending, out);
            out.push(Inline::LineBreak);
            i += len;
            continue;
        }

        if depth < MAX_INLINE_DEPTH {
            // Bold before italic so "**" is never read as two "*".
            if let Some(stripped) = rest.strip_prefix("**") {
                if let Some(mut end) = stripped.find("**") {
                    // "***" closing a bold-italic nest: the first star is the
                    // italic close, the bold close starts one later.
                    if stripped.as_bytes().get(end + 2) == Some(&b'*') {
                        end += 1;
                    }
                    if end > 0 {
                        flush(&mut pending, out);
                        let style = TextStyle { bold: true, ..base };
                        parse_with_style(&stripped[..end], style, out, depth + 1);
                        i += 2 + end + 2;
                        continue;
                    }
                }
            }


            // '_' inside an identifier (snake_case_name) is literal; it only
            // opens emphasis after a non-alphanumeric boundary.
            let after_word = text[..i]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
            let underscore = if after_word {
                None
            } else {
                delimited(rest, '_')
            };
            if let Some((inner, len)) = delimited(rest, '*').or(underscore) {
                flush(&mut pending, out);
                let style = TextStyle {
                    italic: true,
                    ..base
                };
                parse_with_style(inner, style, out, depth + 1);
                i += len;
                continue;
            }

            if let Some((inner, len)) = delimited(rest, '`') {
                flush(&mut pending, out);
                out.push(Inline::Text {
                    text: inner.to_string(),
                    style: TextStyle { code: true, ..base },
                });
                i += len;
                continue;
            }

            if rest.starts_with('[') {
                if let Some((link_text, url, len)) = parse_link(rest) {
                    flush(&mut pending, out);
                    out.push(Inline::Link {
                        text: link_text,
                        url,
                    });
                    i += len;
                    continue;
                }
            }
        }

        let ch = rest.chars().next().unwrap_or('\u{FFFD}');
        pending.push(ch);
        i += ch.len_utf8();
    }

    flush(&mut pending, out);
}

/// Match `<br>`, `<br/>`, `<br />` case-insensitively; return marker length.
fn break_marker_len(rest: &str) -> Option<usize> {
    let lower: String = rest.chars().take(7).collect::<String>().to_lowercase();
    for marker in ["<br />", "<br/>", "<br>"] {
        if lower.starts_with(marker) {
            return Some(marker.len());
        }
    }
    None
}

/// Find `<delim>inner<delim>` with non-empty inner that does not start with
/// whitespace (avoids reading "3 * 4 * 5" as emphasis).
fn delimited(rest: &str, delim: char) -> Option<(&str, usize)> {
    let stripped = rest.strip_prefix(delim)?;
    if stripped.starts_with(delim) || stripped.starts_with(char::is_whitespace) {
        return None;
    }
    let end = stripped.find(delim)?;
    if end == 0 || stripped[..end].ends_with(char::is_whitespace) {
        return None;
    }
    Some((&stripped[..end], 1 + end + 1))
}

/// Parse `[text](url)`; returns (text, url, consumed length).
fn parse_link(rest: &str) -> Option<(String, String, usize)> {
    let close = rest.find("](")?;
    let text = &rest[1..close];
    if text.contains('[') || text.contains('\n') {
        return None;
    }
    let after = &rest[close + 2..];
    let end = after.find(')')?;
    let url = &after[..end];
    if url.contains('\n') {
        return None;
    }
    Some((text.to_string(), url.to_string(), close + 2 + end + 1))
}

/// Fraction of text characters carrying bold styling, 0.0 when empty.
pub fn bold_ratio(runs: &[Inline]) -> f32 {
    let mut bold = 0usize;
    let mut total = 0usize;
    for run in runs {
        if let Inline::Text { text, style } = run {
            let n = text.chars().count();
            total += n;
            if style.bold {
                bold += n;
            }
        }
    }
    if total == 0 {
        0.0
    } else {
        bold as f32 / total as f32
    }
}

/// Drop all emphasis styling, keeping text, links, and breaks.
pub fn strip_styles(runs: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::new();
    for run in runs {
        match run {
            Inline::Text { text, .. } => {
                // Merge adjacent unstyled runs so stripping is seamless.
                if let Some(Inline::Text {
                    text: prev,
                    style: TextStyle { bold: false, italic: false, code: false },
                }) = out.last_mut()
                {
                    prev.push_str(&text);
                } else {
                    out.push(Inline::text(text));
                }
            }
            other => out.push(other),
        }
    }
    out
}
