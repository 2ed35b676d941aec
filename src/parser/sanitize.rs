//! Content sanitizer: idempotent normalization of malformed report text.
//!
//! LLM-generated reports routinely carry inline list markers glued to the end
//! of a sentence, list blocks with no preceding blank line, and stray control
//! characters. The sanitizer repairs these as an explicit ordered list of
//! named rewrite rules so each repair is independently unit-testable.
//!
//! The whole pipeline is total and idempotent:
//! `process(process(x)) == process(x)` for any input.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Marker appended when input exceeds the length ceiling.
///
/// Truncation is always visible, never silent.
pub const TRUNCATION_MARKER: &str = "(content truncated)";

/// Options for text sanitization.
#[derive(Debug, Clone)]
pub struct SanitizeOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Strip NUL and C0/C1 control characters (standard whitespace kept)
    pub strip_controls: bool,

    /// Promote mid-paragraph list markers onto their own line
    pub promote_inline_markers: bool,

    /// Insert a missing blank line before a line-initial list marker
    pub pad_list_markers: bool,

    /// Absolute length ceiling in characters (0 = unlimited)
    pub max_chars: usize,
}

impl SanitizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the length ceiling in characters.
    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = max;
        self
    }
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            strip_controls: true,
            promote_inline_markers: true,
            pad_list_markers: true,
            max_chars: 1_000_000,
        }
    }
}

/// A named `(pattern, rewrite)` pair applied in order.
struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    rewrite: &'static str,
}

/// The sanitization pipeline.
pub struct SanitizePipeline {
    options: SanitizeOptions,
    rules: Vec<RewriteRule>,
}

impl SanitizePipeline {
    /// Create a new pipeline with the given options.
    pub fn new(options: SanitizeOptions) -> Self {
        Self {
            options,
            rules: vec![
                // "...done. - next point" glued to a sentence: the marker
                // moves onto its own line. Inline whitespace only, so a
                // marker already on a fresh line never rematches.
                RewriteRule {
                    name: "promote-bullet",
                    pattern: Regex::new(r"([.!?:])[ \t]+([-*•]\s)").unwrap(),
                    rewrite: "$1\n$2",
                },
                RewriteRule {
                    name: "promote-number",
                    pattern: Regex::new(r"([.!?:])[ \t]+(\d{1,3}[.)]\s)").unwrap(),
                    rewrite: "$1\n$2",
                },
            ],
        }
    }

    /// Create a pipeline with default options.
    pub fn with_defaults() -> Self {
        Self::new(SanitizeOptions::default())
    }

    /// Process text through the sanitization pipeline.
    pub fn process(&self, text: &str) -> String {
        self.process_tracked(text).0
    }

    /// Process text and report whether the ceiling cut it.
    ///
    /// The flag reflects the emitted text, not the raw input: blank-line
    /// padding can push an under-ceiling input over the ceiling, and control
    /// stripping can pull an over-ceiling input back under it.
    pub fn process_tracked(&self, text: &str) -> (String, bool) {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        // Normalize line endings before control stripping so \r never
        // survives as content.
        result = result.replace("\r\n", "\n").replace('\r', "\n");

        if self.options.strip_controls {
            result = strip_control_chars(&result);
        }

        if self.options.promote_inline_markers {
            for rule in &self.rules {
                let rewritten = rule.pattern.replace_all(&result, rule.rewrite);
                if rewritten != result {
                    log::debug!("sanitize rule '{}' applied", rule.name);
                }
                result = rewritten.into_owned();
            }
        }

        if self.options.pad_list_markers {
            result = pad_list_starts(&result);
        }

        let mut truncated = false;
        if self.options.max_chars > 0 {
            let (capped, cut) = enforce_ceiling(&result, self.options.max_chars);
            result = capped;
            truncated = cut;
        }

        (result, truncated)
    }
}

impl Default for SanitizePipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Strip NUL and C0/C1 control characters, keeping `\n` and `\t`.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

/// Check if a line begins with a bullet or number list marker.
fn is_list_marker_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('*'))
        .or_else(|| trimmed.strip_prefix('•'))
    {
        return rest.starts_with(' ');
    }
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || digits.len() > 3 {
        return false;
    }
    let rest = &trimmed[digits.len()..];
    (rest.starts_with('.') || rest.starts_with(')')) && rest[1..].starts_with(' ')
}

/// Insert the blank line block-markdown grammar requires before a list that
/// directly follows non-blank, non-list content. Fenced code is left alone.
fn pad_list_starts(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in text.split('\n') {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push(line);
            continue;
        }
        if !in_fence && is_list_marker_line(line) {
            if let Some(prev) = out.last() {
                if !prev.trim().is_empty() && !is_list_marker_line(prev) {
                    out.push("");
                }
            }
        }
        out.push(line);
    }

    out.join("\n")
}

fn ends_at_ceiling(text: &str, count: usize, max: usize) -> bool {
    text.ends_with(TRUNCATION_MARKER) && count <= max + TRUNCATION_MARKER.chars().count()
}

/// Truncate at the ceiling with a visible marker. Text that already carries
/// the marker at the ceiling passes through unchanged, keeping the pipeline
/// idempotent.
fn enforce_ceiling(text: &str, max: usize) -> (String, bool) {
    let count = text.chars().count();
    if count <= max || ends_at_ceiling(text, count, max) {
        return (text.to_string(), false);
    }

    log::warn!("input of {} chars truncated at ceiling {}", count, max);
    let mut result: String = text.chars().take(max).collect();
    result.push_str(TRUNCATION_MARKER);
    (result, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(text: &str) -> String {
        SanitizePipeline::with_defaults().process(text)
    }

    #[test]
    fn test_idempotent_on_messy_input() {
        let samples = [
            "Plain paragraph.",
            "Summary done. - first point follows",
            "Intro line\n- item one\n- item two",
            "A sentence. 1. numbered item",
            "nul\u{0000}byte and \u{009B}c1 control",
            "",
        ];
        for s in samples {
            let once = sanitize(s);
            let twice = sanitize(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_strips_control_chars() {
        let result = sanitize("a\u{0000}b\u{0007}c\u{009F}d");
        assert_eq!(result, "abcd");
    }

    #[test]
    fn test_keeps_standard_whitespace() {
        let result = sanitize("a\tb\nc");
        assert_eq!(result, "a\tb\nc");
    }

    #[test]
    fn test_promotes_mid_paragraph_bullet() {
        let result = sanitize("The quarter closed strong. - Revenue up 20%");
        assert!(
            result.contains("strong.\n"),
            "bullet not promoted: {:?}",
            result
        );
        assert!(result.contains("- Revenue up 20%"));
    }

    #[test]
    fn test_promotes_mid_paragraph_number() {
        let result = sanitize("Three risks stand out: 1. churn is rising");
        assert!(result.contains("\n1. churn"), "got: {:?}", result);
        assert!(!result.contains(": 1."));
    }

    #[test]
    fn test_leaves_fresh_line_marker_alone() {
        let input = "Heading done.\n- already on its own line";
        assert_eq!(sanitize(input), "Heading done.\n\n- already on its own line");
    }

    #[test]
    fn test_bold_asterisks_not_treated_as_marker() {
        let input = "Done. **Bold lead** continues.";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_blank_line_inserted_before_list() {
        let result = sanitize("Intro text\n- item");
        assert_eq!(result, "Intro text\n\n- item");
    }

    #[test]
    fn test_no_blank_line_between_items() {
        let input = "- one\n- two\n- three";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_fenced_code_untouched() {
        let input = "```\ncode line\n- not a list\n```";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_truncation_length_and_marker() {
        let pipeline = SanitizePipeline::new(SanitizeOptions::new().with_max_chars(100));
        let input = "x".repeat(250);
        let result = pipeline.process(&input);
        assert_eq!(
            result.chars().count(),
            100 + TRUNCATION_MARKER.chars().count()
        );
        assert!(result.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncation_idempotent() {
        let pipeline = SanitizePipeline::new(SanitizeOptions::new().with_max_chars(100));
        let once = pipeline.process(&"y".repeat(500));
        let twice = pipeline.process(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_under_ceiling_untouched() {
        let pipeline = SanitizePipeline::new(SanitizeOptions::new().with_max_chars(100));
        let (result, truncated) = pipeline.process_tracked("short text");
        assert_eq!(result, "short text");
        assert!(!truncated);
    }

    #[test]
    fn test_padding_over_ceiling_sets_flag() {
        let pipeline = SanitizePipeline::new(SanitizeOptions::new().with_max_chars(100));
        // Exactly 100 raw chars; the inserted blank line pushes it to 101.
        let input = format!("{}\n- item", "x".repeat(93));
        assert_eq!(input.chars().count(), 100);

        let (result, truncated) = pipeline.process_tracked(&input);
        assert!(truncated);
        assert!(result.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_stripping_under_ceiling_leaves_flag_clear() {
        let pipeline = SanitizePipeline::new(SanitizeOptions::new().with_max_chars(10));
        // 15 raw chars, 10 once the NULs are stripped: nothing to cut.
        let input = format!("abcdefghij{}", "\u{0}".repeat(5));

        let (result, truncated) = pipeline.process_tracked(&input);
        assert!(!truncated);
        assert_eq!(result, "abcdefghij");
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(sanitize("a\r\nb\rc"), "a\nb\nc");
    }
}
