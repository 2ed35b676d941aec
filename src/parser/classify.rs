//! Section classifier: deterministic semantic labels for report sections.
//!
//! Classification is a total function: every section gets a member of the
//! closed [`SectionKind`] enum, with `Generic` as the deterministic fallback.
//! Rules are explicit ordered `(predicate, kind)` lists, first match wins.

use crate::model::SectionKind;

/// Maximum usable title length; anything longer is a symptom of body text
/// leaking into the heading line.
const MAX_TITLE_CHARS: usize = 50;

/// A named classification rule.
struct ClassifyRule {
    name: &'static str,
    applies: fn(&str) -> bool,
    kind: SectionKind,
}

/// Ordered rules applied to a usable title.
const TITLE_RULES: &[ClassifyRule] = &[
    ClassifyRule {
        name: "title-roast-and-gold",
        applies: |t| t.contains("roast") && t.contains("gold"),
        kind: SectionKind::RoastAndGold,
    },
    ClassifyRule {
        name: "title-executive-summary",
        applies: |t| t.contains("executive summary") || t.contains("summary"),
        kind: SectionKind::ExecutiveSummary,
    },
    ClassifyRule {
        name: "title-key-findings",
        applies: |t| t.contains("key research") || t.contains("finding"),
        kind: SectionKind::KeyFindings,
    },
    ClassifyRule {
        name: "title-deep-dive",
        applies: |t| t.contains("deep dive") || t.contains("analysis") || t.contains("pricing"),
        kind: SectionKind::DeepDive,
    },
    ClassifyRule {
        name: "title-transcript",
        applies: |t| t.contains("transcript"),
        kind: SectionKind::Transcript,
    },
];

/// Ordered rules applied to the body when no usable title exists.
const BODY_RULES: &[ClassifyRule] = &[
    ClassifyRule {
        name: "body-status-table",
        applies: |b| is_table_shaped(b) && has_status_wording(b),
        kind: SectionKind::ExecutiveSummary,
    },
    ClassifyRule {
        name: "body-key-findings",
        applies: |b| b.contains("key research") || b.contains("finding"),
        kind: SectionKind::KeyFindings,
    },
    ClassifyRule {
        name: "body-roast-and-gold",
        applies: |b| b.contains("roast") && b.contains("gold"),
        kind: SectionKind::RoastAndGold,
    },
    ClassifyRule {
        name: "body-deep-dive",
        applies: |b| {
            b.contains("deep dive") || b.contains("analysis") || b.contains("pricing tier")
        },
        kind: SectionKind::DeepDive,
    },
    ClassifyRule {
        name: "body-transcript",
        applies: |b| b.contains("transcript"),
        kind: SectionKind::Transcript,
    },
];

/// Assign a semantic label to a section.
///
/// Total and deterministic: the result is a pure function of `(title, body)`.
pub fn classify(raw_title: Option<&str>, body: &str) -> SectionKind {
    if let Some(title) = raw_title.and_then(usable_title) {
        let title = title.to_lowercase();
        for rule in TITLE_RULES {
            if (rule.applies)(&title) {
                log::debug!("classified by rule '{}'", rule.name);
                return rule.kind;
            }
        }
        return SectionKind::Generic;
    }

    let body = body.to_lowercase();
    for rule in BODY_RULES {
        if (rule.applies)(&body) {
            log::debug!("classified by rule '{}'", rule.name);
            return rule.kind;
        }
    }
    SectionKind::Generic
}

/// Strip emphasis markers and trim; reject empty or over-long titles.
pub fn usable_title(raw: &str) -> Option<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '*' | '_' | '`' | '#'))
        .collect();
    let trimmed = stripped.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_TITLE_CHARS {
        return None;
    }
    Some(trimmed.to_string())
}

/// Table-shaped content: at least one line with two or more pipe characters.
fn is_table_shaped(body: &str) -> bool {
    body.lines()
        .any(|l| l.chars().filter(|&c| c == '|').count() >= 2)
}

fn has_status_wording(body: &str) -> bool {
    ["status", "on track", "at risk", "off track", "health"]
        .iter()
        .any(|kw| body.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totality_over_arbitrary_input() {
        let inputs = [
            (None, ""),
            (Some(""), "anything"),
            (Some("???"), "!!!"),
            (None, "\u{0}\u{1}"),
            (Some("A title nobody keyword-matches"), "plain body"),
        ];
        for (title, body) in inputs {
            // classify always returns; Generic is the fallback, never a panic.
            let _ = classify(title, body);
        }
        assert_eq!(classify(Some("Weather"), "rainy"), SectionKind::Generic);
    }

    #[test]
    fn test_title_classification() {
        assert_eq!(
            classify(Some("Executive Summary"), ""),
            SectionKind::ExecutiveSummary
        );
        assert_eq!(
            classify(Some("**Key Findings**"), ""),
            SectionKind::KeyFindings
        );
        assert_eq!(
            classify(Some("The Roast and the Gold"), ""),
            SectionKind::RoastAndGold
        );
        assert_eq!(
            classify(Some("Pricing Deep Dive"), ""),
            SectionKind::DeepDive
        );
        assert_eq!(
            classify(Some("Full Transcript"), ""),
            SectionKind::Transcript
        );
    }

    #[test]
    fn test_roast_rule_precedes_summary() {
        // A title carrying both pairs resolves to the first matching rule.
        assert_eq!(
            classify(Some("Summary of Roast and Gold"), ""),
            SectionKind::RoastAndGold
        );
    }

    #[test]
    fn test_overlong_title_falls_back_to_body() {
        let long_title = "word ".repeat(20);
        assert_eq!(
            classify(Some(&long_title), "the transcript follows"),
            SectionKind::Transcript
        );
    }

    #[test]
    fn test_empty_title_falls_back_to_body() {
        assert_eq!(
            classify(Some("***"), "key research results below"),
            SectionKind::KeyFindings
        );
    }

    #[test]
    fn test_status_table_body() {
        let body = "| Area | Status |\n| Growth | On Track |";
        assert_eq!(classify(None, body), SectionKind::ExecutiveSummary);
    }

    #[test]
    fn test_table_without_status_wording_not_summary() {
        let body = "| a | b |\n| c | d |";
        assert_eq!(classify(None, body), SectionKind::Generic);
    }

    #[test]
    fn test_usable_title() {
        assert_eq!(usable_title("**Bold Title**"), Some("Bold Title".into()));
        assert_eq!(usable_title("   "), None);
        assert_eq!(usable_title(&"x".repeat(51)), None);
        assert_eq!(usable_title(&"x".repeat(50)), Some("x".repeat(50)));
    }
}
