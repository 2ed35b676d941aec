//! Section segmenter: splits sanitized text on H1-equivalent headings.

/// An unparsed top-level section produced by [`segment`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    /// Raw title text after the `# ` marker, if the section had one
    pub title: Option<String>,

    /// Body text between this heading and the next split point
    pub body: String,
}

impl RawSection {
    /// Create a section with no title line.
    pub fn untitled(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
        }
    }
}

/// Split sanitized text into ordered top-level sections.
///
/// Only `# ` at line start splits; deeper headings (`##` and below) never do.
/// Heading lines inside fenced code are ignored. Content is never dropped:
/// text with no split point becomes a single untitled section, and text
/// preceding the first heading is kept as an untitled preamble section.
/// Whitespace-only input produces an empty vec; the caller shows an explicit
/// "no content" state instead of a blank screen.
pub fn segment(text: &str) -> Vec<RawSection> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sections: Vec<RawSection> = Vec::new();
    let mut current_title: Option<String> = None;
    let mut current_body: Vec<&str> = Vec::new();
    let mut seen_heading = false;
    let mut in_fence = false;

    let flush = |title: Option<String>, body: &mut Vec<&str>, sections: &mut Vec<RawSection>| {
        let body_text = body.join("\n");
        body.clear();
        // An untitled preamble that is pure whitespace carries nothing.
        if title.is_none() && body_text.trim().is_empty() {
            return;
        }
        sections.push(RawSection {
            title,
            body: body_text,
        });
    };

    for line in text.split('\n') {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            current_body.push(line);
            continue;
        }

        if !in_fence && is_h1_line(line) {
            if seen_heading || !current_body.iter().all(|l| l.trim().is_empty()) {
                flush(current_title.take(), &mut current_body, &mut sections);
            } else {
                current_body.clear();
            }
            current_title = Some(line[2..].trim().to_string());
            seen_heading = true;
            continue;
        }

        current_body.push(line);
    }

    flush(current_title, &mut current_body, &mut sections);

    log::debug!("segmented input into {} sections", sections.len());
    sections
}

/// A split point is exactly `# ` at line start. Deeper headings never split.
fn is_h1_line(line: &str) -> bool {
    line.starts_with("# ") && !line.starts_with("## ")
}
