//! Render shaping — decides list vs. paragraph presentation for each section.
//!
//! A section whose first non-empty line carries the normalized `"- "` prefix
//! renders as a list (every non-blank line is an item, prefix stripped).
//! Otherwise the line buffer is regrouped into paragraphs on blank-line
//! boundaries. The segmenter guarantees the shapes this relies on: uniform
//! list prefixes and retained blank separators.

use serde::Serialize;

use crate::segmenter::Section;

/// A section shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSection {
    pub title: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionBody {
    List { items: Vec<String> },
    Paragraphs { paragraphs: Vec<String> },
}

/// Shapes parser output for the response payload, in section order.
pub fn render_sections(sections: &[Section]) -> Vec<RenderedSection> {
    sections
        .iter()
        .map(|section| RenderedSection {
            title: section.title.clone(),
            body: render_body(&section.lines),
        })
        .collect()
}

fn render_body(lines: &[String]) -> SectionBody {
    let first_content = lines.iter().find(|l| !l.is_empty());

    if first_content.is_some_and(|l| l.starts_with("- ")) {
        let items = lines
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.strip_prefix("- ").unwrap_or(l).to_string())
            .collect();
        return SectionBody::List { items };
    }

    // Group consecutive non-blank lines into paragraphs; blanks are the
    // boundaries and empty groups are dropped.
    let mut paragraphs = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    for line in lines {
        if line.is_empty() {
            if !buffer.is_empty() {
                paragraphs.push(buffer.join("\n"));
                buffer.clear();
            }
        } else {
            buffer.push(line);
        }
    }
    if !buffer.is_empty() {
        paragraphs.push(buffer.join("\n"));
    }

    SectionBody::Paragraphs { paragraphs }
}
