//! Resume text segmentation — turns the generated free-text resume into an
//! ordered sequence of titled sections for structured rendering.
//!
//! The upstream model usually returns plain prose with heading lines, but it
//! sometimes wraps the answer in a JSON object or array instead. `segment`
//! handles both shapes and never fails: malformed JSON silently falls back to
//! the plain-text parser, and any other input produces a best-effort result.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// All-caps short-line heading shape. Permits digits and hyphens without
/// mandating letters, so a numeric-only line like "2023 2024" matches too.
/// That over-match is a known, accepted limitation of the heuristic.
static HEADING_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9 -]{2,60}$").expect("valid regex"));

/// Bullet (`-`, `*`, `•`) or numeric (`1.`, `1)`) list marker plus whitespace.
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•]|\d+[.)])\s+").expect("valid regex"));

/// A titled group of display lines.
///
/// `lines` preserves input order; blank entries are kept as empty strings so
/// the render layer can regroup paragraphs on them. List lines carry a
/// normalized `"- "` prefix regardless of the source marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
}

/// Segments generated resume text into display sections.
///
/// Empty input yields an empty vector; whitespace-only input flows through
/// the plain-text parser, where each blank line becomes a separator under the
/// default `Summary` title. Input whose trimmed form starts with `{` or `[`
/// is first tried as JSON; only those two lead characters route through the
/// structured path, so prose that merely contains stray braces is never
/// misparsed. Decode failure falls through to the plain-text parser without
/// surfacing an error.
pub fn segment(text: &str) -> Vec<Section> {
    if text.is_empty() {
        return Vec::new();
    }

    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Some(sections) = segment_structured(trimmed) {
            return sections;
        }
    }

    segment_plain(text)
}

/// Structured branch: one section per array element or object key.
/// Returns `None` when the text is not valid JSON.
fn segment_structured(trimmed: &str) -> Option<Vec<Section>> {
    let value: Value = serde_json::from_str(trimmed).ok()?;

    let sections = match value {
        Value::String(s) => vec![Section {
            title: "Resume".to_string(),
            lines: vec![s],
        }],
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| Section {
                title: format!("Item {}", i + 1),
                lines: vec![value_line(item)],
            })
            .collect(),
        // preserve_order keeps the map in insertion order, so section order
        // matches the order of keys in the payload.
        Value::Object(map) => map
            .iter()
            .map(|(key, val)| Section {
                title: key.clone(),
                lines: vec![value_line(val)],
            })
            .collect(),
        // Bare scalars cannot start with '{' or '[', so nothing to display.
        _ => Vec::new(),
    };

    Some(sections)
}

/// A string value is displayed as-is; anything else is pretty-printed with
/// nesting indentation and field order preserved.
fn value_line(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Plain-text branch: line-by-line classification into headings, list items,
/// blank separators, and content, accumulated into sections.
fn segment_plain(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section {
        title: "Summary".to_string(),
        lines: Vec::new(),
    };

    for raw in text.split('\n') {
        let line = raw.trim();

        if line.is_empty() {
            // Blank line separates paragraphs inside a section.
            if !current.title.is_empty() || !current.lines.is_empty() {
                current.lines.push(String::new());
            }
            continue;
        }

        // Heading check runs before the list check; precedence matters for
        // ambiguous lines.
        if is_heading(line) {
            if !current.title.is_empty() || !current.lines.is_empty() {
                flush(&mut sections, &mut current);
            }
            current.title = line.strip_suffix(':').unwrap_or(line).to_string();
            continue;
        }

        if let Some(marker) = LIST_MARKER.find(line) {
            current.lines.push(format!("- {}", &line[marker.end()..]));
            continue;
        }

        current.lines.push(line.to_string());
    }

    // The final accumulator also counts when it carries only a title.
    if !current.title.is_empty() || !current.lines.is_empty() {
        sections.push(current);
    }

    sections
}

/// A line is a heading if it ends with a colon, or is a short all-uppercase
/// line (2–60 chars of `[A-Z0-9 -]`). Purely line-local; no lookahead.
fn is_heading(line: &str) -> bool {
    line.ends_with(':') || (HEADING_SHAPE.is_match(line) && line == line.to_uppercase())
}

/// Emits the current accumulator if it buffered any lines, then resets it.
/// A mid-parse accumulator with a title but no lines is dropped, matching the
/// display behavior this feeds (a heading with nothing under it renders as
/// nothing).
fn flush(sections: &mut Vec<Section>, current: &mut Section) {
    let finished = std::mem::replace(
        current,
        Section {
            title: String::new(),
            lines: Vec::new(),
        },
    );
    if !finished.lines.is_empty() {
        sections.push(finished);
    }
}
