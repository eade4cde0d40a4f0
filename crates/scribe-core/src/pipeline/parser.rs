//! Recovery parser for free-form model drafts.
//!
//! The only structure the model is trusted to produce is a weak line
//! convention: a line whose trimmed content starts with `file:`
//! (case-insensitive) opens a new file section, and everything up to the
//! next marker or the end of input is that section's body. The draft
//! format separates sections with a horizontal rule (`---`), so trailing
//! separator lines are dropped from the body. Everything else -- prose,
//! fences, blank runs -- is body text, kept verbatim.
//!
//! Parsing is total: malformed input degrades to the single-artifact
//! fallback rather than an error, and parsing the same text twice yields
//! the same artifacts.

use super::Artifact;

/// Parser state: between sections, or accumulating one.
enum ParseState {
    NoSection,
    InSection { name: String, buffer: Vec<String> },
}

impl ParseState {
    /// Flush the open section into `out` if it is usable.
    ///
    /// A section is dropped when its name is empty (a bare `file:` marker
    /// is an invalid section) or when its body trims to nothing. Trailing
    /// separator lines are not part of the body.
    fn flush_into(self, out: &mut Vec<Artifact>) {
        let ParseState::InSection { name, mut buffer } = self else {
            return;
        };
        while buffer.last().is_some_and(|line| is_separator_line(line)) {
            buffer.pop();
        }
        let code = buffer.join("\n").trim().to_string();
        if !name.is_empty() && !code.is_empty() {
            out.push(Artifact { path: name, code });
        }
    }
}

/// If `line` is a section marker, return the declared path (trimmed, may
/// be empty).
fn marker_path(line: &str) -> Option<String> {
    let trimmed = line.trim();
    match trimmed.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("file:") => {
            Some(trimmed[5..].trim().to_string())
        }
        _ => None,
    }
}

/// A horizontal-rule separator: three or more dashes and nothing else.
fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

/// A fence delimiter: ``` optionally followed by a single language tag.
fn is_fence_line(line: &str) -> bool {
    let Some(rest) = line.trim().strip_prefix("```") else {
        return false;
    };
    rest.trim()
        .chars()
        .all(|c| !c.is_whitespace() && c != '`')
}

/// Remove enclosing fenced-code delimiters from `text` and trim it.
///
/// Drops a leading and a trailing fence line when present (independently,
/// so a draft missing its closing fence still recovers). Interior fences
/// are content and stay.
pub fn strip_code_fences(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.first().is_some_and(|l| is_fence_line(l)) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| is_fence_line(l)) {
        lines.pop();
    }
    lines.join("\n").trim().to_string()
}

/// Recover ordered artifacts from one block of raw model text.
///
/// Single pass, line oriented. Sections open on a `file:` marker and
/// close on the next marker or the end of input; `---` separator lines
/// at the end of a body are dropped. Sections with an empty path or an
/// empty trimmed body never become artifacts. Text outside any section
/// is discarded.
///
/// If no marker line appeared at all, the entire text (fence-stripped and
/// trimmed) becomes one artifact at `default_path` -- drafts from models
/// that ignore the section format still land somewhere useful. The
/// fallback artifact may have empty code; the writer skips it. A draft
/// whose markers all open empty or unnamed sections yields no artifacts:
/// the marker lines themselves are never resurrected as content.
pub fn parse_artifacts(raw: &str, default_path: &str) -> Vec<Artifact> {
    let mut artifacts = Vec::new();
    let mut state = ParseState::NoSection;
    let mut saw_marker = false;

    for line in raw.lines() {
        if let Some(path) = marker_path(line) {
            saw_marker = true;
            let previous = std::mem::replace(
                &mut state,
                ParseState::InSection {
                    name: path,
                    buffer: Vec::new(),
                },
            );
            previous.flush_into(&mut artifacts);
        } else if let ParseState::InSection { buffer, .. } = &mut state {
            buffer.push(line.to_string());
        }
    }
    state.flush_into(&mut artifacts);

    if artifacts.is_empty() && !saw_marker {
        artifacts.push(Artifact {
            path: default_path.to_string(),
            code: strip_code_fences(raw),
        });
    }

    artifacts
}
