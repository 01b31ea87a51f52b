use serde::Serialize;
use std::fmt;

use super::segment::segment;

/// Segments longer than this (in characters) are treated as several fused
/// clauses and split again at comma-like marks.
pub const LONG_SEGMENT_CHARS: usize = 40;

const SENTENCE_END: char = '。';
const CLAUSE_COMMAS: [char; 2] = ['、', '，'];

/// Ordered, non-empty lines produced by [`simplify`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimplifiedText {
    lines: Vec<String>,
}

impl SimplifiedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl fmt::Display for SimplifiedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Rewrites `text` into short lines, one clause per line.
///
/// `ので` is normalized to `から` first. Segments of at most
/// [`LONG_SEGMENT_CHARS`] characters pass through unchanged; longer ones have
/// their `、`/`，` turned into `。` and every resulting clause becomes its own
/// line ending in `。`.
pub fn simplify(text: &str) -> SimplifiedText {
    let normalized = text.replace("ので", "から");
    let mut lines = Vec::new();
    for segment in segment(&normalized) {
        if segment.char_count() > LONG_SEGMENT_CHARS {
            let clauses = split_fused_clauses(segment.as_str());
            if clauses.is_empty() {
                lines.push(segment.into_string());
            } else {
                lines.extend(clauses);
            }
        } else {
            lines.push(segment.into_string());
        }
    }
    SimplifiedText { lines }
}

fn split_fused_clauses(segment: &str) -> Vec<String> {
    let sentence = segment.replace(CLAUSE_COMMAS, "。");
    sentence
        .split(SENTENCE_END)
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| {
            let mut line = clause.to_string();
            if !line.ends_with(SENTENCE_END) {
                line.push(SENTENCE_END);
            }
            line
        })
        .collect()
}
