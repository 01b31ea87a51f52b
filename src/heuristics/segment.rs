use serde::Serialize;
use std::fmt;

/// Punctuation that closes a segment. The mark stays attached to the
/// segment it ends.
pub const SEGMENT_BOUNDARIES: [char; 4] = ['。', '、', '．', ','];

/// A punctuation-delimited clause of Japanese text. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Segment(String);

impl Segment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits `text` into clause-level segments, in order.
pub fn segment(text: &str) -> Vec<Segment> {
    let collapsed = collapse_whitespace(text);
    collapsed
        .split_inclusive(|ch: char| SEGMENT_BOUNDARIES.contains(&ch))
        .filter_map(|piece| {
            let piece = piece.trim();
            if piece.is_empty() {
                None
            } else {
                Some(Segment(piece.to_string()))
            }
        })
        .collect()
}

/// Collapses every run of Unicode whitespace (including U+3000) into a
/// single ASCII space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
