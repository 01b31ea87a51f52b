//! Extraction of structured fields from free-form provider replies.
//!
//! Replies are scanned line by line for fixed label tokens. Nothing here
//! fails: missing or malformed fields degrade to documented defaults.

mod candidates;
mod evaluation;
mod score;

pub use candidates::{
    parse_candidates, scan_candidates, Candidate, CANDIDATE_LABEL, EXPLANATION_LABEL,
    FALLBACK_UNPARSED_EXPLANATION,
};
pub use evaluation::{parse_evaluation, Evaluation, ReviewContext};
pub use score::{
    extract_score, has_score_label, DEFAULT_SCORE_UNPARSABLE, DEFAULT_SCORE_WITHOUT_PROVIDER,
    MAX_SCORE,
};

const SEPARATORS: [char; 2] = [':', '：'];

/// Returns everything after the first `:` or `：`, if the text has one.
fn value_after_separator(text: &str) -> Option<&str> {
    let index = text.find(SEPARATORS)?;
    let separator_len = text[index..].chars().next().map_or(1, char::len_utf8);
    Some(&text[index + separator_len..])
}
