use super::segment::collapse_whitespace;

/// Literal replacements applied in this exact order. Later entries see the
/// output of earlier ones.
pub const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("私は", "I"),
    ("です", "is"),
    ("だ", "is"),
    ("行きます", "go"),
    ("行った", "went"),
];

/// Crude word-for-word rendering used when no provider can translate.
///
/// Clauses are taken one per line, stripped of `。` at either end, run
/// through [`SUBSTITUTIONS`] and joined with a single space. Anything the
/// table does not know passes through untouched.
pub fn translate(text: &str) -> String {
    text.split('\n')
        .filter(|clause| !clause.trim().is_empty())
        .map(|clause| translate_clause(clause.trim().trim_matches('。')))
        .filter(|clause| !clause.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn translate_clause(clause: &str) -> String {
    let mut out = clause.to_string();
    for (japanese, english) in SUBSTITUTIONS {
        if out.contains(japanese) {
            out = out.replace(japanese, &format!(" {} ", english));
        }
    }
    collapse_whitespace(&out)
}
