use serde::Serialize;

use super::score::{extract_score, has_score_label, DEFAULT_SCORE_UNPARSABLE};
use super::value_after_separator;

const COMMENT_LABEL_JA: &str = "コメント";
const COMMENT_LABEL_EN: &str = "comment";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub score: u8,
    pub comment: String,
}

/// Which review produced the reply. The two reviews read comments
/// differently and both behaviors are user-visible.
// TODO: reconcile the two comment rules once product settles on one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewContext {
    /// Review of a learner's Japanese rewrite: the comment is the rest of the
    /// first comment line, or empty when there is none.
    Rewrite,
    /// Review of a learner's English translation: the comment runs from the
    /// first comment line to the end of the reply, or is the whole reply when
    /// there is no comment line.
    Translation,
}

/// Reads a score and a comment out of a `スコア: ... / コメント: ...` reply.
///
/// Only the first score-labeled line is consulted; if it carries no digits the
/// score is [`DEFAULT_SCORE_UNPARSABLE`]. A line carrying a score label is
/// never read as a comment.
pub fn parse_evaluation(response: &str, context: ReviewContext) -> Evaluation {
    let lines = response.lines().collect::<Vec<_>>();
    let mut score = None;
    let mut comment = None;

    for (index, line) in lines.iter().enumerate() {
        if has_score_label(line) {
            if score.is_none() {
                score = Some(extract_score(line).unwrap_or(DEFAULT_SCORE_UNPARSABLE));
            }
            continue;
        }
        if !has_comment_label(line) {
            continue;
        }
        match context {
            ReviewContext::Rewrite => {
                if comment.is_none() {
                    comment = Some(comment_value(line));
                }
            }
            ReviewContext::Translation => {
                comment = Some(comment_value(&lines[index..].join("\n")));
                break;
            }
        }
    }

    let comment = comment.filter(|value| !value.is_empty()).unwrap_or_else(|| match context {
        ReviewContext::Rewrite => String::new(),
        ReviewContext::Translation => response.trim().to_string(),
    });

    Evaluation {
        score: score.unwrap_or(DEFAULT_SCORE_UNPARSABLE),
        comment,
    }
}

fn has_comment_label(line: &str) -> bool {
    line.contains(COMMENT_LABEL_JA) || line.to_lowercase().contains(COMMENT_LABEL_EN)
}

fn comment_value(text: &str) -> String {
    value_after_separator(text).unwrap_or(text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_review_reads_score_and_single_line_comment() {
        let reply = "スコア: 85\nコメント: 一文一義になっています。\n主語も明確です。";
        let evaluation = parse_evaluation(reply, ReviewContext::Rewrite);
        assert_eq!(evaluation.score, 85);
        assert_eq!(evaluation.comment, "一文一義になっています。");
    }

    #[test]
    fn translation_review_keeps_multi_line_comment() {
        let reply = "スコア: 90\nコメント: 良い点: 時制が正確です。\n改善点: 冠詞を見直しましょう。";
        let evaluation = parse_evaluation(reply, ReviewContext::Translation);
        assert_eq!(evaluation.score, 90);
        assert_eq!(
            evaluation.comment,
            "良い点: 時制が正確です。\n改善点: 冠詞を見直しましょう。"
        );
    }

    #[test]
    fn translation_review_stops_scanning_after_comment() {
        let reply = "Comment: fine\nScore: 10";
        let evaluation = parse_evaluation(reply, ReviewContext::Translation);
        assert_eq!(evaluation.score, DEFAULT_SCORE_UNPARSABLE);
        assert_eq!(evaluation.comment, "fine\nScore: 10");
    }

    #[test]
    fn missing_comment_defaults_differ_by_context() {
        let reply = "  スコア: 60\n全体的に読みやすいです。  ";
        let rewrite = parse_evaluation(reply, ReviewContext::Rewrite);
        assert_eq!(rewrite.score, 60);
        assert_eq!(rewrite.comment, "");

        let translation = parse_evaluation(reply, ReviewContext::Translation);
        assert_eq!(translation.score, 60);
        assert_eq!(translation.comment, "スコア: 60\n全体的に読みやすいです。");
    }

    #[test]
    fn first_score_line_wins_even_without_digits() {
        let reply = "スコア: [数値]\nスコア: 40\nコメント: ok";
        let evaluation = parse_evaluation(reply, ReviewContext::Rewrite);
        assert_eq!(evaluation.score, DEFAULT_SCORE_UNPARSABLE);
        assert_eq!(evaluation.comment, "ok");
    }

    #[test]
    fn unlabeled_reply_uses_engineering_default() {
        let evaluation = parse_evaluation("よくできました", ReviewContext::Rewrite);
        assert_eq!(evaluation.score, DEFAULT_SCORE_UNPARSABLE);
        assert_eq!(evaluation.comment, "");
    }

    #[test]
    fn comment_line_with_score_label_counts_as_score() {
        let reply = "コメント: スコアは 70 です";
        let evaluation = parse_evaluation(reply, ReviewContext::Rewrite);
        assert_eq!(evaluation.score, 70);
        assert_eq!(evaluation.comment, "");
    }

    #[test]
    fn comment_without_separator_keeps_whole_line() {
        let reply = "score 55\ncomment looks good";
        let evaluation = parse_evaluation(reply, ReviewContext::Rewrite);
        assert_eq!(evaluation.comment, "comment looks good");
    }

    #[test]
    fn first_comment_line_wins_for_rewrite_review() {
        let reply = "コメント: 最初\nコメント: 二番目";
        let evaluation = parse_evaluation(reply, ReviewContext::Rewrite);
        assert_eq!(evaluation.comment, "最初");
    }
}
