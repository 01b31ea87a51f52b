use serde::Serialize;

use super::value_after_separator;
use crate::heuristics::simplify;

pub const CANDIDATE_LABEL: &str = "候補";
pub const EXPLANATION_LABEL: &str = "説明";
pub const FALLBACK_UNPARSED_EXPLANATION: &str = "フォールバック: 簡素化された文";

/// One alternative rewrite offered to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: u32,
    pub text: String,
    pub explanation: String,
}

#[derive(Debug, Default)]
struct Draft {
    text: String,
    explanation: Option<String>,
}

enum ScanState {
    Scanning,
    InCandidate(Draft),
    InExplanation(Draft),
}

impl ScanState {
    fn take_draft(self) -> Option<Draft> {
        match self {
            ScanState::Scanning => None,
            ScanState::InCandidate(draft) | ScanState::InExplanation(draft) => Some(draft),
        }
    }
}

enum LineKind<'a> {
    Blank,
    Candidate(&'a str),
    Explanation(&'a str),
    Other,
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with(CANDIDATE_LABEL) {
        if let Some(value) = value_after_separator(line) {
            return LineKind::Candidate(value.trim());
        }
    } else if line.starts_with(EXPLANATION_LABEL) {
        if let Some(value) = value_after_separator(line) {
            return LineKind::Explanation(value.trim());
        }
    }
    LineKind::Other
}

/// Collects `候補N: ...` / `説明N: ...` blocks in reply order.
///
/// A candidate line closes the open candidate and opens a new one; an
/// explanation line overwrites the explanation of the open candidate.
/// Candidates with empty text are dropped without using up an id. The result
/// is empty when no label was recognized.
pub fn scan_candidates(response: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut state = ScanState::Scanning;

    for line in response.lines().map(str::trim) {
        state = match (classify(line), state) {
            (LineKind::Candidate(text), previous) => {
                if let Some(draft) = previous.take_draft() {
                    emit(&mut candidates, draft);
                }
                ScanState::InCandidate(Draft {
                    text: text.to_string(),
                    explanation: None,
                })
            }
            (LineKind::Explanation(value), ScanState::InCandidate(mut draft))
            | (LineKind::Explanation(value), ScanState::InExplanation(mut draft)) => {
                draft.explanation = Some(value.to_string());
                ScanState::InExplanation(draft)
            }
            (LineKind::Explanation(_), ScanState::Scanning) => ScanState::Scanning,
            (LineKind::Blank | LineKind::Other, state) => state,
        };
    }

    if let Some(draft) = state.take_draft() {
        emit(&mut candidates, draft);
    }
    candidates
}

/// Like [`scan_candidates`], but never empty: when the reply has no
/// recognizable labels a single candidate is synthesized from the heuristic
/// simplification of `source`.
pub fn parse_candidates(response: &str, source: &str) -> Vec<Candidate> {
    let candidates = scan_candidates(response);
    if !candidates.is_empty() {
        return candidates;
    }
    vec![Candidate {
        id: 1,
        text: simplify(source).to_string(),
        explanation: FALLBACK_UNPARSED_EXPLANATION.to_string(),
    }]
}

fn emit(candidates: &mut Vec<Candidate>, draft: Draft) {
    if draft.text.is_empty() {
        return;
    }
    candidates.push(Candidate {
        id: candidates.len() as u32 + 1,
        text: draft.text,
        explanation: draft.explanation.unwrap_or_default(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_BLOCKS: &str = "\
候補1: 事前に準備しておくことが大切です。
説明1: ことわざを具体的な意味に置き換えました。

候補2: 前もって準備すると失敗しません。
説明2: 条件文に変えました。

候補3: 準備をしておけば安心です。
説明3: 主語を省いた単文にしました。
";

    #[test]
    fn parses_three_blocks_in_order() {
        let candidates = parse_candidates(THREE_BLOCKS, "転ばぬ先の杖");
        assert_eq!(candidates.len(), 3);
        assert_eq!(
            candidates.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(candidates[0].text, "事前に準備しておくことが大切です。");
        assert_eq!(candidates[1].explanation, "条件文に変えました。");
        assert_eq!(candidates[2].text, "準備をしておけば安心です。");
        assert_eq!(candidates[2].explanation, "主語を省いた単文にしました。");
    }

    #[test]
    fn unlabeled_reply_falls_back_to_simplifier() {
        let candidates = parse_candidates("すみません、書き換えられません。", "疲れたので寝る。");
        assert_eq!(
            candidates,
            vec![Candidate {
                id: 1,
                text: "疲れたから寝る。".to_string(),
                explanation: FALLBACK_UNPARSED_EXPLANATION.to_string(),
            }]
        );
        assert!(scan_candidates("すみません").is_empty());
    }

    #[test]
    fn latest_explanation_before_next_candidate_wins() {
        let reply = "候補1: A\n説明1: first\n説明1: second\n候補2: B";
        let candidates = scan_candidates(reply);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].explanation, "second");
        assert_eq!(candidates[1].explanation, "");
    }

    #[test]
    fn explanation_before_any_candidate_is_discarded() {
        let reply = "説明: orphan\n候補1: A";
        let candidates = scan_candidates(reply);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].explanation, "");
    }

    #[test]
    fn empty_candidate_text_is_dropped_without_consuming_an_id() {
        let reply = "候補1:\n説明1: nothing here\n候補2: B\n説明2: kept";
        let candidates = scan_candidates(reply);
        assert_eq!(
            candidates,
            vec![Candidate {
                id: 1,
                text: "B".to_string(),
                explanation: "kept".to_string(),
            }]
        );
    }

    #[test]
    fn labels_need_a_separator_and_a_line_prefix() {
        let reply = "候補はありません\nこれは候補1: ではない\n候補1：全角コロンの文\n  説明1：インデント付き  ";
        let candidates = scan_candidates(reply);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "全角コロンの文");
        assert_eq!(candidates[0].explanation, "インデント付き");
    }

    #[test]
    fn only_first_separator_splits_label() {
        let candidates = scan_candidates("候補1: 時間: 午後3時に会う。");
        assert_eq!(candidates[0].text, "時間: 午後3時に会う。");
    }
}
