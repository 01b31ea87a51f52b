use anyhow::{anyhow, Context, Result};
use tera::{Context as TeraContext, Tera};

use crate::settings::Settings;

include!(concat!(env!("OUT_DIR"), "/embedded_prompt_templates.rs"));

pub const REWRITE_CANDIDATES_SYSTEM_PROMPT: &str = "あなたは日本語から英語への翻訳を支援する専門家です。必ず日本語で応答してください。慣用句やことわざは具体的な意味に言い換えてください。";
pub const TRANSLATION_EXPERT_SYSTEM_PROMPT: &str = "あなたは日本語から英語への翻訳の専門家です。";
pub const TRANSLATION_REVIEW_SYSTEM_PROMPT: &str = "あなたは英語翻訳の専門家です。";

pub fn render_rewrite_candidates_prompt(text: &str, settings: &Settings) -> Result<String> {
    let mut context = TeraContext::new();
    context.insert("text", text);
    context.insert("min_candidates", &settings.min_candidates);
    context.insert("max_candidates", &settings.max_candidates);
    let numbers = (1..=settings.min_candidates).collect::<Vec<_>>();
    context.insert("candidate_numbers", &numbers);
    render("rewrite_candidates.tera", &context)
}

pub fn render_rewrite_review_prompt(original: &str, rewritten: &str) -> Result<String> {
    let mut context = TeraContext::new();
    context.insert("original", original);
    context.insert("rewritten", rewritten);
    render("rewrite_review.tera", &context)
}

pub fn render_translation_assist_prompt(simplified: &str) -> Result<String> {
    let mut context = TeraContext::new();
    context.insert("simplified", simplified);
    render("translation_assist.tera", &context)
}

pub fn render_translation_review_prompt(
    original: &str,
    simplified: &str,
    translation: &str,
) -> Result<String> {
    let mut context = TeraContext::new();
    context.insert("original", original);
    context.insert("simplified", simplified);
    context.insert("translation", translation);
    render("translation_review.tera", &context)
}

fn render(name: &str, context: &TeraContext) -> Result<String> {
    let template =
        embedded_template(name).ok_or_else(|| anyhow!("missing prompt template: {}", name))?;
    Tera::one_off(template, context, false)
        .with_context(|| format!("failed to render prompt: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_prompt_lists_one_block_per_requested_candidate() {
        let settings = Settings::default();
        let prompt = render_rewrite_candidates_prompt("転ばぬ先の杖", &settings).expect("render");
        assert!(prompt.contains("候補を3〜5個生成してください"));
        assert!(prompt.contains("元の文：\n転ばぬ先の杖\n"));
        assert!(prompt.contains("候補3: [書き換え文（日本語）]"));
        assert!(!prompt.contains("候補4: "));
        assert!(prompt.contains("候補5まで追加してください"));
    }

    #[test]
    fn candidate_prompt_omits_extra_note_for_fixed_count() {
        let settings = Settings {
            min_candidates: 2,
            max_candidates: 2,
            ..Settings::default()
        };
        let prompt = render_rewrite_candidates_prompt("文", &settings).expect("render");
        assert!(prompt.contains("説明2: "));
        assert!(!prompt.contains("追加してください"));
    }

    #[test]
    fn user_text_is_not_html_escaped() {
        let prompt =
            render_rewrite_review_prompt("<元>", "A & B \"C\"").expect("render");
        assert!(prompt.contains("<元>"));
        assert!(prompt.contains("A & B \"C\""));
    }

    #[test]
    fn translation_review_prompt_carries_all_three_texts() {
        let prompt = render_translation_review_prompt("原文", "簡単な文", "An easy sentence.")
            .expect("render");
        assert!(prompt.contains("元の日本語：\n原文"));
        assert!(prompt.contains("書き換えた日本語：\n簡単な文"));
        assert!(prompt.contains("学習者の英訳：\nAn easy sentence."));
        assert!(prompt.trim_end().ends_with("より良い表現があれば提案。]"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let err = render("missing.tera", &TeraContext::new()).expect_err("missing");
        assert!(err.to_string().contains("missing prompt template"));
    }
}
