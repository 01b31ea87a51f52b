use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::heuristics::{simplify, translate};
use crate::prompts;
use crate::providers::Provider;
use crate::response::{
    parse_candidates, parse_evaluation, Candidate, Evaluation, ReviewContext,
    DEFAULT_SCORE_WITHOUT_PROVIDER,
};
use crate::settings::Settings;

pub const NO_PROVIDER_EXPLANATION: &str = "ヒューリスティック法による簡素化";
pub const PROVIDER_ERROR_EXPLANATION: &str = "エラー時のフォールバック";
pub const REWRITE_REVIEW_UNAVAILABLE: &str = "AIが利用できないため、簡易評価を行いました。";
pub const TRANSLATION_REVIEW_UNAVAILABLE: &str = "AIが利用できないため、評価できません。";
pub const REVIEW_FAILED: &str = "評価中にエラーが発生しました。";

/// Runs the learner workflows against an optional provider. Every method
/// degrades to the heuristics instead of returning an error.
#[derive(Debug, Clone)]
pub struct Assistant<P: Provider> {
    provider: Option<P>,
    settings: Settings,
}

impl<P: Provider> Assistant<P> {
    pub fn new(provider: Option<P>, settings: Settings) -> Self {
        Self { provider, settings }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Produces rewrite candidates for `text`. Never empty.
    pub async fn rewrite_candidates(
        &self,
        text: &str,
        temperature: Option<f32>,
    ) -> Vec<Candidate> {
        if self.provider.is_none() {
            info!("rewrite candidates: no provider, using heuristic simplifier");
            return vec![heuristic_candidate(text, NO_PROVIDER_EXPLANATION)];
        }
        let temperature = self.settings.resolve_temperature(temperature);
        let reply = match prompts::render_rewrite_candidates_prompt(text, &self.settings) {
            Ok(prompt) => {
                self.ask(
                    prompts::REWRITE_CANDIDATES_SYSTEM_PROMPT,
                    prompt,
                    temperature,
                )
                .await
            }
            Err(err) => Err(err),
        };
        match reply {
            Ok(reply) => {
                let candidates = parse_candidates(&reply, text);
                info!("rewrite candidates: {} parsed", candidates.len());
                candidates
            }
            Err(err) => {
                warn!("rewrite candidates failed: {:#}; using heuristic simplifier", err);
                vec![heuristic_candidate(text, PROVIDER_ERROR_EXPLANATION)]
            }
        }
    }

    /// Scores how translation-ready a learner's Japanese rewrite is.
    pub async fn review_rewrite(&self, original: &str, rewritten: &str) -> Evaluation {
        if self.provider.is_none() {
            info!("rewrite review: no provider");
            return fallback_evaluation(REWRITE_REVIEW_UNAVAILABLE);
        }
        let reply = match prompts::render_rewrite_review_prompt(original, rewritten) {
            Ok(prompt) => {
                self.ask(
                    prompts::TRANSLATION_EXPERT_SYSTEM_PROMPT,
                    prompt,
                    self.settings.temperature,
                )
                .await
            }
            Err(err) => Err(err),
        };
        match reply {
            Ok(reply) => parse_evaluation(&reply, ReviewContext::Rewrite),
            Err(err) => {
                warn!("rewrite review failed: {:#}", err);
                fallback_evaluation(REVIEW_FAILED)
            }
        }
    }

    /// Suggests an English translation of `simplified`.
    ///
    /// A provider is consulted only when the learner's own draft is shorter
    /// than `learner_draft_min_chars`; otherwise the draft is returned as-is,
    /// or the heuristic translation when the draft is blank.
    pub async fn assist_translation(&self, simplified: &str, learner: &str) -> String {
        let draft_chars = learner.trim().chars().count();
        if self.provider.is_none() || draft_chars >= self.settings.learner_draft_min_chars {
            if learner.trim().is_empty() {
                info!("translation assist: heuristic translation");
                return translate(simplified);
            }
            info!("translation assist: keeping learner draft");
            return learner.to_string();
        }

        let reply = match prompts::render_translation_assist_prompt(simplified) {
            Ok(prompt) => {
                self.ask(
                    prompts::TRANSLATION_EXPERT_SYSTEM_PROMPT,
                    prompt,
                    self.settings.temperature,
                )
                .await
            }
            Err(err) => Err(err),
        };
        match reply {
            Ok(suggestion) => suggestion,
            Err(err) => {
                warn!("translation assist failed: {:#}; using heuristic translation", err);
                translate(simplified)
            }
        }
    }

    /// Scores a learner's English translation.
    pub async fn review_translation(
        &self,
        original: &str,
        simplified: &str,
        translation: &str,
    ) -> Evaluation {
        if self.provider.is_none() {
            info!("translation review: no provider");
            return fallback_evaluation(TRANSLATION_REVIEW_UNAVAILABLE);
        }
        let reply = match prompts::render_translation_review_prompt(original, simplified, translation)
        {
            Ok(prompt) => {
                self.ask(
                    prompts::TRANSLATION_REVIEW_SYSTEM_PROMPT,
                    prompt,
                    self.settings.temperature,
                )
                .await
            }
            Err(err) => Err(err),
        };
        match reply {
            Ok(reply) => parse_evaluation(&reply, ReviewContext::Translation),
            Err(err) => {
                warn!("translation review failed: {:#}", err);
                fallback_evaluation(REVIEW_FAILED)
            }
        }
    }

    async fn ask(
        &self,
        system_prompt: &str,
        user_prompt: String,
        temperature: f32,
    ) -> Result<String> {
        let provider = self
            .provider
            .clone()
            .ok_or_else(|| anyhow!("no provider configured"))?;
        debug!(
            "provider request: prompt {} chars, temperature {:.2}",
            user_prompt.chars().count(),
            temperature
        );
        let response = provider
            .append_system_input(system_prompt.to_string())
            .append_user_input(user_prompt)
            .with_temperature(temperature)
            .complete()
            .await?;
        if let Some(model) = response.model.as_deref() {
            info!("provider replied (model={})", model);
        }
        let text = response.text.trim();
        if text.is_empty() {
            return Err(anyhow!("provider returned an empty reply"));
        }
        Ok(text.to_string())
    }
}

fn heuristic_candidate(text: &str, explanation: &str) -> Candidate {
    Candidate {
        id: 1,
        text: simplify(text).to_string(),
        explanation: explanation.to_string(),
    }
}

fn fallback_evaluation(comment: &str) -> Evaluation {
    Evaluation {
        score: DEFAULT_SCORE_WITHOUT_PROVIDER,
        comment: comment.to_string(),
    }
}
