use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

mod assistant;
pub mod heuristics;
pub mod logging;
pub mod prompts;
mod providers;
pub mod response;
pub mod settings;
mod test_util;

pub use assistant::Assistant;
pub use heuristics::{segment, simplify, translate, Segment, SimplifiedText};
pub use providers::{CannedResponse, Message, MessageRole, Provider, ProviderFuture, ProviderResponse};
pub use response::{
    extract_score, parse_candidates, parse_evaluation, Candidate, Evaluation, ReviewContext,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,
    pub settings_path: Option<String>,
    pub response_file: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Command {
    Segment,
    Simplify,
    Translate,
    Score,
    ParseCandidates { source: String },
    ParseEvaluation { context: ReviewContext },
    Candidates { temperature: Option<f32> },
    ReviewRewrite { original: String },
    Assist { learner: String },
    ReviewTranslation { original: String, simplified: String },
}

impl Command {
    fn uses_provider(&self) -> bool {
        matches!(
            self,
            Command::Candidates { .. }
                | Command::ReviewRewrite { .. }
                | Command::Assist { .. }
                | Command::ReviewTranslation { .. }
        )
    }
}

pub async fn run(config: Config, input: Option<String>) -> Result<String> {
    let input = input.unwrap_or_default();
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("stdin is empty"));
    }

    if !config.command.uses_provider() {
        if config.response_file.is_some() {
            warn!("--response-file is ignored for this command");
        }
        return run_offline(&config.command, input);
    }

    let settings_path = config.settings_path.as_deref().map(Path::new);
    let settings = settings::load_settings(settings_path)?;
    let provider = config
        .response_file
        .as_deref()
        .map(|path| CannedResponse::from_file(Path::new(path)))
        .transpose()?;
    let assistant = Assistant::new(provider, settings);
    if !assistant.has_provider() {
        info!("no --response-file given; running heuristic fallbacks");
    }

    match config.command {
        Command::Candidates { temperature } => {
            format_json(&assistant.rewrite_candidates(input, temperature).await)
        }
        Command::ReviewRewrite { original } => {
            format_json(&assistant.review_rewrite(original.trim(), input).await)
        }
        Command::Assist { learner } => Ok(assistant.assist_translation(input, &learner).await),
        Command::ReviewTranslation {
            original,
            simplified,
        } => format_json(
            &assistant
                .review_translation(original.trim(), simplified.trim(), input)
                .await,
        ),
        other => run_offline(&other, input),
    }
}

fn run_offline(command: &Command, input: &str) -> Result<String> {
    match command {
        Command::Segment => Ok(segment(input)
            .iter()
            .map(Segment::as_str)
            .collect::<Vec<_>>()
            .join("\n")),
        Command::Simplify => Ok(simplify(input).to_string()),
        Command::Translate => Ok(translate(input)),
        Command::Score => Ok(format_scores(input)),
        Command::ParseCandidates { source } => {
            format_json(&parse_candidates(input, source.trim()))
        }
        Command::ParseEvaluation { context } => format_json(&parse_evaluation(input, *context)),
        _ => Err(anyhow!("command requires the assistant")),
    }
}

fn format_scores(input: &str) -> String {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match extract_score(line) {
            Some(score) => score.to_string(),
            None => "not found".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).with_context(|| "failed to serialize output")
}
