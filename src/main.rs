use std::io::{self, Read};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use jp_rewrite_assist::{Command, Config, ReviewContext};

#[derive(Parser, Debug)]
#[command(
    name = "jp-rewrite-assist",
    version,
    about = "Rewrite Japanese into translation-friendly sentences and review translations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Saved provider reply to use instead of the heuristic fallbacks
    #[arg(long = "response-file", global = true)]
    response_file: Option<String>,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings", global = true)]
    read_settings: Option<String>,

    /// Enable verbose logging (stderr)
    #[arg(long = "verbose", global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split stdin into clause segments, one per line
    Segment,
    /// Heuristically simplify stdin into short sentences
    Simplify,
    /// Heuristically translate stdin word by word
    Translate,
    /// Extract a score from each stdin line
    Score,
    /// Parse a provider reply on stdin into rewrite candidates (JSON)
    ParseCandidates {
        /// Original text, simplified when the reply has no candidates
        #[arg(long = "source")]
        source: String,
    },
    /// Parse a provider reply on stdin into a score and comment (JSON)
    ParseEvaluation {
        /// Which review produced the reply
        #[arg(long = "context", value_enum, default_value = "rewrite")]
        context: ContextArg,
    },
    /// Produce rewrite candidates for the Japanese text on stdin (JSON)
    Candidates {
        /// Sampling temperature, clamped to 0.0-1.0
        #[arg(short = 't', long = "temperature")]
        temperature: Option<f32>,
    },
    /// Review the rewritten Japanese on stdin against the original (JSON)
    ReviewRewrite {
        #[arg(long = "original")]
        original: String,
    },
    /// Suggest an English translation of the simplified Japanese on stdin
    Assist {
        /// The learner's own draft translation
        #[arg(long = "learner", default_value = "")]
        learner: String,
    },
    /// Review the English translation on stdin (JSON)
    ReviewTranslation {
        #[arg(long = "original")]
        original: String,
        #[arg(long = "simplified")]
        simplified: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ContextArg {
    Rewrite,
    Translation,
}

impl From<ContextArg> for ReviewContext {
    fn from(value: ContextArg) -> Self {
        match value {
            ContextArg::Rewrite => ReviewContext::Rewrite,
            ContextArg::Translation => ReviewContext::Translation,
        }
    }
}

impl From<Commands> for Command {
    fn from(value: Commands) -> Self {
        match value {
            Commands::Segment => Command::Segment,
            Commands::Simplify => Command::Simplify,
            Commands::Translate => Command::Translate,
            Commands::Score => Command::Score,
            Commands::ParseCandidates { source } => Command::ParseCandidates { source },
            Commands::ParseEvaluation { context } => Command::ParseEvaluation {
                context: context.into(),
            },
            Commands::Candidates { temperature } => Command::Candidates { temperature },
            Commands::ReviewRewrite { original } => Command::ReviewRewrite { original },
            Commands::Assist { learner } => Command::Assist { learner },
            Commands::ReviewTranslation {
                original,
                simplified,
            } => Command::ReviewTranslation {
                original,
                simplified,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    jp_rewrite_assist::logging::init(cli.verbose)?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let output = jp_rewrite_assist::run(
        Config {
            command: cli.command.into(),
            settings_path: cli.read_settings,
            response_file: cli.response_file,
        },
        Some(input),
    )
    .await?;

    println!("{}", output);
    Ok(())
}
