use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub temperature: f32,
    pub min_candidates: usize,
    pub max_candidates: usize,
    pub learner_draft_min_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            min_candidates: 3,
            max_candidates: 5,
            learner_draft_min_chars: 10,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    generation: Option<GenerationSettings>,
    assist: Option<AssistSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerationSettings {
    temperature: Option<f32>,
    min_candidates: Option<usize>,
    max_candidates: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct AssistSettings {
    learner_draft_min_chars: Option<usize>,
}

pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    ensure_home_settings_file()?;

    let mut ordered_paths = Vec::new();
    ordered_paths.push(PathBuf::from("settings.toml"));
    ordered_paths.push(PathBuf::from("settings.local.toml"));

    if let Some(home) = home_dir() {
        ordered_paths.push(home.join("settings.toml"));
        ordered_paths.push(home.join("settings.local.toml"));
    }

    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            settings.merge_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
        }
    }

    Ok(settings)
}

impl Settings {
    /// Clamps a requested sampling temperature into `0.0..=1.0`, falling back
    /// to the configured default when none (or NaN) is given.
    pub fn resolve_temperature(&self, requested: Option<f32>) -> f32 {
        match requested {
            Some(value) if !value.is_nan() => value.clamp(0.0, 1.0),
            _ => self.temperature,
        }
    }

    fn merge_str(&mut self, content: &str) -> Result<()> {
        let parsed: SettingsFile = toml::from_str(content)?;
        self.merge(parsed);
        Ok(())
    }

    fn merge(&mut self, incoming: SettingsFile) {
        if let Some(generation) = incoming.generation {
            if let Some(temperature) = generation.temperature {
                if (0.0..=1.0).contains(&temperature) {
                    self.temperature = temperature;
                }
            }
            let min = generation.min_candidates.unwrap_or(self.min_candidates);
            let max = generation.max_candidates.unwrap_or(self.max_candidates);
            if min > 0 && min <= max {
                self.min_candidates = min;
                self.max_candidates = max;
            }
        }
        if let Some(assist) = incoming.assist {
            if let Some(chars) = assist.learner_draft_min_chars {
                self.learner_draft_min_chars = chars;
            }
        }
    }
}

fn ensure_home_settings_file() -> Result<()> {
    let Some(home) = home_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&home)
        .with_context(|| format!("failed to create settings directory: {}", home.display()))?;
    let path = home.join("settings.toml");
    if !path.exists() {
        fs::write(&path, DEFAULT_SETTINGS_TOML)
            .with_context(|| format!("failed to write settings: {}", path.display()))?;
    }
    Ok(())
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().and_then(|home| {
        let home = home.trim();
        if home.is_empty() {
            None
        } else {
            Some(Path::new(home).join(".jp-rewrite-assist"))
        }
    })
}
