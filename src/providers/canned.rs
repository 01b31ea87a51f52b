use anyhow::{anyhow, Context, Result};
use std::path::Path;

use super::{Message, Provider, ProviderFuture, ProviderResponse};

const MODEL_NAME: &str = "canned";

/// Replays a fixed reply regardless of the request. Lets every workflow run
/// offline against a saved provider reply.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    reply: String,
    messages: Vec<Message>,
    temperature: Option<f32>,
}

impl CannedResponse {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            messages: Vec::new(),
            temperature: None,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let reply = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read response file: {}", path.display()))?;
        if reply.trim().is_empty() {
            return Err(anyhow!("response file is empty: {}", path.display()));
        }
        Ok(Self::new(reply))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }
}

impl Provider for CannedResponse {
    fn append_system_input(mut self, input: String) -> Self {
        self.messages.push(Message::system(input));
        self
    }

    fn append_user_input(mut self, input: String) -> Self {
        self.messages.push(Message::user(input));
        self
    }

    fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn complete(self) -> ProviderFuture {
        let response = ProviderResponse {
            text: self.reply,
            model: Some(MODEL_NAME.to_string()),
        };
        Box::pin(async move { Ok(response) })
    }
}
