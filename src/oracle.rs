//! Chat-completion client used as the prediction oracle.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::config::OracleConfig;
use crate::http_client::{http_client, snippet};

/// Anything that can answer a system instruction plus a user prompt with free
/// text.
pub trait PredictionOracle: Send + Sync {
    fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiOracle {
    cfg: OracleConfig,
    api_key: String,
}

impl OpenAiOracle {
    /// Returns `None` when no API key is configured.
    pub fn from_config(cfg: &OracleConfig) -> Option<Self> {
        let api_key = cfg.api_key.clone()?;
        Some(Self {
            cfg: cfg.clone(),
            api_key,
        })
    }
}

impl PredictionOracle for OpenAiOracle {
    fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let client = http_client()?;
        let url = format!(
            "{}/chat/completions",
            self.cfg.base_url.trim_end_matches('/')
        );
        let body = ChatRequest {
            model: &self.cfg.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.cfg.temperature,
        };

        let resp = client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.cfg.timeout)
            .json(&body)
            .send()
            .context("oracle request failed")?;
        let status = resp.status();
        let text = resp.text().context("failed reading oracle body")?;
        if !status.is_success() {
            return Err(anyhow!("oracle http {status}: {}", snippet(&text)));
        }
        parse_chat_content(&text)
    }
}

/// Pulls the first choice's message text out of a chat-completion body.
pub fn parse_chat_content(raw: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(raw).context("invalid oracle json")?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| anyhow!("oracle returned no content"))
}
