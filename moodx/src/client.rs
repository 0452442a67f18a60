use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{MoodError, Result};

/// Sampling temperature for every call. Low, favouring factual output.
pub const TEMPERATURE: f64 = 0.3;

/// Token budget for the one-sentence mood summary.
pub const MOOD_MAX_TOKENS: u32 = 150;
/// Token budget for the full multi-category recommendation response.
pub const RECOMMENDATION_MAX_TOKENS: u32 = 6000;
/// Token budget for a single advisor suggestion.
pub const ADVISOR_MAX_TOKENS: u32 = 500;

/// A text-completion backend.
///
/// Implementations issue exactly one request per call: no retry, no streaming.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` as a single user message and return the first
    /// completion's text verbatim.
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completions client for Groq's OpenAI-compatible endpoint.
pub struct GroqClient {
    api_key: String,
    model: String,
    endpoint: String,
    http: reqwest::Client,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: crate::config::DEFAULT_ENDPOINT.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone(), config.model.clone()).with_endpoint(&config.endpoint)
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| MoodError::Config(format!("API key is not a valid header value: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String> {
        if prompt.is_empty() {
            return Err(MoodError::InvalidRequest("prompt must not be empty".into()));
        }
        if max_output_tokens == 0 {
            return Err(MoodError::InvalidRequest(
                "max_output_tokens must be greater than zero".into(),
            ));
        }

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: max_output_tokens,
        };

        info!(model = %self.model, max_tokens = max_output_tokens, "Completion request");
        debug!(prompt = %prompt, "Completion prompt");

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MoodError::Api {
                status_code: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body)?;
        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| MoodError::MalformedResponse("no choices[0].message.content".into()))?;

        info!(status = status.as_u16(), chars = text.len(), "Completion received");
        debug!(completion = %text, "Completion text");
        Ok(text)
    }
}
