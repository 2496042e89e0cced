use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use staybot_core::config::{LlmConfig, SamplingConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: Role,
    pub content: String,
}

impl CompletionMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("could not build http client: {0}")]
    Client(String),
    #[error("request to language model failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("language model rejected credentials: {0}")]
    Authentication(String),
    #[error("language model rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("language model returned {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("language model returned no choices")]
    EmptyResponse,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the assistant text for `messages`. One attempt, no retry.
    async fn complete(&self, messages: &[CompletionMessage]) -> Result<String, LlmError>;
}

/// Client for any server speaking the OpenAI chat-completions protocol
/// (OpenAI itself, Ollama's `/v1` endpoint, vLLM, LM Studio).
pub struct OpenAiCompatibleClient {
    http: Client,
    endpoint: String,
    api_key: Option<SecretString>,
    model: String,
    sampling: SamplingConfig,
}

impl OpenAiCompatibleClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| LlmError::Client(error.to_string()))?;
        let base_url =
            config.base_url.as_deref().unwrap_or_else(|| config.provider.default_base_url());

        Ok(Self {
            http,
            endpoint: completions_endpoint(base_url),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            sampling: config.sampling,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, messages: &'a [CompletionMessage]) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.sampling.temperature,
            top_p: self.sampling.top_p,
            max_tokens: (self.sampling.max_tokens > 0).then_some(self.sampling.max_tokens),
            presence_penalty: self.sampling.presence_penalty,
            frequency_penalty: self.sampling.frequency_penalty,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiCompatibleClient {
    async fn complete(&self, messages: &[CompletionMessage]) -> Result<String, LlmError> {
        let mut request = self.http.post(&self.endpoint).json(&self.request_body(messages));
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        debug!(
            event_name = "agent.llm.request",
            model = %self.model,
            messages = messages.len(),
            "sending chat completion request"
        );
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Authentication(body),
                StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(body),
                other => LlmError::Provider { status: other.as_u16(), body },
            });
        }

        let completion = response.json::<CompletionResponse>().await?;
        first_choice_text(completion)
    }
}

fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn first_choice_text(completion: CompletionResponse) -> Result<String, LlmError> {
    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or(LlmError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [CompletionMessage],
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Replays canned replies in order and records every transcript it is given.
/// Once the script runs out, `complete` fails with [`LlmError::EmptyResponse`].
#[derive(Default)]
pub struct ScriptedLlmClient {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    transcripts: Mutex<Vec<Vec<CompletionMessage>>>,
}

impl ScriptedLlmClient {
    pub fn new(replies: impl IntoIterator<Item = Result<String, LlmError>>) -> Self {
        Self { replies: Mutex::new(replies.into_iter().collect()), ..Self::default() }
    }

    pub fn replying(reply: impl Into<String>) -> Self {
        Self::new([Ok(reply.into())])
    }

    pub fn transcripts(&self) -> Vec<Vec<CompletionMessage>> {
        self.transcripts.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, messages: &[CompletionMessage]) -> Result<String, LlmError> {
        if let Ok(mut seen) = self.transcripts.lock() {
            seen.push(messages.to_vec());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}
