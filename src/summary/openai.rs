//! OpenAI chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::SummaryConfig;
use crate::error::{Result, VerazError};
use crate::summary::generator::{ChatMessage, TextGenerator};

/// Request body for `POST {base_url}/chat/completions`.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client for OpenAI and compatible APIs.
pub struct OpenAIChatClient {
    /// HTTP client for making API requests.
    client: Client,
    api_key: String,
    model: String,
    /// API root, e.g. `https://api.openai.com/v1`.
    base_url: String,
}

impl std::fmt::Debug for OpenAIChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIChatClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAIChatClient {
    /// Create a client against the default OpenAI endpoint.
    pub fn new<K: Into<String>, M: Into<String>>(api_key: K, model: M) -> Result<Self> {
        let config = SummaryConfig {
            model: model.into(),
            ..SummaryConfig::default()
        }
        .with_api_key(api_key);
        Self::from_config(&config)
    }

    /// Create a client from a configuration that carries an API key.
    pub fn from_config(config: &SummaryConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| VerazError::invalid_argument("an API key is required"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAIChatClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let http_response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = http_response.status();
        let response_text = http_response.text().await?;

        if !status.is_success() {
            return Err(VerazError::other(format!(
                "OpenAI API error (status {status}): {response_text}"
            )));
        }

        let response: ChatCompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                VerazError::other(format!("Failed to parse OpenAI response: {e}"))
            })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| VerazError::other("No completion in OpenAI response"))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
