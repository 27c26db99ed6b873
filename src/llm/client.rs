// HTTP client for the external decision service. Model-agnostic: speaks
// the Anthropic Messages API or any OpenAI-compatible chat endpoint, with
// the format detected from the URL.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;

use super::DecisionError;

/// Wire format of the configured endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Anthropic,
    OpenAi,
}

pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

impl LlmClient {
    /// Build a client for the configured endpoint. The per-call timeout
    /// bounds how long one dispatch can suspend a session.
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.decision_timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        let api_format = Self::detect_api_format(&config.llm_api_url);
        Self {
            client,
            api_key: config.llm_api_key.clone(),
            api_url: config.llm_api_url.clone(),
            model: config.llm_model.clone(),
            api_format,
        }
    }

    /// Detect the wire format from the URL. Anything that is not Anthropic
    /// is assumed to speak the OpenAI chat format (Gemini, DeepSeek, and
    /// OpenAI itself all do).
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAi
        }
    }

    /// Send one completion request and return the raw completion text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, DecisionError> {
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAi => self.complete_openai(system, user).await,
        }
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String, DecisionError> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: 8192,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DecisionError::Api {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let completion: AnthropicResponse = response.json().await?;

        completion
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or(DecisionError::EmptyCompletion)
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String, DecisionError> {
        let request = OpenAiRequest {
            model: self.model.clone(),
            max_tokens: 8192,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DecisionError::Api {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let completion: OpenAiResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(DecisionError::EmptyCompletion)
    }
}

// Anthropic Messages API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible chat format
#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    max_tokens: u32,
    response_format: ResponseFormat,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}
