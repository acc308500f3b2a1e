//! HTTP client for the reasoning service.
//!
//! Anthropic's messages API and OpenAI-compatible chat completion APIs are both
//! supported; the format is picked from the endpoint URL.

use crate::config::ReasoningSettings;
use crate::error::Result;
use async_trait::async_trait;
use pipelab::engine::reasoning::{ReasoningClient, ReasoningError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const MAX_TOKENS: u32 = 2048;
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ERROR_BODY_LIMIT: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Anthropic,
    OpenAi,
}

impl ApiFormat {
    pub fn detect(url: &str) -> Self {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAi
        }
    }
}

pub struct HttpReasoningClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
    timeout: Duration,
}

impl HttpReasoningClient {
    pub fn new(api_key: String, settings: &ReasoningSettings) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_key,
            api_url: settings.api_url.clone(),
            model: settings.model.clone(),
            api_format: ApiFormat::detect(&settings.api_url),
            timeout: settings.timeout,
        })
    }

    /// Builds a client when reasoning is enabled and the key variable is set.
    /// Returns `None` otherwise, which makes composition use the heuristic path.
    pub fn from_settings(settings: &ReasoningSettings) -> Result<Option<Self>> {
        if !settings.enabled {
            debug!("Reasoning disabled by configuration.");
            return Ok(None);
        }
        match std::env::var(&settings.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                info!(
                    "Reasoning service configured: {} ({:?}).",
                    settings.model,
                    ApiFormat::detect(&settings.api_url)
                );
                Self::new(key.trim().to_string(), settings).map(Some)
            }
            _ => {
                info!(
                    "{} is not set; composing with the keyword heuristic.",
                    settings.api_key_env
                );
                Ok(None)
            }
        }
    }

    async fn send(&self, system: &str, prompt: &str) -> std::result::Result<String, ReasoningError> {
        let request = match self.api_format {
            ApiFormat::Anthropic => self
                .client
                .post(&self.api_url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&AnthropicRequest {
                    model: &self.model,
                    max_tokens: MAX_TOKENS,
                    system,
                    messages: vec![Message {
                        role: "user",
                        content: prompt,
                    }],
                }),
            ApiFormat::OpenAi => self.client.post(&self.api_url).bearer_auth(&self.api_key).json(
                &OpenAiRequest {
                    model: &self.model,
                    max_tokens: MAX_TOKENS,
                    messages: vec![
                        Message {
                            role: "system",
                            content: system,
                        },
                        Message {
                            role: "user",
                            content: prompt,
                        },
                    ],
                },
            ),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ReasoningError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReasoningError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let text = match self.api_format {
            ApiFormat::Anthropic => response
                .json::<AnthropicResponse>()
                .await
                .map_err(|e| ReasoningError::Transport(e.to_string()))?
                .content
                .into_iter()
                .find_map(|block| block.text),
            ApiFormat::OpenAi => response
                .json::<OpenAiResponse>()
                .await
                .map_err(|e| ReasoningError::Transport(e.to_string()))?
                .choices
                .into_iter()
                .find_map(|choice| choice.message.content),
        };
        text.filter(|t| !t.trim().is_empty())
            .ok_or(ReasoningError::EmptyResponse)
    }
}

#[async_trait]
impl ReasoningClient for HttpReasoningClient {
    async fn complete(&self, system: &str, prompt: &str) -> std::result::Result<String, ReasoningError> {
        debug!("Sending reasoning request to {}", self.api_url);
        tokio::time::timeout(self.timeout, self.send(system, prompt))
            .await
            .map_err(|_| ReasoningError::Timeout {
                seconds: self.timeout.as_secs(),
            })?
    }
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
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
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(enabled: bool, key_env: &str) -> ReasoningSettings {
        ReasoningSettings {
            enabled,
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-3-haiku-20240307".to_string(),
            api_key_env: key_env.to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn detects_api_format_from_url() {
        assert_eq!(
            ApiFormat::detect("https://api.anthropic.com/v1/messages"),
            ApiFormat::Anthropic
        );
        assert_eq!(
            ApiFormat::detect("https://api.deepseek.com/chat/completions"),
            ApiFormat::OpenAi
        );
    }

    #[test]
    fn disabled_settings_yield_no_client() {
        assert!(HttpReasoningClient::from_settings(&settings(false, "PATH")).unwrap().is_none());
    }

    #[test]
    fn missing_key_yields_no_client() {
        let settings = settings(true, "PIPELAB_TEST_KEY_THAT_IS_NEVER_SET");
        assert!(HttpReasoningClient::from_settings(&settings).unwrap().is_none());
    }

    #[test]
    fn request_bodies_match_provider_formats() {
        let anthropic = serde_json::to_value(AnthropicRequest {
            model: "m",
            max_tokens: MAX_TOKENS,
            system: "sys",
            messages: vec![Message {
                role: "user",
                content: "hi",
            }],
        })
        .unwrap();
        assert_eq!(anthropic["system"], "sys");
        assert_eq!(anthropic["messages"][0]["role"], "user");

        let openai = serde_json::to_value(OpenAiRequest {
            model: "m",
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "system",
                content: "sys",
            }],
        })
        .unwrap();
        assert!(openai.get("system").is_none());
        assert_eq!(openai["messages"][0]["content"], "sys");
    }

    #[test]
    fn responses_tolerate_non_text_blocks() {
        let parsed: AnthropicResponse = serde_json::from_str(
            r#"{"content": [{"type": "tool_use"}, {"type": "text", "text": "{}"}]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.content.into_iter().find_map(|b| b.text).as_deref(),
            Some("{}")
        );

        let parsed: OpenAiResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(parsed.choices.into_iter().find_map(|c| c.message.content).is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let mut settings = settings(true, "UNUSED");
        settings.api_url = "http://127.0.0.1:9/v1/chat/completions".to_string();
        let client = HttpReasoningClient::new("key".to_string(), &settings).unwrap();
        let result = client.complete("sys", "prompt").await;
        assert!(matches!(
            result,
            Err(ReasoningError::Transport(_)) | Err(ReasoningError::Timeout { .. })
        ));
    }
}
