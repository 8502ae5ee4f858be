//! OpenAI-backed structuring service client

use crate::config::ExtractorConfig;
use crate::extractor::prompt::{build_extraction_prompt, SYSTEM_PROMPT};
use crate::extractor::response::parse_modules;
use crate::extractor::{ModuleRecord, PageContent, Structurer};
use crate::{ExtractError, ExtractResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable the API key is read from
///
/// The key is never accepted through the config file.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Chat-completions client implementing [`Structurer`]
///
/// Holds its own HTTP client so extraction timeouts are independent from
/// the crawler's per-page timeouts.
pub struct OpenAiStructurer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiStructurer {
    /// Creates a structurer reading the API key from [`API_KEY_ENV`]
    ///
    /// # Arguments
    ///
    /// * `config` - Model identifier, endpoint, and sampling settings
    ///
    /// # Returns
    ///
    /// * `Ok(OpenAiStructurer)` - Ready to send extraction requests
    /// * `Err(ExtractError::MissingApiKey)` - The variable is unset or blank
    pub fn from_env(config: &ExtractorConfig) -> ExtractResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| ExtractError::MissingApiKey)?;
        Self::with_api_key(config, api_key)
    }

    /// Creates a structurer with an explicit API key
    pub fn with_api_key(config: &ExtractorConfig, api_key: impl Into<String>) -> ExtractResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ExtractError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            api_base: config.api_base.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl Structurer for OpenAiStructurer {
    async fn extract_modules(&self, pages: &[PageContent]) -> ExtractResult<Vec<ModuleRecord>> {
        let prompt = build_extraction_prompt(pages);
        debug!(
            "Requesting module extraction for {} source(s), prompt of {} chars",
            pages.len(),
            prompt.chars().count()
        );

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::RateLimited { message });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .filter(|content| !content.is_empty())
            .ok_or(ExtractError::EmptyResponse)?;

        let records = parse_modules(&text)?;
        info!("Model returned {} module(s)", records.len());
        Ok(records)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_is_rejected() {
        let config = ExtractorConfig::default();
        assert!(matches!(
            OpenAiStructurer::with_api_key(&config, "   "),
            Err(ExtractError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let mut config = ExtractorConfig::default();
        config.api_base = "https://api.example.com/v1/".to_string();
        let structurer = OpenAiStructurer::with_api_key(&config, "test-key").unwrap();

        assert_eq!(structurer.endpoint(), "https://api.example.com/v1/chat/completions");
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "system",
                content: "hello",
            }],
            temperature: 0.3,
            max_tokens: 2000,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["response_format"]["type"], "json_object");
    }

    // Live request behavior (statuses, shapes of real responses) is covered
    // by the wiremock integration tests.
}
