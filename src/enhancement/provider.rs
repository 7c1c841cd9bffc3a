//! AI text-generation providers

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fields::EnhancementField;
use crate::config::{normalize_base_url, ProviderConfig};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Provider returned no content")]
    EmptyResponse,
    #[error("Provider is not configured: {0}")]
    NotConfigured(String),
}

/// Generates the text for one field of one word
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Recorded as the enhancement source of fields this provider produced
    fn name(&self) -> &str;

    async fn generate(&self, word: &str, field: EnhancementField, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Any server speaking the OpenAI chat completions API
pub struct OpenAiCompatibleProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    name: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        if !config.is_configured() {
            return Err(ProviderError::NotConfigured(
                "base_url and model must be set".to_string(),
            ));
        }

        // The overall bound is applied per call by the tracker
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", normalize_base_url(&config.base_url)),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            name: format!("openai-compatible:{}", config.model),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AiProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, word: &str, field: EnhancementField, prompt: &str) -> Result<String, ProviderError> {
        let req = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut builder = self.client.post(&self.endpoint).json(&req);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        log::debug!("Requesting {} for '{}' from {}", field, word, self.endpoint);
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, message });
        }

        let chat: ChatResponse = response.json().await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_provider_is_rejected() {
        let config = ProviderConfig::default();
        assert!(matches!(
            OpenAiCompatibleProvider::new(&config),
            Err(ProviderError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_endpoint_and_name() {
        let config = ProviderConfig {
            base_url: "`https://api.example.com/`".to_string(),
            model: "gpt-4o-mini".to_string(),
            ..Default::default()
        };
        let provider = OpenAiCompatibleProvider::new(&config).unwrap();
        assert_eq!(provider.endpoint(), "https://api.example.com/v1/chat/completions");
        assert_eq!(provider.name(), "openai-compatible:gpt-4o-mini");
    }

    #[test]
    fn test_response_shape() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"definition\":\"短暂的\"}"}}]}"#;
        let chat: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            chat.choices[0].message.content.as_deref(),
            Some("{\"definition\":\"短暂的\"}")
        );
    }
}
