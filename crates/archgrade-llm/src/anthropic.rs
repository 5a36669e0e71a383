//! Anthropic messages API backend (primary)
use crate::error::LlmError;
use crate::provider::{env_value, truncate_body, LanguageModel, ModelSettings};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

pub const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";

pub struct AnthropicModel {
    label: String,
    endpoint: String,
    api_key: String,
    settings: ModelSettings,
    client: Client,
}

impl AnthropicModel {
    pub fn new(api_key: impl Into<String>, settings: ModelSettings) -> Result<Self, LlmError> {
        let label = format!("anthropic ({})", settings.model);
        let client = settings.client(&label)?;
        Ok(Self {
            label,
            endpoint: ANTHROPIC_URL.to_string(),
            api_key: api_key.into(),
            settings,
            client,
        })
    }

    /// Build from `ANTHROPIC_API_KEY` and `ARCHGRADE_PRIMARY_MODEL`
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = env_value("ANTHROPIC_API_KEY").ok_or_else(|| LlmError::MissingApiKey {
            env_var: "ANTHROPIC_API_KEY".to_string(),
        })?;
        let model = env_value("ARCHGRADE_PRIMARY_MODEL").unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string());
        Self::new(api_key, ModelSettings::new(model))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn request_body<'a>(&'a self, system: &'a str, user: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            system,
            messages: vec![ChatMessage { role: "user", content: user }],
        }
    }
}

impl LanguageModel for AnthropicModel {
    fn name(&self) -> &str {
        &self.label
    }

    fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(system, user))
            .send()
            .map_err(|err| LlmError::Transport {
                provider: self.label.clone(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Status {
                provider: self.label.clone(),
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        let parsed: MessagesResponse = response.json().map_err(|err| LlmError::InvalidResponse {
            provider: self.label.clone(),
            message: err.to_string(),
        })?;
        first_text(parsed).ok_or_else(|| LlmError::InvalidResponse {
            provider: self.label.clone(),
            message: "no text block in content".to_string(),
        })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

fn first_text(response: MessagesResponse) -> Option<String> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .map(|block| block.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let model = AnthropicModel::new("key", ModelSettings::new("m1")).unwrap();
        let body = serde_json::to_value(model.request_body("sys", "hello")).unwrap();
        assert_eq!(body["model"], "m1");
        assert_eq!(body["system"], "sys");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(model.name(), "anthropic (m1)");
    }

    #[test]
    fn test_first_text_skips_other_blocks() {
        let response: MessagesResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "{\"waf\": true}"}
            ]
        }))
        .unwrap();
        assert_eq!(first_text(response).as_deref(), Some("{\"waf\": true}"));
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        let settings = ModelSettings::new("m1").with_timeout(std::time::Duration::from_secs(2));
        let model = AnthropicModel::new("key", settings)
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/v1/messages");
        assert!(matches!(
            model.complete("sys", "hi"),
            Err(LlmError::Transport { .. })
        ));
    }
}
