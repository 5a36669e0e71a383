//! OpenAI-compatible chat completions backend (fallback gateway)
use crate::anthropic::ChatMessage;
use crate::error::LlmError;
use crate::provider::{env_value, truncate_body, LanguageModel, ModelSettings};
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_GATEWAY_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_GATEWAY_MODEL: &str = "gpt-4o";

pub struct ChatCompletionsModel {
    label: String,
    endpoint: String,
    api_key: String,
    settings: ModelSettings,
    client: Client,
}

impl ChatCompletionsModel {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        settings: ModelSettings,
    ) -> Result<Self, LlmError> {
        let label = format!("gateway ({})", settings.model);
        let client = settings.client(&label)?;
        Ok(Self {
            label,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            settings,
            client,
        })
    }

    /// Build from `ARCHGRADE_GATEWAY_KEY`, `ARCHGRADE_GATEWAY_URL` and `ARCHGRADE_GATEWAY_MODEL`
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = env_value("ARCHGRADE_GATEWAY_KEY").ok_or_else(|| LlmError::MissingApiKey {
            env_var: "ARCHGRADE_GATEWAY_KEY".to_string(),
        })?;
        let endpoint = env_value("ARCHGRADE_GATEWAY_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        let model = env_value("ARCHGRADE_GATEWAY_MODEL").unwrap_or_else(|| DEFAULT_GATEWAY_MODEL.to_string());
        Self::new(endpoint, api_key, ModelSettings::new(model))
    }

    fn request_body<'a>(&'a self, system: &'a str, user: &'a str) -> CompletionsRequest<'a> {
        CompletionsRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
        }
    }
}

impl LanguageModel for ChatCompletionsModel {
    fn name(&self) -> &str {
        &self.label
    }

    fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
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

        let value: Value = response.json().map_err(|err| LlmError::InvalidResponse {
            provider: self.label.clone(),
            message: err.to_string(),
        })?;
        extract_choice_content(&value).ok_or_else(|| LlmError::InvalidResponse {
            provider: self.label.clone(),
            message: "no choices[0].message.content".to_string(),
        })
    }
}

#[derive(Serialize)]
struct CompletionsRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

fn extract_choice_content(value: &Value) -> Option<String> {
    value
        .get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_puts_system_first() {
        let model = ChatCompletionsModel::new("http://localhost/v1", "k", ModelSettings::new("g1")).unwrap();
        let body = serde_json::to_value(model.request_body("sys", "hi")).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(model.name(), "gateway (g1)");
    }

    #[test]
    fn test_extract_choice_content() {
        let value = json!({"choices": [{"message": {"role": "assistant", "content": "ok"}}]});
        assert_eq!(extract_choice_content(&value).as_deref(), Some("ok"));
        assert_eq!(extract_choice_content(&json!({"choices": []})), None);
    }
}
