//! Language model capability and shared client settings
use crate::error::LlmError;
use reqwest::blocking::Client;
use std::env;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// A text-completion backend
///
/// Implementations block; async callers run them on a blocking thread.
pub trait LanguageModel: Send + Sync {
    /// Label reported alongside results, e.g. "anthropic (claude-sonnet-4-20250514)"
    fn name(&self) -> &str;

    fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// Settings shared by every backend
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl ModelSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: timeout_from_env(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn client(&self, provider: &str) -> Result<Client, LlmError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| LlmError::Transport {
                provider: provider.to_string(),
                message: format!("client build failed: {err}"),
            })
    }
}

/// `ARCHGRADE_LLM_TIMEOUT_SECS`, falling back to the default on absence or garbage
pub fn timeout_from_env() -> Duration {
    let secs = env::var("ARCHGRADE_LLM_TIMEOUT_SECS")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Non-empty environment variable
pub(crate) fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Error body, shortened for logs and messages
pub(crate) fn truncate_body(body: &str) -> String {
    const LIMIT: usize = 300;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).chars().count(), 301);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = ModelSettings::new("m").with_timeout(Duration::from_secs(5));
        assert_eq!(settings.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }
}
