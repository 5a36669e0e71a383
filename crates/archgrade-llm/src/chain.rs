//! Ordered provider fallback
use crate::anthropic::AnthropicModel;
use crate::chat_completions::ChatCompletionsModel;
use crate::error::LlmError;
use crate::provider::LanguageModel;
use tracing::{info, warn};

/// Text produced by one provider of the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub provider: String,
    pub text: String,
}

/// Providers in priority order; the first success wins
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn LanguageModel>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: Box<dyn LanguageModel>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Primary then gateway, each only when its key is configured
    pub fn from_env() -> Self {
        let mut chain = Self::new();

        match AnthropicModel::from_env() {
            Ok(model) => chain = chain.with_provider(Box::new(model)),
            Err(err) => info!("Primary model disabled: {err}"),
        }
        match ChatCompletionsModel::from_env() {
            Ok(model) => chain = chain.with_provider(Box::new(model)),
            Err(err) => info!("Gateway model disabled: {err}"),
        }

        chain
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Try each provider in turn
    pub fn complete(&self, system: &str, user: &str) -> Result<Completion, LlmError> {
        if self.providers.is_empty() {
            return Err(LlmError::NoProviders);
        }

        let mut failures = Vec::new();
        for provider in &self.providers {
            match provider.complete(system, user) {
                Ok(text) => {
                    return Ok(Completion {
                        provider: provider.name().to_string(),
                        text,
                    })
                }
                Err(err) => {
                    warn!(provider = provider.name(), "Language model failed: {err}");
                    failures.push(err.to_string());
                }
            }
        }
        Err(LlmError::AllFailed(failures))
    }
}
