//! Evaluation snapshot to narrative
use crate::chain::{Completion, ProviderChain};
use crate::error::LlmError;
use serde::Serialize;
use std::sync::Arc;

pub const EXPLANATION_PROMPT: &str = "You are a senior cloud architect reviewing an automated assessment. \
From the evaluation below, write three or four plain paragraphs that cover the main strengths and weaknesses, \
the risks that matter most to the business, the improvements to make first and why, \
and the trade-offs involved. Name concrete services and patterns. \
Do not use markdown. Stay under 300 words.";

/// Shown in place of the narrative when no provider answers
pub const EXPLANATION_UNAVAILABLE: &str = "AI explanation unavailable.";

#[derive(Clone)]
pub struct Explainer {
    chain: Arc<ProviderChain>,
}

impl Explainer {
    pub fn new(chain: Arc<ProviderChain>) -> Self {
        Self { chain }
    }

    /// Narrate a serializable snapshot of an evaluation
    pub fn explain<T: Serialize>(&self, snapshot: &T) -> Result<Completion, LlmError> {
        let context = serde_json::to_string_pretty(snapshot)
            .map_err(|err| LlmError::Unparseable(format!("snapshot not serializable: {err}")))?;
        self.chain
            .complete(EXPLANATION_PROMPT, &format!("Evaluation:\n{context}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::tests::Scripted;
    use serde_json::json;

    #[test]
    fn test_explain_uses_chain() {
        let chain = ProviderChain::new().with_provider(Box::new(Scripted::ok("s", "Looks solid.")));
        let completion = Explainer::new(Arc::new(chain))
            .explain(&json!({"overall": 72}))
            .unwrap();
        assert_eq!(completion.text, "Looks solid.");
    }

    #[test]
    fn test_explain_without_providers() {
        let result = Explainer::new(Arc::new(ProviderChain::new())).explain(&json!({}));
        assert_eq!(result, Err(LlmError::NoProviders));
    }
}
