//! archgrade llm: decomposition and explanation via language models
//!
//! Two capabilities sit on one [`ProviderChain`]: a [`Decomposer`] that
//! turns prose into an [`archgrade_core::ArchitectureRecord`], and an
//! [`Explainer`] that narrates a finished evaluation. Neither influences
//! scores. All calls block; run them off the async executor.

pub mod anthropic;
pub mod chain;
pub mod chat_completions;
pub mod decompose;
pub mod error;
pub mod explain;
pub mod provider;

pub use anthropic::AnthropicModel;
pub use chain::{Completion, ProviderChain};
pub use chat_completions::ChatCompletionsModel;
pub use decompose::{extract_json_object, parse_record, strip_code_fences, Decomposer, Decomposition};
pub use error::LlmError;
pub use explain::{Explainer, EXPLANATION_UNAVAILABLE};
pub use provider::{LanguageModel, ModelSettings};
