//! Free text to architecture record
use crate::chain::ProviderChain;
use crate::error::LlmError;
use archgrade_core::{normalize_record, ArchitectureRecord, EngineError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const DECOMPOSITION_PROMPT: &str = r#"You turn prose descriptions of cloud deployments into a structured record.
Reply with one JSON object and nothing else, using exactly these keys:

{
  "compute_model": "ec2|ecs|eks|lambda|fargate|none",
  "compute_count": <instances, 0 if unstated>,
  "scaling_type": "auto_scaling|manual|none",
  "database_type": "rds|aurora|dynamodb|redis_only|none",
  "database_multi_az": <boolean>,
  "database_replicas": <read replicas, 0 if none>,
  "caching_layer": "elasticache|redis|memcached|none",
  "load_balancer": "alb|nlb|none",
  "cdn": "cloudfront|cloudflare|none",
  "vpc": <boolean>,
  "private_subnets": <boolean>,
  "waf": <boolean>,
  "encryption": <boolean>,
  "ssl_tls": <boolean>,
  "iam_configured": <boolean>,
  "security_groups": <boolean>,
  "monitoring": "cloudwatch|datadog|prometheus|none",
  "ci_cd": <boolean>,
  "container_orchestration": "kubernetes|ecs|none",
  "serverless_components": <count of serverless services>,
  "multi_region": <boolean>,
  "backup_strategy": <boolean>,
  "spot_instances": <boolean>,
  "reserved_instances": <boolean>,
  "api_gateway": <boolean>,
  "microservices": <boolean>,
  "estimated_users": <concurrent users implied by the text, 0 if unknown>
}

Infer from context. Anything not mentioned is false, "none" or 0."#;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z]*[ \t]*\r?\n?").unwrap());

/// Remove markdown code fences around model output
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// First balanced JSON object in the text
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Read model output as a normalized record
pub fn parse_record(text: &str) -> Result<ArchitectureRecord, EngineError> {
    let cleaned = strip_code_fences(text);
    let json = extract_json_object(&cleaned)
        .ok_or_else(|| LlmError::Unparseable("no JSON object in model output".to_string()))?;
    let value: Value =
        serde_json::from_str(json).map_err(|err| LlmError::Unparseable(err.to_string()))?;
    normalize_record(&value)
}

/// A decomposed record and the provider that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub record: ArchitectureRecord,
    pub provider: String,
}

#[derive(Clone)]
pub struct Decomposer {
    chain: Arc<ProviderChain>,
}

impl Decomposer {
    pub fn new(chain: Arc<ProviderChain>) -> Self {
        Self { chain }
    }

    pub fn decompose(&self, description: &str) -> Result<Decomposition, EngineError> {
        let completion = self.chain.complete(DECOMPOSITION_PROMPT, description)?;
        debug!(provider = %completion.provider, chars = completion.text.len(), "Decomposition received");
        Ok(Decomposition {
            record: parse_record(&completion.text)?,
            provider: completion.provider,
        })
    }
}
