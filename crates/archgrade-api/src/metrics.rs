//! Prometheus counters served at `/metrics`
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    evaluations: IntCounterVec,
    upstream_failures: IntCounterVec,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let evaluations = IntCounterVec::new(
            Opts::new("archgrade_evaluations_total", "Completed architecture evaluations"),
            &["maturity", "mode"],
        )?;
        let upstream_failures = IntCounterVec::new(
            Opts::new("archgrade_upstream_failures_total", "Failed language model calls"),
            &["capability"],
        )?;
        registry.register(Box::new(evaluations.clone()))?;
        registry.register(Box::new(upstream_failures.clone()))?;
        Ok(Self {
            registry,
            evaluations,
            upstream_failures,
        })
    }

    pub fn record_evaluation(&self, maturity: &str, mode: &str) {
        self.evaluations.with_label_values(&[maturity, mode]).inc();
    }

    pub fn record_upstream_failure(&self, capability: &str) {
        self.upstream_failures.with_label_values(&[capability]).inc();
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_exported() {
        let metrics = ApiMetrics::new().unwrap();
        metrics.record_evaluation("Prototype", "structured");
        metrics.record_upstream_failure("explanation");
        let text = metrics.encode().unwrap();
        assert!(text.contains(r#"archgrade_evaluations_total{maturity="Prototype",mode="structured"} 1"#));
        assert!(text.contains(r#"archgrade_upstream_failures_total{capability="explanation"} 1"#));
    }
}
