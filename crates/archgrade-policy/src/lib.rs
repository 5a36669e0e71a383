//! archgrade policy: category scorers and risk detection
//!
//! Each category is an ordered rule table. Evaluating a table yields the
//! score, the explanation trail (one line per rule that has something to
//! say, in table order) and the violated principles.
//!
//! # Architecture
//!
//! ```text
//! Effective record ─┬─→ SCALABILITY_RULES ──────→ CategoryResult
//!                   ├─→ RELIABILITY_RULES ──────→ CategoryResult
//!                   ├─→ SECURITY_RULES ─────────→ CategoryResult
//!                   ├─→ COST_EFFICIENCY_RULES ──→ CategoryResult
//!                   └─→ RISK_CHECKS ────────────→ RiskAnalysis
//! ```
//!
//! # Example
//!
//! ```
//! use archgrade_core::{ArchitectureRecord, ScalingMode};
//! use archgrade_policy::{score_all, analyze_risks, RiskLevel};
//!
//! let record = ArchitectureRecord {
//!     scaling_type: ScalingMode::Automatic,
//!     waf: true,
//!     ..Default::default()
//! };
//!
//! let scores = score_all(&record, None);
//! assert_eq!(scores.scalability.score, 25);
//! assert_eq!(scores.security.score, 20);
//!
//! let risks = analyze_risks(&record);
//! assert_eq!(risks.risk_level, RiskLevel::Medium);
//! ```

pub mod cost_efficiency;
pub mod reliability;
pub mod risk;
pub mod rule;
pub mod scalability;
pub mod security;

pub use cost_efficiency::{cost_target_penalty, score_cost_efficiency, COST_EFFICIENCY_RULES};
pub use reliability::{score_reliability, RELIABILITY_RULES};
pub use risk::{analyze_risks, RiskAnalysis, RiskCheck, RiskFinding, RiskLevel, RISK_CHECKS};
pub use rule::{evaluate_rules, RuleInput, RuleOutcome, ScoreRule};
pub use scalability::{score_scalability, SCALABILITY_RULES};
pub use security::{score_security, SECURITY_RULES};

use archgrade_core::{ArchitectureRecord, CategoryScores, SimulationParams};

/// Score all four categories of an effective record
pub fn score_all(record: &ArchitectureRecord, simulation: Option<&SimulationParams>) -> CategoryScores {
    CategoryScores {
        scalability: score_scalability(record, simulation),
        reliability: score_reliability(record),
        security: score_security(record),
        cost_efficiency: score_cost_efficiency(record, simulation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgrade_core::{
        CachingLayer, CdnKind, ComputeModel, DatabaseKind, LoadBalancerKind, MonitoringKind,
        OrchestrationKind, ScalingMode,
    };

    fn base() -> ArchitectureRecord {
        ArchitectureRecord {
            compute_model: ComputeModel::VirtualMachine,
            compute_count: 2,
            database_type: DatabaseKind::RelationalManaged,
            ..Default::default()
        }
    }

    type Toggle = (&'static str, fn(&mut ArchitectureRecord));

    /// Single-field improvements
    const TOGGLES: &[Toggle] = &[
        ("scaling", |r| r.scaling_type = ScalingMode::Automatic),
        ("lb", |r| r.load_balancer = LoadBalancerKind::ApplicationLayer),
        ("cdn", |r| r.cdn = CdnKind::CloudFront),
        ("cache", |r| r.caching_layer = CachingLayer::Managed),
        ("orchestration", |r| r.container_orchestration = OrchestrationKind::Kubernetes),
        ("microservices", |r| r.microservices = true),
        ("api_gateway", |r| r.api_gateway = true),
        ("multi_region", |r| r.multi_region = true),
        ("multi_az", |r| r.database_multi_az = true),
        ("replicas", |r| r.database_replicas = 2),
        ("backup", |r| r.backup_strategy = true),
        ("monitoring", |r| r.monitoring = MonitoringKind::CloudWatch),
        ("ci_cd", |r| r.ci_cd = true),
        ("waf", |r| r.waf = true),
        ("encryption", |r| r.encryption = true),
        ("tls", |r| r.ssl_tls = true),
        ("vpc", |r| r.vpc = true),
        ("subnets", |r| r.private_subnets = true),
        ("iam", |r| r.iam_configured = true),
        ("security_groups", |r| r.security_groups = true),
        ("reserved", |r| r.reserved_instances = true),
        ("spot", |r| r.spot_instances = true),
        ("serverless", |r| r.serverless_components = 3),
    ];

    #[test]
    fn test_enabling_a_control_never_lowers_scores() {
        let before = score_all(&base(), None);
        for (name, toggle) in TOGGLES {
            let mut record = base();
            toggle(&mut record);
            let after = score_all(&record, None);
            assert!(after.scalability.score >= before.scalability.score, "{name}");
            assert!(after.reliability.score >= before.reliability.score, "{name}");
            assert!(after.security.score >= before.security.score, "{name}");
            assert!(after.cost_efficiency.score >= before.cost_efficiency.score, "{name}");
        }
    }

    #[test]
    fn test_scores_are_reproducible() {
        let mut record = base();
        record.waf = true;
        record.cdn = CdnKind::Cloudflare;
        let first = serde_json::to_string(&score_all(&record, None)).unwrap();
        let second = serde_json::to_string(&score_all(&record, None)).unwrap();
        assert_eq!(first, second);
    }
}
