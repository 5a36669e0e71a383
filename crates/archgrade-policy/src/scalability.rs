//! Scalability rule table
use crate::rule::{evaluate_rules, RuleInput, RuleOutcome, ScoreRule};
use archgrade_core::{ArchitectureRecord, CategoryResult, ComputeModel, ScalingMode, SimulationParams};

pub const ELASTIC_SCALABILITY: &str = "Elastic Scalability";
pub const HORIZONTAL_DISTRIBUTION: &str = "Horizontal Distribution";
pub const EDGE_CACHING: &str = "Edge Caching Strategy";
pub const LATENCY_OPTIMIZATION: &str = "Latency Optimization";
pub const CLOUD_NATIVE_SCALABILITY: &str = "Cloud-Native Scalability";

pub const SCALABILITY_RULES: &[ScoreRule] = &[
    ScoreRule::new("scaling_strategy", Some(ELASTIC_SCALABILITY), scaling_strategy),
    ScoreRule::new("load_balancer", Some(HORIZONTAL_DISTRIBUTION), load_balancer),
    ScoreRule::new("cdn", Some(EDGE_CACHING), cdn),
    ScoreRule::new("caching_layer", Some(LATENCY_OPTIMIZATION), caching_layer),
    ScoreRule::new("cloud_native", Some(CLOUD_NATIVE_SCALABILITY), cloud_native),
    ScoreRule::new("microservices", None, microservices),
    ScoreRule::new("api_gateway", None, api_gateway),
    ScoreRule::new("multi_region", None, multi_region),
];

/// Score scalability of the effective record
pub fn score_scalability(
    record: &ArchitectureRecord,
    simulation: Option<&SimulationParams>,
) -> CategoryResult {
    evaluate_rules(SCALABILITY_RULES, &RuleInput::new(record, simulation))
}

fn scaling_strategy(input: &RuleInput) -> RuleOutcome {
    match input.record.scaling_type {
        ScalingMode::Automatic => RuleOutcome::met(25, "Auto Scaling detected (+25)"),
        ScalingMode::Manual => RuleOutcome::unmet(8, "Manual scaling only (+8)"),
        ScalingMode::None => RuleOutcome::unmet(0, "No scaling strategy detected (+0)"),
    }
}

fn load_balancer(input: &RuleInput) -> RuleOutcome {
    let lb = input.record.load_balancer;
    if lb.is_present() {
        RuleOutcome::met(
            20,
            format!("{} load balancer present (+20)", lb.as_str().to_uppercase()),
        )
    } else {
        RuleOutcome::unmet(0, "No load balancer detected (+0)")
    }
}

fn cdn(input: &RuleInput) -> RuleOutcome {
    let cdn = input.record.cdn;
    if cdn.is_present() {
        RuleOutcome::met(10, format!("CDN ({cdn}) configured (+10)"))
    } else {
        RuleOutcome::unmet(0, "No CDN configured (+0)")
    }
}

fn caching_layer(input: &RuleInput) -> RuleOutcome {
    let cache = input.record.caching_layer;
    if cache.is_present() {
        RuleOutcome::met(10, format!("Caching layer ({cache}) present (+10)"))
    } else {
        RuleOutcome::unmet(0, "No caching layer detected (+0)")
    }
}

fn cloud_native(input: &RuleInput) -> RuleOutcome {
    let record = input.record;
    if record.container_orchestration.is_present() {
        RuleOutcome::met(
            15,
            format!(
                "Container orchestration ({}) enabled (+15)",
                record.container_orchestration
            ),
        )
    } else if record.serverless_components > 0 {
        RuleOutcome::met(15, "Serverless components detected (+15)")
    } else if record.compute_model == ComputeModel::ServerlessContainer {
        RuleOutcome::met(12, "Fargate compute model (+12)")
    } else {
        RuleOutcome::unmet(0, "No container orchestration or serverless (+0)")
    }
}

fn microservices(input: &RuleInput) -> RuleOutcome {
    if input.record.microservices {
        RuleOutcome::met(10, "Microservices architecture (+10)")
    } else {
        RuleOutcome::unmet(0, "Monolithic architecture detected (+0)")
    }
}

fn api_gateway(input: &RuleInput) -> RuleOutcome {
    if input.record.api_gateway {
        RuleOutcome::met(5, "API Gateway configured (+5)")
    } else {
        RuleOutcome::neutral()
    }
}

fn multi_region(input: &RuleInput) -> RuleOutcome {
    let added = input.simulation.map(|s| s.add_regions > 0).unwrap_or(false);
    if input.record.multi_region || added {
        RuleOutcome::met(5, "Multi-region deployment (+5)")
    } else {
        RuleOutcome::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgrade_core::{CachingLayer, CdnKind, LoadBalancerKind, OrchestrationKind};

    #[test]
    fn test_empty_record() {
        let result = score_scalability(&ArchitectureRecord::default(), None);
        assert_eq!(result.score, 0);
        assert_eq!(
            result.violated_principles,
            vec![
                ELASTIC_SCALABILITY,
                HORIZONTAL_DISTRIBUTION,
                EDGE_CACHING,
                LATENCY_OPTIMIZATION,
                CLOUD_NATIVE_SCALABILITY,
            ]
        );
        assert_eq!(result.explanation.len(), 6);
    }

    #[test]
    fn test_fully_equipped_caps_at_100() {
        let record = ArchitectureRecord {
            scaling_type: ScalingMode::Automatic,
            load_balancer: LoadBalancerKind::ApplicationLayer,
            cdn: CdnKind::CloudFront,
            caching_layer: CachingLayer::Managed,
            container_orchestration: OrchestrationKind::Kubernetes,
            microservices: true,
            api_gateway: true,
            multi_region: true,
            ..Default::default()
        };
        let result = score_scalability(&record, None);
        assert_eq!(result.score, 100);
        assert!(result.violated_principles.is_empty());
        assert_eq!(result.explanation[0], "Auto Scaling detected (+25)");
        assert_eq!(result.explanation[1], "ALB load balancer present (+20)");
    }

    #[test]
    fn test_manual_scaling_awards_partial_points() {
        let record = ArchitectureRecord {
            scaling_type: ScalingMode::Manual,
            ..Default::default()
        };
        let result = score_scalability(&record, None);
        assert_eq!(result.score, 8);
        assert!(result.violates(ELASTIC_SCALABILITY));
    }

    #[test]
    fn test_cloud_native_fallbacks() {
        let serverless = ArchitectureRecord {
            serverless_components: 2,
            ..Default::default()
        };
        assert_eq!(score_scalability(&serverless, None).score, 15);

        let fargate = ArchitectureRecord {
            compute_model: ComputeModel::ServerlessContainer,
            ..Default::default()
        };
        let result = score_scalability(&fargate, None);
        assert_eq!(result.score, 12);
        assert!(!result.violates(CLOUD_NATIVE_SCALABILITY));
    }

    #[test]
    fn test_simulated_regions_count_as_multi_region() {
        let sim = SimulationParams::new().with_regions(1);
        let result = score_scalability(&ArchitectureRecord::default(), Some(&sim));
        assert_eq!(result.score, 5);
        assert!(result
            .explanation
            .contains(&"Multi-region deployment (+5)".to_string()));
    }
}
