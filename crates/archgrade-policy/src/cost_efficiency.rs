//! Cost-efficiency rule table
//!
//! The only category with a deduction: a supplied cost target tightens
//! the score by up to 10 points, less the higher the target.
use crate::rule::{evaluate_rules, RuleInput, RuleOutcome, ScoreRule};
use archgrade_core::{
    ArchitectureRecord, CategoryResult, ComputeModel, DatabaseKind, SimulationParams,
};

pub const INSTANCE_PURCHASE: &str = "Instance Purchase Optimization";
pub const DYNAMIC_RIGHT_SIZING: &str = "Dynamic Right-Sizing";

pub const COST_EFFICIENCY_RULES: &[ScoreRule] = &[
    ScoreRule::new("serverless", None, serverless),
    ScoreRule::new("reserved_capacity", None, reserved_capacity),
    ScoreRule::new("spot_capacity", Some(INSTANCE_PURCHASE), spot_capacity),
    ScoreRule::new("cdn_offload", None, cdn_offload),
    ScoreRule::new("cache_offload", None, cache_offload),
    ScoreRule::new("right_sizing", Some(DYNAMIC_RIGHT_SIZING), right_sizing),
    ScoreRule::new("cost_visibility", None, cost_visibility),
    ScoreRule::new("pay_per_use_database", None, pay_per_use_database),
    ScoreRule::new("cost_target", None, cost_target),
];

/// Score cost efficiency of the effective record
pub fn score_cost_efficiency(
    record: &ArchitectureRecord,
    simulation: Option<&SimulationParams>,
) -> CategoryResult {
    evaluate_rules(COST_EFFICIENCY_RULES, &RuleInput::new(record, simulation))
}

/// Points deducted for a cost target: `max(0, 10 - floor(target / 10))`
pub fn cost_target_penalty(target: f64) -> u32 {
    (10.0 - (target / 10.0).floor()).max(0.0) as u32
}

fn serverless(input: &RuleInput) -> RuleOutcome {
    let record = input.record;
    if record.uses_serverless() {
        RuleOutcome::met(25, "Serverless components reduce idle cost (+25)")
    } else if record.compute_model == ComputeModel::ServerlessContainer {
        RuleOutcome::met(15, "Fargate reduces operational overhead (+15)")
    } else {
        RuleOutcome::neutral()
    }
}

fn reserved_capacity(input: &RuleInput) -> RuleOutcome {
    if input.record.reserved_instances {
        RuleOutcome::met(15, "Reserved instances for baseline savings (+15)")
    } else {
        RuleOutcome::neutral()
    }
}

fn spot_capacity(input: &RuleInput) -> RuleOutcome {
    let record = input.record;
    if record.spot_instances {
        RuleOutcome::met(10, "Spot instances for batch/flexible workloads (+10)")
    } else if !record.reserved_instances && record.compute_model == ComputeModel::VirtualMachine {
        RuleOutcome::unmet_silent()
    } else {
        RuleOutcome::neutral()
    }
}

fn cdn_offload(input: &RuleInput) -> RuleOutcome {
    if input.record.cdn.is_present() {
        RuleOutcome::met(10, "CDN reduces origin server load (+10)")
    } else {
        RuleOutcome::neutral()
    }
}

fn cache_offload(input: &RuleInput) -> RuleOutcome {
    if input.record.caching_layer.is_present() {
        RuleOutcome::met(10, "Caching reduces database costs (+10)")
    } else {
        RuleOutcome::neutral()
    }
}

fn right_sizing(input: &RuleInput) -> RuleOutcome {
    if input.record.auto_scales() {
        RuleOutcome::met(15, "Auto-scaling enables right-sizing (+15)")
    } else {
        RuleOutcome::unmet_silent()
    }
}

fn cost_visibility(input: &RuleInput) -> RuleOutcome {
    if input.record.monitoring.is_present() {
        RuleOutcome::met(5, "Monitoring enables cost visibility (+5)")
    } else {
        RuleOutcome::neutral()
    }
}

fn pay_per_use_database(input: &RuleInput) -> RuleOutcome {
    let db = input.record.database_type;
    match db {
        DatabaseKind::KeyValueManaged | DatabaseKind::RelationalDistributed => {
            RuleOutcome::met(5, format!("{db} offers pay-per-use flexibility (+5)"))
        }
        _ => RuleOutcome::neutral(),
    }
}

fn cost_target(input: &RuleInput) -> RuleOutcome {
    let Some(target) = input.simulation.and_then(SimulationParams::active_cost_target) else {
        return RuleOutcome::neutral();
    };
    match cost_target_penalty(target) {
        0 => RuleOutcome::neutral(),
        penalty => RuleOutcome::penalty(penalty, format!("Cost target constraint applied (-{penalty})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgrade_core::{CdnKind, ScalingMode};

    #[test]
    fn test_penalty_formula() {
        assert_eq!(cost_target_penalty(5.0), 10);
        assert_eq!(cost_target_penalty(45.0), 6);
        assert_eq!(cost_target_penalty(100.0), 0);
        assert_eq!(cost_target_penalty(5000.0), 0);
    }

    #[test]
    fn test_vm_without_purchase_options() {
        let record = ArchitectureRecord {
            compute_model: ComputeModel::VirtualMachine,
            ..Default::default()
        };
        let result = score_cost_efficiency(&record, None);
        assert_eq!(result.score, 0);
        assert_eq!(
            result.violated_principles,
            vec![INSTANCE_PURCHASE, DYNAMIC_RIGHT_SIZING]
        );
        assert!(result.explanation.is_empty());
    }

    #[test]
    fn test_reserved_and_spot_stack() {
        let record = ArchitectureRecord {
            compute_model: ComputeModel::VirtualMachine,
            reserved_instances: true,
            spot_instances: true,
            ..Default::default()
        };
        let result = score_cost_efficiency(&record, None);
        assert_eq!(result.score, 25);
        assert!(!result.violates(INSTANCE_PURCHASE));
    }

    #[test]
    fn test_cost_target_penalty_floors_at_zero() {
        let record = ArchitectureRecord {
            cdn: CdnKind::Cloudflare,
            ..Default::default()
        };
        let sim = SimulationParams::new().with_cost_target(20.0);
        let result = score_cost_efficiency(&record, Some(&sim));
        assert_eq!(result.score, 2);
        assert_eq!(
            result.explanation.last().map(String::as_str),
            Some("Cost target constraint applied (-8)")
        );

        let sim = SimulationParams::new().with_cost_target(1.0);
        assert_eq!(score_cost_efficiency(&ArchitectureRecord::default(), Some(&sim)).score, 0);
    }

    #[test]
    fn test_generous_target_has_no_effect() {
        let record = ArchitectureRecord {
            scaling_type: ScalingMode::Automatic,
            database_type: DatabaseKind::KeyValueManaged,
            ..Default::default()
        };
        let sim = SimulationParams::new().with_cost_target(2_000.0);
        let result = score_cost_efficiency(&record, Some(&sim));
        assert_eq!(result.score, 20);
        assert_eq!(result.explanation.len(), 2);
        assert_eq!(result.explanation[1], "dynamodb offers pay-per-use flexibility (+5)");
    }
}
