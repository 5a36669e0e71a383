//! Reliability rule table
use crate::rule::{evaluate_rules, RuleInput, RuleOutcome, ScoreRule};
use archgrade_core::{ArchitectureRecord, CategoryResult};

pub const AZ_REDUNDANCY: &str = "AZ Redundancy";
pub const DISASTER_RECOVERY: &str = "Disaster Recovery Readiness";
pub const OBSERVABILITY: &str = "Observability";
pub const GEOGRAPHIC_REDUNDANCY: &str = "Geographic Redundancy";
pub const DEPLOYMENT_RELIABILITY: &str = "Deployment Reliability";
pub const SINGLE_POINT_OF_FAILURE: &str = "Single Point of Failure - Compute";

pub const RELIABILITY_RULES: &[ScoreRule] = &[
    ScoreRule::new("multi_az", Some(AZ_REDUNDANCY), multi_az),
    ScoreRule::new("replicas", None, replicas),
    ScoreRule::new("backup", Some(DISASTER_RECOVERY), backup),
    ScoreRule::new("monitoring", Some(OBSERVABILITY), monitoring),
    ScoreRule::new("health_checks", None, health_checks),
    ScoreRule::new("multi_region", Some(GEOGRAPHIC_REDUNDANCY), multi_region),
    ScoreRule::new("ci_cd", Some(DEPLOYMENT_RELIABILITY), ci_cd),
    ScoreRule::new("compute_redundancy", Some(SINGLE_POINT_OF_FAILURE), compute_redundancy),
];

/// Score reliability of the effective record
pub fn score_reliability(record: &ArchitectureRecord) -> CategoryResult {
    evaluate_rules(RELIABILITY_RULES, &RuleInput::new(record, None))
}

fn multi_az(input: &RuleInput) -> RuleOutcome {
    if input.record.database_multi_az {
        RuleOutcome::met(25, "Multi-AZ database deployment (+25)")
    } else {
        RuleOutcome::unmet(0, "No Multi-AZ detected (-25 potential)")
    }
}

fn replicas(input: &RuleInput) -> RuleOutcome {
    let replicas = input.record.database_replicas;
    if replicas == 0 {
        return RuleOutcome::neutral();
    }
    let points = replicas.saturating_mul(5).min(10) as i32;
    RuleOutcome::met(points, format!("{replicas} database replica(s) (+{points})"))
}

fn backup(input: &RuleInput) -> RuleOutcome {
    if input.record.backup_strategy {
        RuleOutcome::met(15, "Backup strategy configured (+15)")
    } else {
        RuleOutcome::unmet(0, "No backup strategy detected (+0)")
    }
}

fn monitoring(input: &RuleInput) -> RuleOutcome {
    let monitoring = input.record.monitoring;
    if monitoring.is_present() {
        RuleOutcome::met(15, format!("Monitoring ({monitoring}) active (+15)"))
    } else {
        RuleOutcome::unmet(0, "No monitoring detected (+0)")
    }
}

fn health_checks(input: &RuleInput) -> RuleOutcome {
    if input.record.load_balancer.is_present() {
        RuleOutcome::met(10, "Load balancer health checks implied (+10)")
    } else {
        RuleOutcome::neutral()
    }
}

fn multi_region(input: &RuleInput) -> RuleOutcome {
    if input.record.multi_region {
        RuleOutcome::met(10, "Multi-region redundancy (+10)")
    } else {
        RuleOutcome::unmet_silent()
    }
}

fn ci_cd(input: &RuleInput) -> RuleOutcome {
    if input.record.ci_cd {
        RuleOutcome::met(10, "CI/CD pipeline detected (+10)")
    } else {
        RuleOutcome::unmet_silent()
    }
}

fn compute_redundancy(input: &RuleInput) -> RuleOutcome {
    match input.record.compute_count {
        0 => RuleOutcome::neutral(),
        1 => RuleOutcome::unmet_silent(),
        n => RuleOutcome::met(5, format!("Multiple compute instances ({n}) (+5)")),
    }
}
