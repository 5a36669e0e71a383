//! Improvement planning
//!
//! Each weak category contributes one phase made only of the remediations
//! whose condition the record does not yet meet. Phases are numbered in
//! category order, followed by geographic expansion for single-region
//! deployments.

use crate::profile::ScoringProfile;
use archgrade_core::{ArchitectureRecord, Category, CategoryScores, ComputeModel, MAX_CATEGORY_SCORE};
use serde::{Deserialize, Serialize};

/// One remediation phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementPhase {
    pub phase: u32,
    pub title: String,
    pub actions: Vec<String>,
    pub impact: String,
}

/// A remediation and the gap that calls for it
#[derive(Debug, Clone, Copy)]
pub struct PlanAction {
    pub needed: fn(&ArchitectureRecord) -> bool,
    pub text: &'static str,
}

/// Remediations offered for one category
#[derive(Debug, Clone, Copy)]
pub struct PhaseTemplate {
    pub category: Category,
    pub title: &'static str,
    pub actions: &'static [PlanAction],
}

const fn action(needed: fn(&ArchitectureRecord) -> bool, text: &'static str) -> PlanAction {
    PlanAction { needed, text }
}

pub const PHASE_TEMPLATES: &[PhaseTemplate] = &[
    PhaseTemplate {
        category: Category::Scalability,
        title: "Scalability Foundation",
        actions: &[
            action(|r| !r.auto_scales(), "Implement Auto Scaling Groups with target tracking policies"),
            action(|r| !r.load_balancer.is_present(), "Deploy Application Load Balancer with health checks"),
            action(|r| !r.caching_layer.is_present(), "Add ElastiCache Redis for session/query caching"),
        ],
    },
    PhaseTemplate {
        category: Category::Reliability,
        title: "Reliability Hardening",
        actions: &[
            action(|r| !r.database_multi_az, "Enable Multi-AZ for database failover"),
            action(|r| !r.backup_strategy, "Configure automated daily backups with 30-day retention"),
            action(|r| !r.monitoring.is_present(), "Deploy CloudWatch with custom dashboards and alarms"),
            action(|r| !r.ci_cd, "Set up CI/CD pipeline with blue-green deployments"),
        ],
    },
    PhaseTemplate {
        category: Category::Security,
        title: "Security Posture",
        actions: &[
            action(|r| !r.waf, "Enable AWS WAF with managed rule sets (OWASP)"),
            action(|r| !r.encryption, "Enable encryption at rest (KMS) and in transit"),
            action(|r| !r.vpc, "Migrate to VPC with public/private subnet architecture"),
            action(|r| !r.iam_configured, "Implement IAM roles with least-privilege policies"),
        ],
    },
    PhaseTemplate {
        category: Category::CostEfficiency,
        title: "Cost Optimization",
        actions: &[
            action(
                |r| !r.reserved_instances && r.compute_model == ComputeModel::VirtualMachine,
                "Purchase Reserved Instances for baseline capacity (up to 40% savings)",
            ),
            action(|r| r.serverless_components == 0, "Migrate suitable workloads to Lambda/Fargate"),
            action(|r| !r.cdn.is_present(), "Add CloudFront CDN to reduce origin server costs"),
        ],
    },
];

pub const GEOGRAPHIC_EXPANSION: &str = "Geographic Expansion";
const GEOGRAPHIC_ACTIONS: &[&str] = &[
    "Deploy to secondary AWS region with Route53 failover",
    "Configure cross-region database replication",
    "Set up CloudFront with multi-origin configuration",
];
const GEOGRAPHIC_IMPACT: &str = "+5-10 points across all categories";

pub const ADVANCED_OPTIMIZATION: &str = "Advanced Optimization";
const ADVANCED_ACTIONS: &[&str] = &[
    "Implement chaos engineering with AWS Fault Injection Simulator",
    "Add distributed tracing with X-Ray",
    "Implement FinOps practices with Cost Explorer automation",
];
const ADVANCED_IMPACT: &str = "Operational excellence and cost visibility";

/// Build the ordered remediation phases for an evaluated record
pub fn plan_improvements(
    record: &ArchitectureRecord,
    scores: &CategoryScores,
    profile: &ScoringProfile,
) -> Vec<ImprovementPhase> {
    let mut phases: Vec<ImprovementPhase> = Vec::new();
    for template in PHASE_TEMPLATES {
        let score = scores.get(template.category).score;
        if score >= profile.plan_thresholds.get(template.category) {
            continue;
        }

        let actions: Vec<String> = template
            .actions
            .iter()
            .filter(|a| (a.needed)(record))
            .map(|a| a.text.to_string())
            .collect();
        if actions.is_empty() {
            continue;
        }

        let points = profile
            .impact_caps
            .get(template.category)
            .min(MAX_CATEGORY_SCORE.saturating_sub(score));
        let phase = phases.len() as u32 + 1;
        phases.push(ImprovementPhase {
            phase,
            title: template.title.to_string(),
            actions,
            impact: format!("+{points} {} points", template.category.label()),
        });
    }

    if !record.multi_region {
        let phase = phases.len() as u32 + 1;
        phases.push(fixed_phase(phase, GEOGRAPHIC_EXPANSION, GEOGRAPHIC_ACTIONS, GEOGRAPHIC_IMPACT));
    }

    if phases.is_empty() {
        phases.push(fixed_phase(1, ADVANCED_OPTIMIZATION, ADVANCED_ACTIONS, ADVANCED_IMPACT));
    }

    phases
}

fn fixed_phase(phase: u32, title: &str, actions: &[&str], impact: &str) -> ImprovementPhase {
    ImprovementPhase {
        phase,
        title: title.to_string(),
        actions: actions.iter().map(|a| a.to_string()).collect(),
        impact: impact.to_string(),
    }
}
