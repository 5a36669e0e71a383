//! Security rule table
use crate::rule::{evaluate_rules, RuleInput, RuleOutcome, ScoreRule};
use archgrade_core::{ArchitectureRecord, CategoryResult};

pub const PERIMETER_DEFENSE: &str = "Perimeter Defense";
pub const DATA_ENCRYPTION: &str = "Data Encryption Standard";
pub const TRANSPORT_SECURITY: &str = "Transport Layer Security";
pub const NETWORK_ISOLATION: &str = "Network Isolation";
pub const NETWORK_SEGMENTATION: &str = "Network Segmentation";
pub const LEAST_PRIVILEGE: &str = "Least Privilege Access";

pub const SECURITY_RULES: &[ScoreRule] = &[
    ScoreRule::new("waf", Some(PERIMETER_DEFENSE), waf),
    ScoreRule::new("encryption", Some(DATA_ENCRYPTION), encryption),
    ScoreRule::new("tls", Some(TRANSPORT_SECURITY), tls),
    ScoreRule::new("vpc", Some(NETWORK_ISOLATION), vpc),
    ScoreRule::new("private_subnets", Some(NETWORK_SEGMENTATION), private_subnets),
    ScoreRule::new("iam", Some(LEAST_PRIVILEGE), iam),
    ScoreRule::new("security_groups", None, security_groups),
    ScoreRule::new("api_gateway", None, api_gateway),
];

/// Score security of the effective record
pub fn score_security(record: &ArchitectureRecord) -> CategoryResult {
    evaluate_rules(SECURITY_RULES, &RuleInput::new(record, None))
}

fn waf(input: &RuleInput) -> RuleOutcome {
    if input.record.waf {
        RuleOutcome::met(20, "WAF enabled (+20)")
    } else {
        RuleOutcome::unmet(0, "No WAF detected (+0)")
    }
}

fn encryption(input: &RuleInput) -> RuleOutcome {
    if input.record.encryption {
        RuleOutcome::met(15, "Encryption at rest/transit (+15)")
    } else {
        RuleOutcome::unmet(0, "No encryption mentioned (+0)")
    }
}

fn tls(input: &RuleInput) -> RuleOutcome {
    if input.record.ssl_tls {
        RuleOutcome::met(10, "SSL/TLS configured (+10)")
    } else {
        RuleOutcome::unmet_silent()
    }
}

fn vpc(input: &RuleInput) -> RuleOutcome {
    if input.record.vpc {
        RuleOutcome::met(15, "VPC configured (+15)")
    } else {
        RuleOutcome::unmet(0, "No VPC isolation (+0)")
    }
}

fn private_subnets(input: &RuleInput) -> RuleOutcome {
    if input.record.private_subnets {
        RuleOutcome::met(10, "Private subnets configured (+10)")
    } else {
        RuleOutcome::unmet_silent()
    }
}

fn iam(input: &RuleInput) -> RuleOutcome {
    if input.record.iam_configured {
        RuleOutcome::met(15, "IAM policies configured (+15)")
    } else {
        RuleOutcome::unmet(0, "No IAM mentioned (+0)")
    }
}

fn security_groups(input: &RuleInput) -> RuleOutcome {
    if input.record.security_groups {
        RuleOutcome::met(10, "Security groups configured (+10)")
    } else {
        RuleOutcome::neutral()
    }
}

fn api_gateway(input: &RuleInput) -> RuleOutcome {
    if input.record.api_gateway {
        RuleOutcome::met(5, "API Gateway adds throttling/auth layer (+5)")
    } else {
        RuleOutcome::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_configured() {
        let result = score_security(&ArchitectureRecord::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.violated_principles.len(), 6);
        // TLS and subnet gaps are recorded as principles only
        assert_eq!(result.explanation.len(), 4);
    }

    #[test]
    fn test_every_control_present() {
        let record = ArchitectureRecord {
            waf: true,
            encryption: true,
            ssl_tls: true,
            vpc: true,
            private_subnets: true,
            iam_configured: true,
            security_groups: true,
            api_gateway: true,
            ..Default::default()
        };
        let result = score_security(&record);
        assert_eq!(result.score, 100);
        assert!(result.violated_principles.is_empty());
        assert_eq!(result.explanation.len(), 8);
    }

    #[test]
    fn test_network_only() {
        let record = ArchitectureRecord {
            vpc: true,
            private_subnets: true,
            iam_configured: true,
            ..Default::default()
        };
        let result = score_security(&record);
        assert_eq!(result.score, 40);
        assert_eq!(
            result.violated_principles,
            vec![PERIMETER_DEFENSE, DATA_ENCRYPTION, TRANSPORT_SECURITY]
        );
    }
}
