//! Risk detection for deployments
//!
//! Evaluates a fixed, ordered list of weakness checks against the effective
//! record. Each check yields at most one finding; the aggregate level is a
//! strict precedence over finding severities, not a weighted sum.

use archgrade_core::{ArchitectureRecord, ComputeModel, ScalingMode};
use serde::{Deserialize, Serialize};

/// Severity of a finding, and the aggregate risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl RiskLevel {
    /// Aggregate level for a set of findings.
    ///
    /// Any critical finding wins; otherwise two or more high findings are
    /// high, exactly one is medium, none is low.
    pub fn aggregate(findings: &[RiskFinding]) -> Self {
        let count = |level: RiskLevel| findings.iter().filter(|f| f.severity == level).count();

        if count(RiskLevel::Critical) > 0 {
            RiskLevel::Critical
        } else {
            match count(RiskLevel::High) {
                0 => RiskLevel::Low,
                1 => RiskLevel::Medium,
                _ => RiskLevel::High,
            }
        }
    }

    /// Whether this level warrants immediate remediation
    pub fn requires_attention(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            other => Err(format!("unknown risk level: {other}")),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

/// A single detected weakness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    /// Kind of risk, e.g. "Single Point of Failure"
    #[serde(rename = "type")]
    pub risk_type: String,
    /// Affected component
    pub component: String,
    /// What happens if the risk materializes
    pub impact: String,
    pub severity: RiskLevel,
}

/// Findings plus their aggregate level
///
/// Finding severities go out lowercase; the aggregate level uses the
/// capitalized label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    #[serde(with = "aggregate_label")]
    pub risk_level: RiskLevel,
    pub risks: Vec<RiskFinding>,
}

impl RiskAnalysis {
    pub fn new(risks: Vec<RiskFinding>) -> Self {
        Self {
            risk_level: RiskLevel::aggregate(&risks),
            risks,
        }
    }

    /// Number of findings at a severity
    pub fn count(&self, severity: RiskLevel) -> usize {
        self.risks.iter().filter(|r| r.severity == severity).count()
    }
}

/// Aggregate level as "Low" / "Medium" / "High" / "Critical"
mod aggregate_label {
    use super::RiskLevel;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(level: &RiskLevel, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(level)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RiskLevel, D::Error> {
        String::deserialize(deserializer)?.parse().map_err(D::Error::custom)
    }
}

/// One entry of the risk table
#[derive(Debug, Clone, Copy)]
pub struct RiskCheck {
    pub risk_type: &'static str,
    pub severity: RiskLevel,
    pub impact: &'static str,
    /// Whether the weakness is present
    pub applies: fn(&ArchitectureRecord) -> bool,
    /// Label of the affected component
    pub component: fn(&ArchitectureRecord) -> String,
}

impl RiskCheck {
    pub fn evaluate(&self, record: &ArchitectureRecord) -> Option<RiskFinding> {
        if !(self.applies)(record) {
            return None;
        }
        Some(RiskFinding {
            risk_type: self.risk_type.to_string(),
            component: (self.component)(record),
            impact: self.impact.to_string(),
            severity: self.severity,
        })
    }
}

pub const RISK_CHECKS: &[RiskCheck] = &[
    RiskCheck {
        risk_type: "Single Point of Failure",
        severity: RiskLevel::Critical,
        impact: "Complete service downtime if instance fails. No failover capability.",
        applies: |r| r.compute_count == 1 && r.compute_model != ComputeModel::ServerlessFunction,
        component: |r| format!("Single {} instance", r.compute_model.as_str().to_uppercase()),
    },
    RiskCheck {
        risk_type: "Scaling Bottleneck",
        severity: RiskLevel::High,
        impact: "Cannot handle traffic spikes. Service degradation under load.",
        applies: |r| r.scaling_type == ScalingMode::None,
        component: |_| "Compute layer".to_string(),
    },
    RiskCheck {
        risk_type: "Traffic Distribution Gap",
        severity: RiskLevel::Medium,
        impact: "Multiple instances without load distribution. Uneven resource utilization.",
        applies: |r| r.compute_count > 1 && !r.load_balancer.is_present(),
        component: |_| "Network layer".to_string(),
    },
    RiskCheck {
        risk_type: "Database Availability Risk",
        severity: RiskLevel::High,
        impact: "Single AZ deployment risks data loss and downtime during AZ failure.",
        applies: |r| r.database_type.is_present() && !r.database_multi_az,
        component: |r| format!("{} database", r.database_type.as_str().to_uppercase()),
    },
    RiskCheck {
        risk_type: "Data Loss Risk",
        severity: RiskLevel::Critical,
        impact: "No backup strategy detected. Risk of irrecoverable data loss.",
        applies: |r| r.database_type.is_present() && !r.backup_strategy,
        component: |_| "Database layer".to_string(),
    },
    RiskCheck {
        risk_type: "Application Security Risk",
        severity: RiskLevel::High,
        impact: "No WAF protection against OWASP Top 10 attacks (SQLi, XSS, etc).",
        applies: |r| !r.waf,
        component: |_| "Edge/Perimeter".to_string(),
    },
    RiskCheck {
        risk_type: "Network Isolation Risk",
        severity: RiskLevel::High,
        impact: "Resources may be publicly accessible. Increased attack surface.",
        applies: |r| !r.vpc,
        component: |_| "Network layer".to_string(),
    },
    RiskCheck {
        risk_type: "Data Exposure Risk",
        severity: RiskLevel::Medium,
        impact: "Unencrypted data at rest/transit. Compliance and regulatory risk.",
        applies: |r| !r.encryption,
        component: |_| "Data layer".to_string(),
    },
    RiskCheck {
        risk_type: "Blind Spot Risk",
        severity: RiskLevel::Medium,
        impact: "No monitoring means delayed incident detection. Increased MTTR.",
        applies: |r| !r.monitoring.is_present(),
        component: |_| "Observability".to_string(),
    },
    RiskCheck {
        risk_type: "Performance Saturation",
        severity: RiskLevel::Medium,
        impact: "High traffic without caching will cause latency spikes and DB overload.",
        applies: |r| !r.caching_layer.is_present() && r.estimated_users > 1000,
        component: |_| "Application layer".to_string(),
    },
    RiskCheck {
        risk_type: "Regional Dependency",
        severity: RiskLevel::Low,
        impact: "Single region deployment. Regional outage causes complete service loss.",
        applies: |r| !r.multi_region,
        component: |_| "Infrastructure".to_string(),
    },
];

/// Detect risks in the effective record
pub fn analyze_risks(record: &ArchitectureRecord) -> RiskAnalysis {
    RiskAnalysis::new(
        RISK_CHECKS
            .iter()
            .filter_map(|check| check.evaluate(record))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgrade_core::{CachingLayer, DatabaseKind, LoadBalancerKind, MonitoringKind};

    fn hardened() -> ArchitectureRecord {
        ArchitectureRecord {
            compute_model: ComputeModel::OrchestratedCluster,
            compute_count: 3,
            scaling_type: ScalingMode::Automatic,
            load_balancer: LoadBalancerKind::ApplicationLayer,
            database_type: DatabaseKind::RelationalManaged,
            database_multi_az: true,
            backup_strategy: true,
            waf: true,
            vpc: true,
            encryption: true,
            monitoring: MonitoringKind::Prometheus,
            caching_layer: CachingLayer::Managed,
            multi_region: true,
            estimated_users: 50_000,
            ..Default::default()
        }
    }

    fn finding(severity: RiskLevel) -> RiskFinding {
        RiskFinding {
            risk_type: "t".to_string(),
            component: "c".to_string(),
            impact: "i".to_string(),
            severity,
        }
    }

    #[test]
    fn test_aggregate_precedence() {
        use RiskLevel::*;
        assert_eq!(RiskLevel::aggregate(&[]), Low);
        assert_eq!(RiskLevel::aggregate(&[finding(Medium), finding(Low)]), Low);
        assert_eq!(RiskLevel::aggregate(&[finding(High)]), Medium);
        assert_eq!(RiskLevel::aggregate(&[finding(High), finding(High)]), High);
        assert_eq!(
            RiskLevel::aggregate(&[finding(Low), finding(Critical)]),
            Critical
        );
    }

    #[test]
    fn test_hardened_record_has_no_findings() {
        let analysis = analyze_risks(&hardened());
        assert!(analysis.risks.is_empty());
        assert_eq!(analysis.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_empty_record_findings_in_order() {
        let analysis = analyze_risks(&ArchitectureRecord::default());
        let types: Vec<&str> = analysis.risks.iter().map(|r| r.risk_type.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "Scaling Bottleneck",
                "Application Security Risk",
                "Network Isolation Risk",
                "Data Exposure Risk",
                "Blind Spot Risk",
                "Regional Dependency",
            ]
        );
        assert_eq!(analysis.risk_level, RiskLevel::High);
        assert!(analysis.risk_level.requires_attention());
    }

    #[test]
    fn test_single_instance_is_critical_unless_serverless() {
        let record = ArchitectureRecord {
            compute_model: ComputeModel::VirtualMachine,
            compute_count: 1,
            ..hardened()
        };
        let analysis = analyze_risks(&record);
        assert_eq!(analysis.risk_level, RiskLevel::Critical);
        assert_eq!(analysis.risks[0].component, "Single EC2 instance");

        let record = ArchitectureRecord {
            compute_model: ComputeModel::ServerlessFunction,
            compute_count: 1,
            ..hardened()
        };
        assert_eq!(analyze_risks(&record).count(RiskLevel::Critical), 0);
    }

    #[test]
    fn test_aggregate_label_is_capitalized() {
        let record = ArchitectureRecord {
            compute_model: ComputeModel::VirtualMachine,
            compute_count: 1,
            ..Default::default()
        };
        let value = serde_json::to_value(analyze_risks(&record)).unwrap();
        assert_eq!(value["risk_level"], "Critical");
        assert_eq!(value["risks"][0]["severity"], "critical");

        let back: RiskAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(back.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_unbalanced_instances_need_a_load_balancer() {
        let record = ArchitectureRecord {
            compute_model: ComputeModel::VirtualMachine,
            compute_count: 3,
            scaling_type: ScalingMode::None,
            load_balancer: LoadBalancerKind::None,
            ..hardened()
        };
        let analysis = analyze_risks(&record);
        let found: Vec<(&str, RiskLevel)> = analysis
            .risks
            .iter()
            .map(|r| (r.risk_type.as_str(), r.severity))
            .collect();
        assert_eq!(
            found,
            vec![
                ("Scaling Bottleneck", RiskLevel::High),
                ("Traffic Distribution Gap", RiskLevel::Medium),
            ]
        );
        assert_eq!(analysis.risks[1].component, "Network layer");

        let single = ArchitectureRecord {
            compute_count: 1,
            ..record
        };
        assert!(analyze_risks(&single)
            .risks
            .iter()
            .all(|r| r.risk_type != "Traffic Distribution Gap"));
    }

    #[test]
    fn test_saturation_needs_traffic() {
        let record = ArchitectureRecord {
            caching_layer: CachingLayer::None,
            estimated_users: 1000,
            ..hardened()
        };
        assert!(analyze_risks(&record).risks.is_empty());

        let record = ArchitectureRecord {
            estimated_users: 1001,
            ..record
        };
        let analysis = analyze_risks(&record);
        assert_eq!(analysis.risks.len(), 1);
        assert_eq!(analysis.risks[0].risk_type, "Performance Saturation");
        assert_eq!(analysis.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_database_findings() {
        let record = ArchitectureRecord {
            database_type: DatabaseKind::KeyValueManaged,
            database_multi_az: false,
            backup_strategy: false,
            ..hardened()
        };
        let analysis = analyze_risks(&record);
        assert_eq!(analysis.risks.len(), 2);
        assert_eq!(analysis.risks[0].component, "DYNAMODB database");
        assert_eq!(analysis.risk_level, RiskLevel::Critical);
    }
}
