//! Normalization of untrusted architecture records.
//!
//! Decomposition output comes from a language model and is treated as
//! untrusted. Instead of failing on odd values, each field is coerced into
//! its domain:
//! - unknown enum values become `none`
//! - booleans accept `true/false`, `0/1` and common yes/no strings
//! - counters clamp negatives to 0 and round fractions
//!
//! Only a top-level value that is not an object is rejected.

use crate::data_model::{
    ArchitectureRecord, CachingLayer, CdnKind, ComputeModel, DatabaseKind, LoadBalancerKind,
    MonitoringKind, OrchestrationKind, ScalingMode,
};
use crate::error::EngineError;
use crate::simulation::SimulationParams;
use serde_json::{Map, Value};

/// Build an `ArchitectureRecord` from arbitrary JSON
pub fn normalize_record(value: &Value) -> Result<ArchitectureRecord, EngineError> {
    let fields = value.as_object().ok_or_else(|| {
        EngineError::MalformedInput(format!(
            "architecture record must be a JSON object, got {}",
            kind_of(value)
        ))
    })?;

    Ok(ArchitectureRecord {
        compute_model: ComputeModel::parse(&text(fields, "compute_model")),
        compute_count: count_u32(fields, "compute_count"),
        scaling_type: ScalingMode::parse(&text(fields, "scaling_type")),
        database_type: DatabaseKind::parse(&text(fields, "database_type")),
        database_multi_az: flag(fields, "database_multi_az"),
        database_replicas: count_u32(fields, "database_replicas"),
        caching_layer: CachingLayer::parse(&text(fields, "caching_layer")),
        load_balancer: LoadBalancerKind::parse(&text(fields, "load_balancer")),
        cdn: CdnKind::parse(&text(fields, "cdn")),
        api_gateway: flag(fields, "api_gateway"),
        vpc: flag(fields, "vpc"),
        private_subnets: flag(fields, "private_subnets"),
        waf: flag(fields, "waf"),
        encryption: flag(fields, "encryption"),
        ssl_tls: flag(fields, "ssl_tls"),
        iam_configured: flag(fields, "iam_configured"),
        security_groups: flag(fields, "security_groups"),
        monitoring: MonitoringKind::parse(&text(fields, "monitoring")),
        ci_cd: flag(fields, "ci_cd"),
        container_orchestration: OrchestrationKind::parse(&text(fields, "container_orchestration")),
        reserved_instances: flag(fields, "reserved_instances"),
        spot_instances: flag(fields, "spot_instances"),
        serverless_components: count_u32(fields, "serverless_components"),
        multi_region: flag(fields, "multi_region"),
        backup_strategy: flag(fields, "backup_strategy"),
        microservices: flag(fields, "microservices"),
        estimated_users: count(fields, "estimated_users"),
    })
}

/// Build `SimulationParams` from arbitrary JSON.
///
/// A `null` or missing value yields `None`; anything else that is not an
/// object is rejected.
pub fn normalize_simulation(value: Option<&Value>) -> Result<Option<SimulationParams>, EngineError> {
    let fields = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(fields)) => fields,
        Some(other) => {
            return Err(EngineError::MalformedInput(format!(
                "simulation must be a JSON object, got {}",
                kind_of(other)
            )))
        }
    };

    let traffic_multiplier = number(fields, "traffic_multiplier").filter(|m| m.is_finite() && *m > 0.0);
    let cost_target = number(fields, "cost_target").filter(|t| t.is_finite() && *t >= 0.0);

    Ok(Some(SimulationParams {
        traffic_multiplier,
        add_regions: count_u32(fields, "add_regions"),
        cost_target,
    }))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn text(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn flag(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        ),
        _ => false,
    }
}

fn number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn count(fields: &Map<String, Value>, key: &str) -> u64 {
    match fields.get(key) {
        Some(Value::Number(n)) if n.is_u64() => n.as_u64().unwrap_or(0),
        _ => number(fields, key)
            .filter(|n| n.is_finite() && *n > 0.0)
            .map(|n| n.round().min(u64::MAX as f64) as u64)
            .unwrap_or(0),
    }
}

fn count_u32(fields: &Map<String, Value>, key: &str) -> u32 {
    u32::try_from(count(fields, key)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_full_record() {
        let record = normalize_record(&json!({
            "compute_model": "ec2",
            "compute_count": 3,
            "scaling_type": "auto_scaling",
            "database_type": "rds",
            "database_multi_az": true,
            "load_balancer": "alb",
            "monitoring": "CloudWatch",
            "estimated_users": 5000
        }))
        .unwrap();

        assert_eq!(record.compute_model, ComputeModel::VirtualMachine);
        assert_eq!(record.compute_count, 3);
        assert_eq!(record.scaling_type, ScalingMode::Automatic);
        assert_eq!(record.database_type, DatabaseKind::RelationalManaged);
        assert!(record.database_multi_az);
        assert_eq!(record.monitoring, MonitoringKind::CloudWatch);
        assert_eq!(record.estimated_users, 5000);
    }

    #[test]
    fn test_unknown_values_fall_back_to_defaults() {
        let record = normalize_record(&json!({
            "compute_model": "mainframe",
            "compute_count": -4,
            "database_replicas": 2.6,
            "serverless_components": "3",
            "waf": "yes",
            "vpc": 1,
            "encryption": "maybe",
            "cdn": 42
        }))
        .unwrap();

        assert_eq!(record.compute_model, ComputeModel::None);
        assert_eq!(record.compute_count, 0);
        assert_eq!(record.database_replicas, 3);
        assert_eq!(record.serverless_components, 3);
        assert!(record.waf);
        assert!(record.vpc);
        assert!(!record.encryption);
        assert_eq!(record.cdn, CdnKind::None);
    }

    #[test]
    fn test_empty_object_is_default_record() {
        let record = normalize_record(&json!({})).unwrap();
        assert_eq!(record, ArchitectureRecord::default());
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = normalize_record(&json!(["ec2"])).unwrap_err();
        assert!(matches!(err, EngineError::MalformedInput(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_normalize_simulation() {
        assert_eq!(normalize_simulation(None).unwrap(), None);
        assert_eq!(normalize_simulation(Some(&Value::Null)).unwrap(), None);

        let sim = normalize_simulation(Some(&json!({
            "traffic_multiplier": 3,
            "add_regions": 2,
            "cost_target": -10
        })))
        .unwrap()
        .unwrap();

        assert_eq!(sim.traffic_multiplier, Some(3.0));
        assert_eq!(sim.add_regions, 2);
        assert_eq!(sim.cost_target, None);

        let sim = normalize_simulation(Some(&json!({"traffic_multiplier": 0})))
            .unwrap()
            .unwrap();
        assert_eq!(sim.traffic_multiplier, None);
        assert_eq!(sim.multiplier(), 1.0);

        assert!(normalize_simulation(Some(&json!("fast"))).is_err());
    }
}
