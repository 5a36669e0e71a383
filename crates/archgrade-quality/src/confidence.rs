//! Confidence estimation
//!
//! Confidence is the share of expected fields that the record actually
//! populates. A decomposed description that mentions little scores low
//! confidence even when what it mentions scores well.

use archgrade_core::ArchitectureRecord;

/// Expected fields and how to tell they were populated
pub const CONFIDENCE_CHECKS: &[(&str, fn(&ArchitectureRecord) -> bool)] = &[
    ("compute_model", |r| r.compute_model.is_present()),
    ("compute_count", |r| r.compute_count > 0),
    ("scaling_type", |r| r.scaling_type.is_present()),
    ("database_type", |r| r.database_type.is_present()),
    ("load_balancer", |r| r.load_balancer.is_present()),
    ("vpc", |r| r.vpc),
    ("monitoring", |r| r.monitoring.is_present()),
    ("encryption", |r| r.encryption),
    ("ssl_tls", |r| r.ssl_tls),
    ("iam_configured", |r| r.iam_configured),
    ("caching_layer", |r| r.caching_layer.is_present()),
    ("cdn", |r| r.cdn.is_present()),
    ("backup_strategy", |r| r.backup_strategy),
    ("ci_cd", |r| r.ci_cd),
    ("estimated_users", |r| r.estimated_users > 0),
];

/// Populated share, rounded to two decimals
pub fn estimate_confidence(record: &ArchitectureRecord) -> f64 {
    let populated = CONFIDENCE_CHECKS
        .iter()
        .filter(|(_, populated)| populated(record))
        .count();
    let ratio = populated as f64 / CONFIDENCE_CHECKS.len() as f64;
    (ratio * 100.0).round() / 100.0
}

/// Expected fields the record leaves empty, in check order
pub fn missing_fields(record: &ArchitectureRecord) -> Vec<&'static str> {
    CONFIDENCE_CHECKS
        .iter()
        .filter(|(_, populated)| !populated(record))
        .map(|(field, _)| *field)
        .collect()
}
