//! archgrade core: Architecture Record, Simulation Overlay and shared types
//!
//! Everything the scorers consume and produce lives here so the policy,
//! cost and quality crates depend on one data model.

pub mod data_model;
pub mod error;
pub mod normalizer;
pub mod report;
pub mod simulation;

pub use data_model::{
    ArchitectureRecord, CachingLayer, CdnKind, ComputeModel, DatabaseKind, LoadBalancerKind,
    MonitoringKind, OrchestrationKind, ScalingMode,
};
pub use error::EngineError;
pub use normalizer::{normalize_record, normalize_simulation};
pub use report::{Category, CategoryResult, CategoryScores, MAX_CATEGORY_SCORE};
pub use simulation::{apply_simulation, SimulationParams};

use serde::Serialize;

/// archgrade engine version
pub const ARCHGRADE_VERSION: &str = "1.0.0";

/// Content fingerprint of an evaluation input.
///
/// Hashes the record and simulation only. Two evaluations with the same
/// fingerprint under the same profile and price book produce the same
/// result.
pub fn fingerprint(record: &ArchitectureRecord, sim: Option<&SimulationParams>) -> String {
    #[derive(Serialize)]
    struct Input<'a> {
        record: &'a ArchitectureRecord,
        simulation: Option<&'a SimulationParams>,
    }

    let bytes = serde_json::to_vec(&Input { record, simulation: sim }).unwrap_or_default();
    format!("blake3:{}", blake3::hash(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_stable_and_sensitive() {
        let record = ArchitectureRecord::default();
        let a = fingerprint(&record, None);
        assert_eq!(a, fingerprint(&record, None));
        assert!(a.starts_with("blake3:"));

        let sim = SimulationParams::new().with_regions(1);
        assert_ne!(a, fingerprint(&record, Some(&sim)));

        let other = ArchitectureRecord {
            waf: true,
            ..Default::default()
        };
        assert_ne!(a, fingerprint(&other, None));
    }
}
