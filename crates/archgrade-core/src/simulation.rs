//! What-if simulation overlay
//!
//! Simulation parameters never mutate the submitted record; they derive an
//! effective record that every scorer and analyzer runs against.

use crate::data_model::ArchitectureRecord;
use serde::{Deserialize, Serialize};

/// Users assumed when the record does not estimate any
pub const DEFAULT_SIMULATED_USERS: u64 = 100;

/// Optional what-if parameters for one evaluation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Traffic multiplier (positive, 1 when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_multiplier: Option<f64>,
    /// Extra regions to deploy into
    pub add_regions: u32,
    /// Monthly cost ceiling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_target: Option<f64>,
}

impl SimulationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_traffic(mut self, multiplier: f64) -> Self {
        self.traffic_multiplier = Some(multiplier);
        self
    }

    pub fn with_regions(mut self, regions: u32) -> Self {
        self.add_regions = regions;
        self
    }

    pub fn with_cost_target(mut self, target: f64) -> Self {
        self.cost_target = Some(target);
        self
    }

    /// Effective traffic multiplier
    pub fn multiplier(&self) -> f64 {
        match self.traffic_multiplier {
            Some(m) if m.is_finite() && m > 0.0 => m,
            _ => 1.0,
        }
    }

    /// Cost target, only when strictly positive
    pub fn active_cost_target(&self) -> Option<f64> {
        self.cost_target.filter(|t| t.is_finite() && *t > 0.0)
    }

    /// True when this overlay changes nothing
    pub fn is_identity(&self) -> bool {
        self.multiplier() <= 1.0 && self.add_regions == 0
    }
}

/// Derive the effective record for a simulation.
///
/// Multi-region is idempotent under repeated application; the user scaling
/// is not, so callers apply the overlay exactly once per evaluation.
pub fn apply_simulation(
    record: &ArchitectureRecord,
    sim: Option<&SimulationParams>,
) -> ArchitectureRecord {
    let mut effective = record.clone();
    let Some(sim) = sim else {
        return effective;
    };

    if sim.add_regions > 0 {
        effective.multi_region = true;
    }

    let multiplier = sim.multiplier();
    if multiplier > 1.0 {
        let base = if effective.estimated_users == 0 {
            DEFAULT_SIMULATED_USERS
        } else {
            effective.estimated_users
        };
        effective.estimated_users = (base as f64 * multiplier).round().min(u64::MAX as f64) as u64;
    }

    effective
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArchitectureRecord {
        ArchitectureRecord {
            estimated_users: 500,
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_simulation_is_identity() {
        let record = sample();
        assert_eq!(apply_simulation(&record, None), record);
    }

    #[test]
    fn test_identity_parameters() {
        let record = sample();
        let sim = SimulationParams::new().with_traffic(1.0).with_regions(0);
        assert!(sim.is_identity());
        assert_eq!(apply_simulation(&record, Some(&sim)), record);
    }

    #[test]
    fn test_regions_set_multi_region_idempotently() {
        let sim = SimulationParams::new().with_regions(2);
        let once = apply_simulation(&sample(), Some(&sim));
        let twice = apply_simulation(&once, Some(&sim));
        assert!(once.multi_region);
        assert_eq!(once.multi_region, twice.multi_region);
    }

    #[test]
    fn test_traffic_scales_users() {
        let sim = SimulationParams::new().with_traffic(2.5);
        let effective = apply_simulation(&sample(), Some(&sim));
        assert_eq!(effective.estimated_users, 1250);

        // Unknown users start from the default baseline
        let effective = apply_simulation(&ArchitectureRecord::default(), Some(&sim));
        assert_eq!(effective.estimated_users, 250);

        // Not idempotent under repetition
        let again = apply_simulation(&apply_simulation(&sample(), Some(&sim)), Some(&sim));
        assert_eq!(again.estimated_users, 3125);
    }

    #[test]
    fn test_traffic_below_one_leaves_users() {
        let sim = SimulationParams::new().with_traffic(0.5);
        assert_eq!(apply_simulation(&sample(), Some(&sim)).estimated_users, 500);
    }

    #[test]
    fn test_cost_target_activation() {
        assert_eq!(SimulationParams::new().active_cost_target(), None);
        assert_eq!(SimulationParams::new().with_cost_target(0.0).active_cost_target(), None);
        assert_eq!(
            SimulationParams::new().with_cost_target(250.0).active_cost_target(),
            Some(250.0)
        );
    }
}
