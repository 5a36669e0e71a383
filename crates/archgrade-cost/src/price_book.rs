//! Monthly list prices and optimization ratios
//!
//! Prices are whole currency units per month. Ratios are the fraction of
//! the current cost that remains after optimization.

use serde::{Deserialize, Serialize};

/// Price book used by [`crate::CostCalculator`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceBook {
    // === Compute ===
    pub vm_instance: f64,
    pub reserved_ratio: f64,
    pub spot_ratio: f64,
    pub vm_default_ratio: f64,

    pub container_task: f64,
    pub container_ratio: f64,

    pub function_base: f64,
    pub function_ratio: f64,

    pub cluster_control_plane: f64,
    pub cluster_node: f64,
    pub cluster_ratio: f64,

    // === Database ===
    pub relational_single_az: f64,
    pub relational_multi_az: f64,
    pub relational_replica: f64,
    pub relational_ratio: f64,
    pub relational_reserved_ratio: f64,

    pub distributed_single_az: f64,
    pub distributed_multi_az: f64,
    pub distributed_ratio: f64,

    pub key_value: f64,
    pub key_value_ratio: f64,

    // === Flat services ===
    pub cache: f64,
    pub cache_optimized: f64,
    pub application_lb: f64,
    pub network_lb: f64,
    pub cdn: f64,
    pub cdn_optimized: f64,
    pub monitoring: f64,
    pub waf: f64,

    // === Regions ===
    /// Multiplier for a multi-region footprint
    pub multi_region_factor: f64,
    /// Added per simulated extra region
    pub per_added_region: f64,
}

impl PriceBook {
    /// Regional scaling applied to every line and total
    pub fn region_multiplier(&self, multi_region: bool, added_regions: u32) -> f64 {
        let base = if multi_region { self.multi_region_factor } else { 1.0 };
        base + f64::from(added_regions) * self.per_added_region
    }
}

impl Default for PriceBook {
    fn default() -> Self {
        Self {
            vm_instance: 85.0,
            reserved_ratio: 0.6,
            spot_ratio: 0.5,
            vm_default_ratio: 0.8,

            container_task: 65.0,
            container_ratio: 0.75,

            function_base: 25.0,
            function_ratio: 0.9,

            cluster_control_plane: 150.0,
            cluster_node: 70.0,
            cluster_ratio: 0.7,

            relational_single_az: 140.0,
            relational_multi_az: 280.0,
            relational_replica: 100.0,
            relational_ratio: 0.85,
            relational_reserved_ratio: 0.65,

            distributed_single_az: 200.0,
            distributed_multi_az: 350.0,
            distributed_ratio: 0.8,

            key_value: 50.0,
            key_value_ratio: 0.7,

            cache: 45.0,
            cache_optimized: 40.0,
            application_lb: 25.0,
            network_lb: 20.0,
            cdn: 30.0,
            cdn_optimized: 25.0,
            monitoring: 35.0,
            waf: 20.0,

            multi_region_factor: 1.8,
            per_added_region: 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_multiplier() {
        let prices = PriceBook::default();
        assert_eq!(prices.region_multiplier(false, 0), 1.0);
        assert!((prices.region_multiplier(true, 0) - 1.8).abs() < 1e-9);
        assert!((prices.region_multiplier(false, 2) - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let prices: PriceBook = serde_json::from_str(r#"{"vm_instance": 100.0}"#).unwrap();
        assert_eq!(prices.vm_instance, 100.0);
        assert_eq!(prices.waf, 20.0);
    }
}
