//! archgrade cost: monthly cost projection
//!
//! Builds a per-category breakdown of current and optimized monthly cost
//! from a price book, scales it for regional footprint, and clamps the
//! optimized total to a simulated cost target.
//!
//! # Example
//!
//! ```
//! use archgrade_core::{ArchitectureRecord, ComputeModel};
//! use archgrade_cost::analyze_costs;
//!
//! let record = ArchitectureRecord {
//!     compute_model: ComputeModel::VirtualMachine,
//!     compute_count: 2,
//!     ..Default::default()
//! };
//!
//! let costs = analyze_costs(&record, None);
//! assert_eq!(costs.total_current, 170);
//! assert_eq!(costs.total_optimized, 136);
//! assert_eq!(costs.monthly_savings, 34);
//! ```

pub mod price_book;

pub use price_book::PriceBook;

use archgrade_core::{
    ArchitectureRecord, ComputeModel, DatabaseKind, LoadBalancerKind, SimulationParams,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cost breakdown category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    Compute,
    Database,
    Caching,
    #[serde(rename = "Load Balancer")]
    LoadBalancer,
    #[serde(rename = "CDN")]
    Cdn,
    Monitoring,
    #[serde(rename = "WAF")]
    Waf,
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            CostCategory::Compute => "Compute",
            CostCategory::Database => "Database",
            CostCategory::Caching => "Caching",
            CostCategory::LoadBalancer => "Load Balancer",
            CostCategory::Cdn => "CDN",
            CostCategory::Monitoring => "Monitoring",
            CostCategory::Waf => "WAF",
        };
        f.write_str(label)
    }
}

/// One line of the breakdown, in whole currency units per month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine {
    pub category: CostCategory,
    pub current: u64,
    pub optimized: u64,
}

/// Aggregate cost projection
///
/// `total_current - monthly_savings == total_optimized` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysis {
    pub total_current: u64,
    pub total_optimized: u64,
    pub monthly_savings: u64,
    /// Regional multiplier applied to every line
    pub region_multiplier: f64,
    pub breakdown: Vec<CostLine>,
}

/// Cost projection with a configurable price book
#[derive(Debug, Clone, Default)]
pub struct CostCalculator {
    pub prices: PriceBook,
}

impl CostCalculator {
    pub fn new(prices: PriceBook) -> Self {
        Self { prices }
    }

    /// Project monthly cost for the effective record
    pub fn analyze(
        &self,
        record: &ArchitectureRecord,
        simulation: Option<&SimulationParams>,
    ) -> CostAnalysis {
        let traffic = simulation.map(SimulationParams::multiplier).unwrap_or(1.0);
        let p = &self.prices;
        let mut lines: Vec<CostLine> = Vec::new();

        let (compute, compute_opt) = self.compute_cost(record, traffic);
        lines.push(line(CostCategory::Compute, compute, compute_opt));

        let (db, db_opt) = self.database_cost(record, traffic);
        if db > 0.0 {
            lines.push(line(CostCategory::Database, db, db_opt));
        }

        if record.caching_layer.is_present() {
            lines.push(line(CostCategory::Caching, p.cache, p.cache_optimized));
        }

        match record.load_balancer {
            LoadBalancerKind::ApplicationLayer => {
                lines.push(line(CostCategory::LoadBalancer, p.application_lb, p.application_lb));
            }
            LoadBalancerKind::NetworkLayer => {
                lines.push(line(CostCategory::LoadBalancer, p.network_lb, p.network_lb));
            }
            LoadBalancerKind::None => {}
        }

        if record.cdn.is_present() {
            lines.push(line(
                CostCategory::Cdn,
                p.cdn * traffic,
                p.cdn_optimized * traffic,
            ));
        }

        if record.monitoring.is_present() {
            lines.push(line(CostCategory::Monitoring, p.monitoring, p.monitoring));
        }

        if record.waf {
            lines.push(line(CostCategory::Waf, p.waf, p.waf));
        }

        let added_regions = simulation.map(|s| s.add_regions).unwrap_or(0);
        let region_multiplier = p.region_multiplier(record.multi_region, added_regions);

        let sum_current = lines.iter().fold(0u64, |acc, l| acc.saturating_add(l.current));
        let sum_optimized = lines.iter().fold(0u64, |acc, l| acc.saturating_add(l.optimized));
        let total_current = round_units(sum_current as f64 * region_multiplier);
        let mut total_optimized = round_units(sum_optimized as f64 * region_multiplier);

        if let Some(target) = simulation.and_then(SimulationParams::active_cost_target) {
            if target < total_optimized as f64 {
                total_optimized = round_units(target);
            }
        }

        let breakdown = lines
            .into_iter()
            .map(|l| CostLine {
                category: l.category,
                current: round_units(l.current as f64 * region_multiplier),
                optimized: round_units(l.optimized as f64 * region_multiplier),
            })
            .collect();

        CostAnalysis {
            total_current,
            total_optimized,
            monthly_savings: total_current.saturating_sub(total_optimized),
            region_multiplier,
            breakdown,
        }
    }

    fn compute_cost(&self, record: &ArchitectureRecord, traffic: f64) -> (f64, f64) {
        let p = &self.prices;
        let count = |default: u32| f64::from(if record.compute_count == 0 { default } else { record.compute_count });

        match record.compute_model {
            ComputeModel::VirtualMachine => {
                let cost = count(1) * p.vm_instance * traffic;
                let ratio = if record.reserved_instances {
                    p.reserved_ratio
                } else if record.spot_instances {
                    p.spot_ratio
                } else {
                    p.vm_default_ratio
                };
                (cost, cost * ratio)
            }
            ComputeModel::ManagedContainer | ComputeModel::ServerlessContainer => {
                let cost = count(2) * p.container_task * traffic;
                (cost, cost * p.container_ratio)
            }
            ComputeModel::ServerlessFunction => {
                let cost = p.function_base * traffic;
                (cost, cost * p.function_ratio)
            }
            ComputeModel::OrchestratedCluster => {
                let cost = p.cluster_control_plane + count(3) * p.cluster_node * traffic;
                (cost, cost * p.cluster_ratio)
            }
            ComputeModel::None => (0.0, 0.0),
        }
    }

    fn database_cost(&self, record: &ArchitectureRecord, traffic: f64) -> (f64, f64) {
        let p = &self.prices;
        match record.database_type {
            DatabaseKind::RelationalManaged => {
                let base = if record.database_multi_az {
                    p.relational_multi_az
                } else {
                    p.relational_single_az
                };
                let cost = base + f64::from(record.database_replicas) * p.relational_replica;
                let ratio = if record.reserved_instances {
                    p.relational_reserved_ratio
                } else {
                    p.relational_ratio
                };
                (cost, cost * ratio)
            }
            DatabaseKind::RelationalDistributed => {
                let cost = if record.database_multi_az {
                    p.distributed_multi_az
                } else {
                    p.distributed_single_az
                };
                (cost, cost * p.distributed_ratio)
            }
            DatabaseKind::KeyValueManaged => {
                let cost = p.key_value * traffic;
                (cost, cost * p.key_value_ratio)
            }
            DatabaseKind::CacheOnly | DatabaseKind::None => (0.0, 0.0),
        }
    }
}

/// Project monthly cost with the default price book
pub fn analyze_costs(record: &ArchitectureRecord, simulation: Option<&SimulationParams>) -> CostAnalysis {
    CostCalculator::default().analyze(record, simulation)
}

fn line(category: CostCategory, current: f64, optimized: f64) -> CostLine {
    CostLine {
        category,
        current: round_units(current),
        optimized: round_units(optimized),
    }
}

/// Round to whole currency units.
///
/// Negatives and NaN become 0; overflowing amounts saturate at `u64::MAX`.
fn round_units(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= u64::MAX as f64 {
        u64::MAX
    } else {
        value.round() as u64
    }
}
