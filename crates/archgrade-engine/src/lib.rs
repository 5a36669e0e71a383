//! archgrade engine: one evaluation, start to finish
//!
//! The evaluator applies the simulation overlay once, then runs every
//! scorer and analyzer against the effective record and assembles the
//! result. Nothing here performs I/O; the only impure input is the clock,
//! which [`Evaluator::evaluate_at`] lets callers pin.
//!
//! # Flow
//!
//! ```text
//! record + simulation → overlay → effective record
//!                                  ├─→ category scorers ─→ overall score
//!                                  ├─→ risk analyzer
//!                                  ├─→ cost analyzer
//!                                  └─→ confidence ─→ maturity ─→ improvement plan
//! ```
//!
//! # Example
//!
//! ```
//! use archgrade_core::{ArchitectureRecord, ComputeModel};
//! use archgrade_engine::Evaluator;
//!
//! let record = ArchitectureRecord {
//!     compute_model: ComputeModel::ServerlessFunction,
//!     waf: true,
//!     ..Default::default()
//! };
//!
//! let result = Evaluator::default().evaluate(&record, None);
//! assert_eq!(result.scores.categories.security.score, 20);
//! assert_eq!(result.maturity_level.to_string(), "Prototype");
//! ```

mod result;

pub use result::{EvaluationResult, ScoreCard};

use archgrade_core::{apply_simulation, fingerprint, ArchitectureRecord, SimulationParams, ARCHGRADE_VERSION};
use archgrade_cost::{CostCalculator, PriceBook};
use archgrade_policy::{analyze_risks, score_all};
use archgrade_quality::{estimate_confidence, missing_fields, plan_improvements, ScoringProfile};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Evaluator bound to a scoring profile and price book
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    profile: ScoringProfile,
    costs: CostCalculator,
}

impl Evaluator {
    pub fn new(profile: ScoringProfile) -> Self {
        Self {
            profile,
            costs: CostCalculator::default(),
        }
    }

    pub fn with_prices(mut self, prices: PriceBook) -> Self {
        self.costs = CostCalculator::new(prices);
        self
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Evaluate a record, stamping the result with the current time
    pub fn evaluate(&self, record: &ArchitectureRecord, simulation: Option<&SimulationParams>) -> EvaluationResult {
        self.evaluate_at(record, simulation, Utc::now())
    }

    /// Evaluate a record with a fixed timestamp
    pub fn evaluate_at(
        &self,
        record: &ArchitectureRecord,
        simulation: Option<&SimulationParams>,
        timestamp: DateTime<Utc>,
    ) -> EvaluationResult {
        let fingerprint = fingerprint(record, simulation);

        // Overlay exactly once; user scaling is not idempotent
        let effective = apply_simulation(record, simulation);

        let categories = score_all(&effective, simulation);
        let overall = self.profile.overall_score(&categories);
        let risk_analysis = analyze_risks(&effective);
        let cost_analysis = self.costs.analyze(&effective, simulation);

        let confidence = estimate_confidence(&effective);
        let maturity = self.profile.classify(overall, confidence);
        let improvement_plan = plan_improvements(&effective, &categories, &self.profile);

        debug!(
            fingerprint = %fingerprint,
            missing = ?missing_fields(&effective),
            "Confidence {confidence:.2}"
        );
        info!(
            fingerprint = %fingerprint,
            overall,
            risk = %risk_analysis.risk_level,
            maturity = %maturity,
            "Evaluated architecture"
        );

        EvaluationResult {
            architecture_summary: effective,
            simulation: simulation.cloned(),
            scores: ScoreCard { overall, categories },
            risk_analysis,
            cost_analysis,
            improvement_plan,
            confidence_score: confidence,
            maturity_level: maturity,
            profile: self.profile.name.clone(),
            fingerprint,
            engine_version: ARCHGRADE_VERSION.to_string(),
            timestamp,
        }
    }
}

/// Evaluate with the standard profile
pub fn evaluate(record: &ArchitectureRecord, simulation: Option<&SimulationParams>) -> EvaluationResult {
    Evaluator::default().evaluate(record, simulation)
}
