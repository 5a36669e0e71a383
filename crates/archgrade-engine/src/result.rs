//! Evaluation result
use archgrade_core::{ArchitectureRecord, CategoryScores, SimulationParams};
use archgrade_cost::CostAnalysis;
use archgrade_policy::RiskAnalysis;
use archgrade_quality::{ImprovementPhase, MaturityTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall score next to the four category results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub overall: u32,
    #[serde(flatten)]
    pub categories: CategoryScores,
}

/// Everything one evaluation produces
///
/// Immutable once returned. Every field except `timestamp` is a pure
/// function of the record, the simulation, the scoring profile and the
/// price book. `fingerprint` covers only the record and the simulation;
/// `profile` names the scoring profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Record the scores were computed from (after the simulation overlay)
    pub architecture_summary: ArchitectureRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationParams>,
    pub scores: ScoreCard,
    pub risk_analysis: RiskAnalysis,
    pub cost_analysis: CostAnalysis,
    pub improvement_plan: Vec<ImprovementPhase>,
    pub confidence_score: f64,
    pub maturity_level: MaturityTier,
    pub profile: String,
    pub fingerprint: String,
    pub engine_version: String,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationResult {
    /// Serialized result without the timestamp, for reproducibility checks
    pub fn canonical_json(&self) -> String {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(map) = value.as_object_mut() {
            map.remove("timestamp");
        }
        value.to_string()
    }
}
