//! archgrade quality: profiles, confidence, maturity and improvement plans
//!
//! Everything here runs after the category scores exist. The active
//! [`ScoringProfile`] turns four category results into an overall score,
//! a maturity tier and a phased improvement plan.
//!
//! # Example
//!
//! ```
//! use archgrade_core::{ArchitectureRecord, CategoryResult, CategoryScores};
//! use archgrade_quality::{estimate_confidence, plan_improvements, MaturityTier, ScoringProfile};
//!
//! let record = ArchitectureRecord::default();
//! let result = |score| CategoryResult::new(score, vec![], vec![]);
//! let scores = CategoryScores {
//!     scalability: result(20),
//!     reliability: result(30),
//!     security: result(10),
//!     cost_efficiency: result(0),
//! };
//!
//! let profile = ScoringProfile::standard();
//! let overall = profile.overall_score(&scores);
//! let confidence = estimate_confidence(&record);
//! assert_eq!(profile.classify(overall, confidence), MaturityTier::Prototype);
//!
//! let plan = plan_improvements(&record, &scores, &profile);
//! assert_eq!(plan.len(), 5);
//! ```

pub mod confidence;
pub mod maturity;
pub mod plan;
pub mod profile;

pub use confidence::{estimate_confidence, missing_fields, CONFIDENCE_CHECKS};
pub use maturity::{classify, MaturityRule, MaturityTier};
pub use plan::{plan_improvements, ImprovementPhase, PhaseTemplate, PlanAction, PHASE_TEMPLATES};
pub use profile::{PerCategory, ProfileError, ScoringProfile};
