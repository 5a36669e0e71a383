//! Maturity tiers
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of deployment sophistication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaturityTier {
    #[serde(rename = "Enterprise Grade")]
    EnterpriseGrade,
    #[serde(rename = "Production Ready")]
    ProductionReady,
    #[serde(rename = "Early Stage")]
    EarlyStage,
    Prototype,
}

impl MaturityTier {
    pub fn label(&self) -> &'static str {
        match self {
            MaturityTier::EnterpriseGrade => "Enterprise Grade",
            MaturityTier::ProductionReady => "Production Ready",
            MaturityTier::EarlyStage => "Early Stage",
            MaturityTier::Prototype => "Prototype",
        }
    }
}

impl fmt::Display for MaturityTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimums for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaturityRule {
    pub tier: MaturityTier,
    pub min_score: u32,
    pub min_confidence: f64,
}

impl MaturityRule {
    pub const fn new(tier: MaturityTier, min_score: u32, min_confidence: f64) -> Self {
        Self {
            tier,
            min_score,
            min_confidence,
        }
    }

    pub fn matches(&self, overall: u32, confidence: f64) -> bool {
        overall >= self.min_score && confidence >= self.min_confidence
    }
}

/// First matching rule wins; nothing matching is a prototype
pub fn classify(rules: &[MaturityRule], overall: u32, confidence: f64) -> MaturityTier {
    rules
        .iter()
        .find(|rule| rule.matches(overall, confidence))
        .map(|rule| rule.tier)
        .unwrap_or(MaturityTier::Prototype)
}
