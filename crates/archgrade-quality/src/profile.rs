//! Scoring profiles
//!
//! A profile carries the tunable parts of an evaluation: the category
//! weights behind the overall score, the planner thresholds and impact
//! caps, and the ordered maturity table.

use crate::maturity::{MaturityRule, MaturityTier};
use archgrade_core::{Category, CategoryScores, EngineError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("cannot read profile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid profile: {0}")]
    Invalid(String),
}

impl From<ProfileError> for EngineError {
    fn from(err: ProfileError) -> Self {
        EngineError::Profile(err.to_string())
    }
}

/// One value per category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerCategory<T> {
    pub scalability: T,
    pub reliability: T,
    pub security: T,
    pub cost_efficiency: T,
}

impl<T: Copy> PerCategory<T> {
    pub const fn uniform(value: T) -> Self {
        Self {
            scalability: value,
            reliability: value,
            security: value,
            cost_efficiency: value,
        }
    }

    pub fn get(&self, category: Category) -> T {
        match category {
            Category::Scalability => self.scalability,
            Category::Reliability => self.reliability,
            Category::Security => self.security,
            Category::CostEfficiency => self.cost_efficiency,
        }
    }
}

/// Tunable scoring profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    /// Profile name (e.g., "standard@1.0")
    pub name: String,

    /// Weights of each category in the overall score
    pub weights: PerCategory<f64>,

    /// Categories scoring below their threshold get a plan phase
    pub plan_thresholds: PerCategory<u32>,

    /// Upper bound on the promised points of a plan phase
    pub impact_caps: PerCategory<u32>,

    /// Maturity tiers, first match wins
    pub maturity: Vec<MaturityRule>,
}

impl ScoringProfile {
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            weights: PerCategory {
                scalability: 0.30,
                reliability: 0.25,
                security: 0.25,
                cost_efficiency: 0.20,
            },
            plan_thresholds: PerCategory {
                scalability: 50,
                reliability: 50,
                security: 60,
                cost_efficiency: 50,
            },
            impact_caps: PerCategory {
                scalability: 40,
                reliability: 40,
                security: 40,
                cost_efficiency: 30,
            },
            maturity: vec![
                MaturityRule::new(MaturityTier::EnterpriseGrade, 80, 0.7),
                MaturityRule::new(MaturityTier::ProductionReady, 60, 0.5),
                MaturityRule::new(MaturityTier::EarlyStage, 35, 0.3),
            ],
        }
    }

    /// Plans for every category below 70
    pub fn strict() -> Self {
        Self {
            name: "strict@1.0".to_string(),
            plan_thresholds: PerCategory::uniform(70),
            ..Self::standard()
        }
    }

    /// Load and validate a profile from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_yaml::from_str(yaml)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Get a preset by name; unknown names fall back to standard
    pub fn for_name(name: &str) -> Self {
        match name.split('@').next().unwrap_or_default() {
            "strict" => Self::strict(),
            _ => Self::standard(),
        }
    }

    /// Resolve a preset name, or a path when it looks like a YAML file
    pub fn load(selector: &str) -> Result<Self, ProfileError> {
        let selector = selector.trim();
        if selector.ends_with(".yaml") || selector.ends_with(".yml") {
            Self::from_path(selector)
        } else {
            Ok(Self::for_name(selector))
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        let weights = [
            self.weights.scalability,
            self.weights.reliability,
            self.weights.security,
            self.weights.cost_efficiency,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ProfileError::Invalid("weights must be non-negative".to_string()));
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ProfileError::Invalid(format!("weights sum to {total}, expected 1")));
        }
        if self.maturity.iter().any(|r| !(0.0..=1.0).contains(&r.min_confidence)) {
            return Err(ProfileError::Invalid(
                "maturity confidence must be within 0..=1".to_string(),
            ));
        }
        Ok(())
    }

    /// Weighted overall score, rounded
    pub fn overall_score(&self, scores: &CategoryScores) -> u32 {
        let weighted: f64 = Category::ALL
            .iter()
            .map(|c| self.weights.get(*c) * f64::from(scores.get(*c).score))
            .sum();
        weighted.round().clamp(0.0, 100.0) as u32
    }

    /// Tier for an overall score and confidence
    pub fn classify(&self, overall: u32, confidence: f64) -> MaturityTier {
        crate::maturity::classify(&self.maturity, overall, confidence)
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgrade_core::CategoryResult;

    fn scores(s: u32, r: u32, sec: u32, c: u32) -> CategoryScores {
        let result = |score| CategoryResult::new(score, vec![], vec![]);
        CategoryScores {
            scalability: result(s),
            reliability: result(r),
            security: result(sec),
            cost_efficiency: result(c),
        }
    }

    #[test]
    fn test_overall_score_weights() {
        let profile = ScoringProfile::standard();
        assert_eq!(profile.overall_score(&scores(100, 100, 100, 100)), 100);
        assert_eq!(profile.overall_score(&scores(0, 0, 0, 0)), 0);
        // 13.5 + 16.25 + 10 + 0 = 39.75
        assert_eq!(profile.overall_score(&scores(45, 65, 40, 0)), 40);
    }

    #[test]
    fn test_strict_raises_thresholds() {
        let profile = ScoringProfile::strict();
        assert_eq!(profile.plan_thresholds.get(Category::Security), 70);
        assert_eq!(profile.weights, ScoringProfile::standard().weights);
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(ScoringProfile::for_name("strict@1.0").name, "strict@1.0");
        assert_eq!(ScoringProfile::for_name("lenient").name, "standard@1.0");
        assert_eq!(ScoringProfile::load("").unwrap().name, "standard@1.0");
    }

    #[test]
    fn test_yaml_round_trip_through_preset() {
        let yaml = serde_yaml::to_string(&ScoringProfile::strict()).unwrap();
        let loaded = ScoringProfile::from_yaml(&yaml).unwrap();
        assert_eq!(loaded, ScoringProfile::strict());
    }

    #[test]
    fn test_yaml_rejects_bad_weights() {
        let mut profile = ScoringProfile::standard();
        profile.weights.security = 0.5;
        let yaml = serde_yaml::to_string(&profile).unwrap();
        assert!(matches!(
            ScoringProfile::from_yaml(&yaml),
            Err(ProfileError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file_is_profile_error() {
        let err = ScoringProfile::load("/nonexistent/profile.yaml").unwrap_err();
        let engine: EngineError = err.into();
        assert!(engine.to_string().starts_with("PROFILE/"));
    }
}
