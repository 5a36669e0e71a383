//! Category results shared by the scorers, the planner and the engine
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum score of any category
pub const MAX_CATEGORY_SCORE: u32 = 100;

/// The four scored quality categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Scalability,
    Reliability,
    Security,
    CostEfficiency,
}

impl Category {
    /// All categories in evaluation order
    pub const ALL: [Category; 4] = [
        Category::Scalability,
        Category::Reliability,
        Category::Security,
        Category::CostEfficiency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Scalability => "scalability",
            Category::Reliability => "reliability",
            Category::Security => "security",
            Category::CostEfficiency => "cost efficiency",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score, explanation trail and violated principles for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub score: u32,
    pub max: u32,
    /// Rule applications, in rule order
    pub explanation: Vec<String>,
    /// Named principles found unmet, in rule order
    pub violated_principles: Vec<String>,
}

impl CategoryResult {
    pub fn new(score: u32, explanation: Vec<String>, violated_principles: Vec<String>) -> Self {
        Self {
            score: score.min(MAX_CATEGORY_SCORE),
            max: MAX_CATEGORY_SCORE,
            explanation,
            violated_principles,
        }
    }

    pub fn violates(&self, principle: &str) -> bool {
        self.violated_principles.iter().any(|p| p == principle)
    }
}

/// Results for all four categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub scalability: CategoryResult,
    pub reliability: CategoryResult,
    pub security: CategoryResult,
    pub cost_efficiency: CategoryResult,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Scalability => &self.scalability,
            Category::Reliability => &self.reliability,
            Category::Security => &self.security,
            Category::CostEfficiency => &self.cost_efficiency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_result_caps_score() {
        let result = CategoryResult::new(130, vec![], vec!["Observability".to_string()]);
        assert_eq!(result.score, 100);
        assert!(result.violates("Observability"));
        assert!(!result.violates("Network Isolation"));
    }

    #[test]
    fn test_category_serde_names() {
        let value = serde_json::to_value(Category::CostEfficiency).unwrap();
        assert_eq!(value, "cost_efficiency");
    }
}
