//! Scoring rules
//!
//! A category is scored by an ordered table of independent rules. Each
//! rule looks at the effective record and reports the points it awards,
//! an optional line for the explanation trail, and whether its principle
//! was met. The table order is the explanation order.

use archgrade_core::{ArchitectureRecord, CategoryResult, SimulationParams, MAX_CATEGORY_SCORE};

/// What a rule sees
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// Effective record (after the simulation overlay)
    pub record: &'a ArchitectureRecord,
    /// Simulation that produced it, if any
    pub simulation: Option<&'a SimulationParams>,
}

impl<'a> RuleInput<'a> {
    pub fn new(record: &'a ArchitectureRecord, simulation: Option<&'a SimulationParams>) -> Self {
        Self { record, simulation }
    }
}

/// Result of evaluating one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Points awarded; negative only for penalties
    pub points: i32,
    /// Line for the explanation trail
    pub explanation: Option<String>,
    /// Whether the rule's principle holds
    pub satisfied: bool,
}

impl RuleOutcome {
    /// Principle met, points awarded
    pub fn met(points: i32, explanation: impl Into<String>) -> Self {
        Self {
            points,
            explanation: Some(explanation.into()),
            satisfied: true,
        }
    }

    /// Principle not met; partial points may still be awarded
    pub fn unmet(points: i32, explanation: impl Into<String>) -> Self {
        Self {
            points,
            explanation: Some(explanation.into()),
            satisfied: false,
        }
    }

    /// Principle not met, nothing to say in the trail
    pub fn unmet_silent() -> Self {
        Self {
            points: 0,
            explanation: None,
            satisfied: false,
        }
    }

    /// Rule does not apply
    pub fn neutral() -> Self {
        Self {
            points: 0,
            explanation: None,
            satisfied: true,
        }
    }

    /// Points deducted
    pub fn penalty(points: u32, explanation: impl Into<String>) -> Self {
        Self {
            points: -(points.min(i32::MAX as u32) as i32),
            explanation: Some(explanation.into()),
            satisfied: true,
        }
    }
}

/// A single scoring rule
#[derive(Debug, Clone, Copy)]
pub struct ScoreRule {
    /// Stable identifier
    pub id: &'static str,
    /// Principle reported when the rule is not satisfied
    pub principle: Option<&'static str>,
    /// Evaluation function
    pub check: fn(&RuleInput) -> RuleOutcome,
}

impl ScoreRule {
    pub const fn new(
        id: &'static str,
        principle: Option<&'static str>,
        check: fn(&RuleInput) -> RuleOutcome,
    ) -> Self {
        Self { id, principle, check }
    }

    pub fn evaluate(&self, input: &RuleInput) -> RuleOutcome {
        (self.check)(input)
    }
}

/// Evaluate a rule table into a category result.
///
/// The raw sum is clamped to `0..=100`.
pub fn evaluate_rules(rules: &[ScoreRule], input: &RuleInput) -> CategoryResult {
    let mut total: i64 = 0;
    let mut explanation = Vec::new();
    let mut violated = Vec::new();

    for rule in rules {
        let outcome = rule.evaluate(input);
        total += i64::from(outcome.points);

        if let Some(line) = outcome.explanation {
            explanation.push(line);
        }

        if !outcome.satisfied {
            if let Some(principle) = rule.principle {
                violated.push(principle.to_string());
            }
        }
    }

    let score = total.clamp(0, i64::from(MAX_CATEGORY_SCORE)) as u32;
    CategoryResult::new(score, explanation, violated)
}
