//! Threshold rules that flag risky adoption patterns.

use crate::models::{CategorySet, RiskFlag};

/// Above this, AI integration counts as heavy.
const HIGH_INTEGRATION: f64 = 4.0;

/// Below this, skill balance and quality confidence count as weak.
const WEAK_SCORE: f64 = 3.0;

/// Below this, learning velocity and team process count as failing.
const FAILING_SCORE: f64 = 2.5;

/// Evaluate every risk rule against the category scores.
///
/// Rules are independent and always run in the same order, so the output
/// order is stable: over-dependence, quality, learning, team process.
pub fn evaluate_risks(categories: &CategorySet) -> Vec<RiskFlag> {
    let mut flags = Vec::new();

    if categories.ai_integration > HIGH_INTEGRATION && categories.skill_balance < WEAK_SCORE {
        flags.push(RiskFlag::OverDependence);
    }

    if categories.quality_confidence < WEAK_SCORE {
        flags.push(RiskFlag::QualityRisk);
    }

    if categories.learning_velocity < FAILING_SCORE {
        flags.push(RiskFlag::LearningStagnation);
    }

    if categories.team_process < FAILING_SCORE {
        flags.push(RiskFlag::TeamCollaboration);
    }

    flags
}
