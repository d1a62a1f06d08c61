//! Tiered recommendations derived from the overall score.

use crate::models::CategorySet;

/// Overall-score band that selects the base recommendation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// `[4.0, inf)`
    Thriving,
    /// `[3.0, 4.0)`
    Steady,
    /// `[2.0, 3.0)`
    Struggling,
    /// `(-inf, 2.0)`
    Critical,
}

impl Tier {
    /// Bucket an overall score. Lower bounds are inclusive.
    pub fn for_score(overall_score: f64) -> Self {
        if overall_score >= 4.0 {
            Tier::Thriving
        } else if overall_score >= 3.0 {
            Tier::Steady
        } else if overall_score >= 2.0 {
            Tier::Struggling
        } else {
            Tier::Critical
        }
    }

    /// Base actions for this tier, in priority order.
    pub fn actions(self) -> &'static [&'static str] {
        match self {
            Tier::Thriving => &[
                "Continue current approach and share successful practices",
                "Consider mentoring other teams in AI adoption",
            ],
            Tier::Steady => &[
                "Review specific low-scoring areas for targeted improvements",
                "Increase knowledge sharing activities within the team",
            ],
            Tier::Struggling => &[
                "Implement immediate training and support programs",
                "Evaluate current tools and processes",
                "Provide one-on-one coaching for struggling team members",
            ],
            Tier::Critical => &[
                "Halt AI adoption expansion until issues are resolved",
                "Launch comprehensive training program",
                "Consider tool replacement and leadership escalation",
            ],
        }
    }
}

const SKILL_BALANCE_ACTION: &str = "Focus on traditional coding skills to maintain balance";
const CODE_REVIEW_ACTION: &str = "Implement code review processes for AI-generated code";

/// Build the ordered recommendation list: tier actions first, then
/// category-specific follow-ups.
pub fn recommend(overall_score: f64, categories: &CategorySet) -> Vec<String> {
    let mut recommendations: Vec<String> = Tier::for_score(overall_score)
        .actions()
        .iter()
        .map(|action| action.to_string())
        .collect();

    if categories.skill_balance < 3.0 {
        recommendations.push(SKILL_BALANCE_ACTION.to_string());
    }
    if categories.quality_confidence < 3.0 {
        recommendations.push(CODE_REVIEW_ACTION.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: f64) -> CategorySet {
        CategorySet {
            ai_integration: score,
            skill_balance: score,
            learning_velocity: score,
            quality_confidence: score,
            team_process: score,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_score(5.0), Tier::Thriving);
        assert_eq!(Tier::for_score(4.0), Tier::Thriving);
        assert_eq!(Tier::for_score(3.999), Tier::Steady);
        assert_eq!(Tier::for_score(3.0), Tier::Steady);
        assert_eq!(Tier::for_score(2.999), Tier::Struggling);
        assert_eq!(Tier::for_score(2.0), Tier::Struggling);
        assert_eq!(Tier::for_score(1.999), Tier::Critical);
        assert_eq!(Tier::for_score(0.0), Tier::Critical);
        assert_eq!(Tier::for_score(-1.0), Tier::Critical);
    }

    #[test]
    fn test_every_tier_has_at_least_two_actions() {
        for tier in [Tier::Thriving, Tier::Steady, Tier::Struggling, Tier::Critical] {
            assert!(tier.actions().len() >= 2);
        }
    }

    #[test]
    fn test_top_tier_without_followups() {
        let recommendations = recommend(4.5, &uniform(4.5));
        assert_eq!(
            recommendations,
            vec![
                "Continue current approach and share successful practices",
                "Consider mentoring other teams in AI adoption",
            ]
        );
    }

    #[test]
    fn test_followups_are_appended_after_base_list() {
        let mut categories = uniform(3.0);
        categories.skill_balance = 2.0;
        categories.quality_confidence = 2.5;

        let recommendations = recommend(2.5, &categories);

        assert_eq!(recommendations.len(), 5);
        assert_eq!(recommendations[0], "Implement immediate training and support programs");
        assert_eq!(recommendations[3], SKILL_BALANCE_ACTION);
        assert_eq!(recommendations[4], CODE_REVIEW_ACTION);
    }

    #[test]
    fn test_all_zero_gets_critical_tier_and_both_followups() {
        let recommendations = recommend(0.0, &CategorySet::default());

        assert_eq!(recommendations[0], "Halt AI adoption expansion until issues are resolved");
        assert_eq!(recommendations.len(), 5);
    }
}
