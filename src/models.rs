//! Data models for the health check analyzer.
//!
//! This module contains the survey input, the category scores derived from
//! it, and the result records handed back to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;
use tracing::debug;

/// Numeric id of a survey question (1..=25).
pub type QuestionId = u32;

/// Free-text answers keyed by question name. `None` means unanswered.
pub type OpenResponses = BTreeMap<String, Option<String>>;

/// Every question id that belongs to a category.
pub const QUESTION_IDS: RangeInclusive<QuestionId> = 1..=25;

/// Lowest valid Likert score.
pub const MIN_SCORE: f64 = 1.0;

/// Highest valid Likert score.
pub const MAX_SCORE: f64 = 5.0;

/// Errors raised while turning raw JSON into a [`SurveyInput`].
#[derive(Debug, Error)]
pub enum InputError {
    /// The payload is not valid JSON or does not have the survey shape.
    #[error("Invalid data format in analysis data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A present score lies outside the Likert range.
    #[error("Score for question {question} is out of range: {value} (expected 1.0-5.0)")]
    ScoreOutOfRange { question: QuestionId, value: f64 },
}

/// A single survey submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyInput {
    /// Likert scores keyed by question id. `None` means unanswered.
    #[serde(deserialize_with = "deserialize_scores")]
    pub scores: BTreeMap<QuestionId, Option<f64>>,
    /// Free-text answers.
    pub open_responses: OpenResponses,
}

impl SurveyInput {
    /// Parse and validate a survey payload.
    pub fn from_json(raw: &str) -> Result<Self, InputError> {
        let input: SurveyInput = serde_json::from_str(raw)?;
        input.validate()?;
        Ok(input)
    }

    /// Check that every present score is a finite value in `[1.0, 5.0]`.
    pub fn validate(&self) -> Result<(), InputError> {
        for (&question, value) in &self.scores {
            if let Some(value) = *value {
                if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                    return Err(InputError::ScoreOutOfRange { question, value });
                }
            }
        }
        Ok(())
    }
}

/// Read the score map, keeping only keys that spell a survey question id.
///
/// JSON object keys are strings; `"7"` maps to question 7, while `"07"`,
/// `"-1"`, `"26"` or `"q1"` name no question and are dropped.
fn deserialize_scores<'de, D>(deserializer: D) -> Result<BTreeMap<QuestionId, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<f64>>::deserialize(deserializer)?;
    let mut scores = BTreeMap::new();

    for (key, value) in raw {
        match parse_question_id(&key) {
            Some(id) => {
                scores.insert(id, value);
            }
            None => debug!("Ignoring score for unknown question key {:?}", key),
        }
    }

    Ok(scores)
}

fn parse_question_id(key: &str) -> Option<QuestionId> {
    let id: QuestionId = key.parse().ok()?;
    (QUESTION_IDS.contains(&id) && id.to_string() == key).then_some(id)
}

/// Iterate over the non-blank answers of a response map.
pub fn answered(responses: &OpenResponses) -> impl Iterator<Item = &str> {
    responses
        .values()
        .filter_map(|answer| answer.as_deref())
        .filter(|answer| !answer.trim().is_empty())
}

/// One of the five scored survey categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    AiIntegration,
    SkillBalance,
    LearningVelocity,
    QualityConfidence,
    TeamProcess,
}

impl Category {
    /// All categories in survey order.
    pub const ALL: [Category; 5] = [
        Category::AiIntegration,
        Category::SkillBalance,
        Category::LearningVelocity,
        Category::QualityConfidence,
        Category::TeamProcess,
    ];

    /// The question ids averaged into this category.
    pub fn question_ids(self) -> RangeInclusive<QuestionId> {
        match self {
            Category::AiIntegration => 1..=5,
            Category::SkillBalance => 6..=10,
            Category::LearningVelocity => 11..=15,
            Category::QualityConfidence => 16..=20,
            Category::TeamProcess => 21..=25,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::AiIntegration => write!(f, "AI Integration"),
            Category::SkillBalance => write!(f, "Skill Balance"),
            Category::LearningVelocity => write!(f, "Learning Velocity"),
            Category::QualityConfidence => write!(f, "Quality Confidence"),
            Category::TeamProcess => write!(f, "Team Process"),
        }
    }
}

/// Mean score per category. A category without any answered question is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySet {
    pub ai_integration: f64,
    pub skill_balance: f64,
    pub learning_velocity: f64,
    pub quality_confidence: f64,
    pub team_process: f64,
}

impl CategorySet {
    /// Score of a single category.
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::AiIntegration => self.ai_integration,
            Category::SkillBalance => self.skill_balance,
            Category::LearningVelocity => self.learning_velocity,
            Category::QualityConfidence => self.quality_confidence,
            Category::TeamProcess => self.team_process,
        }
    }

    /// Set the score of a single category.
    pub fn set(&mut self, category: Category, score: f64) {
        match category {
            Category::AiIntegration => self.ai_integration = score,
            Category::SkillBalance => self.skill_balance = score,
            Category::LearningVelocity => self.learning_velocity = score,
            Category::QualityConfidence => self.quality_confidence = score,
            Category::TeamProcess => self.team_process = score,
        }
    }

    /// Categories paired with their scores, in survey order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Unweighted mean of the five category scores.
    pub fn overall(&self) -> f64 {
        self.iter().map(|(_, score)| score).sum::<f64>() / Category::ALL.len() as f64
    }
}

/// Rule-based warning attached to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskFlag {
    /// Heavy AI use combined with weak traditional skills.
    OverDependence,
    /// Low confidence in generated code quality.
    QualityRisk,
    /// Learning velocity has stalled.
    LearningStagnation,
    /// AI tooling is not integrated into team workflow.
    TeamCollaboration,
    /// The analysis itself failed.
    SystemError,
}

impl RiskFlag {
    /// Human-readable warning text.
    pub fn message(&self) -> &'static str {
        match self {
            RiskFlag::OverDependence => {
                "Over-dependence risk: High AI integration but low skill balance"
            }
            RiskFlag::QualityRisk => {
                "Security/quality risk: Low confidence in AI-generated code quality"
            }
            RiskFlag::LearningStagnation => {
                "Skill development stagnation: Very low learning velocity"
            }
            RiskFlag::TeamCollaboration => {
                "Team collaboration issues: Poor AI workflow integration"
            }
            RiskFlag::SystemError => "Analysis system error",
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for RiskFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Bookkeeping about how an analysis was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// When the analysis was assembled.
    pub timestamp: DateTime<Utc>,
    /// Whether the insight text came from the remote model.
    pub response_complete: bool,
    /// Remote model name, or `"fallback"` for the local summary.
    pub model: String,
    /// Number of free-text questions in the submission.
    pub participant_count: usize,
    /// Why the remote insight was not used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Bookkeeping attached to the degraded record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureMetadata {
    pub timestamp: DateTime<Utc>,
    /// Always false.
    pub response_complete: bool,
    pub error: String,
}

/// The complete result of analyzing one survey submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub categories: CategorySet,
    pub overall_score: f64,
    pub insights: String,
    pub risk_flags: Vec<RiskFlag>,
    pub recommendations: Vec<String>,
    pub analysis: AnalysisMetadata,
}

/// Result emitted when the submission could not be parsed at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedAnalysis {
    pub error: String,
    pub timestamp: DateTime<Utc>,
    /// Always empty; kept so the output has the same keys as a full result.
    pub categories: BTreeMap<String, f64>,
    pub overall_score: f64,
    pub insights: String,
    pub risk_flags: Vec<RiskFlag>,
    pub recommendations: Vec<String>,
    pub analysis: FailureMetadata,
}

/// Either a full analysis or the degraded record for unparseable input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Complete(AnalysisResult),
    Failed(FailedAnalysis),
}

impl AnalysisOutcome {
    /// True when the input could not be analyzed.
    pub fn is_failed(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed(_))
    }

    pub fn overall_score(&self) -> f64 {
        match self {
            AnalysisOutcome::Complete(result) => result.overall_score,
            AnalysisOutcome::Failed(failed) => failed.overall_score,
        }
    }

    pub fn risk_flags(&self) -> &[RiskFlag] {
        match self {
            AnalysisOutcome::Complete(result) => &result.risk_flags,
            AnalysisOutcome::Failed(failed) => &failed.risk_flags,
        }
    }

    pub fn recommendations(&self) -> &[String] {
        match self {
            AnalysisOutcome::Complete(result) => &result.recommendations,
            AnalysisOutcome::Failed(failed) => &failed.recommendations,
        }
    }
}
