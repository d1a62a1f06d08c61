//! Local insight summary used when no remote model answer is available.
//!
//! The summary is a handful of observational sentences driven by the
//! category thresholds, a count of written answers, and a keyword-based
//! sentiment verdict over those answers.

use crate::models::{answered, CategorySet, OpenResponses};
use std::cmp::Ordering;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "love",
    "helpful",
    "fast",
    "efficient",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "slow",
    "difficult",
    "confusing",
    "frustrating",
];

/// Coarse verdict over the written feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Keyword hit counts across all answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
}

impl SentimentTally {
    /// Count keyword hits. Each keyword counts at most once per answer.
    pub fn from_responses<'a>(responses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut tally = Self::default();
        for response in responses {
            let lower = response.to_lowercase();
            tally.positive += POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
            tally.negative += NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
        }
        tally
    }

    pub fn verdict(&self) -> Sentiment {
        match self.positive.cmp(&self.negative) {
            Ordering::Greater => Sentiment::Positive,
            Ordering::Less => Sentiment::Negative,
            Ordering::Equal => Sentiment::Neutral,
        }
    }
}

/// Build the fallback insight text.
pub fn summarize(categories: &CategorySet, responses: &OpenResponses) -> String {
    let mut sentences: Vec<String> = Vec::new();

    if categories.ai_integration > 4.0 {
        sentences.push("High AI integration indicates strong tool adoption".to_string());
    }
    if categories.skill_balance < 3.0 {
        sentences.push("Low skill balance suggests over-reliance on AI tools".to_string());
    }
    if categories.learning_velocity > 4.0 {
        sentences.push("Excellent learning velocity shows good knowledge transfer".to_string());
    }
    if categories.quality_confidence < 3.0 {
        sentences.push("Quality confidence concerns need immediate attention".to_string());
    }

    let written: Vec<&str> = answered(responses).collect();
    sentences.push(format!(
        "Received {} detailed feedback responses",
        written.len()
    ));

    match SentimentTally::from_responses(written).verdict() {
        Sentiment::Positive => {
            sentences.push("Overall positive sentiment in feedback".to_string());
        }
        Sentiment::Negative => {
            sentences.push("Concerns identified in qualitative feedback".to_string());
        }
        Sentiment::Neutral => {}
    }

    format!("{}.", sentences.join(". "))
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

    fn responses(answers: &[Option<&str>]) -> OpenResponses {
        answers
            .iter()
            .enumerate()
            .map(|(i, a)| (format!("q{}", i + 1), a.map(String::from)))
            .collect()
    }

    #[test]
    fn test_healthy_team_without_feedback() {
        let text = summarize(&uniform(4.5), &OpenResponses::new());
        assert_eq!(
            text,
            "High AI integration indicates strong tool adoption. \
             Excellent learning velocity shows good knowledge transfer. \
             Received 0 detailed feedback responses."
        );
    }

    #[test]
    fn test_blank_and_null_answers_are_not_counted() {
        let text = summarize(
            &uniform(3.5),
            &responses(&[Some("   "), None, Some("It is fast")]),
        );
        assert_eq!(
            text,
            "Received 1 detailed feedback responses. Overall positive sentiment in feedback."
        );
    }

    #[test]
    fn test_negative_sentiment() {
        let text = summarize(
            &uniform(3.5),
            &responses(&[Some("Reviews are SLOW and confusing"), Some("Pretty good")]),
        );
        assert!(text.ends_with("Concerns identified in qualitative feedback."));
    }

    #[test]
    fn test_sentiment_tie_adds_nothing() {
        let text = summarize(&uniform(3.5), &responses(&[Some("good tools, bad docs")]));
        assert_eq!(text, "Received 1 detailed feedback responses.");
    }

    #[test]
    fn test_keyword_counts_once_per_answer() {
        let tally = SentimentTally::from_responses(["good good good", "bad", "poor"]);
        assert_eq!(tally, SentimentTally { positive: 1, negative: 2 });
        assert_eq!(tally.verdict(), Sentiment::Negative);
    }

    #[test]
    fn test_low_scores_produce_warnings() {
        let mut categories = uniform(2.0);
        categories.ai_integration = 4.5;
        let text = summarize(&categories, &OpenResponses::new());

        assert!(text.starts_with("High AI integration indicates strong tool adoption. "));
        assert!(text.contains("Low skill balance suggests over-reliance on AI tools"));
        assert!(text.contains("Quality confidence concerns need immediate attention"));
        assert!(!text.contains("Excellent learning velocity"));
        assert!(!text.ends_with(".."));
    }
}
