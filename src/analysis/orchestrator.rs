//! Analysis orchestration.
//!
//! Runs the pure scoring pipeline, asks the insight provider for a remote
//! summary, and falls back to the local summary when that fails. Nothing
//! in here returns an error: remote failures degrade the insight text, and
//! unparseable input produces a [`FailedAnalysis`].

use crate::analysis::aggregator::aggregate;
use crate::analysis::insight::summarize;
use crate::analysis::recommendations::recommend;
use crate::analysis::risk::evaluate_risks;
use crate::models::{
    AnalysisMetadata, AnalysisOutcome, AnalysisResult, FailedAnalysis, FailureMetadata, RiskFlag,
    SurveyInput,
};
use crate::provider::InsightProvider;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

/// Model name recorded when the local summary is used.
pub const FALLBACK_MODEL: &str = "fallback";

const PROVIDER_DISABLED: &str = "remote insight provider disabled";
const FAILED_INSIGHT: &str = "Analysis failed due to data processing error";
const FAILED_RECOMMENDATION: &str = "Review survey data format and retry analysis";

/// Analyze a parsed survey submission.
///
/// `provider` is optional; without one the local summary is used and the
/// result is marked incomplete.
pub async fn analyze(
    input: &SurveyInput,
    provider: Option<&dyn InsightProvider>,
) -> AnalysisResult {
    let categories = aggregate(&input.scores);
    let overall = categories.overall();
    let risk_flags = evaluate_risks(&categories);
    let recommendations = recommend(overall, &categories);

    info!(
        "Scored survey: overall {:.2}, {} risk flags, {} recommendations",
        overall,
        risk_flags.len(),
        recommendations.len()
    );

    let remote = match provider {
        Some(provider) => provider
            .get_insight(&categories, &input.open_responses)
            .await
            .map(|insight| (insight, provider.name().to_string()))
            .map_err(|e| e.to_string()),
        None => Err(PROVIDER_DISABLED.to_string()),
    };

    let (insights, model, response_complete, error) = match remote {
        Ok((insight, model)) => (insight, model, true, None),
        Err(message) => {
            warn!("Remote insight unavailable, using local summary: {}", message);
            (
                summarize(&categories, &input.open_responses),
                FALLBACK_MODEL.to_string(),
                false,
                Some(message),
            )
        }
    };

    AnalysisResult {
        categories,
        overall_score: overall,
        insights,
        risk_flags,
        recommendations,
        analysis: AnalysisMetadata {
            timestamp: Utc::now(),
            response_complete,
            model,
            participant_count: input.open_responses.len(),
            error,
        },
    }
}

/// Parse and analyze a raw JSON submission.
pub async fn analyze_json(raw: &str, provider: Option<&dyn InsightProvider>) -> AnalysisOutcome {
    match SurveyInput::from_json(raw) {
        Ok(input) => AnalysisOutcome::Complete(analyze(&input, provider).await),
        Err(e) => {
            error!("Analysis failed: {}", e);
            AnalysisOutcome::Failed(failed_analysis(&e.to_string()))
        }
    }
}

/// Build the degraded record for input that could not be analyzed.
pub fn failed_analysis(message: &str) -> FailedAnalysis {
    let timestamp = Utc::now();

    FailedAnalysis {
        error: message.to_string(),
        timestamp,
        categories: BTreeMap::new(),
        overall_score: 0.0,
        insights: FAILED_INSIGHT.to_string(),
        risk_flags: vec![RiskFlag::SystemError],
        recommendations: vec![FAILED_RECOMMENDATION.to_string()],
        analysis: FailureMetadata {
            timestamp,
            response_complete: false,
            error: message.to_string(),
        },
    }
}
