//! Report generation.
//!
//! This module renders analysis outcomes as pretty JSON (the machine
//! contract) or as a Markdown health check report for humans.

use crate::models::{AnalysisMetadata, AnalysisOutcome, AnalysisResult, FailedAnalysis, RiskFlag};
use anyhow::Result;

/// Generate a JSON report.
pub fn generate_json_report(outcome: &AnalysisOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).map_err(Into::into)
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(outcome: &AnalysisOutcome, decimals: usize) -> String {
    match outcome {
        AnalysisOutcome::Complete(result) => generate_result_markdown(result, decimals),
        AnalysisOutcome::Failed(failed) => generate_failure_markdown(failed),
    }
}

fn generate_result_markdown(result: &AnalysisResult, decimals: usize) -> String {
    let mut output = String::new();

    output.push_str("# Developer Experience Health Check\n\n");
    output.push_str(&generate_metadata_section(&result.analysis));
    output.push_str(&generate_scores_section(result, decimals));
    output.push_str(&generate_risk_section(&result.risk_flags));
    output.push_str(&generate_insights_section(&result.insights, &result.analysis));
    output.push_str(&generate_recommendations_section(&result.recommendations));
    output.push_str(&generate_footer());

    output
}

fn generate_failure_markdown(failed: &FailedAnalysis) -> String {
    let mut output = String::new();

    output.push_str("# Developer Experience Health Check\n\n");
    output.push_str("## Metadata\n\n");
    output.push_str(&format!(
        "- **Analysis Date:** {}\n",
        failed.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str("- **Response Complete:** no\n\n");
    output.push_str("## Analysis Failed\n\n");
    output.push_str(&format!("{}\n\n", failed.insights));
    output.push_str(&format!("> **Error:** {}\n\n", failed.error));
    output.push_str(&generate_risk_section(&failed.risk_flags));
    output.push_str(&generate_recommendations_section(&failed.recommendations));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &AnalysisMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Insight Source:** `{}`\n", metadata.model));
    section.push_str(&format!(
        "- **Written Responses:** {}\n",
        metadata.participant_count
    ));
    section.push_str(&format!(
        "- **Response Complete:** {}\n",
        if metadata.response_complete { "yes" } else { "no" }
    ));
    section.push('\n');

    section
}

/// Generate the category score table.
fn generate_scores_section(result: &AnalysisResult, decimals: usize) -> String {
    let mut section = String::new();

    section.push_str("## Scores\n\n");
    section.push_str("| Category | Score |\n");
    section.push_str("|:---|:---:|\n");
    for (category, score) in result.categories.iter() {
        section.push_str(&format!(
            "| {} | {:.*} / 5.0 |\n",
            category, decimals, score
        ));
    }
    section.push_str(&format!(
        "| **Overall** | **{:.*} / 5.0** |\n\n",
        decimals, result.overall_score
    ));

    section
}

/// Generate the risk flag section.
fn generate_risk_section(flags: &[RiskFlag]) -> String {
    let mut section = String::new();

    section.push_str("## Risk Flags\n\n");
    if flags.is_empty() {
        section.push_str("No risk flags were raised. ✅\n\n");
        return section;
    }

    for flag in flags {
        section.push_str(&format!("- ⚠️ {}\n", flag));
    }
    section.push('\n');

    section
}

/// Generate the insights section.
fn generate_insights_section(insights: &str, metadata: &AnalysisMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Insights\n\n");
    section.push_str(insights);
    section.push_str("\n\n");

    if let Some(ref error) = metadata.error {
        section.push_str(&format!(
            "> 💡 Remote insight unavailable ({}); showing the local summary.\n\n",
            error
        ));
    }

    section
}

/// Generate the recommendations section.
fn generate_recommendations_section(recommendations: &[String]) -> String {
    if recommendations.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Recommendations\n\n");
    for (i, rec) in recommendations.iter().enumerate() {
        section.push_str(&format!("{}. {}\n", i + 1, rec));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by dxcheck*\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::failed_analysis;
    use crate::models::CategorySet;
    use chrono::Utc;

    fn create_test_result(error: Option<&str>) -> AnalysisResult {
        AnalysisResult {
            categories: CategorySet {
                ai_integration: 4.6,
                skill_balance: 2.2,
                learning_velocity: 3.0,
                quality_confidence: 3.4,
                team_process: 3.0,
            },
            overall_score: 3.24,
            insights: "Team leans heavily on AI.".to_string(),
            risk_flags: vec![RiskFlag::OverDependence],
            recommendations: vec![
                "Review specific low-scoring areas for targeted improvements".to_string(),
                "Focus on traditional coding skills to maintain balance".to_string(),
            ],
            analysis: AnalysisMetadata {
                timestamp: Utc::now(),
                response_complete: error.is_none(),
                model: "openai/gpt-4o-mini".to_string(),
                participant_count: 2,
                error: error.map(String::from),
            },
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let outcome = AnalysisOutcome::Complete(create_test_result(None));
        let markdown = generate_markdown_report(&outcome, 1);

        assert!(markdown.contains("# Developer Experience Health Check"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("| AI Integration | 4.6 / 5.0 |"));
        assert!(markdown.contains("| **Overall** | **3.2 / 5.0** |"));
        assert!(markdown.contains("Over-dependence risk"));
        assert!(markdown.contains("2. Focus on traditional coding skills"));
        assert!(!markdown.contains("Remote insight unavailable"));
    }

    #[test]
    fn test_markdown_respects_decimals() {
        let outcome = AnalysisOutcome::Complete(create_test_result(None));
        let markdown = generate_markdown_report(&outcome, 2);

        assert!(markdown.contains("| Skill Balance | 2.20 / 5.0 |"));
        assert!(markdown.contains("**3.24 / 5.0**"));
    }

    #[test]
    fn test_markdown_notes_fallback() {
        let outcome =
            AnalysisOutcome::Complete(create_test_result(Some("transport error: timeout")));
        let markdown = generate_markdown_report(&outcome, 1);

        assert!(markdown.contains("Remote insight unavailable (transport error: timeout)"));
        assert!(markdown.contains("**Response Complete:** no"));
    }

    #[test]
    fn test_risk_section_without_flags() {
        let section = generate_risk_section(&[]);
        assert!(section.contains("No risk flags were raised."));
    }

    #[test]
    fn test_failure_markdown() {
        let outcome = AnalysisOutcome::Failed(failed_analysis("Invalid data format"));
        let markdown = generate_markdown_report(&outcome, 1);

        assert!(markdown.contains("## Analysis Failed"));
        assert!(markdown.contains("**Response Complete:** no"));
        assert!(!markdown.contains("Insight Source"));
        assert!(markdown.contains("> **Error:** Invalid data format"));
        assert!(markdown.contains("Analysis system error"));
        assert!(markdown.contains("1. Review survey data format and retry analysis"));
    }

    #[test]
    fn test_generate_json_report() {
        let outcome = AnalysisOutcome::Complete(create_test_result(None));
        let json = generate_json_report(&outcome).unwrap();

        assert!(json.contains("\"overallScore\""));
        assert!(json.contains("\"riskFlags\""));
        assert!(json.contains("\"responseComplete\": true"));
        assert!(!json.contains("\"error\""));
    }
}
