//! Prompt construction for remote insight requests.

use crate::models::{CategorySet, OpenResponses};

/// System prompt for insight requests.
pub const INSIGHT_SYSTEM_PROMPT: &str = "You are an expert in developer experience analysis. \
Combine quantitative survey scores with qualitative feedback to give concise, actionable \
insights about how a team is adopting AI-assisted development.";

/// Build the user prompt describing one survey submission.
pub fn build_insight_prompt(categories: &CategorySet, responses: &OpenResponses) -> String {
    let mut prompt = String::new();

    prompt.push_str("Analyze this developer experience data.\n\n");
    prompt.push_str("Category scores (1-5 scale):\n");
    for (category, score) in categories.iter() {
        prompt.push_str(&format!("- {}: {:.1}\n", category, score));
    }
    prompt.push_str(&format!("- Overall: {:.1}\n", categories.overall()));

    prompt.push_str("\nWritten feedback:\n");
    if responses.is_empty() {
        prompt.push_str("(none)\n");
    }
    for (question, answer) in responses {
        let answer = answer
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or("No response provided");
        prompt.push_str(&format!("- {}: {}\n", question, answer));
    }

    prompt.push_str(
        "\nProvide 2-3 key insights about this team's AI adoption patterns, \
         noting risks and strengths where the scores and feedback agree or disagree.",
    );

    prompt
}
