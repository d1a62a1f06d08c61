//! Category score aggregation.
//!
//! This module turns the raw question-to-score mapping into the five
//! category means used by every downstream rule.

use crate::models::{Category, CategorySet, QuestionId, QUESTION_IDS};
use std::collections::BTreeMap;
use tracing::debug;

/// Compute the mean score of every category.
///
/// Unanswered questions are skipped. A category with no answered question
/// scores 0, which downstream rules read as a very low score.
pub fn aggregate(scores: &BTreeMap<QuestionId, Option<f64>>) -> CategorySet {
    let ignored = scores
        .keys()
        .filter(|id| !QUESTION_IDS.contains(*id))
        .count();
    if ignored > 0 {
        debug!("Ignoring {} scores outside the survey question range", ignored);
    }

    let mut categories = CategorySet::default();
    for category in Category::ALL {
        categories.set(category, category_average(scores, category));
    }
    categories
}

/// Mean of the answered questions belonging to one category.
pub fn category_average(scores: &BTreeMap<QuestionId, Option<f64>>, category: Category) -> f64 {
    let values: Vec<f64> = category
        .question_ids()
        .filter_map(|id| scores.get(&id).copied().flatten())
        .collect();

    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}
