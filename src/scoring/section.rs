use serde::Serialize;
use std::collections::BTreeMap;

use super::engine::score_response;
use super::round1;
use crate::catalog::QuestionCatalog;
use crate::respondent::ResponseSet;

/// Accumulated score for one section.
///
/// `possible` follows the answered-only policy: only questions the
/// respondent actually answered (with a recognizable option) contribute
/// their weight. `percentage` is clamped to [0, 100] and rounded to one
/// decimal; a section with nothing answered reports 0 without dividing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionScore {
    pub earned: f64,
    pub possible: f64,
    pub percentage: f64,
}

/// Group catalog questions by section and sum response scores.
///
/// Every section with at least one catalog question appears in the result,
/// answered or not. Responses that reference unknown question ids, or select
/// an option the question does not have, are ignored with a warning.
pub fn aggregate(
    catalog: &QuestionCatalog,
    responses: &ResponseSet,
    warnings: &mut Vec<String>,
) -> BTreeMap<String, SectionScore> {
    let mut sections: BTreeMap<String, SectionScore> = BTreeMap::new();
    for name in catalog.sections() {
        sections.insert(name.to_string(), SectionScore::default());
    }

    for question in catalog.questions() {
        let Some(response) = responses.get(question.id) else {
            continue; // unanswered: excluded from earned and possible
        };
        let Some(points) = score_response(question, response) else {
            warnings.push(format!(
                "response for question {}: '{}' is not one of the question's options, ignored",
                question.id, response.selected_option
            ));
            continue;
        };
        let entry = sections.entry(question.section.clone()).or_default();
        entry.earned += points;
        entry.possible += question.weight;
    }

    for response in responses.iter() {
        if catalog.get(response.question_id).is_none() {
            warnings.push(format!(
                "response references unknown question {}, ignored",
                response.question_id
            ));
        }
    }

    for score in sections.values_mut() {
        score.percentage = if score.possible > 0.0 {
            round1((score.earned / score.possible * 100.0).min(100.0))
        } else {
            0.0
        };
    }

    sections
}
