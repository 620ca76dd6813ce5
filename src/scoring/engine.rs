use serde::Serialize;
use std::collections::BTreeMap;

use super::overall::calculate_overall;
use super::section::{aggregate, SectionScore};
use crate::catalog::{Question, QuestionCatalog, QuestionType};
use crate::respondent::{ResponseSet, UserResponse};

/// Full derived score picture for one respondent. A pure function of the
/// catalog and response set; recomputed on demand, never the source of truth.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentScores {
    pub sections: BTreeMap<String, SectionScore>,
    pub overall_percentage: f64,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub total_earned: f64,
    pub total_possible: f64,
}

/// Scores plus the per-item diagnostics accumulated while computing them.
/// The engine never raises for bad per-item data; callers decide what is
/// fatal.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreOutcome {
    pub scores: AssessmentScores,
    pub warnings: Vec<String>,
}

/// Convert one response into points.
///
/// Declaration: the affirmative (first) option earns full weight, the
/// antithesis a quarter. MultipleChoice: weight * max(0, 1 - 0.25 * index),
/// option order is authored best-first. Input: full weight for any
/// non-empty answer.
///
/// Returns None when the selected option is not one of the question's
/// options; the caller ignores the response and records a warning.
pub fn score_response(question: &Question, response: &UserResponse) -> Option<f64> {
    match question.question_type {
        QuestionType::Declaration => {
            let index = question.option_index(&response.selected_option)?;
            Some(if index == 0 {
                question.weight
            } else {
                question.weight * 0.25
            })
        }
        QuestionType::MultipleChoice => {
            let index = question.option_index(&response.selected_option)?;
            Some(question.weight * (1.0 - 0.25 * index as f64).max(0.0))
        }
        QuestionType::Input => {
            if response.selected_option.trim().is_empty() {
                Some(0.0)
            } else {
                Some(question.weight)
            }
        }
    }
}

/// Score a full response set: aggregate per section, then derive the
/// overall percentage and strength/improvement labels.
pub fn compute_scores(catalog: &QuestionCatalog, responses: &ResponseSet) -> ScoreOutcome {
    let mut warnings = Vec::new();
    let sections = aggregate(catalog, responses, &mut warnings);
    let order = catalog.sections();
    let summary = calculate_overall(&order, &sections);

    ScoreOutcome {
        scores: AssessmentScores {
            sections,
            overall_percentage: summary.overall_percentage,
            strengths: summary.strengths,
            improvement_areas: summary.improvement_areas,
            total_earned: summary.total_earned,
            total_possible: summary.total_possible,
        },
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, section: &str, question_type: QuestionType, options: &[&str], weight: f64) -> Question {
        Question {
            id,
            section: section.to_string(),
            subsection: String::new(),
            question_type,
            text: format!("Question {}", id),
            options: options.iter().map(|o| o.to_string()).collect(),
            weight,
        }
    }

    fn answer(id: u32, option: &str) -> UserResponse {
        UserResponse {
            question_id: id,
            selected_option: option.to_string(),
            option_index: None,
        }
    }

    #[test]
    fn test_declaration_affirmative_full_weight() {
        let q = question(1, "Faith", QuestionType::Declaration, &["Agree", "Disagree"], 12.0);
        assert_eq!(score_response(&q, &answer(1, "Agree")), Some(12.0));
    }

    #[test]
    fn test_declaration_antithesis_quarter_weight() {
        let q = question(1, "Faith", QuestionType::Declaration, &["Agree", "Disagree"], 12.0);
        assert_eq!(score_response(&q, &answer(1, "Disagree")), Some(3.0));
    }

    #[test]
    fn test_declaration_unknown_option_rejected() {
        let q = question(1, "Faith", QuestionType::Declaration, &["Agree", "Disagree"], 12.0);
        assert_eq!(score_response(&q, &answer(1, "Sometimes")), None);
    }

    #[test]
    fn test_multiple_choice_graduated_by_index() {
        let q = question(
            2,
            "Finances",
            QuestionType::MultipleChoice,
            &["Together", "Primary earner", "Separately", "No plan", "Never discussed", "Avoid it"],
            8.0,
        );
        assert_eq!(score_response(&q, &answer(2, "Together")), Some(8.0));
        assert_eq!(score_response(&q, &answer(2, "Primary earner")), Some(6.0));
        assert_eq!(score_response(&q, &answer(2, "Separately")), Some(4.0));
        assert_eq!(score_response(&q, &answer(2, "No plan")), Some(2.0));
        // Index 4 and beyond floor at zero
        assert_eq!(score_response(&q, &answer(2, "Never discussed")), Some(0.0));
        assert_eq!(score_response(&q, &answer(2, "Avoid it")), Some(0.0));
    }

    #[test]
    fn test_multiple_choice_monotonically_non_increasing() {
        let options: Vec<String> = (0..6).map(|i| format!("opt{}", i)).collect();
        let refs: Vec<&str> = options.iter().map(|s| s.as_str()).collect();
        let q = question(3, "Family", QuestionType::MultipleChoice, &refs, 10.0);
        let scores: Vec<f64> = options
            .iter()
            .map(|o| score_response(&q, &answer(3, o)).unwrap())
            .collect();
        for pair in scores.windows(2) {
            assert!(pair[0] >= pair[1], "scores must not increase with index: {:?}", scores);
        }
    }

    #[test]
    fn test_input_scores_on_presence() {
        let q = question(4, "Communication", QuestionType::Input, &["I acknowledge"], 5.0);
        assert_eq!(score_response(&q, &answer(4, "We talk daily")), Some(5.0));
        assert_eq!(score_response(&q, &answer(4, "")), Some(0.0));
        assert_eq!(score_response(&q, &answer(4, "  \t ")), Some(0.0));
    }

    fn full_catalog() -> QuestionCatalog {
        let (catalog, warnings) = QuestionCatalog::new(vec![
            question(1, "Faith", QuestionType::Declaration, &["Agree", "Disagree"], 12.0),
            question(2, "Faith", QuestionType::MultipleChoice, &["Weekly", "Monthly", "Rarely"], 8.0),
            question(3, "Finances", QuestionType::Declaration, &["Agree", "Disagree"], 6.0),
            question(4, "Finances", QuestionType::Input, &["I acknowledge"], 4.0),
        ]);
        assert!(warnings.is_empty());
        catalog
    }

    #[test]
    fn test_perfect_answers_score_100() {
        let catalog = full_catalog();
        let (responses, _) = ResponseSet::from_responses(vec![
            answer(1, "Agree"),
            answer(2, "Weekly"),
            answer(3, "Agree"),
            answer(4, "noted"),
        ]);
        let outcome = compute_scores(&catalog, &responses);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.scores.overall_percentage, 100.0);
        assert_eq!(outcome.scores.total_earned, 30.0);
        assert_eq!(outcome.scores.total_possible, 30.0);
        assert_eq!(outcome.scores.improvement_areas.len(), 0);
        assert_eq!(outcome.scores.strengths.len(), 2);
    }

    #[test]
    fn test_empty_response_map() {
        let catalog = full_catalog();
        let (responses, _) = ResponseSet::from_responses(vec![]);
        let outcome = compute_scores(&catalog, &responses);

        assert_eq!(outcome.scores.overall_percentage, 0.0);
        assert!(outcome.scores.strengths.is_empty());
        // Every section reports 0% and shows up as an improvement area
        assert_eq!(
            outcome.scores.improvement_areas,
            vec!["Faith (0%)", "Finances (0%)"]
        );
    }

    #[test]
    fn test_mixed_answers() {
        let catalog = full_catalog();
        let (responses, _) = ResponseSet::from_responses(vec![
            answer(1, "Disagree"), // 3 of 12
            answer(2, "Monthly"),  // 6 of 8
            answer(3, "Agree"),    // 6 of 6
        ]);
        let outcome = compute_scores(&catalog, &responses);

        let faith = &outcome.scores.sections["Faith"];
        assert_eq!(faith.earned, 9.0);
        assert_eq!(faith.percentage, 45.0);

        let finances = &outcome.scores.sections["Finances"];
        assert_eq!(finances.possible, 6.0); // question 4 unanswered, excluded
        assert_eq!(finances.percentage, 100.0);

        // 15/26 = 57.7
        assert_eq!(outcome.scores.overall_percentage, 57.7);
    }

    #[test]
    fn test_warnings_carried_in_outcome() {
        let catalog = full_catalog();
        let (responses, _) = ResponseSet::from_responses(vec![
            answer(1, "Whatever"),
            answer(42, "Agree"),
        ]);
        let outcome = compute_scores(&catalog, &responses);
        assert_eq!(outcome.warnings.len(), 2);
    }
}
