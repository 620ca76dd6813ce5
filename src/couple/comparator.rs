use serde::Serialize;
use std::fmt;

use super::config::CompareConfig;
use crate::catalog::QuestionCatalog;
use crate::respondent::ResponseSet;
use crate::scoring::{round1, AssessmentScores};

/// One party's independently computed responses and scores. The comparator
/// never rescores anything.
#[derive(Debug, Clone, Copy)]
pub struct CoupleInput<'a> {
    pub responses: &'a ResponseSet,
    pub scores: &'a AssessmentScores,
}

/// Qualitative label for a section percentage gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentBucket {
    Aligned,
    Close,
    Divergent,
    Conflicting,
}

impl AlignmentBucket {
    pub fn from_difference(difference: f64) -> Self {
        if difference <= 5.0 {
            AlignmentBucket::Aligned
        } else if difference <= 15.0 {
            AlignmentBucket::Close
        } else if difference <= 30.0 {
            AlignmentBucket::Divergent
        } else {
            AlignmentBucket::Conflicting
        }
    }
}

impl fmt::Display for AlignmentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlignmentBucket::Aligned => "aligned",
            AlignmentBucket::Close => "close",
            AlignmentBucket::Divergent => "divergent",
            AlignmentBucket::Conflicting => "conflicting",
        };
        write!(f, "{}", label)
    }
}

/// Side-by-side section percentages for both parties.
#[derive(Debug, Clone, Serialize)]
pub struct SectionComparison {
    pub section: String,
    pub primary_pct: f64,
    pub spouse_pct: f64,
    pub difference: f64,
    pub bucket: AlignmentBucket,
}

/// A question both parties answered with different options.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResponseDifference {
    pub question_id: u32,
    pub text: String,
    pub section: String,
    pub weight: f64,
    pub primary_choice: String,
    pub spouse_choice: String,
}

/// Full couple comparison output.
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityReport {
    /// Blend of response agreement and section similarity, 0-100.
    pub compatibility_score: f64,
    pub response_match_pct: f64,
    pub section_similarity_pct: f64,
    pub section_comparisons: Vec<SectionComparison>,
    pub different_responses: Vec<ResponseDifference>,
    /// Differences on questions at or above the configured weight threshold.
    pub major_differences: Vec<ResponseDifference>,
    /// Sections where the couple rarely differs.
    pub strength_areas: Vec<String>,
    /// Sections with a high share of disagreement or heavy differing weight.
    pub vulnerability_areas: Vec<String>,
    pub warnings: Vec<String>,
}

/// Compare two independently scored respondents.
///
/// Response agreement is weighted by question weight over the questions
/// both parties answered; section similarity averages `100 - |a - b|` over
/// sections present in both score maps. Every aggregate here is symmetric,
/// so swapping the two inputs changes only the primary/spouse labeling of
/// recorded choices, never a score or area list.
pub fn compare_couple(
    catalog: &QuestionCatalog,
    primary: CoupleInput,
    spouse: CoupleInput,
    config: &CompareConfig,
) -> CompatibilityReport {
    let mut warnings = Vec::new();

    // Weighted response agreement over questions both parties answered
    let mut total_weight = 0.0;
    let mut matched_weight = 0.0;
    let mut differences: Vec<ResponseDifference> = Vec::new();

    for question in catalog.questions() {
        let (Some(a), Some(b)) = (
            primary.responses.get(question.id),
            spouse.responses.get(question.id),
        ) else {
            continue;
        };
        total_weight += question.weight;
        if a.selected_option == b.selected_option {
            matched_weight += question.weight;
        } else {
            differences.push(ResponseDifference {
                question_id: question.id,
                text: question.text.clone(),
                section: question.section.clone(),
                weight: question.weight,
                primary_choice: a.selected_option.clone(),
                spouse_choice: b.selected_option.clone(),
            });
        }
    }

    let response_match_pct = if total_weight > 0.0 {
        matched_weight / total_weight * 100.0
    } else {
        warnings.push("no questions answered by both parties".to_string());
        0.0
    };

    // Section similarity over sections present in both score maps
    let mut section_comparisons = Vec::new();
    let mut similarity_sum = 0.0;
    for section in catalog.sections() {
        let (Some(a), Some(b)) = (
            primary.scores.sections.get(section),
            spouse.scores.sections.get(section),
        ) else {
            continue;
        };
        let difference = (a.percentage - b.percentage).abs();
        similarity_sum += 100.0 - difference;
        section_comparisons.push(SectionComparison {
            section: section.to_string(),
            primary_pct: a.percentage,
            spouse_pct: b.percentage,
            difference: round1(difference),
            bucket: AlignmentBucket::from_difference(difference),
        });
    }
    let section_similarity_pct = if section_comparisons.is_empty() {
        0.0
    } else {
        similarity_sum / section_comparisons.len() as f64
    };

    let compatibility_score = round1(
        (response_match_pct * config.response_match_share
            + section_similarity_pct * config.section_similarity_share)
            .clamp(0.0, 100.0),
    );

    let major_differences: Vec<ResponseDifference> = differences
        .iter()
        .filter(|d| d.weight >= config.major_weight_threshold)
        .cloned()
        .collect();

    // Strength/vulnerability areas from per-section disagreement.
    // Vulnerability wins when a section trips both tests.
    let mut strength_areas = Vec::new();
    let mut vulnerability_areas = Vec::new();
    for section in catalog.sections() {
        let total = catalog.section_question_count(section);
        if total == 0 {
            continue;
        }
        let differing: Vec<&ResponseDifference> =
            differences.iter().filter(|d| d.section == section).collect();
        let ratio = differing.len() as f64 / total as f64;
        let differing_weight: f64 = differing.iter().map(|d| d.weight).sum();

        if ratio >= config.vulnerability_ratio_min
            || differing_weight >= config.vulnerability_weight_threshold
        {
            vulnerability_areas.push(section.to_string());
        } else if ratio <= config.strength_ratio_max {
            strength_areas.push(section.to_string());
        }
    }

    CompatibilityReport {
        compatibility_score,
        response_match_pct: round1(response_match_pct),
        section_similarity_pct: round1(section_similarity_pct),
        section_comparisons,
        different_responses: differences,
        major_differences,
        strength_areas,
        vulnerability_areas,
        warnings,
    }
}
