use serde::Serialize;
use std::collections::BTreeMap;

use super::section::SectionScore;
use super::{fmt_pct, round1};

/// Sections at or above this percentage are strengths.
pub const STRENGTH_THRESHOLD: f64 = 80.0;
/// Sections below this percentage are improvement areas. Sections between
/// the two thresholds appear in neither list.
pub const IMPROVEMENT_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Serialize)]
pub struct OverallSummary {
    pub overall_percentage: f64,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub total_earned: f64,
    pub total_possible: f64,
}

/// Combine section scores into one overall percentage plus strength and
/// improvement labels.
///
/// Overall uses the simple-sum strategy: total earned over total possible.
/// Labels are emitted in `section_order` (catalog order) and formatted as
/// "Section (85.5%)".
pub fn calculate_overall(
    section_order: &[&str],
    sections: &BTreeMap<String, SectionScore>,
) -> OverallSummary {
    let total_earned: f64 = sections.values().map(|s| s.earned).sum();
    let total_possible: f64 = sections.values().map(|s| s.possible).sum();

    let overall_percentage = if total_possible > 0.0 {
        round1((total_earned / total_possible * 100.0).min(100.0))
    } else {
        0.0
    };

    let mut strengths = Vec::new();
    let mut improvement_areas = Vec::new();
    for name in section_order {
        if let Some(score) = sections.get(*name) {
            let label = format!("{} ({}%)", name, fmt_pct(score.percentage));
            if score.percentage >= STRENGTH_THRESHOLD {
                strengths.push(label);
            } else if score.percentage < IMPROVEMENT_THRESHOLD {
                improvement_areas.push(label);
            }
        }
    }

    OverallSummary {
        overall_percentage,
        strengths,
        improvement_areas,
        total_earned,
        total_possible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(earned: f64, possible: f64, percentage: f64) -> SectionScore {
        SectionScore {
            earned,
            possible,
            percentage,
        }
    }

    #[test]
    fn test_simple_sum_overall() {
        let mut sections = BTreeMap::new();
        sections.insert("Faith".to_string(), score(18.0, 20.0, 90.0));
        sections.insert("Finances".to_string(), score(5.0, 10.0, 50.0));

        let summary = calculate_overall(&["Faith", "Finances"], &sections);
        // 23/30 = 76.7
        assert_eq!(summary.overall_percentage, 76.7);
        assert_eq!(summary.total_earned, 23.0);
        assert_eq!(summary.total_possible, 30.0);
    }

    #[test]
    fn test_labels_use_catalog_order_and_thresholds() {
        let mut sections = BTreeMap::new();
        sections.insert("Faith".to_string(), score(9.0, 10.0, 90.0));
        sections.insert("Family".to_string(), score(7.5, 10.0, 75.0));
        sections.insert("Finances".to_string(), score(6.0, 10.0, 60.0));
        sections.insert("Intimacy".to_string(), score(8.0, 10.0, 80.0));

        let summary = calculate_overall(&["Intimacy", "Faith", "Family", "Finances"], &sections);
        assert_eq!(summary.strengths, vec!["Intimacy (80%)", "Faith (90%)"]);
        // 75% is adequate but unremarkable: in neither list
        assert_eq!(summary.improvement_areas, vec!["Finances (60%)"]);
    }

    #[test]
    fn test_zero_possible_yields_zero() {
        let mut sections = BTreeMap::new();
        sections.insert("Faith".to_string(), SectionScore::default());

        let summary = calculate_overall(&["Faith"], &sections);
        assert_eq!(summary.overall_percentage, 0.0);
        assert!(summary.strengths.is_empty());
        // An unanswered section scores 0% and lands in improvement areas
        assert_eq!(summary.improvement_areas, vec!["Faith (0%)"]);
    }

    #[test]
    fn test_overall_clamped_to_100() {
        let mut sections = BTreeMap::new();
        sections.insert("Faith".to_string(), score(25.0, 20.0, 100.0));

        let summary = calculate_overall(&["Faith"], &sections);
        assert_eq!(summary.overall_percentage, 100.0);
    }

    #[test]
    fn test_fractional_label() {
        let mut sections = BTreeMap::new();
        sections.insert("Faith".to_string(), score(10.5, 12.0, 87.5));

        let summary = calculate_overall(&["Faith"], &sections);
        assert_eq!(summary.strengths, vec!["Faith (87.5%)"]);
    }
}
