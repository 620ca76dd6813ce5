use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::UserProfile;
use crate::scoring::SectionScore;

/// A profile failing exactly one criterion by no more than this many
/// percentage points is a near match.
pub const NEAR_MATCH_TOLERANCE: f64 = 5.0;

/// One violated criterion: which section, what the respondent actually
/// scored, the bound that was broken, and by how much.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionMiss {
    pub section: String,
    pub actual: f64,
    pub threshold: f64,
    pub shortfall: f64,
}

/// How one profile fits a respondent's section percentages.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileFit {
    /// Every criterion holds.
    Exact,
    /// Exactly one criterion failed, within tolerance.
    Near(CriterionMiss),
    NoFit,
}

/// Evaluate one profile against section percentages.
///
/// A criterion referencing a section the respondent has no score for is
/// evaluated against 0% and flagged as a configuration warning, not an
/// error. A profile without criteria never fits anything.
pub fn evaluate_profile(
    profile: &UserProfile,
    sections: &BTreeMap<String, SectionScore>,
    warnings: &mut Vec<String>,
) -> ProfileFit {
    if profile.criteria.is_empty() {
        warnings.push(format!(
            "profile {} '{}': no criteria, cannot match",
            profile.id, profile.name
        ));
        return ProfileFit::NoFit;
    }

    let mut misses: Vec<CriterionMiss> = Vec::new();
    for criterion in &profile.criteria {
        let actual = match sections.get(&criterion.section) {
            Some(score) => score.percentage,
            None => {
                warnings.push(format!(
                    "profile {} '{}': criterion references unknown section '{}', treating as 0%",
                    profile.id, profile.name, criterion.section
                ));
                0.0
            }
        };

        if let Some(min) = criterion.min {
            if actual < min {
                misses.push(CriterionMiss {
                    section: criterion.section.clone(),
                    actual,
                    threshold: min,
                    shortfall: min - actual,
                });
                continue;
            }
        }
        if let Some(max) = criterion.max {
            if actual > max {
                misses.push(CriterionMiss {
                    section: criterion.section.clone(),
                    actual,
                    threshold: max,
                    shortfall: actual - max,
                });
            }
        }
    }

    match misses.len() {
        0 => ProfileFit::Exact,
        1 if misses[0].shortfall <= NEAR_MATCH_TOLERANCE => ProfileFit::Near(misses.remove(0)),
        _ => ProfileFit::NoFit,
    }
}
