use serde::Serialize;
use std::collections::BTreeMap;

use super::outcome::{evaluate_profile, CriterionMiss, ProfileFit};
use crate::catalog::{Gender, ProfileCatalog, UserProfile};
use crate::scoring::{fmt_pct, SectionScore};

/// Outcome of matching a respondent's section scores against the profile
/// catalog.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// The selected profile: first gender-matched exact fit, else first
    /// unisex exact fit, else the fallback (first unisex profile in catalog
    /// order). None only when the catalog has no unisex profile to fall
    /// back on.
    pub primary_profile: Option<UserProfile>,
    /// The gender-specific profile, only when one was an exact fit. A near
    /// fit is never promoted here.
    pub gender_profile: Option<UserProfile>,
    /// Populated when no exact fit exists and some profile missed by one
    /// criterion within tolerance: the closest such profile and what it
    /// missed.
    pub near_match_feedback: Option<String>,
    pub warnings: Vec<String>,
}

/// Match section scores against the catalog.
///
/// Candidates are the unisex profiles plus those whose gender affinity
/// equals the respondent's normalized gender; an unrecognized or absent
/// gender leaves the gender pool empty. Catalog order is the tie-break
/// everywhere: first exact fit per pool wins, and near fits with equal
/// shortfall keep the earlier profile.
pub fn match_profiles(
    catalog: &ProfileCatalog,
    sections: &BTreeMap<String, SectionScore>,
    gender: Option<&str>,
) -> MatchResult {
    let mut warnings = Vec::new();
    let gender = gender.and_then(Gender::parse);

    let mut exact_gender: Option<&UserProfile> = None;
    let mut exact_unisex: Option<&UserProfile> = None;
    let mut closest_near: Option<(&UserProfile, CriterionMiss)> = None;

    for profile in catalog.profiles() {
        let candidate = match profile.gender_specific {
            None => true,
            Some(affinity) => gender == Some(affinity),
        };
        if !candidate {
            continue;
        }

        match evaluate_profile(profile, sections, &mut warnings) {
            ProfileFit::Exact => {
                if profile.gender_specific.is_some() {
                    exact_gender.get_or_insert(profile);
                } else {
                    exact_unisex.get_or_insert(profile);
                }
            }
            ProfileFit::Near(miss) => {
                let closer = match &closest_near {
                    None => true,
                    Some((_, best)) => miss.shortfall < best.shortfall,
                };
                if closer {
                    closest_near = Some((profile, miss));
                }
            }
            ProfileFit::NoFit => {}
        }
    }

    let selected = exact_gender.or(exact_unisex);
    let (primary_profile, near_match_feedback) = match selected {
        Some(profile) => (Some(profile.clone()), None),
        None => {
            let fallback = catalog
                .profiles()
                .iter()
                .find(|p| p.gender_specific.is_none());
            if fallback.is_none() {
                warnings.push("no unisex profile available for fallback selection".to_string());
            }
            let feedback = closest_near.as_ref().map(|(profile, miss)| {
                format!(
                    "{}: {} ({}% vs {}% required)",
                    profile.name,
                    miss.section,
                    fmt_pct(miss.actual),
                    fmt_pct(miss.threshold)
                )
            });
            (fallback.cloned(), feedback)
        }
    };

    MatchResult {
        primary_profile,
        gender_profile: exact_gender.cloned(),
        near_match_feedback,
        warnings,
    }
}
