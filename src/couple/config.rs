use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Couple comparison configuration.
///
/// Every field has a default, so an empty file (or no file) runs with the
/// stock thresholds.
///
/// Example YAML:
/// ```yaml
/// major_weight_threshold: 5
/// vulnerability_weight_threshold: 10
/// strength_ratio_max: 0.2
/// vulnerability_ratio_min: 0.5
/// response_match_share: 0.7
/// section_similarity_share: 0.3
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompareConfig {
    /// A differing answer on a question at or above this weight is a major
    /// difference (default: 5)
    #[serde(default = "default_major_weight")]
    pub major_weight_threshold: f64,

    /// Cumulative differing weight in a section at or above this marks the
    /// section vulnerable (default: 10)
    #[serde(default = "default_vulnerability_weight")]
    pub vulnerability_weight_threshold: f64,

    /// A section whose share of differing questions is at or below this is
    /// a strength area (default: 0.2)
    #[serde(default = "default_strength_ratio")]
    pub strength_ratio_max: f64,

    /// A section whose share of differing questions is at or above this is
    /// a vulnerability area (default: 0.5)
    #[serde(default = "default_vulnerability_ratio")]
    pub vulnerability_ratio_min: f64,

    /// Share of the compatibility score from raw response agreement
    /// (default: 0.7). Must sum to 1.0 with `section_similarity_share`.
    #[serde(default = "default_response_match_share")]
    pub response_match_share: f64,

    /// Share from section-percentage similarity (default: 0.3)
    #[serde(default = "default_section_similarity_share")]
    pub section_similarity_share: f64,
}

fn default_major_weight() -> f64 {
    5.0
}

fn default_vulnerability_weight() -> f64 {
    10.0
}

fn default_strength_ratio() -> f64 {
    0.2
}

fn default_vulnerability_ratio() -> f64 {
    0.5
}

fn default_response_match_share() -> f64 {
    0.7
}

fn default_section_similarity_share() -> f64 {
    0.3
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            major_weight_threshold: default_major_weight(),
            vulnerability_weight_threshold: default_vulnerability_weight(),
            strength_ratio_max: default_strength_ratio(),
            vulnerability_ratio_min: default_vulnerability_ratio(),
            response_match_share: default_response_match_share(),
            section_similarity_share: default_section_similarity_share(),
        }
    }
}

/// Load comparison config from a YAML file, or the defaults when no path
/// is given.
pub fn load_compare_config(path: Option<PathBuf>) -> Result<CompareConfig> {
    let Some(path) = path else {
        return Ok(CompareConfig::default());
    };
    if !path.exists() {
        anyhow::bail!("Compare config file not found at {}", path.display());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read compare config at {}", path.display()))?;
    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse compare config: invalid YAML in {}", path.display()))
}

/// Validate comparison config. Returns all problems at once (not just the
/// first).
pub fn validate_compare_config(config: &CompareConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.major_weight_threshold < 0.0 {
        errors.push("compare.major_weight_threshold: must be non-negative".to_string());
    }
    if config.vulnerability_weight_threshold < 0.0 {
        errors.push("compare.vulnerability_weight_threshold: must be non-negative".to_string());
    }
    if !(0.0..=1.0).contains(&config.strength_ratio_max) {
        errors.push("compare.strength_ratio_max: must be between 0 and 1".to_string());
    }
    if !(0.0..=1.0).contains(&config.vulnerability_ratio_min) {
        errors.push("compare.vulnerability_ratio_min: must be between 0 and 1".to_string());
    }
    if config.response_match_share < 0.0 || config.section_similarity_share < 0.0 {
        errors.push("compare: blend shares must be non-negative".to_string());
    }
    let share_sum = config.response_match_share + config.section_similarity_share;
    if (share_sum - 1.0).abs() > 1e-9 {
        errors.push(format!(
            "compare: response_match_share + section_similarity_share must sum to 1.0, got {}",
            share_sum
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
