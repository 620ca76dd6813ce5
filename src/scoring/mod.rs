pub mod engine;
pub mod overall;
pub mod section;

pub use engine::{compute_scores, score_response, AssessmentScores, ScoreOutcome};
pub use overall::{calculate_overall, OverallSummary, IMPROVEMENT_THRESHOLD, STRENGTH_THRESHOLD};
pub use section::{aggregate, SectionScore};

/// Round to one decimal place. All reported percentages go through this.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format an already-rounded percentage, trimming a trailing ".0"
/// (e.g. 76.0 -> "76", 87.8 -> "87.8")
pub fn fmt_pct(value: f64) -> String {
    let rounded = round1(value);
    if (rounded - rounded.trunc()).abs() < 1e-9 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}
