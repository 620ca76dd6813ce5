use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::couple::CompatibilityReport;
use crate::matching::MatchResult;
use crate::respondent::RespondentFile;
use crate::scoring::{fmt_pct, AssessmentScores, IMPROVEMENT_THRESHOLD, STRENGTH_THRESHOLD};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width <= 3 {
        chars.into_iter().take(max_width).collect()
    } else {
        let kept: String = chars.into_iter().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}

fn widest(names: impl Iterator<Item = usize>) -> usize {
    names.max().unwrap_or(0)
}

/// Render one respondent's scores and profile match as a terminal report.
pub fn format_assessment(
    respondent: &RespondentFile,
    scores: &AssessmentScores,
    match_result: &MatchResult,
    section_order: &[&str],
    use_colors: bool,
) -> String {
    let mut out = String::new();

    let name = respondent.name.as_deref().unwrap_or("respondent");
    let header = match respondent.submitted_at {
        Some(at) => format!("Assessment for {} (submitted {})", name, at.format("%Y-%m-%d")),
        None => format!("Assessment for {}", name),
    };
    if use_colors {
        out.push_str(&format!("{}\n", header.bold()));
    } else {
        out.push_str(&format!("{}\n", header));
    }
    out.push_str(&format!(
        "Overall: {}% ({} of {} points)\n\n",
        fmt_pct(scores.overall_percentage),
        scores.total_earned,
        scores.total_possible
    ));

    out.push_str("Section scores:\n");
    let name_width = widest(section_order.iter().map(|s| s.chars().count()));
    for section in section_order {
        let Some(score) = scores.sections.get(*section) else {
            continue;
        };
        // Pad before colorizing: ANSI escapes would throw the column off
        let padded = format!("{:<name_width$}", section);
        let pct = format!("{:>5}%", fmt_pct(score.percentage));
        let line = if use_colors {
            let pct = if score.percentage >= STRENGTH_THRESHOLD {
                format!("{}", pct.green())
            } else if score.percentage < IMPROVEMENT_THRESHOLD {
                format!("{}", pct.red())
            } else {
                pct
            };
            format!("  {}  {}\n", padded.cyan(), pct)
        } else {
            format!("  {}  {}\n", padded, pct)
        };
        out.push_str(&line);
    }

    if !scores.strengths.is_empty() {
        out.push_str("\nStrengths:\n");
        for label in &scores.strengths {
            out.push_str(&format!("  - {}\n", label));
        }
    }
    if !scores.improvement_areas.is_empty() {
        out.push_str("\nImprovement areas:\n");
        for label in &scores.improvement_areas {
            out.push_str(&format!("  - {}\n", label));
        }
    }

    out.push('\n');
    match &match_result.primary_profile {
        Some(profile) => {
            let line = if use_colors {
                format!("Profile: {}", profile.name.bold())
            } else {
                format!("Profile: {}", profile.name)
            };
            out.push_str(&line);
            if !profile.description.is_empty() {
                out.push_str(&format!(" - {}", profile.description));
            }
            out.push('\n');
        }
        None => out.push_str("Profile: none matched\n"),
    }
    if let Some(profile) = &match_result.gender_profile {
        out.push_str(&format!("Gender profile: {}\n", profile.name));
    }
    if let Some(feedback) = &match_result.near_match_feedback {
        out.push_str(&format!("Near match: {}\n", feedback));
    }

    out
}

/// Render a couple comparison as a terminal report.
pub fn format_compatibility(report: &CompatibilityReport, use_colors: bool) -> String {
    let mut out = String::new();

    let headline = format!("Compatibility: {}%", fmt_pct(report.compatibility_score));
    if use_colors {
        out.push_str(&format!("{}\n", headline.bold()));
    } else {
        out.push_str(&format!("{}\n", headline));
    }
    out.push_str(&format!(
        "  Response agreement: {}%  Section similarity: {}%\n\n",
        fmt_pct(report.response_match_pct),
        fmt_pct(report.section_similarity_pct)
    ));

    if !report.section_comparisons.is_empty() {
        out.push_str("Section comparison:\n");
        let name_width = widest(report.section_comparisons.iter().map(|c| c.section.chars().count()));
        for comparison in &report.section_comparisons {
            let padded = format!("{:<name_width$}", comparison.section);
            let values = format!(
                "{:>5}% vs {:>5}%  diff {:>5}  {}",
                fmt_pct(comparison.primary_pct),
                fmt_pct(comparison.spouse_pct),
                fmt_pct(comparison.difference),
                comparison.bucket
            );
            if use_colors {
                out.push_str(&format!("  {}  {}\n", padded.cyan(), values));
            } else {
                out.push_str(&format!("  {}  {}\n", padded, values));
            }
        }
        out.push('\n');
    }

    if report.different_responses.is_empty() {
        out.push_str("No differing answers.\n");
    } else {
        out.push_str(&format!(
            "Differences ({}, {} major):\n",
            report.different_responses.len(),
            report.major_differences.len()
        ));
        // Leave room for the indent and choice columns on narrow terminals
        let text_width = get_terminal_width().map(|w| w.saturating_sub(40)).unwrap_or(usize::MAX).max(20);
        for difference in &report.different_responses {
            let is_major = report
                .major_differences
                .iter()
                .any(|m| m.question_id == difference.question_id);
            let marker = if is_major { "[major] " } else { "" };
            let line = format!(
                "  {}{} ({}, weight {}): '{}' vs '{}'\n",
                marker,
                truncate_text(&difference.text, text_width),
                difference.section,
                difference.weight,
                difference.primary_choice,
                difference.spouse_choice
            );
            if use_colors && is_major {
                out.push_str(&format!("{}", line.red()));
            } else {
                out.push_str(&line);
            }
        }
    }

    if !report.strength_areas.is_empty() {
        out.push_str(&format!("\nStrength areas: {}\n", report.strength_areas.join(", ")));
    }
    if !report.vulnerability_areas.is_empty() {
        let line = format!("Vulnerability areas: {}\n", report.vulnerability_areas.join(", "));
        if use_colors {
            out.push_str(&format!("{}", line.yellow()));
        } else {
            out.push_str(&line);
        }
    }

    out
}
