use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a question is answered, which decides how it is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Binary agree/disagree statement. Exactly two options: affirmative
    /// first, antithesis second.
    Declaration,
    /// Ordered options, best answer listed first. Scoring degrades by
    /// option position.
    MultipleChoice,
    /// Free-text acknowledgement. Any non-empty answer earns full weight.
    Input,
}

/// A single catalog question. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    /// Section the question belongs to. Sections are the unit of score
    /// reporting and of profile criteria.
    pub section: String,
    /// Finer grouping inside a section, informational only.
    #[serde(default)]
    pub subsection: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    pub options: Vec<String>,
    /// Section-relative point value of a perfect answer.
    pub weight: f64,
}

impl Question {
    /// Zero-based position of a selected option, by value.
    pub fn option_index(&self, selected: &str) -> Option<usize> {
        self.options.iter().position(|o| o == selected)
    }
}

/// Respondent gender, normalized from an opaque input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse a raw gender string. Trimmed, case-insensitive; anything
    /// unrecognized yields None.
    pub fn parse(raw: &str) -> Option<Gender> {
        match raw.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// One section threshold of a profile. Bounds are inclusive percentages;
/// at least one must be set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Criterion {
    pub section: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl Criterion {
    pub fn has_bound(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

/// A psychographic profile defined by section-score thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// None means the profile applies to any respondent.
    #[serde(default)]
    pub gender_specific: Option<Gender>,
    /// All criteria must hold for an exact match. Order is the authoring
    /// order and is preserved in feedback.
    pub criteria: Vec<Criterion>,
}

/// Validated, immutable question catalog with id lookup.
///
/// Construction skips malformed questions with a warning instead of
/// failing: one bad entry must not break scoring for everyone.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    by_id: HashMap<u32, usize>,
}

impl QuestionCatalog {
    pub fn new(raw: Vec<Question>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let mut questions: Vec<Question> = Vec::with_capacity(raw.len());
        let mut by_id = HashMap::new();

        for q in raw {
            if q.id == 0 {
                warnings.push(format!("question '{}': id must be positive, skipped", q.text));
                continue;
            }
            if by_id.contains_key(&q.id) {
                warnings.push(format!("question {}: duplicate id, skipped", q.id));
                continue;
            }
            if q.section.trim().is_empty() {
                warnings.push(format!("question {}: empty section, skipped", q.id));
                continue;
            }
            if !(q.weight > 0.0) || !q.weight.is_finite() {
                warnings.push(format!("question {}: weight must be positive, skipped", q.id));
                continue;
            }
            if q.options.is_empty() {
                warnings.push(format!("question {}: no options, skipped", q.id));
                continue;
            }
            if q.question_type == QuestionType::Declaration && q.options.len() != 2 {
                warnings.push(format!(
                    "question {}: declaration needs exactly 2 options, found {}, skipped",
                    q.id,
                    q.options.len()
                ));
                continue;
            }
            by_id.insert(q.id, questions.len());
            questions.push(q);
        }

        (Self { questions, by_id }, warnings)
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.by_id.get(&id).map(|&i| &self.questions[i])
    }

    /// Questions in catalog (authoring) order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Section names in first-appearance order.
    pub fn sections(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for q in &self.questions {
            if !seen.iter().any(|s| *s == q.section.as_str()) {
                seen.push(q.section.as_str());
            }
        }
        seen
    }

    /// Number of catalog questions in a section.
    pub fn section_question_count(&self, section: &str) -> usize {
        self.questions.iter().filter(|q| q.section == section).count()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Validated, immutable profile catalog.
///
/// Same skip-and-warn policy as the question catalog: a profile with no
/// usable criteria is configuration error, never an automatic match.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    profiles: Vec<UserProfile>,
}

impl ProfileCatalog {
    pub fn new(raw: Vec<UserProfile>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let mut profiles: Vec<UserProfile> = Vec::with_capacity(raw.len());

        for mut p in raw {
            if profiles.iter().any(|existing| existing.id == p.id) {
                warnings.push(format!("profile {} '{}': duplicate id, skipped", p.id, p.name));
                continue;
            }
            if p.criteria.is_empty() {
                warnings.push(format!("profile {} '{}': no criteria, skipped", p.id, p.name));
                continue;
            }
            if let Some(c) = p.criteria.iter().find(|c| {
                matches!((c.min, c.max), (Some(lo), Some(hi)) if lo > hi)
            }) {
                warnings.push(format!(
                    "profile {} '{}': criterion '{}' has min above max, skipped",
                    p.id, p.name, c.section
                ));
                continue;
            }
            let before = p.criteria.len();
            p.criteria.retain(Criterion::has_bound);
            if p.criteria.len() < before {
                warnings.push(format!(
                    "profile {} '{}': dropped {} criterion(s) with neither min nor max",
                    p.id,
                    p.name,
                    before - p.criteria.len()
                ));
            }
            if p.criteria.is_empty() {
                warnings.push(format!(
                    "profile {} '{}': no usable criteria remain, skipped",
                    p.id, p.name
                ));
                continue;
            }
            profiles.push(p);
        }

        (Self { profiles }, warnings)
    }

    /// Profiles in catalog (authoring) order.
    pub fn profiles(&self) -> &[UserProfile] {
        &self.profiles
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
