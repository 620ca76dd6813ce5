use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// One answered question. Never mutated after submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub question_id: u32,
    pub selected_option: String,
    /// Advisory index recorded by the capturing layer. The engine always
    /// derives the authoritative index by value lookup in the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_index: Option<usize>,
}

/// The complete answer map for one assessment session, keyed by question id.
#[derive(Debug, Clone, Default)]
pub struct ResponseSet {
    responses: BTreeMap<u32, UserResponse>,
}

impl ResponseSet {
    /// Build from a flat response list. Duplicate question ids keep the
    /// first occurrence and warn; answers are submitted once per question.
    pub fn from_responses(raw: Vec<UserResponse>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let mut responses = BTreeMap::new();
        for r in raw {
            if responses.contains_key(&r.question_id) {
                warnings.push(format!(
                    "response for question {}: duplicate answer, keeping the first",
                    r.question_id
                ));
                continue;
            }
            responses.insert(r.question_id, r);
        }
        (Self { responses }, warnings)
    }

    pub fn get(&self, question_id: u32) -> Option<&UserResponse> {
        self.responses.get(&question_id)
    }

    /// Answers in ascending question-id order.
    pub fn iter(&self) -> impl Iterator<Item = &UserResponse> {
        self.responses.values()
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// On-disk shape of one respondent's submitted assessment (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondentFile {
    #[serde(default)]
    pub name: Option<String>,
    /// Opaque gender string; normalized by `Gender::parse` at match time.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    pub responses: Vec<UserResponse>,
}

/// Load a respondent answer file.
pub fn load_respondent(path: &PathBuf) -> Result<RespondentFile> {
    if !path.exists() {
        anyhow::bail!("Respondent file not found at {}", path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read respondent file at {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse respondent file: invalid JSON in {}", path.display()))
}
