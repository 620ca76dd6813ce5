mod types;
pub mod validation;

pub use types::{
    Criterion, Gender, ProfileCatalog, Question, QuestionCatalog, QuestionType, UserProfile,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/kindred/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("kindred")
}

/// Default question catalog path (~/.config/kindred/questions.yaml)
pub fn default_questions_path() -> PathBuf {
    get_config_dir().join("questions.yaml")
}

/// Default profile catalog path (~/.config/kindred/profiles.yaml)
pub fn default_profiles_path() -> PathBuf {
    get_config_dir().join("profiles.yaml")
}

/// On-disk shape of a question catalog file.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionFile {
    pub questions: Vec<Question>,
}

/// On-disk shape of a profile catalog file.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileFile {
    pub profiles: Vec<UserProfile>,
}

fn read_yaml<T: for<'de> Deserialize<'de>>(path: &PathBuf, what: &str) -> Result<T> {
    if !path.exists() {
        anyhow::bail!("{} file not found at {}", what, path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file at {}", what, path.display()))?;
    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse {}: invalid YAML in {}", what, path.display()))
}

/// Load raw questions from a YAML catalog file.
///
/// Returns the entries as authored; structural sanitization (skip-and-warn)
/// happens in `QuestionCatalog::new`.
pub fn load_questions(path: Option<PathBuf>) -> Result<Vec<Question>> {
    let path = path.unwrap_or_else(default_questions_path);
    let file: QuestionFile = read_yaml(&path, "question catalog")?;
    Ok(file.questions)
}

/// Load raw profiles from a YAML catalog file.
pub fn load_profiles(path: Option<PathBuf>) -> Result<Vec<UserProfile>> {
    let path = path.unwrap_or_else(default_profiles_path);
    let file: ProfileFile = read_yaml(&path, "profile catalog")?;
    Ok(file.profiles)
}
