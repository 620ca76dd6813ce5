use std::collections::HashSet;

use super::types::{Question, QuestionType, UserProfile};

/// Strict lint of a raw question catalog as authored. Returns all problems
/// at once (not just the first). The engine itself tolerates bad entries by
/// skipping them; this pass exists for content authors.
pub fn validate_questions(questions: &[Question]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (i, q) in questions.iter().enumerate() {
        if q.id == 0 {
            errors.push(format!("questions[{}]: id must be a positive integer", i));
        } else if !seen_ids.insert(q.id) {
            errors.push(format!("questions[{}]: duplicate id {}", i, q.id));
        }
        if q.section.trim().is_empty() {
            errors.push(format!("questions[{}]: section must not be empty", i));
        }
        if q.text.trim().is_empty() {
            errors.push(format!("questions[{}]: text must not be empty", i));
        }
        if !(q.weight > 0.0) || !q.weight.is_finite() {
            errors.push(format!("questions[{}]: weight must be positive, got {}", i, q.weight));
        }
        if q.options.is_empty() {
            errors.push(format!("questions[{}]: options must not be empty", i));
        }
        if q.question_type == QuestionType::Declaration && q.options.len() != 2 {
            errors.push(format!(
                "questions[{}]: declaration must have exactly 2 options, found {}",
                i,
                q.options.len()
            ));
        }
        let unique: HashSet<&String> = q.options.iter().collect();
        if unique.len() != q.options.len() {
            errors.push(format!("questions[{}]: options contain duplicates", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Strict lint of a raw profile catalog as authored. `questions` supplies
/// the known section names so dangling criterion references are caught.
pub fn validate_profiles(
    profiles: &[UserProfile],
    questions: &[Question],
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let sections: HashSet<&str> = questions.iter().map(|q| q.section.as_str()).collect();
    let mut seen_ids = HashSet::new();

    for (i, p) in profiles.iter().enumerate() {
        if !seen_ids.insert(p.id) {
            errors.push(format!("profiles[{}]: duplicate id {}", i, p.id));
        }
        if p.name.trim().is_empty() {
            errors.push(format!("profiles[{}]: name must not be empty", i));
        }
        if p.criteria.is_empty() {
            errors.push(format!("profiles[{}] '{}': must have at least one criterion", i, p.name));
        }
        for (j, c) in p.criteria.iter().enumerate() {
            if !c.has_bound() {
                errors.push(format!(
                    "profiles[{}].criteria[{}]: at least one of min/max must be set",
                    i, j
                ));
            }
            for (bound, value) in [("min", c.min), ("max", c.max)] {
                if let Some(v) = value {
                    if !(0.0..=100.0).contains(&v) {
                        errors.push(format!(
                            "profiles[{}].criteria[{}].{}: must be a percentage in [0, 100], got {}",
                            i, j, bound, v
                        ));
                    }
                }
            }
            if let (Some(lo), Some(hi)) = (c.min, c.max) {
                if lo > hi {
                    errors.push(format!(
                        "profiles[{}].criteria[{}]: min {} exceeds max {}",
                        i, j, lo, hi
                    ));
                }
            }
            if !sections.contains(c.section.as_str()) {
                errors.push(format!(
                    "profiles[{}].criteria[{}]: references unknown section '{}'",
                    i, j, c.section
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Criterion;

    fn question(id: u32, section: &str) -> Question {
        Question {
            id,
            section: section.to_string(),
            subsection: String::new(),
            question_type: QuestionType::Declaration,
            text: format!("Statement {}", id),
            options: vec!["Agree".to_string(), "Disagree".to_string()],
            weight: 5.0,
        }
    }

    fn profile(id: u32, criteria: Vec<Criterion>) -> UserProfile {
        UserProfile {
            id,
            name: format!("Profile {}", id),
            description: String::new(),
            gender_specific: None,
            criteria,
        }
    }

    #[test]
    fn test_valid_catalog() {
        let questions = vec![question(1, "Faith"), question(2, "Family")];
        assert!(validate_questions(&questions).is_ok());

        let profiles = vec![profile(
            1,
            vec![Criterion {
                section: "Faith".to_string(),
                min: Some(80.0),
                max: None,
            }],
        )];
        assert!(validate_profiles(&profiles, &questions).is_ok());
    }

    #[test]
    fn test_collects_all_question_errors() {
        let mut bad_weight = question(1, "Faith");
        bad_weight.weight = 0.0;
        let mut bad_options = question(1, "Family"); // duplicate id too
        bad_options.options = vec!["Agree".to_string()];

        let errors = validate_questions(&[bad_weight, bad_options]).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("weight must be positive")));
        assert!(errors.iter().any(|e| e.contains("duplicate id 1")));
        assert!(errors.iter().any(|e| e.contains("exactly 2 options")));
    }

    #[test]
    fn test_duplicate_options_flagged() {
        let mut q = question(1, "Faith");
        q.options = vec!["Agree".to_string(), "Agree".to_string()];
        let errors = validate_questions(&[q]).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("duplicates")));
    }

    #[test]
    fn test_profile_criterion_errors() {
        let questions = vec![question(1, "Faith")];
        let profiles = vec![
            profile(1, vec![]),
            profile(
                2,
                vec![
                    Criterion {
                        section: "Faith".to_string(),
                        min: None,
                        max: None,
                    },
                    Criterion {
                        section: "Mystery".to_string(),
                        min: Some(120.0),
                        max: Some(10.0),
                    },
                ],
            ),
        ];

        let errors = validate_profiles(&profiles, &questions).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at least one criterion")));
        assert!(errors.iter().any(|e| e.contains("min/max must be set")));
        assert!(errors.iter().any(|e| e.contains("unknown section 'Mystery'")));
        assert!(errors.iter().any(|e| e.contains("[0, 100]")));
        assert!(errors.iter().any(|e| e.contains("exceeds max")));
    }

    #[test]
    fn test_zero_id_flagged() {
        let errors = validate_questions(&[question(0, "Faith")]).unwrap_err();
        assert!(errors[0].contains("positive integer"));
    }
}
