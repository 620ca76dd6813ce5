pub mod matcher;
pub mod outcome;

pub use matcher::{match_profiles, MatchResult};
pub use outcome::{evaluate_profile, CriterionMiss, ProfileFit, NEAR_MATCH_TOLERANCE};
