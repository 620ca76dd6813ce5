pub mod comparator;
pub mod config;

pub use comparator::{
    compare_couple, AlignmentBucket, CompatibilityReport, CoupleInput, ResponseDifference,
    SectionComparison,
};
pub use config::{load_compare_config, validate_compare_config, CompareConfig};
