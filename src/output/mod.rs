pub mod formatter;

pub use formatter::{format_assessment, format_compatibility, should_use_colors};
