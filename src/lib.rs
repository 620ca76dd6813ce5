//! Assessment scoring, profile matching, and couple compatibility.
//!
//! The engine is a pure computation over immutable inputs: a question
//! catalog, a profile catalog, and per-respondent response sets. Nothing in
//! here performs I/O except the explicit file loaders in `catalog` and
//! `respondent`; per-item data problems are collected into warning channels
//! on the results, never raised.

pub mod catalog;
pub mod couple;
pub mod matching;
pub mod output;
pub mod respondent;
pub mod scoring;
