//! Markdown reporting over a solved season's structured solution.
//!
//! This never touches a decision variable or constraint, only the
//! [`retro_core::SeasonSolution`] the solver driver already extracted.

pub mod markdown;

pub use markdown::build_markdown_report;
