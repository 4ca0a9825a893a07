//! Translatable call extraction.
//!
//! - `call_pattern`: decides whether a call expression is translatable
//! - `file_extractor`: walks one parsed file and records its translatable calls

pub mod call_pattern;
pub mod file_extractor;

pub use call_pattern::{CallShape, Translatable, match_call};
pub use file_extractor::FileExtractor;
