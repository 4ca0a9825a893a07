//! Source parsing.
//!
//! - `script`: JS/JSX/TS/TSX parsing with swc
//! - `template`: template to script rewriting ahead of parsing

pub mod script;
pub mod template;
