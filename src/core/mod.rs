//! Extraction engine.
//!
//! Source files flow through the engine one at a time:
//!
//! 1. `parsers::template` rewrites templates into script text (templates only)
//! 2. `parsers::script` parses the text into a syntax tree plus its comments
//! 3. `walker` visits every node of the tree
//! 4. `extract::call_pattern` recognizes translatable calls among the visited nodes
//! 5. `collect::comments` hands each call the translator comments above it
//! 6. `catalog` merges the results into a single catalog
//!
//! `pipeline` drives these steps for a set of files.

pub mod catalog;
pub mod collect;
pub mod error;
pub mod extract;
pub mod options;
pub mod parsers;
pub mod pipeline;
pub mod walker;

pub use catalog::Catalog;
pub use error::ExtractError;
pub use options::{CallKind, ExtractOptions, FnNames};
pub use pipeline::{generate, parse};
