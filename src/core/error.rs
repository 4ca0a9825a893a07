use thiserror::Error;

use crate::core::catalog::po::PoError;

/// Failures of an extraction run.
///
/// A call that merely fails the argument-shape rules is not an error; it
/// contributes nothing to the catalog.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A source file (after template preprocessing) could not be parsed.
    /// The whole run is aborted.
    #[error("{file}:{line}: syntax error: {message}")]
    Syntax {
        file: String,
        line: usize,
        message: String,
    },

    /// The existing catalog passed for incremental extraction is malformed.
    #[error("invalid existing catalog: {0}")]
    Catalog(#[from] PoError),

    /// A configured function name or comment prefix could not be compiled.
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}
