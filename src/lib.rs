//! Glean - gettext message extraction for JavaScript sources and templates
//!
//! Glean walks JavaScript and TypeScript syntax trees (and `.rtt` templates
//! rewritten to script), finds calls to `gettext`, `ngettext`, `pgettext` and
//! `npgettext`, and collects their literal arguments into a PO catalog with
//! source references and translator comments.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`extract`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine and PO catalog codec
//!
//! ## Library use
//!
//! ```
//! use glean::{ExtractOptions, generate};
//!
//! let po = generate([("app.js", "gettext('Hello');")], &ExtractOptions::default()).unwrap();
//! assert!(po.contains("msgid \"Hello\""));
//! ```

pub mod cli;
pub mod config;
pub mod core;

pub use crate::core::{Catalog, ExtractError, ExtractOptions, FnNames, generate, parse};
