//! Extraction options.
//!
//! `ExtractOptions` is the library-level configuration consumed by
//! [`crate::core::pipeline::parse`]. The CLI builds it from `.gleanrc.json`
//! and command-line flags (see `crate::config`).

use serde::{Deserialize, Serialize};

pub const DEFAULT_COMMENT_PREFIX: &str = "L10n:";
pub const DEFAULT_PLURAL_FORM_COUNT: usize = 2;
pub const DEFAULT_PROJECT_ID_VERSION: &str = "PACKAGE VERSION";
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "rtt";

/// The four kinds of translatable call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// `gettext(msgid)`
    Plain,
    /// `ngettext(msgid, plural)`
    Plural,
    /// `pgettext(context, msgid)`
    Context,
    /// `npgettext(context, msgid, plural)`
    ContextPlural,
}

impl CallKind {
    /// Number of leading string arguments the call kind requires.
    pub fn arity(self) -> usize {
        match self {
            CallKind::Plain => 1,
            CallKind::Plural | CallKind::Context => 2,
            CallKind::ContextPlural => 3,
        }
    }
}

/// Function names recognized for each call kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FnNames {
    pub gettext: String,
    pub ngettext: String,
    pub pgettext: String,
    pub npgettext: String,
}

impl Default for FnNames {
    fn default() -> Self {
        Self {
            gettext: "gettext".to_string(),
            ngettext: "ngettext".to_string(),
            pgettext: "pgettext".to_string(),
            npgettext: "npgettext".to_string(),
        }
    }
}

impl FnNames {
    /// Classify a callee name. A name configured for several kinds resolves
    /// to the first one in `plain, plural, context, context-plural` order.
    pub fn kind_of(&self, name: &str) -> Option<CallKind> {
        self.iter()
            .find(|(_, configured)| *configured == name)
            .map(|(kind, _)| kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CallKind, &str)> {
        [
            (CallKind::Plain, self.gettext.as_str()),
            (CallKind::Plural, self.ngettext.as_str()),
            (CallKind::Context, self.pgettext.as_str()),
            (CallKind::ContextPlural, self.npgettext.as_str()),
        ]
        .into_iter()
    }

    /// Parse a comma separated list of exactly four names
    /// (`gettext,ngettext,pgettext,npgettext` order).
    pub fn from_list(list: &str) -> Option<Self> {
        let names: Vec<&str> = list.split(',').map(str::trim).collect();
        match names.as_slice() {
            [plain, plural, context, context_plural]
                if names.iter().all(|name| !name.is_empty()) =>
            {
                Some(Self {
                    gettext: plain.to_string(),
                    ngettext: plural.to_string(),
                    pgettext: context.to_string(),
                    npgettext: context_plural.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// Options for a single extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Identifiers of the four translatable call kinds.
    pub fn_names: FnNames,
    /// Marker text identifying translator comments.
    pub comment_prefix: String,
    /// Number of `msgstr[N]` slots created for plural entries.
    pub plural_form_count: usize,
    /// Text of a previously written catalog to merge into (incremental mode).
    pub existing_po: Option<String>,
    pub project_id_version: Option<String>,
    pub report_bugs_to: Option<String>,
    pub language: Option<String>,
    /// Extension (without the dot) of files run through the template preprocessor.
    pub template_extension: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fn_names: FnNames::default(),
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
            plural_form_count: DEFAULT_PLURAL_FORM_COUNT,
            existing_po: None,
            project_id_version: None,
            report_bugs_to: None,
            language: None,
            template_extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
        }
    }
}

impl ExtractOptions {
    /// Plural slot count, never less than one.
    pub fn plural_slots(&self) -> usize {
        self.plural_form_count.max(1)
    }
}
