use crate::core::catalog::ordered_set::OrderedSet;

/// Translation slots of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MsgStr {
    Singular(String),
    /// One slot per plural form.
    Plural(Vec<String>),
}

impl MsgStr {
    /// The singular translation, or the first plural form.
    pub fn first(&self) -> &str {
        match self {
            MsgStr::Singular(text) => text,
            MsgStr::Plural(forms) => forms.first().map_or("", String::as_str),
        }
    }
}

/// One message of the catalog.
///
/// `msgid_plural` and [`MsgStr::Plural`] always go together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Empty for no context.
    pub context: String,
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgstr: MsgStr,
    /// `# ` lines, written by translators.
    pub translator_comments: Vec<String>,
    /// `#, ` flags such as `fuzzy`.
    pub flags: Vec<String>,
    /// `#. ` lines, taken from translator comments in the source.
    pub extracted_comments: OrderedSet,
    /// `#: file:line` locations.
    pub references: OrderedSet,
}

impl Entry {
    pub fn new(context: impl Into<String>, msgid: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            msgid: msgid.into(),
            msgid_plural: None,
            msgstr: MsgStr::Singular(String::new()),
            translator_comments: Vec::new(),
            flags: Vec::new(),
            extracted_comments: OrderedSet::new(),
            references: OrderedSet::new(),
        }
    }

    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }

    /// Turn a singular entry into a plural one with `slots` forms.
    ///
    /// The singular translation moves to the first form. An entry that is
    /// already plural keeps its plural msgid and translations.
    pub fn promote_to_plural(&mut self, msgid_plural: &str, slots: usize) {
        if self.is_plural() {
            return;
        }

        let mut forms = vec![String::new(); slots.max(1)];
        if let MsgStr::Singular(previous) = &mut self.msgstr {
            forms[0] = std::mem::take(previous);
        }
        self.msgid_plural = Some(msgid_plural.to_string());
        self.msgstr = MsgStr::Plural(forms);
    }

    /// Forget where the entry was found.
    pub fn reset_source_comments(&mut self) {
        self.extracted_comments.clear();
        self.references.clear();
    }
}
