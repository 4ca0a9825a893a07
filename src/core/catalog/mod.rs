//! In-memory translation catalog.
//!
//! A [`Catalog`] maps a context (empty for none) and a msgid to an [`Entry`],
//! remembering the order in which entries were first added. It is filled by
//! the [`CatalogBuilder`] and written or read by the [`po`] codec.

pub mod builder;
pub mod entry;
pub mod header;
pub mod ordered_set;
pub mod po;

use std::collections::HashMap;

pub use builder::CatalogBuilder;
pub use entry::{Entry, MsgStr};
pub use header::Header;
pub use ordered_set::OrderedSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub header: Header,
    entries: Vec<Entry>,
    /// context -> msgid -> position in `entries`
    index: HashMap<String, HashMap<String, usize>>,
}

impl Catalog {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, context: &str, msgid: &str) -> Option<&Entry> {
        let position = *self.index.get(context)?.get(msgid)?;
        self.entries.get(position)
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Insert an entry, replacing any entry with the same context and msgid
    /// in place.
    pub fn insert(&mut self, entry: Entry) {
        match self.position(&entry.context, &entry.msgid) {
            Some(position) => self.entries[position] = entry,
            None => {
                self.push(entry);
            }
        }
    }

    /// The entry for `(context, msgid)`, created empty when absent.
    pub fn entry_mut(&mut self, context: &str, msgid: &str) -> &mut Entry {
        let position = match self.position(context, msgid) {
            Some(position) => position,
            None => self.push(Entry::new(context, msgid)),
        };
        &mut self.entries[position]
    }

    /// Drop extracted comments and references of every entry, keeping
    /// translations.
    pub fn reset_source_comments(&mut self) {
        for entry in &mut self.entries {
            entry.reset_source_comments();
        }
    }

    fn position(&self, context: &str, msgid: &str) -> Option<usize> {
        self.index.get(context)?.get(msgid).copied()
    }

    fn push(&mut self, entry: Entry) -> usize {
        let position = self.entries.len();
        self.index
            .entry(entry.context.clone())
            .or_default()
            .insert(entry.msgid.clone(), position);
        self.entries.push(entry);
        position
    }
}
