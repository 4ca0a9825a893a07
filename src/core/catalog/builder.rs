use log::trace;

use crate::core::catalog::Catalog;
use crate::core::extract::call_pattern::Translatable;

/// Merges recognized calls into a catalog.
///
/// Repeated `(context, msgid)` pairs share one entry whose references and
/// extracted comments accumulate without duplicates. A plural occurrence of
/// a singular entry promotes it to a plural entry.
pub struct CatalogBuilder {
    catalog: Catalog,
    plural_slots: usize,
}

impl CatalogBuilder {
    pub fn new(catalog: Catalog, plural_slots: usize) -> Self {
        Self {
            catalog,
            plural_slots,
        }
    }

    /// Record one occurrence of a message found at `reference` (`file:line`).
    pub fn add(&mut self, message: &Translatable, reference: &str, comment: Option<&str>) {
        trace!(
            "{reference}: {:?} {:?} (context {:?})",
            message.kind, message.msgid, message.context
        );

        let entry = self.catalog.entry_mut(&message.context, &message.msgid);
        if let Some(comment) = comment {
            entry.extracted_comments.add(comment);
        }
        entry.references.add(reference);
        if let Some(plural) = &message.plural {
            entry.promote_to_plural(plural, self.plural_slots);
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn finish(self) -> Catalog {
        self.catalog
    }
}
