use chrono::{DateTime, Utc};

use crate::core::options::{DEFAULT_PROJECT_ID_VERSION, ExtractOptions};

pub const CREATION_DATE: &str = "POT-Creation-Date";

/// Catalog header: the `Name: value` fields carried by the entry with an
/// empty msgid, plus the comments written above it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: Vec<(String, String)>,
    pub translator_comments: Vec<String>,
    pub flags: Vec<String>,
}

impl Header {
    /// Header of a fresh catalog. The creation date is left empty.
    pub fn new(options: &ExtractOptions) -> Self {
        let fields = [
            (
                "Project-Id-Version",
                options
                    .project_id_version
                    .as_deref()
                    .unwrap_or(DEFAULT_PROJECT_ID_VERSION),
            ),
            (
                "Report-Msgid-Bugs-To",
                options.report_bugs_to.as_deref().unwrap_or_default(),
            ),
            (CREATION_DATE, ""),
            ("PO-Revision-Date", "YEAR-MO-DA HO:MI+ZONE"),
            ("Language-Team", "LANGUAGE <ll@li.org>"),
            ("Language", options.language.as_deref().unwrap_or_default()),
            ("MIME-Version", "1.0"),
            ("Content-Type", "text/plain; charset=utf-8"),
            ("Content-Transfer-Encoding", "8bit"),
        ];

        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    /// Parse the header entry's msgstr. Lines without a `:` are dropped.
    pub fn from_msgstr(text: &str) -> Self {
        let fields = text
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        Self {
            fields,
            ..Default::default()
        }
    }

    /// The header entry's msgstr: one `Name: value\n` line per field.
    pub fn to_msgstr(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| format!("{name}: {value}\n"))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace a field in place, or append it when absent.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.set(CREATION_DATE, date.format("%Y-%m-%d %H:%M%z").to_string());
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
