//! PO / POT text codec.
//!
//! ```text
//! # translator comment
//! #. extracted comment
//! #: src/app.js:12
//! #, fuzzy
//! msgctxt "menu"
//! msgid "File"
//! msgid_plural "Files"
//! msgstr[0] ""
//! msgstr[1] ""
//! ```
//!
//! The header is the entry with an empty msgid and no context. Obsolete
//! (`#~`) entries and previous-msgid (`#|`) lines are dropped when parsing.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::catalog::{Catalog, Entry, Header, MsgStr, OrderedSet};

/// Upper bound on the `N` of `msgstr[N]` accepted by the parser.
const MAX_PLURAL_FORMS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    #[error("line {line}: invalid msgstr index")]
    InvalidIndex { line: usize },
}

impl PoError {
    fn parse(line: usize, message: impl Into<String>) -> Self {
        PoError::Parse {
            line,
            message: message.into(),
        }
    }
}

// ============================================================
// Writing
// ============================================================

/// Serialize a catalog: the header first, then entries in first-seen order.
pub fn write(catalog: &Catalog) -> String {
    let mut out = String::new();

    let header = &catalog.header;
    write_comments(
        &mut out,
        "#",
        header.translator_comments.iter().map(String::as_str),
    );
    write_flags(&mut out, &header.flags);
    write_string(&mut out, "msgid", "");
    write_string(&mut out, "msgstr", &header.to_msgstr());

    for entry in catalog.entries() {
        out.push('\n');
        write_entry(&mut out, entry);
    }

    out
}

fn write_entry(out: &mut String, entry: &Entry) {
    write_comments(out, "#", entry.translator_comments.iter().map(String::as_str));
    write_comments(out, "#.", entry.extracted_comments.iter());
    write_comments(out, "#:", entry.references.iter());
    write_flags(out, &entry.flags);

    if !entry.context.is_empty() {
        write_string(out, "msgctxt", &entry.context);
    }
    write_string(out, "msgid", &entry.msgid);
    if let Some(plural) = &entry.msgid_plural {
        write_string(out, "msgid_plural", plural);
    }

    match &entry.msgstr {
        MsgStr::Singular(text) => write_string(out, "msgstr", text),
        MsgStr::Plural(forms) => {
            for (index, form) in forms.iter().enumerate() {
                write_string(out, &format!("msgstr[{index}]"), form);
            }
        }
    }
}

fn write_comments<'a>(out: &mut String, marker: &str, lines: impl Iterator<Item = &'a str>) {
    for line in lines {
        out.push_str(marker);
        if !line.is_empty() {
            out.push(' ');
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn write_flags(out: &mut String, flags: &[String]) {
    if !flags.is_empty() {
        out.push_str(&format!("#, {}\n", flags.join(", ")));
    }
}

/// Write `keyword "value"`, switching to one quoted line per `\n`-terminated
/// segment when the value has a line break before its end.
fn write_string(out: &mut String, keyword: &str, value: &str) {
    if !value.trim_end_matches('\n').contains('\n') {
        out.push_str(&format!("{keyword} \"{}\"\n", escape(value)));
        return;
    }

    out.push_str(&format!("{keyword} \"\"\n"));
    for segment in value.split_inclusive('\n') {
        out.push_str(&format!("\"{}\"\n", escape(segment)));
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

// ============================================================
// Parsing
// ============================================================

/// Parse catalog text. When an entry appears twice, the later one wins.
pub fn parse(text: &str) -> Result<Catalog, PoError> {
    let mut parser = Parser::default();
    for (index, line) in text.lines().enumerate() {
        parser.line(index + 1, line)?;
    }
    parser.finish()
}

/// The keyword a quoted continuation line extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    Plural,
    Str,
    PluralStr(usize),
}

#[derive(Debug, Default)]
struct RawEntry {
    start_line: usize,
    obsolete: bool,
    translator_comments: Vec<String>,
    flags: Vec<String>,
    extracted_comments: Vec<String>,
    references: Vec<String>,
    context: Option<String>,
    msgid: Option<String>,
    msgid_plural: Option<String>,
    msgstr: Option<String>,
    plural_msgstr: BTreeMap<usize, String>,
}

impl RawEntry {
    fn start(&mut self, line: usize) {
        if self.start_line == 0 {
            self.start_line = line;
        }
    }

    fn has_msgstr(&self) -> bool {
        self.msgstr.is_some() || !self.plural_msgstr.is_empty()
    }

    fn set(&mut self, field: Field, value: String, line: usize) -> Result<(), PoError> {
        let previous = match field {
            Field::Context => self.context.replace(value),
            Field::Id => self.msgid.replace(value),
            Field::Plural => self.msgid_plural.replace(value),
            Field::Str => self.msgstr.replace(value),
            Field::PluralStr(index) => self.plural_msgstr.insert(index, value),
        };
        if previous.is_some() {
            return Err(PoError::parse(line, "duplicate keyword"));
        }
        Ok(())
    }

    fn append(&mut self, field: Field, value: &str) {
        let target = match field {
            Field::Context => self.context.as_mut(),
            Field::Id => self.msgid.as_mut(),
            Field::Plural => self.msgid_plural.as_mut(),
            Field::Str => self.msgstr.as_mut(),
            Field::PluralStr(index) => self.plural_msgstr.get_mut(&index),
        };
        if let Some(target) = target {
            target.push_str(value);
        }
    }
}

#[derive(Debug, Default)]
struct Parser {
    catalog: Catalog,
    current: RawEntry,
    field: Option<Field>,
}

impl Parser {
    fn line(&mut self, number: usize, line: &str) -> Result<(), PoError> {
        let line = line.trim();
        if line.is_empty() {
            return self.end_entry();
        }

        if let Some(rest) = line.strip_prefix('#') {
            let obsolete_ended = self.current.obsolete && !rest.starts_with('~');
            if self.current.has_msgstr() || obsolete_ended {
                self.end_entry()?;
            }
            self.current.start(number);
            self.comment(rest);
            self.field = None;
            return Ok(());
        }

        if line.starts_with('"') {
            let value = unquote(line, number)?;
            let field = self
                .field
                .ok_or_else(|| PoError::parse(number, "string without a keyword"))?;
            self.current.append(field, &value);
            return Ok(());
        }

        let (keyword, rest) = line
            .split_once(|c: char| c.is_whitespace())
            .unwrap_or((line, ""));
        let field = keyword_field(keyword, number)?;

        if self.current.obsolete
            || (matches!(field, Field::Context | Field::Id) && self.current.has_msgstr())
        {
            self.end_entry()?;
        }
        self.current.start(number);
        self.current.set(field, unquote(rest, number)?, number)?;
        self.field = Some(field);
        Ok(())
    }

    fn comment(&mut self, rest: &str) {
        let entry = &mut self.current;
        if let Some(text) = rest.strip_prefix('.') {
            entry.extracted_comments.push(text.trim().to_string());
        } else if let Some(text) = rest.strip_prefix(':') {
            entry
                .references
                .extend(text.split_whitespace().map(str::to_string));
        } else if let Some(text) = rest.strip_prefix(',') {
            entry.flags.extend(
                text.split(',')
                    .map(str::trim)
                    .filter(|flag| !flag.is_empty())
                    .map(str::to_string),
            );
        } else if rest.starts_with('~') {
            entry.obsolete = true;
        } else if !rest.starts_with('|') {
            entry
                .translator_comments
                .push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
        }
    }

    fn end_entry(&mut self) -> Result<(), PoError> {
        let RawEntry {
            start_line,
            obsolete,
            translator_comments,
            flags,
            extracted_comments,
            references,
            context,
            msgid,
            msgid_plural,
            msgstr,
            plural_msgstr,
        } = std::mem::take(&mut self.current);
        self.field = None;

        if obsolete {
            return Ok(());
        }

        let Some(msgid) = msgid else {
            if context.is_some()
                || msgid_plural.is_some()
                || msgstr.is_some()
                || !plural_msgstr.is_empty()
            {
                return Err(PoError::parse(start_line, "entry without msgid"));
            }
            // Only comments.
            return Ok(());
        };

        if msgstr.is_none() && plural_msgstr.is_empty() {
            return Err(PoError::parse(start_line, "entry without msgstr"));
        }

        if msgid.is_empty() && context.is_none() {
            let mut header = Header::from_msgstr(msgstr.as_deref().unwrap_or_default());
            header.translator_comments = translator_comments;
            header.flags = flags;
            self.catalog.header = header;
            return Ok(());
        }

        let msgstr = match &msgid_plural {
            Some(_) if plural_msgstr.is_empty() => {
                MsgStr::Plural(vec![msgstr.unwrap_or_default()])
            }
            Some(_) => {
                let count = plural_msgstr.keys().next_back().map_or(0, |last| last + 1);
                let mut forms = vec![String::new(); count];
                for (index, form) in plural_msgstr {
                    forms[index] = form;
                }
                MsgStr::Plural(forms)
            }
            None if !plural_msgstr.is_empty() => {
                return Err(PoError::parse(start_line, "msgstr[N] without msgid_plural"));
            }
            None => MsgStr::Singular(msgstr.unwrap_or_default()),
        };

        self.catalog.insert(Entry {
            context: context.unwrap_or_default(),
            msgid,
            msgid_plural,
            msgstr,
            translator_comments,
            flags,
            extracted_comments: extracted_comments
                .iter()
                .map(String::as_str)
                .collect::<OrderedSet>(),
            references: references.iter().map(String::as_str).collect::<OrderedSet>(),
        });
        Ok(())
    }

    fn finish(mut self) -> Result<Catalog, PoError> {
        self.end_entry()?;
        Ok(self.catalog)
    }
}

fn keyword_field(keyword: &str, line: usize) -> Result<Field, PoError> {
    let field = match keyword {
        "msgctxt" => Field::Context,
        "msgid" => Field::Id,
        "msgid_plural" => Field::Plural,
        "msgstr" => Field::Str,
        _ => {
            let Some(index) = keyword
                .strip_prefix("msgstr[")
                .and_then(|rest| rest.strip_suffix(']'))
            else {
                return Err(PoError::parse(line, format!("unexpected keyword `{keyword}`")));
            };
            match index.parse::<usize>() {
                Ok(index) if index < MAX_PLURAL_FORMS => Field::PluralStr(index),
                _ => return Err(PoError::InvalidIndex { line }),
            }
        }
    };
    Ok(field)
}

/// Decode one quoted string. Unknown escapes are kept verbatim.
fn unquote(text: &str, line: usize) -> Result<String, PoError> {
    let Some(body) = text.trim().strip_prefix('"') else {
        return Err(PoError::parse(line, "expected a quoted string"));
    };

    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    loop {
        match chars.next() {
            None => return Err(PoError::UnterminatedString { line }),
            Some('"') => break,
            Some('\\') => match chars.next() {
                None => return Err(PoError::UnterminatedString { line }),
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('\\') => value.push('\\'),
                Some('"') => value.push('"'),
                Some(other) => {
                    value.push('\\');
                    value.push(other);
                }
            },
            Some(c) => value.push(c),
        }
    }

    if !chars.as_str().trim().is_empty() {
        return Err(PoError::parse(line, "unexpected text after string"));
    }
    Ok(value)
}
