//! Template to script preprocessing.
//!
//! Templates embed translatable calls as `{{= gettext "Hello" }}` and
//! translator notes as `{{// /note }}`. The preprocessor rewrites a template
//! into script text the parser accepts:
//!
//! - literal template text becomes one `;` per non-blank run, keeping every
//!   line break
//! - `{{= fn args }}` becomes `fn(args);` on the line the directive starts on,
//!   followed by the directive's remaining line breaks
//! - `{{// text }}` becomes `/* text */`, with a leading `/` in the text
//!   replaced by the translator comment prefix
//!
//! The output has exactly the same line breaks as the template, so line
//! numbers found in the script are template line numbers.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::options::FnNames;

static NON_NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\r\n]+").unwrap());

/// One piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'t> {
    /// Literal template text.
    Text(&'t str),
    /// `{{= fn args }}`. `body` is everything between `=` and `}}`.
    Call {
        body: &'t str,
        name: &'t str,
        args: Option<&'t str>,
    },
    /// `{{// text }}`
    Comment(&'t str),
}

pub struct TemplatePreprocessor {
    directive: Regex,
    comment_prefix: String,
}

impl TemplatePreprocessor {
    pub fn new(fn_names: &FnNames, comment_prefix: &str) -> Result<Self, regex::Error> {
        // Longest names first so that one name being a prefix of another
        // cannot shadow it.
        let mut names: Vec<&str> = fn_names
            .iter()
            .map(|(_, name)| name)
            .filter(|name| !name.is_empty())
            .collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        names.dedup();
        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        let directive = Regex::new(&format!(
            r"\{{\{{(?:=(\s*({alternation})(?:\s+(\S[\s\S]*?))??\s*)|//([\s\S]*?))\}}\}}"
        ))?;

        Ok(Self {
            directive,
            comment_prefix: comment_prefix.to_string(),
        })
    }

    /// Rewrite a template into line-preserving script text.
    pub fn to_script(&self, template: &str) -> String {
        let mut script = String::with_capacity(template.len());

        for segment in self.segments(template) {
            match segment {
                Segment::Text(text) => script.push_str(&placeholders(text)),
                Segment::Call { body, name, args } => {
                    let mut consumed_newlines = 0;
                    if let Some(args) = args {
                        script.push_str(&format!("{name}({args});"));
                        consumed_newlines = args.matches('\n').count();
                    }
                    script.push_str(&skip_newlines(&placeholders(body), consumed_newlines));
                }
                Segment::Comment(text) => {
                    let text = text.trim();
                    let text = match text.strip_prefix('/') {
                        Some(annotation) => format!("{} {}", self.comment_prefix, annotation),
                        None => text.to_string(),
                    };
                    script.push_str(&format!("/* {} */", text.replace("*/", "* /")));
                }
            }
        }

        script
    }

    fn segments<'t>(&self, template: &'t str) -> Vec<Segment<'t>> {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in self.directive.captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Text(&template[last..whole.start()]));
            }
            segments.push(Self::directive_segment(&caps));
            last = whole.end();
        }

        if last < template.len() {
            segments.push(Segment::Text(&template[last..]));
        }
        segments
    }

    fn directive_segment<'t>(caps: &Captures<'t>) -> Segment<'t> {
        match (caps.get(1), caps.get(2)) {
            (Some(body), Some(name)) => Segment::Call {
                body: body.as_str(),
                name: name.as_str(),
                args: caps.get(3).map(|args| args.as_str()),
            },
            _ => Segment::Comment(caps.get(4).map_or("", |text| text.as_str())),
        }
    }
}

/// Replace each run of non-newline characters with `;`.
fn placeholders(text: &str) -> String {
    NON_NEWLINE_RUN.replace_all(text, ";").into_owned()
}

/// Drop the first `count` line breaks of `text`, keeping everything else.
///
/// Used after a call whose arguments already reproduced some of the
/// directive's line breaks.
fn skip_newlines(text: &str, count: usize) -> String {
    let mut remaining = count;
    text.chars()
        .filter(|&c| {
            if c == '\n' && remaining > 0 {
                remaining -= 1;
                false
            } else {
                true
            }
        })
        .collect()
}
