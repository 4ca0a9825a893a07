//! Translator comment association.
//!
//! Translator comments are source comments starting with the configured
//! prefix (`// L10n: shown on the login page`) or with an extra slash
//! (`/// shown on the login page`). They are collected once per file and
//! handed out to the translatable calls they precede.
//!
//! # Chaining
//!
//! A comment attaches to a call on line `L` when it sits on `L` or `L - 1`.
//! Once one comment is accepted, the comment directly above it is accepted
//! too, and so on upward, so a contiguous block annotates a single call:
//!
//! ```js
//! // L10n: first line of the note
//! // L10n: second line of the note
//! gettext("Save");
//! ```
//!
//! The chain stops at the first comment that does not continue it. Each
//! comment attaches to at most one call.

use regex::Regex;

/// Recognizes translator comments and extracts their annotation text.
#[derive(Debug, Clone)]
pub struct CommentPattern {
    regex: Regex,
}

impl CommentPattern {
    pub fn new(prefix: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(
            r"^(?:/|\s*{})\s*(\S[\s\S]*?)\s*$",
            regex::escape(prefix)
        ))?;
        Ok(Self { regex })
    }

    /// Annotation text of a comment, or `None` when it is not a translator
    /// comment. `text` is the comment body without its delimiters.
    pub fn annotation<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|text| text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TranslatorComment {
    line: usize,
    text: String,
    used: bool,
}

/// Translator comments of one file, in source order.
#[derive(Debug, Default)]
pub struct TranslatorComments {
    comments: Vec<TranslatorComment>,
}

impl TranslatorComments {
    /// Keep the comments matching `pattern`.
    ///
    /// `comments` yields `(line, text)` pairs in source order, with 1-based
    /// lines.
    pub fn collect<'c>(
        comments: impl IntoIterator<Item = (usize, &'c str)>,
        pattern: &CommentPattern,
    ) -> Self {
        let comments = comments
            .into_iter()
            .filter_map(|(line, text)| {
                pattern.annotation(text).map(|text| TranslatorComment {
                    line,
                    text: text.to_string(),
                    used: false,
                })
            })
            .collect();
        Self { comments }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Claim the comments annotating a call on `line`.
    ///
    /// Returns the accepted annotations joined top to bottom with `\n`, or
    /// `None` when nothing attaches.
    pub fn take_for_line(&mut self, line: usize) -> Option<String> {
        let mut accepted: Vec<String> = Vec::new();
        let mut chain_top: Option<usize> = None;

        for comment in self.comments.iter_mut().rev() {
            let continues_chain =
                chain_top.and_then(|top| top.checked_sub(1)) == Some(comment.line);
            let attaches = !comment.used
                && (comment.line == line
                    || line.checked_sub(1) == Some(comment.line)
                    || continues_chain);

            if attaches {
                comment.used = true;
                chain_top = Some(comment.line);
                accepted.push(comment.text.clone());
            } else if chain_top.is_some() {
                break;
            }
        }

        if accepted.is_empty() {
            return None;
        }
        accepted.reverse();
        Some(accepted.join("\n"))
    }
}
