//! Per-file extraction.
//!
//! [`FileExtractor`] is the walker hook that ties the pieces together: every
//! call expression is run through the call pattern matcher once its arguments
//! have been walked, and each match is recorded in the catalog with its
//! `file:line` reference and the translator comments found just above it.

use swc_ecma_ast::Expr;

use crate::core::catalog::CatalogBuilder;
use crate::core::collect::comments::{CommentPattern, TranslatorComments};
use crate::core::extract::call_pattern::match_call;
use crate::core::options::FnNames;
use crate::core::parsers::script::ParsedSource;
use crate::core::walker::{Edge, Hooks, Node, walk};

pub struct FileExtractor<'a> {
    file_path: &'a str,
    parsed: &'a ParsedSource,
    fn_names: &'a FnNames,
    comments: TranslatorComments,
    builder: &'a mut CatalogBuilder,
    found: usize,
}

impl<'a> FileExtractor<'a> {
    pub fn new(
        file_path: &'a str,
        parsed: &'a ParsedSource,
        fn_names: &'a FnNames,
        comment_pattern: &CommentPattern,
        builder: &'a mut CatalogBuilder,
    ) -> Self {
        let comments = TranslatorComments::collect(
            parsed
                .comments
                .iter()
                .map(|cmt| (parsed.line_of(cmt.span.lo), &*cmt.text)),
            comment_pattern,
        );

        Self {
            file_path,
            parsed,
            fn_names,
            comments,
            builder,
            found: 0,
        }
    }

    /// Walk the file and record its translatable calls.
    ///
    /// Returns the number of calls recorded.
    pub fn extract(mut self) -> usize {
        let parsed = self.parsed;
        walk(Node::Module(&parsed.module), &mut self);
        self.found
    }
}

impl Hooks for FileExtractor<'_> {
    // Calls nested in arguments are recorded before the call around them.
    fn leave(&mut self, node: Node<'_>, _edge: Edge) {
        let Node::Expr(Expr::Call(call)) = node else {
            return;
        };
        let Some(message) = match_call(call, self.fn_names) else {
            return;
        };

        let line = self.parsed.line_of(call.span.lo);
        let comment = self.comments.take_for_line(line);
        let reference = format!("{}:{line}", self.file_path);
        self.builder.add(&message, &reference, comment.as_deref());
        self.found += 1;
    }
}
