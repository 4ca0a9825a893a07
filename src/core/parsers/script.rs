use std::path::Path;
use std::sync::Arc;

use swc_common::{
    BytePos, FileName, GLOBALS, Globals, SourceMap, Spanned,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::core::error::ExtractError;

/// A parsed source file with its comments, detached from swc's comment store.
pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    /// Every comment in the file, ordered by position.
    pub comments: Vec<Comment>,
}

impl ParsedSource {
    /// 1-based line of a byte position.
    pub fn line_of(&self, pos: BytePos) -> usize {
        self.source_map.lookup_char_pos(pos).line
    }
}

/// Pick the parser syntax from the file extension.
///
/// Preprocessed templates are plain ECMAScript, everything that is not
/// TypeScript is parsed with JSX enabled.
pub fn syntax_for_path(file_path: &str, is_template: bool) -> Syntax {
    if is_template {
        return Syntax::Es(EsSyntax::default());
    }

    let extension = Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    match extension {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax::default()),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse source text into a module.
///
/// Errors the parser recovers from are reported like fatal ones: a file
/// either parses cleanly or the extraction run fails.
pub fn parse_source(
    code: String,
    file_path: &str,
    syntax: Syntax,
    source_map: Arc<SourceMap>,
) -> Result<ParsedSource, ExtractError> {
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let syntax_error = |err: swc_ecma_parser::error::Error| ExtractError::Syntax {
            file: file_path.to_string(),
            line: source_map.lookup_char_pos(err.span().lo).line,
            message: err.kind().msg().to_string(),
        };

        let module = parser.parse_module().map_err(syntax_error)?;
        if let Some(err) = parser.take_errors().into_iter().next() {
            return Err(syntax_error(err));
        }

        Ok(ParsedSource {
            module,
            comments: collect_comments(&comments),
            source_map: source_map.clone(),
        })
    })
}

/// Copy comments out of swc's store before it is dropped.
fn collect_comments(comments: &SingleThreadedComments) -> Vec<Comment> {
    let (leading, trailing) = comments.borrow_all();
    let mut all: Vec<Comment> = leading
        .values()
        .chain(trailing.values())
        .flatten()
        .cloned()
        .collect();
    all.sort_by_key(|cmt| cmt.span.lo);
    all
}
