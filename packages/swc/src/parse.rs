//! JavaScript and TypeScript parsing through SWC.

use std::ops::Range;

use swc_core::common::{sync::Lrc, FileName, SourceFile, SourceMap, Span};
use swc_core::ecma::ast::{EsVersion, Program};
use swc_core::ecma::parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::error::{DropConsoleError, Result};

/// Picks the parser syntax from the module id's extension.
///
/// Ids without a known extension (virtual modules, for instance) are parsed as
/// JavaScript with JSX enabled.
pub fn syntax_for_id(id: &str) -> Syntax {
    let path = id.split_once('?').map_or(id, |(path, _)| path);

    if path.ends_with(".tsx") {
        Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        })
    } else if path.ends_with(".ts") || path.ends_with(".mts") || path.ends_with(".cts") {
        Syntax::Typescript(TsSyntax {
            dts: path.ends_with(".d.ts"),
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        })
    }
}

/// A parsed program together with the source file its spans point into.
pub struct ParsedProgram {
    pub program: Program,
    file: Lrc<SourceFile>,
}

impl ParsedProgram {
    /// Converts a span into a byte range of the original source text.
    ///
    /// Returns `None` for dummy spans and spans outside the file.
    pub fn byte_range(&self, span: Span) -> Option<Range<usize>> {
        if span.is_dummy() || span.lo < self.file.start_pos || span.hi > self.file.end_pos {
            return None;
        }
        let start = (span.lo.0 - self.file.start_pos.0) as usize;
        let end = (span.hi.0 - self.file.start_pos.0) as usize;
        Some(start..end)
    }
}

/// Parses `code` as a script or module.
///
/// Recoverable errors count as failures: a file the parser only accepted
/// leniently is not safe to edit by byte range.
pub fn parse_program(code: &str, id: &str) -> Result<ParsedProgram> {
    let source_map: Lrc<SourceMap> = Default::default();
    let file = source_map.new_source_file(
        FileName::Custom(id.to_string()).into(),
        code.to_string(),
    );

    let lexer = Lexer::new(
        syntax_for_id(id),
        EsVersion::latest(),
        StringInput::from(&*file),
        None,
    );
    let mut parser = Parser::new_from(lexer);

    let parse_error = |error: swc_core::ecma::parser::error::Error| DropConsoleError::Parse {
        id: id.to_string(),
        message: error.kind().msg().to_string(),
    };

    let program = parser.parse_program().map_err(parse_error)?;

    if let Some(error) = parser.take_errors().into_iter().next() {
        return Err(parse_error(error));
    }

    Ok(ParsedProgram { program, file })
}
