use log::{debug, trace};
use sourcemap::SourceMap;
use swc_core::common::{Span, Spanned};
use swc_core::ecma::{
    ast::*,
    visit::{Visit, VisitMut, VisitMutWith, VisitWith},
};

use crate::config::{ConsoleFunction, PluginConfig};
use crate::edit::EditBuffer;
use crate::error::{DropConsoleError, Result};
use crate::filter::FileFilter;
use crate::matcher::is_console_statement;
use crate::parse::{parse_program, ParsedProgram};

/// Transformed code and, when requested, its source map.
#[derive(Debug)]
pub struct TransformOutput {
    pub code: String,
    pub map: Option<SourceMap>,
}

impl TransformOutput {
    pub fn map_json(&self) -> Result<Option<String>> {
        let Some(map) = &self.map else {
            return Ok(None);
        };
        let mut json = Vec::new();
        map.to_writer(&mut json)?;
        Ok(Some(String::from_utf8_lossy(&json).into_owned()))
    }
}

/// Removes the console call statements in `code`.
///
/// Returns `None` when `functions` is empty or when `code` does not parse; the
/// caller keeps the original text in both cases. `id` selects the parser syntax
/// and names the source in the generated map.
pub fn transform(
    code: &str,
    id: &str,
    functions: &[ConsoleFunction],
    source_map: bool,
) -> Option<TransformOutput> {
    if functions.is_empty() {
        return None;
    }

    match try_transform(code, id, functions, source_map) {
        Ok(output) => Some(output),
        Err(DropConsoleError::Parse { message, .. }) => {
            debug!("Failed to parse code, skip {id}: {message}");
            None
        }
        Err(err) => {
            debug!("Skip {id}: {err}");
            None
        }
    }
}

fn try_transform(
    code: &str,
    id: &str,
    functions: &[ConsoleFunction],
    source_map: bool,
) -> Result<TransformOutput> {
    let parsed = parse_program(code, id)?;

    let mut excisor = Excisor {
        parsed: &parsed,
        functions,
        source_map,
        buffer: EditBuffer::new(code),
        removed: 0,
        error: None,
    };
    parsed.program.visit_with(&mut excisor);

    if let Some(err) = excisor.error {
        return Err(err);
    }
    if excisor.removed > 0 {
        trace!("{id}: dropped {} console call(s)", excisor.removed);
    }

    let buffer = excisor.buffer;
    Ok(TransformOutput {
        code: buffer.render(),
        map: source_map.then(|| buffer.generate_map(id)),
    })
}

/// Walks a parsed program and records the edits on an [`EditBuffer`].
///
/// Statements directly inside a statement list are removed. A console call
/// that is the whole body of an `if`, loop or label is replaced by `;` so the
/// surrounding statement keeps a body.
struct Excisor<'a> {
    parsed: &'a ParsedProgram,
    functions: &'a [ConsoleFunction],
    source_map: bool,
    buffer: EditBuffer,
    removed: usize,
    error: Option<DropConsoleError>,
}

impl Excisor<'_> {
    fn excise(&mut self, span: Span, replacement: &str) {
        let Some(range) = self.parsed.byte_range(span) else {
            return;
        };
        let result = if replacement.is_empty() {
            self.buffer.remove(range.start, range.end).map(drop)
        } else {
            self.buffer
                .overwrite(range.start, range.end, replacement)
                .map(drop)
        };
        match result {
            Ok(()) => self.removed += 1,
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
    }
}

impl Visit for Excisor<'_> {
    fn visit_span(&mut self, span: &Span) {
        if !self.source_map {
            return;
        }
        if let Some(range) = self.parsed.byte_range(*span) {
            self.buffer.add_sourcemap_location(range.start);
            self.buffer.add_sourcemap_location(range.end);
        }
    }

    fn visit_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            if is_console_statement(stmt, self.functions) {
                self.excise(stmt.span(), "");
                stmt.visit_children_with(self);
            } else {
                stmt.visit_with(self);
            }
        }
    }

    fn visit_module_items(&mut self, items: &[ModuleItem]) {
        for item in items {
            match item {
                ModuleItem::Stmt(stmt) if is_console_statement(stmt, self.functions) => {
                    self.excise(stmt.span(), "");
                    stmt.visit_children_with(self);
                }
                _ => item.visit_with(self),
            }
        }
    }

    // Only reached for statements outside a statement list, or ones that did
    // not match there.
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if is_console_statement(stmt, self.functions) {
            self.excise(stmt.span(), ";");
        }
        stmt.visit_children_with(self);
    }
}

/// Applies a [`PluginConfig`]: the file filter first, then [`transform`].
#[derive(Debug, Clone)]
pub struct DropConsole {
    config: PluginConfig,
    filter: FileFilter,
}

impl DropConsole {
    pub fn new(config: PluginConfig) -> Result<Self> {
        let filter = config.validate()?;
        Ok(Self { config, filter })
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Whether a module with this id is transformed at all.
    pub fn should_transform(&self, id: &str) -> bool {
        !self.config.functions.is_empty() && self.filter.should_transform(id)
    }

    pub fn transform(&self, code: &str, id: &str) -> Option<TransformOutput> {
        if !self.should_transform(id) {
            debug!("Skip {id}");
            return None;
        }
        transform(code, id, &self.config.functions, self.config.source_map)
    }

    /// Removes the console call statements from an already parsed program.
    pub fn transform_program(&self, program: &mut Program) -> usize {
        let mut transformer = DropConsoleTransformer::new(self.config.functions.clone());
        program.visit_mut_with(&mut transformer);
        transformer.removed
    }
}

/// In-place variant of the excision used when the host owns parsing and code
/// generation, as SWC plugins do.
pub struct DropConsoleTransformer {
    functions: Vec<ConsoleFunction>,
    removed: usize,
}

impl DropConsoleTransformer {
    pub fn new(functions: Vec<ConsoleFunction>) -> Self {
        Self {
            functions,
            removed: 0,
        }
    }

    pub fn removed(&self) -> usize {
        self.removed
    }
}

impl VisitMut for DropConsoleTransformer {
    fn visit_mut_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        let functions = &self.functions;
        let before = stmts.len();
        stmts.retain(|stmt| !is_console_statement(stmt, functions));
        self.removed += before - stmts.len();

        stmts.visit_mut_children_with(self);
    }

    fn visit_mut_module_items(&mut self, items: &mut Vec<ModuleItem>) {
        let functions = &self.functions;
        let before = items.len();
        items.retain(|item| match item {
            ModuleItem::Stmt(stmt) => !is_console_statement(stmt, functions),
            ModuleItem::ModuleDecl(_) => true,
        });
        self.removed += before - items.len();

        items.visit_mut_children_with(self);
    }

    fn visit_mut_stmt(&mut self, stmt: &mut Stmt) {
        if is_console_statement(stmt, &self.functions) {
            *stmt = Stmt::Empty(EmptyStmt { span: stmt.span() });
            self.removed += 1;
            return;
        }

        stmt.visit_mut_children_with(self);
    }
}
