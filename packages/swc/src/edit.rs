//! Byte-range editing over an owned copy of the source text.
//!
//! Edits are recorded against offsets of the original text and only applied
//! when rendering, so the order in which they are made does not matter. The
//! buffer can derive a source map that points every surviving chunk back at
//! its original position.

use std::collections::BTreeSet;
use std::ops::Range;

use sourcemap::{SourceMap, SourceMapBuilder};

use crate::error::{DropConsoleError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    range: Range<usize>,
    content: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Keep(Range<usize>),
    Replace { start: usize, content: &'a str },
}

#[derive(Debug, Clone)]
pub struct EditBuffer {
    original: String,
    edits: Vec<Edit>,
    locations: BTreeSet<usize>,
}

impl EditBuffer {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            edits: Vec::new(),
            locations: BTreeSet::new(),
        }
    }

    /// Marks an original offset that gets its own mapping in the source map.
    pub fn add_sourcemap_location(&mut self, pos: usize) {
        if pos <= self.original.len() {
            self.locations.insert(pos);
        }
    }

    pub fn remove(&mut self, start: usize, end: usize) -> Result<&mut Self> {
        self.overwrite(start, end, "")
    }

    /// Replaces `[start, end)` of the original text with `content`.
    pub fn overwrite(&mut self, start: usize, end: usize, content: &str) -> Result<&mut Self> {
        self.check_range(start, end)?;
        if start < end {
            self.edits.push(Edit {
                range: start..end,
                content: content.to_string(),
            });
        }
        Ok(self)
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        let len = self.original.len();
        if start > end
            || end > len
            || !self.original.is_char_boundary(start)
            || !self.original.is_char_boundary(end)
        {
            return Err(DropConsoleError::InvalidRange { start, end, len });
        }
        Ok(())
    }

    /// Splits the original text into kept chunks and replacements, in order.
    ///
    /// Where edits overlap, the part already covered by an earlier edit is
    /// dropped from the later one.
    fn segments(&self) -> Vec<Segment<'_>> {
        let mut edits: Vec<&Edit> = self.edits.iter().collect();
        edits.sort_by_key(|edit| (edit.range.start, edit.range.end));

        let mut segments = Vec::with_capacity(edits.len() * 2 + 1);
        let mut cursor = 0;
        for edit in edits {
            if edit.range.end <= cursor {
                continue;
            }
            let start = edit.range.start.max(cursor);
            if cursor < start {
                segments.push(Segment::Keep(cursor..start));
            }
            if !edit.content.is_empty() {
                segments.push(Segment::Replace {
                    start,
                    content: &edit.content,
                });
            }
            cursor = edit.range.end;
        }
        if cursor < self.original.len() {
            segments.push(Segment::Keep(cursor..self.original.len()));
        }
        segments
    }

    pub fn render(&self) -> String {
        let mut output = String::with_capacity(self.original.len());
        for segment in self.segments() {
            match segment {
                Segment::Keep(range) => output.push_str(&self.original[range]),
                Segment::Replace { content, .. } => output.push_str(content),
            }
        }
        output
    }

    /// Builds a source map from the rendered text back to the original.
    ///
    /// Kept chunks are mapped at their first byte, at the start of every line
    /// inside them, and at each recorded location. Replacement text is mapped
    /// to the start of the range it replaced.
    pub fn generate_map(&self, source_name: &str) -> SourceMap {
        let mut builder = SourceMapBuilder::new(None);
        let src_id = builder.add_source(source_name);
        builder.set_source_contents(src_id, Some(self.original.as_str()));

        let index = LineIndex::new(&self.original);
        let mut generated = Position::default();

        for segment in self.segments() {
            match segment {
                Segment::Keep(range) => {
                    let mut first = true;
                    for (offset, ch) in self.original[range.clone()].char_indices() {
                        let pos = range.start + offset;
                        if first || self.locations.contains(&pos) {
                            let original = index.position(&self.original, pos);
                            builder.add_raw(
                                generated.line,
                                generated.col,
                                original.line,
                                original.col,
                                Some(src_id),
                                None,
                                false,
                            );
                        }
                        first = generated.advance(ch);
                    }
                }
                Segment::Replace { start, content } => {
                    let original = index.position(&self.original, start);
                    builder.add_raw(
                        generated.line,
                        generated.col,
                        original.line,
                        original.col,
                        Some(src_id),
                        None,
                        false,
                    );
                    for ch in content.chars() {
                        generated.advance(ch);
                    }
                }
            }
        }

        builder.into_sourcemap()
    }
}

/// Zero-based line and UTF-16 column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Position {
    line: u32,
    col: u32,
}

impl Position {
    /// Moves past `ch`; returns whether a new line started.
    fn advance(&mut self, ch: char) -> bool {
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
            true
        } else {
            self.col += ch.len_utf16() as u32;
            false
        }
    }
}

struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { line_starts }
    }

    fn position(&self, text: &str, pos: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= pos) - 1;
        let col = text[self.line_starts[line]..pos].encode_utf16().count();
        Position {
            line: line as u32,
            col: col as u32,
        }
    }
}
