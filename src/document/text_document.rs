//! In-memory text document with incremental edits
//!
//! Positions follow LSP conventions: zero-based lines, and characters counted
//! in UTF-16 code units. Out-of-range positions are clamped rather than
//! rejected.

use tower_lsp::lsp_types::{Position, Range, TextDocumentContentChangeEvent, Url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    uri: Url,
    language_id: String,
    version: i32,
    text: String,
    /// Byte offset of the first character of each line
    line_offsets: Vec<usize>,
}

impl TextDocument {
    pub fn new(uri: Url, language_id: impl Into<String>, version: i32, text: String) -> Self {
        let line_offsets = compute_line_offsets(&text);
        Self {
            uri,
            language_id: language_id.into(),
            version,
            text,
            line_offsets,
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Applies content changes in order. A change without a range replaces
    /// the whole document.
    pub fn apply_changes(&mut self, changes: Vec<TextDocumentContentChangeEvent>, version: i32) {
        for change in changes {
            match change.range {
                Some(range) => {
                    let start = self.offset_at(range.start);
                    let end = self.offset_at(range.end);
                    let (start, end) = (start.min(end), start.max(end));
                    self.text.replace_range(start..end, &change.text);
                }
                None => self.text = change.text,
            }
            self.line_offsets = compute_line_offsets(&self.text);
        }
        self.version = version;
    }

    /// Converts a position to a byte offset into the text.
    pub fn offset_at(&self, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.line_offsets.len() {
            return self.text.len();
        }

        let line_start = self.line_offsets[line];
        let line_end = self.line_content_end(line);
        let mut remaining = position.character as usize;

        for (index, ch) in self.text[line_start..line_end].char_indices() {
            let width = ch.len_utf16();
            if remaining < width {
                return line_start + index;
            }
            remaining -= width;
        }

        line_end
    }

    /// Converts a byte offset to a position. Offsets inside a multi-byte
    /// character resolve to the start of that character.
    pub fn position_at(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_offsets.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_offsets[line];
        let character: usize = self.text[line_start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();

        Position::new(line as u32, character as u32)
    }

    /// Returns the text covered by `range`.
    pub fn text_in(&self, range: Range) -> &str {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end);
        &self.text[start.min(end)..start.max(end)]
    }

    /// Byte offset where the line's content ends, before any line break
    fn line_content_end(&self, line: usize) -> usize {
        let next_line_start = self
            .line_offsets
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        let content = &self.text[self.line_offsets[line]..next_line_start];
        let trimmed = content
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .or_else(|| content.strip_suffix('\r'))
            .unwrap_or(content);

        self.line_offsets[line] + trimmed.len()
    }
}

fn compute_line_offsets(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut offsets = vec![0];

    for (index, &byte) in bytes.iter().enumerate() {
        match byte {
            b'\n' => offsets.push(index + 1),
            b'\r' if bytes.get(index + 1) != Some(&b'\n') => offsets.push(index + 1),
            _ => {}
        }
    }

    offsets
}
