//! Text buffer: rope-backed text storage for the in-memory host.
//!
//! A `Buffer` wraps a [`ropey::Rope`] and speaks the engine's coordinate
//! systems: absolute char offsets and `(line, col)` positions.
//!
//! # Design choices
//!
//! - **ropey** provides O(log n) insert/delete at any offset and efficient
//!   line indexing. We build a small API on top rather than reimplementing
//!   text data structures.
//!
//! - **Columns are char offsets**, not byte offsets. Byte offsets never leak
//!   into the public API.
//!
//! - **Line endings are normalized to `\n` on load.** The engine addresses
//!   line ends by offset; a stray `\r` would otherwise be a visible char.
//!
//! - **Line count follows the rope**: `"a\nb\n"` has three lines, the last
//!   one empty, the way IDE documents count them.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ropey::Rope;

use crate::position::{Position, TextRange};

/// A text buffer backed by a rope.
pub struct Buffer {
    rope: Rope,
    path: Option<PathBuf>,
    modified: bool,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer with no file path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            path: None,
            modified: false,
        }
    }

    /// Create a buffer from a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&normalize_line_endings(text)),
            path: None,
            modified: false,
        }
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid UTF-8.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self {
            rope: Rope::from_str(&normalize_line_endings(&text)),
            path: Some(path.to_path_buf()),
            modified: false,
        })
    }

    // -- Text access --------------------------------------------------------

    /// Total number of lines. An empty buffer has 1 line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The char at `offset`, or `None` past the end.
    #[must_use]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.rope.len_chars()).then(|| self.rope.char(offset))
    }

    /// Offset of the first char of `line`. Lines past the end clamp to the
    /// buffer length.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Offset just past the last char of `line`, before its `\n`.
    #[must_use]
    pub fn line_end(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let start = self.rope.line_to_char(line);
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            start + len - 1
        } else {
            start + len
        }
    }

    /// The line containing `offset` (offsets past the end map to the last
    /// line).
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    /// Convert an offset to `(line, col)`.
    #[must_use]
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let line = self.line_of(offset);
        let col = offset.min(self.rope.len_chars()) - self.line_start(line);
        Position::new(line, col)
    }

    /// Convert `(line, col)` to an offset, clamping the column to the line
    /// end and the line to the last line.
    #[must_use]
    pub fn position_to_offset(&self, pos: Position) -> usize {
        let line = pos.line.min(self.line_count().saturating_sub(1));
        let start = self.line_start(line);
        (start + pos.col).min(self.line_end(line))
    }

    /// Text in `range` (clamped to the buffer).
    #[must_use]
    pub fn slice(&self, range: TextRange) -> String {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        self.rope.slice(start..end).to_string()
    }

    /// The whole text.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Editing ------------------------------------------------------------

    /// Replace `range` with `text`. The range is clamped to the buffer.
    pub fn replace(&mut self, range: TextRange, text: &str) {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start < end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
        if start < end || !text.is_empty() {
            self.modified = true;
        }
    }

    // -- Metadata -----------------------------------------------------------

    /// The file path this buffer is associated with, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True if the buffer changed since it was loaded.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .field("modified", &self.modified)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Turn `\r\n` and lone `\r` into `\n`.
fn normalize_line_endings(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\r' {
            result.push('\n');
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
        } else {
            result.push(ch);
        }
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
