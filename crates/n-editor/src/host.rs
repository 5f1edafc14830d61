//! The host editor capability.
//!
//! The engine never owns text or a window. Everything it reads or changes
//! goes through [`Host`]: text by offset range, line/offset mapping, the
//! caret set, the viewport, and inlays. An IDE adapter implements the trait
//! over its own document model; [`MemoryHost`] implements it over a rope
//! with a simulated viewport and is what tests and the headless binary use.
//!
//! # Visual coordinates
//!
//! Folds and soft wrap are host features. The provided methods assume
//! neither (visual line == buffer line) and compute display columns by
//! expanding tabs and measuring chars with `unicode-width`. Hosts with folds
//! override the `visual_*` methods.

use unicode_width::UnicodeWidthChar;

use crate::buffer::Buffer;
use crate::caret::CaretSet;
use crate::position::{Position, TextRange, VisualPosition};

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The visible window onto the buffer, in visual coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible visual line.
    pub top_line: usize,
    /// Number of visible text lines.
    pub height: usize,
    /// First visible display column.
    pub left_column: usize,
    /// Number of visible display columns.
    pub width: usize,
}

impl Viewport {
    /// Last visible visual line (may lie past the end of the buffer when
    /// the view is scrolled into virtual space).
    #[inline]
    #[must_use]
    pub const fn bottom_line(&self) -> usize {
        self.top_line + self.height.saturating_sub(1)
    }

    /// Last visible display column.
    #[inline]
    #[must_use]
    pub const fn right_column(&self) -> usize {
        self.left_column + self.width.saturating_sub(1)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            top_line: 0,
            height: 35,
            left_column: 0,
            width: 80,
        }
    }
}

/// Virtual content drawn between chars (parameter hints, type annotations).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inlay {
    /// True when the inlay belongs to the text before it. Column scrolling
    /// stops in front of inlays that belong to the text after them.
    pub related_to_preceding: bool,
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// What the engine needs from an editor.
pub trait Host {
    /// Total char count.
    fn len_chars(&self) -> usize;

    /// The char at `offset`, `None` past the end.
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Text in `range`.
    fn slice(&self, range: TextRange) -> String;

    /// Replace `range` with `text`. This is the only way the engine edits.
    fn replace(&mut self, range: TextRange, text: &str);

    /// Number of buffer lines (at least 1).
    fn line_count(&self) -> usize;

    /// Offset of the first char of `line`.
    fn line_start(&self, line: usize) -> usize;

    /// Offset just past the last char of `line`, before the line break.
    fn line_end(&self, line: usize) -> usize;

    /// Line containing `offset`.
    fn line_of(&self, offset: usize) -> usize;

    /// Display width of a tab stop.
    fn tab_width(&self) -> usize;

    /// Called when `tabstop` changes.
    fn set_tab_width(&mut self, width: usize);

    fn carets(&self) -> &CaretSet;

    fn carets_mut(&mut self) -> &mut CaretSet;

    fn viewport(&self) -> Viewport;

    /// Scroll so that `top_line` is the first visible visual line and
    /// `left_column` the first visible display column.
    fn scroll_to(&mut self, top_line: usize, left_column: usize);

    /// Inlay drawn at `pos`, if any.
    fn inlay_at(&self, _pos: VisualPosition) -> Option<Inlay> {
        None
    }

    // -- Provided: visual mapping ------------------------------------------

    fn visual_line_count(&self) -> usize {
        self.line_count()
    }

    fn line_to_visual_line(&self, line: usize) -> usize {
        line
    }

    fn visual_line_to_line(&self, visual_line: usize) -> usize {
        visual_line.min(self.line_count().saturating_sub(1))
    }

    // -- Provided: conveniences --------------------------------------------

    fn last_line(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    /// Chars on `line`, excluding the line break.
    fn line_len(&self, line: usize) -> usize {
        self.line_end(line) - self.line_start(line)
    }

    fn line_text(&self, line: usize) -> String {
        self.slice(TextRange::new(self.line_start(line), self.line_end(line)))
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let line = self.line_of(offset);
        Position::new(line, offset.saturating_sub(self.line_start(line)))
    }

    /// `(line, col)` to offset, clamping both to the buffer.
    fn position_to_offset(&self, pos: Position) -> usize {
        let line = pos.line.min(self.last_line());
        (self.line_start(line) + pos.col).min(self.line_end(line))
    }

    /// Display column of `offset` within its line.
    fn display_column(&self, offset: usize) -> usize {
        let line = self.line_of(offset);
        let tab = self.tab_width().max(1);
        let mut column = 0;
        for at in self.line_start(line)..offset.min(self.line_end(line)) {
            if let Some(ch) = self.char_at(at) {
                column += char_width(ch, column, tab);
            }
        }
        column
    }

    /// Display width of a whole line.
    fn line_display_width(&self, line: usize) -> usize {
        self.display_column(self.line_end(line))
    }

    fn offset_to_visual(&self, offset: usize) -> VisualPosition {
        let line = self.line_of(offset);
        VisualPosition::new(self.line_to_visual_line(line), self.display_column(offset))
    }

    /// The offset of the char covering `pos.column` on visual line
    /// `pos.line`, or the line end when the column lies past it.
    fn visual_to_offset(&self, pos: VisualPosition) -> usize {
        let line = self.visual_line_to_line(pos.line);
        let tab = self.tab_width().max(1);
        let end = self.line_end(line);
        let mut column = 0;
        for at in self.line_start(line)..end {
            let Some(ch) = self.char_at(at) else { break };
            let width = char_width(ch, column, tab);
            if column + width > pos.column {
                return at;
            }
            column += width;
        }
        end
    }
}

/// Display width of `ch` drawn at display column `column`.
#[must_use]
pub fn char_width(ch: char, column: usize, tab: usize) -> usize {
    if ch == '\t' {
        tab - column % tab
    } else {
        ch.width().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// MemoryHost
// ---------------------------------------------------------------------------

/// A self-contained host: rope buffer, caret set, simulated viewport.
#[derive(Debug)]
pub struct MemoryHost {
    buffer: Buffer,
    carets: CaretSet,
    viewport: Viewport,
    tab_width: usize,
    inlays: Vec<(VisualPosition, Inlay)>,
}

impl MemoryHost {
    /// A host showing `text` with the caret at offset 0.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::with_buffer(Buffer::from_text(text))
    }

    #[must_use]
    pub fn with_buffer(buffer: Buffer) -> Self {
        Self {
            buffer,
            carets: CaretSet::new(0),
            viewport: Viewport::default(),
            tab_width: 8,
            inlays: Vec::new(),
        }
    }

    /// Resize the simulated window.
    #[must_use]
    pub const fn with_size(mut self, height: usize, width: usize) -> Self {
        self.viewport.height = height;
        self.viewport.width = width;
        self
    }

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// The whole text.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.contents()
    }

    /// Put the single primary caret at `pos`.
    pub fn set_caret(&mut self, pos: Position) {
        let offset = self.buffer.position_to_offset(pos);
        self.carets = CaretSet::new(offset);
    }

    /// Primary caret as `(line, col)`.
    #[must_use]
    pub fn caret_position(&self) -> Position {
        self.buffer.offset_to_position(self.carets.primary().offset)
    }

    /// Register an inlay drawn at `pos`.
    pub fn add_inlay(&mut self, pos: VisualPosition, inlay: Inlay) {
        self.inlays.push((pos, inlay));
    }
}

impl Host for MemoryHost {
    fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.buffer.char_at(offset)
    }

    fn slice(&self, range: TextRange) -> String {
        self.buffer.slice(range)
    }

    fn replace(&mut self, range: TextRange, text: &str) {
        self.buffer.replace(range, text);
    }

    fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    fn line_start(&self, line: usize) -> usize {
        self.buffer.line_start(line)
    }

    fn line_end(&self, line: usize) -> usize {
        self.buffer.line_end(line)
    }

    fn line_of(&self, offset: usize) -> usize {
        self.buffer.line_of(offset)
    }

    fn tab_width(&self) -> usize {
        self.tab_width
    }

    fn set_tab_width(&mut self, width: usize) {
        self.tab_width = width.max(1);
    }

    fn carets(&self) -> &CaretSet {
        &self.carets
    }

    fn carets_mut(&mut self) -> &mut CaretSet {
        &mut self.carets
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_to(&mut self, top_line: usize, left_column: usize) {
        self.viewport.top_line = top_line.min(self.visual_line_count().saturating_sub(1));
        self.viewport.left_column = left_column;
    }

    fn inlay_at(&self, pos: VisualPosition) -> Option<Inlay> {
        self.inlays
            .iter()
            .find(|(at, _)| *at == pos)
            .map(|(_, inlay)| *inlay)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
