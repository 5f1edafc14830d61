//! Text coordinates.
//!
//! Three coordinate systems meet in the engine:
//!
//! - **Offsets** (`usize`): absolute char indices into the buffer. Carets,
//!   edits, and undo history all speak offsets.
//! - **[`Position`]**: buffer `(line, col)`, both 0-indexed, `col` counted in
//!   chars. Used for line-oriented work (linewise operators, ranges).
//! - **[`VisualPosition`]**: `(visual line, display column)`. Folds and soft
//!   wrap make visual lines differ from buffer lines; tabs and wide chars make
//!   display columns differ from char columns. Scrolling and vertical motions
//!   work here.
//!
//! [`TextRange`] is a half-open offset range, the unit of every edit.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A buffer position: (line, column), both 0-indexed.
///
/// `col` is the char offset from the start of the line, **not** a byte offset.
/// Positions order lexicographically, line first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The origin: line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display, matching Vim's `line:col` status.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// VisualPosition
// ---------------------------------------------------------------------------

/// A position on screen: visual line and display column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VisualPosition {
    pub line: usize,
    pub column: usize,
}

impl VisualPosition {
    #[inline]
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Debug for VisualPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Visual({}:{})", self.line, self.column)
    }
}

// ---------------------------------------------------------------------------
// TextRange
// ---------------------------------------------------------------------------

/// A half-open offset range `[start, end)`.
///
/// Always normalized so that `start <= end`; build one from two arbitrary
/// offsets with [`TextRange::ordered`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Create a range. Panics in debug if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "TextRange::new requires start <= end");
        Self { start, end }
    }

    /// Create a range from two offsets in either order.
    #[inline]
    #[must_use]
    pub const fn ordered(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-width range at `offset`.
    #[inline]
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// True when `offset` falls within `[start, end)`.
    #[inline]
    #[must_use]
    pub const fn contains(self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_order_line_first() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(3, 1) < Position::new(3, 2));
        assert_eq!(Position::new(2, 2), Position::new(2, 2));
    }

    #[test]
    fn position_display_is_one_indexed() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
        assert_eq!(Position::new(9, 4).to_string(), "10:5");
    }

    #[test]
    fn range_ordered_swaps() {
        let r = TextRange::ordered(10, 4);
        assert_eq!(r.start, 4);
        assert_eq!(r.end, 10);
        assert_eq!(r.len(), 6);
    }

    #[test]
    fn range_contains_is_half_open() {
        let r = TextRange::new(2, 5);
        assert!(!r.contains(1));
        assert!(r.contains(2));
        assert!(r.contains(4));
        assert!(!r.contains(5));
    }

    #[test]
    fn point_range_is_empty() {
        let r = TextRange::point(7);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert!(!r.contains(7));
    }
}
