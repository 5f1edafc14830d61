//! Carets: offset tracking with a sticky column and a selection anchor.
//!
//! A [`Caret`] is a plain value: an offset, the display column vertical
//! motions try to return to, and the Visual/Select anchor. It never holds a
//! reference to the text; every motion receives the host as a parameter.
//!
//! A [`CaretSet`] holds one or more carets with one marked primary. The host
//! owns the set (carets live and die with the editor); the engine only moves
//! them. After every multi-caret operation the engine calls
//! [`CaretSet::merge_overlapping`] so two carets never share an offset.
//!
//! # Sticky column
//!
//! `j`/`k` remember the display column they started from. Moving through a
//! short line and back onto a long one snaps back to it. `$` stores
//! [`Caret::END_OF_LINE`] so the caret keeps hugging line ends.

/// A caret in the host buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    /// Absolute char offset.
    pub offset: usize,

    /// Desired display column for vertical motions, `None` until the first
    /// vertical move after a horizontal one.
    pub sticky_column: Option<usize>,

    /// Visual/Select anchor. `Some` only while a selection mode is active.
    pub selection_start: Option<usize>,
}

impl Caret {
    /// Sticky-column value meaning "end of whatever line we land on".
    pub const END_OF_LINE: usize = usize::MAX;

    #[must_use]
    pub const fn at(offset: usize) -> Self {
        Self {
            offset,
            sticky_column: None,
            selection_start: None,
        }
    }

    /// Move to `offset`, forgetting the sticky column.
    #[inline]
    pub const fn move_to(&mut self, offset: usize) {
        self.offset = offset;
        self.sticky_column = None;
    }

    /// Drop the selection anchor.
    #[inline]
    pub const fn clear_selection(&mut self) {
        self.selection_start = None;
    }

    /// Selection bounds `(low, high)` between anchor and caret, both
    /// inclusive of the chars they sit on. `None` without an anchor.
    #[must_use]
    pub fn selection_bounds(&self) -> Option<(usize, usize)> {
        self.selection_start
            .map(|anchor| (anchor.min(self.offset), anchor.max(self.offset)))
    }
}

impl Default for Caret {
    fn default() -> Self {
        Self::at(0)
    }
}

// ---------------------------------------------------------------------------
// CaretSet
// ---------------------------------------------------------------------------

/// All carets of one editor. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretSet {
    carets: Vec<Caret>,
    primary: usize,
}

impl CaretSet {
    /// A set holding a single caret at `offset`.
    #[must_use]
    pub fn new(offset: usize) -> Self {
        Self {
            carets: vec![Caret::at(offset)],
            primary: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn primary(&self) -> &Caret {
        &self.carets[self.primary]
    }

    #[inline]
    pub fn primary_mut(&mut self) -> &mut Caret {
        &mut self.carets[self.primary]
    }

    /// Index of the primary caret within [`iter`](Self::iter) order.
    #[inline]
    #[must_use]
    pub const fn primary_index(&self) -> usize {
        self.primary
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.carets.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Caret> {
        self.carets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Caret> {
        self.carets.iter_mut()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Caret> {
        self.carets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Caret> {
        self.carets.get_mut(index)
    }

    /// Add a secondary caret. Returns its index.
    pub fn add(&mut self, caret: Caret) -> usize {
        self.carets.push(caret);
        self.carets.len() - 1
    }

    /// Drop every caret except the primary.
    pub fn retain_primary(&mut self) {
        let primary = self.carets[self.primary];
        self.carets.clear();
        self.carets.push(primary);
        self.primary = 0;
    }

    /// Sort carets by offset and merge carets that landed on the same
    /// offset. The primary survives a merge.
    pub fn merge_overlapping(&mut self) {
        let primary_offset = self.carets[self.primary].offset;
        self.carets.sort_by_key(|c| c.offset);
        self.carets.dedup_by_key(|c| c.offset);
        self.primary = self
            .carets
            .iter()
            .position(|c| c.offset == primary_offset)
            .unwrap_or(0);
    }

    /// Caret indices ordered by descending offset. Edits applied in this
    /// order never shift the offsets of carets still to be processed.
    #[must_use]
    pub fn indices_by_offset_desc(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.carets.len()).collect();
        indices.sort_by(|&a, &b| self.carets[b].offset.cmp(&self.carets[a].offset));
        indices
    }
}

impl Default for CaretSet {
    fn default() -> Self {
        Self::new(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_to_resets_sticky_column() {
        let mut caret = Caret::at(3);
        caret.sticky_column = Some(10);
        caret.move_to(7);
        assert_eq!(caret.offset, 7);
        assert_eq!(caret.sticky_column, None);
    }

    #[test]
    fn selection_bounds_are_ordered() {
        let mut caret = Caret::at(2);
        assert_eq!(caret.selection_bounds(), None);
        caret.selection_start = Some(9);
        assert_eq!(caret.selection_bounds(), Some((2, 9)));
        caret.offset = 12;
        assert_eq!(caret.selection_bounds(), Some((9, 12)));
    }

    #[test]
    fn merge_keeps_primary() {
        let mut set = CaretSet::new(5);
        set.add(Caret::at(1));
        set.add(Caret::at(5));
        set.add(Caret::at(3));
        set.merge_overlapping();

        let offsets: Vec<usize> = set.iter().map(|c| c.offset).collect();
        assert_eq!(offsets, vec![1, 3, 5]);
        assert_eq!(set.primary().offset, 5);
    }

    #[test]
    fn descending_order_for_edits() {
        let mut set = CaretSet::new(4);
        set.add(Caret::at(10));
        set.add(Caret::at(0));
        assert_eq!(set.indices_by_offset_desc(), vec![1, 0, 2]);
    }

    #[test]
    fn retain_primary_drops_secondaries() {
        let mut set = CaretSet::new(0);
        set.add(Caret::at(8));
        set.retain_primary();
        assert_eq!(set.len(), 1);
        assert_eq!(set.primary().offset, 0);
    }
}
