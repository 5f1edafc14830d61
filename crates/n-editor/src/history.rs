//! Undo/redo history: transaction-based edit tracking.
//!
//! Records every text mutation as a reversible [`Edit`] grouped into
//! transactions. A transaction is the atomic unit of undo/redo:
//!
//! - **Normal mode**: each command (`x`, `dd`, `3J`) is one transaction.
//! - **Insert mode**: everything from entering insert to pressing Esc.
//!
//! # Usage
//!
//! ```text
//! history.begin(caret_offset);
//! history.replace(host, range, text);   // edits go through here
//! history.commit(caret_offset);
//! ```
//!
//! Empty transactions are discarded. `undolevels` caps the number of
//! transactions kept; the oldest fall off first.

use crate::host::Host;
use crate::position::TextRange;

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// A single reversible edit at a char offset.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
    /// `text` was inserted at `offset`.
    Insert { offset: usize, text: String },
    /// `text` was removed from `offset`.
    Delete { offset: usize, text: String },
}

impl Edit {
    fn apply(&self, host: &mut dyn Host) {
        match self {
            Self::Insert { offset, text } => host.replace(TextRange::point(*offset), text),
            Self::Delete { offset, text } => {
                host.replace(TextRange::new(*offset, offset + text.chars().count()), "");
            }
        }
    }

    fn revert(&self, host: &mut dyn Host) {
        match self {
            Self::Insert { offset, text } => {
                host.replace(TextRange::new(*offset, offset + text.chars().count()), "");
            }
            Self::Delete { offset, text } => host.replace(TextRange::point(*offset), text),
        }
    }
}

#[derive(Debug, Clone)]
struct Transaction {
    edits: Vec<Edit>,
    caret_before: usize,
    caret_after: usize,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Undo/redo history for one buffer.
///
/// New edits after an undo discard the redo stack (no undo tree).
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    pending: Option<Transaction>,
    limit: usize,
}

impl History {
    /// Create an empty history keeping at most `limit` transactions.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending: None,
            limit,
        }
    }

    /// Change the cap (`undolevels`). Zero still keeps one transaction.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.trim();
    }

    fn trim(&mut self) {
        let keep = self.limit.max(1);
        if self.undo_stack.len() > keep {
            let excess = self.undo_stack.len() - keep;
            self.undo_stack.drain(..excess);
        }
    }

    /// Start a transaction with the caret at `caret`. A transaction still
    /// open is committed first.
    pub fn begin(&mut self, caret: usize) {
        if self.pending.is_some() {
            self.commit(caret);
        }
        self.pending = Some(Transaction {
            edits: Vec::new(),
            caret_before: caret,
            caret_after: caret,
        });
    }

    /// True while a transaction is open.
    #[must_use]
    pub const fn in_transaction(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace `range` with `text` in `host`, recording the change in the
    /// open transaction (if any).
    pub fn replace(&mut self, host: &mut dyn Host, range: TextRange, text: &str) {
        let removed = host.slice(range);
        host.replace(range, text);
        if let Some(txn) = &mut self.pending {
            if !removed.is_empty() {
                txn.edits.push(Edit::Delete {
                    offset: range.start,
                    text: removed,
                });
            }
            if !text.is_empty() {
                txn.edits.push(Edit::Insert {
                    offset: range.start,
                    text: text.to_string(),
                });
            }
        }
    }

    /// Close the open transaction with the caret at `caret`.
    pub fn commit(&mut self, caret: usize) {
        if let Some(mut txn) = self.pending.take() {
            if txn.edits.is_empty() {
                return;
            }
            txn.caret_after = caret;
            self.redo_stack.clear();
            self.undo_stack.push(txn);
            self.trim();
        }
    }

    /// Undo the last transaction. Returns the caret offset to restore.
    pub fn undo(&mut self, host: &mut dyn Host) -> Option<usize> {
        if let Some(txn) = self.pending.take() {
            if !txn.edits.is_empty() {
                self.redo_stack.clear();
                self.undo_stack.push(txn);
            }
        }

        let txn = self.undo_stack.pop()?;
        for edit in txn.edits.iter().rev() {
            edit.revert(host);
        }
        let caret = txn.caret_before;
        self.redo_stack.push(txn);
        Some(caret)
    }

    /// Redo the last undone transaction. Returns the caret offset to restore.
    pub fn redo(&mut self, host: &mut dyn Host) -> Option<usize> {
        let txn = self.redo_stack.pop()?;
        for edit in &txn.edits {
            edit.apply(host);
        }
        let caret = txn.caret_after;
        self.undo_stack.push(txn);
        Some(caret)
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(1000)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn edit(h: &mut History, host: &mut MemoryHost, start: usize, end: usize, text: &str) {
        h.begin(start);
        h.replace(host, TextRange::new(start, end), text);
        h.commit(start + text.chars().count());
    }

    // -- Basic undo/redo ----------------------------------------------------

    #[test]
    fn undo_single_insert() {
        let mut host = MemoryHost::new("hllo");
        let mut h = History::default();
        edit(&mut h, &mut host, 1, 1, "e");
        assert_eq!(host.text(), "hello");

        assert_eq!(h.undo(&mut host), Some(1));
        assert_eq!(host.text(), "hllo");
    }

    #[test]
    fn undo_and_redo_replacement() {
        let mut host = MemoryHost::new("hello world");
        let mut h = History::default();
        edit(&mut h, &mut host, 0, 5, "goodbye");
        assert_eq!(host.text(), "goodbye world");

        h.undo(&mut host);
        assert_eq!(host.text(), "hello world");
        assert_eq!(h.redo(&mut host), Some(7));
        assert_eq!(host.text(), "goodbye world");
    }

    #[test]
    fn undo_multiline_delete() {
        let mut host = MemoryHost::new("first\nsecond\nthird");
        let mut h = History::default();
        edit(&mut h, &mut host, 6, 13, "");
        assert_eq!(host.text(), "first\nthird");
        assert_eq!(h.undo(&mut host), Some(6));
        assert_eq!(host.text(), "first\nsecond\nthird");
    }

    #[test]
    fn nothing_to_undo_or_redo() {
        let mut host = MemoryHost::new("x");
        let mut h = History::default();
        assert_eq!(h.undo(&mut host), None);
        assert_eq!(h.redo(&mut host), None);
    }

    #[test]
    fn empty_transaction_not_pushed() {
        let mut h = History::default();
        h.begin(0);
        h.commit(0);
        assert_eq!(h.undo_count(), 0);
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut host = MemoryHost::new("");
        let mut h = History::default();
        edit(&mut h, &mut host, 0, 0, "a");
        h.undo(&mut host);
        assert_eq!(h.redo_count(), 1);
        edit(&mut h, &mut host, 0, 0, "b");
        assert_eq!(h.redo_count(), 0);
        assert_eq!(host.text(), "b");
    }

    // -- Insert sessions ----------------------------------------------------

    #[test]
    fn insert_session_with_backspace_is_one_step() {
        let mut host = MemoryHost::new("hello");
        let mut h = History::default();

        h.begin(5);
        h.replace(&mut host, TextRange::point(5), " ");
        h.replace(&mut host, TextRange::point(6), "x");
        h.replace(&mut host, TextRange::new(6, 7), "");
        h.replace(&mut host, TextRange::point(6), "w");
        h.commit(7);
        assert_eq!(host.text(), "hello w");

        assert_eq!(h.undo(&mut host), Some(5));
        assert_eq!(host.text(), "hello");
        assert_eq!(h.redo(&mut host), Some(7));
        assert_eq!(host.text(), "hello w");
    }

    #[test]
    fn undo_commits_open_transaction() {
        let mut host = MemoryHost::new("ab");
        let mut h = History::default();
        h.begin(1);
        h.replace(&mut host, TextRange::point(1), "X");
        assert!(h.in_transaction());
        assert_eq!(h.undo(&mut host), Some(1));
        assert_eq!(host.text(), "ab");
        assert!(!h.in_transaction());
    }

    // -- Limits -------------------------------------------------------------

    #[test]
    fn limit_drops_oldest() {
        let mut host = MemoryHost::new("");
        let mut h = History::new(2);
        for (i, ch) in ["a", "b", "c"].iter().enumerate() {
            edit(&mut h, &mut host, i, i, ch);
        }
        assert_eq!(h.undo_count(), 2);
        h.undo(&mut host);
        h.undo(&mut host);
        assert_eq!(h.undo(&mut host), None);
        assert_eq!(host.text(), "a");
    }

    #[test]
    fn zero_limit_keeps_one() {
        let mut host = MemoryHost::new("");
        let mut h = History::new(0);
        edit(&mut h, &mut host, 0, 0, "a");
        edit(&mut h, &mut host, 1, 1, "b");
        assert_eq!(h.undo_count(), 1);
        h.undo(&mut host);
        assert_eq!(host.text(), "a");
    }
}
