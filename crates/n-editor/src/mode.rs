//! Vim-style modal editing.
//!
//! The engine is always in exactly one [`Mode`]. Each mode changes how keys
//! are interpreted and where the caret may sit:
//!
//! | Mode             | Caret limit          | Purpose                       |
//! |------------------|----------------------|-------------------------------|
//! | Normal           | on a char            | Navigation, commands          |
//! | Insert           | may sit past the end | Typing text                   |
//! | Replace          | may sit past the end | Overwriting text              |
//! | Visual           | on a char            | Selecting, inclusive end      |
//! | Select           | may sit past the end | Selecting, exclusive end      |
//! | Operator-pending | on a char            | Waiting for an operator motion|
//! | Command-line     | (in the command line)| `:` commands                  |
//!
//! Visual, Select, and operator-pending remember the mode to return to when
//! they end: Select entered from Insert with a shifted arrow goes back to
//! Insert, not Normal.

use std::fmt;

// ---------------------------------------------------------------------------
// SelectionKind
// ---------------------------------------------------------------------------

/// The shape of a Visual or Select selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// `v` / `gh`: character-wise.
    Character,
    /// `V` / `gH`: line-wise (always whole lines).
    Line,
    /// `Ctrl-V` / `g Ctrl-H`: block (column) selection.
    Block,
}

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// An operator waiting for (or applied to) a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `d`
    Delete,
    /// `c`
    Change,
    /// `y`
    Yank,
    /// `>`
    ShiftRight,
    /// `<`
    ShiftLeft,
    /// `g~`
    ToggleCase,
    /// `gu`
    Lowercase,
    /// `gU`
    Uppercase,
}

impl Operator {
    /// The key that repeats this operator to make it linewise (`dd`, `g~~`).
    #[must_use]
    pub const fn doubling_key(self) -> char {
        match self {
            Self::Delete => 'd',
            Self::Change => 'c',
            Self::Yank => 'y',
            Self::ShiftRight => '>',
            Self::ShiftLeft => '<',
            Self::ToggleCase => '~',
            Self::Lowercase => 'u',
            Self::Uppercase => 'U',
        }
    }
}

// ---------------------------------------------------------------------------
// ReturnMode
// ---------------------------------------------------------------------------

/// Where a transient mode goes when it ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnMode {
    #[default]
    Normal,
    Insert,
    Replace,
}

impl ReturnMode {
    /// The return target recorded when leaving `mode` for a transient mode.
    #[must_use]
    pub const fn of(mode: Mode) -> Self {
        match mode {
            Mode::Insert => Self::Insert,
            Mode::Replace => Self::Replace,
            Mode::Visual { return_to, .. }
            | Mode::Select { return_to, .. }
            | Mode::OperatorPending { return_to, .. } => return_to,
            Mode::Normal | Mode::CommandLine => Self::Normal,
        }
    }

    #[must_use]
    pub const fn mode(self) -> Mode {
        match self {
            Self::Normal => Mode::Normal,
            Self::Insert => Mode::Insert,
            Self::Replace => Mode::Replace,
        }
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// The current editing mode.
///
/// A pure data type. Key dispatch and transitions live in
/// [`state`](crate::state).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Replace,
    Visual {
        kind: SelectionKind,
        return_to: ReturnMode,
    },
    Select {
        kind: SelectionKind,
        return_to: ReturnMode,
    },
    OperatorPending {
        operator: Operator,
        return_to: ReturnMode,
    },
    CommandLine,
}

impl Mode {
    /// Visual mode entered from Normal.
    #[must_use]
    pub const fn visual(kind: SelectionKind) -> Self {
        Self::Visual {
            kind,
            return_to: ReturnMode::Normal,
        }
    }

    /// Select mode entered from Normal.
    #[must_use]
    pub const fn select(kind: SelectionKind) -> Self {
        Self::Select {
            kind,
            return_to: ReturnMode::Normal,
        }
    }

    /// Name for the status line / `mode()`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Replace => "REPLACE",
            Self::Visual { kind, .. } => match kind {
                SelectionKind::Character => "VISUAL",
                SelectionKind::Line => "VISUAL LINE",
                SelectionKind::Block => "VISUAL BLOCK",
            },
            Self::Select { kind, .. } => match kind {
                SelectionKind::Character => "SELECT",
                SelectionKind::Line => "SELECT LINE",
                SelectionKind::Block => "SELECT BLOCK",
            },
            Self::OperatorPending { .. } => "OP PENDING",
            Self::CommandLine => "COMMAND",
        }
    }

    /// True if the caret may sit one past the last char of a line.
    #[inline]
    #[must_use]
    pub const fn caret_past_end(self) -> bool {
        matches!(
            self,
            Self::Insert | Self::Replace | Self::Select { .. } | Self::CommandLine
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_visual(self) -> bool {
        matches!(self, Self::Visual { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_select(self) -> bool {
        matches!(self, Self::Select { .. })
    }

    /// Visual or Select.
    #[inline]
    #[must_use]
    pub const fn selection_kind(self) -> Option<SelectionKind> {
        match self {
            Self::Visual { kind, .. } | Self::Select { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// True for modes where keys type text.
    #[inline]
    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::Insert | Self::Replace)
    }

    /// Where this mode goes when it ends.
    #[inline]
    #[must_use]
    pub const fn return_to(self) -> ReturnMode {
        ReturnMode::of(self)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
