//! The `guicursor` list option.
//!
//! `guicursor` is a comma-separated list of `<modes>:<arguments>` tokens:
//!
//! ```text
//! n-v-c:block-Cursor/lCursor,i-ci:ver25-Cursor/lCursor,r-cr:hor20
//! ```
//!
//! Modes are `-`-joined (`n v ve o i r c ci cr sm`, or `a` for all of them).
//! Arguments are `-`-joined too:
//!
//! | Argument     | Effect                                   |
//! |--------------|------------------------------------------|
//! | `block`      | block cursor                             |
//! | `ver{N}`     | vertical bar, N percent of a cell wide   |
//! | `hor{N}`     | horizontal bar, N percent of a cell high |
//! | `blink...`   | recorded, not interpreted                |
//! | `{hl}/{lm}`  | highlight group and language-map group   |
//! | anything else| highlight group                          |
//!
//! Each [`GuiCursorEntry`] keeps the token it was parsed from, so the option
//! prints back exactly as typed. [`effective_attributes`] folds all entries
//! that apply to one mode into the attributes a host would draw.

use bitflags::bitflags;

use crate::error::EditorError;
use crate::mode::Mode;

/// Vim's default `guicursor` value.
pub const DEFAULT_GUICURSOR: &str = "n-v-c:block-Cursor/lCursor,ve:ver35-Cursor,\
o:hor50-Cursor,i-ci:ver25-Cursor/lCursor,r-cr:hor20-Cursor/lCursor,\
sm:block-Cursor-blinkwait175-blinkoff150-blinkon175";

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// A mode as `guicursor` distinguishes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorMode {
    Normal,
    Visual,
    VisualExclusive,
    OperatorPending,
    Insert,
    Replace,
    CommandLine,
    CommandLineInsert,
    CommandLineReplace,
    ShowMatch,
}

impl CursorMode {
    /// The `guicursor` mode for an engine mode. `exclusive` reflects
    /// `selection=exclusive`; Select mode is always exclusive.
    #[must_use]
    pub const fn for_mode(mode: Mode, exclusive: bool) -> Self {
        match mode {
            Mode::Normal => Self::Normal,
            Mode::Insert => Self::Insert,
            Mode::Replace => Self::Replace,
            Mode::Visual { .. } if exclusive => Self::VisualExclusive,
            Mode::Visual { .. } => Self::Visual,
            Mode::Select { .. } => Self::VisualExclusive,
            Mode::OperatorPending { .. } => Self::OperatorPending,
            Mode::CommandLine => Self::CommandLine,
        }
    }

    const fn flag(self) -> CursorModes {
        match self {
            Self::Normal => CursorModes::NORMAL,
            Self::Visual => CursorModes::VISUAL,
            Self::VisualExclusive => CursorModes::VISUAL_EXCLUSIVE,
            Self::OperatorPending => CursorModes::OP_PENDING,
            Self::Insert => CursorModes::INSERT,
            Self::Replace => CursorModes::REPLACE,
            Self::CommandLine => CursorModes::CMD_LINE,
            Self::CommandLineInsert => CursorModes::CMD_LINE_INSERT,
            Self::CommandLineReplace => CursorModes::CMD_LINE_REPLACE,
            Self::ShowMatch => CursorModes::SHOW_MATCH,
        }
    }
}

bitflags! {
    /// The set of modes one entry applies to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct CursorModes: u16 {
        const NORMAL           = 1 << 0;
        const VISUAL           = 1 << 1;
        const VISUAL_EXCLUSIVE = 1 << 2;
        const OP_PENDING       = 1 << 3;
        const INSERT           = 1 << 4;
        const REPLACE          = 1 << 5;
        const CMD_LINE         = 1 << 6;
        const CMD_LINE_INSERT  = 1 << 7;
        const CMD_LINE_REPLACE = 1 << 8;
        const SHOW_MATCH       = 1 << 9;
        const ALL              = 1 << 10;
    }
}

impl CursorModes {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "n" => Self::NORMAL,
            "v" => Self::VISUAL,
            "ve" => Self::VISUAL_EXCLUSIVE,
            "o" => Self::OP_PENDING,
            "i" => Self::INSERT,
            "r" => Self::REPLACE,
            "c" => Self::CMD_LINE,
            "ci" => Self::CMD_LINE_INSERT,
            "cr" => Self::CMD_LINE_REPLACE,
            "sm" => Self::SHOW_MATCH,
            "a" => Self::ALL,
            _ => return None,
        })
    }

    /// True if an entry with these modes applies to `mode`.
    #[must_use]
    pub const fn applies_to(self, mode: CursorMode) -> bool {
        self.contains(CursorModes::ALL) || self.contains(mode.flag())
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Cursor shape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    #[default]
    Block,
    /// Vertical bar (`ver`).
    Vertical,
    /// Horizontal bar (`hor`).
    Horizontal,
}

/// What a host should draw for one mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CursorAttributes {
    pub shape: CursorShape,
    /// Percentage of the cell for bar shapes, 0 for a block.
    pub thickness: u8,
    pub highlight_group: String,
    pub lmap_highlight_group: String,
    /// `blinkwait175` and friends, verbatim.
    pub blink: Vec<String>,
}

/// One parsed `guicursor` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuiCursorEntry {
    token: String,
    pub modes: CursorModes,
    pub attributes: CursorAttributes,
}

impl GuiCursorEntry {
    /// Parse one `<modes>:<arguments>` token.
    ///
    /// # Errors
    ///
    /// - E545 when there is no `:`
    /// - E546 for more than one `:` or an unknown mode
    /// - E548 when `ver`/`hor` is not followed by a number
    /// - E549 when that number is 0 or over 100
    pub fn parse(token: &str) -> Result<Self, EditorError> {
        let parts: Vec<&str> = token.split(':').collect();
        let (mode_list, argument_list) = match parts.as_slice() {
            [_] => return Err(EditorError::MissingColon(token.to_string())),
            [modes, arguments] => (*modes, *arguments),
            _ => return Err(EditorError::IllegalMode(token.to_string())),
        };

        let mut modes = CursorModes::empty();
        for name in mode_list.split('-') {
            modes |= CursorModes::from_token(name)
                .ok_or_else(|| EditorError::IllegalMode(token.to_string()))?;
        }

        let mut attributes = CursorAttributes::default();
        for argument in argument_list.split('-') {
            if argument == "block" {
                attributes.shape = CursorShape::Block;
            } else if let Some(n) = argument.strip_prefix("ver") {
                attributes.shape = CursorShape::Vertical;
                attributes.thickness = parse_thickness(n, token)?;
            } else if let Some(n) = argument.strip_prefix("hor") {
                attributes.shape = CursorShape::Horizontal;
                attributes.thickness = parse_thickness(n, token)?;
            } else if argument.starts_with("blink") {
                attributes.blink.push(argument.to_string());
            } else if let Some((group, lmap)) = argument.split_once('/') {
                attributes.highlight_group = group.to_string();
                attributes.lmap_highlight_group = lmap.to_string();
            } else {
                attributes.highlight_group = argument.to_string();
            }
        }

        Ok(Self {
            token: token.to_string(),
            modes,
            attributes,
        })
    }

    /// The token this entry was parsed from.
    #[inline]
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

fn parse_thickness(digits: &str, token: &str) -> Result<u8, EditorError> {
    let value: i64 = digits
        .parse()
        .map_err(|_| EditorError::DigitExpected(token.to_string()))?;
    if !(1..=100).contains(&value) {
        return Err(EditorError::IllegalPercentage(token.to_string()));
    }
    u8::try_from(value).map_err(|_| EditorError::IllegalPercentage(token.to_string()))
}

/// Fold `entries` into the attributes for `mode`.
///
/// Entries apply in order. Shape and thickness come from the last matching
/// entry; highlight groups and blink settings only from the last matching
/// entry that sets them.
#[must_use]
pub fn effective_attributes<'a, I>(entries: I, mode: CursorMode) -> CursorAttributes
where
    I: IntoIterator<Item = &'a GuiCursorEntry>,
{
    let mut result = CursorAttributes::default();
    for entry in entries.into_iter().filter(|e| e.modes.applies_to(mode)) {
        let attrs = &entry.attributes;
        result.shape = attrs.shape;
        result.thickness = attrs.thickness;
        if !attrs.highlight_group.is_empty() {
            result.highlight_group.clone_from(&attrs.highlight_group);
        }
        if !attrs.lmap_highlight_group.is_empty() {
            result.lmap_highlight_group.clone_from(&attrs.lmap_highlight_group);
        }
        if !attrs.blink.is_empty() {
            result.blink.clone_from(&attrs.blink);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
