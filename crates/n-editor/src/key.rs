//! Key tokens and Vim key notation.
//!
//! The engine consumes one [`Key`] at a time. A key is either a character or
//! a named key, plus modifier flags. Hosts translate their native events into
//! keys; tests and `:normal` / `:map` spell them in Vim's angle-bracket
//! notation, parsed by [`parse_keys`]:
//!
//! ```text
//! "d2w"            → d, 2, w
//! "<Esc>:set ic<CR>" → Esc, :, s, e, t, ' ', i, c, Enter
//! "<C-v>jj"        → Ctrl-v, j, j
//! "<S-Right>"      → Shift+Right
//! "<lt>"           → '<'
//! ```
//!
//! An unterminated or unknown `<...>` sequence is taken literally, the way
//! Vim does.

use std::fmt;

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Identity of a key.
///
/// Printable characters use [`Char`](KeyCode::Char); function keys use
/// [`F`](KeyCode::F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1 through F35.
    F(u8),
}

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const META  = 0b0010_0000;
    }
}

/// One key press.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl Key {
    pub const ESC: Self = Self::named(KeyCode::Escape);
    pub const ENTER: Self = Self::named(KeyCode::Enter);

    #[inline]
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A plain character key.
    #[inline]
    #[must_use]
    pub const fn char(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), Modifiers::empty())
    }

    /// A named key without modifiers.
    #[inline]
    #[must_use]
    pub const fn named(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Ctrl + character. The character is stored lowercase so `<C-V>` and
    /// `<C-v>` compare equal.
    #[must_use]
    pub fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch.to_ascii_lowercase()), Modifiers::CTRL)
    }

    /// The character this key types, if it types one. Shift is allowed
    /// (it is already folded into the char); Ctrl/Alt/Meta are not.
    #[must_use]
    pub fn printable(self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch)
                if !self
                    .modifiers
                    .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META) =>
            {
                Some(ch)
            }
            _ => None,
        }
    }

    /// True for Ctrl + `ch` (case-insensitive).
    #[must_use]
    pub fn is_ctrl(self, ch: char) -> bool {
        self.modifiers == Modifiers::CTRL
            && matches!(self.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&ch))
    }

    /// True when Shift is held on a named key (`<S-Right>` and friends).
    #[inline]
    #[must_use]
    pub fn is_shifted_special(self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT) && !matches!(self.code, KeyCode::Char(_))
    }

    /// The same key with Shift removed.
    #[inline]
    #[must_use]
    pub fn unshifted(self) -> Self {
        Self::new(self.code, self.modifiers - Modifiers::SHIFT)
    }

    /// Arrow, Home/End, and page keys. These are the "special keys" that
    /// `keymodel` governs.
    #[must_use]
    pub const fn is_special_motion(self) -> bool {
        matches!(
            self.code,
            KeyCode::Up
                | KeyCode::Down
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::PageUp
                | KeyCode::PageDown
        )
    }
}

impl From<char> for Key {
    fn from(ch: char) -> Self {
        Self::char(ch)
    }
}

// ---------------------------------------------------------------------------
// Notation
// ---------------------------------------------------------------------------

const NAMED: &[(&str, KeyCode)] = &[
    ("esc", KeyCode::Escape),
    ("cr", KeyCode::Enter),
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("nl", KeyCode::Enter),
    ("tab", KeyCode::Tab),
    ("bs", KeyCode::Backspace),
    ("backspace", KeyCode::Backspace),
    ("del", KeyCode::Delete),
    ("delete", KeyCode::Delete),
    ("insert", KeyCode::Insert),
    ("ins", KeyCode::Insert),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("space", KeyCode::Char(' ')),
    ("lt", KeyCode::Char('<')),
    ("bar", KeyCode::Char('|')),
    ("bslash", KeyCode::Char('\\')),
];

/// Parse Vim key notation into keys.
#[must_use]
pub fn parse_keys(text: &str) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some(close) = rest.find('>') {
                if let Some(key) = parse_special(&rest[1..close]) {
                    keys.push(key);
                    rest = &rest[close + 1..];
                    continue;
                }
            }
        }
        keys.push(Key::char(ch));
        rest = &rest[ch.len_utf8()..];
    }

    keys
}

/// Parse the inside of `<...>`, e.g. `C-v`, `S-Right`, `Esc`.
fn parse_special(inner: &str) -> Option<Key> {
    let mut modifiers = Modifiers::empty();
    let mut name = inner;

    // Modifier prefixes. A lone "-" after a prefix is the minus key.
    while name.len() > 2 && name.as_bytes()[1] == b'-' {
        let flag = match name.as_bytes()[0].to_ascii_lowercase() {
            b'c' => Modifiers::CTRL,
            b's' => Modifiers::SHIFT,
            b'a' => Modifiers::ALT,
            b'm' => Modifiers::META,
            _ => return None,
        };
        modifiers |= flag;
        name = &name[2..];
    }

    let lower = name.to_ascii_lowercase();
    if let Some((_, code)) = NAMED.iter().find(|(n, _)| *n == lower) {
        return Some(Key::new(*code, modifiers));
    }
    if let Some(num) = lower.strip_prefix('f') {
        if let Ok(n) = num.parse::<u8>() {
            if (1..=35).contains(&n) {
                return Some(Key::new(KeyCode::F(n), modifiers));
            }
        }
    }

    let mut chars = name.chars();
    let ch = chars.next()?;
    if chars.next().is_some() || modifiers.is_empty() {
        return None;
    }
    if modifiers.contains(Modifiers::CTRL) {
        return Some(Key::new(KeyCode::Char(ch.to_ascii_lowercase()), modifiers));
    }
    Some(Key::new(KeyCode::Char(ch), modifiers))
}

/// Render keys back to notation, the way `:map` lists them.
#[must_use]
pub fn to_notation(keys: &[Key]) -> String {
    keys.iter().map(ToString::to_string).collect()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefix = String::new();
        if self.modifiers.contains(Modifiers::CTRL) {
            prefix.push_str("C-");
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            prefix.push_str("S-");
        }
        if self.modifiers.contains(Modifiers::ALT) {
            prefix.push_str("A-");
        }
        if self.modifiers.contains(Modifiers::META) {
            prefix.push_str("M-");
        }

        let name = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char('<') => "lt".to_string(),
            KeyCode::Char('|') => "Bar".to_string(),
            KeyCode::Char(ch) if prefix.is_empty() => return write!(f, "{ch}"),
            KeyCode::Char(ch) => ch.to_string(),
            KeyCode::Enter => "CR".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Backspace => "BS".to_string(),
            KeyCode::Escape => "Esc".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::F(n) => format!("F{n}"),
        };
        write!(f, "<{prefix}{name}>")
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({self})")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_key_per_char() {
        let keys = parse_keys("d2w");
        assert_eq!(keys, vec![Key::char('d'), Key::char('2'), Key::char('w')]);
    }

    #[test]
    fn named_keys_are_case_insensitive() {
        assert_eq!(parse_keys("<Esc>"), vec![Key::ESC]);
        assert_eq!(parse_keys("<ESC>"), vec![Key::ESC]);
        assert_eq!(parse_keys("<cr>"), vec![Key::ENTER]);
        assert_eq!(parse_keys("<Return>"), vec![Key::ENTER]);
        assert_eq!(parse_keys("<Home>"), vec![Key::named(KeyCode::Home)]);
        assert_eq!(parse_keys("<F12>"), vec![Key::named(KeyCode::F(12))]);
    }

    #[test]
    fn ctrl_keys_fold_case() {
        assert_eq!(parse_keys("<C-v>"), vec![Key::ctrl('v')]);
        assert_eq!(parse_keys("<C-V>"), vec![Key::ctrl('v')]);
        assert!(Key::ctrl('r').is_ctrl('R'));
    }

    #[test]
    fn modifiers_on_named_keys() {
        let keys = parse_keys("<S-Right>");
        assert_eq!(keys, vec![Key::new(KeyCode::Right, Modifiers::SHIFT)]);
        assert!(keys[0].is_shifted_special());
        assert_eq!(keys[0].unshifted(), Key::named(KeyCode::Right));
    }

    #[test]
    fn escapes_for_literal_chars() {
        assert_eq!(
            parse_keys("<lt><Bar><Bslash><Space>"),
            vec![Key::char('<'), Key::char('|'), Key::char('\\'), Key::char(' ')]
        );
    }

    #[test]
    fn unknown_or_unterminated_brackets_are_literal() {
        assert_eq!(
            parse_keys("<foo>"),
            "<foo>".chars().map(Key::char).collect::<Vec<_>>()
        );
        assert_eq!(parse_keys("a<b"), vec![Key::char('a'), Key::char('<'), Key::char('b')]);
    }

    #[test]
    fn printable_excludes_ctrl() {
        assert_eq!(Key::char('x').printable(), Some('x'));
        assert_eq!(Key::ctrl('x').printable(), None);
        assert_eq!(Key::ESC.printable(), None);
    }

    #[test]
    fn notation_round_trips() {
        let text = "<Esc>:set ic<CR><C-v>j<S-Right><lt>";
        assert_eq!(to_notation(&parse_keys(text)), "<Esc>:set<Space>ic<CR><C-v>j<S-Right><lt>");
    }
}
