//! Registers: where yanks and deletes land and where `p` reads from.
//!
//! | Name          | Written by                              |
//! |---------------|-----------------------------------------|
//! | `"`  unnamed  | every yank and delete                   |
//! | `0`           | yanks without an explicit register      |
//! | `1`–`9`       | line-wise or multi-line deletes, shifted|
//! | `-`           | small (within one line) deletes         |
//! | `a`–`z`       | explicit `"x`; `"X` appends             |
//! | `_`           | nothing (black hole)                    |
//!
//! Text keeps its capture kind: line-wise text always ends in `\n` and
//! pastes as whole lines.

/// How the register content was captured. Decides how `p` pastes it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RegisterKind {
    /// Pasted inline at the caret.
    #[default]
    Char,
    /// Pasted as whole lines above or below the caret line.
    Line,
}

/// Whether text arrives from a yank or a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Yank,
    Delete,
}

/// One register slot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Register {
    content: String,
    kind: RegisterKind,
}

impl Register {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            content: String::new(),
            kind: RegisterKind::Char,
        }
    }

    fn store(&mut self, text: String, kind: RegisterKind) {
        self.content = text;
        self.kind = kind;
    }

    /// Append `text`. Either side being line-wise makes the result
    /// line-wise with a line break between the parts.
    fn append(&mut self, text: &str, kind: RegisterKind) {
        if kind == RegisterKind::Line || self.kind == RegisterKind::Line {
            if !self.content.is_empty() && !self.content.ends_with('\n') {
                self.content.push('\n');
            }
            self.content.push_str(text);
            self.kind = RegisterKind::Line;
        } else {
            self.content.push_str(text);
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn kind(&self) -> RegisterKind {
        self.kind
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// All registers of one engine session.
#[derive(Debug, Default)]
pub struct RegisterFile {
    unnamed: Register,
    last_yank: Register,
    small_delete: Register,
    numbered: [Register; 9],
    named: [Register; 26],
}

/// Valid register names for `"x`, `@x`, and `:delete x`.
#[must_use]
pub const fn is_register_name(name: char) -> bool {
    matches!(name, '"' | '0'..='9' | '-' | '_' | 'a'..='z' | 'A'..='Z')
}

fn letter_index(name: char) -> usize {
    (u32::from(name.to_ascii_lowercase()) - u32::from('a')) as usize
}

fn digit_index(name: char) -> usize {
    (u32::from(name) - u32::from('1')) as usize
}

impl RegisterFile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record captured text.
    ///
    /// `name` is the register selected with `"x` (or `None`). The unnamed
    /// register always mirrors what was written, except for `"_`.
    pub fn record(&mut self, name: Option<char>, text: String, kind: RegisterKind, capture: Capture) {
        match name {
            Some('_') => return,
            Some(ch @ 'a'..='z') => self.named[letter_index(ch)].store(text.clone(), kind),
            Some(ch @ 'A'..='Z') => {
                let slot = &mut self.named[letter_index(ch)];
                slot.append(&text, kind);
                self.unnamed = slot.clone();
                return;
            }
            Some(ch @ '1'..='9') => self.numbered[digit_index(ch)].store(text.clone(), kind),
            Some('0') => self.last_yank.store(text.clone(), kind),
            Some('-') => self.small_delete.store(text.clone(), kind),
            _ => match capture {
                Capture::Yank => self.last_yank.store(text.clone(), kind),
                Capture::Delete if kind == RegisterKind::Line || text.contains('\n') => {
                    self.numbered.rotate_right(1);
                    self.numbered[0].store(text.clone(), kind);
                }
                Capture::Delete => self.small_delete.store(text.clone(), kind),
            },
        }
        self.unnamed.store(text, kind);
    }

    /// Set a register from a script (`let @a = ...`). Text ending in a line
    /// break is line-wise.
    pub fn set(&mut self, name: char, text: &str) {
        let kind = if text.ends_with('\n') {
            RegisterKind::Line
        } else {
            RegisterKind::Char
        };
        let capture = if name == '"' { Capture::Yank } else { Capture::Delete };
        let target = (name != '"').then_some(name);
        self.record(target, text.to_string(), kind, capture);
    }

    /// The register to read. Upper case reads the lower-case register;
    /// unknown names and `"` read the unnamed register; `"_` is always
    /// empty.
    #[must_use]
    pub fn get(&self, name: Option<char>) -> &Register {
        const EMPTY: &Register = &Register::new();
        match name {
            Some(ch) if ch.is_ascii_alphabetic() => &self.named[letter_index(ch)],
            Some(ch @ '1'..='9') => &self.numbered[digit_index(ch)],
            Some('0') => &self.last_yank,
            Some('-') => &self.small_delete,
            Some('_') => EMPTY,
            _ => &self.unnamed,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Slots ───────────────────────────────────────────────────────────

    #[test]
    fn new_register_is_empty_char() {
        let reg = Register::new();
        assert!(reg.is_empty());
        assert_eq!(reg.kind(), RegisterKind::Char);
    }

    #[test]
    fn append_line_to_char_upgrades_kind() {
        let mut reg = Register::new();
        reg.store("first".into(), RegisterKind::Char);
        reg.append("second\n", RegisterKind::Line);
        assert_eq!(reg.content(), "first\nsecond\n");
        assert_eq!(reg.kind(), RegisterKind::Line);
    }

    #[test]
    fn append_char_to_char_concatenates() {
        let mut reg = Register::new();
        reg.store("foo".into(), RegisterKind::Char);
        reg.append("bar", RegisterKind::Char);
        assert_eq!(reg.content(), "foobar");
    }

    // ── Routing ─────────────────────────────────────────────────────────

    #[test]
    fn yank_fills_unnamed_and_zero() {
        let mut rf = RegisterFile::new();
        rf.record(None, "hello".into(), RegisterKind::Char, Capture::Yank);
        assert_eq!(rf.get(None).content(), "hello");
        assert_eq!(rf.get(Some('0')).content(), "hello");
    }

    #[test]
    fn named_yank_leaves_zero_alone() {
        let mut rf = RegisterFile::new();
        rf.record(Some('a'), "world\n".into(), RegisterKind::Line, Capture::Yank);
        assert_eq!(rf.get(Some('a')).content(), "world\n");
        assert_eq!(rf.get(Some('a')).kind(), RegisterKind::Line);
        assert_eq!(rf.get(None).content(), "world\n");
        assert!(rf.get(Some('0')).is_empty());
    }

    #[test]
    fn uppercase_appends() {
        let mut rf = RegisterFile::new();
        rf.record(Some('a'), "hello".into(), RegisterKind::Char, Capture::Yank);
        rf.record(Some('A'), " world".into(), RegisterKind::Char, Capture::Yank);
        assert_eq!(rf.get(Some('a')).content(), "hello world");
        assert_eq!(rf.get(Some('A')).content(), "hello world");
        assert_eq!(rf.get(None).content(), "hello world");
    }

    #[test]
    fn line_deletes_shift_numbered() {
        let mut rf = RegisterFile::new();
        rf.record(None, "one\n".into(), RegisterKind::Line, Capture::Delete);
        rf.record(None, "two\n".into(), RegisterKind::Line, Capture::Delete);
        assert_eq!(rf.get(Some('1')).content(), "two\n");
        assert_eq!(rf.get(Some('2')).content(), "one\n");
        assert!(rf.get(Some('-')).is_empty());
    }

    #[test]
    fn small_delete_goes_to_minus() {
        let mut rf = RegisterFile::new();
        rf.record(None, "x".into(), RegisterKind::Char, Capture::Delete);
        assert_eq!(rf.get(Some('-')).content(), "x");
        assert!(rf.get(Some('1')).is_empty());
        assert_eq!(rf.get(None).content(), "x");
    }

    #[test]
    fn black_hole_discards() {
        let mut rf = RegisterFile::new();
        rf.record(None, "keep".into(), RegisterKind::Char, Capture::Yank);
        rf.record(Some('_'), "gone".into(), RegisterKind::Char, Capture::Delete);
        assert_eq!(rf.get(None).content(), "keep");
        assert!(rf.get(Some('_')).is_empty());
    }

    #[test]
    fn script_set_infers_kind() {
        let mut rf = RegisterFile::new();
        rf.set('b', "line\n");
        assert_eq!(rf.get(Some('b')).kind(), RegisterKind::Line);
        rf.set('"', "word");
        assert_eq!(rf.get(None).content(), "word");
        assert_eq!(rf.get(None).kind(), RegisterKind::Char);
    }

    #[test]
    fn register_names() {
        assert!(is_register_name('a'));
        assert!(is_register_name('Z'));
        assert!(is_register_name('"'));
        assert!(is_register_name('_'));
        assert!(!is_register_name('!'));
    }

    #[test]
    fn all_26_named_registers() {
        let mut rf = RegisterFile::new();
        for (i, ch) in ('a'..='z').enumerate() {
            rf.record(Some(ch), format!("reg_{i}"), RegisterKind::Char, Capture::Yank);
        }
        for (i, ch) in ('a'..='z').enumerate() {
            assert_eq!(rf.get(Some(ch)).content(), format!("reg_{i}"));
        }
    }
}
