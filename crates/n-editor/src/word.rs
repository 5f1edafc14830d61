//! Word motions: Vim-style word and WORD navigation over a [`Host`].
//!
//! | Function                | Key       |
//! |-------------------------|-----------|
//! | [`next_word_start`]     | `w` / `W` |
//! | [`prev_word_start`]     | `b` / `B` |
//! | [`next_word_end`]       | `e` / `E` |
//!
//! A **word** is a run of word characters (letters, digits, underscore) or
//! a run of other non-blank characters: `hello.world` has three words. A
//! **WORD** is a run of non-blanks: `hello.world` is one WORD. An empty
//! line counts as a word for `w` and `b`.
//!
//! All functions take and return char offsets. [`next_word_start`] returns
//! the buffer length when there is no next word, which is the exclusive
//! end operators want; callers clamp it for caret moves.

use crate::host::Host;

/// Which notion of "word" a motion uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    /// `w b e`
    Word,
    /// `W B E`
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Keyword,
    Punctuation,
    Blank,
    Newline,
}

/// True for chars that form keywords (`iskeyword` default).
#[must_use]
pub fn is_keyword_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn class_of(ch: char, kind: WordKind) -> Class {
    if ch == '\n' {
        Class::Newline
    } else if ch.is_whitespace() {
        Class::Blank
    } else if kind == WordKind::Big || is_keyword_char(ch) {
        Class::Keyword
    } else {
        Class::Punctuation
    }
}

fn class_at(host: &dyn Host, offset: usize, kind: WordKind) -> Class {
    host.char_at(offset).map_or(Class::Newline, |ch| class_of(ch, kind))
}

const fn is_text(class: Class) -> bool {
    matches!(class, Class::Keyword | Class::Punctuation)
}

/// `w` / `W`: start of the next word, or the buffer length.
#[must_use]
pub fn next_word_start(host: &dyn Host, offset: usize, kind: WordKind) -> usize {
    let total = host.len_chars();
    if offset >= total {
        return total;
    }

    let mut at = offset;
    let start = class_at(host, at, kind);
    if is_text(start) {
        while at < total && class_at(host, at, kind) == start {
            at += 1;
        }
    }

    while at < total {
        match class_at(host, at, kind) {
            Class::Keyword | Class::Punctuation => break,
            Class::Blank => at += 1,
            Class::Newline => {
                at += 1;
                // Landing on an empty line stops the motion.
                if at < total && class_at(host, at, kind) == Class::Newline {
                    break;
                }
            }
        }
    }
    at
}

/// `b` / `B`: start of the previous word (or of an empty line).
#[must_use]
pub fn prev_word_start(host: &dyn Host, offset: usize, kind: WordKind) -> usize {
    if offset == 0 {
        return 0;
    }
    let mut at = offset.min(host.len_chars()) - 1;

    loop {
        match class_at(host, at, kind) {
            Class::Keyword | Class::Punctuation => break,
            Class::Newline => {
                let line = host.line_of(at);
                if host.line_len(line) == 0 && at < offset {
                    return host.line_start(line);
                }
                if at == 0 {
                    return 0;
                }
                at -= 1;
            }
            Class::Blank => {
                if at == 0 {
                    return 0;
                }
                at -= 1;
            }
        }
    }

    let class = class_at(host, at, kind);
    while at > 0 && class_at(host, at - 1, kind) == class {
        at -= 1;
    }
    at
}

/// `e` / `E`: last char of the current or next word. Stays put when there
/// is none.
#[must_use]
pub fn next_word_end(host: &dyn Host, offset: usize, kind: WordKind) -> usize {
    let total = host.len_chars();
    let last = total.saturating_sub(1);
    if total == 0 || offset >= last {
        return offset;
    }

    let mut at = offset + 1;
    while at < total && !is_text(class_at(host, at, kind)) {
        at += 1;
    }
    if at >= total {
        return offset;
    }

    let class = class_at(host, at, kind);
    while at < last && class_at(host, at + 1, kind) == class {
        at += 1;
    }
    at
}

/// Last char of the run of same-class chars under `offset` (`cw`, which
/// changes to the end of the current word rather than the next start).
#[must_use]
pub fn current_word_end(host: &dyn Host, offset: usize, kind: WordKind) -> usize {
    let total = host.len_chars();
    let class = class_at(host, offset, kind);
    if class == Class::Newline {
        return offset;
    }
    let mut at = offset;
    while at + 1 < total && class_at(host, at + 1, kind) == class {
        at += 1;
    }
    at
}

/// The keyword under or after `offset` on its line, as `(start, end)`.
#[must_use]
pub fn keyword_at(host: &dyn Host, offset: usize) -> Option<(usize, usize)> {
    let line = host.line_of(offset);
    let end_of_line = host.line_end(line);
    let mut start = offset;
    while start < end_of_line && !host.char_at(start).is_some_and(is_keyword_char) {
        start += 1;
    }
    if start >= end_of_line {
        return None;
    }
    let line_start = host.line_start(line);
    while start > line_start && host.char_at(start - 1).is_some_and(is_keyword_char) {
        start -= 1;
    }
    let mut end = start;
    while end < end_of_line && host.char_at(end).is_some_and(is_keyword_char) {
        end += 1;
    }
    Some((start, end))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn w(text: &str, from: usize) -> usize {
        next_word_start(&MemoryHost::new(text), from, WordKind::Word)
    }

    fn b(text: &str, from: usize) -> usize {
        prev_word_start(&MemoryHost::new(text), from, WordKind::Word)
    }

    fn e(text: &str, from: usize) -> usize {
        next_word_end(&MemoryHost::new(text), from, WordKind::Word)
    }

    // -- Classification -----------------------------------------------------

    #[test]
    fn classes() {
        assert_eq!(class_of('a', WordKind::Word), Class::Keyword);
        assert_eq!(class_of('_', WordKind::Word), Class::Keyword);
        assert_eq!(class_of('.', WordKind::Word), Class::Punctuation);
        assert_eq!(class_of('.', WordKind::Big), Class::Keyword);
        assert_eq!(class_of('\t', WordKind::Big), Class::Blank);
        assert_eq!(class_of('\n', WordKind::Word), Class::Newline);
        assert_eq!(class_of('é', WordKind::Word), Class::Keyword);
    }

    // -- w ------------------------------------------------------------------

    #[test]
    fn w_simple() {
        assert_eq!(w("hello world", 0), 6);
        assert_eq!(w("hello world", 2), 6);
        assert_eq!(w("hello    world", 0), 9);
    }

    #[test]
    fn w_punctuation_boundary() {
        assert_eq!(w("foo.bar", 0), 3);
        assert_eq!(w("foo.bar", 3), 4);
        assert_eq!(w("a += b", 2), 5);
    }

    #[test]
    fn w_across_lines_and_blank_lines() {
        assert_eq!(w("foo\nbar", 0), 4);
        assert_eq!(w("foo\n\nbar", 0), 4);
        assert_eq!(w("foo\n\nbar", 4), 5);
        // A whitespace-only line is not a stop.
        assert_eq!(w("foo\n   \nbar", 0), 8);
    }

    #[test]
    fn w_last_word_reaches_end() {
        assert_eq!(w("hello", 0), 5);
        assert_eq!(w("", 0), 0);
    }

    #[test]
    fn big_w_skips_punctuation() {
        let host = MemoryHost::new("foo.bar baz");
        assert_eq!(next_word_start(&host, 0, WordKind::Big), 8);
    }

    // -- b ------------------------------------------------------------------

    #[test]
    fn b_simple() {
        assert_eq!(b("hello world", 6), 0);
        assert_eq!(b("hello world", 8), 6);
        assert_eq!(b("foo.bar", 4), 3);
    }

    #[test]
    fn b_stops_at_empty_line() {
        assert_eq!(b("foo\n\nbar", 5), 4);
        assert_eq!(b("foo\n\nbar", 4), 0);
    }

    #[test]
    fn b_at_start_stays() {
        assert_eq!(b("abc", 0), 0);
        assert_eq!(b("   abc", 2), 0);
    }

    // -- e ------------------------------------------------------------------

    #[test]
    fn e_simple() {
        assert_eq!(e("hello world", 0), 4);
        assert_eq!(e("hello world", 4), 10);
        assert_eq!(e("foo.bar", 0), 2);
        assert_eq!(e("foo.bar", 2), 3);
    }

    #[test]
    fn e_skips_blank_lines() {
        assert_eq!(e("ab\n\n\ncd", 1), 6);
    }

    #[test]
    fn e_at_end_stays() {
        assert_eq!(e("abc", 2), 2);
        assert_eq!(e("", 0), 0);
    }

    #[test]
    fn current_word_end_stays_in_run() {
        let host = MemoryHost::new("foo.bar  baz");
        assert_eq!(current_word_end(&host, 0, WordKind::Word), 2);
        assert_eq!(current_word_end(&host, 2, WordKind::Word), 2);
        assert_eq!(current_word_end(&host, 0, WordKind::Big), 6);
        assert_eq!(current_word_end(&host, 7, WordKind::Word), 8);
    }

    // -- Keyword under caret ------------------------------------------------

    #[test]
    fn keyword_under_or_after_caret() {
        let host = MemoryHost::new("  foo_bar(x)");
        assert_eq!(keyword_at(&host, 0), Some((2, 9)));
        assert_eq!(keyword_at(&host, 5), Some((2, 9)));
        assert_eq!(keyword_at(&host, 9), Some((10, 11)));
        assert_eq!(keyword_at(&MemoryHost::new("..."), 0), None);
    }
}
