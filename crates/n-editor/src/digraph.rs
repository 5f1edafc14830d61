//! Digraphs: two-key mnemonics for characters (`Ctrl-K a:` → `ä`).
//!
//! The default table is RFC 1345 as Vim ships it ([`digraph_table`]).
//! `:digraph` adds custom entries on top; custom entries shadow defaults
//! and are listed after them in definition order.
//!
//! Lookups try the pair as typed, then reversed, so `a:` and `:a` both
//! produce `ä` unless the reversed pair has a digraph of its own.
//!
//! [`digraph_table`]: crate::digraph_table

use std::collections::HashMap;

use unicode_width::UnicodeWidthChar;

use crate::digraph_table::SECTIONS;
use crate::error::EditorError;

/// Cell width of one listing entry.
const CELL_WIDTH: usize = 13;

/// Entries per listing line.
const ENTRIES_PER_LINE: usize = 6;

/// One line item of a `:digraphs` listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingItem {
    Header(&'static str),
    Entry { first: char, second: char, ch: char },
}

/// Default plus custom digraphs for one engine session.
#[derive(Debug, Clone)]
pub struct Digraphs {
    defaults: HashMap<(char, char), char>,
    custom: Vec<(char, char, char)>,
    custom_index: HashMap<(char, char), usize>,
}

impl Digraphs {
    /// The default table with no custom entries.
    #[must_use]
    pub fn new() -> Self {
        let mut defaults = HashMap::new();
        for (first, second, ch) in default_entries() {
            defaults.entry((first, second)).or_insert(ch);
        }
        Self {
            defaults,
            custom: Vec::new(),
            custom_index: HashMap::new(),
        }
    }

    /// Define or redefine `first second` as `ch`. A redefined digraph keeps
    /// its place in the listing.
    pub fn define(&mut self, first: char, second: char, ch: char) {
        if let Some(&index) = self.custom_index.get(&(first, second)) {
            self.custom[index].2 = ch;
        } else {
            self.custom_index.insert((first, second), self.custom.len());
            self.custom.push((first, second, ch));
        }
    }

    /// Define a digraph from a numeric code point.
    ///
    /// # Errors
    ///
    /// [`EditorError::InvalidCodepoint`] for surrogates and values past
    /// U+10FFFF.
    pub fn define_codepoint(&mut self, first: char, second: char, code: u32) -> Result<(), EditorError> {
        let ch = char::from_u32(code).ok_or(EditorError::InvalidCodepoint(code))?;
        self.define(first, second, ch);
        Ok(())
    }

    fn custom_char(&self, first: char, second: char) -> Option<char> {
        self.custom_index.get(&(first, second)).map(|&i| self.custom[i].2)
    }

    /// The character for `first second`. Custom entries win over defaults
    /// in either order; within each table the typed order comes first.
    ///
    /// # Errors
    ///
    /// [`EditorError::DigraphNotFound`] when neither order is defined.
    pub fn lookup(&self, first: char, second: char) -> Result<char, EditorError> {
        self.custom_char(first, second)
            .or_else(|| self.custom_char(second, first))
            .or_else(|| self.defaults.get(&(first, second)).copied())
            .or_else(|| self.defaults.get(&(second, first)).copied())
            .ok_or(EditorError::DigraphNotFound(first, second))
    }

    /// Custom entries in definition order.
    #[must_use]
    pub fn custom(&self) -> &[(char, char, char)] {
        &self.custom
    }

    /// Every default digraph, then every custom one. Section headers are
    /// included when `include_headers` is set; custom entries then sit
    /// under a trailing `Custom` header.
    #[must_use]
    pub fn list(&self, include_headers: bool) -> Vec<ListingItem> {
        let mut items = Vec::new();
        for section in SECTIONS {
            if let (true, Some(header)) = (include_headers, section.header) {
                items.push(ListingItem::Header(header));
            }
            items.extend(section.entries.iter().filter_map(|&(first, second, code)| {
                char::from_u32(code).map(|ch| ListingItem::Entry { first, second, ch })
            }));
        }
        if include_headers && !self.custom.is_empty() {
            items.push(ListingItem::Header("Custom"));
        }
        items.extend(
            self.custom
                .iter()
                .map(|&(first, second, ch)| ListingItem::Entry { first, second, ch }),
        );
        items
    }

    /// The listing as `:digraphs` prints it.
    #[must_use]
    pub fn format_listing(&self, include_headers: bool) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut line = String::new();
        let mut on_line = 0;
        let mut last_width = 0;

        for item in self.list(include_headers) {
            match item {
                ListingItem::Header(header) => {
                    if on_line > 0 {
                        lines.push(std::mem::take(&mut line));
                        on_line = 0;
                    }
                    lines.push(header.to_string());
                }
                ListingItem::Entry { first, second, ch } => {
                    let (text, width) = format_entry(first, second, ch);
                    if on_line == ENTRIES_PER_LINE {
                        lines.push(std::mem::take(&mut line));
                        on_line = 0;
                    }
                    if on_line > 0 {
                        let gap = CELL_WIDTH.saturating_sub(last_width).max(1);
                        line.extend(std::iter::repeat_n(' ', gap));
                    }
                    line.push_str(&text);
                    last_width = width;
                    on_line += 1;
                }
            }
        }
        if on_line > 0 {
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl Default for Digraphs {
    fn default() -> Self {
        Self::new()
    }
}

fn default_entries() -> impl Iterator<Item = (char, char, char)> {
    SECTIONS.iter().flat_map(|section| {
        section
            .entries
            .iter()
            .filter_map(|&(first, second, code)| char::from_u32(code).map(|ch| (first, second, ch)))
    })
}

/// `<first><second> <display><pad> <number>` and its measured width.
fn format_entry(first: char, second: char, ch: char) -> (String, usize) {
    let (display, width) = display_form(ch);
    // Vim stores NUL as NL internally and prints that value.
    let value = if ch == '\0' { 10 } else { u32::from(ch) };
    let number = format!("{value:>3}");
    let pad = 2usize.saturating_sub(width);
    let text = format!("{first}{second} {display}{:pad$} {number}", "");
    (text, 3 + width.max(2) + 1 + number.len())
}

/// How a character is drawn in the listing, with its measured width.
fn display_form(ch: char) -> (String, usize) {
    let code = u32::from(ch);
    match code {
        0 => ("^@".to_string(), 2),
        1..=0x1f => {
            let caret = char::from_u32(code + 0x40).unwrap_or('?');
            (format!("^{caret}"), 2)
        }
        0x7f => ("^?".to_string(), 2),
        0x80..=0x9f | 0xad => (format!("<{code:02x}>"), 4),
        _ if ch.width() == Some(0) => (format!(" {ch}"), 1),
        _ if is_right_to_left(ch) => (format!("\u{2067}{ch}\u{2069}"), 1),
        _ => (ch.to_string(), ch.len_utf16()),
    }
}

/// Strong right-to-left letters and punctuation (Hebrew, Arabic, and their
/// presentation forms). These are isolated so they do not reorder the rest
/// of the line.
const fn is_right_to_left(ch: char) -> bool {
    matches!(
        ch as u32,
        0x05d0..=0x05f4
            | 0x0608
            | 0x060b
            | 0x060d
            | 0x061b..=0x064a
            | 0x066d..=0x066f
            | 0x0671..=0x06d5
            | 0x06e5..=0x06e6
            | 0x06ee..=0x06ef
            | 0x06fa..=0x06ff
            | 0x07c0..=0x07ea
            | 0xfb1d..=0xfdff
            | 0xfe70..=0xfefc
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const LISTING: &str = include_str!("testdata/digraphs.txt");
    const LISTING_WITH_HEADERS: &str = include_str!("testdata/digraphs_headers.txt");

    fn custom_circles() -> Digraphs {
        let mut digraphs = Digraphs::new();
        digraphs.define('(', '0', '⓪');
        digraphs.define('(', '2', '②');
        digraphs.define('(', '1', '①');
        digraphs
    }

    // -- Lookup -------------------------------------------------------------

    #[test]
    fn default_lookup() {
        let digraphs = Digraphs::new();
        assert_eq!(digraphs.lookup('a', ':'), Ok('ä'));
        assert_eq!(digraphs.lookup('O', 'K'), Ok('✓'));
        assert_eq!(digraphs.lookup('N', 'U'), Ok('\0'));
    }

    #[test]
    fn reversed_pair_matches() {
        let mut digraphs = Digraphs::new();
        digraphs.define('(', '0', '⓪');
        assert_eq!(digraphs.lookup('0', '('), Ok('⓪'));
        assert_eq!(digraphs.lookup(':', 'a'), Ok('ä'));
    }

    #[test]
    fn reversed_custom_beats_direct_default() {
        let mut digraphs = Digraphs::new();
        digraphs.define('(', '0', '⓪');
        assert_eq!(digraphs.lookup('0', '('), Ok('⓪'));
        digraphs.define(':', 'a', 'x');
        assert_eq!(digraphs.lookup('a', ':'), Ok('x'));
        assert_eq!(Digraphs::new().lookup('0', '('), Ok('∝'));
    }

    #[test]
    fn redefined_reverse_keeps_its_own_char() {
        let mut digraphs = Digraphs::new();
        digraphs.define('(', '0', '⓪');
        digraphs.define('0', '(', '①');
        assert_eq!(digraphs.lookup('(', '0'), Ok('⓪'));
        assert_eq!(digraphs.lookup('0', '('), Ok('①'));
    }

    #[test]
    fn custom_overrides_default_and_custom() {
        let mut digraphs = Digraphs::new();
        digraphs.define('O', 'K', '⓪');
        assert_eq!(digraphs.lookup('O', 'K'), Ok('⓪'));
        digraphs.define('O', 'K', '✓');
        assert_eq!(digraphs.lookup('O', 'K'), Ok('✓'));
        assert_eq!(digraphs.custom().len(), 1);
    }

    #[test]
    fn astral_codepoint() {
        let mut digraphs = Digraphs::new();
        digraphs.define_codepoint('c', 'r', 128_308).unwrap();
        assert_eq!(digraphs.lookup('c', 'r'), Ok('🔴'));
    }

    #[test]
    fn surrogate_codepoint_is_rejected() {
        let mut digraphs = Digraphs::new();
        assert_eq!(
            digraphs.define_codepoint('x', 'y', 0xd800),
            Err(EditorError::InvalidCodepoint(0xd800))
        );
        assert!(digraphs.custom().is_empty());
    }

    #[test]
    fn missing_digraph() {
        let digraphs = Digraphs::new();
        assert_eq!(
            digraphs.lookup('Q', 'Q'),
            Err(EditorError::DigraphNotFound('Q', 'Q'))
        );
    }

    // -- Listing ------------------------------------------------------------

    #[test]
    fn listing_matches_vim() {
        assert_eq!(
            Digraphs::new().format_listing(false),
            LISTING.trim_end_matches('\n')
        );
    }

    #[test]
    fn listing_with_headers_matches_vim() {
        assert_eq!(
            Digraphs::new().format_listing(true),
            LISTING_WITH_HEADERS.trim_end_matches('\n')
        );
    }

    #[test]
    fn custom_entries_follow_inline() {
        let listing = custom_circles().format_listing(false);
        let expected = format!(
            "{}\nst ﬆ  64262  (0 ⓪  9450   (2 ②  9313   (1 ①  9312",
            LISTING.trim_end_matches("\nst ﬆ  64262\n")
        );
        assert_eq!(listing, expected);
    }

    #[test]
    fn custom_entries_under_header() {
        let listing = custom_circles().format_listing(true);
        let expected = format!(
            "{}\nCustom\n(0 ⓪  9450   (2 ②  9313   (1 ①  9312",
            LISTING_WITH_HEADERS.trim_end_matches('\n')
        );
        assert_eq!(listing, expected);
    }

    #[test]
    fn wide_custom_entry_gets_no_padding() {
        let mut digraphs = Digraphs::new();
        digraphs.define_codepoint('c', 'r', 128_308).unwrap();
        let listing = digraphs.format_listing(false);
        assert!(listing.ends_with("st ﬆ  64262  cr 🔴 128308"));
    }

    #[test]
    fn redefinition_keeps_listing_position() {
        let mut digraphs = custom_circles();
        digraphs.define('(', '2', '✓');
        assert!(
            digraphs
                .format_listing(false)
                .ends_with("(0 ⓪  9450   (2 ✓  10003  (1 ①  9312")
        );
    }

    #[test]
    fn every_default_listed_once() {
        let listed = Digraphs::new()
            .list(true)
            .into_iter()
            .filter(|i| matches!(i, ListingItem::Entry { .. }))
            .count();
        assert_eq!(listed, default_entries().count());
    }

    #[test]
    fn display_forms() {
        assert_eq!(display_form('\u{1b}'), ("^[".to_string(), 2));
        assert_eq!(display_form('\u{ad}'), ("<ad>".to_string(), 4));
        assert_eq!(display_form('\u{64b}'), (" \u{64b}".to_string(), 1));
        assert_eq!(display_form('א'), ("\u{2067}א\u{2069}".to_string(), 1));
        assert_eq!(display_form('،'), ("،".to_string(), 1));
    }

    // -- Properties ---------------------------------------------------------

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn mnemonic() -> impl Strategy<Value = char> {
            proptest::char::range('!', '~')
        }

        proptest! {
            #[test]
            fn lookup_is_symmetric_after_define(
                a in mnemonic(),
                b in mnemonic(),
                ch in proptest::char::any(),
            ) {
                let mut digraphs = Digraphs::new();
                digraphs.define(a, b, ch);
                prop_assert_eq!(digraphs.lookup(a, b), Ok(ch));
                prop_assert_eq!(digraphs.lookup(b, a), Ok(ch));
            }
        }
    }
}
