//! The `:` prompt: what the user types before Enter hands it to Ex.
//!
//! [`CommandLine`] is an editable string with a cursor. The state machine
//! feeds it keys through [`CommandLine::handle_key`], which reports whether
//! the line is still being edited, was submitted, or was abandoned. Parsing
//! and execution happen elsewhere (`n-script`, `n-engine`).
//!
//! | Key                    | Effect                                  |
//! |------------------------|-----------------------------------------|
//! | printable              | insert at the cursor                    |
//! | `<BS>`                 | delete before the cursor; on an empty line, abandon |
//! | `<Del>`                | delete at the cursor                    |
//! | `<Left>` `<Right>`     | move the cursor                         |
//! | `<Home>` `<End>`       | jump to start / end                     |
//! | `<C-u>`                | delete everything before the cursor     |
//! | `<C-w>`                | delete the word before the cursor       |
//! | `<CR>`                 | submit                                  |
//! | `<Esc>` `<C-c>`        | abandon                                 |

use crate::key::{Key, KeyCode};

/// What a key did to the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Still editing.
    Continue,
    /// Enter was pressed; the text to execute.
    Submit(String),
    /// The prompt was abandoned.
    Cancel,
    /// A key the prompt does not handle.
    Ignored,
}

/// The command-line input buffer.
///
/// The leading `:` is not stored.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    input: String,
    /// Char offset within `input`.
    cursor: usize,
}

impl CommandLine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    /// A prompt pre-filled with `text` (`'<,'>` after `:` in Visual mode),
    /// cursor at the end.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            input: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    fn len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert `ch` at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let at = self.char_to_byte(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert `text` at the cursor (register paste, digraph result).
    pub fn insert_str(&mut self, text: &str) {
        let at = self.char_to_byte(self.cursor);
        self.input.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Delete the char before the cursor. False at the start.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.char_to_byte(self.cursor);
        self.input.remove(at);
        true
    }

    /// Delete the char at the cursor. False at the end.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.char_to_byte(self.cursor);
        self.input.remove(at);
        true
    }

    /// `<C-u>`
    pub fn delete_to_start(&mut self) {
        let at = self.char_to_byte(self.cursor);
        self.input.replace_range(..at, "");
        self.cursor = 0;
    }

    /// `<C-w>`: blanks, then a run of keyword or non-keyword chars.
    pub fn delete_word_before(&mut self) {
        let chars: Vec<char> = self.input.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        if start > 0 {
            let keyword = crate::word::is_keyword_char(chars[start - 1]);
            while start > 0
                && !chars[start - 1].is_whitespace()
                && crate::word::is_keyword_char(chars[start - 1]) == keyword
            {
                start -= 1;
            }
        }
        let from = self.char_to_byte(start);
        let to = self.char_to_byte(self.cursor);
        self.input.replace_range(from..to, "");
        self.cursor = start;
    }

    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Apply one key.
    pub fn handle_key(&mut self, key: Key) -> LineEdit {
        if key.is_ctrl('u') {
            self.delete_to_start();
            return LineEdit::Continue;
        }
        if key.is_ctrl('w') {
            self.delete_word_before();
            return LineEdit::Continue;
        }
        if key.is_ctrl('c') {
            return LineEdit::Cancel;
        }
        if key.is_ctrl('h') {
            return self.handle_key(Key::named(KeyCode::Backspace));
        }
        if let Some(ch) = key.printable() {
            self.insert_char(ch);
            return LineEdit::Continue;
        }

        match key.code {
            KeyCode::Enter => LineEdit::Submit(std::mem::take(&mut self.input)),
            KeyCode::Escape => LineEdit::Cancel,
            KeyCode::Backspace => {
                if self.is_empty() {
                    LineEdit::Cancel
                } else {
                    self.backspace();
                    LineEdit::Continue
                }
            }
            KeyCode::Delete => {
                self.delete();
                LineEdit::Continue
            }
            KeyCode::Left => {
                self.move_left();
                LineEdit::Continue
            }
            KeyCode::Right => {
                self.move_right();
                LineEdit::Continue
            }
            KeyCode::Home => {
                self.move_home();
                LineEdit::Continue
            }
            KeyCode::End => {
                self.move_end();
                LineEdit::Continue
            }
            KeyCode::Tab => {
                self.insert_char('\t');
                LineEdit::Continue
            }
            _ => LineEdit::Ignored,
        }
    }

    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map_or(self.input.len(), |(byte_idx, _)| byte_idx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
