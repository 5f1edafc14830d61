//! Tokenizer for Vimscript expressions.
//!
//! The lexer runs over the whole expression text up front. Each token keeps
//! its byte offset so parse errors can quote the rest of the input, and
//! whether whitespace preceded it, which the parser needs to tell `d.key`
//! (member access) from `d . key` (concatenation).

use n_editor::key::{Key, KeyCode, parse_keys};
use n_editor::options::Scope;

use crate::error::ScriptError;

/// Comparison operator, before the case suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Match,
    NoMatch,
    Is,
    IsNot,
}

/// How a comparison treats letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    /// Plain spelling: follows `ignorecase`.
    Default,
    /// `#` suffix.
    Match,
    /// `?` suffix.
    Ignore,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(i64),
    Float(f64),
    Str(String),
    Blob(Vec<u8>),
    /// Variable or function name, scope prefix included (`g:x`, `v:true`).
    Ident(String),
    Option { name: String, scope: Scope },
    Register(char),
    Env(String),

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    /// `#{`, a dictionary with literal keys.
    HashBrace,
    RBrace,
    Comma,
    Colon,
    Question,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Dot,
    DotDot,
    Bang,
    AndAnd,
    OrOr,
    Compare(CompareOp, CaseMode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset in the source.
    pub start: usize,
    /// Whitespace came right before this token.
    pub spaced: bool,
}

/// Tokenize `source`.
///
/// # Errors
///
/// Unterminated strings (E114, E115), malformed blobs (E973), and chars no
/// token starts with (E15).
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScriptError> {
    let mut lexer = Lexer { src: source, pos: 0 };
    let mut tokens = Vec::new();
    loop {
        let before = lexer.pos;
        lexer.skip_blanks();
        let spaced = lexer.pos > before;
        let Some(ch) = lexer.peek() else { break };
        let start = lexer.pos;
        let kind = lexer.token(ch)?;
        tokens.push(Token { kind, start, spaced });
    }
    Ok(tokens)
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl Lexer<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn invalid(&self, start: usize) -> ScriptError {
        ScriptError::InvalidExpression(self.src[start..].to_string())
    }

    fn token(&mut self, ch: char) -> Result<TokenKind, ScriptError> {
        let start = self.pos;
        if ch.is_ascii_digit() {
            return self.number();
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            return Ok(self.identifier());
        }
        self.bump();
        let kind = match ch {
            '\'' => TokenKind::Str(self.single_quoted(start)?),
            '"' => TokenKind::Str(self.double_quoted(start)?),
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '#' if self.eat('{') => TokenKind::HashBrace,
            '.' if self.eat('.') => TokenKind::DotDot,
            '.' => TokenKind::Dot,
            '&' if self.eat('&') => TokenKind::AndAnd,
            '&' => self.option(start)?,
            '|' if self.eat('|') => TokenKind::OrOr,
            '@' => TokenKind::Register(self.bump().unwrap_or('"')),
            '$' => {
                let name = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                if name.is_empty() {
                    return Err(self.invalid(start));
                }
                TokenKind::Env(name.to_string())
            }
            '=' if self.eat('=') => self.compare(CompareOp::Equal),
            '=' if self.eat('~') => self.compare(CompareOp::Match),
            '!' if self.eat('=') => self.compare(CompareOp::NotEqual),
            '!' if self.eat('~') => self.compare(CompareOp::NoMatch),
            '!' => TokenKind::Bang,
            '>' if self.eat('=') => self.compare(CompareOp::GreaterEqual),
            '>' => self.compare(CompareOp::Greater),
            '<' if self.eat('=') => self.compare(CompareOp::LessEqual),
            '<' => self.compare(CompareOp::Less),
            _ => return Err(self.invalid(start)),
        };
        Ok(kind)
    }

    fn compare(&mut self, op: CompareOp) -> TokenKind {
        let case = if self.eat('#') {
            CaseMode::Match
        } else if self.eat('?') {
            CaseMode::Ignore
        } else {
            CaseMode::Default
        };
        TokenKind::Compare(op, case)
    }

    // -- Names --------------------------------------------------------------

    fn identifier(&mut self) -> TokenKind {
        let start = self.pos;
        let first = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_').to_string();

        // `g:name`, `v:true`; a lone `a:b` in a slice stays three tokens
        // only when written with spaces.
        let scoped = first.len() == 1
            && matches!(first.as_bytes()[0], b'g' | b'b' | b'w' | b't' | b's' | b'l' | b'a' | b'v')
            && self.peek() == Some(':')
            && self.peek_at(1).is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if scoped {
            self.bump();
            self.take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '#');
            return TokenKind::Ident(self.src[start..self.pos].to_string());
        }

        match first.as_str() {
            "is" => self.compare(CompareOp::Is),
            "isnot" => self.compare(CompareOp::IsNot),
            _ => TokenKind::Ident(first),
        }
    }

    fn option(&mut self, start: usize) -> Result<TokenKind, ScriptError> {
        let scope = match (self.peek(), self.peek_at(1)) {
            (Some('l'), Some(':')) => Scope::Local,
            (Some('g'), Some(':')) => Scope::Global,
            _ => Scope::Both,
        };
        if scope != Scope::Both {
            self.pos += 2;
        }
        let name = self.take_while(|c| c.is_ascii_alphanumeric());
        if name.is_empty() {
            return Err(self.invalid(start));
        }
        Ok(TokenKind::Option { name: name.to_string(), scope })
    }

    // -- Numbers ------------------------------------------------------------

    fn number(&mut self) -> Result<TokenKind, ScriptError> {
        let start = self.pos;
        let prefix = self.rest().get(..2).map(str::to_ascii_lowercase);
        let radix = match prefix.as_deref() {
            Some("0x") if self.peek_at(2).is_some_and(|c| c.is_ascii_hexdigit()) => 16,
            Some("0b") if self.peek_at(2).is_some_and(|c| c == '0' || c == '1') => 2,
            Some("0o") if self.peek_at(2).is_some_and(|c| ('0'..='7').contains(&c)) => 8,
            Some("0z") => return self.blob(),
            _ => 10,
        };
        if radix != 10 {
            self.pos += 2;
            let digits = self.take_while(|c| c.is_digit(radix));
            return Ok(TokenKind::Number(parse_radix(digits, radix)));
        }

        let digits = self.take_while(|c| c.is_ascii_digit()).to_string();
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.take_while(|c| c.is_ascii_digit());
            self.exponent();
            return self.src[start..self.pos]
                .parse()
                .map(TokenKind::Float)
                .map_err(|_| self.invalid(start));
        }

        let octal = digits.len() > 1 && digits.starts_with('0') && digits.bytes().all(|b| b < b'8');
        Ok(TokenKind::Number(parse_radix(&digits, if octal { 8 } else { 10 })))
    }

    fn exponent(&mut self) {
        let save = self.pos;
        if !matches!(self.peek(), Some('e' | 'E')) {
            return;
        }
        self.bump();
        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
        }
        if self.take_while(|c| c.is_ascii_digit()).is_empty() {
            self.pos = save;
        }
    }

    fn blob(&mut self) -> Result<TokenKind, ScriptError> {
        self.pos += 2;
        let mut bytes = Vec::new();
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                    self.pos += 2;
                    let pair = format!("{hi}{lo}");
                    bytes.push(u8::from_str_radix(&pair, 16).map_err(|_| ScriptError::OddBlobLiteral)?);
                }
                (Some(hi), _) if hi.is_ascii_hexdigit() => return Err(ScriptError::OddBlobLiteral),
                (Some('.'), Some(next)) if next.is_ascii_hexdigit() && !bytes.is_empty() => {
                    self.bump();
                }
                _ => break,
            }
        }
        Ok(TokenKind::Blob(bytes))
    }

    // -- Strings ------------------------------------------------------------

    fn single_quoted(&mut self, start: usize) -> Result<String, ScriptError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') if self.eat('\'') => out.push('\''),
                Some('\'') => return Ok(out),
                Some(ch) => out.push(ch),
                None => return Err(ScriptError::MissingSingleQuote(self.src[start..].to_string())),
            }
        }
    }

    fn double_quoted(&mut self, start: usize) -> Result<String, ScriptError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => self.escape(&mut out),
                Some(ch) => out.push(ch),
                None => return Err(ScriptError::MissingDoubleQuote(self.src[start..].to_string())),
            }
        }
    }

    fn escape(&mut self, out: &mut String) {
        let Some(ch) = self.bump() else {
            out.push('\\');
            return;
        };
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'e' => out.push('\x1b'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'x' | 'X' => self.code_point(out, 2, 'x'),
            'u' => self.code_point(out, 4, 'u'),
            'U' => self.code_point(out, 8, 'U'),
            '0'..='7' => {
                let mut value = ch.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(value));
            }
            '<' => match self.key_notation() {
                Some(text) => out.push_str(&text),
                None => out.push('<'),
            },
            other => out.push(other),
        }
    }

    fn code_point(&mut self, out: &mut String, max: usize, letter: char) {
        let digits = {
            let rest = self.rest();
            let len = rest.bytes().take(max).take_while(u8::is_ascii_hexdigit).count();
            &rest[..len]
        };
        if digits.is_empty() {
            out.push(letter);
            return;
        }
        let len = digits.len();
        out.extend(u32::from_str_radix(digits, 16).ok().and_then(char::from_u32));
        self.pos += len;
    }

    /// `\<Esc>` and friends inside a double-quoted string.
    fn key_notation(&mut self) -> Option<String> {
        let end = self.rest().find('>')?;
        let notation = &self.rest()[..=end];
        let keys = parse_keys(&format!("<{notation}"));
        let [key] = keys.as_slice() else { return None };
        let text = key_text(*key)?;
        self.pos += end + 1;
        Some(text)
    }
}

fn parse_radix(digits: &str, radix: u32) -> i64 {
    digits.chars().filter_map(|c| c.to_digit(radix)).fold(0i64, |acc, d| {
        acc.saturating_mul(i64::from(radix)).saturating_add(i64::from(d))
    })
}

/// The raw text a key stands for, when it has one.
fn key_text(key: Key) -> Option<String> {
    if key.modifiers.is_empty() {
        let ch = match key.code {
            KeyCode::Char(c) => c,
            KeyCode::Escape => '\x1b',
            KeyCode::Enter => '\r',
            KeyCode::Tab => '\t',
            KeyCode::Backspace => '\x08',
            KeyCode::Delete => '\x7f',
            _ => return None,
        };
        return Some(ch.to_string());
    }
    match key.code {
        KeyCode::Char(c) if key.is_ctrl(c) && c.is_ascii_alphabetic() => {
            char::from_u32(u32::from(c.to_ascii_uppercase()) - 0x40).map(String::from)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    // -- Numbers ------------------------------------------------------------

    #[test]
    fn number_literals() {
        assert_eq!(
            kinds("35 0xFF 0b101 017 019 0o17"),
            vec![
                TokenKind::Number(35),
                TokenKind::Number(255),
                TokenKind::Number(5),
                TokenKind::Number(15),
                TokenKind::Number(19),
                TokenKind::Number(15),
            ]
        );
    }

    #[test]
    fn floats_need_digits_after_the_point() {
        assert_eq!(kinds("1.5"), vec![TokenKind::Float(1.5)]);
        assert_eq!(kinds("1.0e3"), vec![TokenKind::Float(1000.0)]);
        assert_eq!(kinds("2.5e-1"), vec![TokenKind::Float(0.25)]);
        assert_eq!(kinds("1..2"), vec![TokenKind::Number(1), TokenKind::DotDot, TokenKind::Number(2)]);
    }

    #[test]
    fn blobs() {
        assert_eq!(kinds("0zFF00"), vec![TokenKind::Blob(vec![0xff, 0])]);
        assert_eq!(kinds("0zFF.00.01"), vec![TokenKind::Blob(vec![0xff, 0, 1])]);
        assert_eq!(kinds("0z"), vec![TokenKind::Blob(vec![])]);
        assert_eq!(tokenize("0zF"), Err(ScriptError::OddBlobLiteral));
    }

    // -- Strings ------------------------------------------------------------

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(kinds(r"'it''s\n'"), vec![TokenKind::Str("it's\\n".into())]);
        assert_eq!(
            tokenize("'open"),
            Err(ScriptError::MissingSingleQuote("'open".into()))
        );
    }

    #[test]
    fn double_quote_escapes() {
        assert_eq!(
            kinds(r#""a\tb\n\"\\\e\x41ä\101""#),
            vec![TokenKind::Str("a\tb\n\"\\\x1bAäA".into())]
        );
        assert_eq!(kinds(r#""\<Esc>x\<CR>""#), vec![TokenKind::Str("\x1bx\r".into())]);
        assert_eq!(kinds(r#""\<C-a>""#), vec![TokenKind::Str("\x01".into())]);
        assert_eq!(
            tokenize("\"open"),
            Err(ScriptError::MissingDoubleQuote("\"open".into()))
        );
    }

    // -- Names and operators ------------------------------------------------

    #[test]
    fn scoped_names_and_sigils() {
        assert_eq!(
            kinds("g:x v:true &ts &l:sw @a $HOME"),
            vec![
                TokenKind::Ident("g:x".into()),
                TokenKind::Ident("v:true".into()),
                TokenKind::Option { name: "ts".into(), scope: Scope::Both },
                TokenKind::Option { name: "sw".into(), scope: Scope::Local },
                TokenKind::Register('a'),
                TokenKind::Env("HOME".into()),
            ]
        );
    }

    #[test]
    fn comparison_suffixes() {
        assert_eq!(
            kinds("==# !=? =~ isnot# is"),
            vec![
                TokenKind::Compare(CompareOp::Equal, CaseMode::Match),
                TokenKind::Compare(CompareOp::NotEqual, CaseMode::Ignore),
                TokenKind::Compare(CompareOp::Match, CaseMode::Default),
                TokenKind::Compare(CompareOp::IsNot, CaseMode::Match),
                TokenKind::Compare(CompareOp::Is, CaseMode::Default),
            ]
        );
    }

    #[test]
    fn spacing_is_recorded() {
        let tokens = tokenize("d.k . x").unwrap();
        let spaced: Vec<bool> = tokens.iter().map(|t| t.spaced).collect();
        assert_eq!(spaced, vec![false, false, false, true, true]);
        assert_eq!(tokens[3].start, 4);
    }

    #[test]
    fn stray_char_is_invalid() {
        assert_eq!(tokenize("1 ` 2"), Err(ScriptError::InvalidExpression("` 2".into())));
    }
}
