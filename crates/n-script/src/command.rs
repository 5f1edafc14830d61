//! Ex command-line parsing.
//!
//! A command line is `[:…][range]name[!] args`. The name is resolved
//! against [`COMMANDS`], whose entries also declare how the rest of the
//! line is read:
//!
//! | Arguments       | Commands                                  |
//! |-----------------|-------------------------------------------|
//! | none            | `undo`, `redo`                            |
//! | raw text        | `set`, `digraphs`, `normal`, the map family |
//! | expression list | `echo`, `execute`                         |
//! | `let` target    | `let`                                     |
//! | variable names  | `unlet`                                   |
//! | call            | `call`                                    |
//! | register, count | `delete`, `yank`                          |
//!
//! Parsing never touches editor state. Ranges stay symbolic until
//! [`Range::resolve`] is given the caret line and a mark lookup.

use n_editor::options::Scope;
use n_editor::register::is_register_name;

use crate::ast::Expr;
use crate::error::ScriptError;
use crate::parser::{parse_expr_list, parse_expression};

// ---------------------------------------------------------------------------
// Command table
// ---------------------------------------------------------------------------

/// Which kind of map command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    Map,
    Noremap,
    Unmap,
}

/// Resolved command identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Call,
    Delete,
    Digraphs,
    Echo,
    Execute,
    /// A range with no command: jump to its last line.
    Goto,
    Let,
    /// Map commands carry their mode prefix (`""`, `"n"`, `"v"`, `"x"`,
    /// `"s"`, `"o"`, `"i"`).
    Map(MapKind, &'static str),
    Normal,
    Redo,
    Set,
    SetGlobal,
    SetLocal,
    Undo,
    Unlet,
    Yank,
}

/// Argument grammar of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    None,
    Raw,
    Exprs,
    Let,
    Vars,
    Call,
    RegisterCount,
}

/// One command table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    /// Shortest accepted abbreviation.
    pub abbrev: &'static str,
    pub id: CommandId,
    pub args: ArgKind,
    pub bang: bool,
    pub range: bool,
}

const fn spec(
    name: &'static str,
    abbrev: &'static str,
    id: CommandId,
    args: ArgKind,
    bang: bool,
    range: bool,
) -> CommandSpec {
    CommandSpec { name, abbrev, id, args, bang, range }
}

const fn map(name: &'static str, abbrev: &'static str, kind: MapKind, prefix: &'static str) -> CommandSpec {
    // `:map!` / `:noremap!` / `:unmap!` address Insert mode.
    let bang = prefix.is_empty();
    spec(name, abbrev, CommandId::Map(kind, prefix), ArgKind::Raw, bang, false)
}

/// Every Ex command, in resolution order. Abbreviations are matched in
/// table order, so `d` finds `delete` before `digraphs`.
pub static COMMANDS: &[CommandSpec] = &[
    spec("call", "cal", CommandId::Call, ArgKind::Call, false, false),
    spec("delete", "d", CommandId::Delete, ArgKind::RegisterCount, false, true),
    spec("digraphs", "dig", CommandId::Digraphs, ArgKind::Raw, true, false),
    spec("echo", "ec", CommandId::Echo, ArgKind::Exprs, false, false),
    spec("execute", "exe", CommandId::Execute, ArgKind::Exprs, false, false),
    spec("let", "let", CommandId::Let, ArgKind::Let, false, false),
    spec("normal", "norm", CommandId::Normal, ArgKind::Raw, true, false),
    spec("redo", "red", CommandId::Redo, ArgKind::None, false, false),
    spec("set", "se", CommandId::Set, ArgKind::Raw, false, false),
    spec("setglobal", "setg", CommandId::SetGlobal, ArgKind::Raw, false, false),
    spec("setlocal", "setl", CommandId::SetLocal, ArgKind::Raw, false, false),
    spec("undo", "u", CommandId::Undo, ArgKind::None, false, false),
    spec("unlet", "unl", CommandId::Unlet, ArgKind::Vars, true, false),
    spec("yank", "y", CommandId::Yank, ArgKind::RegisterCount, false, true),
    map("map", "map", MapKind::Map, ""),
    map("nmap", "nm", MapKind::Map, "n"),
    map("vmap", "vm", MapKind::Map, "v"),
    map("xmap", "xm", MapKind::Map, "x"),
    map("smap", "smap", MapKind::Map, "s"),
    map("omap", "om", MapKind::Map, "o"),
    map("imap", "im", MapKind::Map, "i"),
    map("noremap", "no", MapKind::Noremap, ""),
    map("nnoremap", "nn", MapKind::Noremap, "n"),
    map("vnoremap", "vn", MapKind::Noremap, "v"),
    map("xnoremap", "xn", MapKind::Noremap, "x"),
    map("snoremap", "snor", MapKind::Noremap, "s"),
    map("onoremap", "ono", MapKind::Noremap, "o"),
    map("inoremap", "ino", MapKind::Noremap, "i"),
    map("unmap", "unm", MapKind::Unmap, ""),
    map("nunmap", "nun", MapKind::Unmap, "n"),
    map("vunmap", "vu", MapKind::Unmap, "v"),
    map("xunmap", "xu", MapKind::Unmap, "x"),
    map("sunmap", "sunm", MapKind::Unmap, "s"),
    map("ounmap", "ou", MapKind::Unmap, "o"),
    map("iunmap", "iu", MapKind::Unmap, "i"),
];

/// Table entry for `id`. `Goto` has none.
#[must_use]
pub fn spec_of(id: CommandId) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|s| s.id == id)
}

/// Resolve a typed command name.
///
/// Exact names win; then the first entry whose abbreviation `typed`
/// extends; then a unique full-name prefix.
///
/// # Errors
///
/// [`ScriptError::AmbiguousCommand`] when several names share the prefix,
/// [`ScriptError::NotAnEditorCommand`] when none does.
pub fn resolve_name(typed: &str) -> Result<&'static CommandSpec, ScriptError> {
    if let Some(spec) = COMMANDS.iter().find(|s| s.name == typed) {
        return Ok(spec);
    }
    if let Some(spec) = COMMANDS
        .iter()
        .find(|s| typed.starts_with(s.abbrev) && s.name.starts_with(typed))
    {
        return Ok(spec);
    }
    let mut candidates = COMMANDS.iter().filter(|s| s.name.starts_with(typed));
    match (candidates.next(), candidates.next()) {
        (Some(spec), None) => Ok(spec),
        (Some(_), Some(_)) => Err(ScriptError::AmbiguousCommand(typed.to_string())),
        _ => Err(ScriptError::NotAnEditorCommand(typed.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Base of one line address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// `.` or an address that starts with an offset.
    Current,
    /// `$`
    Last,
    /// A 1-based line number as typed.
    Number(usize),
    /// `'x`, `'<`, `'>`
    Mark(char),
}

/// One address: a base plus the sum of its `+N` / `-N` offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub base: Base,
    pub offset: i64,
}

impl Address {
    const fn current() -> Self {
        Self { base: Base::Current, offset: 0 }
    }

    /// 0-based line, before bounds checks.
    fn line(self, current: usize, last: usize, mark: &dyn Fn(char) -> Option<usize>) -> Result<i64, ScriptError> {
        let base = match self.base {
            Base::Current => current,
            Base::Last => last,
            Base::Number(0) => 0,
            Base::Number(n) => n - 1,
            Base::Mark(name) => mark(name).ok_or(ScriptError::MarkNotSet)?,
        };
        let base = i64::try_from(base).map_err(|_| ScriptError::InvalidRange)?;
        Ok(base.saturating_add(self.offset))
    }
}

/// A parsed `[range]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    /// `%`
    Whole,
    /// One address, or two. `semicolon` makes the first address the
    /// current line for the second.
    Lines { start: Address, end: Option<Address>, semicolon: bool },
}

impl Range {
    /// 0-based inclusive `(first, last)` lines. A backwards range is
    /// swapped.
    ///
    /// # Errors
    ///
    /// E16 for lines outside the buffer, E20 for an unset mark.
    pub fn resolve(
        &self,
        current: usize,
        last: usize,
        mark: &dyn Fn(char) -> Option<usize>,
    ) -> Result<(usize, usize), ScriptError> {
        let (start, end, semicolon) = match *self {
            Self::Whole => return Ok((0, last)),
            Self::Lines { start, end, semicolon } => (start, end, semicolon),
        };
        let check = |line: i64| -> Result<usize, ScriptError> {
            usize::try_from(line)
                .ok()
                .filter(|&l| l <= last)
                .ok_or(ScriptError::InvalidRange)
        };
        let first = check(start.line(current, last, mark)?)?;
        let Some(end) = end else {
            return Ok((first, first));
        };
        let anchor = if semicolon { first } else { current };
        let second = check(end.line(anchor, last, mark)?)?;
        Ok((first.min(second), first.max(second)))
    }
}

fn parse_address(input: &str) -> Result<(Option<Address>, &str), ScriptError> {
    let mut rest = input.trim_start();
    let base = match rest.chars().next() {
        Some('.') => {
            rest = &rest[1..];
            Some(Base::Current)
        }
        Some('$') => {
            rest = &rest[1..];
            Some(Base::Last)
        }
        Some('\'') => {
            let mut chars = rest[1..].chars();
            let name = chars.next().ok_or(ScriptError::InvalidRange)?;
            rest = chars.as_str();
            Some(Base::Mark(name))
        }
        Some(c) if c.is_ascii_digit() => {
            let (n, after) = leading_number(rest);
            rest = after;
            Some(Base::Number(n))
        }
        _ => None,
    };

    let mut offset: i64 = 0;
    let mut any_offset = false;
    while let Some(sign) = rest.chars().next().filter(|c| matches!(c, '+' | '-')) {
        rest = &rest[1..];
        let (n, after) = if rest.starts_with(|c: char| c.is_ascii_digit()) {
            leading_number(rest)
        } else {
            (1, rest)
        };
        rest = after;
        let n = i64::try_from(n).unwrap_or(i64::MAX);
        offset = if sign == '+' { offset.saturating_add(n) } else { offset.saturating_sub(n) };
        any_offset = true;
    }

    let address = match base {
        Some(base) => Some(Address { base, offset }),
        None if any_offset => Some(Address { offset, ..Address::current() }),
        None => None,
    };
    Ok((address, rest))
}

fn parse_range(input: &str) -> Result<(Option<Range>, &str), ScriptError> {
    if let Some(rest) = input.strip_prefix('%') {
        return Ok((Some(Range::Whole), rest));
    }
    let (first, mut rest) = parse_address(input)?;
    let mut start = first;
    let mut end = None;
    let mut semicolon = false;

    // Vim keeps the last two of any number of addresses.
    while let Some(sep) = rest.chars().next().filter(|c| matches!(c, ',' | ';')) {
        let (next, after) = parse_address(&rest[1..])?;
        let next = next.unwrap_or_else(Address::current);
        if end.is_some() {
            start = end;
        }
        if start.is_none() {
            start = Some(Address::current());
        }
        end = Some(next);
        semicolon = sep == ';';
        rest = after;
    }

    Ok((start.map(|start| Range::Lines { start, end, semicolon }), rest))
}

fn leading_number(input: &str) -> (usize, &str) {
    let end = input.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(input.len());
    let n = input[..end]
        .bytes()
        .fold(0usize, |acc, b| acc.saturating_mul(10).saturating_add(usize::from(b - b'0')));
    (n, &input[end..])
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Assignment operator of `:let`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetOp {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Concat,
}

/// What `:let` assigns to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetTarget {
    Var(String),
    Option { name: String, scope: Scope },
    Register(char),
    Env(String),
}

/// Parsed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
    None,
    Raw(String),
    Exprs(Vec<Expr>),
    Let { target: LetTarget, op: LetOp, value: Expr },
    /// `:unlet` names, or `:let` without an operator (listing).
    Vars(Vec<String>),
    Call(Expr),
    RegisterCount { register: Option<char>, count: Option<usize> },
}

/// A fully parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ExCommand {
    pub range: Option<Range>,
    pub id: CommandId,
    pub bang: bool,
    pub args: Args,
}

impl ExCommand {
    /// The name the command was resolved to, for messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        spec_of(self.id).map_or("", |s| s.name)
    }
}

/// Parse one command line (without the `:` prompt, though leading colons
/// are skipped).
///
/// An empty line parses as a [`CommandId::Goto`] with no range.
///
/// # Errors
///
/// A [`ScriptError`] naming the first problem: unknown or ambiguous
/// command, bad range, or an argument the command's grammar rejects.
pub fn parse_command(text: &str) -> Result<ExCommand, ScriptError> {
    let line = text.trim_start_matches(|c: char| c == ':' || c.is_whitespace()).trim_end();
    let (range, rest) = parse_range(line)?;
    let rest = rest.trim_start();

    let name_len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
    if name_len == 0 {
        if rest.is_empty() {
            return Ok(ExCommand { range, id: CommandId::Goto, bang: false, args: Args::None });
        }
        return Err(ScriptError::NotAnEditorCommand(line.to_string()));
    }

    let spec = resolve_name(&rest[..name_len]).map_err(|err| match err {
        ScriptError::NotAnEditorCommand(_) => ScriptError::NotAnEditorCommand(line.to_string()),
        other => other,
    })?;
    let after = &rest[name_len..];
    let (bang, after) = match after.strip_prefix('!') {
        Some(after) => (true, after),
        None => (false, after),
    };

    // The map family reads `<Space>`-sensitive text, so only strip the
    // separating blanks.
    let raw = after.trim_start();
    let args = match spec.args {
        ArgKind::None if raw.is_empty() => Args::None,
        ArgKind::None => return Err(ScriptError::TrailingCharacters(raw.to_string())),
        ArgKind::Raw => Args::Raw(raw.to_string()),
        ArgKind::Exprs => Args::Exprs(parse_expr_list(raw)?),
        ArgKind::Let => parse_let(raw)?,
        ArgKind::Vars => Args::Vars(parse_vars(raw)?),
        ArgKind::Call => parse_call(raw)?,
        ArgKind::RegisterCount => parse_register_count(raw)?,
    };

    Ok(ExCommand { range, id: spec.id, bang, args })
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == '#'
}

fn valid_variable(name: &str) -> bool {
    let bare = match name.split_once(':') {
        Some((scope, bare)) if matches!(scope, "g" | "b" | "w" | "t" | "s" | "l" | "v") => bare,
        Some(_) => return false,
        None => name,
    };
    bare.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && bare.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '#')
}

fn parse_vars(raw: &str) -> Result<Vec<String>, ScriptError> {
    let names: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
    if names.is_empty() {
        return Err(ScriptError::ArgumentRequired);
    }
    if let Some(bad) = names.iter().find(|n| !valid_variable(n)) {
        return Err(ScriptError::IllegalVariableName(bad.clone()));
    }
    Ok(names)
}

fn parse_let(raw: &str) -> Result<Args, ScriptError> {
    const OPS: &[(&str, LetOp)] = &[
        ("..=", LetOp::Concat),
        (".=", LetOp::Concat),
        ("+=", LetOp::Add),
        ("-=", LetOp::Subtract),
        ("*=", LetOp::Multiply),
        ("/=", LetOp::Divide),
        ("%=", LetOp::Modulo),
        ("=", LetOp::Assign),
    ];

    if raw.is_empty() {
        return Ok(Args::Vars(Vec::new()));
    }

    let (target, rest) = match raw.chars().next() {
        Some('&') => {
            let body = &raw[1..];
            let (scope, body) = if let Some(b) = body.strip_prefix("l:") {
                (Scope::Local, b)
            } else if let Some(b) = body.strip_prefix("g:") {
                (Scope::Global, b)
            } else {
                (Scope::Both, body)
            };
            let len = body.bytes().take_while(u8::is_ascii_alphanumeric).count();
            if len == 0 {
                return Err(ScriptError::InvalidArgument);
            }
            (LetTarget::Option { name: body[..len].to_string(), scope }, &body[len..])
        }
        Some('@') => {
            let mut chars = raw[1..].chars();
            let name = chars.next().ok_or(ScriptError::InvalidArgument)?;
            (LetTarget::Register(name), chars.as_str())
        }
        Some('$') => {
            let body = &raw[1..];
            let len = body.bytes().take_while(|b| b.is_ascii_alphanumeric() || *b == b'_').count();
            if len == 0 {
                return Err(ScriptError::InvalidArgument);
            }
            (LetTarget::Env(body[..len].to_string()), &body[len..])
        }
        _ => {
            let len = raw.find(|c: char| !is_name_char(c)).unwrap_or(raw.len());
            let name = &raw[..len];
            if !valid_variable(name) {
                let shown = raw.split_whitespace().next().unwrap_or(raw);
                return Err(ScriptError::IllegalVariableName(shown.to_string()));
            }
            (LetTarget::Var(name.to_string()), &raw[len..])
        }
    };

    let rest = rest.trim_start();
    let Some((op, value)) = OPS
        .iter()
        .find_map(|(text, op)| rest.strip_prefix(text).map(|value| (*op, value)))
    else {
        // `:let name` lists the variable.
        return match (&target, rest.is_empty()) {
            (LetTarget::Var(name), true) => Ok(Args::Vars(vec![name.clone()])),
            _ => Err(ScriptError::InvalidExpression(raw.to_string())),
        };
    };

    let value = value.trim();
    if value.is_empty() {
        return Err(ScriptError::InvalidExpression(raw.to_string()));
    }
    Ok(Args::Let { target, op, value: parse_expression(value)? })
}

fn parse_call(raw: &str) -> Result<Args, ScriptError> {
    if raw.is_empty() {
        return Err(ScriptError::FunctionNameRequired);
    }
    let expr = parse_expression(raw)?;
    if matches!(expr, Expr::Call { .. }) {
        Ok(Args::Call(expr))
    } else {
        Err(ScriptError::FunctionNameRequired)
    }
}

fn parse_register_count(raw: &str) -> Result<Args, ScriptError> {
    let mut rest = raw;
    let register = match rest.chars().next() {
        Some(c) if !c.is_ascii_digit() && is_register_name(c) => {
            rest = rest[c.len_utf8()..].trim_start();
            Some(c)
        }
        _ => None,
    };

    let count = if rest.starts_with(|c: char| c.is_ascii_digit()) {
        let (n, after) = leading_number(rest);
        if n == 0 {
            return Err(ScriptError::PositiveCountRequired);
        }
        rest = after.trim_start();
        Some(n)
    } else {
        None
    };

    if rest.is_empty() {
        Ok(Args::RegisterCount { register, count })
    } else {
        Err(ScriptError::TrailingCharacters(rest.to_string()))
    }
}

// ---------------------------------------------------------------------------
// :digraphs arguments
// ---------------------------------------------------------------------------

/// Lazily read `{char1}{char2} {number}` pairs from `:digraphs` arguments.
///
/// Items come left to right; the iterator stops after the first error so a
/// caller that applies each pair as it arrives keeps the ones before it.
#[must_use]
pub fn digraph_pairs(args: &str) -> DigraphPairs<'_> {
    DigraphPairs { tokens: args.split_whitespace(), failed: false }
}

pub struct DigraphPairs<'a> {
    tokens: std::str::SplitWhitespace<'a>,
    failed: bool,
}

impl DigraphPairs<'_> {
    fn read(&mut self, mnemonic: &str) -> Result<(char, char, char), ScriptError> {
        let mut chars = mnemonic.chars();
        let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
            return Err(ScriptError::DigraphTwoChars(mnemonic.to_string()));
        };
        let number = self.tokens.next().ok_or(ScriptError::NumberExpected)?;
        if !number.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ScriptError::NumberExpected);
        }
        let (code, _) = leading_number(number);
        let ch = u32::try_from(code)
            .ok()
            .and_then(char::from_u32)
            .ok_or(ScriptError::InvalidArgument)?;
        Ok((first, second, ch))
    }
}

impl Iterator for DigraphPairs<'_> {
    type Item = Result<(char, char, char), ScriptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mnemonic = self.tokens.next()?;
        let item = self.read(mnemonic);
        self.failed = item.is_err();
        Some(item)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
