//! Editor options: the registry behind `:set`, `&option`, and `let &option`.
//!
//! Every option is declared once in [`OPTIONS`] with its name, abbreviation,
//! scope, type, default, and token grammar. [`Options`] holds the current
//! values for one engine session and notifies subscribers after each change.
//!
//! # Scopes
//!
//! | Declared scope | `Scope::Global`  | `Scope::Local`          | `Scope::Both` (`:set`)        |
//! |----------------|------------------|-------------------------|-------------------------------|
//! | global         | the value        | the value               | the value                     |
//! | local          | default for new windows | this window's value | both                      |
//! | global-local   | global value     | local override, else global | global, clears the override |
//!
//! # `:set` syntax
//!
//! | Syntax            | Effect                                   |
//! |-------------------|------------------------------------------|
//! | `:set opt`        | enable boolean / show value              |
//! | `:set noopt`      | disable boolean                          |
//! | `:set opt!`, `invopt` | toggle boolean                       |
//! | `:set opt?`       | show value                               |
//! | `:set opt&`       | reset to default                         |
//! | `:set opt=val`    | assign (`:` works too)                   |
//! | `:set opt+=val`   | add / append / append list tokens        |
//! | `:set opt-=val`   | subtract / remove                        |
//! | `:set opt^=val`   | multiply / prepend                       |
//! | `:set`, `:set all`| show changed / all options               |
//!
//! # List options
//!
//! List values are comma-separated tokens, each parsed by the option's
//! [`Grammar`]. Parsing stops at the first bad token; the tokens before it
//! stay applied and listeners still fire, then the error is returned.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::EditorError;
use crate::guicursor::{
    CursorAttributes, CursorMode, DEFAULT_GUICURSOR, GuiCursorEntry, effective_attributes,
};

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// Where an option's value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionScope {
    Global,
    Local,
    GlobalLocal,
}

/// Which value a read or write addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `:setglobal`, `&g:name`
    Global,
    /// `:setlocal`, `&l:name`
    Local,
    /// `:set`, `&name`. Reads the effective value.
    Both,
}

/// Declared value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Bool,
    Number,
    String,
    List,
}

/// Default value as written in the declaration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    Number(i64),
    Text(&'static str),
}

/// What string and list tokens may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Any,
    OneOf(&'static [&'static str]),
    GuiCursor,
}

/// One declared option.
#[derive(Debug)]
pub struct OptionDef {
    pub name: &'static str,
    pub abbrev: &'static str,
    pub scope: OptionScope,
    pub kind: OptionType,
    pub default: DefaultValue,
    pub grammar: Grammar,
}

const fn def(
    name: &'static str,
    abbrev: &'static str,
    scope: OptionScope,
    kind: OptionType,
    default: DefaultValue,
) -> OptionDef {
    OptionDef {
        name,
        abbrev,
        scope,
        kind,
        default,
        grammar: Grammar::Any,
    }
}

const fn with_grammar(mut option: OptionDef, grammar: Grammar) -> OptionDef {
    option.grammar = grammar;
    option
}

use DefaultValue::{Bool as B, Number as N, Text as T};
use OptionScope::{Global as G, GlobalLocal as GL, Local as L};

/// Every option the engine knows, in `:set all` order.
pub static OPTIONS: &[OptionDef] = &[
    def("expandtab", "et", L, OptionType::Bool, B(false)),
    with_grammar(
        def("guicursor", "gcr", G, OptionType::List, T(DEFAULT_GUICURSOR)),
        Grammar::GuiCursor,
    ),
    def("hlsearch", "hls", G, OptionType::Bool, B(false)),
    def("ignorecase", "ic", G, OptionType::Bool, B(false)),
    def("incsearch", "is", G, OptionType::Bool, B(false)),
    with_grammar(
        def("keymodel", "km", G, OptionType::List, T("continueselect,stopselect")),
        Grammar::OneOf(&[
            "startsel",
            "stopsel",
            "stopselect",
            "stopvisual",
            "continueselect",
            "continuevisual",
        ]),
    ),
    def("number", "nu", L, OptionType::Bool, B(false)),
    def("relativenumber", "rnu", L, OptionType::Bool, B(false)),
    def("scroll", "scr", L, OptionType::Number, N(0)),
    def("scrolloff", "so", GL, OptionType::Number, N(0)),
    with_grammar(
        def("selection", "sel", G, OptionType::String, T("inclusive")),
        Grammar::OneOf(&["old", "inclusive", "exclusive"]),
    ),
    with_grammar(
        def("selectmode", "slm", G, OptionType::List, T("")),
        Grammar::OneOf(&["mouse", "key", "cmd"]),
    ),
    def("shiftwidth", "sw", L, OptionType::Number, N(8)),
    def("sidescroll", "ss", G, OptionType::Number, N(0)),
    def("sidescrolloff", "siso", GL, OptionType::Number, N(0)),
    def("smartcase", "scs", G, OptionType::Bool, B(false)),
    def("startofline", "sol", G, OptionType::Bool, B(true)),
    def("tabstop", "ts", L, OptionType::Number, N(8)),
    def("timeout", "to", G, OptionType::Bool, B(true)),
    def("timeoutlen", "tm", G, OptionType::Number, N(1000)),
    def("undolevels", "ul", G, OptionType::Number, N(1000)),
    def("wrapscan", "ws", G, OptionType::Bool, B(true)),
];

/// Find a declaration by full name or abbreviation.
#[must_use]
pub fn find_option(name: &str) -> Option<(usize, &'static OptionDef)> {
    OPTIONS
        .iter()
        .enumerate()
        .find(|(_, d)| d.name == name || d.abbrev == name)
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    find_option(name).is_some_and(|(_, d)| d.kind == OptionType::Bool)
}

/// Returns `true` if `name` is any known option.
#[must_use]
pub fn is_known_option(name: &str) -> bool {
    find_option(name).is_some()
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// One token of a list option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Word(String),
    GuiCursor(GuiCursorEntry),
}

impl ListEntry {
    /// The token as typed.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Word(word) => word,
            Self::GuiCursor(entry) => entry.token(),
        }
    }
}

/// A current option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Number(i64),
    String(String),
    List(Vec<ListEntry>),
}

impl OptionValue {
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True if a list value holds `token`.
    #[must_use]
    pub fn contains_token(&self, token: &str) -> bool {
        match self {
            Self::List(entries) => entries.iter().any(|e| e.token() == token),
            _ => false,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", i32::from(*b)),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(entry.token())?;
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Change notification
// ---------------------------------------------------------------------------

/// Passed to listeners after a value changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionChange {
    pub name: &'static str,
    pub scope: Scope,
    pub old: OptionValue,
    pub new: OptionValue,
}

/// Handle returned by [`Options::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&OptionChange)>;

// ---------------------------------------------------------------------------
// :set directives
// ---------------------------------------------------------------------------

/// Operator of an assignment directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=` or `:`
    Set,
    /// `+=`
    Add,
    /// `-=`
    Subtract,
    /// `^=`
    Prepend,
}

/// A parsed `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `:set option`: enable a boolean option, show any other.
    On(String),

    /// `:set nooption`: disable a boolean option.
    Off(String),

    /// `:set option!` / `:set invoption`: toggle a boolean option.
    Toggle(String),

    /// `:set option?`: query the current value.
    Query(String),

    /// `:set option&`: reset to the default.
    Reset(String),

    /// `:set option=value` and the `+=` `-=` `^=` forms.
    Assign(String, AssignOp, String),

    /// `:set` with no arguments: show changed options.
    ShowChanged,

    /// `:set all`: show all options.
    ShowAll,
}

/// Parse the full `:set` arguments string into directives.
///
/// Arguments are separated by unescaped whitespace; `\ ` and `\\` inside a
/// value stand for a space and a backslash. An empty argument string
/// produces [`SetDirective::ShowChanged`].
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let words = split_set_args(args);
    if words.is_empty() {
        return vec![SetDirective::ShowChanged];
    }
    words.iter().map(|w| parse_set_arg(w)).collect()
}

/// Parse a single `:set` argument into a directive.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }

    // Assignment: option=value, option+=value, option:value, ...
    if let Some(pos) = arg.find(|c| c == '=' || c == ':') {
        let head = &arg[..pos];
        let value = arg[pos + 1..].to_string();
        let (name, op) = if let Some(name) = head.strip_suffix('+') {
            (name, AssignOp::Add)
        } else if let Some(name) = head.strip_suffix('-') {
            (name, AssignOp::Subtract)
        } else if let Some(name) = head.strip_suffix('^') {
            (name, AssignOp::Prepend)
        } else {
            (head, AssignOp::Set)
        };
        return SetDirective::Assign(name.to_string(), op, value);
    }

    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }
    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }
    if let Some(name) = arg.strip_suffix('&') {
        return SetDirective::Reset(name.to_string());
    }

    // Negation: nooption / invoption: only if the remainder is a known
    // boolean option. This avoids mis-parsing `:set number` as Off("mber").
    if let Some(name) = arg.strip_prefix("no") {
        if is_bool_option(name) {
            return SetDirective::Off(name.to_string());
        }
    }
    if let Some(name) = arg.strip_prefix("inv") {
        if is_bool_option(name) {
            return SetDirective::Toggle(name.to_string());
        }
    }

    // Bare non-boolean option name = query its value (Vim behavior).
    if is_known_option(arg) && !is_bool_option(arg) {
        return SetDirective::Query(arg.to_string());
    }

    SetDirective::On(arg.to_string())
}

fn split_set_args(args: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = args.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if matches!(chars.peek(), Some(' ' | '\\')) => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Format a boolean option for display (`:set` output).
///
/// Returns `"  name"` when true and `"noname"` when false, so names line up.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        format!("  {name}")
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

struct Slot {
    global: OptionValue,
    local: Option<OptionValue>,
}

/// Option values of one engine session.
pub struct Options {
    slots: Vec<Slot>,
    listeners: Vec<(ListenerId, Option<&'static str>, Listener)>,
    next_listener: u64,
    cursor_cache: RefCell<HashMap<CursorMode, CursorAttributes>>,
}

impl Options {
    /// All options at their defaults.
    #[must_use]
    pub fn new() -> Self {
        let slots = OPTIONS
            .iter()
            .map(|d| {
                let value = default_value(d);
                let local = (d.scope == OptionScope::Local).then(|| value.clone());
                Slot {
                    global: value,
                    local,
                }
            })
            .collect();
        Self {
            slots,
            listeners: Vec::new(),
            next_listener: 0,
            cursor_cache: RefCell::new(HashMap::new()),
        }
    }

    // -- Lookup -------------------------------------------------------------

    /// The declaration for `name` (full name or abbreviation).
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownOption`] for unknown names.
    pub fn definition(&self, name: &str) -> Result<&'static OptionDef, EditorError> {
        find_option(name)
            .map(|(_, d)| d)
            .ok_or_else(|| EditorError::UnknownOption(name.to_string()))
    }

    fn index(name: &str) -> Result<usize, EditorError> {
        find_option(name)
            .map(|(i, _)| i)
            .ok_or_else(|| EditorError::UnknownOption(name.to_string()))
    }

    fn read(&self, index: usize, scope: Scope) -> &OptionValue {
        let slot = &self.slots[index];
        match (OPTIONS[index].scope, scope) {
            (OptionScope::Global, _) | (_, Scope::Global) => &slot.global,
            _ => slot.local.as_ref().unwrap_or(&slot.global),
        }
    }

    /// Current value of `name` in `scope`.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownOption`] for unknown names.
    pub fn get(&self, scope: Scope, name: &str) -> Result<OptionValue, EditorError> {
        Ok(self.read(Self::index(name)?, scope).clone())
    }

    /// Effective boolean value. Unknown or non-boolean names read as off.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        Self::index(name)
            .ok()
            .and_then(|i| self.read(i, Scope::Both).as_bool())
            .unwrap_or(false)
    }

    /// Effective numeric value. Unknown or non-numeric names read as 0.
    #[must_use]
    pub fn number(&self, name: &str) -> i64 {
        Self::index(name)
            .ok()
            .and_then(|i| self.read(i, Scope::Both).as_number())
            .unwrap_or(0)
    }

    /// Effective numeric value as `usize`, negatives clamped to 0.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        usize::try_from(self.number(name)).unwrap_or(0)
    }

    /// Effective string value (lists joined with commas).
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        Self::index(name)
            .map(|i| self.read(i, Scope::Both).to_string())
            .unwrap_or_default()
    }

    /// True if list option `name` contains `token`.
    #[must_use]
    pub fn has_token(&self, name: &str, token: &str) -> bool {
        Self::index(name).is_ok_and(|i| self.read(i, Scope::Both).contains_token(token))
    }

    // -- Writing ------------------------------------------------------------

    /// Set `name` to `value`.
    ///
    /// Booleans and numbers convert into each other; strings are parsed as
    /// the option's text form (so list options go through their tokens).
    ///
    /// # Errors
    ///
    /// Unknown option, a value of the wrong shape, or a bad list token.
    pub fn set(&mut self, scope: Scope, name: &str, value: OptionValue) -> Result<(), EditorError> {
        let index = Self::index(name)?;
        let def = &OPTIONS[index];
        match (def.kind, value) {
            (OptionType::Bool, OptionValue::Bool(b)) => self.write(index, scope, OptionValue::Bool(b)),
            (OptionType::Bool, OptionValue::Number(n)) => {
                self.write(index, scope, OptionValue::Bool(n != 0));
            }
            (OptionType::Number, OptionValue::Number(n)) => {
                let n = check_number(def, n)?;
                self.write(index, scope, OptionValue::Number(n));
            }
            (OptionType::Number, OptionValue::Bool(b)) => {
                self.write(index, scope, OptionValue::Number(i64::from(b)));
            }
            (OptionType::String | OptionType::List, OptionValue::String(text)) => {
                return self.assign(scope, name, AssignOp::Set, &text);
            }
            (OptionType::List, OptionValue::List(entries)) => {
                self.write(index, scope, OptionValue::List(entries));
            }
            (_, value) => {
                return Err(EditorError::InvalidArgument(format!("{}={value}", def.name)));
            }
        }
        Ok(())
    }

    /// Apply an assignment in text form, the way `:set name<op>=text` does.
    ///
    /// # Errors
    ///
    /// - E518 unknown option
    /// - E474 `=` on a boolean, or a value outside the option's grammar
    /// - E521 a non-numeric value for a number option
    /// - list token errors, after applying the tokens before the bad one
    pub fn assign(
        &mut self,
        scope: Scope,
        name: &str,
        op: AssignOp,
        text: &str,
    ) -> Result<(), EditorError> {
        let index = Self::index(name)?;
        let def = &OPTIONS[index];
        let current = self.read(index, scope).clone();

        match def.kind {
            OptionType::Bool => Err(EditorError::InvalidArgument(format!("{name}={text}"))),
            OptionType::Number => {
                let operand: i64 = text
                    .trim()
                    .parse()
                    .map_err(|_| EditorError::NumberRequired(format!("{name}={text}")))?;
                let old = current.as_number().unwrap_or(0);
                let new = match op {
                    AssignOp::Set => operand,
                    AssignOp::Add => old.saturating_add(operand),
                    AssignOp::Subtract => old.saturating_sub(operand),
                    AssignOp::Prepend => old.saturating_mul(operand),
                };
                let new = check_number(def, new)?;
                self.write(index, scope, OptionValue::Number(new));
                Ok(())
            }
            OptionType::String => {
                let old = current.to_string();
                let new = match op {
                    AssignOp::Set => text.to_string(),
                    AssignOp::Add => format!("{old}{text}"),
                    AssignOp::Prepend => format!("{text}{old}"),
                    AssignOp::Subtract => old.replacen(text, "", 1),
                };
                if let Grammar::OneOf(allowed) = def.grammar {
                    if !allowed.contains(&new.as_str()) {
                        return Err(EditorError::InvalidArgument(format!("{name}={text}")));
                    }
                }
                self.write(index, scope, OptionValue::String(new));
                Ok(())
            }
            OptionType::List => {
                let OptionValue::List(old) = current else {
                    return Err(EditorError::InvalidArgument(format!("{name}={text}")));
                };
                let (parsed, error) = parse_list(def, text);
                let new = match op {
                    AssignOp::Set => parsed,
                    AssignOp::Add => {
                        let mut entries = old;
                        for entry in parsed {
                            if !entries.iter().any(|e| e.token() == entry.token()) {
                                entries.push(entry);
                            }
                        }
                        entries
                    }
                    AssignOp::Prepend => {
                        let rest: Vec<ListEntry> = old
                            .into_iter()
                            .filter(|e| !parsed.iter().any(|n| n.token() == e.token()))
                            .collect();
                        let mut entries = parsed;
                        entries.extend(rest);
                        entries
                    }
                    AssignOp::Subtract => old
                        .into_iter()
                        .filter(|e| !parsed.iter().any(|r| r.token() == e.token()))
                        .collect(),
                };
                self.write(index, scope, OptionValue::List(new));
                error.map_or(Ok(()), Err)
            }
        }
    }

    /// Reset `name` to its default.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownOption`] for unknown names.
    pub fn reset(&mut self, scope: Scope, name: &str) -> Result<(), EditorError> {
        let index = Self::index(name)?;
        self.write(index, scope, default_value(&OPTIONS[index]));
        Ok(())
    }

    fn write(&mut self, index: usize, scope: Scope, value: OptionValue) {
        let def = &OPTIONS[index];
        let old = self.read(index, scope).clone();
        let slot = &mut self.slots[index];

        match (def.scope, scope) {
            (OptionScope::Global, _) | (_, Scope::Global) => slot.global = value.clone(),
            (_, Scope::Local) => slot.local = Some(value.clone()),
            (OptionScope::Local, Scope::Both) => {
                slot.global = value.clone();
                slot.local = Some(value.clone());
            }
            (OptionScope::GlobalLocal, Scope::Both) => {
                slot.global = value.clone();
                slot.local = None;
            }
        }

        if old == value {
            return;
        }
        if def.grammar == Grammar::GuiCursor {
            self.cursor_cache.borrow_mut().clear();
        }
        debug!(option = def.name, old = %old, new = %value, "option changed");

        let change = OptionChange {
            name: def.name,
            scope,
            old,
            new: value,
        };
        for (_, filter, listener) in &mut self.listeners {
            if filter.is_none_or(|n| n == def.name) {
                listener(&change);
            }
        }
    }

    // -- Listeners ----------------------------------------------------------

    /// Call `listener` after every change of `name` (or of any option when
    /// `name` is `None`).
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownOption`] if `name` is not an option.
    pub fn subscribe(
        &mut self,
        name: Option<&str>,
        listener: impl FnMut(&OptionChange) + 'static,
    ) -> Result<ListenerId, EditorError> {
        let filter = match name {
            Some(n) => Some(self.definition(n)?.name),
            None => None,
        };
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, filter, Box::new(listener)));
        Ok(id)
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _, _)| *lid != id);
    }

    // -- :set ---------------------------------------------------------------

    /// Run the arguments of `:set` / `:setlocal` / `:setglobal`.
    ///
    /// Returns the text to show for queries, `None` when nothing is shown.
    /// Directives before a failing one stay applied.
    ///
    /// # Errors
    ///
    /// The first failing directive's error.
    pub fn execute_set(&mut self, scope: Scope, args: &str) -> Result<Option<String>, EditorError> {
        let mut output = Vec::new();

        for directive in parse_set(args) {
            match directive {
                SetDirective::ShowChanged => output.push(self.show(scope, false)),
                SetDirective::ShowAll => output.push(self.show(scope, true)),
                SetDirective::On(name) => {
                    let d = self.definition(&name)?;
                    if d.kind == OptionType::Bool {
                        self.set(scope, &name, OptionValue::Bool(true))?;
                    } else {
                        output.push(self.format_option(scope, &name)?);
                    }
                }
                SetDirective::Off(name) => self.set(scope, &name, OptionValue::Bool(false))?,
                SetDirective::Toggle(name) => {
                    let d = self.definition(&name)?;
                    let current = self.get(scope, &name)?.as_bool().ok_or_else(|| {
                        EditorError::InvalidArgument(format!("{}!", d.name))
                    })?;
                    self.set(scope, &name, OptionValue::Bool(!current))?;
                }
                SetDirective::Query(name) => output.push(self.format_option(scope, &name)?),
                SetDirective::Reset(name) => self.reset(scope, &name)?,
                SetDirective::Assign(name, op, value) => self.assign(scope, &name, op, &value)?,
            }
        }

        Ok((!output.is_empty()).then(|| output.join("\n")))
    }

    /// `:set name?` output for one option.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownOption`] for unknown names.
    pub fn format_option(&self, scope: Scope, name: &str) -> Result<String, EditorError> {
        let index = Self::index(name)?;
        Ok(self.format_index(index, scope))
    }

    fn format_index(&self, index: usize, scope: Scope) -> String {
        let def = &OPTIONS[index];
        match self.read(index, scope) {
            OptionValue::Bool(b) => format_bool(def.name, *b),
            value => format!("  {}={value}", def.name),
        }
    }

    fn show(&self, scope: Scope, all: bool) -> String {
        let mut lines = vec!["--- Options ---".to_string()];
        for (index, def) in OPTIONS.iter().enumerate() {
            if all || *self.read(index, scope) != default_value(def) {
                lines.push(self.format_index(index, scope));
            }
        }
        lines.join("\n")
    }

    // -- guicursor ----------------------------------------------------------

    /// Effective `guicursor` attributes for `mode`, cached until the option
    /// changes.
    #[must_use]
    pub fn cursor_attributes(&self, mode: CursorMode) -> CursorAttributes {
        if let Some(cached) = self.cursor_cache.borrow().get(&mode) {
            return cached.clone();
        }
        let attributes = match find_option("guicursor") {
            Some((index, _)) => match self.read(index, Scope::Both) {
                OptionValue::List(entries) => effective_attributes(
                    entries.iter().filter_map(|e| match e {
                        ListEntry::GuiCursor(entry) => Some(entry),
                        ListEntry::Word(_) => None,
                    }),
                    mode,
                ),
                _ => CursorAttributes::default(),
            },
            None => CursorAttributes::default(),
        };
        self.cursor_cache.borrow_mut().insert(mode, attributes.clone());
        attributes
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("options", &self.slots.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn default_value(def: &OptionDef) -> OptionValue {
    match (def.kind, def.default) {
        (_, DefaultValue::Bool(b)) => OptionValue::Bool(b),
        (_, DefaultValue::Number(n)) => OptionValue::Number(n),
        (OptionType::List, DefaultValue::Text(text)) => OptionValue::List(parse_list(def, text).0),
        (_, DefaultValue::Text(text)) => OptionValue::String(text.to_string()),
    }
}

fn check_number(def: &OptionDef, n: i64) -> Result<i64, EditorError> {
    if n < 0 {
        return Err(EditorError::InvalidArgument(format!("{}={n}", def.name)));
    }
    Ok(n)
}

/// Split `text` on commas and parse each token, stopping at the first bad
/// one. Returns the good prefix and the error, if any.
fn parse_list(def: &OptionDef, text: &str) -> (Vec<ListEntry>, Option<EditorError>) {
    let mut entries = Vec::new();
    for token in text.split(',').filter(|t| !t.is_empty()) {
        match parse_token(def, token) {
            Ok(entry) => entries.push(entry),
            Err(err) => return (entries, Some(err)),
        }
    }
    (entries, None)
}

/// Parse one list token according to the option's grammar.
///
/// # Errors
///
/// E474 for words outside a fixed set; the `guicursor` token errors.
pub fn parse_token(def: &OptionDef, token: &str) -> Result<ListEntry, EditorError> {
    match def.grammar {
        Grammar::Any => Ok(ListEntry::Word(token.to_string())),
        Grammar::OneOf(allowed) => {
            if allowed.contains(&token) {
                Ok(ListEntry::Word(token.to_string()))
            } else {
                Err(EditorError::InvalidArgument(format!("{}={token}", def.name)))
            }
        }
        Grammar::GuiCursor => GuiCursorEntry::parse(token).map(ListEntry::GuiCursor),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
