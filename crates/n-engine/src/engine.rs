//! The engine session.
//!
//! [`Engine`] owns every store of one editing session (options, digraphs,
//! registers, undo history, mappings, script variables) together with the
//! host and the modal state machine. Hosts talk to it through two entry
//! points: [`Engine::feed`] for keys and [`Engine::execute_line`] for Ex
//! command lines.
//!
//! # Typeahead
//!
//! Keys pass through a small typeahead queue so mappings can be resolved.
//! While the queued keys are a strict prefix of some mapping the engine
//! answers [`KeyResult::Pending`] and waits; the host calls
//! [`Engine::flush_pending`] when `timeoutlen` expires. Expanding a mapping
//! puts its rhs back at the front of the queue, up to [`MAX_MAP_DEPTH`]
//! times per key.
//!
//! # Errors
//!
//! A failing command sets the error flag, is logged, resets the state
//! machine to Normal mode, and drops the rest of the typeahead. Changes it
//! made before failing stay.

use std::cell::Cell;
use std::rc::Rc;

use n_editor::digraph::Digraphs;
use n_editor::edit::EditContext;
use n_editor::guicursor::{CursorAttributes, CursorMode};
use n_editor::history::History;
use n_editor::host::{Host, MemoryHost};
use n_editor::key::{Key, KeyCode, parse_keys};
use n_editor::mapping::{MappingTable, Resolution};
use n_editor::mode::Mode;
use n_editor::options::Options;
use n_editor::position::TextRange;
use n_editor::register::RegisterFile;
use n_editor::state::{State, Step};
use n_script::env::{EditorEnv, Variables};
use n_script::functions::FunctionTable;
use n_script::parse_command;
use tracing::{debug, trace, warn};

use crate::dispatch::{self, Dispatcher};
use crate::error::ExError;

/// Mapping expansions allowed while resolving one key.
pub const MAX_MAP_DEPTH: usize = 1000;

/// What [`Engine::feed`] did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// The key was used.
    Consumed,
    /// More keys are needed: a partial command or a mapping prefix.
    Pending,
    /// The key could not be used; the host may ring the bell.
    Rejected,
}

/// Option changes the engine has to pass on to the host or the history.
///
/// The option listeners run inside [`Options::set`] and cannot reach the
/// host, so they park the new value here until the command finishes.
#[derive(Debug, Default)]
struct OptionSync {
    tabstop: Rc<Cell<Option<usize>>>,
    undolevels: Rc<Cell<Option<usize>>>,
}

impl OptionSync {
    fn watch(options: &mut Options) -> Self {
        Self {
            tabstop: watch(options, "tabstop"),
            undolevels: watch(options, "undolevels"),
        }
    }
}

fn watch(options: &mut Options, name: &'static str) -> Rc<Cell<Option<usize>>> {
    let cell = Rc::new(Cell::new(None));
    let sink = Rc::clone(&cell);
    let subscribed = options.subscribe(Some(name), move |change| {
        let value = change.new.as_number().map(|n| usize::try_from(n).unwrap_or(0));
        sink.set(value);
    });
    if let Err(err) = subscribed {
        warn!(option = name, error = %err, "cannot watch option");
    }
    cell
}

/// One editing session.
pub struct Engine {
    host: Box<dyn Host>,
    pub(crate) options: Options,
    pub(crate) registers: RegisterFile,
    pub(crate) history: History,
    pub(crate) digraphs: Digraphs,
    pub(crate) mappings: MappingTable,
    pub(crate) variables: Variables,
    pub(crate) functions: FunctionTable,
    pub(crate) state: State,
    dispatcher: Dispatcher,
    sync: OptionSync,
    typeahead: Vec<Key>,
    /// Nesting of [`Engine::execute_line`] (`:execute`, `:normal`).
    depth: usize,
    last_error: Option<ExError>,
    messages: Vec<String>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("mode", &self.state.mode())
            .field("typeahead", &self.typeahead)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// A session editing `host`.
    pub fn new(host: impl Host + 'static) -> Self {
        let mut options = Options::new();
        let sync = OptionSync::watch(&mut options);
        let mut host: Box<dyn Host> = Box::new(host);
        host.set_tab_width(options.count("tabstop"));
        let history = History::new(options.count("undolevels"));

        Self {
            host,
            options,
            registers: RegisterFile::new(),
            history,
            digraphs: Digraphs::new(),
            mappings: MappingTable::new(),
            variables: Variables::new(),
            functions: FunctionTable::builtin(),
            state: State::new(),
            dispatcher: Dispatcher::new(),
            sync,
            typeahead: Vec::new(),
            depth: 0,
            last_error: None,
            messages: Vec::new(),
        }
    }

    /// A session over an in-memory buffer holding `text`.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self::new(MemoryHost::new(text))
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn host(&self) -> &dyn Host {
        &*self.host
    }

    pub fn host_mut(&mut self) -> &mut dyn Host {
        &mut *self.host
    }

    /// The whole buffer.
    #[must_use]
    pub fn text(&self) -> String {
        self.host.slice(TextRange::new(0, self.host.len_chars()))
    }

    /// Offset of the primary caret.
    #[must_use]
    pub fn caret(&self) -> usize {
        self.host.carets().primary().offset
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.state.mode()
    }

    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    #[must_use]
    pub const fn digraphs(&self) -> &Digraphs {
        &self.digraphs
    }

    #[must_use]
    pub const fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    #[must_use]
    pub const fn variables(&self) -> &Variables {
        &self.variables
    }

    /// True when the last top-level command (key or Ex line) failed.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.last_error.is_some()
    }

    #[must_use]
    pub const fn last_error(&self) -> Option<&ExError> {
        self.last_error.as_ref()
    }

    /// Output, reports, and error messages of the last top-level command.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Drain the message list. The error flag is left alone.
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// `guicursor` attributes for the current mode.
    #[must_use]
    pub fn cursor_attributes(&self) -> CursorAttributes {
        let exclusive = self.options.text("selection") == "exclusive";
        self.options.cursor_attributes(CursorMode::for_mode(self.state.mode(), exclusive))
    }

    // -- Keys ---------------------------------------------------------------

    /// Feed one key.
    pub fn feed(&mut self, key: Key) -> KeyResult {
        trace!(key = %key, "feed");
        if self.depth == 0 && self.typeahead.is_empty() && self.at_command_start() {
            self.clear_status();
        }
        self.typeahead.push(key);
        self.drain_typeahead(false)
    }

    /// Feed keys written in `<C-x>` notation. Returns the last key's result.
    pub fn feed_keys(&mut self, notation: &str) -> KeyResult {
        let mut result = KeyResult::Consumed;
        for key in parse_keys(notation) {
            result = self.feed(key);
        }
        result
    }

    /// Resolve keys held for an ambiguous mapping: the mapping timeout
    /// expired or input ended.
    pub fn flush_pending(&mut self) -> KeyResult {
        if self.typeahead.is_empty() {
            return KeyResult::Consumed;
        }
        self.drain_typeahead(true)
    }

    fn at_command_start(&self) -> bool {
        self.state.pending().is_empty()
            && matches!(self.state.mode(), Mode::Normal | Mode::Visual { .. } | Mode::Select { .. })
    }

    fn drain_typeahead(&mut self, flush: bool) -> KeyResult {
        let mut result = KeyResult::Consumed;
        let mut expansions = 0;

        while !self.typeahead.is_empty() {
            let modes = self.state.map_modes();
            match self.mappings.resolve(modes, &self.typeahead, flush) {
                Resolution::Wait => return KeyResult::Pending,
                Resolution::Raw { consumed } => {
                    let keys: Vec<Key> = self.typeahead.drain(..consumed).collect();
                    for key in keys {
                        result = self.handle_key(key);
                    }
                }
                Resolution::Expand { consumed, rhs, remap, keep_first } => {
                    expansions += 1;
                    if expansions > MAX_MAP_DEPTH {
                        self.fail(&ExError::RecursiveMapping);
                        return KeyResult::Rejected;
                    }
                    self.typeahead.drain(..consumed);
                    let split = if remap { keep_first.min(rhs.len()) } else { rhs.len() };
                    let (raw, mapped) = rhs.split_at(split);
                    self.typeahead.splice(0..0, mapped.iter().copied());
                    for &key in raw {
                        result = self.handle_key(key);
                    }
                }
            }
        }
        result
    }

    /// Run one key through the state machine, bypassing mappings.
    fn handle_key(&mut self, key: Key) -> KeyResult {
        let step = self.with_state(|state, ctx| state.handle_key(ctx, key));
        self.collect_report();
        match step {
            Step::Done => KeyResult::Consumed,
            Step::Pending => KeyResult::Pending,
            Step::Rejected => KeyResult::Rejected,
            Step::Ex(line) => {
                let nested = self.depth > 0;
                match self.execute_line(&line) {
                    Ok(Some(output)) if nested => {
                        self.messages.push(output);
                        KeyResult::Consumed
                    }
                    Ok(_) => KeyResult::Consumed,
                    Err(err) => {
                        if nested {
                            self.fail(&err);
                        }
                        KeyResult::Rejected
                    }
                }
            }
        }
    }

    /// `:normal`: run `keys` as if typed, then finish whatever command they
    /// left open as Escape would. Mappings apply when `remap` is set.
    pub(crate) fn run_normal(&mut self, keys: &[Key], remap: bool) {
        let saved = std::mem::take(&mut self.typeahead);
        for &key in keys {
            if remap {
                self.typeahead.push(key);
                self.drain_typeahead(false);
            } else {
                self.handle_key(key);
            }
        }
        if !self.typeahead.is_empty() {
            self.drain_typeahead(true);
        }
        self.typeahead = saved;
        self.with_state(State::escape);
        self.collect_report();
    }

    // -- Ex commands --------------------------------------------------------

    /// Parse and run one Ex command line.
    ///
    /// Returns the text a listing or `:echo` shows.
    ///
    /// # Errors
    ///
    /// The command's [`ExError`]. The error flag is set and the state
    /// machine is back in Normal mode.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<String>, ExError> {
        let top = self.depth == 0;
        if top {
            self.clear_status();
        }
        debug!(line, depth = self.depth, "ex");

        self.depth += 1;
        let result = parse_command(line)
            .map_err(ExError::from)
            .and_then(|command| dispatch::execute(self, &command));
        self.depth -= 1;
        self.sync_options();
        self.collect_report();

        match result {
            Ok(output) => {
                if let (true, Some(text)) = (top, &output) {
                    self.messages.push(text.clone());
                }
                Ok(output)
            }
            Err(err) => {
                if top {
                    self.fail(&err);
                }
                Err(err)
            }
        }
    }

    pub(crate) const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The handler table, for hosts that add or replace commands.
    pub const fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    // -- Context ------------------------------------------------------------

    /// Run `f` with the state machine and an edit context over the session.
    pub(crate) fn with_state<R>(&mut self, f: impl FnOnce(&mut State, &mut EditContext<'_>) -> R) -> R {
        let mut ctx = EditContext {
            host: &mut *self.host,
            options: &mut self.options,
            registers: &mut self.registers,
            history: &mut self.history,
            digraphs: &self.digraphs,
        };
        f(&mut self.state, &mut ctx)
    }

    /// The script environment and builtin table.
    pub(crate) fn script(&mut self) -> (EditorEnv<'_>, &FunctionTable) {
        let env = EditorEnv {
            variables: &mut self.variables,
            options: &mut self.options,
            registers: &mut self.registers,
        };
        (env, &self.functions)
    }

    /// Add a report line ("3 fewer lines") to the messages.
    pub(crate) fn report(&mut self, text: String) {
        debug!(text, "report");
        self.messages.push(text);
    }

    // -- Status -------------------------------------------------------------

    fn clear_status(&mut self) {
        self.last_error = None;
        self.messages.clear();
    }

    fn collect_report(&mut self) {
        if let Some(text) = self.state.take_message() {
            self.report(text);
        }
    }

    fn fail(&mut self, err: &ExError) {
        warn!(error = %err, "command failed");
        self.messages.push(err.to_string());
        self.last_error = Some(err.clone());
        self.typeahead.clear();
        self.with_state(State::reset);
    }

    fn sync_options(&mut self) {
        if let Some(width) = self.sync.tabstop.take() {
            self.host.set_tab_width(width);
        }
        if let Some(limit) = self.sync.undolevels.take() {
            self.history.set_limit(limit);
        }
    }
}

/// Keys for text that reaches `:normal` through `:execute`, where
/// `"\<Esc>"` has already become a raw control char.
#[must_use]
pub fn literal_keys(text: &str) -> Vec<Key> {
    text.chars()
        .map(|ch| match ch {
            '\x1b' => Key::ESC,
            '\r' | '\n' => Key::ENTER,
            '\t' => Key::named(KeyCode::Tab),
            '\x08' => Key::named(KeyCode::Backspace),
            '\x7f' => Key::named(KeyCode::Delete),
            '\x01'..='\x1a' => char::from_u32(u32::from(ch) + 0x60).map_or(Key::char(ch), Key::ctrl),
            _ => Key::char(ch),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use n_editor::options::Scope;
    use pretty_assertions::assert_eq;

    // -- Keys ---------------------------------------------------------------

    #[test]
    fn keys_edit_the_buffer() {
        let mut engine = Engine::with_text("hello world");
        assert_eq!(engine.feed_keys("dw"), KeyResult::Consumed);
        assert_eq!(engine.text(), "world");
        assert_eq!(engine.feed_keys("d"), KeyResult::Pending);
        assert_eq!(engine.feed(Key::ESC), KeyResult::Consumed);
        assert_eq!(engine.mode(), Mode::Normal);
    }

    #[test]
    fn colon_runs_the_line() {
        let mut engine = Engine::with_text("");
        engine.feed_keys(":let g:x = 6 * 7<CR>");
        assert_eq!(engine.mode(), Mode::Normal);
        assert_eq!(engine.execute_line("echo x").unwrap(), Some("42".into()));
    }

    #[test]
    fn literal_control_chars() {
        assert_eq!(
            literal_keys("a\x1b\r\x17"),
            vec![Key::char('a'), Key::ESC, Key::ENTER, Key::ctrl('w')]
        );
    }

    // -- Errors -------------------------------------------------------------

    #[test]
    fn errors_set_the_flag_until_the_next_command() {
        let mut engine = Engine::with_text("");
        let err = engine.execute_line("frobnicate").unwrap_err();
        assert_eq!(err.code(), Some("E492"));
        assert!(engine.has_error());
        assert_eq!(engine.messages(), ["E492: Not an editor command: frobnicate"]);

        engine.execute_line("set ts=4").unwrap();
        assert!(!engine.has_error());
        assert!(engine.messages().is_empty());
    }

    #[test]
    fn errors_from_typed_command_lines() {
        let mut engine = Engine::with_text("");
        assert_eq!(engine.feed_keys(":bogus<CR>"), KeyResult::Rejected);
        assert!(engine.has_error());
        assert_eq!(engine.mode(), Mode::Normal);
    }

    // -- Options ------------------------------------------------------------

    #[test]
    fn tabstop_reaches_the_host() {
        let mut engine = Engine::with_text("\tx");
        engine.execute_line("set tabstop=4").unwrap();
        assert_eq!(engine.host().tab_width(), 4);
        engine.execute_line("let &ts = 2").unwrap();
        assert_eq!(engine.host().tab_width(), 2);
        assert_eq!(engine.options().number("tabstop"), 2);
        assert_eq!(engine.options().get(Scope::Both, "ts").map(|v| v.to_string()), Ok("2".into()));
    }

    #[test]
    fn nested_output_is_reported_once() {
        let mut engine = Engine::with_text("");
        let output = engine.execute_line("execute 'echo' 1 + 1").unwrap();
        assert_eq!(output, Some("2".into()));
        assert_eq!(engine.messages(), ["2"]);
    }

    #[test]
    fn taking_messages_keeps_the_error_flag() {
        let mut engine = Engine::with_text("");
        assert!(engine.execute_line("bogus").is_err());
        let taken = engine.take_messages();
        assert_eq!(taken, ["E492: Not an editor command: bogus"]);
        assert!(engine.messages().is_empty());
        assert!(engine.has_error());
    }
}
