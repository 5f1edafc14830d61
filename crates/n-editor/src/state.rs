//! The modal state machine.
//!
//! [`State`] interprets one [`Key`] at a time against an [`EditContext`].
//! It owns the mode, the command being typed ([`PendingCommand`]), the `:`
//! prompt, marks, and the last `f`/`t` search; the text, carets, and
//! viewport stay with the host.
//!
//! # Commands
//!
//! A Normal-mode command is an optional count, an optional `"x` register,
//! and then either a motion, an operator plus a motion (or the operator
//! doubled for whole lines), or a command key. Counts typed before the
//! operator and before the motion multiply: `2d3w` deletes six words.
//!
//! Every key reports a [`Step`]. `Pending` means more keys are needed; the
//! engine uses it to hold mapping prefixes too. `Rejected` rings the bell
//! and drops the partial command.
//!
//! # Selections
//!
//! Visual mode selects inclusively; Select mode (and Visual with
//! `selection=exclusive`) leaves the char under the caret out. `keymodel`
//! decides whether unshifted special keys end a selection or extend it,
//! and whether shifted ones start one.

use tracing::{debug, trace};

use crate::caret::Caret;
use crate::command::{CommandLine, LineEdit};
use crate::edit::{self, EditContext, Span};
use crate::host::{Host, char_width};
use crate::key::{Key, KeyCode};
use crate::mapping::MapModes;
use crate::mode::{Mode, Operator, ReturnMode, SelectionKind};
use crate::motion::{self, Find, Motion, MotionContext, Target, Wise};
use crate::options::{OptionValue, Scope};
use crate::position::TextRange;
use crate::register::is_register_name;
use crate::scroll::{self, Movement, ScreenLocation};
use crate::word::{self, WordKind};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What one key did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The key completed (or cancelled) a command.
    Done,
    /// The key started or continued a command that needs more keys.
    Pending,
    /// The key could not be used. The bell rings; nothing changed.
    Rejected,
    /// Enter on the `:` prompt: the line to execute.
    Ex(String),
}

/// The key the command is waiting for after a prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Partial {
    #[default]
    None,
    /// `g`
    G,
    /// `z`
    Z,
    /// `"`
    Register,
    /// `f` `F` `t` `T`
    Find { forward: bool, till: bool },
    /// `r`
    ReplaceChar,
    /// `m`
    SetMark,
    /// `'` (linewise) or `` ` ``
    JumpMark { linewise: bool },
    /// Ctrl-K, first char
    Digraph,
    /// Ctrl-K, second char
    DigraphSecond(char),
    /// Ctrl-R in Insert or on the `:` prompt
    InsertRegister,
    /// Ctrl-V in Insert or on the `:` prompt
    Literal,
}

/// The command being typed: count, register, and any prefix key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingCommand {
    /// Count of the digit run being typed.
    pub count: Option<usize>,
    /// Count typed before the operator.
    pub op_count: Option<usize>,
    /// Register chosen with `"x`.
    pub register: Option<char>,
    partial: Partial,
}

impl PendingCommand {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Count for the action: the runs before and after the operator
    /// multiplied.
    #[must_use]
    pub const fn effective_count(&self) -> Option<usize> {
        merge_counts(self.op_count, self.count)
    }

    /// Waiting for a literal char (`f` target, `r` replacement, register
    /// name, digraph). Mappings do not apply to it.
    #[must_use]
    pub const fn wants_literal(&self) -> bool {
        !matches!(self.partial, Partial::None | Partial::G | Partial::Z)
    }
}

/// Merge two optional counts by multiplication.
///
/// Returns `None` only when both inputs are `None` (no count typed).
#[must_use]
pub const fn merge_counts(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (None, None) => None,
        (Some(x), None) => Some(x),
        (None, Some(y)) => Some(y),
        (Some(x), Some(y)) => Some(x.saturating_mul(y)),
    }
}

/// The last selection, for `gv` and the `'<` / `'>` marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LastVisual {
    anchor: usize,
    caret: usize,
    kind: SelectionKind,
}

/// Bookkeeping for one Insert or Replace session.
#[derive(Debug, Default)]
struct InsertSession {
    /// Text typed since the session started, replayed for a count.
    typed: String,
    repeat: usize,
    /// Started by `o` / `O`: each repeat goes on a new line.
    new_line: bool,
    /// Carets were added for a block insert and go away on Escape.
    block: bool,
    /// Replace mode: per caret, the chars overwritten (`None` for chars
    /// typed past the line end). Backspace puts them back.
    replaced: Vec<Vec<Option<char>>>,
}

/// Where a motion-like key takes the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Motion(Motion),
    Mark { name: char, linewise: bool },
}

/// Where `i a I A gI` start typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertAt {
    Caret,
    After,
    FirstNonBlank,
    LineStart,
    LineEnd,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Modal state of one engine session.
#[derive(Debug, Default)]
pub struct State {
    mode: Mode,
    pending: PendingCommand,
    command_line: CommandLine,
    last_find: Option<Find>,
    marks: [Option<usize>; 26],
    last_visual: Option<LastVisual>,
    insert: InsertSession,
    message: Option<String>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn pending(&self) -> &PendingCommand {
        &self.pending
    }

    /// The `:` prompt while in command-line mode.
    #[must_use]
    pub const fn command_line(&self) -> Option<&CommandLine> {
        match self.mode {
            Mode::CommandLine => Some(&self.command_line),
            _ => None,
        }
    }

    /// Mapping modes that apply to the next key.
    #[must_use]
    pub const fn map_modes(&self) -> MapModes {
        if self.pending.wants_literal() {
            MapModes::empty()
        } else {
            MapModes::for_mode(self.mode)
        }
    }

    /// Take the last report line ("3 fewer lines", "Already at oldest
    /// change").
    pub const fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    /// Offset of mark `name`: `a`-`z`, or `<` / `>` for the last selection.
    #[must_use]
    pub fn mark(&self, name: char) -> Option<usize> {
        match name {
            'a'..='z' => self.marks[mark_index(name)],
            '<' => self.last_visual.map(|v| v.anchor.min(v.caret)),
            '>' => self.last_visual.map(|v| v.anchor.max(v.caret)),
            _ => None,
        }
    }

    /// True when selection ends are exclusive in the current mode.
    #[must_use]
    pub fn exclusive_selection(&self, ctx: &EditContext<'_>) -> bool {
        self.mode.is_select() || ctx.options.text("selection") == "exclusive"
    }

    // -- Entry points -------------------------------------------------------

    /// Interpret one key.
    pub fn handle_key(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        trace!(key = %key, mode = self.mode.display_name(), "key");
        let before = self.mode;

        let step = self.dispatch(ctx, key);

        if step == Step::Rejected {
            self.pending = PendingCommand::default();
            if matches!(self.mode, Mode::OperatorPending { .. }) {
                ctx.commit();
                self.mode = Mode::Normal;
            }
        }
        if step != Step::Pending {
            self.settle(ctx);
        }
        if self.mode != before {
            debug!(from = before.display_name(), to = self.mode.display_name(), "mode change");
        }
        step
    }

    fn dispatch(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        match self.mode {
            Mode::Normal => self.handle_normal(ctx, key),
            Mode::OperatorPending { operator, .. } => self.handle_pending(ctx, operator, key),
            Mode::Insert | Mode::Replace => self.handle_insert(ctx, key),
            Mode::Visual { kind, return_to } => self.handle_visual(ctx, kind, return_to, key),
            Mode::Select { kind, return_to } => self.handle_select(ctx, kind, return_to, key),
            Mode::CommandLine => self.handle_command(ctx, key),
        }
    }

    /// Clamp every caret to where the current mode lets it rest and scroll
    /// the primary caret into view.
    pub fn settle(&mut self, ctx: &mut EditContext<'_>) {
        self.clamp_carets(ctx);
        let sctx = ctx.scroll_context(self.mode.caret_past_end());
        scroll::scroll_caret_into_view(ctx.host, sctx);
    }

    fn clamp_carets(&self, ctx: &mut EditContext<'_>) {
        let past_end = self.mode.caret_past_end();
        let host: &dyn Host = &*ctx.host;
        let len = host.len_chars();
        let offsets: Vec<usize> = host
            .carets()
            .iter()
            .map(|c| motion::clamp_caret(host, c.offset.min(len), past_end))
            .collect();
        for (caret, offset) in ctx.host.carets_mut().iter_mut().zip(offsets) {
            caret.offset = offset;
            caret.selection_start = caret.selection_start.map(|a| a.min(len));
        }
        ctx.host.carets_mut().merge_overlapping();
    }

    /// Abandon the command being typed and return to Normal mode. The
    /// engine calls this after an error.
    pub fn reset(&mut self, ctx: &mut EditContext<'_>) {
        self.pending = PendingCommand::default();
        self.command_line = CommandLine::new();
        self.insert = InsertSession::default();
        for caret in ctx.host.carets_mut().iter_mut() {
            caret.clear_selection();
        }
        ctx.commit();
        self.mode = Mode::Normal;
        self.clamp_carets(ctx);
    }

    /// Finish the current command as Escape would, until Normal mode
    /// (`:normal` does this after its keys).
    pub fn escape(&mut self, ctx: &mut EditContext<'_>) {
        match self.mode {
            Mode::Insert | Mode::Replace => self.finish_insert(ctx),
            Mode::Visual { return_to, .. } | Mode::Select { return_to, .. } => {
                self.exit_visual(ctx, return_to);
                if self.mode.is_input() {
                    self.finish_insert(ctx);
                }
            }
            Mode::OperatorPending { .. } | Mode::CommandLine | Mode::Normal => {
                self.command_line = CommandLine::new();
                self.mode = Mode::Normal;
            }
        }
        self.pending = PendingCommand::default();
        self.settle(ctx);
    }

    /// `:undo` / `:redo`. False when there was nothing to undo or redo.
    pub fn undo_command(&mut self, ctx: &mut EditContext<'_>, redo: bool) -> bool {
        let step = self.undo(ctx, 1, redo);
        self.settle(ctx);
        step == Step::Done
    }

    // -- Count accumulation -------------------------------------------------

    /// Push a digit onto the count accumulator.
    fn push_count_digit(&mut self, digit: u32) {
        let current = self.pending.count.unwrap_or(0);
        self.pending.count = Some(current.saturating_mul(10).saturating_add(digit as usize));
    }

    /// Accumulate `key` into the count if it is a count digit. `0` only
    /// continues a count; on its own it is a motion.
    fn count_digit(&mut self, key: Key) -> bool {
        match key.printable() {
            Some(d @ '1'..='9') => {
                self.push_count_digit(u32::from(d) - u32::from('0'));
                true
            }
            Some('0') if self.pending.count.is_some() => {
                self.push_count_digit(0);
                true
            }
            _ => false,
        }
    }

    /// Take the effective count and register, ending the pending command.
    fn take_pending(&mut self) -> (Option<usize>, Option<char>) {
        let pending = std::mem::take(&mut self.pending);
        (pending.effective_count(), pending.register)
    }

    fn wait_for(&mut self, partial: Partial) -> Step {
        self.pending.partial = partial;
        Step::Pending
    }

    fn take_register_name(&mut self, key: Key) -> Step {
        match key.printable() {
            Some(name) if is_register_name(name) => {
                self.pending.register = Some(name);
                Step::Pending
            }
            _ => Step::Rejected,
        }
    }

    // -- Normal mode --------------------------------------------------------

    fn handle_normal(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        match std::mem::take(&mut self.pending.partial) {
            Partial::G => return self.normal_g(ctx, key),
            Partial::Z => return self.scroll_z(ctx, key),
            Partial::Register => return self.take_register_name(key),
            Partial::Find { forward, till } => return self.find_key(ctx, key, forward, till, None),
            Partial::ReplaceChar => return self.replace_char_key(ctx, key),
            Partial::SetMark => return self.set_mark_key(ctx, key),
            Partial::JumpMark { linewise } => return self.jump_mark_key(ctx, key, linewise, None),
            _ => {}
        }

        if key == Key::ESC {
            let had_pending = !self.pending.is_empty();
            self.pending = PendingCommand::default();
            return if had_pending { Step::Done } else { Step::Rejected };
        }
        if self.count_digit(key) {
            return Step::Pending;
        }
        if let Some(step) = self.motion_prefix(ctx, key, None) {
            return step;
        }
        if let Some(op) = operator_key(key) {
            self.start_operator(op);
            return Step::Pending;
        }
        match key.printable() {
            Some('"') => return self.wait_for(Partial::Register),
            Some('z') => return self.wait_for(Partial::Z),
            Some('r') => return self.wait_for(Partial::ReplaceChar),
            Some('m') => return self.wait_for(Partial::SetMark),
            _ => {}
        }
        if let Some(step) = self.scroll_key(ctx, key) {
            return step;
        }
        if key.is_shifted_special() {
            return self.shifted_special(ctx, key, ReturnMode::Normal);
        }
        if let Some(motion) = simple_motion(key) {
            let (count, _) = self.take_pending();
            return self.move_carets(ctx, Destination::Motion(motion), count);
        }
        self.normal_command(ctx, key)
    }

    /// Prefix keys shared by Normal, Visual, and operator-pending mode:
    /// `g`, `f F t T`, `' \``, and the repeat-find keys `; ,`.
    fn motion_prefix(&mut self, ctx: &mut EditContext<'_>, key: Key, op: Option<Operator>) -> Option<Step> {
        let step = match key.printable()? {
            'g' => self.wait_for(Partial::G),
            'f' => self.wait_for(Partial::Find { forward: true, till: false }),
            'F' => self.wait_for(Partial::Find { forward: false, till: false }),
            't' => self.wait_for(Partial::Find { forward: true, till: true }),
            'T' => self.wait_for(Partial::Find { forward: false, till: true }),
            '\'' => self.wait_for(Partial::JumpMark { linewise: true }),
            '`' => self.wait_for(Partial::JumpMark { linewise: false }),
            ch @ (';' | ',') => {
                let Some(find) = self.last_find else {
                    return Some(Step::Rejected);
                };
                let find = if ch == ',' { find.reversed() } else { find };
                self.go(ctx, Destination::Motion(Motion::RepeatFind(find)), op)
            }
            _ => return None,
        };
        Some(step)
    }

    /// Run a destination as a caret move or as the range of `op`.
    fn go(&mut self, ctx: &mut EditContext<'_>, dest: Destination, op: Option<Operator>) -> Step {
        let (count, register) = self.take_pending();
        match op {
            Some(op) => self.operate(ctx, op, dest, count, register),
            None => self.move_carets(ctx, dest, count),
        }
    }

    fn start_operator(&mut self, operator: Operator) {
        self.pending.op_count = self.pending.count.take();
        self.mode = Mode::OperatorPending {
            operator,
            return_to: ReturnMode::Normal,
        };
    }

    #[allow(clippy::too_many_lines)]
    fn normal_command(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        let (count, register) = self.take_pending();
        let n = count.unwrap_or(1).max(1);

        if key.is_ctrl('r') {
            return self.undo(ctx, n, true);
        }
        if key.is_ctrl('v') {
            return self.enter_visual(ctx, SelectionKind::Block, ReturnMode::Normal);
        }
        match key.code {
            KeyCode::Delete if key.modifiers.is_empty() => {
                return self.operate(ctx, Operator::Delete, Destination::Motion(Motion::Right), Some(n), register);
            }
            KeyCode::Insert if key.modifiers.is_empty() => return self.start_insert(ctx, InsertAt::Caret, n),
            _ => {}
        }
        let Some(ch) = key.printable() else {
            return Step::Rejected;
        };

        let to = Destination::Motion;
        match ch {
            ':' => {
                let prefill = match count {
                    None => String::new(),
                    Some(1) => ".".to_string(),
                    Some(n) => format!(".,.+{}", n - 1),
                };
                self.open_command_line(&prefill);
                Step::Done
            }
            'i' => self.start_insert(ctx, InsertAt::Caret, n),
            'a' => self.start_insert(ctx, InsertAt::After, n),
            'I' => self.start_insert(ctx, InsertAt::FirstNonBlank, n),
            'A' => self.start_insert(ctx, InsertAt::LineEnd, n),
            'o' => self.open_line(ctx, true, n),
            'O' => self.open_line(ctx, false, n),
            'R' => {
                ctx.begin();
                self.begin_insert_session(Mode::Replace, n, false);
                Step::Done
            }
            'x' => self.operate(ctx, Operator::Delete, to(Motion::Right), Some(n), register),
            'X' => self.operate(ctx, Operator::Delete, to(Motion::Left), Some(n), register),
            'D' => self.operate(ctx, Operator::Delete, to(Motion::LineEnd), Some(n), register),
            'C' => self.operate(ctx, Operator::Change, to(Motion::LineEnd), Some(n), register),
            's' => {
                let line = ctx.host.line_of(ctx.host.carets().primary().offset);
                if ctx.host.line_len(line) == 0 {
                    self.start_insert(ctx, InsertAt::Caret, 1)
                } else {
                    self.operate(ctx, Operator::Change, to(Motion::Right), Some(n), register)
                }
            }
            'S' => self.operator_line(ctx, Operator::Change, n, register),
            'Y' => self.operator_line(ctx, Operator::Yank, n, register),
            'p' | 'P' => self.put(ctx, register, ch == 'p', n),
            '~' => self.for_each_caret(ctx, |ctx, offset| edit::toggle_case_forward(ctx, offset, n)),
            'J' => self.join(ctx, n, true),
            'u' => self.undo(ctx, n, false),
            'v' => self.enter_visual(ctx, SelectionKind::Character, ReturnMode::Normal),
            'V' => self.enter_visual(ctx, SelectionKind::Line, ReturnMode::Normal),
            _ => Step::Rejected,
        }
    }

    fn normal_g(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        if key.is_ctrl('h') {
            return self.enter_select(ctx, SelectionKind::Block, ReturnMode::Normal, true);
        }
        let Some(ch) = key.printable() else {
            return Step::Rejected;
        };
        match ch {
            'g' => self.go(ctx, Destination::Motion(Motion::FirstLine), None),
            '~' => self.g_operator(Operator::ToggleCase),
            'u' => self.g_operator(Operator::Lowercase),
            'U' => self.g_operator(Operator::Uppercase),
            'h' => self.enter_select(ctx, SelectionKind::Character, ReturnMode::Normal, true),
            'H' => self.enter_select(ctx, SelectionKind::Line, ReturnMode::Normal, true),
            'v' => self.reselect(ctx),
            'J' => {
                let (count, _) = self.take_pending();
                self.join(ctx, count.unwrap_or(1), false)
            }
            'I' => {
                let (count, _) = self.take_pending();
                self.start_insert(ctx, InsertAt::LineStart, count.unwrap_or(1))
            }
            _ => Step::Rejected,
        }
    }

    fn g_operator(&mut self, op: Operator) -> Step {
        self.start_operator(op);
        Step::Pending
    }

    fn replace_char_key(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        if key == Key::ESC {
            self.pending = PendingCommand::default();
            return Step::Done;
        }
        let Some(ch) = literal_target(key) else {
            return Step::Rejected;
        };
        let (count, _) = self.take_pending();
        let n = count.unwrap_or(1);
        self.for_each_caret(ctx, |ctx, offset| edit::replace_chars(ctx, offset, ch, n))
    }

    fn set_mark_key(&mut self, ctx: &EditContext<'_>, key: Key) -> Step {
        self.pending = PendingCommand::default();
        match key.printable() {
            Some(name @ 'a'..='z') => {
                self.marks[mark_index(name)] = Some(ctx.host.carets().primary().offset);
                Step::Done
            }
            _ => Step::Rejected,
        }
    }

    fn jump_mark_key(&mut self, ctx: &mut EditContext<'_>, key: Key, linewise: bool, op: Option<Operator>) -> Step {
        let Some(name) = key.printable() else {
            return Step::Rejected;
        };
        if self.mark(name).is_none() {
            self.message = Some("E20: Mark not set".to_string());
            return Step::Rejected;
        }
        self.go(ctx, Destination::Mark { name, linewise }, op)
    }

    fn find_key(&mut self, ctx: &mut EditContext<'_>, key: Key, forward: bool, till: bool, op: Option<Operator>) -> Step {
        let Some(ch) = literal_target(key) else {
            return Step::Rejected;
        };
        let find = Find { ch, forward, till };
        self.last_find = Some(find);
        self.go(ctx, Destination::Motion(Motion::FindChar(find)), op)
    }

    /// Apply `edit` at every caret, last caret first. Rejected when it
    /// fails for all of them.
    fn for_each_caret(
        &mut self,
        ctx: &mut EditContext<'_>,
        mut edit: impl FnMut(&mut EditContext<'_>, usize) -> Option<usize>,
    ) -> Step {
        ctx.begin();
        let mut any = false;
        for index in ctx.host.carets().indices_by_offset_desc() {
            let offset = ctx.caret_offset(index);
            if let Some(caret) = edit(ctx, offset) {
                ctx.move_caret(index, caret);
                any = true;
            }
        }
        ctx.commit();
        if any { Step::Done } else { Step::Rejected }
    }

    fn put(&mut self, ctx: &mut EditContext<'_>, register: Option<char>, after: bool, count: usize) -> Step {
        self.for_each_caret(ctx, |ctx, offset| edit::paste(ctx, offset, register, after, count))
    }

    fn join(&mut self, ctx: &mut EditContext<'_>, count: usize, spaces: bool) -> Step {
        let mut lines_done = Vec::new();
        self.for_each_caret(ctx, |ctx, offset| {
            let line = ctx.host.line_of(offset);
            if lines_done.contains(&line) {
                return None;
            }
            lines_done.push(line);
            edit::join_lines(ctx, line, count, spaces)
        })
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>, count: usize, redo: bool) -> Step {
        ctx.commit();
        let mut caret = None;
        for _ in 0..count.max(1) {
            let restored = if redo {
                ctx.history.redo(ctx.host)
            } else {
                ctx.history.undo(ctx.host)
            };
            match restored {
                Some(offset) => caret = Some(offset),
                None => break,
            }
        }
        let Some(offset) = caret else {
            self.message = Some(
                if redo {
                    "Already at newest change"
                } else {
                    "Already at oldest change"
                }
                .to_string(),
            );
            return Step::Rejected;
        };
        let carets = ctx.host.carets_mut();
        carets.retain_primary();
        carets.primary_mut().move_to(offset);
        Step::Done
    }

    // -- Motions ------------------------------------------------------------

    fn motion_context(&self, ctx: &EditContext<'_>, operator: bool) -> MotionContext {
        MotionContext {
            past_end: !operator && self.mode.caret_past_end(),
            operator,
            scrolloff: ctx.options.count("scrolloff"),
        }
    }

    fn destination(&self, host: &dyn Host, caret: &Caret, dest: Destination, count: Option<usize>, mctx: MotionContext) -> Option<Target> {
        match dest {
            Destination::Motion(m) => motion::resolve(host, caret, m, count, mctx),
            Destination::Mark { name, linewise } => {
                let offset = self.mark(name)?.min(host.len_chars());
                Some(if linewise {
                    Target {
                        offset: motion::first_non_blank(host, host.line_of(offset)),
                        wise: Wise::Linewise,
                        sticky: None,
                    }
                } else {
                    Target {
                        offset: motion::clamp_caret(host, offset, mctx.past_end || mctx.operator),
                        wise: Wise::Exclusive,
                        sticky: None,
                    }
                })
            }
        }
    }

    /// Move every caret. Rejected when none could move.
    fn move_carets(&mut self, ctx: &mut EditContext<'_>, dest: Destination, count: Option<usize>) -> Step {
        let mctx = self.motion_context(ctx, false);
        let carets: Vec<Caret> = ctx.host.carets().iter().copied().collect();
        let mut moved = false;
        for (index, caret) in carets.iter().enumerate() {
            let Some(target) = self.destination(ctx.host, caret, dest, count, mctx) else {
                continue;
            };
            if let Some(c) = ctx.host.carets_mut().get_mut(index) {
                c.offset = target.offset;
                c.sticky_column = target.sticky;
            }
            moved = true;
        }
        if moved { Step::Done } else { Step::Rejected }
    }

    // -- Operators ----------------------------------------------------------

    fn handle_pending(&mut self, ctx: &mut EditContext<'_>, op: Operator, key: Key) -> Step {
        match std::mem::take(&mut self.pending.partial) {
            Partial::G => {
                return match key.printable() {
                    Some('g') => self.go(ctx, Destination::Motion(Motion::FirstLine), Some(op)),
                    Some(ch) if ch == op.doubling_key() && is_case_operator(op) => {
                        let (count, register) = self.take_pending();
                        self.operator_line(ctx, op, count.unwrap_or(1), register)
                    }
                    _ => Step::Rejected,
                };
            }
            Partial::Find { forward, till } => return self.find_key(ctx, key, forward, till, Some(op)),
            Partial::JumpMark { linewise } => return self.jump_mark_key(ctx, key, linewise, Some(op)),
            _ => {}
        }

        // Escape cancels the operator and any count.
        if key == Key::ESC {
            self.pending = PendingCommand::default();
            self.mode = Mode::Normal;
            return Step::Done;
        }
        if self.count_digit(key) {
            return Step::Pending;
        }

        // Same key = line operation (dd, yy, cc, >>, g~~).
        if key.printable() == Some(op.doubling_key()) {
            let (count, register) = self.take_pending();
            return self.operator_line(ctx, op, count.unwrap_or(1), register);
        }
        if let Some(step) = self.motion_prefix(ctx, key, Some(op)) {
            return step;
        }
        match simple_motion(key) {
            Some(motion) => self.go(ctx, Destination::Motion(motion), Some(op)),
            None => Step::Rejected,
        }
    }

    /// Apply `op` from every caret to where `dest` takes it.
    fn operate(
        &mut self,
        ctx: &mut EditContext<'_>,
        op: Operator,
        dest: Destination,
        count: Option<usize>,
        register: Option<char>,
    ) -> Step {
        let mctx = self.motion_context(ctx, true);
        ctx.begin();
        let mut applied_any = false;

        for index in ctx.host.carets().indices_by_offset_desc() {
            let Some(caret) = ctx.host.carets().get(index).copied() else {
                continue;
            };
            let target = change_word_target(ctx.host, &caret, op, dest, count)
                .or_else(|| self.destination(ctx.host, &caret, dest, count, mctx));
            let Some(target) = target else { continue };
            let span = match operator_span(ctx.host, caret.offset, target) {
                Some(span) => span,
                None if op == Operator::Change => Span::Chars(TextRange::point(caret.offset)),
                None => continue,
            };
            self.apply(ctx, index, op, span, register, 1);
            applied_any = true;
        }

        self.mode = Mode::Normal;
        if !applied_any {
            ctx.commit();
            return Step::Rejected;
        }
        if op == Operator::Change {
            self.begin_insert_session(Mode::Insert, 1, false);
        } else {
            ctx.commit();
        }
        Step::Done
    }

    /// Apply a line-wise operator (dd, yy, cc, >>) to `count` lines.
    ///
    /// `3dd` works on 3 lines starting from the caret's line; fewer remain
    /// near the end. A count on the last line fails.
    fn operator_line(&mut self, ctx: &mut EditContext<'_>, op: Operator, count: usize, register: Option<char>) -> Step {
        let count = count.max(1);
        let primary_line = ctx.host.line_of(ctx.host.carets().primary().offset);
        if count > 1 && primary_line == ctx.host.last_line() {
            self.mode = Mode::Normal;
            return Step::Rejected;
        }

        ctx.begin();
        let mut lines_done = Vec::new();
        for index in ctx.host.carets().indices_by_offset_desc() {
            let line = ctx.host.line_of(ctx.caret_offset(index));
            if lines_done.contains(&line) {
                continue;
            }
            lines_done.push(line);
            let last = (line + count - 1).min(ctx.host.last_line());
            self.apply(ctx, index, op, Span::Lines { first: line, last }, register, 1);
        }

        self.mode = Mode::Normal;
        if op == Operator::Change {
            self.begin_insert_session(Mode::Insert, 1, false);
        } else {
            ctx.commit();
        }
        Step::Done
    }

    /// Apply `op` for the caret at `index` and report the result.
    fn apply(&mut self, ctx: &mut EditContext<'_>, index: usize, op: Operator, span: Span, register: Option<char>, shift: usize) -> Vec<usize> {
        let (first, last) = span.lines(ctx.host);
        let lines = last - first + 1;
        let applied = edit::apply_operator(ctx, op, span, register, shift);
        ctx.move_caret(index, applied.caret);

        if op == Operator::Yank && lines > 2 {
            self.message = Some(match span {
                Span::Block { .. } => format!("block of {lines} lines yanked"),
                _ => format!("{lines} lines yanked"),
            });
        } else if applied.line_delta < -2 {
            self.message = Some(format!("{} fewer lines", applied.line_delta.unsigned_abs()));
        }
        applied.block_carets
    }

    // -- Insert entry -------------------------------------------------------

    fn begin_insert_session(&mut self, mode: Mode, repeat: usize, new_line: bool) {
        self.insert = InsertSession {
            repeat,
            new_line,
            ..InsertSession::default()
        };
        self.mode = mode;
    }

    fn start_insert(&mut self, ctx: &mut EditContext<'_>, at: InsertAt, count: usize) -> Step {
        let host: &dyn Host = &*ctx.host;
        let offsets: Vec<usize> = host
            .carets()
            .iter()
            .map(|caret| {
                let line = host.line_of(caret.offset);
                match at {
                    InsertAt::Caret => caret.offset,
                    InsertAt::After if host.line_len(line) > 0 => (caret.offset + 1).min(host.line_end(line)),
                    InsertAt::After => caret.offset,
                    InsertAt::FirstNonBlank => motion::first_non_blank(host, line),
                    InsertAt::LineStart => host.line_start(line),
                    InsertAt::LineEnd => host.line_end(line),
                }
            })
            .collect();
        for (index, offset) in offsets.into_iter().enumerate() {
            ctx.move_caret(index, offset);
        }
        ctx.begin();
        self.begin_insert_session(Mode::Insert, count, false);
        Step::Done
    }

    /// `o` / `O`
    fn open_line(&mut self, ctx: &mut EditContext<'_>, below: bool, count: usize) -> Step {
        ctx.begin();
        for index in ctx.host.carets().indices_by_offset_desc() {
            let line = ctx.host.line_of(ctx.caret_offset(index));
            if below {
                let end = ctx.host.line_end(line);
                ctx.replace(TextRange::point(end), "\n");
                ctx.move_caret(index, end + 1);
            } else {
                let start = ctx.host.line_start(line);
                ctx.replace(TextRange::point(start), "\n");
                ctx.move_caret(index, start);
            }
        }
        self.begin_insert_session(Mode::Insert, count, true);
        Step::Done
    }

    fn open_command_line(&mut self, prefill: &str) {
        self.command_line = CommandLine::with_text(prefill);
        self.mode = Mode::CommandLine;
    }

    // -- Scrolling ----------------------------------------------------------

    /// Ctrl-F Ctrl-B Ctrl-D Ctrl-U Ctrl-E Ctrl-Y and the page keys.
    fn scroll_key(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Option<Step> {
        let plain = key.modifiers.is_empty();
        let sctx = ctx.scroll_context(self.mode.caret_past_end());

        let movement = if key.is_ctrl('f') || (plain && key.code == KeyCode::PageDown) {
            let (count, _) = self.take_pending();
            scroll::scroll_full_page(ctx.host, true, count.unwrap_or(1), sctx)
        } else if key.is_ctrl('b') || (plain && key.code == KeyCode::PageUp) {
            let (count, _) = self.take_pending();
            scroll::scroll_full_page(ctx.host, false, count.unwrap_or(1), sctx)
        } else if key.is_ctrl('d') || key.is_ctrl('u') {
            let (count, _) = self.take_pending();
            if let Some(lines) = count {
                let lines = i64::try_from(lines).unwrap_or(i64::MAX);
                if let Err(err) = ctx.options.set(Scope::Local, "scroll", OptionValue::Number(lines)) {
                    debug!(%err, "scroll count not stored");
                }
            }
            let amount = scroll::half_page_amount(ctx.options.count("scroll"), ctx.host.viewport().height);
            scroll::scroll_half_page(ctx.host, key.is_ctrl('d'), amount, sctx)
        } else if key.is_ctrl('e') || key.is_ctrl('y') {
            let (count, _) = self.take_pending();
            scroll::scroll_lines(ctx.host, key.is_ctrl('e'), count.unwrap_or(1), sctx)
        } else {
            return None;
        };
        Some(movement_step(movement))
    }

    fn page(&mut self, ctx: &mut EditContext<'_>, down: bool) -> Step {
        let (count, _) = self.take_pending();
        let sctx = ctx.scroll_context(self.mode.caret_past_end());
        movement_step(scroll::scroll_full_page(ctx.host, down, count.unwrap_or(1), sctx))
    }

    /// `z` commands.
    fn scroll_z(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        let (count, _) = self.take_pending();
        let n = count.unwrap_or(1);
        let sctx = ctx.scroll_context(self.mode.caret_past_end());
        let half = ctx.host.viewport().width / 2;
        let host = &mut *ctx.host;

        let movement = match (key.code, key.printable()) {
            (KeyCode::Enter, _) => scroll::scroll_line_to(host, ScreenLocation::Top, count, true, sctx),
            (KeyCode::Left, _) => scroll::scroll_columns(host, false, n, sctx),
            (KeyCode::Right, _) => scroll::scroll_columns(host, true, n, sctx),
            (_, Some('t')) => scroll::scroll_line_to(host, ScreenLocation::Top, count, false, sctx),
            (_, Some('z')) => scroll::scroll_line_to(host, ScreenLocation::Middle, count, false, sctx),
            (_, Some('.')) => scroll::scroll_line_to(host, ScreenLocation::Middle, count, true, sctx),
            (_, Some('b')) => scroll::scroll_line_to(host, ScreenLocation::Bottom, count, false, sctx),
            (_, Some('-')) => scroll::scroll_line_to(host, ScreenLocation::Bottom, count, true, sctx),
            (_, Some('h')) => scroll::scroll_columns(host, false, n, sctx),
            (_, Some('l')) => scroll::scroll_columns(host, true, n, sctx),
            (_, Some('H')) => scroll::scroll_columns(host, false, half, sctx),
            (_, Some('L')) => scroll::scroll_columns(host, true, half, sctx),
            (_, Some('s')) => scroll::scroll_caret_column_to_edge(host, true, sctx),
            (_, Some('e')) => scroll::scroll_caret_column_to_edge(host, false, sctx),
            _ => return Step::Rejected,
        };
        movement_step(movement)
    }

    // -- Special keys -------------------------------------------------------

    /// A shifted arrow, Home/End, or page key outside a selection. With
    /// `keymodel=startsel` it starts Select (or Visual) mode.
    fn shifted_special(&mut self, ctx: &mut EditContext<'_>, key: Key, return_to: ReturnMode) -> Step {
        if ctx.options.has_token("keymodel", "startsel") {
            if ctx.options.has_token("selectmode", "key") {
                self.enter_select(ctx, SelectionKind::Character, return_to, false);
            } else {
                self.enter_visual(ctx, SelectionKind::Character, return_to);
            }
            return self.extend(ctx, key.unshifted());
        }
        self.shifted_action(ctx, key)
    }

    /// What a shifted special key does without `startsel`: words and pages.
    fn shifted_action(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        let dest = match key.code {
            KeyCode::Left => Motion::WordBack(WordKind::Word),
            KeyCode::Right => Motion::WordStart(WordKind::Word),
            KeyCode::Up | KeyCode::PageUp => return self.page(ctx, false),
            KeyCode::Down | KeyCode::PageDown => return self.page(ctx, true),
            _ => match simple_motion(key.unshifted()) {
                Some(m) => m,
                None => return Step::Rejected,
            },
        };
        let (count, _) = self.take_pending();
        self.move_carets(ctx, Destination::Motion(dest), count)
    }

    /// Move the caret with an unshifted special key, keeping any anchor.
    fn extend(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        match key.code {
            KeyCode::PageUp => self.page(ctx, false),
            KeyCode::PageDown => self.page(ctx, true),
            _ => match simple_motion(key) {
                Some(m) => {
                    let (count, _) = self.take_pending();
                    self.move_carets(ctx, Destination::Motion(m), count)
                }
                None => Step::Rejected,
            },
        }
    }

    /// Run `key` again in the mode a selection just returned to.
    fn redispatch(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        match self.mode {
            Mode::Insert | Mode::Replace => self.handle_insert(ctx, key),
            _ => self.handle_normal(ctx, key),
        }
    }

    // -- Visual and Select entry --------------------------------------------

    fn enter_visual(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode) -> Step {
        for caret in ctx.host.carets_mut().iter_mut() {
            caret.selection_start = Some(caret.offset);
        }
        self.mode = Mode::Visual { kind, return_to };
        Step::Done
    }

    /// Start Select mode. `gh` selects the char under the caret; a shifted
    /// key starts empty and lets the motion make the selection.
    fn enter_select(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode, include_caret_char: bool) -> Step {
        let host: &dyn Host = &*ctx.host;
        let offsets: Vec<usize> = host
            .carets()
            .iter()
            .map(|caret| {
                if include_caret_char && kind != SelectionKind::Line {
                    (caret.offset + 1).min(host.line_end(host.line_of(caret.offset)))
                } else {
                    caret.offset
                }
            })
            .collect();
        for (caret, offset) in ctx.host.carets_mut().iter_mut().zip(offsets) {
            caret.selection_start = Some(caret.offset);
            caret.offset = offset;
        }
        self.mode = Mode::Select { kind, return_to };
        Step::Done
    }

    /// `gv`
    fn reselect(&mut self, ctx: &mut EditContext<'_>) -> Step {
        self.pending = PendingCommand::default();
        let Some(last) = self.last_visual else {
            return Step::Rejected;
        };
        let len = ctx.host.len_chars();
        let carets = ctx.host.carets_mut();
        carets.retain_primary();
        let caret = carets.primary_mut();
        caret.move_to(last.caret.min(len));
        caret.selection_start = Some(last.anchor.min(len));
        self.mode = Mode::visual(last.kind);
        Step::Done
    }

    fn remember_visual(&mut self, host: &dyn Host, kind: SelectionKind) {
        let caret = host.carets().primary();
        if let Some(anchor) = caret.selection_start {
            self.last_visual = Some(LastVisual {
                anchor,
                caret: caret.offset,
                kind,
            });
        }
    }

    /// Leave Visual or Select mode for `return_to`.
    fn exit_visual(&mut self, ctx: &mut EditContext<'_>, return_to: ReturnMode) {
        if let Some(kind) = self.mode.selection_kind() {
            self.remember_visual(ctx.host, kind);
        }
        for caret in ctx.host.carets_mut().iter_mut() {
            caret.clear_selection();
        }
        let mode = return_to.mode();
        if mode.is_input() {
            ctx.begin();
            self.begin_insert_session(mode, 1, false);
        } else {
            self.mode = mode;
        }
        self.clamp_carets(ctx);
    }

    /// Ctrl-G from Visual: the caret moves past the last selected char.
    fn visual_to_select(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode) -> Step {
        if kind != SelectionKind::Line {
            let host: &dyn Host = &*ctx.host;
            let offsets: Vec<usize> = host
                .carets()
                .iter()
                .map(|c| match c.selection_start {
                    Some(anchor) if c.offset >= anchor => (c.offset + 1).min(host.line_end(host.line_of(c.offset))),
                    _ => c.offset,
                })
                .collect();
            for (caret, offset) in ctx.host.carets_mut().iter_mut().zip(offsets) {
                caret.offset = offset;
            }
        }
        self.mode = Mode::Select { kind, return_to };
        Step::Done
    }

    /// Ctrl-G from Select: the caret moves back onto the last selected char.
    fn select_to_visual(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode) -> Step {
        if kind != SelectionKind::Line {
            for caret in ctx.host.carets_mut().iter_mut() {
                if caret.selection_start.is_some_and(|anchor| caret.offset > anchor) {
                    caret.offset -= 1;
                }
            }
        }
        self.mode = Mode::Visual { kind, return_to };
        Step::Done
    }

    // -- Visual mode --------------------------------------------------------

    fn handle_visual(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode, key: Key) -> Step {
        match std::mem::take(&mut self.pending.partial) {
            Partial::G => return self.visual_g(ctx, kind, return_to, key),
            Partial::Z => return self.scroll_z(ctx, key),
            Partial::Register => return self.take_register_name(key),
            Partial::Find { forward, till } => return self.find_key(ctx, key, forward, till, None),
            Partial::ReplaceChar => return self.visual_fill(ctx, kind, return_to, key),
            Partial::JumpMark { linewise } => return self.jump_mark_key(ctx, key, linewise, None),
            _ => {}
        }

        if key == Key::ESC || key.is_ctrl('c') {
            self.pending = PendingCommand::default();
            self.exit_visual(ctx, return_to);
            return Step::Done;
        }
        if self.count_digit(key) {
            return Step::Pending;
        }
        if key.is_ctrl('v') {
            return self.switch_visual(ctx, SelectionKind::Block, kind, return_to);
        }
        if key.is_ctrl('g') {
            return self.visual_to_select(ctx, kind, return_to);
        }
        if key.is_shifted_special() {
            return if ctx.options.has_token("keymodel", "continuevisual") {
                self.extend(ctx, key.unshifted())
            } else {
                self.shifted_action(ctx, key)
            };
        }
        if key.is_special_motion() {
            if ctx.options.has_token("keymodel", "stopvisual") || ctx.options.has_token("keymodel", "stopsel") {
                self.exit_visual(ctx, return_to);
                return self.redispatch(ctx, key);
            }
            return self.extend(ctx, key);
        }
        if let Some(step) = self.motion_prefix(ctx, key, None) {
            return step;
        }
        match key.printable() {
            Some('"') => return self.wait_for(Partial::Register),
            Some('z') => return self.wait_for(Partial::Z),
            Some('r') => return self.wait_for(Partial::ReplaceChar),
            _ => {}
        }
        if let Some(step) = self.scroll_key(ctx, key) {
            return step;
        }
        if let Some(motion) = simple_motion(key) {
            let (count, _) = self.take_pending();
            return self.move_carets(ctx, Destination::Motion(motion), count);
        }
        self.visual_command(ctx, kind, return_to, key)
    }

    fn visual_command(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode, key: Key) -> Step {
        let (count, register) = self.take_pending();
        let n = count.unwrap_or(1).max(1);
        if key.code == KeyCode::Delete && key.modifiers.is_empty() {
            return self.visual_operator(ctx, Operator::Delete, kind, return_to, register, 1, false);
        }
        let Some(ch) = key.printable() else {
            return Step::Rejected;
        };
        // X D Y S R C work on whole lines (D and C to the line end in a block).
        let lines = SelectionKind::Line;
        let block = kind == SelectionKind::Block;
        match ch {
            'v' => self.switch_visual(ctx, SelectionKind::Character, kind, return_to),
            'V' => self.switch_visual(ctx, SelectionKind::Line, kind, return_to),
            'o' | 'O' => {
                for caret in ctx.host.carets_mut().iter_mut() {
                    if let Some(anchor) = caret.selection_start {
                        caret.selection_start = Some(caret.offset);
                        caret.move_to(anchor);
                    }
                }
                Step::Done
            }
            ':' => {
                self.exit_visual(ctx, ReturnMode::Normal);
                self.open_command_line("'<,'>");
                Step::Done
            }
            'd' | 'x' => self.visual_operator(ctx, Operator::Delete, kind, return_to, register, 1, false),
            'D' if block => self.visual_operator(ctx, Operator::Delete, kind, return_to, register, 1, true),
            'X' | 'D' => self.visual_operator(ctx, Operator::Delete, lines, return_to, register, 1, false),
            'y' => self.visual_operator(ctx, Operator::Yank, kind, return_to, register, 1, false),
            'Y' => self.visual_operator(ctx, Operator::Yank, lines, return_to, register, 1, false),
            'c' | 's' => self.visual_operator(ctx, Operator::Change, kind, return_to, register, 1, false),
            'C' if block => self.visual_operator(ctx, Operator::Change, kind, return_to, register, 1, true),
            'C' | 'S' | 'R' => self.visual_operator(ctx, Operator::Change, lines, return_to, register, 1, false),
            '>' => self.visual_operator(ctx, Operator::ShiftRight, kind, return_to, register, n, false),
            '<' => self.visual_operator(ctx, Operator::ShiftLeft, kind, return_to, register, n, false),
            '~' => self.visual_operator(ctx, Operator::ToggleCase, kind, return_to, register, 1, false),
            'u' => self.visual_operator(ctx, Operator::Lowercase, kind, return_to, register, 1, false),
            'U' => self.visual_operator(ctx, Operator::Uppercase, kind, return_to, register, 1, false),
            'J' => self.visual_join(ctx, kind, return_to, true),
            'p' | 'P' => self.visual_put(ctx, kind, return_to, register),
            'I' | 'A' if block => self.block_insert(ctx, ch == 'A'),
            _ => Step::Rejected,
        }
    }

    fn visual_g(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode, key: Key) -> Step {
        match key.printable() {
            Some('g') => self.go(ctx, Destination::Motion(Motion::FirstLine), None),
            Some('J') => {
                self.pending = PendingCommand::default();
                self.visual_join(ctx, kind, return_to, false)
            }
            Some('v') => self.reselect(ctx),
            _ => Step::Rejected,
        }
    }

    /// `v` / `V` / Ctrl-V inside Visual: the same kind ends it, another
    /// kind switches in place.
    fn switch_visual(&mut self, ctx: &mut EditContext<'_>, new_kind: SelectionKind, kind: SelectionKind, return_to: ReturnMode) -> Step {
        self.pending = PendingCommand::default();
        if new_kind == kind {
            self.exit_visual(ctx, return_to);
        } else {
            self.mode = Mode::Visual {
                kind: new_kind,
                return_to,
            };
        }
        Step::Done
    }

    /// The span the caret's selection covers.
    fn selection_span(host: &dyn Host, caret: &Caret, kind: SelectionKind, exclusive: bool, to_eol: bool) -> Option<Span> {
        let anchor = caret.selection_start?;
        let (lo, hi) = (anchor.min(caret.offset), anchor.max(caret.offset));
        Some(match kind {
            SelectionKind::Character => {
                let end = if exclusive { hi } else { (hi + 1).min(host.len_chars()) };
                if end <= lo {
                    return None;
                }
                Span::Chars(TextRange::new(lo, end))
            }
            SelectionKind::Line => Span::Lines {
                first: host.line_of(lo),
                last: host.line_of(hi),
            },
            SelectionKind::Block => {
                let (left, right) = block_columns(host, anchor, caret, exclusive);
                Span::Block {
                    first: host.line_of(lo),
                    last: host.line_of(hi),
                    left,
                    right: if to_eol { Caret::END_OF_LINE } else { right },
                }
            }
        })
    }

    /// Apply `op` to every selection and leave the selection mode.
    #[allow(clippy::too_many_arguments)]
    fn visual_operator(
        &mut self,
        ctx: &mut EditContext<'_>,
        op: Operator,
        kind: SelectionKind,
        return_to: ReturnMode,
        register: Option<char>,
        shift: usize,
        to_eol: bool,
    ) -> Step {
        let exclusive = self.exclusive_selection(ctx);
        if let Some(current) = self.mode.selection_kind() {
            self.remember_visual(ctx.host, current);
        }
        ctx.begin();
        let mut block_carets = Vec::new();
        for index in ctx.host.carets().indices_by_offset_desc() {
            let Some(caret) = ctx.host.carets().get(index).copied() else {
                continue;
            };
            if let Some(span) = Self::selection_span(ctx.host, &caret, kind, exclusive, to_eol) {
                block_carets.extend(self.apply(ctx, index, op, span, register, shift));
            } else if let Some(anchor) = caret.selection_start {
                ctx.move_caret(index, anchor.min(caret.offset));
            }
        }
        for caret in ctx.host.carets_mut().iter_mut() {
            caret.clear_selection();
        }

        if op == Operator::Change {
            if block_carets.len() > 1 {
                place_carets(ctx.host, &block_carets);
                self.begin_insert_session(Mode::Insert, 1, false);
                self.insert.block = true;
            } else {
                self.begin_insert_session(Mode::Insert, 1, false);
            }
        } else {
            ctx.commit();
            let mode = return_to.mode();
            if mode.is_input() {
                ctx.begin();
                self.begin_insert_session(mode, 1, false);
            } else {
                self.mode = mode;
            }
        }
        Step::Done
    }

    fn visual_join(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode, spaces: bool) -> Step {
        let exclusive = self.exclusive_selection(ctx);
        self.remember_visual(ctx.host, kind);
        let caret = *ctx.host.carets().primary();
        let Some(span) = Self::selection_span(ctx.host, &caret, kind, exclusive, false) else {
            return Step::Rejected;
        };
        let (first, last) = span.lines(ctx.host);
        self.exit_visual(ctx, return_to);
        ctx.begin();
        let joined = edit::join_lines(ctx, first, last - first + 1, spaces);
        if let Some(offset) = joined {
            let primary = ctx.host.carets().primary_index();
            ctx.move_caret(primary, offset);
        }
        ctx.commit();
        if joined.is_some() { Step::Done } else { Step::Rejected }
    }

    fn visual_put(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode, register: Option<char>) -> Step {
        let exclusive = self.exclusive_selection(ctx);
        self.remember_visual(ctx.host, kind);
        ctx.begin();
        let mut any = false;
        for index in ctx.host.carets().indices_by_offset_desc() {
            let Some(caret) = ctx.host.carets().get(index).copied() else {
                continue;
            };
            let Some(span) = Self::selection_span(ctx.host, &caret, kind, exclusive, false) else {
                continue;
            };
            if let Some(offset) = edit::replace_with_register(ctx, span, register) {
                ctx.move_caret(index, offset);
                any = true;
            }
        }
        for caret in ctx.host.carets_mut().iter_mut() {
            caret.clear_selection();
        }
        ctx.commit();
        self.mode = return_to.mode();
        if any { Step::Done } else { Step::Rejected }
    }

    /// `r{c}` in Visual: every selected char becomes `c`.
    fn visual_fill(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode, key: Key) -> Step {
        self.pending = PendingCommand::default();
        if key == Key::ESC {
            return Step::Done;
        }
        let Some(ch) = literal_target(key).filter(|&c| c != '\n') else {
            return Step::Rejected;
        };
        let exclusive = self.exclusive_selection(ctx);
        self.remember_visual(ctx.host, kind);
        ctx.begin();
        for index in ctx.host.carets().indices_by_offset_desc() {
            let Some(caret) = ctx.host.carets().get(index).copied() else {
                continue;
            };
            if let Some(span) = Self::selection_span(ctx.host, &caret, kind, exclusive, false) {
                let offset = edit::fill_span(ctx, span, ch);
                ctx.move_caret(index, offset);
            }
        }
        for caret in ctx.host.carets_mut().iter_mut() {
            caret.clear_selection();
        }
        ctx.commit();
        self.mode = return_to.mode();
        Step::Done
    }

    /// Block `I` / `A`: one caret per line at the block's left or right
    /// edge, typing into all of them.
    fn block_insert(&mut self, ctx: &mut EditContext<'_>, append: bool) -> Step {
        let exclusive = self.exclusive_selection(ctx);
        self.remember_visual(ctx.host, SelectionKind::Block);
        let caret = *ctx.host.carets().primary();
        let Some(Span::Block {
            first,
            last,
            left,
            right,
        }) = Self::selection_span(ctx.host, &caret, SelectionKind::Block, exclusive, false)
        else {
            return Step::Rejected;
        };

        let host: &dyn Host = &*ctx.host;
        let offsets: Vec<usize> = (first..=last)
            .filter(|&line| append || host.line_display_width(line) >= left)
            .map(|line| {
                if append {
                    edit::block_segment(host, line, right, right).start
                } else {
                    edit::block_segment(host, line, left, left).start
                }
            })
            .collect();
        if offsets.is_empty() {
            return Step::Rejected;
        }
        place_carets(ctx.host, &offsets);
        ctx.begin();
        self.begin_insert_session(Mode::Insert, 1, false);
        self.insert.block = offsets.len() > 1;
        Step::Done
    }

    // -- Select mode --------------------------------------------------------

    fn handle_select(&mut self, ctx: &mut EditContext<'_>, kind: SelectionKind, return_to: ReturnMode, key: Key) -> Step {
        if key == Key::ESC || key.is_ctrl('c') {
            self.exit_visual(ctx, return_to);
            return Step::Done;
        }
        if key.is_ctrl('g') {
            return self.select_to_visual(ctx, kind, return_to);
        }
        if key.is_shifted_special() {
            let keymodel = |token| ctx.options.has_token("keymodel", token);
            return if keymodel("continueselect") || keymodel("startsel") {
                self.extend(ctx, key.unshifted())
            } else {
                self.shifted_action(ctx, key)
            };
        }
        if key.is_special_motion() {
            if ctx.options.has_token("keymodel", "stopselect") || ctx.options.has_token("keymodel", "stopsel") {
                self.exit_visual(ctx, return_to);
                return self.redispatch(ctx, key);
            }
            return self.extend(ctx, key);
        }
        if key.is_ctrl('h') || matches!(key.code, KeyCode::Backspace | KeyCode::Delete) {
            return self.visual_operator(ctx, Operator::Delete, kind, return_to, None, 1, false);
        }
        // Typed text replaces the selection.
        if key.printable().is_some() || matches!(key.code, KeyCode::Enter | KeyCode::Tab) {
            self.visual_operator(ctx, Operator::Change, kind, return_to, None, 1, false);
            return self.handle_insert(ctx, key);
        }
        Step::Rejected
    }

    // -- Insert and Replace mode --------------------------------------------

    fn handle_insert(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        let partial = std::mem::take(&mut self.pending.partial);
        if partial != Partial::None {
            return self.literal_partial(ctx, partial, key);
        }

        if key == Key::ESC || key.is_ctrl('c') || key.is_ctrl('[') {
            self.finish_insert(ctx);
            return Step::Done;
        }
        if key.is_ctrl('k') {
            return self.wait_for(Partial::Digraph);
        }
        if key.is_ctrl('r') {
            return self.wait_for(Partial::InsertRegister);
        }
        if key.is_ctrl('v') || key.is_ctrl('q') {
            return self.wait_for(Partial::Literal);
        }
        if key.is_ctrl('w') {
            return self.delete_before(ctx, true);
        }
        if key.is_ctrl('u') {
            return self.delete_before(ctx, false);
        }
        if key.is_ctrl('h') {
            return self.backspace(ctx);
        }
        if key.is_ctrl('j') || key.is_ctrl('m') {
            return self.type_text(ctx, "\n");
        }
        if key.is_ctrl('t') || key.is_ctrl('d') {
            return self.shift_current_lines(ctx, key.is_ctrl('t'));
        }
        if key.is_shifted_special() {
            self.break_insert(ctx);
            ctx.commit();
            return self.shifted_special(ctx, key, ReturnMode::of(self.mode));
        }
        if key.is_special_motion() {
            self.break_insert(ctx);
            return self.extend(ctx, key);
        }

        match key.code {
            KeyCode::Enter => return self.type_text(ctx, "\n"),
            KeyCode::Tab => {
                let text = tab_text(ctx);
                return self.type_text(ctx, &text);
            }
            KeyCode::Backspace => return self.backspace(ctx),
            KeyCode::Delete => return self.delete_under(ctx),
            KeyCode::Insert => {
                self.mode = if self.mode == Mode::Insert { Mode::Replace } else { Mode::Insert };
                self.insert.replaced.clear();
                return Step::Done;
            }
            _ => {}
        }
        match key.printable() {
            Some(ch) => self.type_text(ctx, &ch.to_string()),
            None => Step::Rejected,
        }
    }

    /// The key after Ctrl-K, Ctrl-R, or Ctrl-V.
    fn literal_partial(&mut self, ctx: &mut EditContext<'_>, partial: Partial, key: Key) -> Step {
        if key == Key::ESC {
            return Step::Done;
        }
        let text = match partial {
            Partial::Digraph => {
                return match key.printable() {
                    Some(first) => self.wait_for(Partial::DigraphSecond(first)),
                    None => Step::Rejected,
                };
            }
            Partial::DigraphSecond(first) => {
                let Some(second) = key.printable() else {
                    return Step::Rejected;
                };
                ctx.digraphs.lookup(first, second).unwrap_or(second).to_string()
            }
            Partial::InsertRegister => match key.printable() {
                Some(name) if is_register_name(name) => ctx.registers.get(Some(name)).content().to_string(),
                _ => return Step::Rejected,
            },
            Partial::Literal => match literal_char(key) {
                Some(ch) => ch.to_string(),
                None => return Step::Rejected,
            },
            _ => return Step::Rejected,
        };
        self.type_text(ctx, &text)
    }

    /// Type `text` into the buffer or the `:` prompt.
    fn type_text(&mut self, ctx: &mut EditContext<'_>, text: &str) -> Step {
        if self.mode == Mode::CommandLine {
            self.command_line.insert_str(text);
        } else {
            self.insert_text(ctx, text);
        }
        Step::Done
    }

    /// Insert `text` at every caret; Replace mode overwrites the chars
    /// under it first.
    fn insert_text(&mut self, ctx: &mut EditContext<'_>, text: &str) {
        ctx.begin();
        let replace = self.mode == Mode::Replace;
        let len = text.chars().count();
        let caret_count = ctx.host.carets().len();
        if self.insert.replaced.len() < caret_count {
            self.insert.replaced.resize(caret_count, Vec::new());
        }

        for index in ctx.host.carets().indices_by_offset_desc() {
            let offset = ctx.caret_offset(index);
            if replace {
                let mut at = offset;
                for ch in text.chars() {
                    let old = ctx.host.char_at(at).filter(|&c| c != '\n' && ch != '\n');
                    let range = if old.is_some() { TextRange::new(at, at + 1) } else { TextRange::point(at) };
                    ctx.replace(range, &ch.to_string());
                    self.insert.replaced[index].push(old);
                    at += 1;
                }
            } else {
                ctx.replace(TextRange::point(offset), text);
            }
            ctx.move_caret(index, offset + len);
        }
        self.insert.typed.push_str(text);
    }

    fn backspace(&mut self, ctx: &mut EditContext<'_>) -> Step {
        ctx.begin();
        let replace = self.mode == Mode::Replace;
        let mut any = false;
        for index in ctx.host.carets().indices_by_offset_desc() {
            let offset = ctx.caret_offset(index);
            if offset == 0 {
                continue;
            }
            let range = TextRange::new(offset - 1, offset);
            if replace {
                match self.insert.replaced.get_mut(index).and_then(Vec::pop) {
                    Some(Some(ch)) => ctx.replace(range, &ch.to_string()),
                    Some(None) => ctx.replace(range, ""),
                    None if offset == ctx.host.line_start(ctx.host.line_of(offset)) => continue,
                    None => {}
                }
            } else {
                ctx.replace(range, "");
            }
            ctx.move_caret(index, offset - 1);
            any = true;
        }
        self.insert.typed.pop();
        if any { Step::Done } else { Step::Rejected }
    }

    fn delete_under(&mut self, ctx: &mut EditContext<'_>) -> Step {
        ctx.begin();
        let len = ctx.host.len_chars();
        let mut any = false;
        for index in ctx.host.carets().indices_by_offset_desc() {
            let offset = ctx.caret_offset(index);
            if offset < len {
                ctx.replace(TextRange::new(offset, offset + 1), "");
                any = true;
            }
        }
        if any { Step::Done } else { Step::Rejected }
    }

    /// Ctrl-W (`word`) or Ctrl-U: delete back to the previous word start or
    /// the indent. At the line start, the line break goes.
    fn delete_before(&mut self, ctx: &mut EditContext<'_>, word: bool) -> Step {
        ctx.begin();
        let mut any = false;
        for index in ctx.host.carets().indices_by_offset_desc() {
            let offset = ctx.caret_offset(index);
            let line = ctx.host.line_of(offset);
            let line_start = ctx.host.line_start(line);
            let start = if offset == line_start {
                offset.saturating_sub(1)
            } else if word {
                word::prev_word_start(ctx.host, offset, WordKind::Word).max(line_start)
            } else {
                let indent = motion::first_non_blank(ctx.host, line);
                if offset > indent { indent } else { line_start }
            };
            if start < offset {
                ctx.replace(TextRange::new(start, offset), "");
                ctx.move_caret(index, start);
                any = true;
            }
        }
        self.insert.typed.clear();
        if any { Step::Done } else { Step::Rejected }
    }

    /// Ctrl-T / Ctrl-D: shift the caret lines one `shiftwidth`.
    fn shift_current_lines(&mut self, ctx: &mut EditContext<'_>, right: bool) -> Step {
        ctx.begin();
        let mut lines: Vec<usize> = ctx.host.carets().iter().map(|c| ctx.host.line_of(c.offset)).collect();
        lines.dedup();
        for line in lines {
            edit::shift_lines(ctx, line, line, right, 1);
        }
        Step::Done
    }

    /// Cursor keys in Insert mode start a new undo step and drop the count.
    fn break_insert(&mut self, ctx: &mut EditContext<'_>) {
        ctx.commit();
        ctx.begin();
        let mode = self.mode;
        self.begin_insert_session(mode, 1, false);
    }

    /// Escape from Insert or Replace: replay the text for a count, close the
    /// undo step, and step the caret left.
    fn finish_insert(&mut self, ctx: &mut EditContext<'_>) {
        let session = std::mem::take(&mut self.insert);
        if session.repeat > 1 && !session.typed.is_empty() {
            let unit = if session.new_line {
                format!("\n{}", session.typed)
            } else {
                session.typed.clone()
            };
            self.insert_text(ctx, &unit.repeat(session.repeat - 1));
            self.insert = InsertSession::default();
        }
        ctx.commit();
        if session.block {
            ctx.host.carets_mut().retain_primary();
        }

        let host: &dyn Host = &*ctx.host;
        let offsets: Vec<usize> = host
            .carets()
            .iter()
            .map(|c| {
                let start = host.line_start(host.line_of(c.offset));
                if c.offset > start { c.offset - 1 } else { c.offset }
            })
            .collect();
        for (index, offset) in offsets.into_iter().enumerate() {
            ctx.move_caret(index, offset);
        }
        self.mode = Mode::Normal;
    }

    // -- Command-line mode --------------------------------------------------

    fn handle_command(&mut self, ctx: &mut EditContext<'_>, key: Key) -> Step {
        let partial = std::mem::take(&mut self.pending.partial);
        if partial != Partial::None {
            return self.literal_partial(ctx, partial, key);
        }
        if key.is_ctrl('k') {
            return self.wait_for(Partial::Digraph);
        }
        if key.is_ctrl('r') {
            return self.wait_for(Partial::InsertRegister);
        }
        if key.is_ctrl('v') || key.is_ctrl('q') {
            return self.wait_for(Partial::Literal);
        }
        match self.command_line.handle_key(key) {
            LineEdit::Continue => Step::Done,
            LineEdit::Submit(line) => {
                self.mode = Mode::Normal;
                Step::Ex(line)
            }
            LineEdit::Cancel => {
                self.mode = Mode::Normal;
                Step::Done
            }
            LineEdit::Ignored => Step::Rejected,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn mark_index(name: char) -> usize {
    (u32::from(name) - u32::from('a')) as usize
}

const fn movement_step(movement: Movement) -> Step {
    if movement.bell() { Step::Rejected } else { Step::Done }
}

const fn is_case_operator(op: Operator) -> bool {
    matches!(op, Operator::ToggleCase | Operator::Lowercase | Operator::Uppercase)
}

/// Operators that start with a single key in Normal mode.
fn operator_key(key: Key) -> Option<Operator> {
    Some(match key.printable()? {
        'd' => Operator::Delete,
        'c' => Operator::Change,
        'y' => Operator::Yank,
        '>' => Operator::ShiftRight,
        '<' => Operator::ShiftLeft,
        _ => return None,
    })
}

/// Motions that take one key.
fn simple_motion(key: Key) -> Option<Motion> {
    if key.is_ctrl('h') {
        return Some(Motion::Left);
    }
    if key.is_ctrl('j') || key.is_ctrl('n') {
        return Some(Motion::Down);
    }
    if key.is_ctrl('p') {
        return Some(Motion::Up);
    }
    if let Some(ch) = key.printable() {
        return Some(match ch {
            'h' => Motion::Left,
            'l' | ' ' => Motion::Right,
            'j' => Motion::Down,
            'k' => Motion::Up,
            '0' => Motion::LineStart,
            '^' => Motion::FirstNonBlank,
            '$' => Motion::LineEnd,
            'w' => Motion::WordStart(WordKind::Word),
            'W' => Motion::WordStart(WordKind::Big),
            'b' => Motion::WordBack(WordKind::Word),
            'B' => Motion::WordBack(WordKind::Big),
            'e' => Motion::WordEnd(WordKind::Word),
            'E' => Motion::WordEnd(WordKind::Big),
            'G' => Motion::LastLine,
            '}' => Motion::ParagraphForward,
            '{' => Motion::ParagraphBackward,
            'H' => Motion::WindowTop,
            'M' => Motion::WindowMiddle,
            'L' => Motion::WindowBottom,
            '+' => Motion::NextLineStart,
            '-' => Motion::PrevLineStart,
            '_' => Motion::CurrentLineStart,
            '|' => Motion::Column,
            _ => return None,
        });
    }
    if !key.modifiers.is_empty() {
        return None;
    }
    Some(match key.code {
        KeyCode::Left | KeyCode::Backspace => Motion::Left,
        KeyCode::Right => Motion::Right,
        KeyCode::Up => Motion::Up,
        KeyCode::Down => Motion::Down,
        KeyCode::Home => Motion::LineStart,
        KeyCode::End => Motion::LineEnd,
        KeyCode::Enter => Motion::NextLineStart,
        _ => return None,
    })
}

/// The char an `f` / `r` target key stands for.
fn literal_target(key: Key) -> Option<char> {
    if let Some(ch) = key.printable() {
        return Some(ch);
    }
    match key.code {
        KeyCode::Tab => Some('\t'),
        KeyCode::Enter => Some('\n'),
        _ => None,
    }
}

/// The char Ctrl-V inserts for `key`.
fn literal_char(key: Key) -> Option<char> {
    if let KeyCode::Char(ch) = key.code {
        if key.is_ctrl(ch) && ch.is_ascii_alphabetic() {
            return char::from_u32(u32::from(ch.to_ascii_uppercase()) - 0x40);
        }
    }
    if let Some(ch) = key.printable() {
        return Some(ch);
    }
    match key.code {
        KeyCode::Tab => Some('\t'),
        KeyCode::Enter => Some('\r'),
        KeyCode::Escape => Some('\u{1b}'),
        _ => None,
    }
}

fn tab_text(ctx: &EditContext<'_>) -> String {
    if !ctx.options.flag("expandtab") {
        return "\t".to_string();
    }
    let ts = ctx.options.count("tabstop").max(1);
    let column = ctx.host.display_column(ctx.host.carets().primary().offset);
    " ".repeat(ts - column % ts)
}

/// `cw` on a non-blank changes to the end of the word, not up to the next
/// one.
fn change_word_target(host: &dyn Host, caret: &Caret, op: Operator, dest: Destination, count: Option<usize>) -> Option<Target> {
    let Destination::Motion(Motion::WordStart(kind)) = dest else {
        return None;
    };
    if op != Operator::Change || host.char_at(caret.offset).is_none_or(char::is_whitespace) {
        return None;
    }
    let mut end = word::current_word_end(host, caret.offset, kind);
    for _ in 1..count.unwrap_or(1).max(1) {
        end = word::next_word_end(host, end, kind);
    }
    Some(Target {
        offset: end,
        wise: Wise::Inclusive,
        sticky: None,
    })
}

/// The span an operator covers from `from` to `target`.
///
/// An exclusive motion that ends in column 0 of a later line stops at the
/// end of the line before; when it also started at or before the first
/// non-blank it becomes linewise.
fn operator_span(host: &dyn Host, from: usize, target: Target) -> Option<Span> {
    let (lo, hi) = (from.min(target.offset), from.max(target.offset));
    let (lo_line, hi_line) = (host.line_of(lo), host.line_of(hi));
    match target.wise {
        Wise::Linewise => Some(Span::Lines {
            first: lo_line,
            last: hi_line,
        }),
        Wise::Inclusive => {
            let end = if hi < host.line_end(hi_line) { hi + 1 } else { hi };
            (end > lo).then_some(Span::Chars(TextRange::new(lo, end)))
        }
        Wise::Exclusive => {
            if lo == hi {
                return None;
            }
            if hi_line > lo_line && hi == host.line_start(hi_line) {
                if lo <= motion::first_non_blank(host, lo_line) {
                    return Some(Span::Lines {
                        first: lo_line,
                        last: hi_line - 1,
                    });
                }
                return Some(Span::Chars(TextRange::new(lo, host.line_end(hi_line - 1))));
            }
            Some(Span::Chars(TextRange::new(lo, hi)))
        }
    }
}

/// Display columns `(left, right)` of a block selection, `right` exclusive.
fn block_columns(host: &dyn Host, anchor: usize, caret: &Caret, exclusive: bool) -> (usize, usize) {
    let a = host.display_column(anchor);
    let c = host.display_column(caret.offset);
    let left = a.min(c);
    if caret.sticky_column == Some(Caret::END_OF_LINE) {
        return (left, Caret::END_OF_LINE);
    }
    let (right_offset, right_col) = if a >= c { (anchor, a) } else { (caret.offset, c) };
    if exclusive {
        return (left, right_col.max(left + 1));
    }
    let tab = host.tab_width().max(1);
    let width = host.char_at(right_offset).map_or(1, |ch| char_width(ch, right_col, tab).max(1));
    (left, right_col + width)
}

/// Replace the caret set with one caret per offset, the first primary.
fn place_carets(host: &mut dyn Host, offsets: &[usize]) {
    let Some((&first, rest)) = offsets.split_first() else {
        return;
    };
    let carets = host.carets_mut();
    carets.retain_primary();
    carets.primary_mut().move_to(first);
    carets.primary_mut().clear_selection();
    for &offset in rest {
        carets.add(Caret::at(offset));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digraph::Digraphs;
    use crate::history::History;
    use crate::host::MemoryHost;
    use crate::key::parse_keys;
    use crate::options::Options;
    use crate::position::Position;
    use crate::register::RegisterFile;
    use pretty_assertions::assert_eq;

    struct Harness {
        host: MemoryHost,
        options: Options,
        registers: RegisterFile,
        history: History,
        digraphs: Digraphs,
        state: State,
    }

    impl Harness {
        fn new(text: &str) -> Self {
            Self {
                host: MemoryHost::new(text),
                options: Options::new(),
                registers: RegisterFile::new(),
                history: History::default(),
                digraphs: Digraphs::new(),
                state: State::new(),
            }
        }

        fn at(mut self, line: usize, col: usize) -> Self {
            self.host.set_caret(Position::new(line, col));
            self
        }

        fn set(&mut self, args: &str) {
            self.options.execute_set(Scope::Both, args).ok();
        }

        fn feed(&mut self, keys: &str) -> Vec<Step> {
            let mut steps = Vec::new();
            for key in parse_keys(keys) {
                let mut ctx = EditContext {
                    host: &mut self.host,
                    options: &mut self.options,
                    registers: &mut self.registers,
                    history: &mut self.history,
                    digraphs: &self.digraphs,
                };
                steps.push(self.state.handle_key(&mut ctx, key));
            }
            steps
        }

        fn last(&mut self, keys: &str) -> Step {
            self.feed(keys).pop().unwrap_or(Step::Done)
        }

        fn text(&self) -> String {
            self.host.text()
        }

        fn caret(&self) -> Position {
            self.host.caret_position()
        }

        fn selection(&self) -> Option<(usize, usize)> {
            self.host.carets().primary().selection_bounds()
        }
    }

    const POEM: &str = "A Discovery\n\
        I found it in a legendary land\n\
        all rocks and lavender and tufted grass,\n\
        where it was settled on some sodden sand\n\
        hard by the torrent of a mountain pass.";

    // -- Counts -------------------------------------------------------------

    #[test]
    fn merge_counts_multiplies() {
        assert_eq!(merge_counts(None, None), None);
        assert_eq!(merge_counts(Some(2), None), Some(2));
        assert_eq!(merge_counts(None, Some(3)), Some(3));
        assert_eq!(merge_counts(Some(2), Some(3)), Some(6));
    }

    #[test]
    fn digits_accumulate_within_a_run() {
        let text: String = (0..60).map(|i| format!("{i}\n")).collect();
        let mut h = Harness::new(&text);
        assert_eq!(h.feed("52"), vec![Step::Pending, Step::Pending]);
        assert_eq!(h.state.pending().count, Some(52));
        assert_eq!(h.last("dd"), Step::Done);
        assert_eq!(h.text().lines().next(), Some("52"));
        // The count was used once.
        h.feed("dd");
        assert_eq!(h.text().lines().next(), Some("53"));
    }

    #[test]
    fn counts_before_operator_and_motion_multiply() {
        let mut h = Harness::new("a b c d e f g h");
        h.feed("2d3w");
        assert_eq!(h.text(), "g h");
    }

    #[test]
    fn zero_starts_no_count() {
        let mut h = Harness::new("abcdef").at(0, 4);
        h.feed("0");
        assert_eq!(h.caret(), Position::new(0, 0));
        h.feed("10l");
        assert_eq!(h.caret(), Position::new(0, 5));
    }

    // -- Operators ----------------------------------------------------------

    #[test]
    fn escape_cancels_operator() {
        let mut h = Harness::new("one two");
        assert_eq!(h.last("d"), Step::Pending);
        assert!(matches!(h.state.mode(), Mode::OperatorPending { .. }));
        assert_eq!(h.last("<Esc>"), Step::Done);
        assert_eq!(h.state.mode(), Mode::Normal);
        h.feed("w");
        assert_eq!(h.text(), "one two");
        assert_eq!(h.caret(), Position::new(0, 4));
    }

    #[test]
    fn bad_motion_rejects_and_resets() {
        let mut h = Harness::new("one two");
        h.feed("\"a3d");
        assert_eq!(h.last("Q"), Step::Rejected);
        assert_eq!(h.state.mode(), Mode::Normal);
        assert!(h.state.pending().is_empty());
    }

    #[test]
    fn dw_and_cw_differ() {
        let mut h = Harness::new("foo bar baz");
        h.feed("dw");
        assert_eq!(h.text(), "bar baz");
        h.feed("cwX<Esc>");
        assert_eq!(h.text(), "X baz");
        assert_eq!(h.caret(), Position::new(0, 0));
    }

    #[test]
    fn dd_on_last_line_takes_break_before() {
        let mut h = Harness::new("a\nb\nc").at(2, 0);
        h.feed("dd");
        assert_eq!(h.text(), "a\nb");
        assert_eq!(h.caret(), Position::new(1, 0));
        assert_eq!(h.registers.get(None).content(), "c\n");
    }

    #[test]
    fn count_on_last_line_fails() {
        let mut h = Harness::new("a\nb").at(1, 0);
        assert_eq!(h.last("2dd"), Step::Rejected);
        assert_eq!(h.text(), "a\nb");
        let mut h = Harness::new("a\nb\nc").at(1, 0);
        h.feed("5dd");
        assert_eq!(h.text(), "a");
    }

    #[test]
    fn exclusive_to_column_zero_becomes_linewise() {
        let mut h = Harness::new("one\ntwo\n\nfour");
        h.feed("d}");
        assert_eq!(h.text(), "\nfour");
    }

    #[test]
    fn d_dollar_and_x_on_empty_line() {
        let mut h = Harness::new("abc\n\nx").at(0, 1);
        h.feed("D");
        assert_eq!(h.text(), "a\n\nx");
        h.feed("j");
        assert_eq!(h.last("x"), Step::Rejected);
        assert_eq!(h.text(), "a\n\nx");
    }

    #[test]
    fn yank_and_put_lines() {
        let mut h = Harness::new("one\ntwo");
        h.feed("yyjp");
        assert_eq!(h.text(), "one\ntwo\none");
        assert_eq!(h.caret(), Position::new(2, 0));
        h.feed("\"aywgg\"aP");
        assert_eq!(h.text(), "oneone\ntwo\none");
    }

    #[test]
    fn case_operators_and_doubling() {
        let mut h = Harness::new("Hello world");
        h.feed("gUw");
        assert_eq!(h.text(), "HELLO world");
        h.feed("g~~");
        assert_eq!(h.text(), "hello WORLD");
        h.feed("guu");
        assert_eq!(h.text(), "hello world");
    }

    #[test]
    fn shift_lines() {
        let mut h = Harness::new("a\nb\nc");
        h.set("sw=2 et");
        h.feed("2>>");
        assert_eq!(h.text(), "  a\n  b\nc");
        h.feed("<<");
        assert_eq!(h.text(), "a\n  b\nc");
    }

    #[test]
    fn find_and_repeat() {
        let mut h = Harness::new("a,b,c,d");
        h.feed("f,");
        assert_eq!(h.caret(), Position::new(0, 1));
        h.feed(";;");
        assert_eq!(h.caret(), Position::new(0, 5));
        h.feed(",");
        assert_eq!(h.caret(), Position::new(0, 3));
        h.feed("0dtc");
        assert_eq!(h.text(), "c,d");
    }

    // -- Normal commands ----------------------------------------------------

    #[test]
    fn replace_toggle_join() {
        let mut h = Harness::new("abc\n  def");
        h.feed("2rx");
        assert_eq!(h.text(), "xxc\n  def");
        assert_eq!(h.caret(), Position::new(0, 1));
        h.feed("~");
        assert_eq!(h.text(), "xXc\n  def");
        h.feed("J");
        assert_eq!(h.text(), "xXc def");
        assert_eq!(h.caret(), Position::new(0, 3));
    }

    #[test]
    fn undo_and_redo_restore_caret() {
        let mut h = Harness::new("one two three").at(0, 4);
        h.feed("dw");
        assert_eq!(h.text(), "one three");
        h.feed("0u");
        assert_eq!(h.text(), "one two three");
        assert_eq!(h.caret(), Position::new(0, 4));
        h.feed("<C-r>");
        assert_eq!(h.text(), "one three");
        assert_eq!(h.last("uu"), Step::Rejected);
        assert_eq!(h.state.take_message().as_deref(), Some("Already at oldest change"));
    }

    #[test]
    fn marks_jump_linewise_and_exact() {
        let mut h = Harness::new("one\n  two\nthree").at(1, 3);
        h.feed("magg");
        h.feed("'a");
        assert_eq!(h.caret(), Position::new(1, 2));
        h.feed("gg`a");
        assert_eq!(h.caret(), Position::new(1, 3));
        assert_eq!(h.last("'b"), Step::Rejected);
        h.feed("gg");
        h.feed("d'a");
        assert_eq!(h.text(), "three");
    }

    #[test]
    fn colon_with_count_prefills_range() {
        let mut h = Harness::new("x");
        h.feed("3:");
        assert_eq!(h.state.mode(), Mode::CommandLine);
        assert_eq!(h.state.command_line().map(CommandLine::input), Some(".,.+2"));
        assert_eq!(h.last("d<CR>"), Step::Ex(".,.+2d".to_string()));
        assert_eq!(h.state.mode(), Mode::Normal);
    }

    // -- Insert and Replace -------------------------------------------------

    #[test]
    fn insert_with_count_and_escape_steps_left() {
        let mut h = Harness::new("ab");
        h.feed("3ax");
        assert_eq!(h.state.mode(), Mode::Insert);
        assert_eq!(h.caret(), Position::new(0, 2));
        h.feed("<Esc>");
        assert_eq!(h.state.mode(), Mode::Normal);
        assert_eq!(h.text(), "axxxb");
        assert_eq!(h.caret(), Position::new(0, 3));
    }

    #[test]
    fn open_line_with_count() {
        let mut h = Harness::new("top");
        h.feed("2oab<Esc>");
        assert_eq!(h.text(), "top\nab\nab");
        h.feed("u");
        assert_eq!(h.text(), "top");
    }

    #[test]
    fn insert_session_is_one_undo_step() {
        let mut h = Harness::new("");
        h.feed("ihello<CR>world<BS><BS>ld<Esc>");
        assert_eq!(h.text(), "hello\nworld");
        h.feed("u");
        assert_eq!(h.text(), "");
    }

    #[test]
    fn arrows_break_the_undo_step() {
        let mut h = Harness::new("");
        h.feed("iab<Left>X<Esc>");
        assert_eq!(h.text(), "aXb");
        h.feed("u");
        assert_eq!(h.text(), "ab");
    }

    #[test]
    fn replace_mode_backspace_restores() {
        let mut h = Harness::new("abc");
        h.feed("Rxyzw");
        assert_eq!(h.text(), "xyzw");
        h.feed("<BS><BS>");
        assert_eq!(h.text(), "xyc");
        h.feed("<Esc>");
        assert_eq!(h.state.mode(), Mode::Normal);
    }

    #[test]
    fn ctrl_k_digraph_and_miss() {
        let mut h = Harness::new("");
        assert_eq!(h.feed("i<C-k>a"), vec![Step::Done, Step::Pending, Step::Pending]);
        h.feed(":<Esc>");
        assert_eq!(h.text(), "ä");
        let mut h = Harness::new("");
        h.feed("i<C-k>qq");
        assert_eq!(h.text(), "q");
    }

    #[test]
    fn ctrl_w_ctrl_u_and_ctrl_r() {
        let mut h = Harness::new("");
        h.feed("ifoo bar<C-w>baz<Esc>");
        assert_eq!(h.text(), "foo baz");
        h.feed("A  x<C-u>");
        assert_eq!(h.text(), "");
        let mut h = Harness::new("word");
        h.feed("yeA <C-r>\"<Esc>");
        assert_eq!(h.text(), "word word");
    }

    #[test]
    fn expandtab_inserts_spaces_to_next_stop() {
        let mut h = Harness::new("");
        h.set("et ts=4");
        h.feed("iab<Tab>c");
        assert_eq!(h.text(), "ab  c");
    }

    // -- Visual -------------------------------------------------------------

    #[test]
    fn v_v_returns_to_normal() {
        let mut h = Harness::new("abc");
        h.feed("v");
        assert_eq!(h.state.mode(), Mode::visual(SelectionKind::Character));
        h.feed("v");
        assert_eq!(h.state.mode(), Mode::Normal);
        assert_eq!(h.selection(), None);
    }

    #[test]
    fn v_shift_v_switches_kind() {
        let mut h = Harness::new("abc");
        h.feed("vV");
        assert_eq!(h.state.mode(), Mode::visual(SelectionKind::Line));
        assert_eq!(h.selection(), Some((0, 0)));
    }

    #[test]
    fn visual_delete_is_inclusive() {
        let mut h = Harness::new("hello world");
        h.feed("vlld");
        assert_eq!(h.text(), "lo world");
        assert_eq!(h.state.mode(), Mode::Normal);
        h.feed("gv");
        assert_eq!(h.selection(), Some((0, 2)));
    }

    #[test]
    fn visual_line_yank_and_shift() {
        let mut h = Harness::new("a\nb\nc");
        h.feed("Vjy");
        assert_eq!(h.registers.get(None).content(), "a\nb\n");
        h.feed("Vj>");
        assert_eq!(h.text(), "\ta\n\tb\nc");
    }

    #[test]
    fn visual_colon_prefills_marks() {
        let mut h = Harness::new("a\nb\nc");
        h.feed("Vj:");
        assert_eq!(h.state.command_line().map(CommandLine::input), Some("'<,'>"));
        assert_eq!(h.state.mark('<'), Some(0));
        assert_eq!(h.state.mark('>'), Some(2));
    }

    #[test]
    fn block_change_types_on_every_line() {
        let mut h = Harness::new("abcd\nefgh\nijkl");
        h.feed("l<C-v>jjlcX<Esc>");
        assert_eq!(h.text(), "aXd\neXh\niXl");
        assert_eq!(h.host.carets().len(), 1);
    }

    #[test]
    fn visual_replace_char() {
        let mut h = Harness::new("abc\ndef");
        h.feed("vjrx");
        assert_eq!(h.text(), "xxx\nxef");
    }

    #[test]
    fn visual_put_replaces_selection() {
        let mut h = Harness::new("one two");
        h.feed("yw");
        h.feed("wvep");
        assert_eq!(h.text(), "one one ");
    }

    // -- Select and keymodel ------------------------------------------------

    #[test]
    fn keymodel_default() {
        let h = Harness::new("");
        assert!(h.options.has_token("keymodel", "stopselect"));
        assert!(h.options.has_token("keymodel", "continueselect"));
    }

    #[test]
    fn home_extends_visual_without_keymodel() {
        let mut h = Harness::new(POEM).at(1, 16);
        h.set("keymodel=");
        h.feed("v<Home>");
        assert_eq!(h.state.mode(), Mode::visual(SelectionKind::Character));
        // Inclusive: columns 0 through 16.
        assert_eq!(h.selection(), Some((12, 28)));
        assert_eq!(h.caret(), Position::new(1, 0));
    }

    #[test]
    fn home_extends_select_without_keymodel() {
        let mut h = Harness::new(POEM).at(1, 16);
        h.set("keymodel=");
        h.feed("gh<Home>");
        assert_eq!(h.state.mode(), Mode::select(SelectionKind::Character));
        // Exclusive: columns 0 through 15.
        assert_eq!(h.selection(), Some((12, 28)));
        assert_eq!(h.caret(), Position::new(1, 0));
        h.feed("<C-g>");
        assert_eq!(h.state.mode(), Mode::visual(SelectionKind::Character));
    }

    #[test]
    fn home_stops_visual_with_stopvisual() {
        let mut h = Harness::new(POEM).at(1, 16);
        h.set("keymodel=stopvisual");
        h.feed("v<Home>");
        assert_eq!(h.state.mode(), Mode::Normal);
        assert_eq!(h.caret(), Position::new(1, 0));
        assert_eq!(h.selection(), None);
    }

    #[test]
    fn home_stops_select_with_stopselect() {
        let mut h = Harness::new(POEM).at(1, 16);
        h.set("keymodel=stopselect");
        h.feed("gh<Home>");
        assert_eq!(h.state.mode(), Mode::Normal);
        assert_eq!(h.caret(), Position::new(1, 0));
    }

    #[test]
    fn select_typing_replaces_selection() {
        let mut h = Harness::new("hello world");
        h.feed("gh<S-Right><S-Right><S-Right><S-Right>HEY<Esc>");
        assert_eq!(h.text(), "HEY world");
        assert_eq!(h.state.mode(), Mode::Normal);
    }

    #[test]
    fn select_backspace_deletes() {
        let mut h = Harness::new("hello");
        h.feed("gh<S-Right><BS>");
        assert_eq!(h.text(), "llo");
        assert_eq!(h.state.mode(), Mode::Normal);
    }

    #[test]
    fn shifted_keys_start_select_from_insert() {
        let mut h = Harness::new("hello world");
        h.set("keymodel=startsel,stopsel selectmode=key");
        h.feed("i<S-Right><S-Right>");
        assert_eq!(
            h.state.mode(),
            Mode::Select {
                kind: SelectionKind::Character,
                return_to: ReturnMode::Insert
            }
        );
        assert_eq!(h.selection(), Some((0, 2)));
        h.feed("<Esc>");
        assert_eq!(h.state.mode(), Mode::Insert);
    }

    #[test]
    fn shifted_right_is_word_without_startsel() {
        let mut h = Harness::new("one two");
        h.feed("<S-Right>");
        assert_eq!(h.caret(), Position::new(0, 4));
    }

    // -- Scrolling ----------------------------------------------------------

    #[test]
    fn page_down_at_end_does_not_ring() {
        let text: String = (0..10).map(|i| format!("{i}\n")).collect();
        let mut h = Harness::new(text.trim_end());
        h.host = MemoryHost::new(text.trim_end()).with_size(5, 80);
        h.feed("G");
        h.feed("<C-f>");
        assert_eq!(h.last("<C-f>"), Step::Done);
    }

    #[test]
    fn ctrl_d_count_sets_scroll() {
        let text: String = (0..50).map(|i| format!("{i}\n")).collect();
        let mut h = Harness::new("");
        h.host = MemoryHost::new(&text).with_size(20, 80);
        h.feed("3<C-d>");
        assert_eq!(h.options.number("scroll"), 3);
        assert_eq!(h.caret(), Position::new(3, 0));
    }
}
