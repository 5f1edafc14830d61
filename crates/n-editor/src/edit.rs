//! Editing primitives shared by Normal, Visual, and Insert mode.
//!
//! Every change goes through [`EditContext::replace`], which records it in
//! the open undo transaction and shifts the carets that sit after it. The
//! functions here never pick a mode; the state machine decides what to do
//! with the caret offset they return.
//!
//! An operator acts on a [`Span`]:
//!
//! - `Chars`: a half-open char range (`dw`, `v` selections)
//! - `Lines`: whole lines (`dd`, `j`, `V` selections)
//! - `Block`: a column block (`Ctrl-V` selections)

use crate::digraph::Digraphs;
use crate::history::History;
use crate::host::{Host, char_width};
use crate::mode::Operator;
use crate::motion::{clamp_caret, first_non_blank};
use crate::options::Options;
use crate::position::{TextRange, VisualPosition};
use crate::register::{Capture, RegisterFile, RegisterKind};
use crate::scroll::ScrollContext;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// The stores a key or command may touch, borrowed from the engine session.
pub struct EditContext<'a> {
    pub host: &'a mut dyn Host,
    pub options: &'a mut Options,
    pub registers: &'a mut RegisterFile,
    pub history: &'a mut History,
    pub digraphs: &'a Digraphs,
}

impl EditContext<'_> {
    /// Replace `range` with `text`, recording the change for undo.
    ///
    /// Carets and anchors at or after the end of `range` move with the text;
    /// those inside it collapse to its start.
    pub fn replace(&mut self, range: TextRange, text: &str) {
        let inserted = text.chars().count();
        self.history.replace(self.host, range, text);
        for caret in self.host.carets_mut().iter_mut() {
            caret.offset = shift_offset(caret.offset, range, inserted);
            caret.selection_start = caret
                .selection_start
                .map(|anchor| shift_offset(anchor, range, inserted));
        }
    }

    /// Open an undo transaction unless one is already open.
    pub fn begin(&mut self) {
        if !self.history.in_transaction() {
            self.history.begin(self.host.carets().primary().offset);
        }
    }

    /// Close the open undo transaction at the primary caret.
    pub fn commit(&mut self) {
        self.history.commit(self.host.carets().primary().offset);
    }

    /// Caret offset at `index` (0 when the index is stale).
    #[must_use]
    pub fn caret_offset(&self, index: usize) -> usize {
        self.host.carets().get(index).map_or(0, |c| c.offset)
    }

    /// Move caret `index` to `offset`, forgetting its sticky column.
    pub fn move_caret(&mut self, index: usize, offset: usize) {
        if let Some(caret) = self.host.carets_mut().get_mut(index) {
            caret.move_to(offset);
        }
    }

    /// Scroll settings from the current options.
    #[must_use]
    pub fn scroll_context(&self, past_end: bool) -> ScrollContext {
        ScrollContext {
            scrolloff: self.options.count("scrolloff"),
            sidescrolloff: self.options.count("sidescrolloff"),
            sidescroll: self.options.count("sidescroll"),
            start_of_line: self.options.flag("startofline"),
            past_end,
        }
    }

    /// Effective `shiftwidth` (0 means `tabstop`).
    #[must_use]
    pub fn shift_width(&self) -> usize {
        match self.options.count("shiftwidth") {
            0 => self.options.count("tabstop").max(1),
            n => n,
        }
    }
}

const fn shift_offset(offset: usize, range: TextRange, inserted: usize) -> usize {
    if offset >= range.end {
        offset - range.len() + inserted
    } else if offset > range.start {
        range.start
    } else {
        offset
    }
}

// ---------------------------------------------------------------------------
// Spans
// ---------------------------------------------------------------------------

/// The text an operator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    Chars(TextRange),
    /// Lines `first..=last`.
    Lines { first: usize, last: usize },
    /// Lines `first..=last`, display columns `left..right`. `right` may be
    /// [`Caret::END_OF_LINE`](crate::caret::Caret::END_OF_LINE).
    Block {
        first: usize,
        last: usize,
        left: usize,
        right: usize,
    },
}

impl Span {
    /// Line range covered, inclusive.
    #[must_use]
    pub fn lines(self, host: &dyn Host) -> (usize, usize) {
        match self {
            Self::Chars(range) => {
                let last = host.line_of(range.end.saturating_sub(1).max(range.start));
                (host.line_of(range.start), last)
            }
            Self::Lines { first, last } | Self::Block { first, last, .. } => (first, last),
        }
    }
}

/// The range `dd` removes for lines `first..=last`: the lines and one line
/// break. On the last line the break before the lines goes instead.
#[must_use]
pub fn line_span(host: &dyn Host, first: usize, last: usize) -> TextRange {
    let last = last.min(host.last_line());
    if last < host.last_line() {
        TextRange::new(host.line_start(first), host.line_start(last + 1))
    } else if first > 0 {
        TextRange::new(host.line_end(first - 1), host.line_end(last))
    } else {
        TextRange::new(0, host.len_chars())
    }
}

/// Lines `first..=last` as register text, each ending in a line break.
#[must_use]
pub fn lines_text(host: &dyn Host, first: usize, last: usize) -> String {
    let last = last.min(host.last_line());
    let mut text = host.slice(TextRange::new(host.line_start(first), host.line_end(last)));
    text.push('\n');
    text
}

/// Char range of display columns `left..right` on `line`. A char that
/// straddles `left` is included.
#[must_use]
pub fn block_segment(host: &dyn Host, line: usize, left: usize, right: usize) -> TextRange {
    let tab = host.tab_width().max(1);
    let end = host.line_end(line);
    let mut column = 0;
    let mut start = None;
    for at in host.line_start(line)..end {
        let Some(ch) = host.char_at(at) else { break };
        let width = char_width(ch, column, tab);
        if start.is_none() && column + width > left {
            start = Some(at);
        }
        if column >= right {
            return TextRange::new(start.unwrap_or(at), at);
        }
        column += width;
    }
    TextRange::new(start.unwrap_or(end), end)
}

fn block_segments(host: &dyn Host, first: usize, last: usize, left: usize, right: usize) -> Vec<TextRange> {
    (first..=last.min(host.last_line()))
        .map(|line| block_segment(host, line, left, right))
        .collect()
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Result of [`apply_operator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Where the caret goes.
    pub caret: usize,
    /// Insert positions for a block change, top to bottom.
    pub block_carets: Vec<usize>,
    /// Lines added (positive) or removed (negative), for the report line.
    pub line_delta: isize,
}

impl Applied {
    const fn at(caret: usize) -> Self {
        Self {
            caret,
            block_carets: Vec::new(),
            line_delta: 0,
        }
    }
}

/// Apply `op` to `span`, recording deleted or yanked text in `register`.
/// `shift` is how many `shiftwidth`s `>` / `<` move. For `c` the caret is
/// where Insert mode starts.
pub fn apply_operator(
    ctx: &mut EditContext<'_>,
    op: Operator,
    span: Span,
    register: Option<char>,
    shift: usize,
) -> Applied {
    match op {
        Operator::Delete => delete_span(ctx, span, register),
        Operator::Change => change_span(ctx, span, register),
        Operator::Yank => yank_span(ctx, span, register),
        Operator::ShiftRight | Operator::ShiftLeft => {
            let (first, last) = span.lines(ctx.host);
            shift_lines(ctx, first, last, op == Operator::ShiftRight, shift.max(1));
            Applied::at(first_non_blank(ctx.host, first))
        }
        Operator::ToggleCase | Operator::Lowercase | Operator::Uppercase => {
            let start = span_start(ctx.host, span);
            map_span(ctx, span, |text| change_case(op, text));
            Applied::at(start)
        }
    }
}

fn span_start(host: &dyn Host, span: Span) -> usize {
    match span {
        Span::Chars(range) => range.start,
        Span::Lines { first, .. } => host.line_start(first),
        Span::Block {
            first, left, right, ..
        } => block_segment(host, first, left, right).start,
    }
}

/// Text the span would put in a register.
#[must_use]
pub fn span_text(host: &dyn Host, span: Span) -> (String, RegisterKind) {
    match span {
        Span::Chars(range) => (host.slice(range), RegisterKind::Char),
        Span::Lines { first, last } => (lines_text(host, first, last), RegisterKind::Line),
        Span::Block {
            first,
            last,
            left,
            right,
        } => {
            let parts: Vec<String> = block_segments(host, first, last, left, right)
                .into_iter()
                .map(|range| host.slice(range))
                .collect();
            (parts.join("\n"), RegisterKind::Char)
        }
    }
}

fn delete_span(ctx: &mut EditContext<'_>, span: Span, register: Option<char>) -> Applied {
    let (text, kind) = span_text(ctx.host, span);
    ctx.registers.record(register, text, kind, Capture::Delete);
    let lines_before = ctx.host.line_count();

    let caret = match span {
        Span::Chars(range) => {
            ctx.replace(range, "");
            range.start
        }
        Span::Lines { first, last } => {
            let range = line_span(ctx.host, first, last);
            ctx.replace(range, "");
            first_non_blank(ctx.host, first.min(ctx.host.last_line()))
        }
        Span::Block {
            first,
            last,
            left,
            right,
        } => {
            let segments = block_segments(ctx.host, first, last, left, right);
            for range in segments.iter().rev() {
                ctx.replace(*range, "");
            }
            segments.first().map_or(0, |r| r.start)
        }
    };

    let mut applied = Applied::at(caret);
    applied.line_delta = line_delta(lines_before, ctx.host.line_count());
    applied
}

fn change_span(ctx: &mut EditContext<'_>, span: Span, register: Option<char>) -> Applied {
    let (text, kind) = span_text(ctx.host, span);
    ctx.registers.record(register, text, kind, Capture::Delete);

    match span {
        Span::Chars(range) => {
            ctx.replace(range, "");
            Applied::at(range.start)
        }
        Span::Lines { first, last } => {
            let last = last.min(ctx.host.last_line());
            let range = TextRange::new(ctx.host.line_start(first), ctx.host.line_end(last));
            // Keep one empty line to type into.
            let lines_before = ctx.host.line_count();
            ctx.replace(range, "");
            let mut applied = Applied::at(ctx.host.line_start(first));
            applied.line_delta = line_delta(lines_before, ctx.host.line_count());
            applied
        }
        Span::Block {
            first,
            last,
            left,
            right,
        } => {
            let segments = block_segments(ctx.host, first, last, left, right);
            for range in segments.iter().rev() {
                ctx.replace(*range, "");
            }
            let carets: Vec<usize> = (first..=last.min(ctx.host.last_line()))
                .filter(|&line| ctx.host.line_display_width(line) >= left)
                .map(|line| block_segment(ctx.host, line, left, left).start)
                .collect();
            Applied {
                caret: carets.first().copied().unwrap_or(0),
                block_carets: carets,
                line_delta: 0,
            }
        }
    }
}

fn yank_span(ctx: &mut EditContext<'_>, span: Span, register: Option<char>) -> Applied {
    let (text, kind) = span_text(ctx.host, span);
    ctx.registers.record(register, text, kind, Capture::Yank);
    match span {
        Span::Lines { first, .. } => {
            // `yj` leaves the caret alone; `yk` moves it up.
            let caret = ctx.host.carets().primary().offset;
            if ctx.host.line_of(caret) == first {
                Applied::at(caret)
            } else {
                let column = ctx.host.display_column(caret);
                let vline = ctx.host.line_to_visual_line(first);
                Applied::at(ctx.host.visual_to_offset(VisualPosition::new(vline, column)))
            }
        }
        span => Applied::at(span_start(ctx.host, span)),
    }
}

fn line_delta(before: usize, after: usize) -> isize {
    let before = isize::try_from(before).unwrap_or(isize::MAX);
    let after = isize::try_from(after).unwrap_or(isize::MAX);
    after - before
}

fn map_span(ctx: &mut EditContext<'_>, span: Span, map: impl Fn(&str) -> String) {
    let ranges = match span {
        Span::Chars(range) => vec![range],
        Span::Lines { first, last } => {
            let last = last.min(ctx.host.last_line());
            vec![TextRange::new(ctx.host.line_start(first), ctx.host.line_end(last))]
        }
        Span::Block {
            first,
            last,
            left,
            right,
        } => block_segments(ctx.host, first, last, left, right),
    };
    for range in ranges.into_iter().rev() {
        let before = ctx.host.slice(range);
        let after = map(&before);
        if after != before {
            ctx.replace(range, &after);
        }
    }
}

/// Case-map `text` for `g~` / `gu` / `gU`. Chars whose mapping is not a
/// single char are left alone so offsets stay put.
#[must_use]
pub fn change_case(op: Operator, text: &str) -> String {
    text.chars()
        .map(|ch| {
            let lower = single(ch.to_lowercase()).unwrap_or(ch);
            let upper = single(ch.to_uppercase()).unwrap_or(ch);
            match op {
                Operator::Lowercase => lower,
                Operator::Uppercase => upper,
                _ if ch.is_lowercase() => upper,
                _ => lower,
            }
        })
        .collect()
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

// ---------------------------------------------------------------------------
// Shifting
// ---------------------------------------------------------------------------

/// Leading blanks of `line`: `(chars, display width)`.
#[must_use]
pub fn indent_of(host: &dyn Host, line: usize) -> (usize, usize) {
    let start = host.line_start(line);
    let end = first_non_blank(host, line);
    (end - start, host.display_column(end))
}

/// Blanks filling `width` columns: tabs then spaces, or only spaces with
/// `expandtab`.
#[must_use]
pub fn make_indent(width: usize, tabstop: usize, expand: bool) -> String {
    if expand || tabstop == 0 {
        return " ".repeat(width);
    }
    let mut indent = "\t".repeat(width / tabstop);
    indent.push_str(&" ".repeat(width % tabstop));
    indent
}

/// `>` / `<` over lines `first..=last`, `times` shiftwidths. Empty lines are
/// not indented.
pub fn shift_lines(ctx: &mut EditContext<'_>, first: usize, last: usize, right: bool, times: usize) {
    let sw = ctx.shift_width();
    let ts = ctx.options.count("tabstop").max(1);
    let expand = ctx.options.flag("expandtab");

    for line in first..=last.min(ctx.host.last_line()) {
        let (chars, width) = indent_of(ctx.host, line);
        if right && ctx.host.line_len(line) == 0 {
            continue;
        }
        let new_width = if right {
            width + sw * times
        } else {
            width.saturating_sub(sw * times)
        };
        if new_width == width {
            continue;
        }
        let start = ctx.host.line_start(line);
        ctx.replace(TextRange::new(start, start + chars), &make_indent(new_width, ts, expand));
    }
}

// ---------------------------------------------------------------------------
// Normal-mode commands
// ---------------------------------------------------------------------------

/// `p` / `P` from `register` at `offset`, `count` times. Returns the new
/// caret, or `None` when the register is empty.
pub fn paste(ctx: &mut EditContext<'_>, offset: usize, register: Option<char>, after: bool, count: usize) -> Option<usize> {
    let reg = ctx.registers.get(register);
    if reg.is_empty() {
        return None;
    }
    let kind = reg.kind();
    let text = reg.content().repeat(count.max(1));

    match kind {
        RegisterKind::Char => {
            let line = ctx.host.line_of(offset);
            let at = if after && ctx.host.line_len(line) > 0 {
                (offset + 1).min(ctx.host.line_end(line))
            } else {
                offset
            };
            ctx.replace(TextRange::point(at), &text);
            let len = text.chars().count();
            Some(if text.contains('\n') { at } else { at + len - 1 })
        }
        RegisterKind::Line => {
            let line = ctx.host.line_of(offset);
            let lines = if text.ends_with('\n') { text } else { format!("{text}\n") };
            let first = if after {
                if line < ctx.host.last_line() {
                    ctx.replace(TextRange::point(ctx.host.line_start(line + 1)), &lines);
                } else {
                    let end = ctx.host.line_end(line);
                    let body = lines.strip_suffix('\n').unwrap_or(&lines);
                    ctx.replace(TextRange::point(end), &format!("\n{body}"));
                }
                line + 1
            } else {
                ctx.replace(TextRange::point(ctx.host.line_start(line)), &lines);
                line
            };
            Some(first_non_blank(ctx.host, first))
        }
    }
}

/// Put `register` in place of `span` (Visual `p`). The replaced text goes
/// to the unnamed register afterwards.
pub fn replace_with_register(ctx: &mut EditContext<'_>, span: Span, register: Option<char>) -> Option<usize> {
    let reg = ctx.registers.get(register);
    if reg.is_empty() {
        return None;
    }
    let (text, kind) = (reg.content().to_string(), reg.kind());
    let linewise_span = matches!(span, Span::Lines { .. });

    let (at, inserted) = match span {
        Span::Lines { first, last } => {
            let last = last.min(ctx.host.last_line());
            let removed = lines_text(ctx.host, first, last);
            let range = TextRange::new(ctx.host.line_start(first), ctx.host.line_end(last));
            ctx.replace(range, "");
            let body = match kind {
                RegisterKind::Line => text.strip_suffix('\n').unwrap_or(&text).to_string(),
                RegisterKind::Char => text.clone(),
            };
            ctx.replace(TextRange::point(range.start), &body);
            ctx.registers.record(None, removed, RegisterKind::Line, Capture::Delete);
            (range.start, body)
        }
        span => {
            let (removed, removed_kind) = span_text(ctx.host, span);
            let start = span_start(ctx.host, span);
            delete_span(ctx, span, Some('_'));
            let body = match kind {
                RegisterKind::Line => format!("\n{text}"),
                RegisterKind::Char => text.clone(),
            };
            ctx.replace(TextRange::point(start), &body);
            ctx.registers.record(None, removed, removed_kind, Capture::Delete);
            (start, body)
        }
    };

    if kind == RegisterKind::Line || linewise_span {
        let line = ctx.host.line_of(at + usize::from(inserted.starts_with('\n')));
        Some(first_non_blank(ctx.host, line))
    } else {
        Some((at + inserted.chars().count()).saturating_sub(1))
    }
}

/// `J` / `gJ`: join `count` lines (at least two) starting at `line`.
/// `J` drops the next line's indent and inserts one space. Returns the
/// caret (at the last join), or `None` on the last line.
pub fn join_lines(ctx: &mut EditContext<'_>, line: usize, count: usize, spaces: bool) -> Option<usize> {
    if line >= ctx.host.last_line() {
        return None;
    }
    let joins = count.max(2) - 1;
    let mut caret = ctx.host.line_end(line);

    for _ in 0..joins {
        if line >= ctx.host.last_line() {
            break;
        }
        let end = ctx.host.line_end(line);
        let next = line + 1;
        let next_text_start = if spaces {
            first_non_blank(ctx.host, next)
        } else {
            ctx.host.line_start(next)
        };
        let next_empty = next_text_start == ctx.host.line_end(next);
        let ends_blank = end > ctx.host.line_start(line)
            && ctx.host.char_at(end - 1).is_some_and(|c| c == ' ' || c == '\t');
        let starts_paren = ctx.host.char_at(next_text_start) == Some(')');

        let separator = if !spaces || next_empty || ends_blank || starts_paren || end == ctx.host.line_start(line) {
            ""
        } else {
            " "
        };
        ctx.replace(TextRange::new(end, next_text_start), separator);
        caret = end;
    }

    Some(clamp_caret(ctx.host, caret, false))
}

/// `r{c}` over `count` chars at `offset`. `<CR>` replaces them with one
/// line break. `None` when the line is too short.
pub fn replace_chars(ctx: &mut EditContext<'_>, offset: usize, ch: char, count: usize) -> Option<usize> {
    let count = count.max(1);
    let line = ctx.host.line_of(offset);
    if offset + count > ctx.host.line_end(line) {
        return None;
    }
    let range = TextRange::new(offset, offset + count);
    if ch == '\n' {
        ctx.replace(range, "\n");
        return Some(ctx.host.line_start(line + 1));
    }
    ctx.replace(range, &ch.to_string().repeat(count));
    Some(offset + count - 1)
}

/// Replace every char of `span` except line breaks with `ch` (Visual `r`).
pub fn fill_span(ctx: &mut EditContext<'_>, span: Span, ch: char) -> usize {
    let start = span_start(ctx.host, span);
    map_span(ctx, span, |text| {
        text.chars().map(|c| if c == '\n' { c } else { ch }).collect()
    });
    start
}

/// `~`: toggle the case of `count` chars from `offset` and step past them.
pub fn toggle_case_forward(ctx: &mut EditContext<'_>, offset: usize, count: usize) -> Option<usize> {
    let line = ctx.host.line_of(offset);
    let end = ctx.host.line_end(line);
    if offset >= end {
        return None;
    }
    let stop = (offset + count.max(1)).min(end);
    let range = TextRange::new(offset, stop);
    map_span(ctx, Span::Chars(range), |text| change_case(Operator::ToggleCase, text));
    Some(clamp_caret(ctx.host, stop, false))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
