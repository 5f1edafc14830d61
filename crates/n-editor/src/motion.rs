//! Motions: where a key moves the caret, and how operators use it.
//!
//! [`resolve`] turns a [`Motion`] plus a count into a [`Target`]: the new
//! offset, whether an operator over it is exclusive, inclusive, or linewise,
//! and the sticky column the caret should keep. A motion that cannot move
//! (`h` at column 0, `f` with no match, `j` on the last line) resolves to
//! `None`; the state machine rings the bell.
//!
//! | Keys                    | Motion                  | Kind      |
//! |-------------------------|-------------------------|-----------|
//! | `h` `<Left>` `<BS>`     | [`Motion::Left`]        | exclusive |
//! | `l` `<Right>` `<Space>` | [`Motion::Right`]       | exclusive |
//! | `j` `<Down>` / `k` `<Up>` | [`Motion::Down`] / [`Motion::Up`] | linewise |
//! | `0` `<Home>`            | [`Motion::LineStart`]   | exclusive |
//! | `^`                     | [`Motion::FirstNonBlank`] | exclusive |
//! | `$` `<End>`             | [`Motion::LineEnd`]     | inclusive |
//! | `w` `W` / `b` `B`       | word start              | exclusive |
//! | `e` `E`                 | word end                | inclusive |
//! | `gg` / `G`              | first / last line       | linewise  |
//! | `f` `t` / `F` `T` `;` `,` | find on line          | inclusive / exclusive |
//! | `}` / `{`               | paragraph               | exclusive |
//! | `H` `M` `L`             | window lines            | linewise  |
//! | `+` `<CR>` / `-` / `_`  | line + first non-blank  | linewise  |
//! | `\|`                    | screen column           | exclusive |

use crate::caret::Caret;
use crate::host::Host;
use crate::position::VisualPosition;
use crate::word::{self, WordKind};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A character search on the current line (`f t F T`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Find {
    pub ch: char,
    pub forward: bool,
    pub till: bool,
}

impl Find {
    /// The same search in the opposite direction (`,`).
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            forward: !self.forward,
            ..self
        }
    }
}

/// A caret motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    FirstNonBlank,
    LineEnd,
    WordStart(WordKind),
    WordBack(WordKind),
    WordEnd(WordKind),
    FirstLine,
    LastLine,
    FindChar(Find),
    /// `;` / `,`: like [`Motion::FindChar`], but `t`/`T` skip an adjacent
    /// match.
    RepeatFind(Find),
    ParagraphForward,
    ParagraphBackward,
    WindowTop,
    WindowMiddle,
    WindowBottom,
    NextLineStart,
    PrevLineStart,
    CurrentLineStart,
    Column,
}

/// How an operator treats the span up to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wise {
    /// The target char is not included.
    Exclusive,
    /// The target char is included.
    Inclusive,
    /// Whole lines from start to target.
    Linewise,
}

/// Where a motion lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub offset: usize,
    pub wise: Wise,
    /// Sticky column to store on the caret (`None` forgets it).
    pub sticky: Option<usize>,
}

impl Target {
    const fn new(offset: usize, wise: Wise) -> Self {
        Self {
            offset,
            wise,
            sticky: None,
        }
    }
}

/// What a motion needs to know beyond the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionContext {
    /// The caret may rest after the last char (Insert, Replace, Select).
    pub past_end: bool,
    /// The motion feeds an operator rather than moving the caret.
    pub operator: bool,
    /// `scrolloff` for `H` / `L`.
    pub scrolloff: usize,
}

// ---------------------------------------------------------------------------
// Line helpers
// ---------------------------------------------------------------------------

/// Offset of the last position the caret may occupy on `line`.
#[must_use]
pub fn line_limit(host: &dyn Host, line: usize, past_end: bool) -> usize {
    let start = host.line_start(line);
    let end = host.line_end(line);
    if past_end || end == start {
        end
    } else {
        end - 1
    }
}

/// Offset of the first non-blank char of `line` (the line end when the line
/// is blank).
#[must_use]
pub fn first_non_blank(host: &dyn Host, line: usize) -> usize {
    let end = host.line_end(line);
    let mut at = host.line_start(line);
    while at < end && host.char_at(at).is_some_and(|c| c == ' ' || c == '\t') {
        at += 1;
    }
    at
}

/// Clamp `offset` to where a caret may rest.
#[must_use]
pub fn clamp_caret(host: &dyn Host, offset: usize, past_end: bool) -> usize {
    let line = host.line_of(offset);
    offset
        .max(host.line_start(line))
        .min(line_limit(host, line, past_end))
}

fn first_non_blank_on_line(host: &dyn Host, line: usize, past_end: bool) -> usize {
    first_non_blank(host, line).min(line_limit(host, line, past_end))
}

fn is_blank_line(host: &dyn Host, line: usize) -> bool {
    host.line_len(line) == 0
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Compute where `motion` takes `caret`. `count` is `None` when no count
/// was typed (`G` and `|` treat that differently from 1).
#[must_use]
pub fn resolve(
    host: &dyn Host,
    caret: &Caret,
    motion: Motion,
    count: Option<usize>,
    ctx: MotionContext,
) -> Option<Target> {
    let n = count.unwrap_or(1).max(1);
    let offset = caret.offset.min(host.len_chars());
    let line = host.line_of(offset);
    let line_start = host.line_start(line);
    let past_end = ctx.past_end;

    let target = match motion {
        Motion::Left => {
            if offset == line_start {
                return None;
            }
            Target::new(offset.saturating_sub(n).max(line_start), Wise::Exclusive)
        }
        Motion::Right => {
            let limit = line_limit(host, line, past_end || ctx.operator);
            if offset >= limit {
                return None;
            }
            Target::new((offset + n).min(limit), Wise::Exclusive)
        }
        Motion::Up | Motion::Down => return vertical(host, caret, motion == Motion::Down, n, past_end),
        Motion::LineStart => Target::new(line_start, Wise::Exclusive),
        Motion::FirstNonBlank => Target::new(first_non_blank_on_line(host, line, past_end), Wise::Exclusive),
        Motion::LineEnd => {
            let target_line = (line + n - 1).min(host.last_line());
            let limit = line_limit(host, target_line, past_end);
            Target {
                offset: limit,
                wise: Wise::Inclusive,
                sticky: Some(Caret::END_OF_LINE),
            }
        }
        Motion::WordStart(kind) => word_start(host, offset, kind, n, ctx)?,
        Motion::WordBack(kind) => {
            let mut at = offset;
            for _ in 0..n {
                at = word::prev_word_start(host, at, kind);
            }
            if at == offset {
                return None;
            }
            Target::new(at, Wise::Exclusive)
        }
        Motion::WordEnd(kind) => {
            let mut at = offset;
            for _ in 0..n {
                at = word::next_word_end(host, at, kind);
            }
            if at == offset {
                return None;
            }
            Target::new(at, Wise::Inclusive)
        }
        Motion::FirstLine => {
            let target_line = (n - 1).min(host.last_line());
            Target::new(first_non_blank_on_line(host, target_line, past_end), Wise::Linewise)
        }
        Motion::LastLine => {
            let target_line = count.map_or(host.last_line(), |c| c.max(1) - 1).min(host.last_line());
            Target::new(first_non_blank_on_line(host, target_line, past_end), Wise::Linewise)
        }
        Motion::FindChar(find) => find_on_line(host, offset, find, n, false)?,
        Motion::RepeatFind(find) => find_on_line(host, offset, find, n, true)?,
        Motion::ParagraphForward => {
            let last = host.last_line();
            let mut l = line;
            for _ in 0..n {
                if l >= last {
                    break;
                }
                l += 1;
                while l < last && is_blank_line(host, l) {
                    l += 1;
                }
                while l < last && !is_blank_line(host, l) {
                    l += 1;
                }
            }
            let at = if l == last && !is_blank_line(host, l) {
                line_limit(host, l, past_end || ctx.operator)
            } else {
                host.line_start(l)
            };
            if at == offset {
                return None;
            }
            Target::new(at, Wise::Exclusive)
        }
        Motion::ParagraphBackward => {
            if line == 0 && offset == 0 {
                return None;
            }
            let mut l = line;
            for _ in 0..n {
                if l == 0 {
                    break;
                }
                l -= 1;
                while l > 0 && is_blank_line(host, l) {
                    l -= 1;
                }
                while l > 0 && !is_blank_line(host, l) {
                    l -= 1;
                }
            }
            Target::new(host.line_start(l), Wise::Exclusive)
        }
        Motion::WindowTop | Motion::WindowMiddle | Motion::WindowBottom => {
            let target_line = window_line(host, motion, count, ctx.scrolloff);
            Target::new(first_non_blank_on_line(host, target_line, past_end), Wise::Linewise)
        }
        Motion::NextLineStart => {
            if line >= host.last_line() {
                return None;
            }
            let target_line = (line + n).min(host.last_line());
            Target::new(first_non_blank_on_line(host, target_line, past_end), Wise::Linewise)
        }
        Motion::PrevLineStart => {
            if line == 0 {
                return None;
            }
            let target_line = line.saturating_sub(n);
            Target::new(first_non_blank_on_line(host, target_line, past_end), Wise::Linewise)
        }
        Motion::CurrentLineStart => {
            let target_line = (line + n - 1).min(host.last_line());
            Target::new(first_non_blank_on_line(host, target_line, past_end), Wise::Linewise)
        }
        Motion::Column => {
            let column = n - 1;
            let at = host.visual_to_offset(VisualPosition::new(host.line_to_visual_line(line), column));
            Target {
                offset: at.min(line_limit(host, line, past_end)),
                wise: Wise::Exclusive,
                sticky: Some(column),
            }
        }
    };
    Some(target)
}

/// `j` / `k`: move `n` visual lines keeping the sticky display column.
fn vertical(host: &dyn Host, caret: &Caret, down: bool, n: usize, past_end: bool) -> Option<Target> {
    let offset = caret.offset.min(host.len_chars());
    let current = host.line_to_visual_line(host.line_of(offset));
    let last = host.visual_line_count().saturating_sub(1);
    let target_visual = if down {
        if current >= last {
            return None;
        }
        (current + n).min(last)
    } else {
        if current == 0 {
            return None;
        }
        current.saturating_sub(n)
    };

    let column = caret
        .sticky_column
        .unwrap_or_else(|| host.display_column(offset));
    let line = host.visual_line_to_line(target_visual);
    let limit = line_limit(host, line, past_end);
    let at = if column == Caret::END_OF_LINE {
        limit
    } else {
        host.visual_to_offset(VisualPosition::new(target_visual, column)).min(limit)
    };
    Some(Target {
        offset: at,
        wise: Wise::Linewise,
        sticky: Some(column),
    })
}

/// `w` / `W`, including the operator special case: when the last word
/// moved over ends its line, the operator stops at that line end instead
/// of eating the line break.
fn word_start(host: &dyn Host, offset: usize, kind: WordKind, n: usize, ctx: MotionContext) -> Option<Target> {
    let total = host.len_chars();
    let mut at = offset;
    let mut previous = offset;
    for _ in 0..n {
        previous = at;
        at = word::next_word_start(host, at, kind);
    }

    if ctx.operator {
        let from_line = host.line_of(previous);
        if at > previous && host.line_of(at) > from_line && previous < host.line_end(from_line) {
            at = host.line_end(from_line);
        }
        return (at != offset).then_some(Target::new(at, Wise::Exclusive));
    }

    if at >= total {
        at = clamp_caret(host, total, ctx.past_end);
    }
    (at != offset).then_some(Target::new(at, Wise::Exclusive))
}

fn find_on_line(host: &dyn Host, offset: usize, find: Find, n: usize, repeat: bool) -> Option<Target> {
    let line = host.line_of(offset);
    let start = host.line_start(line);
    let end = host.line_end(line);
    // A repeated `t` would find the char right next to the caret again.
    let skip = usize::from(repeat && find.till);

    if find.forward {
        let mut found = None;
        let mut remaining = n;
        let mut at = offset + 1 + skip;
        while at < end {
            if host.char_at(at) == Some(find.ch) {
                remaining -= 1;
                if remaining == 0 {
                    found = Some(at);
                    break;
                }
            }
            at += 1;
        }
        let hit = found?;
        let target = if find.till { hit - 1 } else { hit };
        (target > offset || !find.till).then_some(Target::new(target, Wise::Inclusive))
    } else {
        let mut found = None;
        let mut remaining = n;
        let mut at = offset.checked_sub(1 + skip)?;
        loop {
            if at < start {
                break;
            }
            if host.char_at(at) == Some(find.ch) {
                remaining -= 1;
                if remaining == 0 {
                    found = Some(at);
                    break;
                }
            }
            if at == 0 {
                break;
            }
            at -= 1;
        }
        let hit = found?;
        let target = if find.till { hit + 1 } else { hit };
        (target < offset).then_some(Target::new(target, Wise::Exclusive))
    }
}

/// Buffer line targeted by `H`, `M`, or `L`.
fn window_line(host: &dyn Host, motion: Motion, count: Option<usize>, scrolloff: usize) -> usize {
    let viewport = host.viewport();
    let last_visual = host.visual_line_count().saturating_sub(1);
    let top = viewport.top_line.min(last_visual);
    let bottom = viewport.bottom_line().min(last_visual);
    let so = scrolloff.min(viewport.height.saturating_sub(1) / 2);
    let n = count.unwrap_or(1).max(1) - 1;

    let visual = match motion {
        Motion::WindowTop => {
            let margin = if top == 0 { 0 } else { so };
            (top + n.max(margin)).min(bottom)
        }
        Motion::WindowBottom => {
            let margin = if bottom >= last_visual { 0 } else { so };
            bottom.saturating_sub(n.max(margin)).max(top)
        }
        _ => top + (bottom - top) / 2,
    };
    host.visual_line_to_line(visual)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::position::Position;

    fn normal() -> MotionContext {
        MotionContext::default()
    }

    fn operator() -> MotionContext {
        MotionContext {
            operator: true,
            ..MotionContext::default()
        }
    }

    fn go(host: &MemoryHost, caret: Caret, motion: Motion, count: Option<usize>) -> Option<Position> {
        resolve(host, &caret, motion, count, normal()).map(|t| host.buffer().offset_to_position(t.offset))
    }

    fn at(host: &MemoryHost, line: usize, col: usize) -> Caret {
        Caret::at(host.buffer().position_to_offset(Position::new(line, col)))
    }

    // -- Horizontal ---------------------------------------------------------

    #[test]
    fn h_and_l_stay_on_line() {
        let host = MemoryHost::new("abc\ndef");
        assert_eq!(go(&host, at(&host, 0, 0), Motion::Left, None), None);
        assert_eq!(go(&host, at(&host, 0, 2), Motion::Left, Some(5)), Some(Position::new(0, 0)));
        assert_eq!(go(&host, at(&host, 0, 0), Motion::Right, Some(9)), Some(Position::new(0, 2)));
        assert_eq!(go(&host, at(&host, 0, 2), Motion::Right, None), None);
    }

    #[test]
    fn l_under_operator_reaches_line_end() {
        let host = MemoryHost::new("abc");
        let target = resolve(&host, &Caret::at(2), Motion::Right, None, operator()).unwrap();
        assert_eq!(target.offset, 3);
    }

    #[test]
    fn dollar_and_caret() {
        let host = MemoryHost::new("  abc\nxy");
        assert_eq!(go(&host, at(&host, 0, 0), Motion::FirstNonBlank, None), Some(Position::new(0, 2)));
        let t = resolve(&host, &Caret::at(0), Motion::LineEnd, Some(2), normal()).unwrap();
        assert_eq!(host.buffer().offset_to_position(t.offset), Position::new(1, 1));
        assert_eq!(t.sticky, Some(Caret::END_OF_LINE));
        assert_eq!(t.wise, Wise::Inclusive);
    }

    #[test]
    fn end_in_insert_goes_past_last_char() {
        let host = MemoryHost::new("abc");
        let ctx = MotionContext {
            past_end: true,
            ..MotionContext::default()
        };
        assert_eq!(resolve(&host, &Caret::at(0), Motion::LineEnd, None, ctx).unwrap().offset, 3);
    }

    // -- Vertical -----------------------------------------------------------

    #[test]
    fn j_k_keep_sticky_column() {
        let host = MemoryHost::new("abcdef\nab\nabcdef");
        let mut caret = at(&host, 0, 4);
        let t = resolve(&host, &caret, Motion::Down, None, normal()).unwrap();
        assert_eq!(host.buffer().offset_to_position(t.offset), Position::new(1, 1));
        caret.offset = t.offset;
        caret.sticky_column = t.sticky;
        let t = resolve(&host, &caret, Motion::Down, None, normal()).unwrap();
        assert_eq!(host.buffer().offset_to_position(t.offset), Position::new(2, 4));
    }

    #[test]
    fn j_on_last_line_fails() {
        let host = MemoryHost::new("a\nb");
        assert_eq!(go(&host, at(&host, 1, 0), Motion::Down, None), None);
        assert_eq!(go(&host, at(&host, 0, 0), Motion::Up, None), None);
        assert_eq!(go(&host, at(&host, 0, 0), Motion::Down, Some(10)), Some(Position::new(1, 0)));
    }

    #[test]
    fn j_uses_display_columns() {
        let host = MemoryHost::new("\tx\n12345678x");
        let t = resolve(&host, &Caret::at(1), Motion::Down, None, normal()).unwrap();
        assert_eq!(host.buffer().offset_to_position(t.offset), Position::new(1, 8));
    }

    #[test]
    fn gg_and_g_with_counts() {
        let host = MemoryHost::new("a\n  b\nc");
        assert_eq!(go(&host, at(&host, 2, 0), Motion::FirstLine, None), Some(Position::new(0, 0)));
        assert_eq!(go(&host, at(&host, 0, 0), Motion::FirstLine, Some(2)), Some(Position::new(1, 2)));
        assert_eq!(go(&host, at(&host, 0, 0), Motion::LastLine, None), Some(Position::new(2, 0)));
        assert_eq!(go(&host, at(&host, 0, 0), Motion::LastLine, Some(2)), Some(Position::new(1, 2)));
        assert_eq!(go(&host, at(&host, 0, 0), Motion::LastLine, Some(99)), Some(Position::new(2, 0)));
    }

    // -- Words --------------------------------------------------------------

    #[test]
    fn w_on_last_word_lands_on_last_char() {
        let host = MemoryHost::new("one two");
        assert_eq!(go(&host, at(&host, 0, 4), Motion::WordStart(WordKind::Word), None), Some(Position::new(0, 6)));
        assert_eq!(go(&host, at(&host, 0, 6), Motion::WordStart(WordKind::Word), None), None);
    }

    #[test]
    fn dw_stops_at_line_end() {
        let host = MemoryHost::new("foo bar\nbaz");
        let t = resolve(&host, &Caret::at(4), Motion::WordStart(WordKind::Word), None, operator()).unwrap();
        assert_eq!(t.offset, 7);
        let t = resolve(&host, &Caret::at(0), Motion::WordStart(WordKind::Word), None, operator()).unwrap();
        assert_eq!(t.offset, 4);
    }

    #[test]
    fn word_counts() {
        let host = MemoryHost::new("a b c d");
        assert_eq!(go(&host, Caret::at(0), Motion::WordStart(WordKind::Word), Some(3)), Some(Position::new(0, 6)));
        assert_eq!(go(&host, Caret::at(6), Motion::WordBack(WordKind::Word), Some(2)), Some(Position::new(0, 2)));
        assert_eq!(go(&host, Caret::at(0), Motion::WordEnd(WordKind::Word), None), Some(Position::new(0, 2)));
    }

    // -- Find ---------------------------------------------------------------

    #[test]
    fn f_and_t() {
        let host = MemoryHost::new("a,b,c,d");
        let f = |forward, till| Find { ch: ',', forward, till };
        assert_eq!(go(&host, Caret::at(0), Motion::FindChar(f(true, false)), Some(2)), Some(Position::new(0, 3)));
        assert_eq!(go(&host, Caret::at(0), Motion::FindChar(f(true, true)), None), None);
        // `t,` from 'b' would not move.
        assert_eq!(go(&host, Caret::at(2), Motion::FindChar(f(true, true)), None), None);
        assert_eq!(go(&host, Caret::at(6), Motion::FindChar(f(false, false)), None), Some(Position::new(0, 5)));
        assert_eq!(go(&host, Caret::at(6), Motion::FindChar(f(false, true)), Some(2)), Some(Position::new(0, 4)));
        assert_eq!(go(&host, Caret::at(0), Motion::FindChar(Find { ch: 'z', forward: true, till: false }), None), None);
    }

    #[test]
    fn repeated_till_skips_adjacent_match() {
        let host = MemoryHost::new("a,b,c");
        let till = Find { ch: ',', forward: true, till: true };
        assert_eq!(go(&host, Caret::at(0), Motion::RepeatFind(till), None), Some(Position::new(0, 2)));
    }

    #[test]
    fn find_does_not_cross_lines() {
        let host = MemoryHost::new("ab\nx,");
        let f = Find { ch: ',', forward: true, till: false };
        assert_eq!(go(&host, Caret::at(0), Motion::FindChar(f), None), None);
    }

    // -- Paragraphs ---------------------------------------------------------

    #[test]
    fn paragraph_motions() {
        let host = MemoryHost::new("a\nb\n\nc\nd\n\ne");
        assert_eq!(go(&host, Caret::at(0), Motion::ParagraphForward, None), Some(Position::new(2, 0)));
        assert_eq!(go(&host, Caret::at(0), Motion::ParagraphForward, Some(2)), Some(Position::new(5, 0)));
        assert_eq!(go(&host, at(&host, 4, 0), Motion::ParagraphBackward, None), Some(Position::new(2, 0)));
        assert_eq!(go(&host, at(&host, 1, 0), Motion::ParagraphBackward, None), Some(Position::new(0, 0)));
    }

    #[test]
    fn paragraph_forward_at_end_goes_to_last_char() {
        let host = MemoryHost::new("abc\ndef");
        assert_eq!(go(&host, Caret::at(0), Motion::ParagraphForward, None), Some(Position::new(1, 2)));
    }

    // -- Lines --------------------------------------------------------------

    #[test]
    fn plus_minus_underscore() {
        let host = MemoryHost::new("a\n  b\n c");
        assert_eq!(go(&host, Caret::at(0), Motion::NextLineStart, None), Some(Position::new(1, 2)));
        assert_eq!(go(&host, at(&host, 2, 0), Motion::PrevLineStart, Some(2)), Some(Position::new(0, 0)));
        assert_eq!(go(&host, Caret::at(0), Motion::CurrentLineStart, Some(3)), Some(Position::new(2, 1)));
        assert_eq!(go(&host, at(&host, 2, 0), Motion::NextLineStart, None), None);
    }

    #[test]
    fn bar_goes_to_column() {
        let host = MemoryHost::new("abcdef");
        assert_eq!(go(&host, Caret::at(0), Motion::Column, Some(4)), Some(Position::new(0, 3)));
        assert_eq!(go(&host, Caret::at(3), Motion::Column, None), Some(Position::new(0, 0)));
        assert_eq!(go(&host, Caret::at(0), Motion::Column, Some(40)), Some(Position::new(0, 5)));
    }

    // -- Window lines -------------------------------------------------------

    fn hundred_lines() -> MemoryHost {
        let text: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        MemoryHost::new(&text.join("\n")).with_size(20, 80)
    }

    #[test]
    fn h_and_l_honor_scrolloff_away_from_edges() {
        let mut host = hundred_lines();
        host.scroll_to(10, 0);
        let ctx = MotionContext {
            scrolloff: 3,
            ..MotionContext::default()
        };
        let line = |m| {
            let t = resolve(&host, &Caret::at(0), m, None, ctx).unwrap();
            host.buffer().offset_to_position(t.offset).line
        };
        assert_eq!(line(Motion::WindowTop), 13);
        assert_eq!(line(Motion::WindowBottom), 26);
        assert_eq!(line(Motion::WindowMiddle), 19);
    }

    #[test]
    fn h_ignores_scrolloff_at_top_of_file() {
        let host = hundred_lines();
        let ctx = MotionContext {
            scrolloff: 3,
            ..MotionContext::default()
        };
        let t = resolve(&host, &Caret::at(0), Motion::WindowTop, None, ctx).unwrap();
        assert_eq!(host.buffer().offset_to_position(t.offset).line, 0);
    }

    #[test]
    fn l_ignores_scrolloff_at_end_of_file() {
        let mut host = hundred_lines();
        host.scroll_to(80, 0);
        let ctx = MotionContext {
            scrolloff: 3,
            ..MotionContext::default()
        };
        let t = resolve(&host, &Caret::at(0), Motion::WindowBottom, None, ctx).unwrap();
        assert_eq!(host.buffer().offset_to_position(t.offset).line, 99);
    }
}
