//! Scrolling: moving the host viewport and keeping the caret inside it.
//!
//! Every operation works on the primary caret and the host's [`Viewport`]
//! in visual coordinates. Nothing here fails: requests past the buffer
//! clamp, and an operation that could not move anything reports
//! [`Movement::NoMovement`] so the caller can decide whether to ring the
//! bell.
//!
//! `scrolloff` and `sidescrolloff` are normalized to at most half the
//! window (`(height - 1) / 2`); a larger value would pin the caret to the
//! middle line, which is what Vim does for `so=999`.

use crate::caret::Caret;
use crate::host::{Host, Viewport};
use crate::motion::{first_non_blank, line_limit};
use crate::position::VisualPosition;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Outcome of a scroll command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Moved,
    /// Nothing changed. `bell` is false for the expected stops (a full page
    /// down that already shows the last two lines).
    NoMovement { bell: bool },
}

impl Movement {
    #[must_use]
    pub const fn moved(self) -> bool {
        matches!(self, Self::Moved)
    }

    #[must_use]
    pub const fn bell(self) -> bool {
        matches!(self, Self::NoMovement { bell: true })
    }
}

/// Option values the scroll commands read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollContext {
    pub scrolloff: usize,
    pub sidescrolloff: usize,
    /// Minimum columns to scroll horizontally (`sidescroll`).
    pub sidescroll: usize,
    /// Page and half-page moves put the caret on the first non-blank.
    pub start_of_line: bool,
    /// The caret may rest after the last char.
    pub past_end: bool,
}

impl Default for ScrollContext {
    fn default() -> Self {
        Self {
            scrolloff: 0,
            sidescrolloff: 0,
            sidescroll: 0,
            start_of_line: true,
            past_end: false,
        }
    }
}

/// Where `zt` / `zz` / `zb` put a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenLocation {
    Top,
    Middle,
    Bottom,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Clamp a scroll offset to half of a window `span`.
#[must_use]
pub const fn normalized_offset(offset: usize, span: usize) -> usize {
    let max = span.saturating_sub(1) / 2;
    if offset < max { offset } else { max }
}

/// Lines a half-page move scrolls: the `scroll` option, or half the
/// window when it is 0.
#[must_use]
pub const fn half_page_amount(scroll: usize, height: usize) -> usize {
    let amount = if scroll == 0 { height / 2 } else { scroll };
    if amount == 0 { 1 } else { amount }
}

fn last_visual_line(host: &dyn Host) -> usize {
    host.visual_line_count().saturating_sub(1)
}

fn primary(host: &dyn Host) -> Caret {
    *host.carets().primary()
}

fn caret_visual(host: &dyn Host) -> VisualPosition {
    let offset = primary(host).offset.min(host.len_chars());
    host.offset_to_visual(offset)
}

fn set_primary(host: &mut dyn Host, offset: usize, sticky: Option<usize>) {
    let caret = host.carets_mut().primary_mut();
    caret.offset = offset;
    caret.sticky_column = sticky;
}

/// Put the caret on `visual_line`, either on the first non-blank or on its
/// sticky column.
fn place_on_visual_line(host: &mut dyn Host, visual_line: usize, first_non_blank_col: bool, past_end: bool) {
    let line = host.visual_line_to_line(visual_line);
    let limit = line_limit(host, line, past_end);
    if first_non_blank_col {
        let offset = first_non_blank(host, line).min(limit);
        set_primary(host, offset, None);
        return;
    }

    let caret = primary(host);
    let column = caret
        .sticky_column
        .unwrap_or_else(|| host.display_column(caret.offset.min(host.len_chars())));
    let offset = if column == Caret::END_OF_LINE {
        limit
    } else {
        host.visual_to_offset(VisualPosition::new(visual_line, column)).min(limit)
    };
    set_primary(host, offset, Some(column));
}

fn scroll_view(host: &mut dyn Host, viewport: Viewport, top: usize, left: usize) {
    if top != viewport.top_line || left != viewport.left_column {
        host.scroll_to(top, left);
    }
}

// ---------------------------------------------------------------------------
// Caret and view
// ---------------------------------------------------------------------------

/// Scroll the view so the primary caret sits at least `scrolloff` lines and
/// `sidescrolloff` columns inside it. Scrolls the minimum needed.
pub fn scroll_caret_into_view(host: &mut dyn Host, ctx: ScrollContext) {
    let viewport = host.viewport();
    if viewport.height == 0 || viewport.width == 0 {
        return;
    }
    let pos = caret_visual(host);
    let last = last_visual_line(host);

    let so = normalized_offset(ctx.scrolloff, viewport.height);
    let mut top = viewport.top_line.min(pos.line.saturating_sub(so));
    let bottom_needed = (pos.line + so).min(last);
    if top + viewport.height - 1 < bottom_needed {
        top = bottom_needed - (viewport.height - 1);
    }

    let siso = normalized_offset(ctx.sidescrolloff, viewport.width);
    let old_left = viewport.left_column;
    let mut left = old_left;
    let left_needed = pos.column.saturating_sub(siso);
    let right_needed = pos.column + siso;
    if left_needed < left {
        left = left_needed.min(old_left.saturating_sub(ctx.sidescroll));
    } else if left + viewport.width - 1 < right_needed {
        let min_left = right_needed - (viewport.width - 1);
        left = min_left.max((old_left + ctx.sidescroll).min(left_needed));
    }

    scroll_view(host, viewport, top, left);
}

/// Move the primary caret into the view after the view scrolled under it
/// (`Ctrl-E`, `zl`). The caret keeps its sticky column when only its line
/// changes.
pub fn move_caret_into_view(host: &mut dyn Host, ctx: ScrollContext) {
    let viewport = host.viewport();
    if viewport.height == 0 || viewport.width == 0 {
        return;
    }
    let pos = caret_visual(host);
    let last = last_visual_line(host);

    let so = normalized_offset(ctx.scrolloff, viewport.height);
    let max_line = if viewport.bottom_line() >= last {
        last
    } else {
        viewport.bottom_line() - so
    };
    let min_line = if viewport.top_line == 0 {
        0
    } else {
        viewport.top_line + so
    }
    .min(max_line);
    let line = pos.line.clamp(min_line, max_line);

    let siso = normalized_offset(ctx.sidescrolloff, viewport.width);
    let min_col = if viewport.left_column == 0 {
        0
    } else {
        viewport.left_column + siso
    };
    let max_col = (viewport.right_column() - siso).max(min_col);
    let column = pos.column.clamp(min_col, max_col);

    if column != pos.column {
        let target_line = host.visual_line_to_line(line);
        let offset = host
            .visual_to_offset(VisualPosition::new(line, column))
            .min(line_limit(host, target_line, ctx.past_end));
        set_primary(host, offset, None);
    } else if line != pos.line {
        place_on_visual_line(host, line, false, ctx.past_end);
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// `Ctrl-F` / `Ctrl-B`: scroll `count` pages of `height - 2` lines.
pub fn scroll_full_page(host: &mut dyn Host, down: bool, count: usize, ctx: ScrollContext) -> Movement {
    let viewport = host.viewport();
    if viewport.height == 0 {
        return Movement::NoMovement { bell: true };
    }
    let last = last_visual_line(host);
    let so = normalized_offset(ctx.scrolloff, viewport.height);
    let step = viewport.height.saturating_sub(2).max(1) * count.max(1);
    let current = caret_visual(host).line;

    let (top, target) = if down {
        // The last page still shows the last two lines.
        let max_top = last.saturating_sub(1);
        let top = (viewport.top_line + step).min(max_top.max(viewport.top_line));
        let floor = if top == 0 { 0 } else { (top + so).min(last) };
        (top, current.max(floor))
    } else {
        let top = viewport.top_line.saturating_sub(step);
        let bottom = top + viewport.height - 1;
        let ceiling = if bottom >= last { last } else { bottom - so };
        (top, current.min(ceiling))
    };

    let scrolled = top != viewport.top_line;
    scroll_view(host, viewport, top, viewport.left_column);
    if target != current {
        place_on_visual_line(host, target, ctx.start_of_line, ctx.past_end);
        return Movement::Moved;
    }
    if scrolled {
        return Movement::Moved;
    }
    Movement::NoMovement {
        bell: current + 1 < last,
    }
}

/// `Ctrl-D` / `Ctrl-U`: scroll `amount` lines and move the caret the same
/// distance. Fails on the first (up) or last (down) buffer line.
pub fn scroll_half_page(host: &mut dyn Host, down: bool, amount: usize, ctx: ScrollContext) -> Movement {
    let viewport = host.viewport();
    let line = host.line_of(primary(host).offset.min(host.len_chars()));
    if viewport.height == 0 || (!down && line == 0) || (down && line >= host.last_line()) {
        return Movement::NoMovement { bell: true };
    }

    let last = last_visual_line(host);
    let so = normalized_offset(ctx.scrolloff, viewport.height);
    let amount = amount.clamp(1, viewport.height);
    let current = caret_visual(host).line;

    let (top, target) = if down {
        let max_top = last.saturating_sub(viewport.height - 1).max(viewport.top_line);
        let top = (viewport.top_line + amount).min(max_top);
        let lower = if top == 0 { 0 } else { top + so };
        let upper = (top + viewport.height - 1).min(last);
        (top, (current + amount).clamp(lower.min(upper), upper))
    } else {
        let top = viewport.top_line.saturating_sub(amount);
        let bottom = top + viewport.height - 1;
        let upper = if bottom >= last { last } else { bottom - so };
        (top, current.saturating_sub(amount).clamp(top.min(upper), upper))
    };

    scroll_view(host, viewport, top, viewport.left_column);
    place_on_visual_line(host, target, ctx.start_of_line, ctx.past_end);
    Movement::Moved
}

/// `Ctrl-E` / `Ctrl-Y`: scroll `count` lines, dragging the caret along
/// only when it would leave the view.
pub fn scroll_lines(host: &mut dyn Host, down: bool, count: usize, ctx: ScrollContext) -> Movement {
    let viewport = host.viewport();
    let n = count.max(1);
    let top = if down {
        (viewport.top_line + n).min(last_visual_line(host))
    } else {
        viewport.top_line.saturating_sub(n)
    };
    if top == viewport.top_line {
        return Movement::NoMovement { bell: false };
    }
    scroll_view(host, viewport, top, viewport.left_column);
    move_caret_into_view(host, ctx);
    Movement::Moved
}

/// `zt z<CR> zz z. zb z-`. A count names a 1-based buffer line that also
/// receives the caret. `first_non_blank_col` is set for the `<CR>`, `.`,
/// and `-` forms.
pub fn scroll_line_to(
    host: &mut dyn Host,
    location: ScreenLocation,
    count: Option<usize>,
    first_non_blank_col: bool,
    ctx: ScrollContext,
) -> Movement {
    let viewport = host.viewport();
    let last = last_visual_line(host);
    let so = normalized_offset(ctx.scrolloff, viewport.height);
    let current = caret_visual(host).line;
    let line = count.map_or(current, |c| {
        host.line_to_visual_line((c.max(1) - 1).min(host.last_line()))
    });

    let top = match location {
        ScreenLocation::Top => line.saturating_sub(so),
        ScreenLocation::Middle => line.saturating_sub(viewport.height.saturating_sub(1) / 2),
        ScreenLocation::Bottom => (line + so)
            .min(last)
            .saturating_sub(viewport.height.saturating_sub(1)),
    };
    scroll_view(host, viewport, top, viewport.left_column);

    if line != current || first_non_blank_col {
        place_on_visual_line(host, line, first_non_blank_col, ctx.past_end);
    }
    Movement::Moved
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// `zl` / `zh` (and `zL` / `zH` with half the width as count): scroll the
/// view `count` columns.
pub fn scroll_columns(host: &mut dyn Host, right: bool, count: usize, ctx: ScrollContext) -> Movement {
    let viewport = host.viewport();
    let n = count.max(1);
    let pos = caret_visual(host);

    let left = if right {
        let line = host.visual_line_to_line(pos.line);
        let widest = host.line_display_width(line).saturating_sub(1);
        let mut column = (viewport.left_column + n).min(widest).max(viewport.left_column);
        // An inlay belonging to the following text would be cut in half.
        if column > 0
            && host
                .inlay_at(VisualPosition::new(pos.line, column - 1))
                .is_some_and(|inlay| !inlay.related_to_preceding)
        {
            column += 1;
        }
        column
    } else {
        viewport.left_column.saturating_sub(n)
    };

    if left == viewport.left_column {
        return Movement::NoMovement { bell: false };
    }
    scroll_view(host, viewport, viewport.top_line, left);
    move_caret_into_view(host, ctx);
    Movement::Moved
}

/// `zs` / `ze`: scroll so the caret column sits at the left or right edge,
/// `sidescrolloff` columns in.
pub fn scroll_caret_column_to_edge(host: &mut dyn Host, left_edge: bool, ctx: ScrollContext) -> Movement {
    let viewport = host.viewport();
    let pos = caret_visual(host);
    let siso = normalized_offset(ctx.sidescrolloff, viewport.width);

    let left = if left_edge {
        pos.column.saturating_sub(siso)
    } else {
        let line = host.visual_line_to_line(pos.line);
        let widest = host.line_display_width(line).saturating_sub(1).max(pos.column);
        (pos.column + siso)
            .min(widest)
            .saturating_sub(viewport.width.saturating_sub(1))
    };
    scroll_view(host, viewport, viewport.top_line, left);
    Movement::Moved
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Inlay, MemoryHost};
    use crate::position::Position;

    fn lines(count: usize, height: usize) -> MemoryHost {
        let text: Vec<String> = (0..count).map(|i| format!("line {i}")).collect();
        MemoryHost::new(&text.join("\n")).with_size(height, 80)
    }

    fn so(n: usize) -> ScrollContext {
        ScrollContext {
            scrolloff: n,
            ..ScrollContext::default()
        }
    }

    fn top(host: &MemoryHost) -> usize {
        host.viewport().top_line
    }

    // -- Helpers ------------------------------------------------------------

    #[test]
    fn offsets_are_capped_at_half_the_window() {
        assert_eq!(normalized_offset(5, 35), 5);
        assert_eq!(normalized_offset(999, 35), 17);
        assert_eq!(normalized_offset(999, 20), 9);
        assert_eq!(normalized_offset(3, 0), 0);
    }

    #[test]
    fn half_page_amount_defaults_to_half_height() {
        assert_eq!(half_page_amount(0, 35), 17);
        assert_eq!(half_page_amount(5, 35), 5);
        assert_eq!(half_page_amount(0, 1), 1);
    }

    #[test]
    fn movement_flags() {
        assert!(Movement::Moved.moved());
        assert!(Movement::NoMovement { bell: true }.bell());
        assert!(!Movement::NoMovement { bell: false }.bell());
    }

    // -- Caret into view ----------------------------------------------------

    #[test]
    fn caret_below_view_scrolls_minimally_with_scrolloff() {
        let mut host = lines(200, 35);
        host.set_caret(Position::new(49, 0));
        scroll_caret_into_view(&mut host, so(10));
        assert_eq!(top(&host), 25);
    }

    #[test]
    fn caret_above_view_keeps_scrolloff_lines_visible() {
        let mut host = lines(200, 35);
        host.scroll_to(164, 0);
        host.set_caret(Position::new(49, 0));
        scroll_caret_into_view(&mut host, so(10));
        assert_eq!(top(&host), 39);
        assert_eq!(host.viewport().bottom_line(), 73);
    }

    #[test]
    fn scrolloff_ignored_at_buffer_end() {
        let mut host = lines(100, 20);
        host.set_caret(Position::new(99, 0));
        scroll_caret_into_view(&mut host, so(5));
        assert_eq!(top(&host), 80);
    }

    #[test]
    fn visible_caret_does_not_scroll() {
        let mut host = lines(100, 20);
        host.scroll_to(10, 0);
        host.set_caret(Position::new(20, 0));
        scroll_caret_into_view(&mut host, so(3));
        assert_eq!(top(&host), 10);
    }

    #[test]
    fn horizontal_scroll_honors_sidescrolloff() {
        let mut host = MemoryHost::new(&"x".repeat(200)).with_size(10, 20);
        host.set_caret(Position::new(0, 50));
        let ctx = ScrollContext {
            sidescrolloff: 5,
            ..ScrollContext::default()
        };
        scroll_caret_into_view(&mut host, ctx);
        assert_eq!(host.viewport().left_column, 36);

        host.set_caret(Position::new(0, 30));
        scroll_caret_into_view(&mut host, ctx);
        assert_eq!(host.viewport().left_column, 25);
    }

    #[test]
    fn sidescroll_sets_minimum_step() {
        let mut host = MemoryHost::new(&"x".repeat(200)).with_size(10, 20);
        host.set_caret(Position::new(0, 20));
        let ctx = ScrollContext {
            sidescroll: 10,
            ..ScrollContext::default()
        };
        scroll_caret_into_view(&mut host, ctx);
        assert_eq!(host.viewport().left_column, 10);
    }

    // -- Full page ----------------------------------------------------------

    #[test]
    fn page_down_moves_caret_to_new_top() {
        let mut host = lines(100, 20);
        assert_eq!(scroll_full_page(&mut host, true, 1, so(0)), Movement::Moved);
        assert_eq!(top(&host), 18);
        assert_eq!(host.caret_position(), Position::new(18, 0));

        assert_eq!(scroll_full_page(&mut host, true, 2, so(2)), Movement::Moved);
        assert_eq!(top(&host), 54);
        assert_eq!(host.caret_position(), Position::new(56, 0));
    }

    #[test]
    fn page_down_showing_last_two_lines_does_not_bell() {
        let mut host = lines(100, 20);
        host.scroll_to(98, 0);
        host.set_caret(Position::new(98, 0));
        assert_eq!(
            scroll_full_page(&mut host, true, 1, so(0)),
            Movement::NoMovement { bell: false }
        );
        host.set_caret(Position::new(99, 0));
        assert_eq!(
            scroll_full_page(&mut host, true, 1, so(0)),
            Movement::NoMovement { bell: false }
        );
    }

    #[test]
    fn page_up_at_top_bells() {
        let mut host = lines(100, 20);
        assert_eq!(
            scroll_full_page(&mut host, false, 1, so(0)),
            Movement::NoMovement { bell: true }
        );
    }

    #[test]
    fn page_up_pulls_caret_above_margin() {
        let mut host = lines(100, 20);
        host.scroll_to(50, 0);
        host.set_caret(Position::new(60, 0));
        assert_eq!(scroll_full_page(&mut host, false, 1, so(3)), Movement::Moved);
        assert_eq!(top(&host), 32);
        assert_eq!(host.caret_position(), Position::new(48, 0));
    }

    #[test]
    fn page_move_keeps_column_without_startofline() {
        let mut host = lines(100, 20);
        host.set_caret(Position::new(0, 4));
        let ctx = ScrollContext {
            start_of_line: false,
            ..ScrollContext::default()
        };
        scroll_full_page(&mut host, true, 1, ctx);
        assert_eq!(host.caret_position(), Position::new(18, 4));
    }

    // -- Half page ----------------------------------------------------------

    #[test]
    fn half_page_down_and_up() {
        let mut host = lines(100, 20);
        assert_eq!(scroll_half_page(&mut host, true, 10, so(0)), Movement::Moved);
        assert_eq!(top(&host), 10);
        assert_eq!(host.caret_position(), Position::new(10, 0));

        assert_eq!(scroll_half_page(&mut host, false, 10, so(0)), Movement::Moved);
        assert_eq!(top(&host), 0);
        assert_eq!(host.caret_position(), Position::new(0, 0));
    }

    #[test]
    fn half_page_at_buffer_edges_bells() {
        let mut host = lines(100, 20);
        assert_eq!(
            scroll_half_page(&mut host, false, 10, so(0)),
            Movement::NoMovement { bell: true }
        );
        host.set_caret(Position::new(99, 0));
        assert_eq!(
            scroll_half_page(&mut host, true, 10, so(0)),
            Movement::NoMovement { bell: true }
        );
    }

    #[test]
    fn half_page_down_near_end_stops_scrolling_but_moves_caret() {
        let mut host = lines(100, 20);
        host.scroll_to(80, 0);
        host.set_caret(Position::new(85, 0));
        scroll_half_page(&mut host, true, 10, so(0));
        assert_eq!(top(&host), 80);
        assert_eq!(host.caret_position(), Position::new(95, 0));
    }

    // -- Line scroll --------------------------------------------------------

    #[test]
    fn ctrl_e_drags_caret_only_when_needed() {
        let mut host = lines(100, 20);
        host.set_caret(Position::new(10, 0));
        assert_eq!(scroll_lines(&mut host, true, 5, so(0)), Movement::Moved);
        assert_eq!(top(&host), 5);
        assert_eq!(host.caret_position(), Position::new(10, 0));

        scroll_lines(&mut host, true, 10, so(2));
        assert_eq!(top(&host), 15);
        assert_eq!(host.caret_position(), Position::new(17, 0));
    }

    #[test]
    fn ctrl_y_at_top_is_quiet() {
        let mut host = lines(100, 20);
        assert_eq!(scroll_lines(&mut host, false, 1, so(0)), Movement::NoMovement { bell: false });
    }

    #[test]
    fn z_commands_place_line() {
        let mut host = lines(100, 20);
        host.set_caret(Position::new(50, 0));
        scroll_line_to(&mut host, ScreenLocation::Top, None, false, so(2));
        assert_eq!(top(&host), 48);
        scroll_line_to(&mut host, ScreenLocation::Middle, None, false, so(0));
        assert_eq!(top(&host), 41);
        scroll_line_to(&mut host, ScreenLocation::Bottom, None, false, so(0));
        assert_eq!(top(&host), 31);
        assert_eq!(host.caret_position(), Position::new(50, 0));
    }

    #[test]
    fn z_with_count_moves_caret_to_line() {
        let mut host = MemoryHost::new("a\n  b\nc\nd").with_size(2, 80);
        scroll_line_to(&mut host, ScreenLocation::Top, Some(2), true, so(0));
        assert_eq!(top(&host), 1);
        assert_eq!(host.caret_position(), Position::new(1, 2));
    }

    // -- Columns ------------------------------------------------------------

    #[test]
    fn zl_and_zh() {
        let mut host = MemoryHost::new(&"x".repeat(100)).with_size(10, 20);
        assert_eq!(scroll_columns(&mut host, true, 5, ScrollContext::default()), Movement::Moved);
        assert_eq!(host.viewport().left_column, 5);
        assert_eq!(host.caret_position(), Position::new(0, 5));

        scroll_columns(&mut host, false, 3, ScrollContext::default());
        assert_eq!(host.viewport().left_column, 2);
        assert_eq!(host.caret_position(), Position::new(0, 5));
    }

    #[test]
    fn zl_steps_over_inlay_of_following_text() {
        let mut host = MemoryHost::new(&"x".repeat(100)).with_size(10, 20);
        host.add_inlay(VisualPosition::new(0, 4), Inlay { related_to_preceding: false });
        scroll_columns(&mut host, true, 5, ScrollContext::default());
        assert_eq!(host.viewport().left_column, 6);
    }

    #[test]
    fn zl_stops_at_preceding_inlay() {
        let mut host = MemoryHost::new(&"x".repeat(100)).with_size(10, 20);
        host.add_inlay(VisualPosition::new(0, 4), Inlay { related_to_preceding: true });
        scroll_columns(&mut host, true, 5, ScrollContext::default());
        assert_eq!(host.viewport().left_column, 5);
    }

    #[test]
    fn zs_and_ze() {
        let mut host = MemoryHost::new(&"x".repeat(100)).with_size(10, 20);
        host.set_caret(Position::new(0, 40));
        let ctx = ScrollContext {
            sidescrolloff: 2,
            ..ScrollContext::default()
        };
        scroll_caret_column_to_edge(&mut host, true, ctx);
        assert_eq!(host.viewport().left_column, 38);
        scroll_caret_column_to_edge(&mut host, false, ctx);
        assert_eq!(host.viewport().left_column, 23);
    }
}
