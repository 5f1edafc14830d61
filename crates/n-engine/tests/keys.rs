//! Key-driven sessions: modes, counts, selections, scrolling, and digraph
//! entry, fed through the engine the way a host would.

use n_editor::host::{Host, MemoryHost};
use n_editor::key::{Key, KeyCode};
use n_editor::mode::{Mode, SelectionKind};
use n_editor::position::Position;
use n_engine::{Engine, KeyResult};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn numbered(count: usize, height: usize) -> MemoryHost {
    let text: Vec<String> = (0..count).map(|i| format!("line {i}")).collect();
    MemoryHost::new(&text.join("\n")).with_size(height, 80)
}

fn caret_line(engine: &Engine) -> usize {
    engine.host().line_of(engine.caret())
}

// -- Modes -------------------------------------------------------------------

#[test]
fn v_twice_returns_to_normal() {
    let mut engine = Engine::with_text("hello");
    engine.feed_keys("v");
    assert_eq!(engine.mode(), Mode::visual(SelectionKind::Character));
    engine.feed_keys("v");
    assert_eq!(engine.mode(), Mode::Normal);
}

#[test]
fn v_then_shift_v_switches_kind() {
    let mut engine = Engine::with_text("hello");
    engine.feed_keys("vV");
    assert_eq!(engine.mode(), Mode::visual(SelectionKind::Line));
    engine.feed_keys("<C-v>");
    assert_eq!(engine.mode(), Mode::visual(SelectionKind::Block));
    engine.feed(Key::ESC);
    assert_eq!(engine.mode(), Mode::Normal);
}

#[test]
fn escape_from_insert_steps_left() {
    let mut engine = Engine::with_text("");
    engine.feed_keys("iabc<Esc>");
    assert_eq!(engine.text(), "abc");
    assert_eq!(engine.caret(), 2);
    assert_eq!(engine.mode(), Mode::Normal);
}

#[test]
fn colon_from_visual_prefills_the_range() {
    let mut engine = Engine::with_text("a\nb\nc\nd");
    engine.feed_keys("Vj:d<CR>");
    assert_eq!(engine.text(), "c\nd");
    assert_eq!(engine.mode(), Mode::Normal);
}

// -- Counts ------------------------------------------------------------------

#[test]
fn count_digits_accumulate_once() {
    let mut engine = Engine::with_text(&"a".repeat(100));
    engine.feed_keys("52x");
    assert_eq!(engine.text().len(), 48);
    engine.feed_keys("x");
    assert_eq!(engine.text().len(), 47);
}

#[test]
fn counts_before_operator_and_motion_multiply() {
    let text: Vec<String> = (0..20).map(|i| i.to_string()).collect();
    let mut engine = Engine::with_text(&text.join("\n"));
    engine.feed_keys("2d3j");
    assert_eq!(engine.host().line_count(), 13);
    assert_eq!(engine.host().line_text(0), "7");
}

#[test]
fn partial_commands_report_pending() {
    let mut engine = Engine::with_text("abc");
    assert_eq!(engine.feed_keys("5"), KeyResult::Pending);
    assert_eq!(engine.feed(Key::ESC), KeyResult::Consumed);
    assert_eq!(engine.feed_keys("\"a"), KeyResult::Pending);
    assert_eq!(engine.feed_keys("y"), KeyResult::Pending);
    assert_eq!(engine.feed_keys("$"), KeyResult::Consumed);
    assert_eq!(engine.registers().get(Some('a')).content(), "abc");
}

// -- keymodel ----------------------------------------------------------------

#[test]
fn keymodel_default_value() {
    let engine = Engine::with_text("");
    assert_eq!(engine.options().text("keymodel"), "continueselect,stopselect");
}

#[test]
fn home_stops_select_by_default() {
    let mut engine = Engine::with_text("hello world");
    engine.feed_keys("$gh");
    assert!(engine.mode().is_select());
    engine.feed(Key::named(KeyCode::Home));
    assert_eq!(engine.mode(), Mode::Normal);
    assert_eq!(engine.caret(), 0);
}

#[test]
fn home_extends_selections_with_empty_keymodel() {
    let mut engine = Engine::with_text("hello world");
    engine.execute_line("set keymodel=").unwrap();

    engine.feed_keys("$v<Home>");
    assert_eq!(engine.mode(), Mode::visual(SelectionKind::Character));
    engine.feed(Key::ESC);

    engine.feed_keys("$gh<Home>");
    assert!(engine.mode().is_select());
    assert_eq!(engine.caret(), 0);
}

#[test]
fn home_stops_visual_with_stopvisual() {
    let mut engine = Engine::with_text("hello world");
    engine.execute_line("set km=stopvisual").unwrap();
    engine.feed_keys("$v<Home>");
    assert_eq!(engine.mode(), Mode::Normal);
    assert_eq!(engine.caret(), 0);
}

// -- Scrolling ---------------------------------------------------------------

#[test]
fn page_down_with_last_two_lines_visible_is_quiet() {
    let mut host = numbered(100, 20);
    host.scroll_to(98, 0);
    host.set_caret(Position::new(99, 0));
    let mut engine = Engine::new(host);

    assert_eq!(engine.feed_keys("<C-f>"), KeyResult::Consumed);
    assert!(!engine.has_error());
    assert_eq!(caret_line(&engine), 99);
    assert_eq!(engine.host().viewport().top_line, 98);
}

#[test]
fn page_up_at_top_rings_the_bell() {
    let mut engine = Engine::new(numbered(100, 20));
    assert_eq!(engine.feed_keys("<C-b>"), KeyResult::Rejected);
    assert!(!engine.has_error());
}

#[test]
fn moving_past_the_view_scrolls_with_scrolloff() {
    let mut engine = Engine::new(numbered(100, 10));
    engine.execute_line("set so=2").unwrap();
    engine.feed_keys("20j");
    let view = engine.host().viewport();
    assert_eq!(caret_line(&engine), 20);
    assert_eq!(view.bottom_line(), 22);
}

// -- Digraph entry -----------------------------------------------------------

#[test]
fn ctrl_k_inserts_digraphs() {
    let mut engine = Engine::with_text("");
    engine.feed_keys("i<C-k>a:<C-k>:a<Esc>");
    assert_eq!(engine.text(), "ää");
}

#[test]
fn ctrl_k_miss_inserts_the_second_char() {
    let mut engine = Engine::with_text("");
    engine.feed_keys("i<C-k>q7<Esc>");
    assert_eq!(engine.text(), "7");
}

#[test]
fn ctrl_k_uses_custom_digraphs() {
    let mut engine = Engine::with_text("");
    engine.execute_line("digraphs (0 9450").unwrap();
    engine.feed_keys("i<C-k>0(<Esc>");
    assert_eq!(engine.text(), "⓪");
}

// -- Properties --------------------------------------------------------------

proptest! {
    #[test]
    fn typed_count_deletes_that_many_chars(count in 1usize..60) {
        let mut engine = Engine::with_text(&"x".repeat(80));
        engine.feed_keys(&format!("{count}x"));
        prop_assert_eq!(engine.text().len(), 80 - count);
    }
}
