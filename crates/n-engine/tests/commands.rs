//! Ex command sessions: digraphs, undo with scrolling, mappings, and the
//! error flag, driven through `execute_line` and typed `:` lines.

use n_editor::host::{Host, MemoryHost};
use n_editor::key::Key;
use n_editor::mode::Mode;
use n_engine::{Engine, ExError, KeyResult};
use n_script::ScriptError;
use pretty_assertions::assert_eq;

fn numbered(count: usize, height: usize) -> MemoryHost {
    let text: Vec<String> = (0..count).map(|i| format!("line {i}")).collect();
    MemoryHost::new(&text.join("\n")).with_size(height, 80)
}

fn caret_line(engine: &Engine) -> usize {
    engine.host().line_of(engine.caret())
}

// -- Digraphs ----------------------------------------------------------------

#[test]
fn digraph_pairs_apply_until_the_first_error() {
    let mut engine = Engine::with_text("");
    let err = engine.execute_line("digraph (0 9450 (1 9312 (2").unwrap_err();
    assert_eq!(err.code(), Some("E39"));
    assert!(engine.has_error());
    assert_eq!(engine.digraphs().custom(), [('(', '0', '⓪'), ('(', '1', '①')]);
}

#[test]
fn bad_digraph_arguments_define_nothing() {
    let mut engine = Engine::with_text("");
    assert_eq!(
        engine.execute_line("digraph a"),
        Err(ExError::Script(ScriptError::DigraphTwoChars("a".into())))
    );
    assert_eq!(engine.execute_line("digraph aa"), Err(ExError::Script(ScriptError::NumberExpected)));
    assert_eq!(engine.execute_line("digraph aa nvnvn"), Err(ExError::Script(ScriptError::NumberExpected)));
    assert!(engine.digraphs().custom().is_empty());
}

#[test]
fn redefined_digraph_keeps_its_place() {
    let mut engine = Engine::with_text("");
    engine.execute_line("digraphs xx 65 yy 66").unwrap();
    engine.execute_line("digraphs xx 67").unwrap();
    assert_eq!(engine.digraphs().custom(), [('x', 'x', 'C'), ('y', 'y', 'B')]);
}

#[test]
fn listings_show_every_default_once() {
    let mut engine = Engine::with_text("");
    engine.execute_line("digraphs xx 9450").unwrap();

    let plain = engine.execute_line("digraphs").unwrap().unwrap();
    assert!(!plain.contains("Custom"));
    assert!(plain.lines().any(|l| l.contains("xx ⓪")));

    let headed = engine.execute_line("digraphs!").unwrap().unwrap();
    let custom = headed.lines().position(|l| l == "Custom").unwrap();
    assert!(headed.lines().skip(custom + 1).any(|l| l.contains("xx ⓪")));
    assert_eq!(headed.matches("a: ä").count(), 1);
    assert_eq!(plain.matches("a: ä").count(), 1);
}

// -- Undo --------------------------------------------------------------------

#[test]
fn undo_scrolls_the_caret_into_view_with_scrolloff() {
    let mut engine = Engine::new(numbered(100, 10));
    engine.execute_line("set scrolloff=3").unwrap();
    engine.execute_line("80").unwrap();
    engine.feed_keys("dd");
    assert_eq!(engine.host().line_count(), 99);

    engine.feed_keys("gg");
    assert_eq!(engine.host().viewport().top_line, 0);

    engine.execute_line("undo").unwrap();
    assert_eq!(engine.host().line_count(), 100);
    assert_eq!(caret_line(&engine), 79);
    let view = engine.host().viewport();
    assert!(view.top_line + 3 <= 79, "{view:?}");
    assert!(79 + 3 <= view.bottom_line(), "{view:?}");
}

#[test]
fn undolevels_caps_the_history() {
    let mut engine = Engine::with_text("abcd");
    engine.execute_line("set undolevels=1").unwrap();
    engine.feed_keys("xxx");
    engine.execute_line("undo").unwrap();
    engine.execute_line("undo").unwrap();
    assert_eq!(engine.text(), "cd");
}

// -- Mappings ----------------------------------------------------------------

#[test]
fn mapping_prefix_waits_for_more_keys() {
    let mut engine = Engine::with_text("one\ntwo");
    engine.execute_line("nnoremap ab dd").unwrap();
    assert_eq!(engine.feed_keys("a"), KeyResult::Pending);
    assert_eq!(engine.text(), "one\ntwo");
    assert_eq!(engine.feed_keys("b"), KeyResult::Consumed);
    assert_eq!(engine.text(), "two");
}

#[test]
fn ambiguous_mapping_resolves_on_flush() {
    let mut engine = Engine::with_text("abc");
    engine.execute_line("nmap q x").unwrap();
    engine.execute_line("nmap qq dd").unwrap();
    assert_eq!(engine.feed_keys("q"), KeyResult::Pending);
    engine.flush_pending();
    assert_eq!(engine.text(), "bc");
}

#[test]
fn recursive_mapping_fails_with_e223() {
    let mut engine = Engine::with_text("abc");
    engine.execute_line("nmap a b").unwrap();
    engine.execute_line("nmap b a").unwrap();
    assert_eq!(engine.feed(Key::char('a')), KeyResult::Rejected);
    assert_eq!(engine.last_error(), Some(&ExError::RecursiveMapping));
    assert_eq!(engine.mode(), Mode::Normal);
}

#[test]
fn remapped_rhs_uses_other_mappings() {
    let mut engine = Engine::with_text("abc");
    engine.execute_line("nmap Q x").unwrap();
    engine.execute_line("nmap W QQ").unwrap();
    engine.feed_keys("W");
    assert_eq!(engine.text(), "c");
}

#[test]
fn insert_mode_mapping() {
    let mut engine = Engine::with_text("");
    engine.execute_line("inoremap jk <Esc>").unwrap();
    engine.feed_keys("ihijk");
    assert_eq!(engine.text(), "hi");
    assert_eq!(engine.mode(), Mode::Normal);
}

// -- Errors ------------------------------------------------------------------

#[test]
fn error_resets_to_normal_and_keeps_prior_changes() {
    let mut engine = Engine::with_text("");
    let err = engine.execute_line("set ts=4 bogus sw=2").unwrap_err();
    assert_eq!(err.code(), Some("E518"));
    assert_eq!(engine.options().number("tabstop"), 4);
    assert_eq!(engine.options().number("shiftwidth"), 8);
    assert_eq!(engine.host().tab_width(), 4);
}

#[test]
fn error_in_typed_command_line() {
    let mut engine = Engine::with_text("abc");
    engine.feed_keys(":echo 1 +<CR>");
    assert!(engine.has_error());
    assert_eq!(engine.mode(), Mode::Normal);
    engine.feed_keys("x");
    assert!(!engine.has_error());
    assert_eq!(engine.text(), "bc");
}

#[test]
fn cursor_shape_follows_the_mode() {
    let mut engine = Engine::with_text("abc");
    let normal = engine.cursor_attributes();
    engine.feed_keys("i");
    let insert = engine.cursor_attributes();
    assert_ne!(normal, insert);
}
