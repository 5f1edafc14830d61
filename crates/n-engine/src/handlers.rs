//! Ex command handlers.
//!
//! One function per command, all with the [`Handler`](crate::dispatch::Handler)
//! signature. Each returns the text the command shows (`:echo`, listings,
//! `:set` queries) or `None`.

use n_editor::edit::{self, Span};
use n_editor::key::parse_keys;
use n_editor::mapping::MapModes;
use n_editor::mode::Operator;
use n_editor::motion::first_non_blank;
use n_editor::options::Scope;
use n_editor::EditorError;
use n_script::command::{Args, CommandId, MapKind, Range, digraph_pairs};
use n_script::eval::{self, Evaluator};
use n_script::{ExCommand, ScriptError};

use crate::engine::{Engine, literal_keys};
use crate::error::ExError;

type Output = Result<Option<String>, ExError>;

fn raw(command: &ExCommand) -> &str {
    match &command.args {
        Args::Raw(text) => text,
        _ => "",
    }
}

/// 0-based `(first, last)` lines of `range`, the caret line without one.
fn resolve_lines(engine: &Engine, range: Option<&Range>) -> Result<(usize, usize), ExError> {
    let host = engine.host();
    let current = host.line_of(engine.caret());
    let Some(range) = range else {
        return Ok((current, current));
    };
    let mark = |name: char| {
        engine
            .state()
            .mark(name)
            .map(|offset| host.line_of(offset.min(host.len_chars())))
    };
    Ok(range.resolve(current, host.last_line(), &mark)?)
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// `:digraphs[!]` lists; `:digraphs {pairs}` defines until the first bad
/// pair.
pub fn digraphs(engine: &mut Engine, command: &ExCommand) -> Output {
    let args = raw(command);
    if args.is_empty() {
        return Ok(Some(engine.digraphs.format_listing(command.bang)));
    }
    for pair in digraph_pairs(args) {
        let (first, second, ch) = pair?;
        engine.digraphs.define(first, second, ch);
    }
    Ok(None)
}

/// `:set`, `:setlocal`, `:setglobal`.
pub fn set(engine: &mut Engine, command: &ExCommand) -> Output {
    let scope = match command.id {
        CommandId::SetLocal => Scope::Local,
        CommandId::SetGlobal => Scope::Global,
        _ => Scope::Both,
    };
    Ok(engine.options.execute_set(scope, raw(command))?)
}

/// The map family. Without a rhs the matching mappings are listed.
pub fn map(engine: &mut Engine, command: &ExCommand) -> Output {
    let CommandId::Map(kind, prefix) = command.id else {
        return Err(ExError::UnknownCommand(command.name().to_string()));
    };
    let modes = if command.bang {
        MapModes::INSERT
    } else {
        MapModes::from_prefix(prefix).ok_or_else(|| EditorError::InvalidArgument(prefix.to_string()))?
    };

    let text = raw(command);
    let (lhs, rhs) = match text.split_once(char::is_whitespace) {
        Some((lhs, rhs)) => (lhs, rhs.trim_start()),
        None => (text, ""),
    };

    match kind {
        MapKind::Unmap if lhs.is_empty() => Err(ScriptError::ArgumentRequired.into()),
        MapKind::Unmap => {
            engine.mappings.remove(modes, &parse_keys(lhs))?;
            Ok(None)
        }
        _ if rhs.is_empty() => Ok(Some(engine.mappings.list(modes, &parse_keys(lhs)))),
        MapKind::Map | MapKind::Noremap => {
            let noremap = kind == MapKind::Noremap;
            engine.mappings.define(modes, parse_keys(lhs), parse_keys(rhs), noremap)?;
            Ok(None)
        }
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

pub fn echo(engine: &mut Engine, command: &ExCommand) -> Output {
    let Args::Exprs(exprs) = &command.args else {
        return Ok(None);
    };
    let (env, functions) = engine.script();
    let evaluator = Evaluator::new(&env, functions);
    let parts = exprs
        .iter()
        .map(|expr| evaluator.eval(expr).map(|value| value.echo_text()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(parts.join(" ")))
}

/// `:execute`: the values joined with spaces run as a command line.
pub fn execute(engine: &mut Engine, command: &ExCommand) -> Output {
    let Args::Exprs(exprs) = &command.args else {
        return Ok(None);
    };
    let line = {
        let (env, functions) = engine.script();
        let evaluator = Evaluator::new(&env, functions);
        exprs
            .iter()
            .map(|expr| evaluator.eval(expr)?.to_str())
            .collect::<Result<Vec<_>, _>>()?
            .join(" ")
    };
    engine.execute_line(&line)
}

pub fn let_(engine: &mut Engine, command: &ExCommand) -> Output {
    match &command.args {
        Args::Let { target, op, value } => {
            let (mut env, functions) = engine.script();
            eval::assign(&mut env, functions, target, *op, value)?;
            Ok(None)
        }
        Args::Vars(names) => {
            if let Some(missing) = names.iter().find(|n| engine.variables.get(n).is_none()) {
                return Err(ScriptError::UndefinedVariable(missing.clone()).into());
            }
            let listing = engine.variables.list(names);
            Ok((!listing.is_empty()).then_some(listing))
        }
        _ => Ok(None),
    }
}

pub fn unlet(engine: &mut Engine, command: &ExCommand) -> Output {
    if let Args::Vars(names) = &command.args {
        let (mut env, _) = engine.script();
        eval::unlet(&mut env, names, command.bang)?;
    }
    Ok(None)
}

/// `:call`: evaluate and drop the result.
pub fn call(engine: &mut Engine, command: &ExCommand) -> Output {
    if let Args::Call(expr) = &command.args {
        let (env, functions) = engine.script();
        Evaluator::new(&env, functions).eval(expr)?;
    }
    Ok(None)
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

pub fn undo(engine: &mut Engine, _: &ExCommand) -> Output {
    engine.with_state(|state, ctx| state.undo_command(ctx, false));
    Ok(None)
}

pub fn redo(engine: &mut Engine, _: &ExCommand) -> Output {
    engine.with_state(|state, ctx| state.undo_command(ctx, true));
    Ok(None)
}

/// `:normal[!] {keys}`. The bang ignores mappings.
pub fn normal(engine: &mut Engine, command: &ExCommand) -> Output {
    let text = raw(command);
    if text.is_empty() {
        return Err(ScriptError::ArgumentRequired.into());
    }
    engine.run_normal(&literal_keys(text), !command.bang);
    Ok(None)
}

pub fn delete(engine: &mut Engine, command: &ExCommand) -> Output {
    line_operator(engine, command, Operator::Delete)
}

pub fn yank(engine: &mut Engine, command: &ExCommand) -> Output {
    line_operator(engine, command, Operator::Yank)
}

/// `[range]delete [x] [count]` and `:yank`. A count starts at the last line
/// of the range.
fn line_operator(engine: &mut Engine, command: &ExCommand, op: Operator) -> Output {
    let (register, count) = match command.args {
        Args::RegisterCount { register, count } => (register, count),
        _ => (None, None),
    };
    let (mut first, mut last) = resolve_lines(engine, command.range.as_ref())?;
    if let Some(count) = count {
        first = last;
        last = (last + count - 1).min(engine.host().last_line());
    }
    let lines = last - first + 1;

    let delta = engine.with_state(|state, ctx| {
        ctx.begin();
        let applied = edit::apply_operator(ctx, op, Span::Lines { first, last }, register, 0);
        if op == Operator::Delete {
            let index = ctx.host.carets().primary_index();
            ctx.move_caret(index, applied.caret);
        }
        ctx.commit();
        state.settle(ctx);
        applied.line_delta
    });

    if op == Operator::Yank && lines > 2 {
        engine.report(format!("{lines} lines yanked"));
    } else if delta < -2 {
        engine.report(format!("{} fewer lines", delta.unsigned_abs()));
    }
    Ok(None)
}

/// A range alone moves to the first non-blank of its last line.
pub fn goto(engine: &mut Engine, command: &ExCommand) -> Output {
    if command.range.is_none() {
        return Ok(None);
    }
    let (_, line) = resolve_lines(engine, command.range.as_ref())?;
    engine.with_state(|state, ctx| {
        let offset = first_non_blank(ctx.host, line);
        let index = ctx.host.carets().primary_index();
        ctx.move_caret(index, offset);
        state.settle(ctx);
    });
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use n_editor::register::RegisterKind;
    use pretty_assertions::assert_eq;

    fn engine(text: &str) -> Engine {
        Engine::with_text(text)
    }

    fn run(engine: &mut Engine, line: &str) -> Option<String> {
        match engine.execute_line(line) {
            Ok(output) => output,
            Err(err) => panic!("{line}: {err}"),
        }
    }

    // -- Digraphs -----------------------------------------------------------

    #[test]
    fn digraph_definitions_apply_until_the_bad_pair() {
        let mut e = engine("");
        let err = e.execute_line("digraphs (0 9450 (1 9312 (2").unwrap_err();
        assert_eq!(err, ExError::Script(ScriptError::NumberExpected));
        assert_eq!(e.digraphs().lookup('(', '0'), Ok('⓪'));
        assert_eq!(e.digraphs().lookup('(', '1'), Ok('①'));
        assert!(e.digraphs().lookup('(', '2').is_err());
    }

    #[test]
    fn digraph_argument_errors_define_nothing() {
        let mut e = engine("");
        assert_eq!(
            e.execute_line("digraph a").unwrap_err(),
            ExError::Script(ScriptError::DigraphTwoChars("a".into()))
        );
        assert_eq!(e.execute_line("digraph aa").unwrap_err().code(), Some("E39"));
        assert!(e.digraphs().custom().is_empty());
    }

    #[test]
    fn digraph_listing_shows_custom_entries() {
        let mut e = engine("");
        run(&mut e, "dig aa 9450");
        let plain = run(&mut e, "digraphs").unwrap();
        assert!(plain.lines().any(|l| l.contains("aa ⓪") && l.ends_with("9450")));
        let headed = run(&mut e, "digraphs!").unwrap();
        assert!(headed.contains("Custom"));
    }

    // -- Options ------------------------------------------------------------

    #[test]
    fn set_queries_and_scopes() {
        let mut e = engine("");
        assert_eq!(run(&mut e, "set ts=4 ts?"), Some("  tabstop=4".into()));
        run(&mut e, "setlocal sw=2");
        assert_eq!(e.options().number("shiftwidth"), 2);
        assert_eq!(e.execute_line("set nosuch").unwrap_err().code(), Some("E518"));
    }

    // -- Script -------------------------------------------------------------

    #[test]
    fn let_echo_unlet() {
        let mut e = engine("");
        run(&mut e, "let g:list = [1, 'two']");
        run(&mut e, "let g:list += [3]");
        assert_eq!(run(&mut e, "echo g:list len(g:list)"), Some("[1, 'two', 3] 3".into()));
        assert_eq!(run(&mut e, "echo 'plain'"), Some("plain".into()));
        run(&mut e, "unlet g:list");
        assert_eq!(e.execute_line("echo g:list").unwrap_err().code(), Some("E121"));
        assert_eq!(e.execute_line("unlet g:list").unwrap_err().code(), Some("E108"));
        run(&mut e, "unlet! g:list");
    }

    #[test]
    fn let_reaches_options_and_registers() {
        let mut e = engine("");
        run(&mut e, "let &sw = 3");
        assert_eq!(e.options().number("shiftwidth"), 3);
        run(&mut e, "let @a = 'text'");
        assert_eq!(e.registers().get(Some('a')).content(), "text");
        assert_eq!(run(&mut e, "echo @a"), Some("text".into()));
    }

    #[test]
    fn let_listing() {
        let mut e = engine("");
        run(&mut e, "let n = 5");
        let listing = run(&mut e, "let n").unwrap();
        assert!(listing.starts_with('n'));
        assert!(listing.ends_with('5'));
        assert_eq!(e.execute_line("let nope").unwrap_err().code(), Some("E121"));
    }

    #[test]
    fn call_discards_the_result() {
        let mut e = engine("");
        assert_eq!(run(&mut e, "call abs(-1)"), None);
        assert_eq!(e.execute_line("call and([1], [2])").unwrap_err().code(), Some("E745"));
    }

    #[test]
    fn execute_runs_the_joined_string() {
        let mut e = engine("one\ntwo\nthree\n");
        run(&mut e, "execute 'normal' 'dd'");
        assert_eq!(e.text(), "two\nthree\n");
        run(&mut e, "execute \"normal Ahi\\<Esc>\"");
        assert_eq!(e.text(), "twohi\nthree\n");
    }

    // -- Editing ------------------------------------------------------------

    #[test]
    fn normal_escapes_unfinished_commands() {
        let mut e = engine("abc\n");
        run(&mut e, "normal ixy");
        assert_eq!(e.text(), "xyabc\n");
        assert_eq!(e.mode(), n_editor::mode::Mode::Normal);
        run(&mut e, "normal d");
        assert_eq!(e.mode(), n_editor::mode::Mode::Normal);
    }

    #[test]
    fn normal_bang_ignores_mappings() {
        let mut e = engine("abc\n");
        run(&mut e, "nnoremap x dd");
        run(&mut e, "normal! x");
        assert_eq!(e.text(), "bc\n");
        run(&mut e, "normal x");
        assert_eq!(e.text(), "");
    }

    #[test]
    fn delete_and_yank_ranges() {
        let mut e = engine("1\n2\n3\n4\n5\n");
        run(&mut e, "2,3yank a");
        assert_eq!(e.registers().get(Some('a')).content(), "2\n3\n");
        assert_eq!(e.registers().get(Some('a')).kind(), RegisterKind::Line);
        run(&mut e, "2delete x 2");
        assert_eq!(e.text(), "1\n4\n5\n");
        assert_eq!(e.registers().get(Some('x')).content(), "2\n3\n");
        run(&mut e, "%d");
        assert_eq!(e.text(), "");
        assert!(e.messages().iter().any(|m| m == "3 fewer lines"));
        assert_eq!(e.execute_line("d 0").unwrap_err().code(), Some("E939"));
    }

    #[test]
    fn undo_and_redo_commands() {
        let mut e = engine("a\nb\n");
        run(&mut e, "1d");
        assert_eq!(e.text(), "b\n");
        run(&mut e, "undo");
        assert_eq!(e.text(), "a\nb\n");
        run(&mut e, "redo");
        assert_eq!(e.text(), "b\n");
        run(&mut e, "redo");
        assert_eq!(e.messages(), ["Already at newest change"]);
    }

    #[test]
    fn range_alone_jumps() {
        let mut e = engine("a\n  b\nc");
        run(&mut e, "2");
        assert_eq!(e.caret(), 4);
        run(&mut e, "$");
        assert_eq!(e.host().line_of(e.caret()), 2);
        assert_eq!(e.execute_line("9").unwrap_err().code(), Some("E16"));
        assert_eq!(e.execute_line("'q").unwrap_err().code(), Some("E20"));
    }

    // -- Mappings -----------------------------------------------------------

    #[test]
    fn map_define_list_remove() {
        let mut e = engine("");
        run(&mut e, "nmap <F2> dd");
        let listing = run(&mut e, "nmap").unwrap();
        assert!(listing.contains("<F2>"));
        run(&mut e, "nunmap <F2>");
        assert_eq!(run(&mut e, "nmap"), Some("No mapping found".into()));
        assert_eq!(e.execute_line("nunmap <F2>").unwrap_err().code(), Some("E31"));
    }

    #[test]
    fn map_bang_is_insert_mode() {
        let mut e = engine("");
        run(&mut e, "map! jk <Esc>");
        assert!(e.execute_line("iunmap jk").is_ok());
        assert_eq!(e.execute_line("nmap! x y").unwrap_err(), ExError::NoBang);
    }
}
