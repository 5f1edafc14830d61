// SPDX-License-Identifier: MIT
//
// n-vim: a headless driver for the n-vim editing engine.
//
// Loads a file (or nothing) into the in-memory host and runs a script
// against it:
//
//   n-vim [FILE] [-c EX-COMMAND]... [-k KEYS]... [-p]
//
// `-c` lines and `-k` key sequences run in the order given. Without either,
// Ex command lines are read from stdin. Command output goes to stdout,
// error messages to stderr. `-p` prints the final buffer.
//
// N_VIM_LOG takes an EnvFilter directive (`debug`, `n_engine=trace`); the
// default shows warnings only. Logs go to stderr.

use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use n_editor::buffer::Buffer;
use n_editor::host::MemoryHost;
use n_editor::key::parse_keys;
use n_engine::Engine;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: n-vim [FILE] [-c EX-COMMAND]... [-k KEYS]... [-p]";

// ─── Arguments ──────────────────────────────────────────────────────────────

/// One step of the script.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    /// An Ex command line, without the leading `:`.
    Ex(String),
    /// Keys in `<C-x>` notation.
    Keys(String),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    file: Option<PathBuf>,
    actions: Vec<Action>,
    print: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" => {
                let line = args.next().ok_or("-c needs an argument")?;
                parsed.actions.push(Action::Ex(line));
            }
            "-k" => {
                let keys = args.next().ok_or("-k needs an argument")?;
                parsed.actions.push(Action::Keys(keys));
            }
            "-p" | "--print" => parsed.print = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("unknown flag: {flag}\n{USAGE}"));
            }
            _ if parsed.file.is_some() => return Err(format!("only one file allowed\n{USAGE}")),
            _ => parsed.file = Some(PathBuf::from(arg)),
        }
    }
    Ok(parsed)
}

// ─── Session ────────────────────────────────────────────────────────────────

/// Runs actions against an engine and remembers whether any failed.
struct Session {
    engine: Engine,
    failed: bool,
}

impl Session {
    fn new(buffer: Buffer) -> Self {
        Self {
            engine: Engine::new(MemoryHost::with_buffer(buffer)),
            failed: false,
        }
    }

    fn run(&mut self, action: &Action) {
        debug!(?action, "run");
        match action {
            Action::Ex(line) => {
                let line = line.strip_prefix(':').unwrap_or(line);
                // Output and the error message also land in the message
                // list, which `report` prints.
                if self.engine.execute_line(line).is_err() {
                    self.failed = true;
                }
                self.report();
            }
            Action::Keys(notation) => {
                for key in parse_keys(notation) {
                    self.engine.feed(key);
                    self.check_keys();
                }
                self.engine.flush_pending();
                self.check_keys();
            }
        }
    }

    fn check_keys(&mut self) {
        if self.engine.has_error() {
            self.failed = true;
        }
        self.report();
    }

    fn report(&mut self) {
        let error = self.engine.last_error().map(ToString::to_string);
        for message in self.engine.take_messages() {
            if error.as_deref() == Some(message.as_str()) {
                eprintln!("{message}");
            } else {
                println!("{message}");
            }
        }
    }
}

fn load(file: Option<&PathBuf>) -> io::Result<Buffer> {
    match file {
        Some(path) if path.exists() => Buffer::from_file(path),
        _ => Ok(Buffer::new()),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("N_VIM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let args = parse_args(env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("n-vim: {e}");
        process::exit(2);
    });

    let buffer = load(args.file.as_ref()).unwrap_or_else(|e| {
        eprintln!("n-vim: cannot read file: {e}");
        process::exit(1);
    });
    let mut session = Session::new(buffer);

    if args.actions.is_empty() {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().is_empty() => {}
                Ok(line) => session.run(&Action::Ex(line)),
                Err(e) => {
                    eprintln!("n-vim: {e}");
                    process::exit(1);
                }
            }
        }
    } else {
        for action in &args.actions {
            session.run(action);
        }
    }

    if args.print {
        print!("{}", session.engine.text());
    }
    if session.failed {
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(ToString::to_string))
    }

    // ── Arguments ─────────────────────────────────────────────────────────

    #[test]
    fn actions_keep_their_order() {
        let parsed = args(&["notes.txt", "-c", "set ts=4", "-k", "dd", "-c", "undo", "-p"]).unwrap();
        assert_eq!(parsed.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(
            parsed.actions,
            vec![
                Action::Ex("set ts=4".into()),
                Action::Keys("dd".into()),
                Action::Ex("undo".into()),
            ]
        );
        assert!(parsed.print);
    }

    #[test]
    fn bad_arguments() {
        assert!(args(&["-c"]).is_err());
        assert!(args(&["-x"]).is_err());
        assert!(args(&["a", "b"]).is_err());
        assert_eq!(args(&[]), Ok(Args::default()));
    }

    // ── Session ───────────────────────────────────────────────────────────

    #[test]
    fn session_runs_ex_and_keys() {
        let mut session = Session::new(Buffer::from_text("one\ntwo\nthree"));
        session.run(&Action::Ex(":2".into()));
        session.run(&Action::Keys("dd".into()));
        assert_eq!(session.engine.text(), "one\nthree");
        assert!(!session.failed);
    }

    #[test]
    fn session_remembers_failures() {
        let mut session = Session::new(Buffer::from_text("abc"));
        session.run(&Action::Ex("bogus".into()));
        assert!(session.failed);
        assert!(session.engine.messages().is_empty());
    }

    #[test]
    fn pending_mapping_is_flushed_at_the_end() {
        let mut session = Session::new(Buffer::from_text("abc"));
        session.run(&Action::Ex("nmap q x".into()));
        session.run(&Action::Ex("nmap qq dd".into()));
        session.run(&Action::Keys("q".into()));
        assert_eq!(session.engine.text(), "bc");
    }
}
