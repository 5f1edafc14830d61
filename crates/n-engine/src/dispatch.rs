//! Ex command dispatch.
//!
//! The handler table is built once per session from the command table in
//! `n_script::command`: every command id gets the function that runs it.
//! [`execute`] checks the parsed line against the command's declaration
//! (bang, range) before calling the handler.

use std::collections::HashMap;

use n_script::command::{COMMANDS, CommandId, spec_of};
use n_script::ExCommand;
use tracing::debug;

use crate::engine::Engine;
use crate::error::ExError;
use crate::handlers;

/// Runs one parsed command. Returns the text to show, if any.
pub type Handler = fn(&mut Engine, &ExCommand) -> Result<Option<String>, ExError>;

/// Command id → handler.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    handlers: HashMap<CommandId, Handler>,
}

impl Dispatcher {
    /// A table with a handler for every known command.
    #[must_use]
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.register(CommandId::Goto, handlers::goto);
        for spec in COMMANDS {
            let handler: Handler = match spec.id {
                CommandId::Call => handlers::call,
                CommandId::Delete => handlers::delete,
                CommandId::Digraphs => handlers::digraphs,
                CommandId::Echo => handlers::echo,
                CommandId::Execute => handlers::execute,
                CommandId::Goto => handlers::goto,
                CommandId::Let => handlers::let_,
                CommandId::Map(..) => handlers::map,
                CommandId::Normal => handlers::normal,
                CommandId::Redo => handlers::redo,
                CommandId::Set | CommandId::SetGlobal | CommandId::SetLocal => handlers::set,
                CommandId::Undo => handlers::undo,
                CommandId::Unlet => handlers::unlet,
                CommandId::Yank => handlers::yank,
            };
            dispatcher.register(spec.id, handler);
        }
        dispatcher
    }

    /// A table with no handlers.
    #[must_use]
    pub fn empty() -> Self {
        Self { handlers: HashMap::new() }
    }

    /// Add or replace the handler of `id`.
    pub fn register(&mut self, id: CommandId, handler: Handler) {
        self.handlers.insert(id, handler);
    }

    /// Drop the handler of `id`; the command then fails with E492.
    pub fn remove(&mut self, id: CommandId) -> Option<Handler> {
        self.handlers.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: CommandId) -> Option<Handler> {
        self.handlers.get(&id).copied()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate and run `command` against `engine`.
///
/// # Errors
///
/// E477 for a bang the command does not take, E481 for a range it does not
/// take, E492 when no handler is registered, or the handler's own error.
pub fn execute(engine: &mut Engine, command: &ExCommand) -> Result<Option<String>, ExError> {
    if let Some(spec) = spec_of(command.id) {
        if command.bang && !spec.bang {
            return Err(ExError::NoBang);
        }
        if command.range.is_some() && !spec.range {
            return Err(ExError::NoRange);
        }
    }
    let handler = engine
        .dispatcher()
        .get(command.id)
        .ok_or_else(|| ExError::UnknownCommand(command.name().to_string()))?;
    debug!(command = command.name(), bang = command.bang, "dispatch");
    handler(engine, command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use n_script::parse_command;

    #[test]
    fn every_command_has_a_handler() {
        let dispatcher = Dispatcher::new();
        for spec in COMMANDS {
            assert!(dispatcher.get(spec.id).is_some(), "{}", spec.name);
        }
        assert!(dispatcher.get(CommandId::Goto).is_some());
    }

    #[test]
    fn bang_and_range_are_checked() {
        let mut engine = Engine::with_text("a\nb\n");
        let cmd = parse_command("echo! 1").unwrap();
        assert_eq!(execute(&mut engine, &cmd), Err(ExError::NoBang));
        let cmd = parse_command("1,2set ts=4").unwrap();
        assert_eq!(execute(&mut engine, &cmd), Err(ExError::NoRange));
        assert_eq!(engine.options().number("tabstop"), 8);
    }

    #[test]
    fn missing_handler_is_unknown() {
        let mut engine = Engine::with_text("x");
        engine.dispatcher_mut().remove(CommandId::Undo);
        assert_eq!(
            engine.execute_line("undo"),
            Err(ExError::UnknownCommand("undo".into()))
        );
        assert_eq!(engine.text(), "x");

        engine.dispatcher_mut().register(CommandId::Undo, handlers::redo);
        assert_eq!(engine.execute_line("undo"), Ok(None));
    }
}
