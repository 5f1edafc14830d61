//! Errors of Ex command execution.

use n_editor::EditorError;
use n_script::ScriptError;
use thiserror::Error;

/// Why an Ex command failed.
///
/// Parse and evaluation failures arrive wrapped from the lower crates and
/// keep their own message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExError {
    #[error("E492: Not an editor command: {0}")]
    UnknownCommand(String),

    #[error("E477: No ! allowed")]
    NoBang,

    #[error("E481: No range allowed")]
    NoRange,

    #[error("E223: recursive mapping")]
    RecursiveMapping,

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

impl ExError {
    /// The Vim error number, e.g. `"E492"`.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::UnknownCommand(_) => Some("E492"),
            Self::NoBang => Some("E477"),
            Self::NoRange => Some("E481"),
            Self::RecursiveMapping => Some("E223"),
            Self::Script(err) => err.code(),
            Self::Editor(err) => err.code(),
        }
    }
}
