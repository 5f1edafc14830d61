//! Errors raised by the editor core.
//!
//! Every variant renders as the message Vim prints for the same failure, so
//! the engine can surface `err.to_string()` unchanged. [`EditorError::code`]
//! exposes the `E` number for callers that match on it.

use thiserror::Error;

/// Failure of an option, digraph, or mapping operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("E518: Unknown option: {0}")]
    UnknownOption(String),

    #[error("E474: Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("E521: Number required after =: {0}")]
    NumberRequired(String),

    #[error("E545: Missing colon: {0}")]
    MissingColon(String),

    #[error("E546: Illegal mode: {0}")]
    IllegalMode(String),

    #[error("E548: Digit expected: {0}")]
    DigitExpected(String),

    #[error("E549: Illegal percentage: {0}")]
    IllegalPercentage(String),

    /// Neither the pair nor its reverse has a digraph.
    #[error("Digraph not found: {0}{1}")]
    DigraphNotFound(char, char),

    /// A digraph value that is not a Unicode scalar (surrogates, > U+10FFFF).
    #[error("E474: Invalid argument: {0}")]
    InvalidCodepoint(u32),

    #[error("E223: recursive mapping")]
    RecursiveMapping,

    #[error("E31: No such mapping")]
    NoSuchMapping,
}

impl EditorError {
    /// The Vim error number, e.g. `"E518"`. `None` for failures Vim reports
    /// without a number.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::UnknownOption(_) => Some("E518"),
            Self::InvalidArgument(_) | Self::InvalidCodepoint(_) => Some("E474"),
            Self::NumberRequired(_) => Some("E521"),
            Self::MissingColon(_) => Some("E545"),
            Self::IllegalMode(_) => Some("E546"),
            Self::DigitExpected(_) => Some("E548"),
            Self::IllegalPercentage(_) => Some("E549"),
            Self::DigraphNotFound(..) => None,
            Self::RecursiveMapping => Some("E223"),
            Self::NoSuchMapping => Some("E31"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_vim_codes() {
        let err = EditorError::UnknownOption("foo".into());
        assert_eq!(err.to_string(), "E518: Unknown option: foo");
        assert_eq!(err.code(), Some("E518"));

        let err = EditorError::IllegalPercentage("i:ver0".into());
        assert_eq!(err.to_string(), "E549: Illegal percentage: i:ver0");
    }

    #[test]
    fn digraph_miss_has_no_code() {
        let err = EditorError::DigraphNotFound('x', 'y');
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "Digraph not found: xy");
    }
}
