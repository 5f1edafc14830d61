//! Errors raised while parsing or evaluating Vimscript.
//!
//! Each variant displays as the message Vim prints, code first, so a caller
//! can show `err.to_string()` as is.

use n_editor::EditorError;
use thiserror::Error;

/// Parse or evaluation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    // -- Command line -------------------------------------------------------
    #[error("E492: Not an editor command: {0}")]
    NotAnEditorCommand(String),

    #[error("E464: Ambiguous use of user-defined command: {0}")]
    AmbiguousCommand(String),

    #[error("E488: Trailing characters: {0}")]
    TrailingCharacters(String),

    #[error("E16: Invalid range")]
    InvalidRange,

    #[error("E20: Mark not set")]
    MarkNotSet,

    #[error("E939: Positive count required")]
    PositiveCountRequired,

    #[error("E39: Number expected")]
    NumberExpected,

    #[error("E1214: Digraph must be just two characters: {0}")]
    DigraphTwoChars(String),

    #[error("E474: Invalid argument")]
    InvalidArgument,

    #[error("E471: Argument required")]
    ArgumentRequired,

    #[error("E129: Function name required")]
    FunctionNameRequired,

    #[error("E461: Illegal variable name: {0}")]
    IllegalVariableName(String),

    // -- Expression syntax --------------------------------------------------
    #[error("E15: Invalid expression: \"{0}\"")]
    InvalidExpression(String),

    #[error("E114: Missing double quote: {0}")]
    MissingDoubleQuote(String),

    #[error("E115: Missing single quote: {0}")]
    MissingSingleQuote(String),

    #[error("E110: Missing ')'")]
    MissingParen,

    #[error("E111: Missing ']'")]
    MissingBracket,

    #[error("E697: Missing end of List ']': {0}")]
    MissingListEnd(String),

    #[error("E723: Missing end of Dictionary '}}': {0}")]
    MissingDictEnd(String),

    #[error("E720: Missing colon in Dictionary: {0}")]
    MissingDictColon(String),

    #[error("E973: Blob literal should have an even number of hex characters")]
    OddBlobLiteral,

    // -- Types --------------------------------------------------------------
    #[error("E745: Using a List as a Number")]
    ListAsNumber,

    #[error("E728: Using a Dictionary as a Number")]
    DictAsNumber,

    #[error("E703: Using a Funcref as a Number")]
    FuncrefAsNumber,

    #[error("E974: Using a Blob as a Number")]
    BlobAsNumber,

    #[error("E805: Using a Float as a Number")]
    FloatAsNumber,

    #[error("E806: Using a Float as a String")]
    FloatAsString,

    #[error("E730: Using List as a String")]
    ListAsString,

    #[error("E731: Using a Dictionary as a String")]
    DictAsString,

    #[error("E729: Using a Funcref as a String")]
    FuncrefAsString,

    #[error("E976: Using a Blob as a String")]
    BlobAsString,

    #[error("E804: Cannot use '%' with Float")]
    FloatModulo,

    #[error("E691: Can only compare List with List")]
    CompareListWithOther,

    #[error("E692: Invalid operation for List")]
    ListOperation,

    #[error("E735: Can only compare Dictionary with Dictionary")]
    CompareDictWithOther,

    #[error("E736: Invalid operation for Dictionary")]
    DictOperation,

    #[error("E694: Invalid operation for Funcrefs")]
    FuncrefOperation,

    #[error("E978: Invalid operation for Blob")]
    BlobOperation,

    #[error("E734: Wrong variable type for {0}=")]
    WrongVariableType(&'static str),

    #[error("E714: List required")]
    ListRequired,

    #[error("E715: Dictionary required")]
    DictRequired,

    #[error("E896: Argument of {0} must be a List, Dictionary or Blob")]
    ContainerRequired(&'static str),

    #[error("E808: Number or Float required")]
    NumberOrFloatRequired,

    #[error("E701: Invalid type for len()")]
    InvalidLenType,

    // -- Indexing -----------------------------------------------------------
    #[error("E684: List index out of range: {0}")]
    ListIndexOutOfRange(i64),

    #[error("E716: Key not present in Dictionary: \"{0}\"")]
    KeyNotPresent(String),

    #[error("E689: Can only index a List, Dictionary or Blob")]
    CannotIndex,

    #[error("E979: Blob index out of range: {0}")]
    BlobIndexOutOfRange(i64),

    // -- Names --------------------------------------------------------------
    #[error("E121: Undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("E108: No such variable: \"{0}\"")]
    NoSuchVariable(String),

    #[error("E46: Cannot change read-only variable \"{0}\"")]
    ReadOnlyVariable(String),

    #[error("E117: Unknown function: {0}")]
    UnknownFunction(String),

    #[error("E700: Unknown function: {0}")]
    UnknownFuncref(String),

    #[error("E118: Too many arguments for function: {0}")]
    TooManyArguments(String),

    #[error("E119: Not enough arguments for function: {0}")]
    NotEnoughArguments(String),

    #[error("E726: Stride is zero")]
    StrideIsZero,

    #[error("E727: Start past end")]
    StartPastEnd,

    #[error("E383: Invalid search string: {0}")]
    InvalidPattern(String),

    /// An option, register, or mapping failure surfaced through the script.
    #[error(transparent)]
    Editor(#[from] EditorError),
}

impl ScriptError {
    /// The Vim error number, e.g. `"E15"`.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NotAnEditorCommand(_) => "E492",
            Self::AmbiguousCommand(_) => "E464",
            Self::TrailingCharacters(_) => "E488",
            Self::InvalidRange => "E16",
            Self::MarkNotSet => "E20",
            Self::PositiveCountRequired => "E939",
            Self::NumberExpected => "E39",
            Self::DigraphTwoChars(_) => "E1214",
            Self::InvalidArgument => "E474",
            Self::ArgumentRequired => "E471",
            Self::FunctionNameRequired => "E129",
            Self::IllegalVariableName(_) => "E461",
            Self::InvalidExpression(_) => "E15",
            Self::MissingDoubleQuote(_) => "E114",
            Self::MissingSingleQuote(_) => "E115",
            Self::MissingParen => "E110",
            Self::MissingBracket => "E111",
            Self::MissingListEnd(_) => "E697",
            Self::MissingDictEnd(_) => "E723",
            Self::MissingDictColon(_) => "E720",
            Self::OddBlobLiteral => "E973",
            Self::ListAsNumber => "E745",
            Self::DictAsNumber => "E728",
            Self::FuncrefAsNumber => "E703",
            Self::BlobAsNumber => "E974",
            Self::FloatAsNumber => "E805",
            Self::FloatAsString => "E806",
            Self::ListAsString => "E730",
            Self::DictAsString => "E731",
            Self::FuncrefAsString => "E729",
            Self::BlobAsString => "E976",
            Self::FloatModulo => "E804",
            Self::CompareListWithOther => "E691",
            Self::ListOperation => "E692",
            Self::CompareDictWithOther => "E735",
            Self::DictOperation => "E736",
            Self::FuncrefOperation => "E694",
            Self::BlobOperation => "E978",
            Self::WrongVariableType(_) => "E734",
            Self::ListRequired => "E714",
            Self::DictRequired => "E715",
            Self::ContainerRequired(_) => "E896",
            Self::NumberOrFloatRequired => "E808",
            Self::InvalidLenType => "E701",
            Self::ListIndexOutOfRange(_) => "E684",
            Self::KeyNotPresent(_) => "E716",
            Self::CannotIndex => "E689",
            Self::BlobIndexOutOfRange(_) => "E979",
            Self::UndefinedVariable(_) => "E121",
            Self::NoSuchVariable(_) => "E108",
            Self::ReadOnlyVariable(_) => "E46",
            Self::UnknownFunction(_) => "E117",
            Self::UnknownFuncref(_) => "E700",
            Self::TooManyArguments(_) => "E118",
            Self::NotEnoughArguments(_) => "E119",
            Self::StrideIsZero => "E726",
            Self::StartPastEnd => "E727",
            Self::InvalidPattern(_) => "E383",
            Self::Editor(err) => return err.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_vim_codes() {
        let err = ScriptError::NumberExpected;
        assert_eq!(err.to_string(), "E39: Number expected");
        assert_eq!(err.code(), Some("E39"));

        let err = ScriptError::InvalidExpression("1 +".into());
        assert_eq!(err.to_string(), "E15: Invalid expression: \"1 +\"");
    }

    #[test]
    fn editor_errors_pass_through() {
        let err = ScriptError::from(EditorError::UnknownOption("foo".into()));
        assert_eq!(err.to_string(), "E518: Unknown option: foo");
        assert_eq!(err.code(), Some("E518"));
    }

    #[test]
    fn dictionary_brace_is_escaped() {
        let err = ScriptError::MissingDictEnd("{'a': 1".into());
        assert_eq!(err.to_string(), "E723: Missing end of Dictionary '}': {'a': 1");
    }
}
