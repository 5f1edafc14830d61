//! # n-script: Ex commands and Vimscript expressions for n-vim
//!
//! Parsing is separate from execution. This crate turns command-line text
//! into an [`ExCommand`] and expression text into an [`ast::Expr`], then
//! evaluates expressions against an [`env::Environment`]. Running the
//! commands is up to `n-engine`.
//!
//! - **[`command`]**: command table, name resolution, ranges, arguments
//! - **[`lexer`]**, **[`parser`]**, **[`ast`]**: expression syntax
//! - **[`value`]**: the value model and its coercions
//! - **[`eval`]**, **[`functions`]**: operators, `:let`, builtins
//! - **[`env`]**: variables and the bridge to editor options and registers

pub mod ast;
pub mod command;
pub mod env;
pub mod error;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod value;

pub use command::{Args, CommandId, ExCommand, parse_command};
pub use env::{EditorEnv, Environment, Variables};
pub use error::ScriptError;
pub use eval::Evaluator;
pub use functions::FunctionTable;
pub use parser::{parse_expr_list, parse_expression};
pub use value::VimValue;
