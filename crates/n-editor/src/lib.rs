//! # n-editor: modal editing core for n-vim
//!
//! Vim-compatible modal editing, independent of any UI. The engine edits a
//! document it does not own through the [`host::Host`] trait; everything
//! else lives here:
//!
//! - **[`key`]**: keystrokes and `<C-x>` notation
//! - **[`mode`]**: the mode set and where transient modes return to
//! - **[`state`]**: the state machine that turns keys into edits
//! - **[`motion`]**, **[`word`]**, **[`scroll`]**: caret and viewport movement
//! - **[`edit`]**: operators, put, join, and the undo-aware edit context
//! - **[`options`]**, **[`guicursor`]**: the option store and cursor shapes
//! - **[`mapping`]**, **[`digraph`]**, **[`register`]**, **[`history`]**
//!
//! Ex commands and expressions are parsed in `n-script`; `n-engine` ties
//! the two together behind one `feed` entry point.

pub mod buffer;
pub mod caret;
pub mod command;
pub mod digraph;
mod digraph_table;
pub mod edit;
pub mod error;
pub mod guicursor;
pub mod history;
pub mod host;
pub mod key;
pub mod mapping;
pub mod mode;
pub mod motion;
pub mod options;
pub mod position;
pub mod register;
pub mod scroll;
pub mod state;
pub mod word;

pub use error::EditorError;
