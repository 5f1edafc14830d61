//! # n-engine: the n-vim editing session
//!
//! Ties the editing core (`n-editor`) and Vimscript (`n-script`) together
//! behind one object, [`Engine`]:
//!
//! - **[`engine`]**: key feed with mapping resolution, Ex line execution,
//!   the error flag and message list
//! - **[`dispatch`]**: the command id → handler table
//! - **[`handlers`]**: what each Ex command does
//! - **[`error`]**: [`ExError`], wrapping the lower crates' errors

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod handlers;

pub use engine::{Engine, KeyResult};
pub use error::ExError;
