//! Command dispatch
//!
//! Command -> CommandExecutor -> TaskStore mutation or read -> ExecutionResult -> text

pub mod executor;
pub mod render;

pub use executor::{CommandExecutor, ExecutionResult};
pub use render::{render_task_line, render_task_list};
