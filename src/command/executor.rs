//! Command execution - applies interpreted commands to the task store

use crate::core::error::{AssistantError, Result};
use crate::llm::schema::{AddTaskParams, Command, ErrorParams};
use crate::tasks::{Task, TaskStore};

/// Shown when an `error` command arrives without a message
pub const FALLBACK_ERROR_MESSAGE: &str = "Sorry, I did not understand that.";

/// Executes commands against a task store
pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute a command, returning what should be shown to the user
    ///
    /// A validation failure leaves the store untouched.
    pub fn execute(store: &mut TaskStore, command: Command) -> Result<ExecutionResult> {
        tracing::info!(action = command.action(), "Dispatching command");

        match command {
            Command::AddTask(params) => add_task(store, params),
            Command::ListTasks(_) => Ok(ExecutionResult::TaskList(
                store.list().into_iter().cloned().collect(),
            )),
            Command::Error(params) => Ok(ExecutionResult::Message(error_message(params))),
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// The task that was stored
    TaskAdded(Task),
    /// Snapshot of the list in display order
    TaskList(Vec<Task>),
    /// Explanation from the model for input it could not act on
    Message(String),
}

fn add_task(store: &mut TaskStore, params: AddTaskParams) -> Result<ExecutionResult> {
    let description = params
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            AssistantError::Validation(
                "A task needs a description. Try something like \"add buy milk tomorrow\"."
                    .into(),
            )
        })?;

    let task = store.add(
        description,
        params.due_date,
        params.priority.unwrap_or_default(),
    );
    Ok(ExecutionResult::TaskAdded(task.clone()))
}

fn error_message(params: ErrorParams) -> String {
    params
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}
