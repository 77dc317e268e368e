//! One conversation with the assistant
//!
//! A `Session` owns the oracle and the task list for its whole lifetime.
//! Each input line is one turn: exit check, interpretation, dispatch, and
//! a reply. Every failure is reported as a reply; only an exit word ends it.

use crate::command::{CommandExecutor, ExecutionResult};
use crate::core::error::{AssistantError, InterpretationError, Result};
use crate::llm::oracle::Oracle;
use crate::llm::parser::interpret;
use crate::tasks::TaskStore;
use chrono::NaiveDate;
use std::io::{self, BufRead};

pub const GREETING: &str =
    "🤖 AI To-Do List Assistant is ready! Type 'quit' to exit.";
pub const FAREWELL: &str = "👋 Goodbye!";
pub const REPHRASE_MESSAGE: &str =
    "🧠 I had a little trouble understanding that. Could you please rephrase?";

/// What the read loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Print this and wait for the next line
    Reply(String),
    /// Blank input, nothing to do
    Idle,
    /// The user asked to leave
    Quit,
}

pub struct Session<O> {
    oracle: O,
    store: TaskStore,
}

impl<O: Oracle> Session<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            store: TaskStore::new(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Handle one line of input
    ///
    /// # Arguments
    /// * `line` - Raw console input
    /// * `today` - Date used to resolve relative dates in this turn
    pub async fn handle_line(&mut self, line: &str, today: NaiveDate) -> Turn {
        let input = line.trim();

        if input.is_empty() {
            return Turn::Idle;
        }

        if is_exit_signal(input) {
            return Turn::Quit;
        }

        match self.process(input, today).await {
            Ok(result) => Turn::Reply(result.to_string()),
            Err(e) => Turn::Reply(describe_error(&e)),
        }
    }

    async fn process(&mut self, input: &str, today: NaiveDate) -> Result<ExecutionResult> {
        let command = interpret(&self.oracle, input, today).await?;
        CommandExecutor::execute(&mut self.store, command)
    }
}

/// Read one line of console input
///
/// Bytes that are not valid UTF-8 become U+FFFD rather than failing the
/// read. Returns `None` at end of input.
pub fn read_input_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// `quit` or `exit`, any case
pub fn is_exit_signal(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit")
}

/// User-facing text for a failed turn
pub fn describe_error(error: &AssistantError) -> String {
    match error {
        AssistantError::Interpretation(InterpretationError::Parse { reason, raw }) => {
            tracing::warn!(%reason, %raw, "Model output did not parse as a command");
            REPHRASE_MESSAGE.to_string()
        }
        AssistantError::Validation(message) => {
            tracing::warn!(%message, "Command rejected");
            format!("⚠️ {}", message)
        }
        other => {
            tracing::warn!(error = %other, "Turn failed");
            format!("An unexpected error occurred: {}", other)
        }
    }
}
