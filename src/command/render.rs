//! Text rendering of execution results

use crate::command::executor::ExecutionResult;
use crate::tasks::Task;
use std::fmt;

pub const EMPTY_LIST_NOTICE: &str = "📋 Your to-do list is empty!";
const LIST_HEADER: &str = "--- 📋 Your To-Do List ---";
const LIST_FOOTER: &str = "--------------------------";

/// One list line: id, description, optional due date, priority
pub fn render_task_line(task: &Task) -> String {
    let due = task
        .due_date
        .map(|d| format!(" (Due: {})", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!(
        "  - [ID: {}] {}{} [Priority: {}]",
        task.id, task.description, due, task.priority
    )
}

/// The whole list, or the empty-list notice
pub fn render_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return EMPTY_LIST_NOTICE.to_string();
    }

    let mut lines = Vec::with_capacity(tasks.len() + 2);
    lines.push(LIST_HEADER.to_string());
    lines.extend(tasks.iter().map(render_task_line));
    lines.push(LIST_FOOTER.to_string());
    lines.join("\n")
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionResult::TaskAdded(task) => write!(
                f,
                "✅ Task added: '{}' (Priority: {})",
                task.description, task.priority
            ),
            ExecutionResult::TaskList(tasks) => f.write_str(&render_task_list(tasks)),
            ExecutionResult::Message(message) => write!(f, "🤔 {}", message),
        }
    }
}
