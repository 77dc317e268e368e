//! Structured commands produced by interpretation
//!
//! Wire shape is always `{"action": ..., "parameters": {...}}` with exactly
//! those two keys. Parameter contents are only checked structurally here;
//! whether a command is actionable is decided at dispatch.

use crate::core::types::Priority;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An interpreted instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "action",
    content = "parameters",
    rename_all = "snake_case",
    deny_unknown_fields
)]
pub enum Command {
    /// Add a new task
    AddTask(AddTaskParams),
    /// Show the current tasks
    ListTasks(ListTasksParams),
    /// The utterance was not a usable command
    Error(ErrorParams),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTaskParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Already normalized to YYYY-MM-DD by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// `list_tasks` takes no parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTasksParams {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Command {
    pub fn add_task(
        description: impl Into<String>,
        due_date: Option<NaiveDate>,
        priority: Option<Priority>,
    ) -> Self {
        Command::AddTask(AddTaskParams {
            description: Some(description.into()),
            due_date,
            priority,
        })
    }

    pub fn list_tasks() -> Self {
        Command::ListTasks(ListTasksParams::default())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Command::Error(ErrorParams {
            message: Some(message.into()),
        })
    }

    /// The wire name of this command's action
    pub fn action(&self) -> &'static str {
        match self {
            Command::AddTask(_) => "add_task",
            Command::ListTasks(_) => "list_tasks",
            Command::Error(_) => "error",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_task_deserialization() {
        let json = r#"{
            "action": "add_task",
            "parameters": {
                "description": "Pay electricity bill",
                "due_date": "2025-08-18",
                "priority": "medium"
            }
        }"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            Command::add_task(
                "Pay electricity bill",
                Some(date(2025, 8, 18)),
                Some(Priority::Medium)
            )
        );
        assert_eq!(command.action(), "add_task");
    }

    #[test]
    fn test_null_optionals_are_absent() {
        let json = r#"{"action": "add_task", "parameters": {"description": "Call mom", "due_date": null, "priority": null}}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command, Command::add_task("Call mom", None, None));
    }

    #[test]
    fn test_missing_description_still_parses() {
        // Actionability is checked at dispatch, not here
        let json = r#"{"action": "add_task", "parameters": {}}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command, Command::AddTask(AddTaskParams::default()));
    }

    #[test]
    fn test_list_and_error_deserialization() {
        let list: Command =
            serde_json::from_str(r#"{"action": "list_tasks", "parameters": {}}"#).unwrap();
        assert_eq!(list, Command::list_tasks());

        let error: Command = serde_json::from_str(
            r#"{"action": "error", "parameters": {"message": "Not a to-do command"}}"#,
        )
        .unwrap();
        assert_eq!(error, Command::error("Not a to-do command"));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let json = r#"{"action": "delete_task", "parameters": {}}"#;
        assert!(serde_json::from_str::<Command>(json).is_err());
    }

    #[test]
    fn test_missing_action_rejected() {
        let json = r#"{"parameters": {"description": "x"}}"#;
        assert!(serde_json::from_str::<Command>(json).is_err());
    }

    #[test]
    fn test_extra_top_level_key_rejected() {
        let json = r#"{"action": "list_tasks", "parameters": {}, "confidence": 0.9}"#;
        assert!(serde_json::from_str::<Command>(json).is_err());
    }

    #[test]
    fn test_malformed_date_rejected() {
        let json = r#"{"action": "add_task", "parameters": {"description": "x", "due_date": "next Friday"}}"#;
        assert!(serde_json::from_str::<Command>(json).is_err());
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let json = r#"{"action": "add_task", "parameters": {"description": "x", "priority": "urgent"}}"#;
        assert!(serde_json::from_str::<Command>(json).is_err());
    }

    #[test]
    fn test_round_trip_all_actions() {
        let commands = [
            Command::add_task("Project submission", Some(date(2025, 8, 22)), Some(Priority::High)),
            Command::add_task("Water plants", None, None),
            Command::list_tasks(),
            Command::error("I couldn't understand that."),
            Command::Error(ErrorParams::default()),
        ];

        for command in commands {
            let json = command.to_json().unwrap();
            let parsed: Command = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, command, "round trip failed for {}", json);
        }
    }

    #[test]
    fn test_list_tasks_serializes_empty_parameters() {
        assert_eq!(
            Command::list_tasks().to_json().unwrap(),
            r#"{"action":"list_tasks","parameters":{}}"#
        );
    }
}
