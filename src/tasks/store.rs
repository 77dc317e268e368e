//! In-memory task list

use crate::core::types::{Priority, TaskId, TaskStatus};
use chrono::NaiveDate;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(id: TaskId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            due_date: None,
            priority: Priority::default(),
            status: TaskStatus::Pending,
        }
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sort key for listing: dated tasks first by date, then by id
    fn list_key(&self) -> (bool, Option<NaiveDate>, TaskId) {
        (self.due_date.is_none(), self.due_date, self.id)
    }
}

/// Append-only task collection owned by a session
///
/// Ids are `len + 1` at insertion. With no removal this keeps them strictly
/// increasing; removal would need a separate counter.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and return it
    ///
    /// Callers must reject blank descriptions first.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        due_date: Option<NaiveDate>,
        priority: Priority,
    ) -> &Task {
        let description = description.into();
        debug_assert!(
            !description.trim().is_empty(),
            "task description must not be blank"
        );

        let index = self.tasks.len();
        let id = TaskId(index + 1);
        let task = Task::new(id, description)
            .with_due_date(due_date)
            .with_priority(priority);

        tracing::info!(id = %task.id, description = %task.description, "Task added");
        self.tasks.push(task);
        &self.tasks[index]
    }

    /// All tasks by due date (undated last), ties broken by id
    pub fn list(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().collect();
        tasks.sort_by_key(|t| t.list_key());
        tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut store = TaskStore::new();
        assert!(store.is_empty());

        let first = store.add("Buy milk", None, Priority::Medium).id;
        let second = store.add("Walk dog", Some(date(2025, 8, 18)), Priority::Low).id;

        assert_eq!(first, TaskId(1));
        assert_eq!(second, TaskId(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_returns_the_new_task_and_id_tracks_len() {
        let mut store = TaskStore::new();
        for n in 1..=5 {
            let id = store.add(format!("task {}", n), None, Priority::Low).id;
            assert_eq!(id, TaskId(store.len()));
            assert_eq!(store.get(id).map(|t| t.description.as_str()), Some(format!("task {}", n).as_str()));
        }
    }

    #[test]
    fn test_added_task_fields() {
        let mut store = TaskStore::new();
        let task = store
            .add("Pay electricity bill", Some(date(2025, 8, 18)), Priority::High)
            .clone();

        assert_eq!(task.description, "Pay electricity bill");
        assert_eq!(task.due_date, Some(date(2025, 8, 18)));
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(store.get(task.id), Some(&task));
        assert!(store.get(TaskId(99)).is_none());
    }

    #[test]
    fn test_list_orders_by_due_date_then_id() {
        let mut store = TaskStore::new();
        store.add("undated A", None, Priority::Medium);
        store.add("late", Some(date(2025, 9, 1)), Priority::Medium);
        store.add("early", Some(date(2025, 8, 18)), Priority::Low);
        store.add("undated B", None, Priority::High);
        store.add("early too", Some(date(2025, 8, 18)), Priority::High);

        let order: Vec<usize> = store.list().iter().map(|t| t.id.0).collect();
        assert_eq!(order, vec![3, 5, 2, 1, 4]);
    }

    #[test]
    fn test_list_is_idempotent() {
        let mut store = TaskStore::new();
        store.add("a", Some(date(2025, 8, 20)), Priority::Medium);
        store.add("b", None, Priority::Medium);

        let first: Vec<Task> = store.list().into_iter().cloned().collect();
        let second: Vec<Task> = store.list().into_iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_list_empty_store() {
        assert!(TaskStore::new().list().is_empty());
    }
}
