pub mod store;

pub use store::{Task, TaskStore};
