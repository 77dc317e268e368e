//! Natural language interpretation
//!
//! user text + date -> prompt -> Oracle -> raw text -> Command

pub mod client;
pub mod context;
pub mod oracle;
pub mod parser;
pub mod schema;

pub use client::LlmClient;
pub use oracle::{Oracle, ScriptedOracle};
pub use parser::{interpret, parse_command_output};
pub use schema::{AddTaskParams, Command, ErrorParams, ListTasksParams};
