pub mod config;
pub mod error;
pub mod types;

pub use config::{AssistantConfig, LlmConfig};
pub use error::{AssistantError, InterpretationError, LlmError, Result};
pub use types::{Priority, TaskId, TaskStatus};
