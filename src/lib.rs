//! Todo Assistant - Conversational To-Do List Manager

pub mod command;
pub mod core;
pub mod llm;
pub mod session;
pub mod tasks;
