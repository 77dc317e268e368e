//! The seam between the interpretation pipeline and whatever answers prompts
//!
//! `LlmClient` is the production implementation. `ScriptedOracle` replays
//! canned replies so sessions can be driven deterministically in tests.

use crate::core::error::LlmError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Anything that turns a system prompt plus a user message into raw text
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl<O: Oracle + ?Sized> Oracle for Box<O> {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        (**self).complete(system, user).await
    }
}

/// One canned answer
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    Failure(String),
}

/// A recorded prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
    pub system: String,
    pub user: String,
}

/// Oracle that answers from a queue, in order
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<ScriptedReply>>,
    prompts: Mutex<Vec<PromptRecord>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw text reply
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(ScriptedReply::Text(text.into()));
        self
    }

    /// Queue a transport failure
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push(ScriptedReply::Failure(reason.into()));
        self
    }

    pub fn push(&self, reply: ScriptedReply) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<PromptRecord> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(PromptRecord {
                system: system.to_string(),
                user: user.to_string(),
            });

        let next = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match next {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Failure(reason)) => Err(LlmError::Unavailable(reason)),
            None => Err(LlmError::Unavailable("no scripted reply left".into())),
        }
    }
}
