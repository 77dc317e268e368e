//! Interpret natural language utterances into structured commands
//!
//! The model does all the language understanding: dates, urgency, intent.
//! This module builds the prompt, makes exactly one call, and checks that
//! the answer is a well-formed command. It never repairs or guesses.

use crate::core::error::InterpretationError;
use crate::llm::context::PromptContext;
use crate::llm::oracle::Oracle;
use crate::llm::schema::Command;
use chrono::{NaiveDate, Weekday};

/// Interpret one utterance against the given date
///
/// # Arguments
/// * `oracle` - The model to ask
/// * `user_text` - The raw utterance, sent verbatim as the user message
/// * `current_date` - The single source of "now" for relative dates
///
/// # Returns
/// The parsed command, or a parse/runtime interpretation error
pub async fn interpret<O: Oracle + ?Sized>(
    oracle: &O,
    user_text: &str,
    current_date: NaiveDate,
) -> Result<Command, InterpretationError> {
    let context = PromptContext::new(current_date);
    let system_prompt = build_system_prompt(&context);

    let response = oracle.complete(&system_prompt, user_text).await?;
    tracing::debug!(raw = %response, "Model response");

    parse_command_output(&response)
}

/// Parse raw model output into a command
///
/// Surrounding whitespace and a single enclosing Markdown code fence are
/// tolerated. Anything else that is not exactly a command object fails.
pub fn parse_command_output(raw: &str) -> Result<Command, InterpretationError> {
    let body = strip_code_fence(raw.trim());

    if body.is_empty() {
        return Err(InterpretationError::Parse {
            reason: "empty response".into(),
            raw: raw.to_string(),
        });
    }

    let parse_error = |reason: String| InterpretationError::Parse {
        reason,
        raw: raw.to_string(),
    };

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| parse_error(e.to_string()))?;

    // serde would also accept the [action, parameters] array form
    if !value.is_object() {
        return Err(parse_error("expected a JSON object".into()));
    }

    serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line
    match inner.split_once('\n') {
        Some((_info, body)) => body.trim(),
        None => inner.trim(),
    }
}

/// Build the system prompt for a request
pub fn build_system_prompt(context: &PromptContext) -> String {
    let examples = build_examples(context);
    format!(
        "{}\n{}\n\n{}\n\nExamples:\n{}",
        INSTRUCTIONS_PREAMBLE,
        context.summary(),
        INSTRUCTIONS_ACTIONS,
        examples
    )
}

/// Worked examples, with due dates computed from the request date
fn build_examples(context: &PromptContext) -> String {
    let tomorrow = context.tomorrow().format("%Y-%m-%d");
    let friday = context.next_weekday(Weekday::Fri).format("%Y-%m-%d");

    let examples = [
        (
            "Remind me to pay electricity bill tomorrow".to_string(),
            format!(
                r#"{{"action": "add_task", "parameters": {{"description": "Pay electricity bill", "due_date": "{}", "priority": "medium"}}}}"#,
                tomorrow
            ),
        ),
        (
            "what's on my schedule this weekend?".to_string(),
            r#"{"action": "list_tasks", "parameters": {}}"#.to_string(),
        ),
        (
            "please add the project submission on Friday, it's very important".to_string(),
            format!(
                r#"{{"action": "add_task", "parameters": {{"description": "Project submission", "due_date": "{}", "priority": "high"}}}}"#,
                friday
            ),
        ),
        (
            "hello there".to_string(),
            r#"{"action": "error", "parameters": {"message": "I couldn't understand that as a to-do list command. Please try adding or listing tasks."}}"#.to_string(),
        ),
    ];

    examples
        .iter()
        .map(|(user, output)| format!("User: {}\nOutput: {}", user, output))
        .collect::<Vec<_>>()
        .join("\n\n")
}

const INSTRUCTIONS_PREAMBLE: &str = "You are an intelligent to-do list assistant. Your job is to analyze the user's request
and convert it into a structured JSON command.";

const INSTRUCTIONS_ACTIONS: &str = r#"Respond with ONLY a JSON object with exactly two keys: "action" and "parameters". No explanation, no surrounding text.

The possible "action" values are:
1. "add_task": the user wants to add a new task.
   - "parameters" is an object with "description", "due_date" (YYYY-MM-DD, only if a date is mentioned) and "priority" ("high", "medium" or "low").
   - Resolve relative dates like "tomorrow" or "next Friday" against today's date above.
   - Infer priority from words like "urgent", "ASAP", "important". Default to "medium".

2. "list_tasks": the user wants to see their current tasks.
   - "parameters" is an empty object.

3. "error": the input is ambiguous, unclear, or not a to-do command.
   - "parameters" contains a "message" explaining why it could not be processed."#;
