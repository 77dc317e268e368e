use thiserror::Error;

/// Failures talking to the inference service
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("No API key found (set LLM_API_KEY or OPENROUTER_API_KEY)")]
    MissingApiKey,

    #[error("Model unavailable: {0}")]
    Unavailable(String),
}

/// Failures turning user text into a command
#[derive(Error, Debug)]
pub enum InterpretationError {
    /// The model answered, but not with a well-formed command object
    #[error("Could not parse model output: {reason}")]
    Parse { reason: String, raw: String },

    /// The inference call itself failed
    #[error("Inference call failed: {0}")]
    Runtime(#[from] LlmError),
}

impl InterpretationError {
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error(transparent)]
    Interpretation(#[from] InterpretationError),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AssistantError>;
