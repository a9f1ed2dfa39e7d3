use thiserror::Error;

use crate::types::LanguageAttempt;

/// Failure of an outbound collaborator (caption tool or translation API).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid service response: {0}")]
    InvalidResponse(String),

    #[error("no captions in language {language}")]
    NoCaptions { language: String },

    #[error("{tool} failed: {reason}")]
    Tool { tool: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum KonspektError {
    #[error(
        "No transcript available for {content_id} in [{}]",
        attempted_languages(.attempts)
    )]
    NoTranscriptAvailable {
        content_id: String,
        attempts: Vec<LanguageAttempt>,
    },

    #[error("Language detection failed: {reason}")]
    Detection { reason: String },

    #[error("Translation via {provider} failed: {source}")]
    Translation {
        provider: &'static str,
        #[source]
        source: ServiceError,
    },

    #[error("Nothing to summarize: input has no sentences")]
    EmptyInput,

    #[error("Invalid input {input:?}: {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: &'static str },
}

impl KonspektError {
    pub(crate) fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        KonspektError::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

fn attempted_languages(attempts: &[LanguageAttempt]) -> String {
    attempts
        .iter()
        .map(|a| a.language.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, KonspektError>;
