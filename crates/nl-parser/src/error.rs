//! Error types for DSL acquisition

use ui_codegen::DslViolation;

/// Classification of a failed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The endpoint answered with a non-success status
    Http { status: u16 },
    /// The request never produced a response
    Transport,
    /// The response body did not have the expected completion shape
    UnexpectedResponse,
    /// The model output was not valid JSON after sanitization
    MalformedResponse,
    /// The JSON does not describe a usable DSL
    SchemaViolation,
}

/// Errors raised while obtaining a DSL from the model
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("API Error: {0}")]
    Http(u16),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected completion response: {0}")]
    UnexpectedResponse(String),

    #[error("Model output is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("生成的 DSL 格式不合法: {0}")]
    InvalidShape(String),

    #[error("生成的 DSL 未通过校验: {summary}")]
    Validation {
        violations: Vec<DslViolation>,
        summary: String,
    },
}

impl ParseError {
    /// Build a validation error from a non-empty violation list
    pub fn validation(violations: Vec<DslViolation>) -> Self {
        let summary = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation {
            violations,
            summary,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(status) => ErrorKind::Http { status: *status },
            Self::Transport(_) => ErrorKind::Transport,
            Self::UnexpectedResponse(_) => ErrorKind::UnexpectedResponse,
            Self::MalformedJson(_) => ErrorKind::MalformedResponse,
            Self::InvalidShape(_) | Self::Validation { .. } => ErrorKind::SchemaViolation,
        }
    }
}
