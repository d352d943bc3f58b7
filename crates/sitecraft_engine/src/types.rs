use std::fmt;

use serde::{Deserialize, Serialize};
use sitecraft_core::Task;

/// A document plus the change the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementRequest {
    pub html_content: String,
    pub request: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementResult {
    pub refined_html_content: String,
}

/// Outstanding improvement tasks for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ModelError {
    pub kind: FailureKind,
    pub message: String,
}

impl ModelError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidConfig,
    HttpStatus(u16),
    Timeout,
    Network,
    /// The model answered but produced no text or image.
    EmptyResponse,
    /// The model answered with something that does not fit the schema.
    MalformedOutput,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidConfig => write!(f, "invalid model configuration"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::EmptyResponse => write!(f, "empty model response"),
            FailureKind::MalformedOutput => write!(f, "malformed model output"),
        }
    }
}

/// Failure of a whole flow. Per-image problems never end up here; they are
/// absorbed with the fallback image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("generation failed: {0}")]
    Generation(#[from] ModelError),
}

impl FlowError {
    pub fn kind(&self) -> &FailureKind {
        match self {
            FlowError::Generation(err) => &err.kind,
        }
    }
}
