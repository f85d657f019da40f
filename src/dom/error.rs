//! Document error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Element not found: #{0}")]
    MissingElement(String),
    #[error("No element matches `{0}`")]
    NoMatch(String),
    #[error("Node is not an element")]
    NotAnElement,
    #[error("Node does not belong to this document")]
    UnknownNode,
    #[error("Invalid query `{query}`: {reason}")]
    InvalidQuery { query: String, reason: String },
    #[error("Template render failed: {0}")]
    Render(String),
}

impl From<askama::Error> for DomError {
    fn from(err: askama::Error) -> Self {
        DomError::Render(err.to_string())
    }
}
