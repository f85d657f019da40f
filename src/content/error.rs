//! Content loading errors.

use thiserror::Error;

use super::validate::ValidationReport;

/// Any failure to obtain usable content for a page.
///
/// Every variant means the same thing to a page: nothing gets populated.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP error! status: {status} ({location})")]
    Status { status: u16, location: String },
    #[error("Request to {location} failed: {source}")]
    Network {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Could not read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed content in {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid content in {location}:\n{report}")]
    Invalid {
        location: String,
        report: ValidationReport,
    },
    #[error("Cannot resolve content location {0:?}")]
    Location(String),
}

impl LoadError {
    /// The validation report, if the content parsed but failed its checks.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            LoadError::Invalid { report, .. } => Some(report),
            _ => None,
        }
    }
}
