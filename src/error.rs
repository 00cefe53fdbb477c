//! Error types for the reporting client.

use thiserror::Error;

use crate::alerts::AlertLevel;

/// Errors surfaced by report generation, pagination and export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// Generate was requested with nothing selected.
    #[error("Please select at least one question")]
    EmptySelection,

    /// Page sizes must be at least one row.
    #[error("invalid page size: {0}")]
    InvalidPageSize(usize),

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("{}", status_message(.status, .detail))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `detail` message from the response body, if any.
        detail: Option<String>,
    },

    /// The response body was not the expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Export was requested while the report has no rows.
    #[error("No data to export")]
    NothingToExport,

    /// Building the spreadsheet failed.
    #[error("{0}")]
    Export(String),

    /// Writing the exported file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("HTTP {status}"),
    }
}

impl ReportError {
    /// Alert level used when this error is shown to the user.
    #[must_use]
    pub fn level(&self) -> AlertLevel {
        match self {
            Self::EmptySelection
            | Self::InvalidPageSize(_)
            | Self::NothingToExport => AlertLevel::Warning,
            Self::Transport(_)
            | Self::Status { .. }
            | Self::Decode(_)
            | Self::Export(_)
            | Self::Io(_) => AlertLevel::Error,
        }
    }
}

#[cfg(feature = "web")]
impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;
