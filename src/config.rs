//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Settings for a reporting session and its HTTP client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of the reporting API, without a trailing `/api`.
    pub base_url: String,
    /// Rows per page when a session starts.
    pub page_size: usize,
    /// Page sizes a front end offers.
    pub page_size_options: Vec<usize>,
    /// Export filenames are `<prefix>_<YYYY-MM-DD>.xlsx`.
    pub export_prefix: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Display time of transient alerts, in seconds.
    pub alert_duration: u64,
    /// Question labels longer than this are truncated for display.
    pub question_label_width: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            export_prefix: "FirstVerify_Report".to_string(),
            request_timeout: 30,
            alert_duration: 5,
            question_label_width: 45,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ReportError::InvalidPageSize(0));
        }
        if self.page_size_options.contains(&0) {
            return Err(ReportError::InvalidPageSize(0));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn alert_duration(&self) -> Duration {
        Duration::from_secs(self.alert_duration)
    }
}
