//! Report snapshot and the payloads exchanged with the reporting API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cell::Scalar;

/// One report record, keyed by column.
pub type Row = HashMap<String, Scalar>;

/// The full result of one report-generation call.
///
/// Created wholesale from a successful response and never mutated afterwards;
/// a later report replaces it as a whole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    columns: Vec<String>,
    #[serde(default)]
    column_aliases: HashMap<String, String>,
    rows: Vec<Row>,
    total_rows: usize,
}

impl ReportSnapshot {
    pub fn new(
        columns: Vec<String>,
        column_aliases: HashMap<String, String>,
        rows: Vec<Row>,
        total_rows: usize,
    ) -> Self {
        Self {
            columns,
            column_aliases,
            rows,
            total_rows,
        }
    }

    /// Column keys in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_aliases(&self) -> &HashMap<String, String> {
        &self.column_aliases
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Authoritative row count reported by the server.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Display label for `column`: its alias, or the raw key when it has none.
    pub fn label<'a>(&'a self, column: &'a str) -> &'a str {
        self.column_aliases
            .get(column)
            .map(String::as_str)
            .unwrap_or(column)
    }
}

/// Body of `GET /api/health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Body of `GET /api/metadata`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Body of `POST /api/generate-report`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub selected_questions: Vec<String>,
}

/// Error body returned by the API on failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
