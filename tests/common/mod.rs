#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::NaiveDate;
use report_client::alerts::{Alert, AlertLevel};
use report_client::render::QuestionEntry;
use report_client::report::{HealthStatus, Metadata};
use report_client::{
    ClientConfig, FileSink, ReportApi, ReportError, ReportSession, ReportSnapshot, Renderer,
    Result, TableRender,
};
use serde_json::json;

/// A queued answer for `generate_report`.
pub enum Reply {
    Report(ReportSnapshot),
    Failure { status: u16, detail: Option<String> },
    Unreachable,
}

pub struct FakeApi {
    pub questions: Vec<String>,
    pub health_status: Option<&'static str>,
    pub metadata_fails: bool,
    pub replies: Mutex<VecDeque<Reply>>,
    pub generate_calls: AtomicUsize,
    pub last_request: Mutex<Vec<String>>,
    pub hang: AtomicBool,
}

impl FakeApi {
    pub fn new(questions: &[&str]) -> Self {
        Self {
            questions: questions.iter().map(|q| q.to_string()).collect(),
            health_status: Some("healthy"),
            metadata_fails: false,
            replies: Mutex::new(VecDeque::new()),
            generate_calls: AtomicUsize::new(0),
            last_request: Mutex::new(Vec::new()),
            hang: AtomicBool::new(false),
        }
    }

    pub fn queue(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

impl ReportApi for FakeApi {
    async fn health(&self) -> Result<HealthStatus> {
        match self.health_status {
            Some(status) => Ok(HealthStatus {
                status: status.to_string(),
                database: None,
                version: Some("1.0.0".to_string()),
                error: None,
            }),
            None => Err(ReportError::Transport("connection refused".to_string())),
        }
    }

    async fn metadata(&self) -> Result<Metadata> {
        if self.metadata_fails {
            return Err(ReportError::Status {
                status: 500,
                detail: None,
            });
        }
        Ok(Metadata {
            questions: self.questions.clone(),
            count: Some(self.questions.len()),
        })
    }

    async fn generate_report(&self, selected_questions: &[String]) -> Result<ReportSnapshot> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = selected_questions.to_vec();
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Report(snapshot)) => Ok(snapshot),
            Some(Reply::Failure { status, detail }) => Err(ReportError::Status { status, detail }),
            Some(Reply::Unreachable) | None => {
                Err(ReportError::Transport("connection reset".to_string()))
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub questions: Vec<QuestionEntry>,
    pub selected: usize,
    pub can_generate: bool,
    pub tables: Vec<TableRender>,
    pub loading: bool,
    pub loading_changes: usize,
    pub export_available: bool,
    pub alerts: Vec<Alert>,
}

impl RecordingRenderer {
    pub fn last_alert(&self) -> &Alert {
        self.alerts.last().expect("an alert was shown")
    }

    pub fn alerts_at(&self, level: AlertLevel) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| a.level == level).collect()
    }
}

impl Renderer for RecordingRenderer {
    fn render_questions(&mut self, questions: &[QuestionEntry]) {
        self.questions = questions.to_vec();
    }

    fn render_selection(&mut self, count: usize, can_generate: bool) {
        self.selected = count;
        self.can_generate = can_generate;
    }

    fn render_table(&mut self, table: &TableRender) {
        self.tables.push(table.clone());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_changes += 1;
    }

    fn set_export_available(&mut self, available: bool) {
        self.export_available = available;
    }

    fn show_alert(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
    pub fail: bool,
}

impl FileSink for MemorySink {
    fn write_file(&mut self, filename: &str, contents: &[u8]) -> Result<()> {
        if self.fail {
            return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into());
        }
        self.files.push((filename.to_string(), contents.to_vec()));
        Ok(())
    }
}

pub type TestSession = ReportSession<FakeApi, RecordingRenderer, MemorySink>;

pub fn fixed_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

pub fn session(api: FakeApi) -> TestSession {
    ReportSession::new(
        api,
        RecordingRenderer::default(),
        MemorySink::default(),
        ClientConfig::default(),
    )
    .unwrap()
    .with_clock(fixed_day)
}

pub fn people_report() -> ReportSnapshot {
    serde_json::from_value(json!({
        "columns": ["age", "name"],
        "column_aliases": {"age": "Age"},
        "rows": [{"age": 30, "name": "Alice"}, {"age": "", "name": "Bob"}],
        "total_rows": 2
    }))
    .unwrap()
}

pub fn numbered_report(n: usize) -> ReportSnapshot {
    let rows: Vec<serde_json::Value> = (0..n)
        .map(|i| json!({"Vendor": format!("Vendor {}", i), "EMR:": i}))
        .collect();
    serde_json::from_value(json!({
        "columns": ["Vendor", "EMR:"],
        "column_aliases": {"EMR:": "EMR"},
        "rows": rows,
        "total_rows": n
    }))
    .unwrap()
}
