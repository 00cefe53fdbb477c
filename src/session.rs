//! The reporting session: selection, report, pagination and export state, and
//! the flow between them.
//!
//! Selection changes only re-render the sidebar; `generate` fetches a new
//! snapshot and replaces the old one wholesale; page changes only re-render the
//! table; export reads the full snapshot.

use chrono::{NaiveDate, Utc};
use log::{error, info, warn};

use crate::alerts::{Alert, AlertLevel};
use crate::client::ReportApi;
use crate::config::ClientConfig;
use crate::downloader::{ExportGrid, export_filename, to_xlsx};
use crate::error::{ReportError, Result};
use crate::paginator::PageState;
use crate::render::{FileSink, QuestionEntry, Renderer, truncate_label};
use crate::report::{HealthStatus, ReportSnapshot};
use crate::selection::SelectionSet;
use crate::table::{TableRender, render_table};

/// Result of the last health check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Connectivity {
    #[default]
    Unknown,
    Healthy,
    /// The API answered, but not with "healthy".
    Degraded(HealthStatus),
    /// The API could not be reached.
    Unreachable(String),
}

impl Connectivity {
    /// Banner text for a failed check.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Self::Unknown | Self::Healthy => None,
            Self::Degraded(_) => Some("Database connection issue. Some features may not work."),
            Self::Unreachable(_) => Some("Cannot connect to API server."),
        }
    }
}

/// Loading indicator shown for as long as the guard lives. Turned off on drop,
/// which covers a request future dropped before it completes.
struct Loading<'a, R: Renderer>(&'a mut R);

impl<'a, R: Renderer> Loading<'a, R> {
    fn show(renderer: &'a mut R) -> Self {
        renderer.set_loading(true);
        Self(renderer)
    }
}

impl<R: Renderer> Drop for Loading<'_, R> {
    fn drop(&mut self) {
        self.0.set_loading(false);
    }
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Client-side reporting state with its collaborators.
pub struct ReportSession<A, R, W> {
    api: A,
    renderer: R,
    sink: W,
    config: ClientConfig,
    questions: Vec<String>,
    selection: SelectionSet,
    snapshot: Option<ReportSnapshot>,
    page: PageState,
    connectivity: Connectivity,
    today: fn() -> NaiveDate,
}

impl<A, R, W> ReportSession<A, R, W>
where
    A: ReportApi,
    R: Renderer,
    W: FileSink,
{
    pub fn new(api: A, renderer: R, sink: W, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let page = PageState::new(config.page_size)?;

        Ok(Self {
            api,
            renderer,
            sink,
            config,
            questions: Vec::new(),
            selection: SelectionSet::new(),
            snapshot: None,
            page,
            connectivity: Connectivity::Unknown,
            today: utc_today,
        })
    }

    /// Replace the clock used for export filenames.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Health check, question load, then the initial render.
    pub async fn start(&mut self) {
        self.check_health().await;
        if let Err(err) = self.load_metadata().await {
            warn!("starting without questions: {}", err);
        }
        self.render_questions();
        self.render();
    }

    pub async fn check_health(&mut self) -> Connectivity {
        let connectivity = match self.api.health().await {
            Ok(health) if health.is_healthy() => Connectivity::Healthy,
            Ok(health) => {
                warn!("API reports status {:?}", health.status);
                Connectivity::Degraded(health)
            }
            Err(err) => {
                warn!("health check failed: {}", err);
                Connectivity::Unreachable(err.to_string())
            }
        };

        if let Some(message) = connectivity.warning() {
            self.renderer
                .show_alert(Alert::persistent(AlertLevel::Warning, message));
        }
        self.connectivity = connectivity.clone();
        connectivity
    }

    /// Fetch the selectable questions. On failure the current list is kept.
    pub async fn load_metadata(&mut self) -> Result<usize> {
        let outcome = {
            let _loading = Loading::show(&mut self.renderer);
            self.api.metadata().await
        };

        match outcome {
            Ok(metadata) => {
                self.questions = metadata.questions;
                info!("Loaded {} questions", self.questions.len());
                Ok(self.questions.len())
            }
            Err(err) => {
                error!("Error loading metadata: {}", err);
                self.notify_error(Some("Error loading questions"), &err);
                Err(err)
            }
        }
    }

    pub fn render_questions(&mut self) {
        let width = self.config.question_label_width;
        let entries: Vec<QuestionEntry> = self
            .questions
            .iter()
            .map(|question| QuestionEntry {
                question: question.clone(),
                label: truncate_label(question, width),
                checked: self.selection.contains(question),
            })
            .collect();
        self.renderer.render_questions(&entries);
        self.render_selection();
    }

    fn render_selection(&mut self) {
        let count = self.selection.count();
        self.renderer.render_selection(count, count > 0);
    }

    /// Flip one question. Returns whether it is now selected.
    pub fn toggle(&mut self, question: &str) -> bool {
        let selected = self.selection.toggle(question);
        self.render_selection();
        selected
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.questions);
        self.render_questions();
    }

    pub fn clear_all(&mut self) {
        self.selection.clear_all();
        self.render_questions();
    }

    /// Request a report for the current selection.
    ///
    /// On success the snapshot is replaced, the page returns to 1 and the table
    /// re-renders. On failure nothing but the alert changes. The request holds
    /// `&mut self`, so a second request cannot start while one is pending.
    ///
    /// # Returns
    /// * `Ok(total_rows)` - Row count of the new report
    /// * `Err(ReportError::EmptySelection)` - Nothing selected; no request is made
    /// * `Err(_)` - The request failed; the previous report is kept
    pub async fn generate(&mut self) -> Result<usize> {
        if self.selection.is_empty() {
            let err = ReportError::EmptySelection;
            self.notify_error(None, &err);
            return Err(err);
        }

        let outcome = {
            let _loading = Loading::show(&mut self.renderer);
            self.api.generate_report(self.selection.as_slice()).await
        };

        match outcome {
            Ok(snapshot) => {
                let total_rows = snapshot.total_rows();
                info!("Report generated: {} rows", total_rows);
                if total_rows != snapshot.rows().len() {
                    warn!(
                        "report claims {} rows but carries {}",
                        total_rows,
                        snapshot.rows().len()
                    );
                }
                self.snapshot = Some(snapshot);
                self.page.reset();
                self.render();
                self.renderer.set_export_available(true);
                self.notify(
                    AlertLevel::Success,
                    format!("Report generated successfully with {} rows", total_rows),
                );
                Ok(total_rows)
            }
            Err(err) => {
                error!("Error generating report: {}", err);
                self.notify_error(Some("Error generating report"), &err);
                Err(err)
            }
        }
    }

    /// Draw the current page. The page number is clamped first.
    pub fn render(&mut self) -> TableRender {
        let table = render_table(self.snapshot.as_ref(), &mut self.page);
        self.renderer.render_table(&table);
        table
    }

    pub fn previous_page(&mut self) -> bool {
        let moved = self.page.previous_page();
        if moved {
            self.render();
        }
        moved
    }

    pub fn next_page(&mut self) -> bool {
        let Some(total_rows) = self.snapshot.as_ref().map(ReportSnapshot::total_rows) else {
            return false;
        };
        let moved = self.page.next_page(total_rows);
        if moved {
            self.render();
        }
        moved
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if let Err(err) = self.page.set_page_size(page_size) {
            self.notify_error(None, &err);
            return Err(err);
        }
        self.render();
        Ok(())
    }

    /// Export the whole report, not just the visible page.
    ///
    /// The file is named from the configured prefix and today's date, so a
    /// second export on the same day replaces the first.
    ///
    /// # Returns
    /// * `Ok(filename)` - Name the export was written under
    /// * `Err(ReportError::NothingToExport)` - No report, or a report without rows
    /// * `Err(_)` - Building or writing the spreadsheet failed
    pub fn export(&mut self) -> Result<String> {
        match self.write_export() {
            Ok(filename) => {
                self.notify(
                    AlertLevel::Success,
                    format!("Report exported as {}", filename),
                );
                Ok(filename)
            }
            Err(ReportError::NothingToExport) => {
                let err = ReportError::NothingToExport;
                self.notify_error(None, &err);
                Err(err)
            }
            Err(err) => {
                error!("Error exporting to Excel: {}", err);
                self.notify_error(Some("Error exporting"), &err);
                Err(err)
            }
        }
    }

    fn write_export(&mut self) -> Result<String> {
        let snapshot = self.snapshot.as_ref().ok_or(ReportError::NothingToExport)?;
        let grid = ExportGrid::from_snapshot(snapshot)?;
        let bytes = to_xlsx(&grid)?;
        let filename = export_filename(&self.config.export_prefix, (self.today)());
        self.sink.write_file(&filename, &bytes)?;
        info!("exported {} rows to {}", grid.rows.len(), filename);
        Ok(filename)
    }

    fn notify(&mut self, level: AlertLevel, message: impl Into<String>) {
        let duration = self.config.alert_duration();
        self.renderer
            .show_alert(Alert::transient(level, message, duration));
    }

    fn notify_error(&mut self, context: Option<&str>, err: &ReportError) {
        let message = match context {
            Some(context) => format!("{}: {}", context, err),
            None => err.to_string(),
        };
        self.notify(err.level(), message);
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn snapshot(&self) -> Option<&ReportSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }
}
