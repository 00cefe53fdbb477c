//! Table Projector: turns visible rows into a display grid.

use crate::cell::DisplayCell;
use crate::paginator::{PageState, PageSummary, paginate};
use crate::report::{ReportSnapshot, Row};

/// Column header: the alias shown to the user and the raw key kept as a tooltip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell {
    pub label: String,
    pub key: String,
}

/// A rendered page of the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<DisplayCell>>,
    pub summary: PageSummary,
}

/// What the table area should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableRender {
    /// No report yet, or a report without rows. Carries the pagination
    /// summary when a report is held.
    Empty(Option<PageSummary>),
    Table(TableView),
}

pub fn project_headers(snapshot: &ReportSnapshot) -> Vec<HeaderCell> {
    snapshot
        .columns()
        .iter()
        .map(|column| HeaderCell {
            label: snapshot.label(column).to_string(),
            key: column.clone(),
        })
        .collect()
}

/// Project `rows` onto `columns`; missing values become empty cells.
pub fn project_rows(rows: &[Row], columns: &[String]) -> Vec<Vec<DisplayCell>> {
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| DisplayCell::from_value(row.get(column)))
                .collect()
        })
        .collect()
}

/// Paginate and project in one step.
///
/// # Arguments
/// * `snapshot` - The held report, if any
/// * `state` - Pagination cursor, clamped in place
///
/// # Returns
/// * `TableRender::Empty` - No report, or a report without rows
/// * `TableRender::Table` - Headers, display cells and summary for the current page
pub fn render_table(snapshot: Option<&ReportSnapshot>, state: &mut PageState) -> TableRender {
    let Some(snapshot) = snapshot else {
        return TableRender::Empty(None);
    };

    let page = paginate(snapshot, state);
    if !snapshot.has_rows() {
        return TableRender::Empty(Some(page.summary));
    }

    TableRender::Table(TableView {
        headers: project_headers(snapshot),
        rows: project_rows(page.rows, snapshot.columns()),
        summary: page.summary,
    })
}
