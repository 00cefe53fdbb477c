//! HTML rendering of the session, for hosting in a browser page.
//!
//! Every piece of report or question text goes through [`escape_html`] before it
//! lands in markup.

use std::time::Instant;

use crate::alerts::{Alert, AlertBoard};
use crate::render::{QuestionEntry, Renderer};
use crate::table::TableRender;

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const EMPTY_STATE_HTML: &str = concat!(
    r#"<div class="empty-state"><div class="empty-state-icon">📊</div>"#,
    "<h3>No Data</h3><p>Generate a report to view results</p></div>"
);

/// Markup for the table area.
pub fn table_html(table: &TableRender) -> String {
    let view = match table {
        TableRender::Empty(_) => return EMPTY_STATE_HTML.to_string(),
        TableRender::Table(view) => view,
    };

    let mut html = String::from(
        r#"<div class="table-container"><div class="table-wrapper"><table class="report-table"><thead><tr>"#,
    );
    for header in &view.headers {
        html.push_str(&format!(
            r#"<th title="{}">{}</th>"#,
            escape_html(&header.key),
            escape_html(&header.label)
        ));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &view.rows {
        html.push_str("<tr>");
        for cell in row {
            let class = if cell.numeric { "numeric" } else { "" };
            html.push_str(&format!(
                r#"<td class="{}">{}</td>"#,
                class,
                escape_html(&cell.text)
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div></div>");
    html
}

/// Markup for the question checkboxes.
pub fn questions_html(questions: &[QuestionEntry]) -> String {
    if questions.is_empty() {
        return r#"<p class="text-muted">No questions available</p>"#.to_string();
    }

    questions
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let question = escape_html(&entry.question);
            format!(
                concat!(
                    r#"<div class="form-check"><input type="checkbox" class="question-checkbox" "#,
                    r#"id="question-{index}" data-question="{question}"{checked}>"#,
                    r#"<label for="question-{index}" title="{question}">{label}</label></div>"#
                ),
                index = index,
                question = question,
                checked = if entry.checked { " checked" } else { "" },
                label = escape_html(&entry.label),
            )
        })
        .collect()
}

/// Page fragments kept up to date by a session.
#[derive(Debug)]
pub struct HtmlRenderer {
    pub questions: String,
    pub selected_count: String,
    pub generate_enabled: bool,
    pub table: String,
    pub pagination_info: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub loading: bool,
    pub export_visible: bool,
    alerts: AlertBoard,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            questions: String::new(),
            selected_count: "0".to_string(),
            generate_enabled: false,
            table: EMPTY_STATE_HTML.to_string(),
            pagination_info: String::new(),
            previous_enabled: false,
            next_enabled: false,
            loading: false,
            export_visible: false,
            alerts: AlertBoard::new(),
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the alerts still on screen at `now`.
    pub fn alerts_html(&mut self, now: Instant) -> String {
        self.alerts
            .active(now)
            .into_iter()
            .map(|alert| {
                format!(
                    r#"<div class="alert alert-{}"><span>{}</span></div>"#,
                    alert.level,
                    escape_html(&alert.message)
                )
            })
            .collect()
    }
}

impl Renderer for HtmlRenderer {
    fn render_questions(&mut self, questions: &[QuestionEntry]) {
        self.questions = questions_html(questions);
    }

    fn render_selection(&mut self, count: usize, can_generate: bool) {
        self.selected_count = count.to_string();
        self.generate_enabled = can_generate;
    }

    fn render_table(&mut self, table: &TableRender) {
        self.table = table_html(table);
        let summary = match table {
            TableRender::Table(view) => Some(view.summary),
            TableRender::Empty(summary) => *summary,
        };
        match summary {
            Some(summary) => {
                self.pagination_info = summary.to_string();
                self.previous_enabled = summary.has_previous();
                self.next_enabled = summary.has_next();
            }
            None => {
                self.pagination_info.clear();
                self.previous_enabled = false;
                self.next_enabled = false;
            }
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_export_available(&mut self, available: bool) {
        self.export_visible = available;
    }

    fn show_alert(&mut self, alert: Alert) {
        self.alerts.post(alert, Instant::now());
    }
}
