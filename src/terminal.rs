//! Plain-text rendering for the terminal front end.

use std::io::Write;

use log::debug;

use crate::alerts::Alert;
use crate::render::{QuestionEntry, Renderer};
use crate::table::TableRender;

/// Widest column printed, in characters.
const MAX_CELL_WIDTH: usize = 24;

/// Writes session output as text. Questions are numbered from 1 so the
/// command loop can refer to them.
pub struct TerminalRenderer<O: Write> {
    out: O,
    /// When false, tables are not printed (alerts still are).
    pub show_tables: bool,
}

impl<O: Write> TerminalRenderer<O> {
    pub fn new(out: O) -> Self {
        Self {
            out,
            show_tables: true,
        }
    }

    pub fn into_inner(self) -> O {
        self.out
    }

    fn emit(&mut self, text: &str) {
        // A closed stdout has nowhere to report to
        if let Err(err) = self.out.write_all(text.as_bytes()) {
            debug!("terminal write failed: {}", err);
        }
    }
}

fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

fn fit_right(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        fit(text, width)
    } else {
        format!("{}{}", " ".repeat(width - count), text)
    }
}

pub fn table_text(table: &TableRender) -> String {
    let view = match table {
        TableRender::Empty(Some(summary)) => return format!("No Data\n{}\n", summary),
        TableRender::Empty(None) => return "No Data - generate a report to view results\n".to_string(),
        TableRender::Table(view) => view,
    };

    let widths: Vec<usize> = view
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            view.rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.text.chars().count())
                .fold(header.label.chars().count(), usize::max)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let mut text = String::new();
    let header_line: Vec<String> = view
        .headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| fit(&header.label, *width))
        .collect();
    text.push_str(header_line.join("  ").trim_end());
    text.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    text.push_str(&rule.join("  "));
    text.push('\n');

    for row in &view.rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                if cell.numeric {
                    fit_right(&cell.text, *width)
                } else {
                    fit(&cell.text, *width)
                }
            })
            .collect();
        text.push_str(line.join("  ").trim_end());
        text.push('\n');
    }

    text.push_str(&view.summary.to_string());
    text.push('\n');
    text
}

impl<O: Write> Renderer for TerminalRenderer<O> {
    fn render_questions(&mut self, questions: &[QuestionEntry]) {
        if questions.is_empty() {
            self.emit("No questions available\n");
            return;
        }
        let mut text = String::new();
        for (i, entry) in questions.iter().enumerate() {
            let mark = if entry.checked { 'x' } else { ' ' };
            text.push_str(&format!("{:>4} [{}] {}\n", i + 1, mark, entry.label));
        }
        self.emit(&text);
    }

    fn render_selection(&mut self, count: usize, can_generate: bool) {
        let hint = if can_generate { "" } else { " (select questions to generate)" };
        self.emit(&format!("{} selected{}\n", count, hint));
    }

    fn render_table(&mut self, table: &TableRender) {
        if self.show_tables {
            self.emit(&table_text(table));
        }
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            self.emit("Loading...\n");
        }
    }

    fn set_export_available(&mut self, _available: bool) {}

    fn show_alert(&mut self, alert: Alert) {
        self.emit(&format!("[{}] {}\n", alert.level, alert.message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertLevel;
    use crate::cell::DisplayCell;
    use crate::paginator::PageSummary;
    use crate::table::{HeaderCell, TableView};

    #[test]
    fn numeric_cells_align_right() {
        let table = TableRender::Table(TableView {
            headers: vec![
                HeaderCell {
                    label: "Vendor".to_string(),
                    key: "Vendor".to_string(),
                },
                HeaderCell {
                    label: "EMR".to_string(),
                    key: "EMR:".to_string(),
                },
            ],
            rows: vec![vec![
                DisplayCell {
                    text: "Acme".to_string(),
                    numeric: false,
                },
                DisplayCell {
                    text: "0.8".to_string(),
                    numeric: true,
                },
            ]],
            summary: PageSummary {
                current_page: 1,
                total_pages: 1,
                total_rows: 1,
            },
        });
        let text = table_text(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Vendor  EMR");
        assert_eq!(lines[2], "Acme    0.8");
        assert_eq!(lines[3], "Page 1 of 1 (1 total rows)");
    }

    #[test]
    fn long_cells_are_cut() {
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("ab", 4), "ab  ");
    }

    #[test]
    fn alerts_and_questions_are_written() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render_questions(&[QuestionEntry {
            question: "EMR:".to_string(),
            label: "EMR:".to_string(),
            checked: true,
        }]);
        renderer.show_alert(Alert::persistent(AlertLevel::Warning, "Cannot connect to API server."));
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("   1 [x] EMR:"));
        assert!(out.contains("[warning] Cannot connect to API server."));
    }
}
