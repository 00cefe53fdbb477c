//! Display and file collaborators a session is built with.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::alerts::Alert;
use crate::error::Result;
use crate::table::TableRender;

/// A selectable question as the sidebar shows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionEntry {
    /// Full question text, also the tooltip.
    pub question: String,
    /// Text shown next to the checkbox.
    pub label: String,
    pub checked: bool,
}

/// Shorten `text` to `width` characters, marking the cut with `...`.
pub fn truncate_label(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let mut label: String = text.chars().take(width).collect();
        label.push_str("...");
        label
    } else {
        text.to_string()
    }
}

/// Where a session draws its state.
pub trait Renderer {
    /// Replace the question list. An empty slice means none are available.
    fn render_questions(&mut self, questions: &[QuestionEntry]);

    /// Selected count, and whether generating a report is allowed.
    fn render_selection(&mut self, count: usize, can_generate: bool);

    fn render_table(&mut self, table: &TableRender);

    fn set_loading(&mut self, loading: bool);

    /// Offer the export control once a report exists.
    fn set_export_available(&mut self, available: bool);

    fn show_alert(&mut self, alert: Alert);
}

/// Destination for exported files.
pub trait FileSink {
    fn write_file(&mut self, filename: &str, contents: &[u8]) -> Result<()>;
}

/// Writes exports into a directory, replacing a file of the same name.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn write_file(&mut self, filename: &str, contents: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, contents)?;
        info!("wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}
