//! Paginator: slices a snapshot into the rows visible on the current page.

use std::fmt;

use crate::error::{ReportError, Result};
use crate::report::{ReportSnapshot, Row};

/// Pagination cursor: 1-based page number and rows per page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(ReportError::InvalidPageSize(page_size));
        }
        Ok(Self {
            current_page: 1,
            page_size,
        })
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Change rows per page. Always returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(ReportError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        self.current_page = 1;
        Ok(())
    }

    /// Step back one page. Returns false when already on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one page. Returns false when already on the last page.
    pub fn next_page(&mut self, total_rows: usize) -> bool {
        if self.current_page < total_pages(total_rows, self.page_size) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Pull `current_page` back into range for `total_rows`.
    ///
    /// Runs on every render, since the row count can change between renders.
    pub fn clamp(&mut self, total_rows: usize) {
        let last = total_pages(total_rows, self.page_size).max(1);
        self.current_page = self.current_page.clamp(1, last);
    }
}

/// Number of pages for `total_rows`; zero when there are no rows.
pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    if total_rows == 0 || page_size == 0 {
        0
    } else {
        total_rows.div_ceil(page_size).max(1)
    }
}

/// Position summary shown under the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSummary {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

impl PageSummary {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {} of {} ({} total rows)",
            self.current_page, self.total_pages, self.total_rows
        )
    }
}

/// Rows visible on one page plus where that page sits.
#[derive(Debug)]
pub struct Page<'a> {
    pub rows: &'a [Row],
    pub start_index: usize,
    pub summary: PageSummary,
}

/// Clamp `state` against `snapshot` and slice out the visible rows.
///
/// The page count follows `total_rows`; the slice is bounded by the rows
/// actually held, so a short snapshot yields a short or empty page.
///
/// # Arguments
/// * `snapshot` - The report being displayed
/// * `state` - Pagination cursor, clamped in place
///
/// # Returns
/// * `Page` - The visible rows, their start index and the page summary
pub fn paginate<'a>(snapshot: &'a ReportSnapshot, state: &mut PageState) -> Page<'a> {
    let total_rows = snapshot.total_rows();
    state.clamp(total_rows);

    let rows = snapshot.rows();
    let start_index = (state.current_page - 1).saturating_mul(state.page_size);
    let start = start_index.min(rows.len());
    let end = start_index.saturating_add(state.page_size).min(rows.len());

    Page {
        rows: &rows[start..end],
        start_index,
        summary: PageSummary {
            current_page: state.current_page,
            total_pages: total_pages(total_rows, state.page_size),
            total_rows,
        },
    }
}
