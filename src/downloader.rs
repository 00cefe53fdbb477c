use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::cell::Scalar;
use crate::error::{ReportError, Result};
use crate::report::ReportSnapshot;

/// Name of the single worksheet in an export.
pub const SHEET_NAME: &str = "Report";

/// Extension of exported files.
pub const EXPORT_EXTENSION: &str = "xlsx";

/// Widest column hint, in characters.
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Rows of an export: one header row followed by every report row.
///
/// Built from the full snapshot, not the visible page.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

impl ExportGrid {
    /// Build the grid for `snapshot`.
    ///
    /// # Returns
    /// * `Err(ReportError::NothingToExport)` when the report has no rows
    pub fn from_snapshot(snapshot: &ReportSnapshot) -> Result<Self> {
        if !snapshot.has_rows() {
            return Err(ReportError::NothingToExport);
        }

        let columns = snapshot.columns();
        let headers = columns
            .iter()
            .map(|column| snapshot.label(column).to_string())
            .collect();
        let rows = snapshot
            .rows()
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| row.get(column).cloned().unwrap_or(Scalar::Null))
                    .collect()
            })
            .collect();

        Ok(Self { headers, rows })
    }

    /// Total rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Width hint per column: `min(longest text + 2, 50)`, header included.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let longest = self
                    .rows
                    .iter()
                    .map(|row| row.get(i).map_or(0, |v| text_len(&v.display_text())))
                    .fold(text_len(header), usize::max);
                (longest + 2).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }
}

// Lengths are counted in UTF-16 units, the way spreadsheet tools measure text
fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Filename for an export made on `date`, e.g. `Report_2024-03-01.xlsx`.
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        date.format("%Y-%m-%d"),
        EXPORT_EXTENSION
    )
}

/// Convert an export grid to XLSX format
///
/// Writes one worksheet named `Report`: the header row, then every data row.
/// Numbers become numeric cells, booleans boolean cells, text string cells;
/// empty values are left blank. Each column gets its width hint.
///
/// # Arguments
/// * `grid` - The grid built from the report snapshot
///
/// # Returns
/// * `Result<Vec<u8>>` - XLSX file content as bytes or an error
pub fn to_xlsx(grid: &ExportGrid) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(SHEET_NAME)?;

    for (c, header) in grid.headers.iter().enumerate() {
        worksheet.write_string(0, column_index(c)?, header.as_str())?;
    }

    for (r, row) in grid.rows.iter().enumerate() {
        let sheet_row = u32::try_from(r + 1)
            .map_err(|_| ReportError::Export(format!("too many rows to export: {}", r + 1)))?;
        for (c, value) in row.iter().enumerate() {
            let col = column_index(c)?;
            match value {
                Scalar::Null => {}
                Scalar::Bool(b) => {
                    worksheet.write_boolean(sheet_row, col, *b)?;
                }
                Scalar::Number(n) => match n.as_f64() {
                    Some(f) => {
                        worksheet.write_number(sheet_row, col, f)?;
                    }
                    None => {
                        worksheet.write_string(sheet_row, col, &n.to_string())?;
                    }
                },
                Scalar::Text(s) if s.is_empty() => {}
                Scalar::Text(s) => {
                    worksheet.write_string(sheet_row, col, s.as_str())?;
                }
            }
        }
    }

    for (c, width) in grid.column_widths().into_iter().enumerate() {
        worksheet.set_column_width(column_index(c)?, width as f64)?;
    }

    workbook.push_worksheet(worksheet);

    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

fn column_index(c: usize) -> Result<u16> {
    u16::try_from(c).map_err(|_| ReportError::Export(format!("too many columns to export: {}", c + 1)))
}
