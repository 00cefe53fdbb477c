/*!
# Report Client

A reporting client for a question-based report API, built in Rust.

## Overview

The user picks a set of named questions, the client requests a tabular report
built from those selections, pages through the resulting rows and exports the
full dataset to a spreadsheet file.

## Architecture

Everything client-side lives in one [`session::ReportSession`], constructed
with its collaborators:

- **Network** ([`client::ReportApi`]): `GET /api/health`, `GET /api/metadata`,
  `POST /api/generate-report`. [`client::HttpApi`] is the `reqwest` implementation.
- **Display** ([`render::Renderer`]): [`html::HtmlRenderer`] keeps escaped page
  fragments for a browser page, [`terminal::TerminalRenderer`] prints text.
- **Files** ([`render::FileSink`]): [`render::DirectorySink`] writes exports to disk.

### Flow

- Selection changes re-render the question list and the selected count
- `generate` issues one request; on success the report snapshot is replaced
  wholesale and the page returns to 1
- Page changes only re-render, they never re-fetch
- Export reads the whole snapshot, not the visible page

## Modules

- **cell**: report values, their display text and loose numeric detection
- **selection**: the selected question set
- **report**: report snapshot and API payloads
- **paginator**: page cursor and slicing
- **table**: projection of a page into headers and display cells
- **downloader**: export grid, column width hints, XLSX output
- **client**: the API seam and its HTTP implementation
- **alerts**: notification levels and the auto-dismiss board
- **render**: renderer and file sink traits
- **html**, **terminal**: renderers
- **session**: the reporting session
- **config**, **error**: settings and error types
*/

pub mod alerts;
pub mod cell;
pub mod client;
pub mod config;
pub mod downloader;
pub mod error;
pub mod html;
pub mod paginator;
pub mod render;
pub mod report;
pub mod selection;
pub mod session;
pub mod table;
pub mod terminal;

pub use cell::{DisplayCell, Scalar};
pub use client::ReportApi;
#[cfg(feature = "web")]
pub use client::HttpApi;
pub use config::ClientConfig;
pub use error::{ReportError, Result};
pub use paginator::{PageState, PageSummary};
pub use render::{DirectorySink, FileSink, Renderer};
pub use report::ReportSnapshot;
pub use selection::SelectionSet;
pub use session::{Connectivity, ReportSession};
pub use table::{TableRender, TableView};
