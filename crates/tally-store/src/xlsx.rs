//! # Spreadsheet Backing
//!
//! A [`TableStore`] persisted as a single-sheet `.xlsx` workbook.
//!
//! ## On-Disk Layout
//! ```text
//!   Titled ("Users Data")                Plain
//!   ┌─────┬──────────┬─────────┬──────┐   ┌─────┬─────────┐
//!   │     │ A        │ B       │ C    │   │     │ A       │
//!   ├─────┼──────────┼─────────┼──────┤   ├─────┼─────────┤
//!   │  1  │Users Data│         │      │   │  1  │ email   │ ← header
//!   │  2  │ username │ email   │ pass…│   │  2  │ a@x.com │ ← data
//!   │  3  │ bob      │ a@x.com │ p    │   │  3  │ b@x.com │
//!   └─────┴──────────┴─────────┴──────┘   └─────┴─────────┘
//! ```
//!
//! ## Write Path
//! The workbook is rendered into memory, written to a temporary file in
//! the destination directory, then renamed over the target. A failure at
//! any step leaves the previous file as it was.
//!
//! ## Blocking
//! calamine and rust_xlsxwriter are synchronous. The async trait methods
//! hand the work to `spawn_blocking`; the free functions below are the
//! synchronous core and are usable on their own.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, XlsxError};
use tally_core::{Record, TableLayout};
use tempfile::Builder;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::table::{header_columns, TableStore};

/// Name given to the single worksheet.
pub const SHEET_NAME: &str = "Sheet1";

// =============================================================================
// Backing
// =============================================================================

/// A table stored in one `.xlsx` file.
#[derive(Debug, Clone)]
pub struct XlsxTable {
    path: PathBuf,
    layout: TableLayout,
}

impl XlsxTable {
    pub fn new(path: impl Into<PathBuf>, layout: TableLayout) -> Self {
        XlsxTable {
            path: path.into(),
            layout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }
}

#[async_trait]
impl TableStore for XlsxTable {
    async fn initialize(&self, shape: &Record) -> StoreResult<bool> {
        let (path, layout, shape) = (self.path.clone(), self.layout.clone(), shape.clone());
        tokio::task::spawn_blocking(move || initialize_sheet(&path, &layout, &shape)).await?
    }

    async fn read_all(&self) -> StoreResult<Vec<Record>> {
        let (path, layout) = (self.path.clone(), self.layout.clone());
        tokio::task::spawn_blocking(move || read_sheet(&path, &layout)).await?
    }

    async fn write_all(&self, records: &[Record], shape: &Record) -> StoreResult<()> {
        let (path, layout) = (self.path.clone(), self.layout.clone());
        let (records, shape) = (records.to_vec(), shape.clone());
        tokio::task::spawn_blocking(move || write_sheet(&path, &layout, &records, &shape)).await?
    }
}

// =============================================================================
// Synchronous Operations
// =============================================================================

/// Creates the workbook with headers from `shape` if `path` does not exist.
///
/// Missing parent directories are created.
pub fn initialize_sheet(path: &Path, layout: &TableLayout, shape: &Record) -> StoreResult<bool> {
    if path.exists() {
        debug!(path = %path.display(), "Table file already exists");
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::unavailable(path, e))?;
    }

    write_sheet(path, layout, &[], shape)?;
    Ok(true)
}

/// Reads every data row from the first worksheet.
///
/// ## Rules
/// - Rows above the header row (the title) are never read as data
/// - Header cells that are blank produce no column
/// - A blank data cell reads as `""`
/// - Rows whose cells are all blank are skipped
/// - Non-text cells are returned in display form (`3.0` → `"3"`)
pub fn read_sheet(path: &Path, layout: &TableLayout) -> StoreResult<Vec<Record>> {
    let mut workbook: Xlsx<BufReader<File>> =
        open_workbook(path).map_err(|e: calamine::XlsxError| StoreError::unavailable(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| StoreError::unavailable(path, "workbook has no worksheets"))?
        .map_err(|e| StoreError::unavailable(path, e))?;

    let records = records_from_range(&range, layout);
    debug!(path = %path.display(), rows = records.len(), "Read table");
    Ok(records)
}

/// Replaces the file at `path` with a workbook holding `records`.
pub fn write_sheet(
    path: &Path,
    layout: &TableLayout,
    records: &[Record],
    shape: &Record,
) -> StoreResult<()> {
    let bytes = render_workbook(layout, records, shape).map_err(|e| StoreError::unavailable(path, e))?;
    replace_file(path, &bytes)?;

    debug!(path = %path.display(), rows = records.len(), "Wrote table");
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn records_from_range(range: &Range<Data>, layout: &TableLayout) -> Vec<Record> {
    let Some((last_row, last_col)) = range.end() else {
        return Vec::new();
    };

    let header_row = layout.header_row();
    let headers: Vec<(u32, String)> = (0..=last_col)
        .filter_map(|col| {
            let name = cell_text(range, header_row, col);
            (!name.is_empty()).then_some((col, name))
        })
        .collect();

    (layout.first_data_row()..=last_row)
        .map(|row| {
            headers
                .iter()
                .map(|(col, name)| (name.as_str(), cell_text(range, row, *col)))
                .collect::<Record>()
        })
        .filter(|record| !record.is_blank())
        .collect()
}

fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn render_workbook(
    layout: &TableLayout,
    records: &[Record],
    shape: &Record,
) -> Result<Vec<u8>, XlsxError> {
    let columns = header_columns(records, shape);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    if let Some(title) = layout.title() {
        sheet.write_string(0, 0, title)?;
    }

    let header_row = layout.header_row();
    for (index, name) in columns.iter().enumerate() {
        sheet.write_string(header_row, column_number(index)?, name)?;
    }

    for (offset, record) in records.iter().enumerate() {
        let row = u32::try_from(offset)
            .ok()
            .and_then(|offset| offset.checked_add(layout.first_data_row()))
            .ok_or(XlsxError::RowColumnLimitError)?;

        for (index, name) in columns.iter().enumerate() {
            let value = record.get(name);
            // Empty values stay as blank cells.
            if !value.is_empty() {
                sheet.write_string(row, column_number(index)?, value)?;
            }
        }
    }

    workbook.save_to_buffer()
}

fn column_number(index: usize) -> Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Writes `bytes` next to `path` and renames over it.
///
/// A replaced file keeps its permissions. A new file gets the usual
/// `0o666` minus umask rather than the temp file's owner-only mode.
fn replace_file(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = fs::metadata(path).ok().map(|meta| meta.permissions());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut temp = builder
        .tempfile_in(dir)
        .map_err(|e| StoreError::unavailable(path, e))?;
    temp.write_all(bytes)
        .map_err(|e| StoreError::unavailable(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| StoreError::unavailable(path, e))?;
    if let Some(permissions) = existing {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| StoreError::unavailable(path, e))?;
    }
    temp.persist(path)
        .map_err(|e| StoreError::unavailable(path, e.error))?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
