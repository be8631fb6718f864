//! Tabular store seam — the trait the core talks to, cell coordinates, and
//! the row cursor shared by every worksheet loader.

pub mod auth;
pub mod sheets;

pub use sheets::GoogleSheetsStore;

use async_trait::async_trait;
use futures::Stream;

use crate::error::StoreError;

/// First data row of every worksheet (row 1 is the header).
pub const FIRST_DATA_ROW: u32 = 2;

/// Read/write access to the worksheets of one spreadsheet.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Read one row of `width` cells starting at column A. Rows shorter than
    /// `width` come back padded with empty strings; a row past the end of
    /// the table comes back all-empty.
    async fn read_row(&self, tab: &str, row: u32, width: usize)
    -> Result<Vec<String>, StoreError>;

    /// Overwrite a single cell.
    async fn write_cell(&self, coord: &CellCoord, value: &str) -> Result<(), StoreError>;
}

/// Address of one cell, captured at read time and sufficient for a later
/// write-back with no live connection state attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCoord {
    pub tab: String,
    /// 1-based sheet row.
    pub row: u32,
    /// 0-based column index (column A is 0).
    pub col: usize,
}

impl CellCoord {
    pub fn new(tab: impl Into<String>, row: u32, col: usize) -> Self {
        Self {
            tab: tab.into(),
            row,
            col,
        }
    }

    /// A1 reference including the worksheet name, e.g. `resolutions!J5`.
    pub fn a1(&self) -> String {
        format!("{}!{}{}", self.tab, column_letter(self.col), self.row)
    }
}

/// Convert a 0-based column index to its A1 letter form.
pub fn column_letter(col: usize) -> String {
    let mut col = col;
    let mut out = String::new();
    loop {
        out.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    out
}

/// One non-empty row pulled by the cursor.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based sheet row this record came from.
    pub index: u32,
    pub cells: Vec<String>,
}

/// Lazily walk a worksheet from the first data row, yielding rows until the
/// first one whose leading cell is empty (the end-of-table sentinel).
///
/// The cursor is finite and restartable: each call starts over at row 2.
pub fn scan_rows<'a>(
    store: &'a dyn SheetStore,
    tab: &'a str,
    width: usize,
) -> impl Stream<Item = Result<RawRow, StoreError>> + 'a {
    futures::stream::try_unfold(FIRST_DATA_ROW, move |row| async move {
        let cells = store.read_row(tab, row, width).await?;
        if cells.first().is_none_or(|cell| cell.is_empty()) {
            return Ok(None);
        }
        Ok(Some((RawRow { index: row, cells }, row + 1)))
    })
}

// ── Tests ───────────────────────────────────────────────────────────
