//! Recipient roster — one record per row, with per-send status addressing.

use futures::TryStreamExt;

use crate::error::Result;
use crate::store::{CellCoord, SheetStore, scan_rows};

/// Column displacement added to a send index to find that campaign's
/// sent-flag column. One status column per send lets the same roster table
/// track any number of sequential campaigns without schema changes.
pub const STATUS_OFFSET: usize = 8;

/// Marker written to (and expected in) a recipient's status cell.
pub const SENT_MARKER: &str = "Sent";

const COL_TIMESTAMP: usize = 0;
const COL_NAME: usize = 1;
const COL_EMAIL: usize = 2;
const COL_TOPIC: usize = 6;
const COL_RESOLUTION: usize = 7;

/// Per-recipient view for one send. Built fresh each run, never persisted.
#[derive(Debug, Clone)]
pub struct RecipientRecord {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub topic: String,
    pub resolution: String,
    /// Contents of this send's status cell.
    pub sent_status: String,
    /// Where to write the sent marker back.
    pub status_cell: CellCoord,
}

impl RecipientRecord {
    /// Whether this send already went out to this recipient.
    pub fn already_sent(&self) -> bool {
        self.sent_status == SENT_MARKER
    }
}

/// 0-based column holding the sent flag for `send_index`.
pub fn status_column(send_index: u32) -> usize {
    STATUS_OFFSET + send_index as usize
}

/// Load the roster for one send. The scan stops at the first row with an
/// empty timestamp cell; row width reaches exactly through this send's
/// status column.
pub async fn load_roster(
    store: &dyn SheetStore,
    tab: &str,
    send_index: u32,
) -> Result<Vec<RecipientRecord>> {
    let status_col = status_column(send_index);
    let rows = scan_rows(store, tab, status_col + 1);
    futures::pin_mut!(rows);

    let mut records = Vec::new();
    while let Some(row) = rows.try_next().await? {
        records.push(RecipientRecord {
            timestamp: row.cells[COL_TIMESTAMP].clone(),
            name: row.cells[COL_NAME].clone(),
            email: row.cells[COL_EMAIL].clone(),
            topic: row.cells[COL_TOPIC].clone(),
            resolution: row.cells[COL_RESOLUTION].clone(),
            sent_status: row.cells[status_col].clone(),
            status_cell: CellCoord::new(tab, row.index, status_col),
        });
    }
    tracing::debug!(count = records.len(), tab, "roster loaded");
    Ok(records)
}

// ── Tests ───────────────────────────────────────────────────────────
