//! Campaign schedule — window loading and "which send is this?" resolution.

use chrono::NaiveDate;
use futures::TryStreamExt;

use crate::error::{Result, ScheduleError};
use crate::store::{SheetStore, scan_rows};

/// Columns of the schedule tab: start, end, template id, notes, send index.
const SCHEDULE_WIDTH: usize = 5;

/// One scheduled campaign window. `start` is inclusive, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub template_id: String,
    /// 1-based sequence number; selects the template's photo variant and the
    /// roster status column for this send.
    pub send_index: u32,
}

/// The campaign selected for the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCampaign {
    pub template_id: String,
    pub send_index: u32,
}

/// Parse an `MM/DD/YYYY` cell the way the sheet encodes dates.
pub fn parse_sheet_date(value: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%m/%d/%Y")
}

/// Load the schedule tab in table order. Malformed dates or send indexes are
/// fatal here, before any recipient is touched.
pub async fn load_windows(store: &dyn SheetStore, tab: &str) -> Result<Vec<CampaignWindow>> {
    let rows = scan_rows(store, tab, SCHEDULE_WIDTH);
    futures::pin_mut!(rows);

    let mut windows = Vec::new();
    while let Some(row) = rows.try_next().await? {
        let start = parse_sheet_date(&row.cells[0]).map_err(|e| ScheduleError::InvalidDate {
            value: row.cells[0].clone(),
            row: row.index,
            message: e.to_string(),
        })?;
        let end = parse_sheet_date(&row.cells[1]).map_err(|e| ScheduleError::InvalidDate {
            value: row.cells[1].clone(),
            row: row.index,
            message: e.to_string(),
        })?;
        let send_index =
            row.cells[4]
                .trim()
                .parse()
                .map_err(|_| ScheduleError::InvalidSendIndex {
                    value: row.cells[4].clone(),
                    row: row.index,
                })?;
        windows.push(CampaignWindow {
            start,
            end,
            template_id: row.cells[2].clone(),
            send_index,
        });
    }
    Ok(windows)
}

/// Walk the schedule in table order and pick the campaign covering `now`.
///
/// Rows whose window has already closed are passed over. The first row whose
/// start is still in the future stops the scan with `NotStarted` — the
/// schedule is operated pre-sorted, so a future start means today's send
/// does not exist. This must stay a scan-order decision, not a date-order
/// one.
pub fn resolve_active_window(
    windows: &[CampaignWindow],
    now: NaiveDate,
) -> std::result::Result<ActiveCampaign, ScheduleError> {
    for window in windows {
        if now < window.start {
            tracing::info!(starts = %window.start, "schedule has not started yet");
            return Err(ScheduleError::NotStarted {
                starts: window.start,
            });
        }
        if now < window.end {
            return Ok(ActiveCampaign {
                template_id: window.template_id.clone(),
                send_index: window.send_index,
            });
        }
        // Window already closed; keep scanning.
    }
    Err(ScheduleError::NoActiveCampaign)
}

// ── Tests ───────────────────────────────────────────────────────────
