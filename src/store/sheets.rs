//! Google Sheets adapter — REST calls against the v4 `values` endpoints.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::error::StoreError;
use crate::store::auth::{ServiceAccountKey, TokenProvider};
use crate::store::{CellCoord, SheetStore, column_letter};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Spreadsheet client bound to one document by its key.
pub struct GoogleSheetsStore {
    http: reqwest::Client,
    tokens: TokenProvider,
    spreadsheet_id: String,
    base_url: String,
}

/// Response body of `values.get`. The API omits `values` entirely for an
/// empty range.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl GoogleSheetsStore {
    /// Open a spreadsheet by its document key.
    pub fn open_by_key(credentials: ServiceAccountKey, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            tokens: TokenProvider::new(credentials),
            spreadsheet_id: spreadsheet_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/{}/values/{range}", self.base_url, self.spreadsheet_id)
    }

    /// A1 range covering one row from column A through `width` columns.
    fn row_range(tab: &str, row: u32, width: usize) -> String {
        format!("{tab}!A{row}:{}{row}", column_letter(width.saturating_sub(1)))
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    async fn read_row(
        &self,
        tab: &str,
        row: u32,
        width: usize,
    ) -> Result<Vec<String>, StoreError> {
        let range = Self::row_range(tab, row, width);
        let token = self.tokens.bearer_token().await?;

        let resp = self
            .http
            .get(self.values_url(&range))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(StoreError::Api {
                status: status.as_u16(),
                range,
                body,
            });
        }

        let parsed: ValueRange =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        let mut cells = parsed.values.into_iter().next().unwrap_or_default();
        cells.resize(width, String::new());
        Ok(cells)
    }

    async fn write_cell(&self, coord: &CellCoord, value: &str) -> Result<(), StoreError> {
        let range = coord.a1();
        let token = self.tokens.bearer_token().await?;

        let body = serde_json::json!({
            "range": range,
            "values": [[value]],
        });
        let resp = self
            .http
            .put(self.values_url(&range))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                range,
                body,
            });
        }
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_range_schedule_width() {
        assert_eq!(GoogleSheetsStore::row_range("dates", 2, 5), "dates!A2:E2");
    }

    #[test]
    fn row_range_roster_width() {
        // Send index 2 reads through the status column at offset 10.
        assert_eq!(
            GoogleSheetsStore::row_range("resolutions", 7, 11),
            "resolutions!A7:K7"
        );
    }

    #[test]
    fn value_range_missing_values_is_empty() {
        let parsed: ValueRange = serde_json::from_str(r#"{"range":"dates!A9:E9"}"#).unwrap();
        assert!(parsed.values.is_empty());
    }

    #[test]
    fn value_range_parses_rows() {
        let parsed: ValueRange = serde_json::from_str(
            r#"{"range":"dates!A2:E2","values":[["01/01/2024","01/08/2024","T1","","1"]]}"#,
        )
        .unwrap();
        assert_eq!(parsed.values.len(), 1);
        assert_eq!(parsed.values[0][2], "T1");
    }
}
