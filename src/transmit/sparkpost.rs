//! SparkPost adapter — drives the transmissions REST endpoint.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::TransmitError;
use crate::transmit::{TransmissionReceipt, TransmissionRequest, Transmitter};

const DEFAULT_BASE_URL: &str = "https://api.sparkpost.com/api/v1";

/// SparkPost API client.
pub struct SparkPostClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl SparkPostClient {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

/// Request body for the transmissions endpoint.
fn transmission_body(request: &TransmissionRequest) -> serde_json::Value {
    serde_json::json!({
        "campaign_id": request.campaign_id,
        "recipients": [{ "address": { "email": request.recipient } }],
        "content": { "template_id": request.template_id },
        "substitution_data": request.substitution_data,
        "options": {
            "open_tracking": request.track_opens,
            "click_tracking": request.track_clicks,
        },
    })
}

/// Pull the accepted-recipient count out of a transmissions response.
/// Error payloads carry no count and come out as zero.
fn accepted_count(payload: &serde_json::Value) -> u64 {
    payload
        .get("results")
        .and_then(|r| r.get("total_accepted_recipients"))
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0)
}

#[async_trait]
impl Transmitter for SparkPostClient {
    async fn send(
        &self,
        request: &TransmissionRequest,
    ) -> Result<TransmissionReceipt, TransmitError> {
        let resp = self
            .http
            .post(self.api_url("transmissions"))
            .header("Authorization", self.api_key.expose_secret())
            .json(&transmission_body(request))
            .send()
            .await
            .map_err(|e| TransmitError::Http(e.to_string()))?;

        // Rejections come back as parseable bodies with no accepted count;
        // the dispatch engine logs the full payload and moves on.
        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| TransmitError::Decode(e.to_string()))?;
        Ok(TransmissionReceipt {
            accepted: accepted_count(&payload),
            raw: payload,
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────
