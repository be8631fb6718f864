//! Transmission provider seam.

pub mod sparkpost;

pub use sparkpost::SparkPostClient;

use async_trait::async_trait;

use crate::error::TransmitError;

/// One templated message for a single recipient.
#[derive(Debug, Clone)]
pub struct TransmissionRequest {
    pub recipient: String,
    pub template_id: String,
    pub campaign_id: String,
    /// Per-recipient key/value data merged into the template by the provider.
    pub substitution_data: serde_json::Value,
    pub track_opens: bool,
    pub track_clicks: bool,
}

/// Provider response, reduced to what the dispatch engine gates on.
#[derive(Debug, Clone)]
pub struct TransmissionReceipt {
    /// Number of recipients the provider accepted for delivery.
    pub accepted: u64,
    /// Full response payload, kept for failure diagnostics.
    pub raw: serde_json::Value,
}

/// Sends templated messages through an external provider.
#[async_trait]
pub trait Transmitter: Send + Sync {
    async fn send(&self, request: &TransmissionRequest)
    -> Result<TransmissionReceipt, TransmitError>;
}
