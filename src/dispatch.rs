//! Dispatch engine — the send loop with exactly-once status tracking.

use std::collections::HashMap;

use crate::error::Result;
use crate::roster::{RecipientRecord, SENT_MARKER};
use crate::schedule::ActiveCampaign;
use crate::store::SheetStore;
use crate::topics::TopicEntry;
use crate::transmit::{TransmissionRequest, Transmitter};

/// Outcome counters for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Recipients that were due for this send.
    pub attempted: usize,
    /// Provider accepted and the status cell was marked.
    pub sent: usize,
    /// Already marked for this send index; no provider call made.
    pub skipped: usize,
    /// Provider rejected, errored, or the row had no usable topic.
    pub failed: usize,
}

/// Sends the active campaign to every recipient still due for it.
pub struct DispatchEngine<'a> {
    store: &'a dyn SheetStore,
    transmitter: &'a dyn Transmitter,
    campaign_id: &'a str,
}

impl<'a> DispatchEngine<'a> {
    pub fn new(
        store: &'a dyn SheetStore,
        transmitter: &'a dyn Transmitter,
        campaign_id: &'a str,
    ) -> Self {
        Self {
            store,
            transmitter,
            campaign_id,
        }
    }

    /// Run the send loop sequentially over the roster.
    ///
    /// Provider failures are absorbed per-recipient: the status cell stays
    /// untouched, so the recipient is due again on the next run. A failed
    /// status write-back terminates the run.
    pub async fn run(
        &self,
        campaign: &ActiveCampaign,
        recipients: &[RecipientRecord],
        topics: &HashMap<String, TopicEntry>,
    ) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();

        for recipient in recipients {
            if recipient.already_sent() {
                tracing::debug!(
                    email = %recipient.email,
                    template = %campaign.template_id,
                    "already sent, skipping"
                );
                report.skipped += 1;
                continue;
            }
            report.attempted += 1;

            let Some(topic) = topics.get(&recipient.topic) else {
                tracing::error!(
                    email = %recipient.email,
                    topic = %recipient.topic,
                    "no topic entry for recipient"
                );
                report.failed += 1;
                continue;
            };

            let request = TransmissionRequest {
                recipient: recipient.email.clone(),
                template_id: campaign.template_id.clone(),
                campaign_id: self.campaign_id.to_string(),
                substitution_data: substitution_data(recipient, topic, campaign.send_index),
                track_opens: true,
                track_clicks: true,
            };

            tracing::info!(email = %recipient.email, template = %campaign.template_id, "sending");
            match self.transmitter.send(&request).await {
                Ok(receipt) if receipt.accepted > 0 => {
                    self.store
                        .write_cell(&recipient.status_cell, SENT_MARKER)
                        .await?;
                    tracing::info!(email = %recipient.email, "send accepted, status recorded");
                    report.sent += 1;
                }
                Ok(receipt) => {
                    tracing::error!(
                        email = %recipient.email,
                        response = %receipt.raw,
                        "send rejected by provider"
                    );
                    report.failed += 1;
                }
                Err(e) => {
                    tracing::error!(email = %recipient.email, error = %e, "send failed");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Template substitution payload for one recipient.
fn substitution_data(
    recipient: &RecipientRecord,
    topic: &TopicEntry,
    send_index: u32,
) -> serde_json::Value {
    serde_json::json!({
        "name": recipient.name,
        "resolution_text": recipient.resolution,
        "photo": format!("{}{}.jpg", topic.photo_prefix, send_index),
        "topic_phrase": topic.phrase,
    })
}

// ── Tests ───────────────────────────────────────────────────────────
