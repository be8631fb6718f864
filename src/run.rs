//! One mailer run — resolve the window, load state, dispatch.

use chrono::NaiveDate;

use crate::config::TabNames;
use crate::dispatch::{DispatchEngine, DispatchReport};
use crate::error::Result;
use crate::store::SheetStore;
use crate::transmit::Transmitter;
use crate::{roster, schedule, topics};

/// Execute a full campaign run against the given collaborators.
///
/// Fatal schedule conditions surface before any provider call; per-recipient
/// send failures are absorbed inside the dispatch engine.
pub async fn run_campaign(
    store: &dyn SheetStore,
    transmitter: &dyn Transmitter,
    tabs: &TabNames,
    campaign_id: &str,
    now: NaiveDate,
) -> Result<DispatchReport> {
    tracing::info!(%now, "initiating run");

    let windows = schedule::load_windows(store, &tabs.schedule).await?;
    let campaign = schedule::resolve_active_window(&windows, now)?;
    tracing::info!(
        template = %campaign.template_id,
        send_index = campaign.send_index,
        "resolved active campaign"
    );

    let recipients = roster::load_roster(store, &tabs.roster, campaign.send_index).await?;
    if recipients.is_empty() {
        tracing::warn!("no recipient data found");
    }
    let topics = topics::load_topics(store, &tabs.messages).await?;

    let report = DispatchEngine::new(store, transmitter, campaign_id)
        .run(&campaign, &recipients, &topics)
        .await?;
    tracing::info!(
        sent = report.sent,
        skipped = report.skipped,
        failed = report.failed,
        "finishing run"
    );
    Ok(report)
}
