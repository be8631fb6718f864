//! Topic lookup table — per-topic phrase and photo prefix.

use std::collections::HashMap;

use futures::TryStreamExt;

use crate::error::Result;
use crate::store::{SheetStore, scan_rows};

/// Columns of the messages tab: topic, phrase, photo prefix.
const TOPIC_WIDTH: usize = 3;

/// Message content for one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEntry {
    pub phrase: String,
    pub photo_prefix: String,
}

/// Load the topic table. Later rows win on duplicate topic names.
pub async fn load_topics(
    store: &dyn SheetStore,
    tab: &str,
) -> Result<HashMap<String, TopicEntry>> {
    let rows = scan_rows(store, tab, TOPIC_WIDTH);
    futures::pin_mut!(rows);

    let mut topics = HashMap::new();
    while let Some(row) = rows.try_next().await? {
        topics.insert(
            row.cells[0].clone(),
            TopicEntry {
                phrase: row.cells[1].clone(),
                photo_prefix: row.cells[2].clone(),
            },
        );
    }
    tracing::debug!(count = topics.len(), tab, "topic table loaded");
    Ok(topics)
}
