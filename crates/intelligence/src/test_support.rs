//! Test utilities for the intelligence crate.

use crate::types::{Article, FunnelStage};

/// Article with slug `article-<id>` and a title too short to match any topic keyword.
pub(crate) fn article(id: &str, topic: &str, stage: FunnelStage) -> Article {
    Article::new(id, format!("article-{id}"), format!("Q{id}"), topic, stage)
}

/// Article with a real title, for keyword and duplicate tests.
pub(crate) fn titled(id: &str, title: &str, topic: &str, stage: FunnelStage) -> Article {
    Article::new(id, format!("article-{id}"), title, topic, stage)
}
