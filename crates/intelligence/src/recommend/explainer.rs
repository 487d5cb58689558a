//! Generate human-readable explanations for recommendations.

use super::RelevanceSignal;
use crate::funnel::progression_target;
use crate::types::FunnelStage;

/// Generate a human-readable explanation from relevance signals.
pub fn generate_explanation(signals: &[RelevanceSignal]) -> String {
    if signals.is_empty() {
        return "Related article".to_string();
    }

    let parts: Vec<String> = signals
        .iter()
        .map(|signal| match signal {
            RelevanceSignal::TopicMatch { topic } => format!("Same topic: {}", topic),
            RelevanceSignal::RelatedTopic { candidate, .. } => {
                format!("Related topic: {}", candidate)
            }
            RelevanceSignal::FunnelProgression { from, to } => {
                format!("Next step in your journey ({} → {})", from, to)
            }
            RelevanceSignal::StageShift { to, .. } => format!("Different perspective ({})", to),
            RelevanceSignal::SharedTags { tags } => {
                if tags.len() == 1 {
                    format!("Shares tag: {}", tags[0])
                } else {
                    format!("Shares tags: {}", tags.join(", "))
                }
            }
            RelevanceSignal::TitleKeywords { keywords } => {
                format!("Title mentions: {}", keywords.join(", "))
            }
        })
        .collect();

    parts.join("; ")
}

/// Generate a summary line for a set of recommendations.
pub fn summarize_recommendations(count: usize, stage: FunnelStage) -> String {
    if count == 0 {
        return "No related articles found".to_string();
    }

    let noun = if count == 1 { "article" } else { "articles" };
    match progression_target(stage) {
        Some(next) => format!("{} related {} (you are at {}, next: {})", count, noun, stage, next),
        None => format!("{} related {} (you are at {})", count, noun, stage),
    }
}
