//! Near-duplicate detection for proposed article titles.

use super::ArticleSummary;
use crate::types::{Article, FunnelStage};
use serde::Serialize;
use std::collections::HashSet;

const CANDIDATE_THRESHOLD: f64 = 0.7;
const MERGE_THRESHOLD: f64 = 0.8;
const UPDATE_THRESHOLD: f64 = 0.9;

/// What to do with a proposed article that resembles an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateAction {
    /// Fold the new content into the existing article.
    Merge,
    /// Update the existing article in place.
    Update,
    /// Similar enough to flag, not enough to act on.
    Skip,
}

/// An existing article resembling a proposed one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCandidate {
    /// The existing article.
    pub existing: ArticleSummary,
    /// Title similarity in `0.0..=1.0`.
    pub similarity: f64,
    /// Suggested handling.
    pub suggested_action: DuplicateAction,
}

/// Word-set Jaccard similarity of two titles, case-insensitive.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let left: HashSet<&str> = a_lower.split_whitespace().collect();
    let right: HashSet<&str> = b_lower.split_whitespace().collect();

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}

/// Existing articles at `stage` whose titles resemble `title`, most similar
/// first.
pub fn find_duplicate_candidates(
    title: &str,
    topic: &str,
    stage: FunnelStage,
    existing: &[Article],
) -> Vec<DuplicateCandidate> {
    let mut candidates: Vec<DuplicateCandidate> = existing
        .iter()
        .filter(|a| a.funnel_stage == stage)
        .filter_map(|a| {
            let similarity = title_similarity(title, &a.title);
            if similarity <= CANDIDATE_THRESHOLD {
                return None;
            }
            let suggested_action = if similarity > UPDATE_THRESHOLD && a.topic == topic {
                DuplicateAction::Update
            } else if similarity > MERGE_THRESHOLD {
                DuplicateAction::Merge
            } else {
                DuplicateAction::Skip
            };
            Some(DuplicateCandidate {
                existing: ArticleSummary::from(a),
                similarity,
                suggested_action,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    tracing::debug!(
        target: "primehomes::analysis",
        title,
        candidates = candidates.len(),
        "Checked for duplicate articles"
    );
    candidates
}
