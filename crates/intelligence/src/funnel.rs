//! Funnel progression policy.
//!
//! Readers move TOFU → MOFU → BOFU. BOFU is terminal: its canonical next
//! stage is itself, and it has no progression target.

use crate::types::{FunnelStage, NextStep};
use serde::Serialize;

/// Canonical next stage for `stage`. BOFU maps to itself.
pub fn next_stage(stage: FunnelStage) -> FunnelStage {
    match stage {
        FunnelStage::Tofu => FunnelStage::Mofu,
        FunnelStage::Mofu => FunnelStage::Bofu,
        FunnelStage::Bofu => FunnelStage::Bofu,
    }
}

/// Stage a reader should be pushed towards, or `None` at the end of the funnel.
pub fn progression_target(stage: FunnelStage) -> Option<FunnelStage> {
    match stage {
        FunnelStage::Bofu => None,
        other => Some(next_stage(other)),
    }
}

/// Returns true when moving from `from` to `to` is one step down the funnel.
pub fn is_progression(from: FunnelStage, to: FunnelStage) -> bool {
    progression_target(from) == Some(to)
}

/// Short reader-facing label for a stage.
pub fn stage_label(stage: FunnelStage) -> &'static str {
    match stage {
        FunnelStage::Tofu => "Learn",
        FunnelStage::Mofu => "Compare",
        FunnelStage::Bofu => "Decide",
    }
}

/// Progress summary for a reader sitting at a given stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelInfo {
    /// Current stage.
    pub stage: FunnelStage,
    /// Label of the current stage.
    pub label: &'static str,
    /// Stage to progress to, if any.
    pub next_stage: Option<FunnelStage>,
    /// Whether the reader is at the decision stage.
    pub is_last_stage: bool,
    /// Journey completion, in percent.
    pub progress_percentage: u8,
}

impl FunnelInfo {
    /// Build the summary for `stage`.
    pub fn for_stage(stage: FunnelStage) -> Self {
        let progress_percentage = match stage {
            FunnelStage::Tofu => 33,
            FunnelStage::Mofu => 66,
            FunnelStage::Bofu => 100,
        };
        Self {
            stage,
            label: stage_label(stage),
            next_stage: progression_target(stage),
            is_last_stage: stage == FunnelStage::Bofu,
            progress_percentage,
        }
    }
}

/// Fallback call-to-action when no article-level next step is known.
pub fn generic_next_step(stage: FunnelStage) -> NextStep {
    match stage {
        FunnelStage::Tofu => NextStep {
            title: "Explore Property Areas".to_string(),
            url: Some("/qa".to_string()),
            cta: Some("Browse All Questions".to_string()),
            preview: Some(
                "Discover detailed insights about different areas and property types.".to_string(),
            ),
            funnel_stage: Some(FunnelStage::Mofu),
            slug: None,
        },
        FunnelStage::Mofu => NextStep {
            title: "Book a Property Viewing".to_string(),
            url: Some("/book-viewing".to_string()),
            cta: Some("Schedule Now".to_string()),
            preview: Some(
                "Ready to see properties in person? Schedule a viewing with our experts."
                    .to_string(),
            ),
            funnel_stage: Some(FunnelStage::Bofu),
            slug: None,
        },
        FunnelStage::Bofu => NextStep {
            title: "Contact Our Team".to_string(),
            url: Some("/book-viewing".to_string()),
            cta: Some("Get in Touch".to_string()),
            preview: Some(
                "Speak directly with our property experts about your requirements.".to_string(),
            ),
            funnel_stage: None,
            slug: None,
        },
    }
}
