//! Next-step resolution for an article.
//!
//! Priority: explicit next step stored with the article, then the curated
//! funnel link (replaced by a same-topic article when the link is missing or
//! crosses topics), then the frontmatter `nextStep`, then a generic
//! stage-based call-to-action.

use crate::funnel::{generic_next_step, progression_target};
use crate::types::{Article, FunnelStage, NextStep};
use serde::Serialize;

const PREVIEW_MAX_CHARS: usize = 50;
const PREVIEW_TRUNCATED_CHARS: usize = 47;

/// Where a resolved next step came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NextStepSource {
    /// Stored on the article itself.
    Explicit,
    /// Curated or topic-matched funnel link.
    FunnelLink,
    /// Declared in markdown frontmatter.
    Frontmatter,
    /// Stage-based fallback.
    Generic,
}

/// A next step together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNextStep {
    /// The call-to-action.
    pub step: NextStep,
    /// Provenance.
    pub source: NextStepSource,
}

/// Resolve the next step for `current`, looking links up in `articles`.
///
/// Only articles in the current article's language are considered.
pub fn resolve_next_step(current: &Article, articles: &[Article]) -> ResolvedNextStep {
    if let Some(step) = &current.next_step {
        return resolved(current, step.clone(), NextStepSource::Explicit);
    }

    if let Some(target) = funnel_link_target(current, articles) {
        let step = NextStep {
            title: target.title.clone(),
            slug: Some(target.slug.clone()),
            url: None,
            cta: Some(link_cta(current.funnel_stage).to_string()),
            preview: Some(button_preview(&target.title, &target.topic)),
            funnel_stage: Some(target.funnel_stage),
        };
        return resolved(current, step, NextStepSource::FunnelLink);
    }

    if let Some(link) = &current.frontmatter_next_step {
        let step = NextStep {
            title: link.title.clone(),
            slug: Some(link.slug.clone()),
            url: None,
            cta: Some(link_cta(current.funnel_stage).to_string()),
            preview: link
                .topic
                .as_deref()
                .map(|topic| button_preview(&link.title, topic)),
            funnel_stage: None,
        };
        return resolved(current, step, NextStepSource::Frontmatter);
    }

    resolved(
        current,
        generic_next_step(current.funnel_stage),
        NextStepSource::Generic,
    )
}

fn resolved(current: &Article, step: NextStep, source: NextStepSource) -> ResolvedNextStep {
    tracing::debug!(
        target: "primehomes::navigation",
        article = %current.id,
        source = ?source,
        next = %step.title,
        "Resolved next step"
    );
    ResolvedNextStep { step, source }
}

/// Curated link for the current stage, re-targeted to a same-topic article
/// when the curated one is missing or belongs to another topic.
fn funnel_link_target<'a>(current: &Article, articles: &'a [Article]) -> Option<&'a Article> {
    let target_stage = progression_target(current.funnel_stage)?;
    let link_id = match current.funnel_stage {
        FunnelStage::Tofu => current.points_to_mofu_id.as_deref(),
        FunnelStage::Mofu => current.points_to_bofu_id.as_deref(),
        FunnelStage::Bofu => None,
    };

    let same_language = |a: &&Article| a.language == current.language;
    let linked = link_id.and_then(|id| {
        articles
            .iter()
            .filter(same_language)
            .find(|a| a.id == id)
    });

    let aligned = linked.is_some_and(|a| a.topic == current.topic);
    if aligned || current.topic.is_empty() {
        return linked;
    }

    let topic_matched = articles
        .iter()
        .filter(same_language)
        .find(|a| {
            a.id != current.id && a.topic == current.topic && a.funnel_stage == target_stage
        });

    topic_matched.or(linked)
}

fn link_cta(stage: FunnelStage) -> &'static str {
    match stage {
        FunnelStage::Tofu => "Learn More",
        FunnelStage::Mofu => "Take Action",
        FunnelStage::Bofu => "Get Started",
    }
}

/// Button preview text: `"<topic>: <title>"`, long titles shortened.
pub fn button_preview(title: &str, topic: &str) -> String {
    let short = if title.chars().count() > PREVIEW_MAX_CHARS {
        let head: String = title.chars().take(PREVIEW_TRUNCATED_CHARS).collect();
        format!("{head}...")
    } else {
        title.to_string()
    };
    format!("{topic}: {short}")
}
