//! Related-article recommendations combining topic, funnel, tag and title signals.

mod cache;
mod explainer;
mod keywords;
mod scorer;
mod selector;
pub mod topics;

pub use cache::{CacheKey, RecommendationCache, DEFAULT_CACHE_CAPACITY};
pub use explainer::{generate_explanation, summarize_recommendations};
pub use keywords::{shared_tags, title_keyword_matches, MIN_KEYWORD_CHARS};
pub use scorer::{score_candidate, Relevance, RelevanceScorer, Scorer, ScoringWeights};
pub use selector::{recommend, RecommendationContext, RecommendationSelector};
pub use topics::{is_related_topic, related_topics};

use crate::types::{Article, FunnelStage};
use serde::{Deserialize, Serialize};

/// A candidate article with its relevance to the current article.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredArticle {
    /// The candidate.
    pub article: Article,
    /// Combined score, clamped to the configured ceiling.
    pub score: f64,
    /// Breakdown of score components.
    pub score_breakdown: ScoreBreakdown,
    /// Human-readable explanation.
    pub explanation: String,
    /// Signals that fired for this candidate.
    pub signals: Vec<RelevanceSignal>,
}

/// Breakdown of relevance score components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Score from exact or related topic match.
    pub topic_score: f64,
    /// Score from funnel stage relationship.
    pub funnel_score: f64,
    /// Score from shared tags.
    pub tag_score: f64,
    /// Score from title keywords matching the current topic.
    pub keyword_score: f64,
}

impl ScoreBreakdown {
    /// Calculate the unclamped total.
    pub fn total(&self) -> f64 {
        self.topic_score + self.funnel_score + self.tag_score + self.keyword_score
    }
}

/// Signals that contribute to a candidate's relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RelevanceSignal {
    /// Candidate has the same topic.
    TopicMatch {
        /// Shared topic.
        topic: String,
    },
    /// Candidate topic is adjacent to the current topic.
    RelatedTopic {
        /// Current article topic.
        current: String,
        /// Candidate topic.
        candidate: String,
    },
    /// Candidate is the next funnel step.
    FunnelProgression {
        /// Current stage.
        from: FunnelStage,
        /// Candidate stage.
        to: FunnelStage,
    },
    /// Candidate sits in a different, non-progression stage.
    StageShift {
        /// Current stage.
        from: FunnelStage,
        /// Candidate stage.
        to: FunnelStage,
    },
    /// Candidate shares tags with the current article.
    SharedTags {
        /// Shared tags, as spelled on the current article.
        tags: Vec<String>,
    },
    /// Candidate title words overlap the current topic.
    TitleKeywords {
        /// Matching title words (lower-cased).
        keywords: Vec<String>,
    },
}

impl RelevanceSignal {
    /// Get a short label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TopicMatch { .. } => "topic-match",
            Self::RelatedTopic { .. } => "related-topic",
            Self::FunnelProgression { .. } => "funnel-progression",
            Self::StageShift { .. } => "stage-shift",
            Self::SharedTags { .. } => "shared-tags",
            Self::TitleKeywords { .. } => "title-keywords",
        }
    }
}
