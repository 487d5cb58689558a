//! Funnel-aware related-article recommendations for the Del Sol Prime Homes
//! Q&A library.
//!
//! This crate provides:
//! - The article data contract and a lenient record boundary for loosely
//!   typed exports (JSON rows, markdown frontmatter)
//! - The TOFU → MOFU → BOFU funnel progression policy
//! - Relevance scoring and capped, stable recommendation selection
//! - Next-step resolution and funnel health analysis over an article set

pub mod analysis;
pub mod error;
pub mod funnel;
pub mod navigation;
pub mod recommend;
pub mod repository;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{
    analyze_funnel, find_bottlenecks, find_duplicate_candidates, suggest_topic_targets,
    topic_alignment, topic_distribution, AnalysisIssue, DuplicateAction, DuplicateCandidate,
    FunnelBottleneck, FunnelReport, LinkKind, MisalignedPath, Severity, TopicAlignment,
    TopicSummary, TopicTargets,
};
pub use error::{InvalidWeightError, LoadError, RepositoryError, UnknownStageError};
pub use funnel::{
    generic_next_step, is_progression, next_stage, progression_target, stage_label, FunnelInfo,
};
pub use navigation::{button_preview, resolve_next_step, NextStepSource, ResolvedNextStep};
pub use recommend::{
    recommend, score_candidate, CacheKey, RecommendationCache, RecommendationContext,
    RecommendationSelector, RelevanceScorer, RelevanceSignal, ScoreBreakdown, ScoredArticle,
    Scorer, ScoringWeights,
};
pub use repository::{
    fetch_candidates, find_article, ArticleRecord, ArticleSource, ArticleStore, CandidateQuery,
    DEFAULT_CANDIDATE_LIMIT,
};
pub use types::{Article, ArticleLink, FunnelStage, NextStep};
