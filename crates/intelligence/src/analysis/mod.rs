//! Funnel health analysis over a whole article set.
//!
//! Read-only reports: topic alignment of curated links, bottlenecked targets,
//! per-topic stage coverage, and near-duplicate titles. [`analyze_funnel`]
//! rolls the first three into a [`FunnelReport`] with graded issues.

mod alignment;
mod bottlenecks;
mod duplicates;

pub use alignment::{
    suggest_topic_targets, topic_alignment, MisalignedPath, PathEnd, SuggestedArticle,
    TopicAlignment, TopicTargets,
};
pub use bottlenecks::{
    find_bottlenecks, topic_distribution, FunnelBottleneck, StageCounts, TopicSummary,
    BOTTLENECK_MIN_SOURCES,
};
pub use duplicates::{
    find_duplicate_candidates, title_similarity, DuplicateAction, DuplicateCandidate,
};

use crate::types::{Article, FunnelStage};
use serde::Serialize;

/// A curated funnel link type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LinkKind {
    /// `points_to_mofu_id`.
    #[serde(rename = "TOFU->MOFU")]
    TofuToMofu,
    /// `points_to_bofu_id`.
    #[serde(rename = "MOFU->BOFU")]
    MofuToBofu,
}

impl LinkKind {
    /// Label used in reports and JSON, e.g. `TOFU->MOFU`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::TofuToMofu => "TOFU->MOFU",
            LinkKind::MofuToBofu => "MOFU->BOFU",
        }
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifying fields of an article, for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    /// Article id.
    pub id: String,
    /// Article slug.
    pub slug: String,
    /// Headline.
    pub title: String,
    /// Topic label.
    pub topic: String,
    /// Funnel stage.
    pub funnel_stage: FunnelStage,
}

impl From<&Article> for ArticleSummary {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            slug: article.slug.clone(),
            title: article.title.clone(),
            topic: article.topic.clone(),
            funnel_stage: article.funnel_stage,
        }
    }
}

/// Severity level for funnel issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// A link that leads nowhere.
    Error,
    /// Works, but hurts the reader's journey.
    Warning,
    /// Coverage gap worth knowing about.
    Info,
}

/// A single funnel health finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisIssue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Article slug or topic the issue is about, if any.
    pub subject: Option<String>,
}

impl AnalysisIssue {
    /// Create an error-level issue.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning-level issue.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create an info-level issue.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            subject: None,
        }
    }

    /// Attach the article slug or topic the issue concerns.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Combined funnel health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelReport {
    /// Topic alignment of curated links.
    pub alignment: TopicAlignment,
    /// Overloaded link targets.
    pub bottlenecks: Vec<FunnelBottleneck>,
    /// Per-topic stage coverage.
    pub topics: Vec<TopicSummary>,
    /// Issues ordered by severity, then discovery order.
    pub issues: Vec<AnalysisIssue>,
}

impl FunnelReport {
    /// Returns true if any error-level issue was found.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of error-level issues.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

/// Run alignment, bottleneck and coverage analysis over `articles`.
pub fn analyze_funnel(articles: &[Article]) -> FunnelReport {
    let alignment = topic_alignment(articles);
    let bottlenecks = find_bottlenecks(articles);
    let topics = topic_distribution(articles);

    let mut issues = Vec::new();
    for path in &alignment.misaligned_paths {
        let issue = match &path.to {
            None => AnalysisIssue::error(format!(
                "{} link from '{}' points to a missing article",
                path.kind, path.from.slug
            )),
            Some(to) => AnalysisIssue::warning(format!(
                "{} link from '{}' ({}) crosses into '{}' ({})",
                path.kind, path.from.slug, path.from.topic, to.slug, to.topic
            )),
        };
        issues.push(issue.with_subject(path.from.slug.clone()));
    }

    for bottleneck in &bottlenecks {
        issues.push(
            AnalysisIssue::warning(format!(
                "{} articles funnel into '{}' via {}",
                bottleneck.source_count, bottleneck.target_article.slug, bottleneck.kind
            ))
            .with_subject(bottleneck.target_article.slug.clone()),
        );
    }

    for topic in &topics {
        for stage in &topic.missing_stages {
            issues.push(
                AnalysisIssue::info(format!("Topic '{}' has no {} articles", topic.topic, stage))
                    .with_subject(topic.topic.clone()),
            );
        }
    }

    issues.sort_by_key(|i| i.severity);

    tracing::debug!(
        target: "primehomes::analysis",
        articles = articles.len(),
        alignment = alignment.alignment_score,
        bottlenecks = bottlenecks.len(),
        issues = issues.len(),
        "Analyzed funnel"
    );

    FunnelReport {
        alignment,
        bottlenecks,
        topics,
        issues,
    }
}
