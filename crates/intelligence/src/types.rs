//! Common types shared across the recommendation and analysis modules.

use crate::error::UnknownStageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketing funnel stage of an article.
///
/// Stages are ordered along the reader journey: awareness (TOFU),
/// consideration (MOFU), decision (BOFU).
///
/// # Examples
///
/// ```
/// use primehomes_intelligence::FunnelStage;
///
/// let stage: FunnelStage = "mofu".parse().unwrap();
/// assert_eq!(stage, FunnelStage::Mofu);
/// assert_eq!(stage.to_string(), "MOFU");
/// assert!(FunnelStage::Tofu < FunnelStage::Bofu);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum FunnelStage {
    /// Top of funnel: awareness content.
    #[default]
    #[serde(rename = "TOFU")]
    Tofu,
    /// Middle of funnel: comparison content.
    #[serde(rename = "MOFU")]
    Mofu,
    /// Bottom of funnel: decision content.
    #[serde(rename = "BOFU")]
    Bofu,
}

impl FunnelStage {
    /// All stages in journey order.
    pub const ALL: [FunnelStage; 3] = [FunnelStage::Tofu, FunnelStage::Mofu, FunnelStage::Bofu];

    /// Canonical upper-case code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tofu => "TOFU",
            Self::Mofu => "MOFU",
            Self::Bofu => "BOFU",
        }
    }
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunnelStage {
    type Err = UnknownStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TOFU" => Ok(Self::Tofu),
            "MOFU" => Ok(Self::Mofu),
            "BOFU" => Ok(Self::Bofu),
            _ => Err(UnknownStageError(s.to_string())),
        }
    }
}

/// Lightweight pointer to another article (e.g. a frontmatter `nextStep`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleLink {
    /// Target slug.
    pub slug: String,
    /// Target title.
    pub title: String,
    /// Target topic, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// A call-to-action pointing the reader further down the funnel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    /// Display title.
    pub title: String,
    /// Target article slug, for article links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Target URL, for generic destinations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Button label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    /// Short preview text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Funnel stage the step leads to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funnel_stage: Option<FunnelStage>,
}

/// A well-formed Q&A or blog article.
///
/// Built from an [`ArticleRecord`](crate::repository::ArticleRecord) at the
/// repository boundary, so every field here is present and normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Opaque unique identifier.
    pub id: String,
    /// URL-safe routing identifier.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Short display summary.
    #[serde(default)]
    pub excerpt: String,
    /// Free-text category label (e.g. "Legal").
    #[serde(default)]
    pub topic: String,
    /// Funnel stage.
    #[serde(default)]
    pub funnel_stage: FunnelStage,
    /// Free-text labels, deduplicated.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Content language code.
    #[serde(default = "default_language")]
    pub language: String,
    /// Curated link to the MOFU article that follows this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_to_mofu_id: Option<String>,
    /// Curated link to the BOFU article that follows this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_to_bofu_id: Option<String>,
    /// Explicit next step stored with the article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<NextStep>,
    /// Next step declared in the markdown frontmatter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter_next_step: Option<ArticleLink>,
}

pub(crate) fn default_language() -> String {
    "en".to_string()
}

impl Article {
    /// Create an article with empty excerpt, no tags and language `en`.
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
        topic: impl Into<String>,
        funnel_stage: FunnelStage,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            excerpt: String::new(),
            topic: topic.into(),
            funnel_stage,
            tags: Vec::new(),
            language: default_language(),
            points_to_mofu_id: None,
            points_to_bofu_id: None,
            next_step: None,
            frontmatter_next_step: None,
        }
    }

    /// Replace the tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Set the language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Link this article to a MOFU follow-up.
    pub fn with_mofu_link(mut self, id: impl Into<String>) -> Self {
        self.points_to_mofu_id = Some(id.into());
        self
    }

    /// Link this article to a BOFU follow-up.
    pub fn with_bofu_link(mut self, id: impl Into<String>) -> Self {
        self.points_to_bofu_id = Some(id.into());
        self
    }

    /// Attach an explicit next step.
    pub fn with_next_step(mut self, step: NextStep) -> Self {
        self.next_step = Some(step);
        self
    }

    /// Attach a frontmatter-declared next step.
    pub fn with_frontmatter_next_step(mut self, link: ArticleLink) -> Self {
        self.frontmatter_next_step = Some(link);
        self
    }

    /// Returns true when `key` is this article's id or slug.
    pub fn matches_key(&self, key: &str) -> bool {
        self.id == key || self.slug == key
    }
}
