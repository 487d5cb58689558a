//! Loosely typed article records and their normalization into [`Article`].
//!
//! Exports from the content database and markdown frontmatter disagree on key
//! casing and sometimes carry malformed values. Every field here is optional
//! and tolerant; [`ArticleRecord::into_article`] fills in defaults so the
//! scorer only ever sees well-formed articles.

use crate::types::{default_language, Article, ArticleLink, FunnelStage, NextStep};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;

/// A raw article row as found in JSON exports or frontmatter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleRecord {
    /// Database id; may be numeric in exports.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// URL slug.
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    /// Headline.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Short summary (`description` in frontmatter).
    #[serde(default, alias = "description", deserialize_with = "lenient_string")]
    pub excerpt: Option<String>,
    /// Topic label.
    #[serde(default, deserialize_with = "lenient_string")]
    pub topic: Option<String>,
    /// Stage string, parsed case-insensitively.
    #[serde(default, alias = "funnelStage", deserialize_with = "lenient_string")]
    pub funnel_stage: Option<String>,
    /// Tags; a non-list value reads as empty.
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    /// Content language.
    #[serde(default, alias = "lang", deserialize_with = "lenient_string")]
    pub language: Option<String>,
    /// Curated MOFU link.
    #[serde(default, alias = "pointsToMofuId", deserialize_with = "lenient_string")]
    pub points_to_mofu_id: Option<String>,
    /// Curated BOFU link.
    #[serde(default, alias = "pointsToBofuId", deserialize_with = "lenient_string")]
    pub points_to_bofu_id: Option<String>,
    /// Explicit next step column.
    #[serde(default, deserialize_with = "lenient")]
    pub next_step: Option<NextStepRecord>,
    /// Frontmatter `nextStep` when the record is a markdown file.
    #[serde(default, rename = "nextStep", deserialize_with = "lenient")]
    pub frontmatter_next_step: Option<LinkRecord>,
    /// Frontmatter kept alongside a database row.
    #[serde(default, alias = "markdownFrontmatter", deserialize_with = "lenient")]
    pub markdown_frontmatter: Option<FrontmatterRecord>,
}

/// Raw explicit next step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStepRecord {
    /// Button title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Target slug.
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    /// Absolute target URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    /// Call-to-action label.
    #[serde(default, deserialize_with = "lenient_string")]
    pub cta: Option<String>,
    /// Preview text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub preview: Option<String>,
    /// Target stage string.
    #[serde(default, alias = "funnel_stage", deserialize_with = "lenient_string")]
    pub funnel_stage: Option<String>,
}

/// Raw frontmatter next-step link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkRecord {
    /// Target slug.
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    /// Target title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Target topic.
    #[serde(default, deserialize_with = "lenient_string")]
    pub topic: Option<String>,
}

/// Subset of stored markdown frontmatter that affects navigation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontmatterRecord {
    /// Frontmatter `nextStep` link.
    #[serde(default, rename = "nextStep", deserialize_with = "lenient")]
    pub next_step: Option<LinkRecord>,
}

impl ArticleRecord {
    /// Normalize into an [`Article`].
    ///
    /// Returns `None` when the record has neither an id nor a slug.
    pub fn into_article(self) -> Option<Article> {
        let (id, slug) = match (non_blank(self.id), non_blank(self.slug)) {
            (Some(id), Some(slug)) => (id, slug),
            (Some(id), None) => (id.clone(), id),
            (None, Some(slug)) => (slug.clone(), slug),
            (None, None) => {
                tracing::warn!(
                    target: "primehomes::repository",
                    title = self.title.as_deref().unwrap_or_default(),
                    "Skipping article record without id or slug"
                );
                return None;
            }
        };

        let funnel_stage = parse_stage(&id, self.funnel_stage.as_deref());
        let frontmatter_next_step = self
            .frontmatter_next_step
            .or_else(|| self.markdown_frontmatter.and_then(|fm| fm.next_step))
            .and_then(LinkRecord::into_link);

        Some(Article {
            title: self.title.unwrap_or_default(),
            excerpt: self.excerpt.unwrap_or_default(),
            topic: self.topic.map(|t| t.trim().to_string()).unwrap_or_default(),
            funnel_stage,
            tags: normalize_tags(self.tags),
            language: non_blank(self.language).unwrap_or_else(default_language),
            points_to_mofu_id: non_blank(self.points_to_mofu_id),
            points_to_bofu_id: non_blank(self.points_to_bofu_id),
            next_step: self.next_step.and_then(NextStepRecord::into_next_step),
            frontmatter_next_step,
            id,
            slug,
        })
    }
}

impl NextStepRecord {
    /// A next step needs at least a title.
    fn into_next_step(self) -> Option<NextStep> {
        let title = non_blank(self.title)?;
        Some(NextStep {
            title,
            slug: non_blank(self.slug),
            url: non_blank(self.url),
            cta: non_blank(self.cta),
            preview: non_blank(self.preview),
            funnel_stage: self
                .funnel_stage
                .and_then(|s| s.parse::<FunnelStage>().ok()),
        })
    }
}

impl LinkRecord {
    /// A link needs both a slug and a title.
    fn into_link(self) -> Option<ArticleLink> {
        Some(ArticleLink {
            slug: non_blank(self.slug)?,
            title: non_blank(self.title)?,
            topic: non_blank(self.topic),
        })
    }
}

/// Normalize a batch of records, dropping unusable ones.
pub fn normalize_records(records: impl IntoIterator<Item = ArticleRecord>) -> Vec<Article> {
    records
        .into_iter()
        .filter_map(ArticleRecord::into_article)
        .collect()
}

fn parse_stage(id: &str, raw: Option<&str>) -> FunnelStage {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return FunnelStage::default();
    };
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(
            target: "primehomes::repository",
            article = id,
            stage = raw,
            "Unrecognized funnel stage, defaulting to TOFU"
        );
        FunnelStage::default()
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim, drop blanks, dedupe keeping the first spelling.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Ignored(IgnoredAny),
}

/// Deserialize `T`, treating any value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(v) => Some(v),
        Lenient::Ignored(_) => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Other(IgnoredAny),
}

/// Accept strings and scalars (numeric ids are common); anything else is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => Some(s),
        Scalar::Integer(n) => Some(n.to_string()),
        Scalar::Float(n) => Some(n.to_string()),
        Scalar::Flag(b) => Some(b.to_string()),
        Scalar::Other(_) => None,
    })
}

/// Accept a list of scalars; any other shape yields no tags.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Lenient::<Vec<Scalar>>::deserialize(deserializer)? {
        Lenient::Value(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Scalar::Text(s) => Some(s),
                Scalar::Integer(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Lenient::Ignored(_) => Vec::new(),
    })
}
