//! Article repository boundary.
//!
//! Sources hand out normalized [`Article`]s. Fetch failures are absorbed
//! here (logged, empty pool) so recommendation code never sees them.

mod frontmatter;
mod record;
mod store;

pub use frontmatter::{extract_frontmatter, parse_markdown_article};
pub use record::{normalize_records, ArticleRecord, FrontmatterRecord, LinkRecord, NextStepRecord};
pub use store::ArticleStore;

use crate::error::RepositoryError;
use crate::types::{default_language, Article};

/// Default cap on candidates fetched before scoring.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 20;

/// A queryable collection of articles.
pub trait ArticleSource {
    /// All articles in `language`, in source order.
    fn articles(&self, language: &str) -> Result<Vec<Article>, RepositoryError>;

    /// Monotonic counter that changes whenever the contents change.
    fn revision(&self) -> u64;
}

/// Candidate pool query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    /// Content language.
    pub language: String,
    /// Article to leave out (usually the current one).
    pub exclude_id: Option<String>,
    /// Maximum number of candidates; `None` for no cap.
    pub limit: Option<usize>,
}

impl Default for CandidateQuery {
    fn default() -> Self {
        Self {
            language: default_language(),
            exclude_id: None,
            limit: Some(DEFAULT_CANDIDATE_LIMIT),
        }
    }
}

impl CandidateQuery {
    /// Query for `language` with the default limit.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Leave out the article with `id`.
    pub fn excluding(mut self, id: impl Into<String>) -> Self {
        self.exclude_id = Some(id.into());
        self
    }

    /// Override the candidate limit.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Fetch a candidate pool. Source errors are logged and yield an empty pool.
pub fn fetch_candidates<S>(source: &S, query: &CandidateQuery) -> Vec<Article>
where
    S: ArticleSource + ?Sized,
{
    let articles = match source.articles(&query.language) {
        Ok(articles) => articles,
        Err(err) => {
            tracing::warn!(
                target: "primehomes::repository",
                language = %query.language,
                error = %err,
                "Failed to fetch candidate articles"
            );
            return Vec::new();
        }
    };

    let limit = query.limit.unwrap_or(usize::MAX);
    articles
        .into_iter()
        .filter(|a| query.exclude_id.as_deref() != Some(a.id.as_str()))
        .take(limit)
        .collect()
}

/// Find an article in `language` by slug or id.
pub fn find_article<S>(
    source: &S,
    language: &str,
    key: &str,
) -> Result<Option<Article>, RepositoryError>
where
    S: ArticleSource + ?Sized,
{
    let articles = source.articles(language)?;
    // Prefer a slug match: slugs are the routing key.
    let found = articles
        .iter()
        .position(|a| a.slug == key)
        .or_else(|| articles.iter().position(|a| a.id == key));
    Ok(found.map(|i| articles[i].clone()))
}
