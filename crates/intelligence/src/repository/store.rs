//! In-memory article store, loadable from JSON exports or markdown content.

use super::frontmatter::parse_markdown_article;
use super::record::{normalize_records, ArticleRecord};
use super::ArticleSource;
use crate::error::{LoadError, RepositoryError};
use crate::types::Article;
use std::path::Path;
use walkdir::WalkDir;

/// In-memory [`ArticleSource`].
///
/// Every mutation bumps [`revision`](ArticleSource::revision) so memoized
/// recommendations computed against an older pool are never reused.
#[derive(Debug, Clone, Default)]
pub struct ArticleStore {
    articles: Vec<Article>,
    revision: u64,
}

impl ArticleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-normalized articles.
    pub fn from_articles(articles: Vec<Article>) -> Self {
        Self {
            articles,
            revision: 0,
        }
    }

    /// Build a store from raw records, dropping unusable ones.
    pub fn from_records(records: impl IntoIterator<Item = ArticleRecord>) -> Self {
        Self::from_articles(normalize_records(records))
    }

    /// Load a JSON array of article rows.
    pub fn load_json(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<ArticleRecord> =
            serde_json::from_str(&content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let store = Self::from_records(records);
        tracing::debug!(
            target: "primehomes::repository",
            path = %path.display(),
            articles = store.len(),
            "Loaded JSON article export"
        );
        Ok(store)
    }

    /// Load every `*.md` file under `dir` that carries frontmatter.
    ///
    /// Files without frontmatter, or whose frontmatter is not valid YAML, are
    /// skipped with a warning. Files are read in path order so the resulting
    /// pool order is stable across runs.
    pub fn load_markdown_dir(dir: &Path) -> Result<Self, LoadError> {
        let mut records = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("md")
            {
                continue;
            }

            let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            match parse_markdown_article(path, &content) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => tracing::warn!(
                    target: "primehomes::repository",
                    path = %path.display(),
                    "Skipping markdown file without frontmatter"
                ),
                Err(err @ LoadError::Frontmatter { .. }) => tracing::warn!(
                    target: "primehomes::repository",
                    path = %path.display(),
                    error = %err,
                    "Skipping markdown file with invalid frontmatter"
                ),
                Err(err) => return Err(err),
            }
        }

        let store = Self::from_records(records);
        tracing::debug!(
            target: "primehomes::repository",
            dir = %dir.display(),
            articles = store.len(),
            "Loaded markdown content directory"
        );
        Ok(store)
    }

    /// Load from a JSON file or a markdown directory, depending on `path`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if path.is_dir() {
            Self::load_markdown_dir(path)
        } else {
            Self::load_json(path)
        }
    }

    /// Insert an article, replacing any existing article with the same id.
    pub fn upsert(&mut self, article: Article) {
        match self.articles.iter_mut().find(|a| a.id == article.id) {
            Some(existing) => *existing = article,
            None => self.articles.push(article),
        }
        self.revision += 1;
    }

    /// Remove an article by id. Returns true when something was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.articles.len();
        self.articles.retain(|a| a.id != id);
        let removed = self.articles.len() != before;
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// All articles, in load order.
    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    /// Number of stored articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Returns true when the store is empty.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl ArticleSource for ArticleStore {
    fn articles(&self, language: &str) -> Result<Vec<Article>, RepositoryError> {
        Ok(self
            .articles
            .iter()
            .filter(|a| a.language == language)
            .cloned()
            .collect())
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
