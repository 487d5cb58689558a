//! Error types for the article boundary and scoring configuration.

use std::path::PathBuf;
use thiserror::Error;

/// A funnel stage string outside `TOFU`, `MOFU`, `BOFU`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown funnel stage '{0}' (expected TOFU, MOFU or BOFU)")]
pub struct UnknownStageError(pub String);

/// A scoring weight that cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid scoring weight '{name}': {value} ({reason})")]
pub struct InvalidWeightError {
    /// Name of the offending weight.
    pub name: &'static str,
    /// Rejected value.
    pub value: f64,
    /// Rule the value broke.
    pub reason: &'static str,
}

/// Errors raised while loading articles from disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON export could not be parsed.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// Path being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Markdown frontmatter could not be parsed as YAML.
    #[error("invalid frontmatter in {path}: {source}")]
    Frontmatter {
        /// Path being parsed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Walking a content directory failed.
    #[error("failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Errors surfaced by an [`ArticleSource`](crate::repository::ArticleSource).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepositoryError {
    /// The backing store could not be reached or read.
    #[error("article source unavailable: {0}")]
    Unavailable(String),

    /// Loading articles failed.
    #[error(transparent)]
    Load(#[from] LoadError),
}
