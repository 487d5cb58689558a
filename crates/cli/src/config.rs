//! Configuration file support for primehomes.
//!
//! Loads settings from `~/.primehomes/config.toml` (or the file named by
//! `--config` / `PRIMEHOMES_CONFIG`) with the following precedence:
//! CLI arguments > Config file > Built-in defaults
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.primehomes/config.toml
//!
//! [scoring]
//! topic_match = 0.4
//! related_topic = 0.2
//! funnel_progression = 0.3
//! stage_shift = 0.1
//! shared_tag = 0.1
//! title_keyword = 0.2
//! inclusion_threshold = 0.2
//! max_score = 1.0
//!
//! [recommend]
//! max_results = 6
//! candidate_limit = 20
//! language = "en"
//! ```

use anyhow::{Context, Result};
use primehomes_intelligence::{ScoringWeights, DEFAULT_CANDIDATE_LIMIT};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_MAX_RESULTS: usize = 6;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Relevance weights and threshold.
    #[serde(default)]
    pub scoring: ScoringWeights,
    /// Recommendation defaults.
    #[serde(default)]
    pub recommend: RecommendConfig,
}

/// Configuration for the recommend command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Maximum recommendations per article.
    pub max_results: usize,
    /// Candidates fetched before scoring.
    pub candidate_limit: usize,
    /// Content language.
    pub language: String,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            language: "en".to_string(),
        }
    }
}

/// Returns the path to the default config file (~/.primehomes/config.toml).
fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".primehomes").join("config.toml"))
}

/// Loads configuration.
///
/// An explicit path must exist. The default path is optional: when it is
/// missing, built-in defaults are returned.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    tracing::debug!(
        target: "primehomes::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(config)
}

/// Parses and validates configuration text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    config.scoring.validate()?;
    Ok(config)
}
