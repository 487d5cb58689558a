//! CLI command handlers for the primehomes application.

mod analyze;
mod navigation;
mod recommend;

pub(crate) use analyze::handle_analyze_command;
pub(crate) use navigation::{handle_funnel_command, handle_next_step_command};
pub(crate) use recommend::handle_recommend_command;

use crate::cli::SourceArgs;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use primehomes_intelligence::{find_article, Article, ArticleStore};
use serde::Serialize;

/// Load the article store named by `--source`.
pub(crate) fn load_store(source: &SourceArgs) -> Result<ArticleStore> {
    ArticleStore::load(&source.source)
        .with_context(|| format!("failed to load articles from {}", source.source.display()))
}

/// Language from `--language`, falling back to the config file.
pub(crate) fn resolve_language(source: &SourceArgs, config: &Config) -> String {
    source
        .language
        .clone()
        .unwrap_or_else(|| config.recommend.language.clone())
}

/// Look up an article by slug or id, failing when it does not exist.
pub(crate) fn require_article(store: &ArticleStore, language: &str, key: &str) -> Result<Article> {
    find_article(store, language, key)?
        .ok_or_else(|| anyhow!("article not found: '{key}' (language '{language}')"))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
