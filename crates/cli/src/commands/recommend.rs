//! CLI handler for the `recommend` command.

use super::{load_store, print_json, require_article, resolve_language};
use crate::cli::{OutputFormat, SourceArgs};
use crate::config::Config;
use anyhow::Result;
use primehomes_intelligence::recommend::summarize_recommendations;
use primehomes_intelligence::{
    fetch_candidates, Article, ArticleSource, CacheKey, CandidateQuery, FunnelStage,
    RecommendationCache, RecommendationContext, RecommendationSelector, ScoredArticle,
};
use serde::Serialize;

/// Recommendations for one requested article.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArticleRecommendations {
    slug: String,
    title: String,
    topic: String,
    funnel_stage: FunnelStage,
    summary: String,
    recommendations: Recommendations,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Recommendations {
    Articles(Vec<Article>),
    Scored(Vec<ScoredArticle>),
}

impl Recommendations {
    fn len(&self) -> usize {
        match self {
            Recommendations::Articles(a) => a.len(),
            Recommendations::Scored(s) => s.len(),
        }
    }
}

/// Handle the `recommend` command.
pub(crate) fn handle_recommend_command(
    config: &Config,
    source: &SourceArgs,
    keys: &[String],
    max_results: Option<usize>,
    candidate_limit: Option<usize>,
    explain: bool,
    format: OutputFormat,
) -> Result<()> {
    let store = load_store(source)?;
    let language = resolve_language(source, config);
    let max_results = max_results.unwrap_or(config.recommend.max_results);
    let candidate_limit = candidate_limit.unwrap_or(config.recommend.candidate_limit);

    let selector = RecommendationSelector::from_weights(config.scoring.clone());
    // Repeated keys in one invocation reuse the first result.
    let cache = RecommendationCache::new();

    let mut results = Vec::with_capacity(keys.len());
    for key in keys {
        let current = require_article(&store, &language, key)?;
        let query = CandidateQuery::new(language.clone())
            .excluding(current.id.clone())
            .with_limit(Some(candidate_limit));
        let pool = fetch_candidates(&store, &query);
        let ctx = RecommendationContext::new(&current, &pool, max_results);

        let recommendations = if explain {
            Recommendations::Scored(selector.rank(&ctx))
        } else {
            let cache_key = CacheKey::for_context(&ctx, store.revision());
            let selected = cache.get_or_insert_with(cache_key, || selector.select(&ctx));
            Recommendations::Articles(selected.to_vec())
        };

        results.push(ArticleRecommendations {
            summary: summarize_recommendations(recommendations.len(), current.funnel_stage),
            slug: current.slug,
            title: current.title,
            topic: current.topic,
            funnel_stage: current.funnel_stage,
            recommendations,
        });
    }

    match format {
        OutputFormat::Json => print_json(&results),
        OutputFormat::Text => {
            for (i, result) in results.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_recommendations_human(result);
            }
            Ok(())
        }
    }
}

/// Print recommendations in human-readable format.
fn print_recommendations_human(result: &ArticleRecommendations) {
    println!(
        "{} [{} | {}]",
        result.title, result.funnel_stage, result.topic
    );
    println!("{}", result.summary);

    match &result.recommendations {
        Recommendations::Articles(articles) => {
            for (i, article) in articles.iter().enumerate() {
                println!(
                    "  {}. {} ({}) [{} | {}]",
                    i + 1,
                    article.title,
                    article.slug,
                    article.funnel_stage,
                    article.topic
                );
            }
        }
        Recommendations::Scored(scored) => {
            for (i, item) in scored.iter().enumerate() {
                println!(
                    "  {}. {} ({}) [{} | {}] score {:.2}",
                    i + 1,
                    item.article.title,
                    item.article.slug,
                    item.article.funnel_stage,
                    item.article.topic,
                    item.score
                );
                println!("     {}", item.explanation);
            }
        }
    }
}
