//! Funnel bottlenecks and per-topic stage coverage.

use super::{ArticleSummary, LinkKind};
use crate::types::{Article, FunnelStage};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A target becomes a bottleneck when more than this many articles link to it.
pub const BOTTLENECK_MIN_SOURCES: usize = 5;

/// An article that too many upstream articles funnel into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelBottleneck {
    /// Link type.
    #[serde(rename = "type")]
    pub kind: LinkKind,
    /// Overloaded target.
    pub target_article: ArticleSummary,
    /// Number of linking articles.
    pub source_count: usize,
    /// Linking articles, in input order.
    pub source_articles: Vec<ArticleSummary>,
}

/// Find TOFU→MOFU and MOFU→BOFU targets with more than
/// [`BOTTLENECK_MIN_SOURCES`] linking articles.
///
/// Targets that do not exist in `articles` are skipped. Results list TOFU→MOFU
/// bottlenecks first, each group ordered by first appearance of the target.
pub fn find_bottlenecks(articles: &[Article]) -> Vec<FunnelBottleneck> {
    let mut bottlenecks = collect(articles, LinkKind::TofuToMofu);
    bottlenecks.extend(collect(articles, LinkKind::MofuToBofu));
    bottlenecks
}

fn collect(articles: &[Article], kind: LinkKind) -> Vec<FunnelBottleneck> {
    let (source_stage, link): (FunnelStage, fn(&Article) -> Option<&str>) = match kind {
        LinkKind::TofuToMofu => (FunnelStage::Tofu, mofu_link),
        LinkKind::MofuToBofu => (FunnelStage::Mofu, bofu_link),
    };

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Article>> = HashMap::new();
    for article in articles.iter().filter(|a| a.funnel_stage == source_stage) {
        if let Some(target) = link(article) {
            groups
                .entry(target)
                .or_insert_with(|| {
                    order.push(target);
                    Vec::new()
                })
                .push(article);
        }
    }

    order
        .into_iter()
        .filter_map(|target_id| {
            let sources = &groups[target_id];
            if sources.len() <= BOTTLENECK_MIN_SOURCES {
                return None;
            }
            let target = articles.iter().find(|a| a.id == target_id)?;
            Some(FunnelBottleneck {
                kind,
                target_article: ArticleSummary::from(target),
                source_count: sources.len(),
                source_articles: sources.iter().map(|a| ArticleSummary::from(*a)).collect(),
            })
        })
        .collect()
}

fn mofu_link(article: &Article) -> Option<&str> {
    article.points_to_mofu_id.as_deref()
}

fn bofu_link(article: &Article) -> Option<&str> {
    article.points_to_bofu_id.as_deref()
}

/// Article counts per funnel stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    /// TOFU articles.
    #[serde(rename = "TOFU")]
    pub tofu: usize,
    /// MOFU articles.
    #[serde(rename = "MOFU")]
    pub mofu: usize,
    /// BOFU articles.
    #[serde(rename = "BOFU")]
    pub bofu: usize,
}

impl StageCounts {
    /// Count for `stage`.
    pub fn get(&self, stage: FunnelStage) -> usize {
        match stage {
            FunnelStage::Tofu => self.tofu,
            FunnelStage::Mofu => self.mofu,
            FunnelStage::Bofu => self.bofu,
        }
    }

    fn increment(&mut self, stage: FunnelStage) {
        match stage {
            FunnelStage::Tofu => self.tofu += 1,
            FunnelStage::Mofu => self.mofu += 1,
            FunnelStage::Bofu => self.bofu += 1,
        }
    }
}

/// Funnel coverage for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    /// Topic label.
    pub topic: String,
    /// Articles per stage.
    pub stages: StageCounts,
    /// Stages with no articles, in journey order.
    pub missing_stages: Vec<FunnelStage>,
    /// Bottlenecks whose target or any source belongs to this topic.
    pub bottlenecks: Vec<FunnelBottleneck>,
}

/// Per-topic stage coverage, sorted by topic.
pub fn topic_distribution(articles: &[Article]) -> Vec<TopicSummary> {
    let mut counts: BTreeMap<&str, StageCounts> = BTreeMap::new();
    for article in articles {
        counts
            .entry(article.topic.as_str())
            .or_default()
            .increment(article.funnel_stage);
    }

    let bottlenecks = find_bottlenecks(articles);

    counts
        .into_iter()
        .map(|(topic, stages)| TopicSummary {
            topic: topic.to_string(),
            stages,
            missing_stages: FunnelStage::ALL
                .into_iter()
                .filter(|s| stages.get(*s) == 0)
                .collect(),
            bottlenecks: bottlenecks
                .iter()
                .filter(|b| {
                    b.target_article.topic == topic
                        || b.source_articles.iter().any(|s| s.topic == topic)
                })
                .cloned()
                .collect(),
        })
        .collect()
}
