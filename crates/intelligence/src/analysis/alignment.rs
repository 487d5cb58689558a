//! Topic alignment of curated funnel links.

use super::{ArticleSummary, LinkKind};
use crate::funnel::progression_target;
use crate::types::{Article, FunnelStage};
use serde::Serialize;

/// One end of a funnel link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEnd {
    /// Article slug.
    pub slug: String,
    /// Article topic.
    pub topic: String,
}

/// A funnel link whose target is missing or belongs to another topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MisalignedPath {
    /// Link type.
    #[serde(rename = "type")]
    pub kind: LinkKind,
    /// Linking article.
    pub from: PathEnd,
    /// Linked article; `None` when the target does not exist.
    pub to: Option<PathEnd>,
}

/// How well curated funnel links stay within their topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicAlignment {
    /// Aligned links as a rounded percentage; 100 when there are no links.
    pub alignment_score: u8,
    /// Number of links inspected.
    pub total_links: usize,
    /// Links whose target exists and shares the source topic.
    pub aligned_links: usize,
    /// Every link that is not aligned.
    pub misaligned_paths: Vec<MisalignedPath>,
}

/// Check every `points_to_mofu_id` / `points_to_bofu_id` link in `articles`.
pub fn topic_alignment(articles: &[Article]) -> TopicAlignment {
    let mut total_links = 0;
    let mut aligned_links = 0;
    let mut misaligned_paths = Vec::new();

    for article in articles {
        let links = [
            (LinkKind::TofuToMofu, article.points_to_mofu_id.as_deref()),
            (LinkKind::MofuToBofu, article.points_to_bofu_id.as_deref()),
        ];
        for (kind, target_id) in links {
            let Some(target_id) = target_id else {
                continue;
            };
            total_links += 1;

            let target = articles.iter().find(|a| a.id == target_id);
            match target {
                Some(t) if t.topic == article.topic => aligned_links += 1,
                _ => misaligned_paths.push(MisalignedPath {
                    kind,
                    from: PathEnd {
                        slug: article.slug.clone(),
                        topic: article.topic.clone(),
                    },
                    to: target.map(|t| PathEnd {
                        slug: t.slug.clone(),
                        topic: t.topic.clone(),
                    }),
                }),
            }
        }
    }

    let alignment_score = if total_links == 0 {
        100
    } else {
        ((aligned_links as f64 / total_links as f64) * 100.0).round() as u8
    };

    TopicAlignment {
        alignment_score,
        total_links,
        aligned_links,
        misaligned_paths,
    }
}

/// An article worth writing to close a funnel gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedArticle {
    /// Proposed title.
    pub title: String,
    /// Topic it belongs to.
    pub topic: String,
    /// Stage it should be written for.
    pub stage: FunnelStage,
}

/// Same-topic follow-up articles for a stage, or a suggestion when none exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicTargets {
    /// Stage the targets sit in.
    pub stage: FunnelStage,
    /// Existing same-topic articles at the target stage.
    pub existing: Vec<ArticleSummary>,
    /// Suggested new articles (only when `existing` is empty).
    pub suggested: Vec<SuggestedArticle>,
}

/// Find follow-up targets for `topic` one stage after `source_stage`.
///
/// Returns `None` for BOFU, which has no follow-up stage.
pub fn suggest_topic_targets(
    topic: &str,
    source_stage: FunnelStage,
    articles: &[Article],
) -> Option<TopicTargets> {
    let stage = progression_target(source_stage)?;

    let existing: Vec<ArticleSummary> = articles
        .iter()
        .filter(|a| a.funnel_stage == stage && a.topic == topic)
        .map(ArticleSummary::from)
        .collect();

    let mut suggested = Vec::new();
    if existing.is_empty() {
        let title = match source_stage {
            FunnelStage::Tofu => format!(
                "Complete guide to {} considerations on Costa del Sol",
                topic.to_lowercase()
            ),
            _ => format!("{} checklist for Costa del Sol property buyers", topic),
        };
        suggested.push(SuggestedArticle {
            title,
            topic: topic.to_string(),
            stage,
        });
    }

    Some(TopicTargets {
        stage,
        existing,
        suggested,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::article;
    use crate::types::FunnelStage::{Bofu, Mofu, Tofu};

    #[test]
    fn test_no_links_scores_100() {
        let articles = vec![article("1", "Legal", Tofu)];
        let report = topic_alignment(&articles);
        assert_eq!(report.alignment_score, 100);
        assert_eq!(report.total_links, 0);
        assert!(report.misaligned_paths.is_empty());
    }

    #[test]
    fn test_mixed_alignment() {
        let articles = vec![
            article("1", "Legal", Tofu).with_mofu_link("2"),
            article("2", "Legal", Mofu).with_bofu_link("3"),
            article("3", "Lifestyle", Bofu),
            article("4", "Legal", Tofu).with_mofu_link("missing"),
        ];
        let report = topic_alignment(&articles);

        assert_eq!(report.total_links, 3);
        assert_eq!(report.aligned_links, 1);
        assert_eq!(report.alignment_score, 33);
        assert_eq!(report.misaligned_paths.len(), 2);

        let crossing = &report.misaligned_paths[0];
        assert_eq!(crossing.kind, LinkKind::MofuToBofu);
        assert_eq!(crossing.from.slug, "article-2");
        assert_eq!(crossing.to.as_ref().unwrap().topic, "Lifestyle");

        let broken = &report.misaligned_paths[1];
        assert_eq!(broken.kind, LinkKind::TofuToMofu);
        assert!(broken.to.is_none());
    }

    #[test]
    fn test_misaligned_path_serializes_type() {
        let articles = vec![article("1", "Legal", Tofu).with_mofu_link("x")];
        let report = topic_alignment(&articles);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["misalignedPaths"][0]["type"], "TOFU->MOFU");
        assert_eq!(json["alignmentScore"], 0);
    }

    #[test]
    fn test_existing_targets() {
        let articles = vec![
            article("1", "Legal", Mofu),
            article("2", "Finance", Mofu),
            article("3", "Legal", Bofu),
        ];
        let targets = suggest_topic_targets("Legal", Tofu, &articles).unwrap();
        assert_eq!(targets.stage, Mofu);
        assert_eq!(targets.existing.len(), 1);
        assert_eq!(targets.existing[0].id, "1");
        assert!(targets.suggested.is_empty());
    }

    #[test]
    fn test_suggestions_when_missing() {
        let targets = suggest_topic_targets("Healthcare", Tofu, &[]).unwrap();
        assert_eq!(
            targets.suggested[0].title,
            "Complete guide to healthcare considerations on Costa del Sol"
        );

        let targets = suggest_topic_targets("Healthcare", Mofu, &[]).unwrap();
        assert_eq!(targets.stage, Bofu);
        assert_eq!(
            targets.suggested[0].title,
            "Healthcare checklist for Costa del Sol property buyers"
        );

        assert!(suggest_topic_targets("Healthcare", Bofu, &[]).is_none());
    }
}
