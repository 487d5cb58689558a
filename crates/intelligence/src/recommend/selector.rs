//! Recommendation selection: score, filter, stable-sort, cap.

use super::explainer::generate_explanation;
use super::scorer::{RelevanceScorer, Scorer, ScoringWeights};
use super::ScoredArticle;
use crate::types::Article;

/// Input to a recommendation pass.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationContext<'a> {
    /// Article the reader is on.
    pub current_article: &'a Article,
    /// Candidates, in the order the data layer returned them.
    pub candidate_pool: &'a [Article],
    /// Maximum number of recommendations.
    pub max_results: usize,
}

impl<'a> RecommendationContext<'a> {
    /// Build a context.
    pub fn new(
        current_article: &'a Article,
        candidate_pool: &'a [Article],
        max_results: usize,
    ) -> Self {
        Self {
            current_article,
            candidate_pool,
            max_results,
        }
    }
}

/// Selects the top candidates by relevance.
///
/// Ties keep candidate pool order. The current article is always dropped,
/// even when the caller forgot to exclude it from the pool.
#[derive(Debug, Clone)]
pub struct RecommendationSelector<S = RelevanceScorer> {
    scorer: S,
    inclusion_threshold: f64,
}

impl Default for RecommendationSelector<RelevanceScorer> {
    fn default() -> Self {
        Self::from_weights(ScoringWeights::default())
    }
}

impl RecommendationSelector<RelevanceScorer> {
    /// Selector with default weights and threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector whose scorer and threshold both come from `weights`.
    pub fn from_weights(weights: ScoringWeights) -> Self {
        let inclusion_threshold = weights.inclusion_threshold;
        Self {
            scorer: RelevanceScorer::new().with_weights(weights),
            inclusion_threshold,
        }
    }
}

impl<S: Scorer> RecommendationSelector<S> {
    /// Selector around a custom scorer, with the default threshold.
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            scorer,
            inclusion_threshold: ScoringWeights::default().inclusion_threshold,
        }
    }

    /// Override the inclusion threshold (candidates must score strictly above it).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.inclusion_threshold = threshold;
        self
    }

    /// Score, filter and order candidates, keeping the scoring detail.
    pub fn rank(&self, ctx: &RecommendationContext<'_>) -> Vec<ScoredArticle> {
        let current = ctx.current_article;
        if ctx.max_results == 0 || ctx.candidate_pool.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredArticle> = ctx
            .candidate_pool
            .iter()
            .filter(|candidate| candidate.id != current.id)
            .filter_map(|candidate| {
                let relevance = self.scorer.score(current, candidate);
                if relevance.score > self.inclusion_threshold {
                    Some(ScoredArticle {
                        article: candidate.clone(),
                        score: relevance.score,
                        score_breakdown: relevance.breakdown,
                        explanation: generate_explanation(&relevance.signals),
                        signals: relevance.signals,
                    })
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable: equal scores keep pool order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(ctx.max_results);

        tracing::debug!(
            target: "primehomes::recommend",
            article = %current.id,
            pool = ctx.candidate_pool.len(),
            selected = scored.len(),
            "Ranked related articles"
        );

        scored
    }

    /// Ordered recommendations without scoring detail.
    pub fn select(&self, ctx: &RecommendationContext<'_>) -> Vec<Article> {
        self.rank(ctx).into_iter().map(|s| s.article).collect()
    }
}

/// Recommend articles with the default scorer and threshold.
pub fn recommend(ctx: &RecommendationContext<'_>) -> Vec<Article> {
    RecommendationSelector::new().select(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::Relevance;
    use crate::test_support::article;
    use crate::types::FunnelStage::{self, Bofu, Mofu, Tofu};
    use proptest::prelude::*;

    fn ids(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.id.as_str()).collect()
    }

    /// Scores every candidate the same.
    struct FlatScorer(f64);

    impl Scorer for FlatScorer {
        fn score(&self, _current: &Article, _candidate: &Article) -> Relevance {
            Relevance {
                score: self.0,
                breakdown: Default::default(),
                signals: Vec::new(),
            }
        }
    }

    #[test]
    fn test_empty_pool_yields_empty() {
        let current = article("1", "Legal", Tofu);
        let ctx = RecommendationContext::new(&current, &[], 6);
        assert!(recommend(&ctx).is_empty());
    }

    #[test]
    fn test_zero_max_results_yields_empty() {
        let current = article("1", "Legal", Tofu);
        let pool = vec![article("2", "Legal", Mofu)];
        let ctx = RecommendationContext::new(&current, &pool, 0);
        assert!(recommend(&ctx).is_empty());
    }

    #[test]
    fn test_legal_visa_example_ranks_topic_match_first() {
        let current = article("1", "Legal", Tofu).with_tags(["visa", "NIE"]);
        let pool = vec![
            article("2", "Lifestyle", Mofu),
            article("3", "Legal", Mofu).with_tags(["visa"]),
        ];
        let ctx = RecommendationContext::new(&current, &pool, 6);

        let ranked = RecommendationSelector::new().rank(&ctx);
        assert_eq!(ranked[0].article.id, "3");
        // Lifestyle only earns the progression bonus, which clears the threshold.
        assert_eq!(ids(&recommend(&ctx)), vec!["3", "2"]);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_current_article_is_excluded() {
        let current = article("1", "Legal", Tofu);
        let pool = vec![current.clone(), article("2", "Legal", Mofu)];
        let ctx = RecommendationContext::new(&current, &pool, 6);
        assert_eq!(ids(&recommend(&ctx)), vec!["2"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let current = article("1", "Legal", Bofu);
        // Related topic, same stage: exactly 0.2, not above the threshold.
        let pool = vec![article("2", "Finance", Bofu)];
        let ctx = RecommendationContext::new(&current, &pool, 6);
        assert!(recommend(&ctx).is_empty());
    }

    #[test]
    fn test_unrelated_same_stage_candidate_is_excluded() {
        let current = article("1", "Legal", Mofu);
        let pool = vec![article("2", "Golf", Mofu)];
        let ctx = RecommendationContext::new(&current, &pool, 6);
        assert!(recommend(&ctx).is_empty());
    }

    #[test]
    fn test_cap_keeps_pool_order_for_ties() {
        let current = article("0", "Legal", Tofu);
        let pool: Vec<Article> = (1..=10)
            .map(|i| article(&i.to_string(), "Legal", Mofu))
            .collect();
        let ctx = RecommendationContext::new(&current, &pool, 3);
        assert_eq!(ids(&recommend(&ctx)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_mixed_signal_ties_keep_pool_order() {
        // Progression alone and related topic plus a tag both score 0.3.
        let current = article("0", "Legal", Tofu).with_tags(["visa"]);
        let pool = vec![
            article("F", "Golf", Mofu),
            article("E", "Finance", Tofu).with_tags(["visa"]),
        ];
        let ctx = RecommendationContext::new(&current, &pool, 6);
        assert_eq!(ids(&recommend(&ctx)), vec!["F", "E"]);

        let reversed: Vec<Article> = pool.into_iter().rev().collect();
        let ctx = RecommendationContext::new(&current, &reversed, 6);
        assert_eq!(ids(&recommend(&ctx)), vec!["E", "F"]);
    }

    #[test]
    fn test_custom_scorer_and_threshold() {
        let current = article("0", "Legal", Tofu);
        let pool = vec![article("1", "Golf", Tofu), article("2", "Golf", Tofu)];
        let ctx = RecommendationContext::new(&current, &pool, 5);

        let selector = RecommendationSelector::with_scorer(FlatScorer(0.5));
        assert_eq!(ids(&selector.select(&ctx)), vec!["1", "2"]);

        let selector = selector.with_threshold(0.5);
        assert!(selector.select(&ctx).is_empty());
    }

    #[test]
    fn test_from_weights_uses_weight_threshold() {
        let weights = ScoringWeights {
            inclusion_threshold: 0.0,
            ..ScoringWeights::default()
        };
        let current = article("1", "Legal", Bofu);
        let pool = vec![article("2", "Finance", Bofu)];
        let ctx = RecommendationContext::new(&current, &pool, 6);
        assert_eq!(
            ids(&RecommendationSelector::from_weights(weights).select(&ctx)),
            vec!["2"]
        );
    }

    #[test]
    fn test_rank_carries_explanation() {
        let current = article("1", "Legal", Tofu);
        let pool = vec![article("2", "Legal", Mofu)];
        let ctx = RecommendationContext::new(&current, &pool, 6);
        let ranked = RecommendationSelector::new().rank(&ctx);
        assert_eq!(
            ranked[0].explanation,
            "Same topic: Legal; Next step in your journey (TOFU → MOFU)"
        );
    }

    fn stage_strategy() -> impl Strategy<Value = FunnelStage> {
        prop::sample::select(FunnelStage::ALL.to_vec())
    }

    fn topic_strategy() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "Legal",
            "Finance",
            "Investment",
            "Lifestyle",
            "Healthcare",
            "Education",
            "General",
            "Golf",
        ])
    }

    fn article_strategy() -> impl Strategy<Value = Article> {
        (
            0u8..12,
            topic_strategy(),
            stage_strategy(),
            prop::collection::vec(prop::sample::select(vec!["visa", "nie", "tax", "golf"]), 0..3),
        )
            .prop_map(|(id, topic, stage, tags)| article(&id.to_string(), topic, stage).with_tags(tags))
    }

    proptest! {
        /// Property: the current article never recommends itself.
        #[test]
        fn current_never_in_output(
            current in article_strategy(),
            pool in prop::collection::vec(article_strategy(), 0..20),
            max in 0usize..8,
        ) {
            let ctx = RecommendationContext::new(&current, &pool, max);
            let out = recommend(&ctx);
            prop_assert!(out.iter().all(|a| a.id != current.id));
        }

        /// Property: output never exceeds the cap.
        #[test]
        fn output_respects_cap(
            current in article_strategy(),
            pool in prop::collection::vec(article_strategy(), 0..20),
            max in 0usize..8,
        ) {
            let ctx = RecommendationContext::new(&current, &pool, max);
            prop_assert!(recommend(&ctx).len() <= max);
        }

        /// Property: scores are non-increasing and ties preserve pool order.
        #[test]
        fn output_sorted_and_stable(
            current in article_strategy(),
            pool in prop::collection::vec(article_strategy(), 0..20),
        ) {
            let pool: Vec<Article> = pool
                .into_iter()
                .enumerate()
                .map(|(i, mut a)| {
                    a.id = format!("p{i}");
                    a
                })
                .collect();
            let position = |id: &str| pool.iter().position(|a| a.id == id);

            let ctx = RecommendationContext::new(&current, &pool, pool.len());
            let ranked = RecommendationSelector::new().rank(&ctx);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    prop_assert!(position(&pair[0].article.id) < position(&pair[1].article.id));
                }
            }
        }

        /// Property: scores stay within [0, 1] with default weights.
        #[test]
        fn scores_within_bounds(a in article_strategy(), b in article_strategy()) {
            let score = crate::recommend::score_candidate(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
