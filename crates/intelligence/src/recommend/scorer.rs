//! Multi-signal relevance scoring.
//!
//! Scores live on a fractional scale: each signal adds a non-negative weight
//! and the sum is clamped to [`ScoringWeights::max_score`].

use super::keywords::{shared_tags, title_keyword_matches};
use super::topics::is_related_topic;
use super::{RelevanceSignal, ScoreBreakdown};
use crate::error::InvalidWeightError;
use crate::funnel::is_progression;
use crate::types::Article;
use serde::{Deserialize, Serialize};

/// Default weights for the relevance signals.
const TOPIC_MATCH_WEIGHT: f64 = 0.4;
const RELATED_TOPIC_WEIGHT: f64 = 0.2;
const FUNNEL_PROGRESSION_WEIGHT: f64 = 0.3;
const STAGE_SHIFT_WEIGHT: f64 = 0.1;
const SHARED_TAG_WEIGHT: f64 = 0.1;
const TITLE_KEYWORD_WEIGHT: f64 = 0.2;
const INCLUSION_THRESHOLD: f64 = 0.2;
const MAX_SCORE: f64 = 1.0;

/// Scores are rounded to this many steps per unit so equal weight sums compare
/// equal regardless of the order they were added in.
const SCORE_RESOLUTION: f64 = 1e6;

/// Tunable weights for [`RelevanceScorer`].
///
/// Deserializes from a partial table; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Added when both articles share a topic.
    pub topic_match: f64,
    /// Added when the candidate topic is adjacent to the current one.
    pub related_topic: f64,
    /// Added when the candidate is the next funnel stage.
    pub funnel_progression: f64,
    /// Added when stages differ without being a progression.
    pub stage_shift: f64,
    /// Added per shared tag.
    pub shared_tag: f64,
    /// Added per candidate title word matching the current topic.
    pub title_keyword: f64,
    /// Candidates must score strictly above this to be recommended.
    pub inclusion_threshold: f64,
    /// Ceiling applied to the combined score.
    pub max_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            topic_match: TOPIC_MATCH_WEIGHT,
            related_topic: RELATED_TOPIC_WEIGHT,
            funnel_progression: FUNNEL_PROGRESSION_WEIGHT,
            stage_shift: STAGE_SHIFT_WEIGHT,
            shared_tag: SHARED_TAG_WEIGHT,
            title_keyword: TITLE_KEYWORD_WEIGHT,
            inclusion_threshold: INCLUSION_THRESHOLD,
            max_score: MAX_SCORE,
        }
    }
}

impl ScoringWeights {
    /// Reject negative or non-finite values, and a related-topic weight above
    /// the exact topic weight.
    pub fn validate(&self) -> Result<(), InvalidWeightError> {
        let fields = [
            ("topic_match", self.topic_match),
            ("related_topic", self.related_topic),
            ("funnel_progression", self.funnel_progression),
            ("stage_shift", self.stage_shift),
            ("shared_tag", self.shared_tag),
            ("title_keyword", self.title_keyword),
            ("inclusion_threshold", self.inclusion_threshold),
            ("max_score", self.max_score),
        ];
        if let Some((name, value)) = fields
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(InvalidWeightError {
                name,
                value,
                reason: "must be finite and >= 0",
            });
        }

        if self.related_topic > self.topic_match {
            return Err(InvalidWeightError {
                name: "related_topic",
                value: self.related_topic,
                reason: "must not exceed topic_match",
            });
        }
        Ok(())
    }
}

/// Score and contributing signals for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Relevance {
    /// Combined, clamped score.
    pub score: f64,
    /// Per-component breakdown (unclamped).
    pub breakdown: ScoreBreakdown,
    /// Signals that fired.
    pub signals: Vec<RelevanceSignal>,
}

/// Trait for computing candidate relevance.
pub trait Scorer {
    /// Score `candidate` relative to `current`.
    fn score(&self, current: &Article, candidate: &Article) -> Relevance;
}

/// Scorer combining topic, funnel, tag and title signals.
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
}

impl RelevanceScorer {
    /// Create a scorer with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Active weights.
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Detect which signals apply to `candidate`.
    pub fn collect_signals(&self, current: &Article, candidate: &Article) -> Vec<RelevanceSignal> {
        let mut signals = Vec::new();

        if candidate.topic == current.topic {
            signals.push(RelevanceSignal::TopicMatch {
                topic: current.topic.clone(),
            });
        } else if is_related_topic(&current.topic, &candidate.topic) {
            signals.push(RelevanceSignal::RelatedTopic {
                current: current.topic.clone(),
                candidate: candidate.topic.clone(),
            });
        }

        let (from, to) = (current.funnel_stage, candidate.funnel_stage);
        if is_progression(from, to) {
            signals.push(RelevanceSignal::FunnelProgression { from, to });
        } else if from != to {
            signals.push(RelevanceSignal::StageShift { from, to });
        }

        let tags = shared_tags(&current.tags, &candidate.tags);
        if !tags.is_empty() {
            signals.push(RelevanceSignal::SharedTags { tags });
        }

        let keywords = title_keyword_matches(&candidate.title, &current.topic);
        if !keywords.is_empty() {
            signals.push(RelevanceSignal::TitleKeywords { keywords });
        }

        signals
    }

    /// Fold signals into a breakdown using the active weights.
    pub fn breakdown(&self, signals: &[RelevanceSignal]) -> ScoreBreakdown {
        let w = &self.weights;
        let mut breakdown = ScoreBreakdown::default();

        for signal in signals {
            match signal {
                RelevanceSignal::TopicMatch { .. } => breakdown.topic_score += w.topic_match,
                RelevanceSignal::RelatedTopic { .. } => breakdown.topic_score += w.related_topic,
                RelevanceSignal::FunnelProgression { .. } => {
                    breakdown.funnel_score += w.funnel_progression;
                }
                RelevanceSignal::StageShift { .. } => breakdown.funnel_score += w.stage_shift,
                RelevanceSignal::SharedTags { tags } => {
                    breakdown.tag_score += w.shared_tag * tags.len() as f64;
                }
                RelevanceSignal::TitleKeywords { keywords } => {
                    breakdown.keyword_score += w.title_keyword * keywords.len() as f64;
                }
            }
        }

        breakdown
    }
}

impl Scorer for RelevanceScorer {
    fn score(&self, current: &Article, candidate: &Article) -> Relevance {
        let signals = self.collect_signals(current, candidate);
        let breakdown = self.breakdown(&signals);
        let score = sanitise(breakdown.total(), self.weights.max_score);

        Relevance {
            score,
            breakdown,
            signals,
        }
    }
}

/// Score `candidate` against `current` with the default weights.
pub fn score_candidate(current: &Article, candidate: &Article) -> f64 {
    RelevanceScorer::new().score(current, candidate).score
}

/// Clamp to `[0.0, ceiling]` and round to [`SCORE_RESOLUTION`]; non-finite
/// values collapse to 0.0.
fn sanitise(score: f64, ceiling: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    let clamped = score.clamp(0.0, ceiling.max(0.0));
    (clamped * SCORE_RESOLUTION).round() / SCORE_RESOLUTION
}
