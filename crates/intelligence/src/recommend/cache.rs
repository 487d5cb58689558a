//! Memoized recommendation results.
//!
//! Entries are keyed on the current article, the revision of the candidate
//! pool and the result cap, so a new pool revision never serves stale output.

use super::selector::RecommendationContext;
use crate::types::Article;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Default number of memoized results before the cache is flushed.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Memoization key for one recommendation pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Current article id.
    pub article_id: String,
    /// Revision of the candidate pool the result was computed from.
    pub pool_revision: u64,
    /// Result cap.
    pub max_results: usize,
}

impl CacheKey {
    /// Key for a context computed against pool revision `pool_revision`.
    pub fn for_context(ctx: &RecommendationContext<'_>, pool_revision: u64) -> Self {
        Self {
            article_id: ctx.current_article.id.clone(),
            pool_revision,
            max_results: ctx.max_results,
        }
    }
}

/// Thread-safe memo of recommendation results.
#[derive(Debug)]
pub struct RecommendationCache {
    entries: Mutex<HashMap<CacheKey, Arc<[Article]>>>,
    capacity: usize,
}

impl Default for RecommendationCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl RecommendationCache {
    /// Create a cache with [`DEFAULT_CACHE_CAPACITY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding at most `capacity` results (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Cached result for `key`, if present.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<[Article]>> {
        self.entries.lock().get(key).cloned()
    }

    /// Return the cached result for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs without the lock held; concurrent misses on the same key
    /// may both compute, and the first stored result wins.
    pub fn get_or_insert_with<F>(&self, key: CacheKey, compute: F) -> Arc<[Article]>
    where
        F: FnOnce() -> Vec<Article>,
    {
        if let Some(hit) = self.get(&key) {
            tracing::trace!(
                target: "primehomes::cache",
                article = %key.article_id,
                revision = key.pool_revision,
                "Recommendation cache hit"
            );
            return hit;
        }

        let computed: Arc<[Article]> = compute().into();

        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            tracing::debug!(
                target: "primehomes::cache",
                capacity = self.capacity,
                "Recommendation cache full, flushing"
            );
            entries.clear();
        }
        entries.entry(key).or_insert(computed).clone()
    }

    /// Drop every cached result.
    pub fn invalidate(&self) {
        self.entries.lock().clear();
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
