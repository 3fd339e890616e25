//! Score cache interface.
//!
//! Metric evaluation is pure and cacheable by (ticker, metric, target year,
//! metric-set version). The cache is an explicit, injected service owned by
//! the surrounding application; the engine works identically with or without
//! one. Callers sharing a cache across concurrent runs are responsible for
//! serializing population per key; the engine does not deduplicate
//! in-flight computations itself.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::Symbol;

/// Key identifying one cached metric computation.
///
/// `metric_set_version` must be bumped whenever a metric's formula changes,
/// invalidating all previously stored scores for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Metric name.
    pub metric: String,
    /// Target calendar year the metric was aligned to.
    pub target_year: i32,
    /// Version of the metric definitions in force at computation time.
    pub metric_set_version: u32,
}

/// A cached metric result.
///
/// Unavailable results (`raw_value == None`) are cached too; recomputing a
/// known miss is as wasteful as recomputing a hit.
#[derive(Debug, Clone, Copy)]
pub struct CachedScore {
    /// The computed metric value, or `None` if unavailable.
    pub raw_value: Option<f64>,
    /// When the value was computed.
    pub computed_at: Instant,
}

/// Durable store of previously computed metric values.
///
/// Implementations must be thread-safe; the evaluator consults the cache
/// from parallel workers.
pub trait ScoreCache: Send + Sync {
    /// Looks up a previously computed score.
    fn get(&self, key: &ScoreKey) -> Option<CachedScore>;

    /// Stores a computed score.
    fn put(&self, key: ScoreKey, score: CachedScore);
}

/// In-memory [`ScoreCache`] with optional time-based eviction.
#[derive(Debug, Default)]
pub struct MemoryScoreCache {
    entries: Mutex<HashMap<ScoreKey, CachedScore>>,
    ttl: Option<Duration>,
}

impl MemoryScoreCache {
    /// Creates a cache whose entries never expire.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache whose entries expire `ttl` after computation.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScoreCache for MemoryScoreCache {
    fn get(&self, key: &ScoreKey) -> Option<CachedScore> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let score = *entries.get(key)?;
        if let Some(ttl) = self.ttl
            && score.computed_at.elapsed() > ttl
        {
            entries.remove(key);
            return None;
        }
        Some(score)
    }

    fn put(&self, key: ScoreKey, score: CachedScore) {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key, score);
    }
}
