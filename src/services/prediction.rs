//! Predictive context preparation.
//!
//! Predicts likely follow-up needs from the shared classifier predicates and
//! caches them under a hash of the request text. Predictions only warm later
//! lookups; nothing on the response path waits for them.

use crate::classifier;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::instrument;

/// Default prediction cache capacity.
pub const DEFAULT_PREDICTION_CAPACITY: usize = 1024;

/// Nominal lifetime of a cached prediction.
pub const DEFAULT_PREDICTION_TTL: Duration = Duration::from_secs(3600);

/// A predicted follow-up need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// What the user is likely to ask next.
    #[serde(rename = "type")]
    pub prediction_type: String,
    /// Heuristic likelihood in [0, 1].
    pub probability: f32,
    /// Context worth preparing for it.
    pub context_type: String,
}

impl Prediction {
    fn new(prediction_type: &str, probability: f32, context_type: &str) -> Self {
        Self {
            prediction_type: prediction_type.to_string(),
            probability,
            context_type: context_type.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedPrediction {
    predictions: Vec<Prediction>,
    cached_at: Instant,
}

/// Prediction cache keyed by request hash.
///
/// Entries carry a nominal TTL. Lookups do not check it; expired entries are
/// only removed by [`Self::sweep_expired`] or by LRU eviction.
///
/// # Lock Poisoning
///
/// Fail-open: a poisoned lock skips caching and lookups miss.
pub struct PredictiveContextEngine {
    cache: RwLock<LruCache<String, CachedPrediction>>,
    ttl: Duration,
}

impl PredictiveContextEngine {
    /// Creates an engine. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Cache key for a request: SHA-256 hex of the normalized text.
    #[must_use]
    pub fn request_key(text: &str) -> String {
        let normalized = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Predicts follow-up needs and caches the result.
    #[instrument(skip(self, text), fields(text_length = text.len()))]
    pub fn predict(&self, text: &str, user_id: &str) -> Vec<Prediction> {
        let mut predictions = Vec::new();
        if classifier::is_explanation_request(text) {
            predictions.push(Prediction::new("follow_up_question", 0.8, "conceptual_examples"));
        }
        if classifier::is_code_request(text) {
            predictions.push(Prediction::new("implementation_request", 0.7, "code_examples"));
        }

        let entry = CachedPrediction {
            predictions: predictions.clone(),
            cached_at: Instant::now(),
        };
        if let Ok(mut cache) = self.cache.write() {
            cache.put(Self::request_key(text), entry);
        } else {
            tracing::warn!("Prediction cache lock poisoned, skipping cache write");
        }

        tracing::debug!(predictions = predictions.len(), "Prepared predictive context");
        predictions
    }

    /// Cached predictions for a request, regardless of age.
    #[must_use]
    pub fn cached(&self, text: &str) -> Option<Vec<Prediction>> {
        let key = Self::request_key(text);
        let cache = self.cache.read().ok()?;
        cache.peek(&key).map(|entry| entry.predictions.clone())
    }

    /// Removes entries older than the TTL and returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let Ok(mut cache) = self.cache.write() else {
            return 0;
        };
        let expired: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| entry.cached_at.elapsed() > self.ttl)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            cache.pop(key);
        }
        drop(cache);

        if !expired.is_empty() {
            tracing::debug!(removed = expired.len(), "Swept expired predictions");
        }
        expired.len()
    }

    /// The nominal TTL.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().map_or(0, |cache| cache.len())
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PredictiveContextEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PREDICTION_CAPACITY, DEFAULT_PREDICTION_TTL)
    }
}
