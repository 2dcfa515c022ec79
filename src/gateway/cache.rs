use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Entries kept by [`MemoryTranslationCache::default`].
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// A sentence translated once, keyed by the embedding of its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedTranslation {
    pub source_language: String,
    pub target_language: String,
    pub embedding: Vec<f32>,
    pub source_text: String,
    pub target_text: String,
}

/// Store of past translations searchable by semantic similarity
#[async_trait]
pub trait TranslationCache: Send + Sync {
    /// Closest cached translation for the language pair within `max_distance`
    /// (cosine distance), if any.
    async fn lookup(
        &self,
        source_language: &str,
        target_language: &str,
        embedding: &[f32],
        max_distance: f32,
    ) -> Result<Option<String>, anyhow::Error>;

    async fn store(&self, entry: CachedTranslation) -> Result<(), anyhow::Error>;
}

/// Cosine distance as computed by pgvector's `<=>`: `1 - cos(a, b)`.
///
/// Vectors of different length or with zero norm never match.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a * norm_b == 0.0 {
        return f32::INFINITY;
    }
    1.0 - dot / (norm_a * norm_b)
}

/// Process-local cache used when no database is configured.
///
/// Holds at most `capacity` entries; storing past that evicts the oldest.
pub struct MemoryTranslationCache {
    entries: RwLock<VecDeque<CachedTranslation>>,
    capacity: usize,
}

impl Default for MemoryTranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl MemoryTranslationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl TranslationCache for MemoryTranslationCache {
    async fn lookup(
        &self,
        source_language: &str,
        target_language: &str,
        embedding: &[f32],
        max_distance: f32,
    ) -> Result<Option<String>, anyhow::Error> {
        let entries = self.entries.read().await;
        let best = entries
            .iter()
            .filter(|e| e.source_language == source_language && e.target_language == target_language)
            .map(|e| (cosine_distance(&e.embedding, embedding), e))
            .filter(|(distance, _)| *distance <= max_distance)
            .min_by(|(a, _), (b, _)| a.total_cmp(b));

        Ok(best.map(|(_, e)| e.target_text.clone()))
    }

    async fn store(&self, entry: CachedTranslation) -> Result<(), anyhow::Error> {
        let mut entries = self.entries.write().await;
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
        Ok(())
    }
}
