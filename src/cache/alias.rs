//! Process-wide memo of alias embeddings.
//!
//! Keys are normalised (`trim` + lowercase), so `"Apple"`, `" apple "` and `"APPLE"`
//! share one entry. Entries live for the life of the process; there is no eviction.
//!
//! A single async mutex covers both the lookup and the compute-on-miss path. Two
//! requests racing on the same new alias therefore run the embedder once, and the
//! second observes the first's result. The cost is that all misses are serialised.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::embedding::{EmbeddingError, TextEmbedder};

/// Cache key for an alias.
#[inline]
pub fn normalize_alias_key(alias: &str) -> String {
    alias.trim().to_lowercase()
}

pub struct AliasEmbeddingCache<E: TextEmbedder> {
    embedder: Arc<E>,
    entries: Mutex<HashMap<String, Arc<[f32]>>>,
}

impl<E: TextEmbedder> AliasEmbeddingCache<E> {
    pub fn new(embedder: Arc<E>) -> Self {
        Self {
            embedder,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached embedding for `alias`, computing it on first use.
    ///
    /// The embedder sees the trimmed alias. On failure nothing is stored and the key
    /// stays absent, so a later call retries.
    pub async fn get_or_compute(&self, alias: &str) -> Result<Arc<[f32]>, EmbeddingError> {
        let key = normalize_alias_key(alias);
        let mut entries = self.entries.lock().await;

        if let Some(hit) = entries.get(&key) {
            return Ok(Arc::clone(hit));
        }

        let embedding: Arc<[f32]> = match self.embedder.embed(alias.trim()) {
            Ok(v) => v.into(),
            Err(e) => {
                warn!(alias = %key, error = %e, "Alias embedding failed");
                return Err(e);
            }
        };

        debug!(alias = %key, entries = entries.len() + 1, "Cached alias embedding");
        entries.insert(key, Arc::clone(&embedding));
        Ok(embedding)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub fn embedder(&self) -> &Arc<E> {
        &self.embedder
    }
}

impl<E: TextEmbedder> std::fmt::Debug for AliasEmbeddingCache<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliasEmbeddingCache")
            .field("embedding_dim", &self.embedder.embedding_dim())
            .finish_non_exhaustive()
    }
}
