use std::sync::Arc;

use super::alias::{AliasEmbeddingCache, normalize_alias_key};
use crate::embedding::{MockEmbedder, TextEmbedder};

fn cache() -> (Arc<MockEmbedder>, AliasEmbeddingCache<MockEmbedder>) {
    let embedder = Arc::new(MockEmbedder::new());
    let cache = AliasEmbeddingCache::new(Arc::clone(&embedder));
    (embedder, cache)
}

#[test]
fn test_normalize_alias_key() {
    assert_eq!(normalize_alias_key("  Apple Inc "), "apple inc");
    assert_eq!(normalize_alias_key("APPLE"), "apple");
    assert_eq!(normalize_alias_key("   "), "");
}

#[tokio::test]
async fn test_new_cache_is_empty() {
    let (_, cache) = cache();
    assert!(cache.is_empty().await);
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn test_case_and_whitespace_share_one_entry() {
    let (embedder, cache) = cache();

    let first = cache.get_or_compute("Apple").await.unwrap();
    let second = cache.get_or_compute("  aPPLE ").await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(embedder.call_count(), 1);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_embedder_receives_trimmed_alias() {
    let (embedder, cache) = cache();
    cache.get_or_compute("  Apple Inc  ").await.unwrap();
    assert_eq!(embedder.calls_for("Apple Inc"), 1);
}

#[tokio::test]
async fn test_distinct_aliases_get_distinct_entries() {
    let (embedder, cache) = cache();
    let apple = cache.get_or_compute("Apple").await.unwrap();
    let tesla = cache.get_or_compute("Tesla").await.unwrap();

    assert!(!Arc::ptr_eq(&apple, &tesla));
    assert_eq!(apple.len(), embedder.embedding_dim());
    assert_eq!(cache.len().await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_compute_once() {
    let (embedder, cache) = cache();
    let cache = Arc::new(cache);

    let tasks = (0..32).map(|i| {
        let cache = Arc::clone(&cache);
        let alias = if i % 2 == 0 { "Tesla" } else { " TESLA " };
        tokio::spawn(async move { cache.get_or_compute(alias).await })
    });

    let results = futures::future::join_all(tasks).await;
    let vectors: Vec<_> = results
        .into_iter()
        .map(|r| r.expect("task panicked").expect("embedding failed"))
        .collect();

    assert_eq!(embedder.call_count(), 1);
    assert!(vectors.iter().all(|v| Arc::ptr_eq(v, &vectors[0])));
}

#[tokio::test]
async fn test_failure_is_not_cached() {
    let (embedder, cache) = cache();
    embedder.fail_on("Apple");

    assert!(cache.get_or_compute("Apple").await.is_err());
    assert!(cache.is_empty().await);

    embedder.allow("Apple");
    let v = cache.get_or_compute("apple").await.unwrap();
    assert_eq!(v.len(), embedder.embedding_dim());
    assert_eq!(embedder.call_count(), 2);
    assert_eq!(cache.len().await, 1);
}
