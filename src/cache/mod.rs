//! Alias embedding cache.

pub mod alias;

#[cfg(test)]
mod alias_tests;

pub use alias::{AliasEmbeddingCache, normalize_alias_key};
