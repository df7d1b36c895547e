//! BLAKE3 helpers.
//!
//! Used by the stub embedder to place tokens into feature-hash buckets. Nothing here is
//! security sensitive.

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Only the first 8 bytes of the digest are kept. For bucketing a few thousand distinct
/// tokens that is far more entropy than needed.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Hashes a token into a bucket index in `0..buckets`.
///
/// Returns `0` when `buckets` is zero.
#[inline]
pub fn hash_token(token: &str, buckets: usize) -> usize {
    if buckets == 0 {
        return 0;
    }
    (hash_to_u64(token.as_bytes()) % buckets as u64) as usize
}

/// Splits text into lowercase alphanumeric tokens.
pub fn tokenize_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_to_u64_deterministic() {
        assert_eq!(hash_to_u64(b"apple"), hash_to_u64(b"apple"));
        assert_ne!(hash_to_u64(b"apple"), hash_to_u64(b"tesla"));
    }

    #[test]
    fn test_hash_token_in_range() {
        for token in ["apple", "iphone", "tesla", "record", "sales"] {
            assert!(hash_token(token, 384) < 384);
        }
    }

    #[test]
    fn test_hash_token_zero_buckets() {
        assert_eq!(hash_token("apple", 0), 0);
    }

    #[test]
    fn test_tokenize_words() {
        let tokens: Vec<String> = tokenize_words("Apple's Q3: record iPhone-sales!").collect();
        assert_eq!(tokens, vec!["apple", "s", "q3", "record", "iphone", "sales"]);
    }

    #[test]
    fn test_tokenize_words_empty() {
        assert_eq!(tokenize_words("  ,.; ").count(), 0);
    }
}
