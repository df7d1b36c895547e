use crate::constants::SCORE_DECIMALS;

/// Cosine similarity in `[-1.0, 1.0]`.
///
/// Returns exactly `0.0` when either vector has zero norm, or when the lengths
/// differ (callers that care check dimensions first). Accumulates in `f64`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32
}

/// Rounds a score to [`SCORE_DECIMALS`] decimal digits.
#[inline]
pub fn round_score(score: f32) -> f32 {
    let factor = 10_f64.powi(SCORE_DECIMALS);
    ((f64::from(score) * factor).round() / factor) as f32
}
