//! Word-weight lexicon for market news, used by the stub sentiment analyzer.

/// Keys are lowercase single words. Positive weights in `(0.0, 1.0]`, negative in
/// `[-1.0, 0.0)`. The summed score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("record", 0.4),
    ("beat", 0.4),
    ("beats", 0.4),
    ("growth", 0.3),
    ("gain", 0.3),
    ("gains", 0.3),
    ("surge", 0.5),
    ("surged", 0.5),
    ("rally", 0.4),
    ("rallied", 0.4),
    ("profit", 0.3),
    ("profits", 0.3),
    ("upgrade", 0.5),
    ("upgraded", 0.5),
    ("strong", 0.3),
    ("dividend", 0.2),
    ("bonus", 0.3),
    ("expansion", 0.3),
    ("approved", 0.4),
    ("outperform", 0.5),
    // Negative signals
    ("loss", -0.4),
    ("losses", -0.4),
    ("miss", -0.4),
    ("missed", -0.4),
    ("decline", -0.3),
    ("declined", -0.3),
    ("drop", -0.3),
    ("dropped", -0.3),
    ("plunge", -0.6),
    ("plunged", -0.6),
    ("downgrade", -0.5),
    ("downgraded", -0.5),
    ("weak", -0.3),
    ("lawsuit", -0.5),
    ("fraud", -0.7),
    ("default", -0.6),
    ("bankruptcy", -0.8),
    ("penalty", -0.4),
    ("fined", -0.4),
    ("recall", -0.5),
];

/// Scores text with [`LEXICON`].
///
/// Splits on whitespace, strips non-alphabetic edges, lowercases, sums matching weights
/// and clamps to `[-1.0, 1.0]`. Empty or unknown text scores `0.0`.
pub(crate) fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if let Some(&(_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == w) {
            score += weight;
        }
    }
    score.clamp(-1.0, 1.0)
}
