/// Scores the emotional valence of a piece of text.
///
/// Implementations must be deterministic and return a value in [-1.0, 1.0];
/// blank text scores 0.0.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64,
{
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}
