//! Headline polarity scoring using VADER
//!
//! Scores come from the VADER (Valence Aware Dictionary and sEntiment Reasoner)
//! compound score, optionally nudged by equity-market keywords that the
//! general lexicon underweights.
//!
//! # Example
//! ```rust,ignore
//! use newscorr::domain::ports::SentimentScorer;
//! use newscorr::infrastructure::sentiment::VaderScorer;
//!
//! let scorer = VaderScorer::new();
//! let score = scorer.score("Apple beats estimates with record revenue");
//! assert!(score > 0.0);
//! ```

use crate::domain::ports::SentimentScorer;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Analyst-rating and earnings vocabulary with its sentiment weight.
///
/// Keywords match as substrings, so a stem already covers its inflections.
const BULLISH_KEYWORDS: &[(&str, f64)] = &[
    ("upgrade", 0.4),
    ("outperform", 0.4),
    ("overweight", 0.3),
    ("beats", 0.4),
    ("beat estimates", 0.4),
    ("raises guidance", 0.5),
    ("raises price target", 0.4),
    ("record high", 0.4),
    ("all-time high", 0.5),
    ("surge", 0.4),
    ("rally", 0.4),
    ("rallies", 0.4),
    ("soars", 0.5),
    ("bullish", 0.5),
    ("buyback", 0.2),
    ("dividend increase", 0.3),
];

const BEARISH_KEYWORDS: &[(&str, f64)] = &[
    ("downgrade", -0.4),
    ("underperform", -0.4),
    ("underweight", -0.3),
    ("misses", -0.4),
    ("missed estimates", -0.4),
    ("cuts guidance", -0.5),
    ("lowers price target", -0.4),
    ("plunge", -0.5),
    ("tumbles", -0.4),
    ("bearish", -0.5),
    ("lawsuit", -0.4),
    ("probe", -0.3),
    ("recall", -0.3),
    ("layoffs", -0.3),
    ("sell-off", -0.4),
    ("selloff", -0.4),
];

/// Headline scorer built on VADER.
///
/// Without keyword boosting the score is VADER's compound polarity as is.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
    keyword_boost: bool,
}

impl VaderScorer {
    /// Plain VADER polarity.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
            keyword_boost: false,
        }
    }

    pub fn with_keyword_boost(keyword_boost: bool) -> Self {
        Self {
            keyword_boost,
            ..Self::new()
        }
    }

    /// Sum of keyword weights found in the text.
    fn financial_boost(&self, text: &str) -> f64 {
        let text_lower = text.to_lowercase();

        BULLISH_KEYWORDS
            .iter()
            .chain(BEARISH_KEYWORDS.iter())
            .filter(|(keyword, _)| text_lower.contains(keyword))
            .map(|(_, score)| score)
            .sum()
    }

    /// Score text in [-1.0, 1.0]. Blank text is neutral.
    pub fn analyze(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let scores = self.analyzer.polarity_scores(text);
        let compound = scores["compound"];

        if !self.keyword_boost {
            return compound.clamp(-1.0, 1.0);
        }

        let combined = compound + (self.financial_boost(text) * 0.5);
        combined.clamp(-1.0, 1.0)
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn score(&self, text: &str) -> f64 {
        self.analyze(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_headlines() {
        let scorer = VaderScorer::new();

        let headlines = [
            "Apple reports great earnings and excellent growth",
            "Analysts love the strong new product lineup",
            "Investors are happy with the impressive results",
        ];

        for headline in headlines {
            let score = scorer.score(headline);
            assert!(
                score > 0.0,
                "Expected positive score for '{}', got {}",
                headline,
                score
            );
        }
    }

    #[test]
    fn test_negative_headlines() {
        let scorer = VaderScorer::new();

        let headlines = [
            "Company faces terrible losses and weak demand",
            "Investors angry after disappointing results",
            "Shares crash amid fraud allegations",
        ];

        for headline in headlines {
            let score = scorer.score(headline);
            assert!(
                score < 0.0,
                "Expected negative score for '{}', got {}",
                headline,
                score
            );
        }
    }

    #[test]
    fn test_empty_text() {
        let scorer = VaderScorer::new();
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("   "), 0.0);
    }

    #[test]
    fn test_scores_are_bounded_and_deterministic() {
        let scorer = VaderScorer::with_keyword_boost(true);
        let text = "Stock surges to record high, bullish upgrade, raises guidance, great great great!";
        let first = scorer.score(text);
        assert!((-1.0..=1.0).contains(&first));
        assert_eq!(first, scorer.score(text));
    }

    #[test]
    fn test_inflections_boost_once() {
        let scorer = VaderScorer::with_keyword_boost(true);
        assert_eq!(scorer.financial_boost("Analyst downgrades Apple"), -0.4);
        assert_eq!(scorer.financial_boost("Analyst downgrade on Apple"), -0.4);
        assert_eq!(scorer.financial_boost("Nvidia surges, upgrades pile up"), 0.8);
        assert_eq!(scorer.financial_boost("Shares plunges"), -0.5);
    }

    #[test]
    fn test_keyword_boost() {
        let plain = VaderScorer::new();
        let boosted = VaderScorer::with_keyword_boost(true);

        let text = "Morgan Stanley downgrades shares to underweight";
        assert!(
            boosted.score(text) < plain.score(text),
            "Keyword boosting should lower the score of a downgrade"
        );
    }
}
