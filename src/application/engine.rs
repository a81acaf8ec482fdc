use crate::application::alignment::{DailySentiment, align_to_next_trading_day};
use crate::domain::correlation::{AlignmentStats, CorrelationResult, InterpretationMode, JoinedRow};
use crate::domain::errors::AnalysisError;
use crate::domain::market::DailyReturnSeries;
use crate::domain::news::NewsRecord;
use crate::domain::performance::stats::Stats;
use crate::domain::ports::SentimentScorer;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Everything the engine derives for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationAnalysis {
    pub result: CorrelationResult,
    pub joined_rows: Vec<JoinedRow>,
    pub stats: AlignmentStats,
}

/// Aligns headline sentiment with next-session returns and correlates them.
///
/// The engine is pure: inputs are borrowed and never modified, and the
/// output is a fresh `CorrelationAnalysis`.
pub struct CorrelationEngine {
    scorer: Box<dyn SentimentScorer>,
    mode: InterpretationMode,
}

impl CorrelationEngine {
    pub fn new(scorer: Box<dyn SentimentScorer>, mode: InterpretationMode) -> Self {
        Self { scorer, mode }
    }

    pub fn mode(&self) -> InterpretationMode {
        self.mode
    }

    /// Sentiment of a single headline. Missing text is neutral.
    pub fn score_text(&self, text: Option<&str>) -> f64 {
        match text {
            Some(t) if !t.trim().is_empty() => self.scorer.score(t).clamp(-1.0, 1.0),
            _ => 0.0,
        }
    }

    /// Run alignment, aggregation, join and correlation for one entity.
    ///
    /// Records belonging to other entities are ignored. Returns
    /// `InsufficientData` when no record survives date normalization,
    /// alignment or the join; one surviving pair yields an undefined,
    /// low-confidence coefficient instead.
    pub fn compute_correlation(
        &self,
        news: &[NewsRecord],
        returns: &DailyReturnSeries,
        entity_id: &str,
    ) -> Result<CorrelationAnalysis, AnalysisError> {
        let mut stats = AlignmentStats::default();

        let own: Vec<&NewsRecord> = news.iter().filter(|r| r.entity_id == entity_id).collect();
        stats.records_in = own.len();

        let scored: Vec<(NaiveDate, f64)> = own
            .iter()
            .filter_map(|r| {
                r.published
                    .map(|date| (date, self.score_text(r.text.as_deref())))
            })
            .collect();
        stats.unparsed_dates = stats.records_in - scored.len();
        debug!(
            "{}: sentiment calculated for {} headlines ({} unparseable dates)",
            entity_id,
            scored.len(),
            stats.unparsed_dates
        );

        if scored.is_empty() {
            return Err(AnalysisError::insufficient(
                entity_id,
                "no headline has a parseable date",
            ));
        }

        let trading_days = returns.trading_days();
        let (aligned, unaligned) = align_to_next_trading_day(&scored, &trading_days);
        stats.unaligned = unaligned;
        if aligned.is_empty() {
            return Err(AnalysisError::insufficient(
                entity_id,
                "no headline could be mapped to a later trading day",
            ));
        }

        let daily = DailySentiment::aggregate(&aligned);
        stats.sentiment_days = daily.len();
        debug!(
            "{}: aggregated sentiment into {} daily scores",
            entity_id,
            daily.len()
        );

        let joined_rows = daily.join_returns(returns);
        stats.joined_days = joined_rows.len();
        if joined_rows.is_empty() {
            return Err(AnalysisError::insufficient(
                entity_id,
                "no overlapping sentiment and return dates",
            ));
        }

        let sentiment: Vec<f64> = joined_rows.iter().map(|r| r.avg_daily_sentiment).collect();
        let daily_returns: Vec<f64> = joined_rows.iter().map(|r| r.daily_return).collect();
        let coefficient = Stats::pearson(&sentiment, &daily_returns);

        let result = CorrelationResult::new(entity_id, coefficient, joined_rows.len(), self.mode);
        info!(
            "{}: {} joined days, coefficient {}",
            entity_id,
            result.sample_size,
            result
                .coefficient
                .map_or_else(|| "undefined".to_string(), |c| format!("{:.4}", c))
        );

        Ok(CorrelationAnalysis {
            result,
            joined_rows,
            stats,
        })
    }
}
