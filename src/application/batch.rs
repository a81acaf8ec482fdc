//! Batch orchestration over the configured ticker list.
//!
//! Both batches are sequential. A ticker-level failure is logged and
//! recorded, then the loop moves on; only an unusable news feed aborts the
//! correlation batch.

use crate::application::engine::CorrelationEngine;
use crate::application::price_analysis::PriceAnalyzer;
use crate::application::reporting::{
    CorrelationReport, CorrelationSummaryRow, EntityOutcome, SummaryReporter,
};
use crate::config::AnalysisConfig;
use crate::domain::correlation::{AlignmentStats, CorrelationResult};
use crate::domain::errors::AnalysisError;
use crate::domain::performance::metrics::PerformanceSummary;
use crate::infrastructure::files::{ArtifactWriter, NewsFeed, PriceReader, ReturnsReader};
use std::path::PathBuf;
use tracing::{error, info, warn};

pub const CORRELATION_RESULTS_FILE: &str = "correlation_results.csv";
pub const CORRELATION_REPORT_FILE: &str = "correlation_report.json";
pub const PERFORMANCE_SUMMARY_FILE: &str = "performance_summary.csv";

/// Per-ticker outcome of the correlation batch.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityReport {
    pub result: CorrelationResult,
    pub outcome: EntityOutcome,
    pub stats: Option<AlignmentStats>,
    pub artifact: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CorrelationBatchSummary {
    pub entities: Vec<EntityReport>,
    pub results_path: PathBuf,
    pub report_path: PathBuf,
}

impl CorrelationBatchSummary {
    pub fn analyzed(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.outcome == EntityOutcome::Analyzed)
            .count()
    }
}

pub struct CorrelationBatch {
    config: AnalysisConfig,
    engine: CorrelationEngine,
    writer: ArtifactWriter,
    reporter: SummaryReporter,
}

impl CorrelationBatch {
    pub fn new(config: &AnalysisConfig, engine: CorrelationEngine) -> Result<Self, AnalysisError> {
        Ok(Self {
            config: config.clone(),
            engine,
            writer: ArtifactWriter::new(&config.output_dir)?,
            reporter: SummaryReporter,
        })
    }

    /// Load the shared news feed and analyze every configured ticker.
    pub fn run(&self) -> Result<CorrelationBatchSummary, AnalysisError> {
        info!("Starting correlation analysis (sentiment vs. returns)");
        let feed = NewsFeed::load(&self.config.news_path(), &self.config.news).inspect_err(|e| {
            error!("News feed unavailable, aborting correlation batch: {}", e);
        })?;
        self.run_with_feed(&feed)
    }

    pub fn run_with_feed(&self, feed: &NewsFeed) -> Result<CorrelationBatchSummary, AnalysisError> {
        let entities: Vec<EntityReport> = self
            .config
            .tickers
            .iter()
            .map(|ticker| {
                info!("[Processing {}]", ticker);
                self.analyze_entity(feed, ticker)
            })
            .collect();

        let rows: Vec<CorrelationSummaryRow> = entities
            .iter()
            .map(|e| CorrelationSummaryRow::new(&e.result, e.outcome.clone()))
            .collect();

        self.reporter.print_correlation_summary(&rows);
        let results_path = self.writer.write_csv(CORRELATION_RESULTS_FILE, &rows)?;
        let report_path = self.writer.write_json(
            CORRELATION_REPORT_FILE,
            &CorrelationReport::new(self.engine.mode(), rows),
        )?;
        info!("Correlation results saved to {}", results_path.display());

        Ok(CorrelationBatchSummary {
            entities,
            results_path,
            report_path,
        })
    }

    fn analyze_entity(&self, feed: &NewsFeed, ticker: &str) -> EntityReport {
        let mode = self.engine.mode();
        let undefined = |outcome: EntityOutcome| EntityReport {
            result: CorrelationResult::undefined(ticker, mode),
            outcome,
            stats: None,
            artifact: None,
        };

        let returns_path = self.config.returns_path(ticker);
        let returns = match ReturnsReader::new(&self.config.returns).load(&returns_path) {
            Ok(series) => series,
            Err(AnalysisError::MissingFile { path }) => {
                warn!(
                    "{}: return series not found at {}. Run the price analysis first. Skipping.",
                    ticker,
                    path.display()
                );
                return undefined(EntityOutcome::MissingReturns);
            }
            Err(e) => {
                warn!("{}: failed to load return series: {}. Skipping.", ticker, e);
                return undefined(EntityOutcome::from_error(&e));
            }
        };

        let news = match feed.records_for(ticker) {
            Ok(records) => records,
            Err(e) => {
                warn!("{}: {}. Skipping.", ticker, e);
                return undefined(EntityOutcome::from_error(&e));
            }
        };
        if news.is_empty() {
            warn!(
                "{}: no news articles found in column '{}'. Recording NaN.",
                ticker, self.config.news.entity_column
            );
            return undefined(EntityOutcome::NoNews);
        }

        let analysis = match self.engine.compute_correlation(&news, &returns, ticker) {
            Ok(analysis) => analysis,
            Err(e) if e.is_entity_scoped() => {
                warn!("{}", e);
                return undefined(EntityOutcome::from_error(&e));
            }
            Err(e) => {
                error!("{}: analysis failed: {}", ticker, e);
                return undefined(EntityOutcome::from_error(&e));
            }
        };

        if analysis.result.low_confidence {
            warn!(
                "{}: coefficient undefined with {} joined day(s)",
                ticker, analysis.result.sample_size
            );
        }

        let file_name = format!("{}_sentiment_correlation_data.csv", ticker);
        let artifact = match self.writer.write_csv(&file_name, &analysis.joined_rows) {
            Ok(path) => {
                info!("{}: merged sentiment and returns saved to {}", ticker, path.display());
                Some(path)
            }
            Err(e) => {
                warn!("{}: could not write {}: {}", ticker, file_name, e);
                None
            }
        };

        EntityReport {
            result: analysis.result,
            outcome: EntityOutcome::Analyzed,
            stats: Some(analysis.stats),
            artifact,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriceBatchSummary {
    pub summaries: Vec<PerformanceSummary>,
    pub skipped: Vec<(String, String)>,
    pub summary_path: Option<PathBuf>,
}

/// Computes indicators and metrics per ticker and writes the
/// `<TICKER>_with_analysis.csv` files the correlation batch consumes.
pub struct PriceBatch {
    config: AnalysisConfig,
    reader: PriceReader,
    analyzer: PriceAnalyzer,
    writer: ArtifactWriter,
    reporter: SummaryReporter,
}

impl PriceBatch {
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        Ok(Self {
            config: config.clone(),
            reader: PriceReader::new(),
            analyzer: PriceAnalyzer::new(&config.indicators),
            writer: ArtifactWriter::new(&config.output_dir)?,
            reporter: SummaryReporter,
        })
    }

    pub fn run(&self) -> Result<PriceBatchSummary, AnalysisError> {
        info!("Starting price analysis (indicators and performance metrics)");
        let mut summaries = Vec::new();
        let mut skipped = Vec::new();

        for ticker in &self.config.tickers {
            match self.analyze_ticker(ticker) {
                Ok(summary) => summaries.push(summary),
                Err(e) if e.is_entity_scoped() => {
                    warn!("{}: {}. Skipping.", ticker, e);
                    skipped.push((ticker.clone(), e.to_string()));
                }
                Err(e) => {
                    error!("{}: price analysis failed: {}", ticker, e);
                    skipped.push((ticker.clone(), e.to_string()));
                }
            }
        }

        let summary_path = if summaries.is_empty() {
            warn!("No ticker produced a price analysis");
            None
        } else {
            self.reporter.print_performance_summary(&summaries);
            Some(self.writer.write_csv(PERFORMANCE_SUMMARY_FILE, &summaries)?)
        };

        Ok(PriceBatchSummary {
            summaries,
            skipped,
            summary_path,
        })
    }

    fn analyze_ticker(&self, ticker: &str) -> Result<PerformanceSummary, AnalysisError> {
        let bars = self.reader.load(&self.config.price_path(ticker))?;
        info!("{}: loaded {} price rows", ticker, bars.len());

        let analysis = self.analyzer.analyze(ticker, &bars)?;

        let output = self.config.analysis_output_path(ticker);
        let file_name = output
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}_with_analysis.csv", ticker));
        let path = self.writer.write_csv(&file_name, &analysis.rows)?;
        info!("{}: analysis saved to {}", ticker, path.display());

        Ok(analysis.summary)
    }
}
