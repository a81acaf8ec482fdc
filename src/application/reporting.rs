use crate::domain::correlation::{CorrelationResult, InterpretationMode};
use crate::domain::errors::AnalysisError;
use crate::domain::performance::metrics::PerformanceSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an entity ended up with the result it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityOutcome {
    Analyzed,
    NoNews,
    MissingReturns,
    SchemaError,
    InsufficientData,
    Failed,
}

impl EntityOutcome {
    /// Outcome recorded for a ticker whose analysis stopped on `error`.
    pub fn from_error(error: &AnalysisError) -> Self {
        match error {
            AnalysisError::MissingFile { .. } => Self::MissingReturns,
            AnalysisError::Schema { .. } => Self::SchemaError,
            AnalysisError::InsufficientData { .. } => Self::InsufficientData,
            _ => Self::Failed,
        }
    }
}

impl fmt::Display for EntityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analyzed => write!(f, "analyzed"),
            Self::NoNews => write!(f, "no_news"),
            Self::MissingReturns => write!(f, "missing_returns"),
            Self::SchemaError => write!(f, "schema_error"),
            Self::InsufficientData => write!(f, "insufficient_data"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// One line of the correlation summary artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummaryRow {
    pub entity_id: String,
    #[serde(rename = "Pearson_Correlation")]
    pub coefficient: Option<f64>,
    pub sample_size: usize,
    #[serde(rename = "Interpretation")]
    pub interpretation: String,
    pub low_confidence: bool,
    pub status: EntityOutcome,
}

impl CorrelationSummaryRow {
    pub fn new(result: &CorrelationResult, status: EntityOutcome) -> Self {
        Self {
            entity_id: result.entity_id.clone(),
            coefficient: result.coefficient,
            sample_size: result.sample_size,
            interpretation: result.interpretation.to_string(),
            low_confidence: result.low_confidence,
            status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub timestamp: DateTime<Utc>,
    pub interpretation_mode: InterpretationMode,
    pub results: Vec<CorrelationSummaryRow>,
}

impl CorrelationReport {
    pub fn new(mode: InterpretationMode, results: Vec<CorrelationSummaryRow>) -> Self {
        Self {
            timestamp: Utc::now(),
            interpretation_mode: mode,
            results,
        }
    }
}

/// Console tables for batch results.
#[derive(Default)]
pub struct SummaryReporter;

impl SummaryReporter {
    pub fn correlation_table(&self, rows: &[CorrelationSummaryRow]) -> String {
        let mut out = String::new();
        out.push_str("| Ticker | Pearson_Correlation | Days | Interpretation | Status |\n");
        out.push_str("|:-------|--------------------:|-----:|:---------------|:-------|\n");
        for row in rows {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                row.entity_id,
                fmt_opt(row.coefficient, 4),
                row.sample_size,
                row.interpretation,
                row.status
            ));
        }
        out
    }

    pub fn performance_table(&self, summaries: &[PerformanceSummary]) -> String {
        let mut out = String::new();
        out.push_str("| Ticker | Days | Ann. Return | Ann. Volatility | Sharpe | Max Drawdown |\n");
        out.push_str("|:-------|-----:|------------:|----------------:|-------:|-------------:|\n");
        for s in summaries {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                s.ticker,
                s.observations,
                fmt_pct(s.annualized_return),
                fmt_pct(s.annualized_volatility),
                fmt_opt(s.sharpe_ratio, 2),
                fmt_pct(s.max_drawdown)
            ));
        }
        out
    }

    pub fn print_correlation_summary(&self, rows: &[CorrelationSummaryRow]) {
        println!("\n{}", "=".repeat(80));
        println!("Correlation Summary (Sentiment vs. Next-Session Return)");
        println!("{}", "=".repeat(80));
        println!("{}", self.correlation_table(rows));
    }

    pub fn print_performance_summary(&self, summaries: &[PerformanceSummary]) {
        println!("\n{}", "=".repeat(80));
        println!("Performance Summary");
        println!("{}", "=".repeat(80));
        println!("{}", self.performance_table(summaries));
    }
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{:.*}", decimals, v))
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{:.2}%", v * 100.0))
}
