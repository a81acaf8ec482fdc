use crate::application::indicators::IndicatorService;
use crate::config::IndicatorEnvConfig;
use crate::domain::errors::AnalysisError;
use crate::domain::market::PriceBar;
use crate::domain::performance::metrics::{PerformanceSummary, ReturnPath};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the `<TICKER>_with_analysis.csv` artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    pub date: NaiveDate,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "SMA_20")]
    pub sma_fast: Option<f64>,
    #[serde(rename = "SMA_50")]
    pub sma_slow: Option<f64>,
    #[serde(rename = "EMA_20")]
    pub ema: Option<f64>,
    #[serde(rename = "RSI_14")]
    pub rsi: Option<f64>,
    #[serde(rename = "MACD_Line")]
    pub macd_line: Option<f64>,
    #[serde(rename = "MACD_Signal")]
    pub macd_signal: Option<f64>,
    #[serde(rename = "MACD_Hist")]
    pub macd_hist: Option<f64>,
    #[serde(rename = "Daily_Return")]
    pub daily_return: Option<f64>,
    #[serde(rename = "Cumulative_Returns")]
    pub cumulative_return: Option<f64>,
    #[serde(rename = "Peak")]
    pub peak: Option<f64>,
    #[serde(rename = "Drawdown")]
    pub drawdown: Option<f64>,
    #[serde(rename = "Rolling_Sharpe")]
    pub rolling_sharpe: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceAnalysis {
    pub rows: Vec<AnalysisRow>,
    pub summary: PerformanceSummary,
}

/// Indicators and return metrics for a ticker's price history.
pub struct PriceAnalyzer {
    config: IndicatorEnvConfig,
}

impl PriceAnalyzer {
    pub fn new(config: &IndicatorEnvConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// `bars` must be sorted by date, as `PriceReader` returns them.
    pub fn analyze(&self, ticker: &str, bars: &[PriceBar]) -> Result<PriceAnalysis, AnalysisError> {
        if bars.is_empty() {
            return Err(AnalysisError::insufficient(ticker, "no price rows"));
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let indicators = IndicatorService::compute(&self.config, &closes)?;
        let path = ReturnPath::from_closes(&closes, self.config.rolling_sharpe_window);

        let rows = bars
            .iter()
            .zip(indicators)
            .enumerate()
            .map(|(i, (bar, ind))| AnalysisRow {
                date: bar.date,
                close: bar.close,
                sma_fast: ind.sma_fast,
                sma_slow: ind.sma_slow,
                ema: ind.ema,
                rsi: ind.rsi,
                macd_line: ind.macd_line,
                macd_signal: ind.macd_signal,
                macd_hist: ind.macd_hist,
                daily_return: path.daily_returns[i],
                cumulative_return: path.cumulative_returns[i],
                peak: path.peaks[i],
                drawdown: path.drawdowns[i],
                rolling_sharpe: path.rolling_sharpe[i],
            })
            .collect();

        Ok(PriceAnalysis {
            rows,
            summary: path.summarize(ticker),
        })
    }
}
