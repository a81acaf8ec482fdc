//! Configuration module for newscorr.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then environment variables (a `.env` file is honored by the binary), then
//! command-line flags applied by `main`. The resulting `AnalysisConfig` is
//! passed explicitly into every batch.

mod indicator_config;
mod news_config;
mod returns_config;

pub use indicator_config::IndicatorEnvConfig;
pub use news_config::NewsEnvConfig;
pub use returns_config::{ReturnsEnvConfig, TICKER_PLACEHOLDER};

pub use crate::domain::correlation::InterpretationMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_TICKERS: &[&str] = &["AAPL", "MSFT", "AMZN", "GOOG", "META", "NVDA"];

/// Main analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // Core
    pub tickers: Vec<String>,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub interpretation_mode: InterpretationMode,
    pub finance_keyword_boost: bool,

    pub news: NewsEnvConfig,
    pub returns: ReturnsEnvConfig,
    pub indicators: IndicatorEnvConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("outputs"),
            interpretation_mode: InterpretationMode::default(),
            finance_keyword_boost: false,
            news: NewsEnvConfig::default(),
            returns: ReturnsEnvConfig::default(),
            indicators: IndicatorEnvConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(&|key: &str| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .context(format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_env<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tickers) = lookup("TICKERS") {
            self.tickers = parse_ticker_list(&tickers);
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(mode) = lookup("INTERPRETATION_MODE") {
            self.interpretation_mode = InterpretationMode::from_str(&mode)?;
        }
        if let Some(flag) = lookup("FINANCE_KEYWORD_BOOST") {
            self.finance_keyword_boost = flag
                .trim()
                .parse::<bool>()
                .context("Failed to parse FINANCE_KEYWORD_BOOST")?;
        }

        self.news
            .apply_env(lookup)
            .context("Failed to load news config")?;
        self.returns.apply_env(lookup);
        self.indicators
            .apply_env(lookup)
            .context("Failed to load indicator config")?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.tickers.is_empty() {
            anyhow::bail!("At least one ticker must be configured");
        }
        if self.news.date_formats.is_empty() {
            anyhow::bail!("At least one news date format must be configured");
        }
        if self
            .returns
            .returns_path_template
            .as_ref()
            .is_some_and(|template| !template.contains(TICKER_PLACEHOLDER))
        {
            anyhow::bail!(
                "returns_path_template must contain the {} placeholder",
                TICKER_PLACEHOLDER
            );
        }
        self.indicators.validate()
    }

    /// Raw OHLCV input for a ticker.
    pub fn price_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", ticker))
    }

    /// Indicator and metric artifact written by the price batch.
    pub fn analysis_output_path(&self, ticker: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_with_analysis.csv", ticker))
    }

    /// Return series read by the correlation batch. Defaults to the price
    /// batch artifact so both batches follow the same `output_dir`.
    pub fn returns_path(&self, ticker: &str) -> PathBuf {
        self.returns
            .templated_path(ticker)
            .unwrap_or_else(|| self.analysis_output_path(ticker))
    }

    pub fn news_path(&self) -> PathBuf {
        self.news.resolve_path(&self.data_dir)
    }
}

/// Split a comma-separated ticker list, normalizing case and whitespace.
pub fn parse_ticker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.tickers.len(), 6);
        assert_eq!(config.interpretation_mode, InterpretationMode::Explicit);
        assert_eq!(config.price_path("AAPL"), PathBuf::from("data/AAPL.csv"));
        assert_eq!(
            config.analysis_output_path("AAPL"),
            PathBuf::from("outputs/AAPL_with_analysis.csv")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TICKERS", "aapl, nvda,,"),
            ("INTERPRETATION_MODE", "legacy"),
            ("OUTPUT_DIR", "/tmp/out"),
            ("NEWS_TEXT_COLUMN", "title"),
            ("RSI_PERIOD", "21"),
        ]);
        let lookup = |key: &str| vars.get(key).map(|v| v.to_string());

        let mut config = AnalysisConfig::default();
        config.apply_env(&lookup).unwrap();

        assert_eq!(config.tickers, vec!["AAPL", "NVDA"]);
        assert_eq!(config.interpretation_mode, InterpretationMode::Legacy);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.news.text_column, "title");
        assert_eq!(config.indicators.rsi_period, 21);
    }

    #[test]
    fn test_config_invalid_mode() {
        let lookup = |key: &str| (key == "INTERPRETATION_MODE").then(|| "guess".to_string());
        let mut config = AnalysisConfig::default();
        assert!(config.apply_env(&lookup).is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            tickers = ["TSLA"]
            interpretation_mode = "legacy"

            [news]
            news_path = "feeds/headlines.csv"
            entity_column = "ticker"

            [indicators]
            rsi_period = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.tickers, vec!["TSLA"]);
        assert_eq!(config.interpretation_mode, InterpretationMode::Legacy);
        assert_eq!(config.news_path(), PathBuf::from("feeds/headlines.csv"));
        assert_eq!(config.news.entity_column, "ticker");
        assert_eq!(config.news.text_column, "headline");
        assert_eq!(config.indicators.rsi_period, 7);
        assert_eq!(config.indicators.sma_fast_period, 20);
    }

    #[test]
    fn test_toml_output_dir_is_shared_by_both_batches() {
        let config = AnalysisConfig::from_toml_str("output_dir = \"run\"").unwrap();
        assert_eq!(
            config.analysis_output_path("AAPL"),
            PathBuf::from("run/AAPL_with_analysis.csv")
        );
        assert_eq!(config.returns_path("AAPL"), config.analysis_output_path("AAPL"));
    }

    #[test]
    fn test_later_output_dir_override_moves_returns() {
        let lookup = |key: &str| (key == "OUTPUT_DIR").then(|| "a".to_string());
        let mut config = AnalysisConfig::default();
        config.apply_env(&lookup).unwrap();
        config.output_dir = PathBuf::from("b");

        assert_eq!(config.returns_path("AAPL"), PathBuf::from("b/AAPL_with_analysis.csv"));
        assert_eq!(config.returns_path("AAPL"), config.analysis_output_path("AAPL"));
    }

    #[test]
    fn test_news_path_follows_data_dir() {
        let mut config = AnalysisConfig::default();
        assert_eq!(config.news_path(), PathBuf::from("data/raw_analyst_ratings.csv"));
        config.data_dir = PathBuf::from("/srv/inputs");
        assert_eq!(
            config.news_path(),
            PathBuf::from("/srv/inputs/raw_analyst_ratings.csv")
        );
    }

    #[test]
    fn test_explicit_returns_template_is_kept() {
        let mut config = AnalysisConfig::default();
        config.returns.returns_path_template = Some("prices/{ticker}.csv".to_string());
        config.output_dir = PathBuf::from("/tmp/run2");
        assert_eq!(config.returns_path("MSFT"), PathBuf::from("prices/MSFT.csv"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = AnalysisConfig::default();
        config.tickers.clear();
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.returns.returns_path_template = Some("outputs/returns.csv".to_string());
        assert!(config.validate().is_err());
    }
}
