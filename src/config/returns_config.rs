//! Return series input configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const TICKER_PLACEHOLDER: &str = "{ticker}";

/// Where the correlation batch finds each ticker's daily returns.
///
/// Without a template the price batch artifact under `output_dir` is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnsEnvConfig {
    /// Path with a `{ticker}` placeholder.
    pub returns_path_template: Option<String>,
    pub date_column: String,
    pub return_column: String,
}

impl Default for ReturnsEnvConfig {
    fn default() -> Self {
        Self {
            returns_path_template: None,
            date_column: "date".to_string(),
            return_column: "Daily_Return".to_string(),
        }
    }
}

impl ReturnsEnvConfig {
    pub fn apply_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(template) = lookup("RETURNS_PATH_TEMPLATE") {
            self.returns_path_template = Some(template);
        }
        if let Some(column) = lookup("RETURNS_DATE_COLUMN") {
            self.date_column = column.trim().to_string();
        }
        if let Some(column) = lookup("RETURNS_VALUE_COLUMN") {
            self.return_column = column.trim().to_string();
        }
    }

    /// Path from the explicit template, if one is configured.
    pub fn templated_path(&self, ticker: &str) -> Option<PathBuf> {
        self.returns_path_template
            .as_ref()
            .map(|template| PathBuf::from(template.replace(TICKER_PLACEHOLDER, ticker)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_template_by_default() {
        let config = ReturnsEnvConfig::default();
        assert_eq!(config.templated_path("MSFT"), None);
    }

    #[test]
    fn test_returns_config_env_overrides() {
        let lookup = |key: &str| match key {
            "RETURNS_PATH_TEMPLATE" => Some("/tmp/{ticker}/returns.csv".to_string()),
            "RETURNS_VALUE_COLUMN" => Some("ret".to_string()),
            _ => None,
        };
        let mut config = ReturnsEnvConfig::default();
        config.apply_env(&lookup);

        assert_eq!(
            config.templated_path("AAPL"),
            Some(PathBuf::from("/tmp/AAPL/returns.csv"))
        );
        assert_eq!(config.return_column, "ret");
        assert_eq!(config.date_column, "date");
    }
}
