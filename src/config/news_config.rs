//! News feed configuration.
//!
//! Column names are matched against trimmed CSV headers. Unless an explicit
//! path is set, the feed is `news_file_name` inside the data directory.

use crate::domain::news::{DEFAULT_DATE_FORMATS, TimestampParser};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// News feed environment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsEnvConfig {
    pub news_path: Option<PathBuf>,
    pub news_file_name: String,
    pub entity_column: String,
    pub text_column: String,
    pub date_column: String,
    pub date_formats: Vec<String>,
}

impl Default for NewsEnvConfig {
    fn default() -> Self {
        Self {
            news_path: None,
            news_file_name: "raw_analyst_ratings.csv".to_string(),
            entity_column: "stock".to_string(),
            text_column: "headline".to_string(),
            date_column: "date".to_string(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl NewsEnvConfig {
    pub fn apply_env<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("NEWS_PATH") {
            self.news_path = Some(PathBuf::from(path));
        }
        if let Some(name) = lookup("NEWS_FILE_NAME") {
            self.news_file_name = name.trim().to_string();
        }
        if let Some(column) = lookup("NEWS_ENTITY_COLUMN") {
            self.entity_column = column.trim().to_string();
        }
        if let Some(column) = lookup("NEWS_TEXT_COLUMN") {
            self.text_column = column.trim().to_string();
        }
        if let Some(column) = lookup("NEWS_DATE_COLUMN") {
            self.date_column = column.trim().to_string();
        }
        // Formats are '|' separated since strftime patterns may contain commas
        if let Some(formats) = lookup("NEWS_DATE_FORMATS") {
            let parsed: Vec<String> = formats
                .split('|')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
            if parsed.is_empty() {
                anyhow::bail!("NEWS_DATE_FORMATS must list at least one format");
            }
            self.date_formats = parsed;
        }
        Ok(())
    }

    pub fn resolve_path(&self, data_dir: &Path) -> PathBuf {
        self.news_path
            .clone()
            .unwrap_or_else(|| data_dir.join(&self.news_file_name))
    }

    pub fn timestamp_parser(&self) -> TimestampParser {
        TimestampParser::new(&self.date_formats)
    }
}
