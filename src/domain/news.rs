use crate::domain::errors::AnalysisError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp layouts seen in analyst-rating and headline dumps.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y",
];

/// A single headline attributed to one ticker.
///
/// `published` is `None` when the raw timestamp could not be read; such
/// records are carried to the engine so they can be counted, then dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub entity_id: String,
    pub published: Option<NaiveDate>,
    pub text: Option<String>,
}

impl NewsRecord {
    pub fn new(entity_id: &str, published: Option<NaiveDate>, text: Option<&str>) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            published,
            text: text.map(str::to_string),
        }
    }

    /// Build a record from raw feed cells, normalizing the timestamp.
    pub fn from_raw(
        entity_id: &str,
        raw_timestamp: &str,
        text: Option<&str>,
        parser: &TimestampParser,
    ) -> Self {
        let text = text.map(str::trim).filter(|t| !t.is_empty());
        Self::new(entity_id, parser.parse(raw_timestamp).ok(), text)
    }
}

/// Parses heterogeneous timestamp strings down to a calendar date.
///
/// The date is the one written in the string: time of day and UTC offset
/// are discarded, not converted.
#[derive(Debug, Clone)]
pub struct TimestampParser {
    formats: Vec<String>,
}

impl TimestampParser {
    pub fn new(formats: &[String]) -> Self {
        Self {
            formats: formats.to_vec(),
        }
    }

    pub fn parse(&self, raw: &str) -> Result<NaiveDate, AnalysisError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::TimestampParse {
                raw: raw.to_string(),
            });
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.date_naive());
        }

        for fmt in &self.formats {
            if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
                return Ok(dt.date_naive());
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Ok(dt.date());
            }
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Ok(date);
            }
        }

        Err(AnalysisError::TimestampParse {
            raw: raw.to_string(),
        })
    }
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}
