//! Combined headline feed loader.
//!
//! The feed is read once per batch. Only the entity column is required at
//! load time; text and date columns are resolved when a ticker's records
//! are requested so a bad header fails that ticker rather than the batch.

use crate::config::NewsEnvConfig;
use crate::domain::errors::AnalysisError;
use crate::domain::news::{NewsRecord, TimestampParser};
use crate::infrastructure::files::headers::HeaderIndex;
use csv::StringRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct NewsFeed {
    headers: HeaderIndex,
    rows: Vec<StringRecord>,
    entity_idx: usize,
    text_column: String,
    date_column: String,
    parser: TimestampParser,
}

impl NewsFeed {
    pub fn load(path: &Path, config: &NewsEnvConfig) -> Result<Self, AnalysisError> {
        if !path.exists() {
            return Err(AnalysisError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let feed = Self::from_reader(BufReader::new(file), config)?;
        info!(
            "Loaded news feed {} ({} articles)",
            path.display(),
            feed.len()
        );
        Ok(feed)
    }

    pub fn from_reader<R: Read>(reader: R, config: &NewsEnvConfig) -> Result<Self, AnalysisError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = HeaderIndex::new(rdr.headers()?);
        debug!("News feed columns (trimmed): {:?}", headers.names());
        let entity_idx = headers.require(&config.entity_column)?;

        let mut rows = Vec::new();
        let mut malformed = 0usize;
        for result in rdr.records() {
            match result {
                Ok(record) => rows.push(record),
                Err(e) => {
                    malformed += 1;
                    debug!("Skipping malformed news row: {}", e);
                }
            }
        }
        if malformed > 0 {
            warn!("Skipped {} malformed rows in news feed", malformed);
        }

        Ok(Self {
            headers,
            rows,
            entity_idx,
            text_column: config.text_column.clone(),
            date_column: config.date_column.clone(),
            parser: config.timestamp_parser(),
        })
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    /// Typed records for one ticker.
    ///
    /// Unparseable timestamps yield `published: None` rather than an error.
    pub fn records_for(&self, entity: &str) -> Result<Vec<NewsRecord>, AnalysisError> {
        let text_idx = self.headers.require(&self.text_column)?;
        let date_idx = self.headers.require(&self.date_column)?;

        let records: Vec<NewsRecord> = self
            .rows
            .iter()
            .filter(|row| row.get(self.entity_idx).map(str::trim) == Some(entity))
            .map(|row| {
                NewsRecord::from_raw(
                    entity,
                    row.get(date_idx).unwrap_or_default(),
                    row.get(text_idx),
                    &self.parser,
                )
            })
            .collect();

        let unparsed = records.iter().filter(|r| r.published.is_none()).count();
        if unparsed > 0 {
            debug!(
                "{}: {} of {} timestamps could not be parsed",
                entity,
                unparsed,
                records.len()
            );
        }
        Ok(records)
    }
}
