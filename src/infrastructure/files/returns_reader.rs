use crate::config::ReturnsEnvConfig;
use crate::domain::errors::AnalysisError;
use crate::domain::market::DailyReturnSeries;
use crate::domain::news::TimestampParser;
use crate::infrastructure::files::headers::HeaderIndex;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Loads a `(date, daily_return)` series written by the price batch.
///
/// Every parseable date becomes a trading day. An empty or non-numeric
/// return cell is kept as an undefined return so the day still counts for
/// alignment.
pub struct ReturnsReader {
    date_column: String,
    return_column: String,
    parser: TimestampParser,
}

impl ReturnsReader {
    pub fn new(config: &ReturnsEnvConfig) -> Self {
        Self {
            date_column: config.date_column.clone(),
            return_column: config.return_column.clone(),
            parser: TimestampParser::default(),
        }
    }

    pub fn load(&self, path: &Path) -> Result<DailyReturnSeries, AnalysisError> {
        if !path.exists() {
            return Err(AnalysisError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        self.read(BufReader::new(file), &path.display().to_string())
    }

    pub fn read<R: Read>(&self, reader: R, source: &str) -> Result<DailyReturnSeries, AnalysisError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = HeaderIndex::new(rdr.headers()?);
        let date_idx = headers.require(&self.date_column)?;
        let return_idx = headers.require(&self.return_column)?;

        let mut series = DailyReturnSeries::new();
        let mut malformed = 0usize;
        let mut bad_dates = 0usize;
        let mut duplicates = 0usize;

        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    malformed += 1;
                    debug!("{}: malformed row: {}", source, e);
                    continue;
                }
            };
            let Some(date) = record
                .get(date_idx)
                .and_then(|raw| self.parser.parse(raw).ok())
            else {
                bad_dates += 1;
                continue;
            };
            let value = record
                .get(return_idx)
                .and_then(|v| v.trim().parse::<f64>().ok());

            if !series.insert(date, value) {
                duplicates += 1;
            }
        }

        if malformed > 0 {
            warn!("{}: skipped {} malformed rows", source, malformed);
        }
        if bad_dates > 0 {
            warn!("{}: dropped {} rows with unreadable dates", source, bad_dates);
        }
        if duplicates > 0 {
            warn!("{}: ignored {} duplicate dates", source, duplicates);
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_read_returns_with_undefined_first_row() {
        let csv = "\
date,Close,Daily_Return
2024-01-02,100.0,
2024-01-03,101.0,0.01
2024-01-05,99.99,-0.01
";
        let reader = ReturnsReader::new(&ReturnsEnvConfig::default());
        let series = reader.read(csv.as_bytes(), "test").unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.get(date(2024, 1, 2)), None);
        assert_eq!(series.get(date(2024, 1, 3)), Some(0.01));
        assert_eq!(
            series.trading_days().next_after(date(2024, 1, 3)),
            Some(date(2024, 1, 5))
        );
    }

    #[test]
    fn test_undecodable_row_is_skipped() {
        let mut csv = b"date,Daily_Return\n2024-01-02,\n2024-01-03,0.01\n".to_vec();
        csv.extend_from_slice(b"2024-01-04,\xff\n2024-01-05,-0.02\n");
        let reader = ReturnsReader::new(&ReturnsEnvConfig::default());
        let series = reader.read(csv.as_slice(), "test").unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.get(date(2024, 1, 3)), Some(0.01));
        assert_eq!(series.get(date(2024, 1, 4)), None);
        assert_eq!(series.get(date(2024, 1, 5)), Some(-0.02));
    }

    #[test]
    fn test_read_requires_return_column() {
        let csv = "date,Close\n2024-01-02,100.0\n";
        let reader = ReturnsReader::new(&ReturnsEnvConfig::default());
        assert!(matches!(
            reader.read(csv.as_bytes(), "test"),
            Err(AnalysisError::Schema { ref field, .. }) if field == "Daily_Return"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let reader = ReturnsReader::new(&ReturnsEnvConfig::default());
        assert!(matches!(
            reader.load(Path::new("/nonexistent/AAPL_with_analysis.csv")),
            Err(AnalysisError::MissingFile { .. })
        ));
    }
}
