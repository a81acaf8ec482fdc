use crate::domain::errors::AnalysisError;
use crate::domain::market::PriceBar;
use crate::domain::news::TimestampParser;
use crate::infrastructure::files::headers::HeaderIndex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Loads a ticker's daily OHLCV history.
///
/// Columns are located case-insensitively. Volume is optional; rows with an
/// unreadable date or close are skipped. Output is sorted by date and the
/// first row wins on duplicate dates.
pub struct PriceReader {
    parser: TimestampParser,
}

impl PriceReader {
    pub fn new() -> Self {
        Self {
            parser: TimestampParser::default(),
        }
    }

    pub fn load(&self, path: &Path) -> Result<Vec<PriceBar>, AnalysisError> {
        if !path.exists() {
            return Err(AnalysisError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        self.read(BufReader::new(file), &path.display().to_string())
    }

    pub fn read<R: Read>(&self, reader: R, source: &str) -> Result<Vec<PriceBar>, AnalysisError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = HeaderIndex::new(rdr.headers()?);

        let date_idx = headers.require_ci(&["date"])?;
        let close_idx = headers.require_ci(&["close"])?;
        let open_idx = headers.position_ci(&["open"]);
        let high_idx = headers.position_ci(&["high"]);
        let low_idx = headers.position_ci(&["low"]);
        let volume_idx = headers.position_ci(&["volume"]);

        let mut bars: BTreeMap<_, PriceBar> = BTreeMap::new();
        let mut skipped = 0usize;

        for result in rdr.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    skipped += 1;
                    debug!("{}: malformed row: {}", source, e);
                    continue;
                }
            };

            let field = |idx: Option<usize>| -> Option<f64> {
                idx.and_then(|i| record.get(i))
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite())
            };

            let date = record
                .get(date_idx)
                .and_then(|raw| self.parser.parse(raw).ok());
            let close = field(Some(close_idx));

            let (Some(date), Some(close)) = (date, close) else {
                skipped += 1;
                continue;
            };

            bars.entry(date).or_insert_with(|| PriceBar {
                date,
                open: field(open_idx).unwrap_or(close),
                high: field(high_idx).unwrap_or(close),
                low: field(low_idx).unwrap_or(close),
                close,
                volume: field(volume_idx).unwrap_or(0.0),
            });
        }

        if skipped > 0 {
            warn!("{}: skipped {} unreadable price rows", source, skipped);
        }

        Ok(bars.into_values().collect())
    }
}

impl Default for PriceReader {
    fn default() -> Self {
        Self::new()
    }
}
