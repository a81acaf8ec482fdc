use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One daily OHLCV observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ordered, duplicate-free set of dates with a price observation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradingDayIndex {
    days: Vec<NaiveDate>,
}

impl TradingDayIndex {
    pub fn new(mut days: Vec<NaiveDate>) -> Self {
        days.sort_unstable();
        days.dedup();
        Self { days }
    }

    /// Earliest trading date strictly after `date`.
    pub fn next_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        let idx = self.days.partition_point(|d| *d <= date);
        self.days.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.days
    }
}

/// Daily returns keyed by the session's close date.
///
/// A `None` value marks an observation whose return is undefined, such as
/// the first row of a series. The key set doubles as the trading calendar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyReturnSeries {
    returns: BTreeMap<NaiveDate, Option<f64>>,
}

impl DailyReturnSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an observation. Returns false if the date was already present,
    /// in which case the earlier value is kept.
    pub fn insert(&mut self, date: NaiveDate, value: Option<f64>) -> bool {
        if self.returns.contains_key(&date) {
            return false;
        }
        let value = value.filter(|v| v.is_finite());
        self.returns.insert(date, value);
        true
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.returns.get(&date).copied().flatten()
    }

    pub fn trading_days(&self) -> TradingDayIndex {
        TradingDayIndex {
            days: self.returns.keys().copied().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.returns.iter().map(|(d, r)| (*d, *r))
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}

impl FromIterator<(NaiveDate, Option<f64>)> for DailyReturnSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Option<f64>)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (date, value) in iter {
            series.insert(date, value);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_index_sorts_and_dedups() {
        let index = TradingDayIndex::new(vec![
            date(2024, 1, 5),
            date(2024, 1, 2),
            date(2024, 1, 5),
            date(2024, 1, 3),
        ]);
        assert_eq!(
            index.as_slice(),
            &[date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 5)]
        );
    }

    #[test]
    fn test_next_after_is_strict() {
        let index = TradingDayIndex::new(vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 5)]);

        assert_eq!(index.next_after(date(2024, 1, 3)), Some(date(2024, 1, 5)));
        assert_eq!(index.next_after(date(2024, 1, 4)), Some(date(2024, 1, 5)));
        assert_eq!(index.next_after(date(2023, 12, 31)), Some(date(2024, 1, 2)));
        assert_eq!(index.next_after(date(2024, 1, 5)), None);
    }

    #[test]
    fn test_series_keeps_first_duplicate_and_filters_nan() {
        let mut series = DailyReturnSeries::new();
        assert!(series.insert(date(2024, 1, 2), None));
        assert!(series.insert(date(2024, 1, 3), Some(0.01)));
        assert!(!series.insert(date(2024, 1, 3), Some(0.99)));
        assert!(series.insert(date(2024, 1, 4), Some(f64::NAN)));

        assert_eq!(series.get(date(2024, 1, 3)), Some(0.01));
        assert_eq!(series.get(date(2024, 1, 4)), None);
        assert_eq!(series.trading_days().len(), 3);
    }
}
