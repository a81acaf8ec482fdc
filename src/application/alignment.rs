//! News-to-trading-day alignment.
//!
//! A headline published on calendar date `d` is attributed to the first
//! trading session strictly after `d`: the return it can influence is the
//! next close, never one realized on or before its own publication day.

use crate::domain::correlation::JoinedRow;
use crate::domain::market::{DailyReturnSeries, TradingDayIndex};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A scored headline mapped onto the trading calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedScore {
    pub published: NaiveDate,
    pub trading_date: NaiveDate,
    pub score: f64,
}

/// Map each `(published, score)` pair to its next trading day.
///
/// Returns the aligned scores and the number of pairs dropped because no
/// later session exists.
pub fn align_to_next_trading_day(
    scored: &[(NaiveDate, f64)],
    index: &TradingDayIndex,
) -> (Vec<AlignedScore>, usize) {
    let mut aligned = Vec::with_capacity(scored.len());
    let mut dropped = 0;

    for &(published, score) in scored {
        match index.next_after(published) {
            Some(trading_date) => aligned.push(AlignedScore {
                published,
                trading_date,
                score,
            }),
            None => dropped += 1,
        }
    }

    (aligned, dropped)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySentiment {
    pub mean: f64,
    pub count: usize,
}

/// Mean sentiment per trading date. Only dates with at least one aligned
/// headline are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySentiment {
    days: BTreeMap<NaiveDate, DaySentiment>,
}

impl DailySentiment {
    pub fn aggregate(aligned: &[AlignedScore]) -> Self {
        let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
        for a in aligned {
            let entry = sums.entry(a.trading_date).or_insert((0.0, 0));
            entry.0 += a.score;
            entry.1 += 1;
        }

        let days = sums
            .into_iter()
            .map(|(date, (sum, count))| {
                (
                    date,
                    DaySentiment {
                        mean: sum / count as f64,
                        count,
                    },
                )
            })
            .collect();

        Self { days }
    }

    pub fn get(&self, date: NaiveDate) -> Option<DaySentiment> {
        self.days.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Inner join with a return series. Dates whose return is undefined are
    /// removed after the join.
    pub fn join_returns(&self, returns: &DailyReturnSeries) -> Vec<JoinedRow> {
        self.days
            .iter()
            .filter_map(|(date, day)| {
                let daily_return = returns.get(*date)?;
                Some(JoinedRow {
                    date: *date,
                    avg_daily_sentiment: day.mean,
                    daily_return,
                    article_count: day.count,
                })
            })
            .collect()
    }
}
