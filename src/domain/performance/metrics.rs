use crate::domain::performance::stats::{Stats, TRADING_DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};

/// Per-observation return path derived from a close series.
///
/// Every vector has one entry per close; the first entry of each return
/// derived column is `None` because a return needs a prior close.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnPath {
    pub daily_returns: Vec<Option<f64>>,
    pub cumulative_returns: Vec<Option<f64>>,
    pub peaks: Vec<Option<f64>>,
    pub drawdowns: Vec<Option<f64>>,
    pub rolling_sharpe: Vec<Option<f64>>,
}

/// Whole-period risk/return summary for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub ticker: String,
    pub observations: usize,
    pub annualized_return: Option<f64>,
    pub annualized_volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown: Option<f64>,
}

impl ReturnPath {
    pub fn from_closes(closes: &[f64], rolling_window: usize) -> Self {
        let daily_returns = Self::calculate_daily_returns(closes);
        let cumulative_returns = Self::calculate_cumulative_returns(&daily_returns);
        let (peaks, drawdowns) = Self::calculate_drawdowns(&cumulative_returns);
        let rolling_sharpe = Self::calculate_rolling_sharpe(&daily_returns, rolling_window);

        Self {
            daily_returns,
            cumulative_returns,
            peaks,
            drawdowns,
            rolling_sharpe,
        }
    }

    /// Percentage change against the previous close.
    pub fn calculate_daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
        let mut returns = Vec::with_capacity(closes.len());
        for i in 0..closes.len() {
            if i == 0 {
                returns.push(None);
                continue;
            }
            let prev = closes[i - 1];
            let curr = closes[i];
            if prev > 0.0 && curr.is_finite() {
                returns.push(Some(curr / prev - 1.0));
            } else {
                returns.push(None);
            }
        }
        returns
    }

    /// Running product of (1 + r). Undefined returns propagate as `None`
    /// without resetting the product.
    fn calculate_cumulative_returns(returns: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut growth = 1.0;
        returns
            .iter()
            .map(|r| {
                r.map(|r| {
                    growth *= 1.0 + r;
                    growth
                })
            })
            .collect()
    }

    fn calculate_drawdowns(cumulative: &[Option<f64>]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
        let mut peak: Option<f64> = None;
        let mut peaks = Vec::with_capacity(cumulative.len());
        let mut drawdowns = Vec::with_capacity(cumulative.len());

        for value in cumulative {
            match value {
                Some(v) => {
                    let p = peak.map_or(*v, |p| p.max(*v));
                    peak = Some(p);
                    peaks.push(Some(p));
                    drawdowns.push((p > 0.0).then(|| (v - p) / p));
                }
                None => {
                    peaks.push(None);
                    drawdowns.push(None);
                }
            }
        }

        (peaks, drawdowns)
    }

    fn calculate_rolling_sharpe(returns: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
        if window < 2 {
            return vec![None; returns.len()];
        }

        (0..returns.len())
            .map(|i| {
                if i + 1 < window {
                    return None;
                }
                let slice: Option<Vec<f64>> = returns[i + 1 - window..=i].iter().copied().collect();
                slice.and_then(|s| Stats::sharpe_ratio(&s, true))
            })
            .collect()
    }

    pub fn max_drawdown(&self) -> Option<f64> {
        self.drawdowns.iter().flatten().copied().reduce(f64::min)
    }

    pub fn summarize(&self, ticker: &str) -> PerformanceSummary {
        let returns: Vec<f64> = self.daily_returns.iter().flatten().copied().collect();

        let annualized_volatility =
            Stats::std_dev(&returns).map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt());
        let annualized_return = Stats::mean(&returns).map(|m| m * TRADING_DAYS_PER_YEAR);
        let sharpe_ratio = match (annualized_return, annualized_volatility) {
            (Some(ret), Some(vol)) if vol > 1e-12 => Some(ret / vol),
            _ => None,
        };

        PerformanceSummary {
            ticker: ticker.to_string(),
            observations: self.daily_returns.len(),
            annualized_return,
            annualized_volatility,
            sharpe_ratio,
            max_drawdown: self.max_drawdown(),
        }
    }
}
