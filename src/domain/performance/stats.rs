use statrs::statistics::Statistics;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Shared statistics utilities for return and sentiment series.
pub struct Stats;

impl Stats {
    /// Pearson correlation coefficient between two equal-length samples.
    ///
    /// Returns `None` with fewer than 2 pairs, mismatched lengths, or when
    /// either side has zero variance.
    pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }

        // f64 boundary for the statistical library
        let cov = xs.iter().covariance(ys.iter());
        let std_x = xs.iter().std_dev();
        let std_y = ys.iter().std_dev();

        let denom = std_x * std_y;
        if !denom.is_finite() || denom <= f64::EPSILON * f64::EPSILON {
            return None;
        }

        let r = cov / denom;
        // Rounding can push a perfect fit slightly past 1
        r.is_finite().then(|| r.clamp(-1.0, 1.0))
    }

    /// Arithmetic mean, `None` for an empty sample.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().mean())
    }

    /// Sample standard deviation (n - 1), `None` below 2 observations.
    pub fn std_dev(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let sd = values.iter().std_dev();
        sd.is_finite().then_some(sd)
    }

    /// Sharpe ratio with a zero risk-free rate.
    ///
    /// returns: daily returns
    /// annualize: if true, multiplies by sqrt(252)
    pub fn sharpe_ratio(returns: &[f64], annualize: bool) -> Option<f64> {
        let mean = Self::mean(returns)?;
        let std_dev = Self::std_dev(returns)?;
        if std_dev <= 1e-12 {
            return None;
        }

        let ratio = mean / std_dev;
        if annualize {
            Some(ratio * TRADING_DAYS_PER_YEAR.sqrt())
        } else {
            Some(ratio)
        }
    }
}
