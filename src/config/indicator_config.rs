//! Technical indicator and metric parameters.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorEnvConfig {
    // SMA
    pub sma_fast_period: usize,
    pub sma_slow_period: usize,

    // EMA
    pub ema_period: usize,

    // RSI
    pub rsi_period: usize,

    // MACD
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,

    // Rolling Sharpe
    pub rolling_sharpe_window: usize,
}

impl Default for IndicatorEnvConfig {
    fn default() -> Self {
        Self {
            sma_fast_period: 20,
            sma_slow_period: 50,
            ema_period: 20,
            rsi_period: 14,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_period: 9,
            rolling_sharpe_window: 20,
        }
    }
}

impl IndicatorEnvConfig {
    pub fn apply_env<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::parse_usize(lookup, "SMA_FAST_PERIOD", &mut self.sma_fast_period)?;
        Self::parse_usize(lookup, "SMA_SLOW_PERIOD", &mut self.sma_slow_period)?;
        Self::parse_usize(lookup, "EMA_PERIOD", &mut self.ema_period)?;
        Self::parse_usize(lookup, "RSI_PERIOD", &mut self.rsi_period)?;
        Self::parse_usize(lookup, "MACD_FAST_PERIOD", &mut self.macd_fast_period)?;
        Self::parse_usize(lookup, "MACD_SLOW_PERIOD", &mut self.macd_slow_period)?;
        Self::parse_usize(lookup, "MACD_SIGNAL_PERIOD", &mut self.macd_signal_period)?;
        Self::parse_usize(lookup, "ROLLING_SHARPE_WINDOW", &mut self.rolling_sharpe_window)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("sma_fast_period", self.sma_fast_period),
            ("sma_slow_period", self.sma_slow_period),
            ("ema_period", self.ema_period),
            ("rsi_period", self.rsi_period),
            ("macd_fast_period", self.macd_fast_period),
            ("macd_slow_period", self.macd_slow_period),
            ("macd_signal_period", self.macd_signal_period),
        ];
        for (name, value) in periods {
            if value == 0 {
                anyhow::bail!("{} must be > 0", name);
            }
        }
        if self.macd_fast_period >= self.macd_slow_period {
            anyhow::bail!(
                "macd_fast_period ({}) must be shorter than macd_slow_period ({})",
                self.macd_fast_period,
                self.macd_slow_period
            );
        }
        if self.rolling_sharpe_window < 2 {
            anyhow::bail!("rolling_sharpe_window must be at least 2");
        }
        Ok(())
    }

    fn parse_usize<F>(lookup: &F, key: &str, target: &mut usize) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(key) {
            *target = raw
                .trim()
                .parse::<usize>()
                .context(format!("Failed to parse {}", key))?;
        }
        Ok(())
    }
}
