use crate::config::IndicatorEnvConfig;
use crate::domain::errors::AnalysisError;
use ta::Next;
use ta::indicators::{
    ExponentialMovingAverage, MovingAverageConvergenceDivergence, RelativeStrengthIndex,
    SimpleMovingAverage,
};

/// Indicator values for one close. `None` while the window is warming up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorValues {
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
}

/// Streaming technical indicators over a daily close series.
///
/// Warm-up: SMA/EMA need `period` closes, RSI `period + 1` (one change per
/// close after the first), MACD line `slow` and signal `slow + signal - 1`.
pub struct IndicatorService {
    sma_fast: SimpleMovingAverage,
    sma_slow: SimpleMovingAverage,
    ema: ExponentialMovingAverage,
    rsi: RelativeStrengthIndex,
    macd: MovingAverageConvergenceDivergence,
    config: IndicatorEnvConfig,
    seen: usize,
}

impl IndicatorService {
    pub fn new(config: &IndicatorEnvConfig) -> Result<Self, AnalysisError> {
        let indicator_err = |name: &str, e: ta::errors::TaError| {
            AnalysisError::Indicator(format!("{}: {:?}", name, e))
        };

        Ok(Self {
            sma_fast: SimpleMovingAverage::new(config.sma_fast_period)
                .map_err(|e| indicator_err("sma_fast_period", e))?,
            sma_slow: SimpleMovingAverage::new(config.sma_slow_period)
                .map_err(|e| indicator_err("sma_slow_period", e))?,
            ema: ExponentialMovingAverage::new(config.ema_period)
                .map_err(|e| indicator_err("ema_period", e))?,
            rsi: RelativeStrengthIndex::new(config.rsi_period)
                .map_err(|e| indicator_err("rsi_period", e))?,
            macd: MovingAverageConvergenceDivergence::new(
                config.macd_fast_period,
                config.macd_slow_period,
                config.macd_signal_period,
            )
            .map_err(|e| indicator_err("macd periods", e))?,
            config: config.clone(),
            seen: 0,
        })
    }

    pub fn next(&mut self, close: f64) -> IndicatorValues {
        self.seen += 1;
        let n = self.seen;
        let cfg = &self.config;

        let sma_fast = self.sma_fast.next(close);
        let sma_slow = self.sma_slow.next(close);
        let ema = self.ema.next(close);
        let rsi = self.rsi.next(close);
        let macd = self.macd.next(close);

        let ready = |needed: usize, value: f64| (n >= needed && value.is_finite()).then_some(value);
        let signal_ready = cfg.macd_slow_period + cfg.macd_signal_period - 1;

        IndicatorValues {
            sma_fast: ready(cfg.sma_fast_period, sma_fast),
            sma_slow: ready(cfg.sma_slow_period, sma_slow),
            ema: ready(cfg.ema_period, ema),
            rsi: ready(cfg.rsi_period + 1, rsi),
            macd_line: ready(cfg.macd_slow_period, macd.macd),
            macd_signal: ready(signal_ready, macd.signal),
            macd_hist: ready(signal_ready, macd.histogram),
        }
    }

    /// Indicator values for a full close series, one entry per close.
    pub fn compute(config: &IndicatorEnvConfig, closes: &[f64]) -> Result<Vec<IndicatorValues>, AnalysisError> {
        let mut service = Self::new(config)?;
        Ok(closes.iter().map(|&c| service.next(c)).collect())
    }
}
