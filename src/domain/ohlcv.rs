//! Daily OHLCV bar representation.

use chrono::NaiveDate;

/// One trading day. Volume may be unknown for some data sources and is
/// never substituted with zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl PriceBar {
    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }

    /// A bar is usable when all four price fields are finite.
    /// Rows failing this are excluded from signal generation and backtest.
    pub fn has_valid_ohlc(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }

    /// close < open
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
