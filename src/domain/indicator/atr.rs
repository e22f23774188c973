//! ATR-percent: rolling mean of the true range, normalized by close.

use crate::domain::ohlcv::PriceBar;

use super::sma::sma;

pub fn atr_pct(bars: &[PriceBar], period: usize) -> Vec<Option<f64>> {
    if bars.is_empty() {
        return Vec::new();
    }

    let mut tr = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let value = if i == 0 {
            bar.high - bar.low
        } else {
            bar.true_range(bars[i - 1].close)
        };
        tr.push(value);
    }

    sma(&tr, period)
        .into_iter()
        .zip(bars)
        .map(|(atr, bar)| match atr {
            Some(a) if bar.close > 0.0 => Some(a / bar.close),
            _ => None,
        })
        .collect()
}
