//! Candle and moving-average alignment pattern flags.

use crate::domain::ohlcv::PriceBar;

/// Candle body gain above `body_pct` (close vs open).
pub fn big_red(bars: &[PriceBar], body_pct: f64) -> Vec<bool> {
    bars.iter()
        .map(|b| b.open > 0.0 && (b.close - b.open) / b.open > body_pct)
        .collect()
}

/// Today's low clears yesterday's high by `gap_pct`.
pub fn gap_up(bars: &[PriceBar], gap_pct: f64) -> Vec<bool> {
    let mut out = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let gapped = i > 0 && bar.low > bars[i - 1].high * (1.0 + gap_pct);
        out.push(gapped);
    }
    out
}

/// Triple-above ("three suns"): close above MA5, MA10 and MA20.
/// Quad-above ("four seas"): triple-above plus close above MA60.
/// Unknown MA cells read as not-above, never as a false positive.
pub fn alignment(
    closes: &[f64],
    ma5: &[Option<f64>],
    ma10: &[Option<f64>],
    ma20: &[Option<f64>],
    ma60: &[Option<f64>],
) -> (Vec<bool>, Vec<bool>) {
    let above = |ma: &[Option<f64>], i: usize, close: f64| ma[i].is_some_and(|m| close > m);

    let mut triple = Vec::with_capacity(closes.len());
    let mut quad = Vec::with_capacity(closes.len());
    for (i, &close) in closes.iter().enumerate() {
        let t = above(ma5, i, close) && above(ma10, i, close) && above(ma20, i, close);
        triple.push(t);
        quad.push(t && above(ma60, i, close));
    }
    (triple, quad)
}
