//! Volume moving average, large-volume days, and the forward-filled
//! large-volume-day low support level.

use crate::domain::ohlcv::PriceBar;

use super::sma::sma_opt;

/// Window mean of volume. Unknown volume anywhere in the window makes the
/// cell unknown.
pub fn volume_ma(bars: &[PriceBar], window: usize) -> Vec<Option<f64>> {
    let volumes: Vec<Option<f64>> = bars.iter().map(|b| b.volume).collect();
    sma_opt(&volumes, window)
}

/// A day is a large-volume day when its volume exceeds the trailing volume
/// average by `mult`. The low of the most recent large-volume day is
/// carried forward as a support reference until superseded.
pub fn big_volume(
    bars: &[PriceBar],
    vol_ma: &[Option<f64>],
    mult: f64,
) -> (Vec<bool>, Vec<Option<f64>>) {
    let mut is_big = Vec::with_capacity(bars.len());
    let mut low_ffill = Vec::with_capacity(bars.len());
    let mut last_low: Option<f64> = None;

    for (bar, ma) in bars.iter().zip(vol_ma) {
        let big = match (bar.volume, ma) {
            (Some(v), Some(avg)) => v > avg * mult,
            _ => false,
        };
        if big {
            last_low = Some(bar.low);
        }
        is_big.push(big);
        low_ffill.push(last_low);
    }

    (is_big, low_ffill)
}
