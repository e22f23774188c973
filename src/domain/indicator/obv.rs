//! OBV (on-balance volume): cumulative signed volume flow.
//!
//! Days with unknown volume contribute nothing, matching the contract
//! that unknown volume is never read as zero *price* information but adds
//! no flow either way.

use crate::domain::ohlcv::PriceBar;

pub fn obv(bars: &[PriceBar]) -> Vec<f64> {
    let mut out = Vec::with_capacity(bars.len());
    let mut running = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i > 0 {
            if let Some(vol) = bar.volume {
                let change = bar.close - bars[i - 1].close;
                if change > 0.0 {
                    running += vol;
                } else if change < 0.0 {
                    running -= vol;
                }
            }
        }
        out.push(running);
    }
    out
}
