//! Post-hoc diagnostics over a signal run.
//!
//! `detect_sell_before_rise` flags exits that the market immediately
//! punished: a sell day whose close is followed, within a short lookahead
//! window, by a rise at or beyond a threshold. Useful for tuning the sell
//! policy; never fed back into the signals themselves.

use chrono::NaiveDate;

use crate::domain::ohlcv::PriceBar;
use crate::domain::params::Params;
use crate::domain::signal::{SellReason, SignalRow};

#[derive(Debug, Clone, PartialEq)]
pub struct PrematureSell {
    pub index: usize,
    pub date: NaiveDate,
    pub reason: SellReason,
    /// Best relative rise observed inside the lookahead window.
    pub future_rise: f64,
}

pub fn detect_sell_before_rise(
    bars: &[PriceBar],
    rows: &[SignalRow],
    params: &Params,
) -> Vec<PrematureSell> {
    debug_assert_eq!(bars.len(), rows.len());

    let mut flagged = Vec::new();
    for (i, (bar, row)) in bars.iter().zip(rows).enumerate() {
        if !row.sell || !row.valid || bar.close <= 0.0 {
            continue;
        }

        let window = &bars[i + 1..bars.len().min(i + 1 + params.sell_lookahead)];
        if window.is_empty() {
            continue;
        }

        let best = window
            .iter()
            .map(|b| {
                if params.sell_premature_use_high {
                    b.high
                } else {
                    b.close
                }
            })
            .fold(f64::MIN, f64::max);

        let future_rise = best / bar.close - 1.0;
        if future_rise >= params.sell_premature_threshold {
            flagged.push(PrematureSell {
                index: i,
                date: bar.date,
                reason: row.sell_reason,
                future_rise,
            });
        }
    }
    flagged
}
