//! Technical indicator computation.
//!
//! Each indicator is a pure function over the ordered bar slice producing
//! a same-length column aligned to the price series. Values before a
//! rolling window is fully populated are `None` and propagate as unknown;
//! they are never silently treated as zero.

pub mod atr;
pub mod macd;
pub mod obv;
pub mod patterns;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volume;

use crate::domain::ohlcv::PriceBar;
use crate::domain::params::Params;
use crate::domain::stock_class::StopLine;

/// Day-aligned indicator columns for one ticker.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    pub ma5: Vec<Option<f64>>,
    pub ma10: Vec<Option<f64>>,
    pub ma20: Vec<Option<f64>>,
    pub ma60: Vec<Option<f64>>,
    pub ma240: Vec<Option<f64>>,
    pub vol_ma: Vec<Option<f64>>,
    pub atr_pct: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
    pub macd_hist: Vec<f64>,
    pub obv: Vec<f64>,
    pub obv_ma: Vec<Option<f64>>,
    pub is_big_vol: Vec<bool>,
    /// Low of the most recent large-volume day, forward-filled.
    pub bigvol_low: Vec<Option<f64>>,
    pub is_big_red: Vec<bool>,
    pub gap_up: Vec<bool>,
    /// Close above MA5, MA10 and MA20 simultaneously ("three suns").
    pub triple_above: Vec<bool>,
    /// Triple-above plus close above MA60 ("four seas").
    pub quad_above: Vec<bool>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.ma5.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ma5.is_empty()
    }

    /// Resolve the stop-line column mandated by the stock class. No
    /// fallback to a shorter window happens here; a `None` cell means the
    /// signal engine must treat the day as unknown.
    pub fn stop_line_column(&self, stop_line: StopLine) -> &[Option<f64>] {
        match stop_line {
            StopLine::Ma10 => &self.ma10,
            StopLine::Ma20 => &self.ma20,
            StopLine::Ma60 => &self.ma60,
        }
    }
}

/// Compute the full frame for one ticker.
pub fn compute_frame(bars: &[PriceBar], params: &Params) -> IndicatorFrame {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let ma5 = sma::sma(&closes, params.ma5);
    let ma10 = sma::sma(&closes, params.ma10);
    let ma20 = sma::sma(&closes, params.ma20);
    let ma60 = sma::sma(&closes, params.ma60);
    let ma240 = sma::sma(&closes, params.ma240);

    let vol_ma = volume::volume_ma(bars, params.vol_ma);
    let (is_big_vol, bigvol_low) = volume::big_volume(bars, &vol_ma, params.bigvol_mult);

    let atr_pct = atr::atr_pct(bars, params.atr_n);
    let rsi = rsi::rsi(&closes, params.rsi_n);
    let (k, d) = stochastic::stochastic_kd(bars, params.kd_n);
    let macd_hist = macd::macd_histogram(
        &closes,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    );
    let obv = obv::obv(bars);
    let obv_ma = sma::sma(&obv, params.obv_ma);

    let is_big_red = patterns::big_red(bars, params.big_red_body_pct);
    let gap_up = patterns::gap_up(bars, params.gap_up_pct);
    let (triple_above, quad_above) = patterns::alignment(&closes, &ma5, &ma10, &ma20, &ma60);

    IndicatorFrame {
        ma5,
        ma10,
        ma20,
        ma60,
        ma240,
        vol_ma,
        atr_pct,
        rsi,
        k,
        d,
        macd_hist,
        obv,
        obv_ma,
        is_big_vol,
        bigvol_low,
        is_big_red,
        gap_up,
        triple_above,
        quad_above,
    }
}

/// Exponential moving average with a fixed smoothing factor, seeded at the
/// first input value.
pub(crate) fn ema(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}
