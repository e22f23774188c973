//! Immutable engine parameters.
//!
//! A single `Params` value is passed into every signal-engine and
//! simulator call; there is no process-wide default state. `Params::default()`
//! carries the frozen rule-set thresholds.

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    // Moving-average windows
    pub ma5: usize,
    pub ma10: usize,
    pub ma20: usize,
    pub ma60: usize,
    pub ma240: usize,

    /// Stop-line slope threshold over the 5-day lookback (0.005 = 0.5%).
    pub ma_slope_threshold: f64,
    pub ma_slope_lookback: usize,

    /// Volume must exceed its moving average by this multiple to count
    /// as a large-volume day.
    pub bigvol_mult: f64,
    /// Candle body gain marking a "big red" day.
    pub big_red_body_pct: f64,
    /// Minimum gap size for a gap-up day.
    pub gap_up_pct: f64,

    // Frictions
    pub fee_buy: f64,
    pub fee_sell: f64,

    /// Buffer below the stop line before a day counts toward the
    /// 3-day breakdown confirmation.
    pub stop_buffer_pct: f64,
    /// Consecutive buffered closes below the stop line required before
    /// MA_BREAK may fire.
    pub stop_confirm_days: usize,
    /// Unconditional stop: close below MA60 by this fraction.
    pub hard_stop_pct: f64,
    /// Bias (close vs MA20) beyond which take-profit pressure applies.
    pub bias_threshold: f64,

    // Protection gate
    pub rsi_oversold: f64,
    pub ma60_trend_lookback: usize,
    pub ma60_support_tolerance: f64,

    /// Minimum day-count after an exit before a new entry is permitted.
    pub exit_cooldown_days: usize,
    /// Usable-history floor below which the simulator returns a zero result.
    pub min_backtest_days: usize,

    // Indicator windows
    pub vol_ma: usize,
    pub atr_n: usize,
    pub kd_n: usize,
    pub rsi_n: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub obv_ma: usize,

    // Premature-sell diagnostic (retrospective, not part of signal rows)
    pub sell_lookahead: usize,
    pub sell_premature_threshold: f64,
    pub sell_premature_use_high: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            ma5: 5,
            ma10: 10,
            ma20: 20,
            ma60: 60,
            ma240: 240,
            ma_slope_threshold: 0.005,
            ma_slope_lookback: 5,
            bigvol_mult: 2.0,
            big_red_body_pct: 0.03,
            gap_up_pct: 0.005,
            fee_buy: 0.001425,
            fee_sell: 0.004425,
            stop_buffer_pct: 0.015,
            stop_confirm_days: 3,
            hard_stop_pct: 0.05,
            bias_threshold: 0.15,
            rsi_oversold: 40.0,
            ma60_trend_lookback: 20,
            ma60_support_tolerance: 0.03,
            exit_cooldown_days: 5,
            min_backtest_days: 100,
            vol_ma: 20,
            atr_n: 14,
            kd_n: 9,
            rsi_n: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            obv_ma: 20,
            sell_lookahead: 3,
            sell_premature_threshold: 0.02,
            sell_premature_use_high: false,
        }
    }
}
