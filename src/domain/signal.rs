//! Signal engine: turns indicator values into buy/sell decisions.
//!
//! For every day the engine evaluates the buy rule, five prioritized sell
//! triggers with a protection gate on the trend-break trigger, and the
//! 0-100 health score. Each row is a pure function of price/indicator data
//! at index <= t; nothing here reads forward.

use crate::domain::indicator::IndicatorFrame;
use crate::domain::ohlcv::PriceBar;
use crate::domain::params::Params;
use crate::domain::stock_class::StockClass;

/// Why a sell fired. When several triggers fire the same day the reported
/// reason is the highest-priority one, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SellReason {
    #[default]
    None,
    HardStop,
    BigVolBreak,
    TakeProfit,
    FakeBreak,
    MaBreak,
}

impl SellReason {
    pub fn label(self) -> &'static str {
        match self {
            SellReason::None => "NONE",
            SellReason::HardStop => "HARD_STOP",
            SellReason::BigVolBreak => "BIG_VOL_BREAK",
            SellReason::TakeProfit => "TAKE_PROFIT",
            SellReason::FakeBreak => "FAKE_BREAK",
            SellReason::MaBreak => "MA_BREAK",
        }
    }
}

/// Diagnostic tag for buy rows; not used for any precedence decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuyReason {
    FourSeas,
    ThreeSuns,
    #[default]
    Trend,
}

impl BuyReason {
    pub fn label(self) -> &'static str {
        match self {
            BuyReason::FourSeas => "FOUR_SEAS",
            BuyReason::ThreeSuns => "THREE_SUNS",
            BuyReason::Trend => "TREND",
        }
    }
}

/// Raw per-day trigger states, before priority selection. Kept on the row
/// for diagnostics and score explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SellTriggers {
    pub hard_stop: bool,
    pub big_vol_break: bool,
    pub take_profit: bool,
    pub fake_break: bool,
    /// Buffered close below the stop line for the full confirmation window,
    /// before the protection gate is applied.
    pub stop_line_break: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalRow {
    /// False when OHLC fields are missing/non-finite; such rows carry no
    /// signal and are excluded from the backtest.
    pub valid: bool,
    pub buy: bool,
    pub buy_reason: BuyReason,
    pub sell: bool,
    pub sell_reason: SellReason,
    pub triggers: SellTriggers,
    /// Breakdown confirmed but a protection condition suppressed the
    /// trend-break sell, and no other trigger fired.
    pub in_protection: bool,
    /// One day short of breakdown confirmation.
    pub near_stop_warn: bool,
    /// Stop-line slope over the lookback exceeds the threshold.
    pub trend_up: bool,
    pub below_stop_line: bool,
    /// Close vs MA20 relative deviation.
    pub bias: Option<f64>,
    /// Health score, clamped to [0, 100].
    pub score: u8,
}

impl SignalRow {
    fn invalid() -> Self {
        SignalRow {
            valid: false,
            buy: false,
            buy_reason: BuyReason::Trend,
            sell: false,
            sell_reason: SellReason::None,
            triggers: SellTriggers::default(),
            in_protection: false,
            near_stop_warn: false,
            trend_up: false,
            below_stop_line: false,
            bias: None,
            score: 0,
        }
    }
}

/// Evaluate the full rule set for one ticker.
///
/// The stop line is resolved once from the stock class; a day whose
/// mandated stop-line cell is unknown produces a no-signal row rather
/// than silently falling back to a shorter window.
pub fn generate_signals(
    bars: &[PriceBar],
    frame: &IndicatorFrame,
    params: &Params,
    class: StockClass,
) -> Vec<SignalRow> {
    let n = bars.len();
    debug_assert_eq!(frame.len(), n);

    let stop = frame.stop_line_column(class.stop_line());
    let mut rows = Vec::with_capacity(n);
    // Consecutive buffered closes below the stop line.
    let mut days_below = 0usize;

    for i in 0..n {
        let bar = &bars[i];
        if !bar.has_valid_ohlc() {
            days_below = 0;
            rows.push(SignalRow::invalid());
            continue;
        }
        let close = bar.close;

        let bias = match frame.ma20[i] {
            Some(m) if m > 0.0 => Some((close - m) / m),
            _ => None,
        };

        let below_buffered = stop[i].is_some_and(|s| close < s * (1.0 - params.stop_buffer_pct));
        days_below = if below_buffered { days_below + 1 } else { 0 };
        let breakdown = days_below >= params.stop_confirm_days;
        let near_stop_warn = days_below + 1 == params.stop_confirm_days;

        // Stop-line slope over the lookback window.
        let trend_up = if i >= params.ma_slope_lookback {
            match (stop[i], stop[i - params.ma_slope_lookback]) {
                (Some(now), Some(then)) if then > 0.0 => {
                    (now - then) / then > params.ma_slope_threshold
                }
                _ => false,
            }
        } else {
            false
        };

        let below_stop_line = stop[i].is_some_and(|s| close < s);

        // --- Buy rule ---
        let above_stop = stop[i].is_some_and(|s| close > s);
        let pattern_strong = frame.triple_above[i] || frame.quad_above[i];
        let long_term_ok = !class.requires_long_term_confirmation()
            || frame.ma240[i].is_some_and(|m| close > m);
        let buy = above_stop && trend_up && pattern_strong && long_term_ok;
        let buy_reason = if frame.quad_above[i] {
            BuyReason::FourSeas
        } else if frame.triple_above[i] {
            BuyReason::ThreeSuns
        } else {
            BuyReason::Trend
        };

        // --- Sell triggers ---
        let hard_stop = frame.ma60[i].is_some_and(|m| close < m * (1.0 - params.hard_stop_pct));

        let big_vol_break = frame.bigvol_low[i].is_some_and(|low| close < low);

        let high_bias = bias.is_some_and(|b| b > params.bias_threshold);
        let break_ma5 = frame.ma5[i].is_some_and(|m| close < m);
        let kd_dead_cross = match (frame.k[i], frame.d[i]) {
            (Some(k), Some(d)) => k > 80.0 && k < d,
            _ => false,
        };
        let take_profit = high_bias && (break_ma5 || kd_dead_cross);

        let fake_break =
            i >= 2 && bars[i - 1].high > bars[i - 2].high && bar.is_bearish() && break_ma5;

        // Protection gate: applies only to the trend-break trigger.
        let rsi_protect = frame.rsi[i].is_some_and(|r| r < params.rsi_oversold);
        let trend_protect = if i >= params.ma60_trend_lookback {
            match (frame.ma60[i], frame.ma60[i - params.ma60_trend_lookback]) {
                (Some(now), Some(then)) => {
                    now > then && close > now * (1.0 - params.ma60_support_tolerance)
                }
                _ => false,
            }
        } else {
            false
        };
        let protected = rsi_protect || trend_protect;
        let ma_break = breakdown && !protected;

        let triggers = SellTriggers {
            hard_stop,
            big_vol_break,
            take_profit,
            fake_break,
            stop_line_break: breakdown,
        };

        let sell_reason = if hard_stop {
            SellReason::HardStop
        } else if big_vol_break {
            SellReason::BigVolBreak
        } else if take_profit {
            SellReason::TakeProfit
        } else if fake_break {
            SellReason::FakeBreak
        } else if ma_break {
            SellReason::MaBreak
        } else {
            SellReason::None
        };
        let sell = sell_reason != SellReason::None;

        let in_protection = breakdown && protected && !sell;

        // --- Health score ---
        let mut score: i32 = 50;
        if frame.triple_above[i] {
            score += 20;
        }
        if frame.quad_above[i] {
            score += 10;
        }
        if trend_up {
            score += 10;
        }
        if frame.ma240[i].is_some_and(|m| close > m) {
            score += 5;
        }
        if below_stop_line {
            score -= 20;
        }
        if big_vol_break {
            score -= 30;
        }
        if take_profit {
            score -= 10;
        }
        if hard_stop {
            score -= 40;
        }
        let score = score.clamp(0, 100) as u8;

        rows.push(SignalRow {
            valid: true,
            buy,
            buy_reason,
            sell,
            sell_reason,
            triggers,
            in_protection,
            near_stop_warn,
            trend_up,
            below_stop_line,
            bias,
            score,
        });
    }

    rows
}

/// Itemized score contributions for one day, for reporting.
pub fn score_breakdown(
    bars: &[PriceBar],
    frame: &IndicatorFrame,
    rows: &[SignalRow],
    i: usize,
) -> Vec<(&'static str, i32)> {
    let mut items = Vec::new();
    let row = &rows[i];
    if !row.valid {
        return items;
    }

    if frame.triple_above[i] {
        items.push(("three suns (close above MA5/10/20)", 20));
    }
    if frame.quad_above[i] {
        items.push(("four seas (also above MA60)", 10));
    }
    if row.trend_up {
        items.push(("stop-line slope rising", 10));
    }
    if frame.ma240[i].is_some_and(|m| bars[i].close > m) {
        items.push(("above yearly MA", 5));
    }
    if row.below_stop_line {
        items.push(("below stop line", -20));
    }
    if row.triggers.big_vol_break {
        items.push(("broke large-volume-day low", -30));
    }
    if row.triggers.take_profit {
        items.push(("overheated, take-profit pressure", -10));
    }
    if row.triggers.hard_stop {
        items.push(("hard stop breached", -40));
    }
    items
}
