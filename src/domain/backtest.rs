//! Single-position backtest simulator.
//!
//! A deterministic one-pass walk over one ticker's day sequence with two
//! states (flat, long). Transitions are driven solely by that day's
//! `SignalRow`; the loop-carried state lives in an explicit
//! [`PositionState`] whose `step` function is unit-testable on its own.

use crate::domain::ohlcv::PriceBar;
use crate::domain::params::Params;
use crate::domain::signal::{BuyReason, SellReason, SignalRow};

/// Realized on each exit. Indices refer to the original bar sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    /// Fees-adjusted return of the round trip.
    pub net_return: f64,
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_reason: BuyReason,
    pub exit_reason: SellReason,
}

/// Loop-carried simulator state. One instance per ticker run, never shared.
#[derive(Debug, Clone, Default)]
pub struct PositionState {
    holding: Option<Holding>,
    /// Step index of the most recent exit, for the cooldown window.
    last_exit_step: Option<usize>,
}

#[derive(Debug, Clone)]
struct Holding {
    /// Cost basis with the buy fee grossed in.
    entry_price: f64,
    entry_index: usize,
    entry_reason: BuyReason,
}

/// Outcome of one day's transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Multiplier applied to the running equity for this day.
    pub equity_factor: f64,
    /// Whether a position is held at the end of the day.
    pub long: bool,
    pub trade: Option<TradeRecord>,
}

impl PositionState {
    pub fn is_long(&self) -> bool {
        self.holding.is_some()
    }

    fn in_cooldown(&self, step_index: usize, cooldown_days: usize) -> bool {
        self.last_exit_step
            .is_some_and(|exit| step_index - exit < cooldown_days)
    }

    /// Advance one day. `step_index` counts usable days (0-based),
    /// `bar_index` is the position in the original sequence; `prev_close`
    /// is the previous usable day's close.
    pub fn step(
        &mut self,
        step_index: usize,
        bar_index: usize,
        close: f64,
        prev_close: f64,
        row: &SignalRow,
        params: &Params,
    ) -> Step {
        let mut factor = 1.0;
        let mut trade = None;

        match self.holding.take() {
            Some(holding) => {
                // Equity compounds at the close-to-close return while long.
                factor *= close / prev_close;

                if row.sell {
                    factor *= 1.0 - params.fee_sell;
                    let raw_return = close / holding.entry_price - 1.0;
                    let net_return =
                        (1.0 + raw_return) * (1.0 - params.fee_buy) * (1.0 - params.fee_sell) - 1.0;
                    trade = Some(TradeRecord {
                        net_return,
                        entry_index: holding.entry_index,
                        exit_index: bar_index,
                        entry_reason: holding.entry_reason,
                        exit_reason: row.sell_reason,
                    });
                    self.last_exit_step = Some(step_index);
                } else {
                    self.holding = Some(holding);
                }
            }
            None => {
                if row.buy && !self.in_cooldown(step_index, params.exit_cooldown_days) {
                    self.holding = Some(Holding {
                        entry_price: close * (1.0 + params.fee_buy),
                        entry_index: bar_index,
                        entry_reason: row.buy_reason,
                    });
                    factor *= 1.0 - params.fee_buy;
                }
            }
        }

        Step {
            equity_factor: factor,
            long: self.is_long(),
            trade,
        }
    }
}

/// Aggregate statistics over one run. All ratio statistics default to 0
/// when there are no trades; nothing here divides by zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub total_return: f64,
    /// Most negative peak-to-trough equity ratio minus one (<= 0).
    pub max_drawdown: f64,
    pub trade_count: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub buy_and_hold_return: f64,
    pub in_market_fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    /// Per-usable-day equity curve, starting at 1.0.
    pub equity: Vec<f64>,
    /// Position indicator aligned with `equity`.
    pub in_market: Vec<bool>,
    pub trades: Vec<TradeRecord>,
    pub summary: Summary,
}

impl BacktestResult {
    fn no_trade(days: usize) -> Self {
        BacktestResult {
            equity: vec![1.0; days],
            in_market: vec![false; days],
            trades: Vec::new(),
            summary: Summary::default(),
        }
    }
}

/// Run the simulator over one ticker.
///
/// Rows marked invalid (and bars without a finite close) are dropped
/// before simulation; if fewer than the minimum usable days remain the
/// documented zero result is returned without simulating.
pub fn run_backtest(bars: &[PriceBar], rows: &[SignalRow], params: &Params) -> BacktestResult {
    debug_assert_eq!(bars.len(), rows.len());

    let usable: Vec<(usize, f64, &SignalRow)> = bars
        .iter()
        .zip(rows)
        .enumerate()
        .filter(|(_, (bar, row))| row.valid && bar.close.is_finite())
        .map(|(i, (bar, row))| (i, bar.close, row))
        .collect();

    let n = usable.len();
    if n < params.min_backtest_days {
        return BacktestResult::no_trade(n);
    }

    let mut equity = Vec::with_capacity(n);
    let mut in_market = Vec::with_capacity(n);
    let mut trades = Vec::new();
    let mut state = PositionState::default();

    equity.push(1.0);
    in_market.push(false);

    for step_index in 1..n {
        let (bar_index, close, row) = usable[step_index];
        let prev_close = usable[step_index - 1].1;
        let step = state.step(step_index, bar_index, close, prev_close, row, params);

        equity.push(equity[step_index - 1] * step.equity_factor);
        in_market.push(step.long);
        if let Some(trade) = step.trade {
            trades.push(trade);
        }
    }

    let summary = summarize(&equity, &in_market, &trades, &usable);

    BacktestResult {
        equity,
        in_market,
        trades,
        summary,
    }
}

fn summarize(
    equity: &[f64],
    in_market: &[bool],
    trades: &[TradeRecord],
    usable: &[(usize, f64, &SignalRow)],
) -> Summary {
    let total_return = equity.last().map_or(0.0, |e| e - 1.0);

    let mut peak = f64::MIN;
    let mut max_drawdown = 0.0_f64;
    for &e in equity {
        peak = peak.max(e);
        max_drawdown = max_drawdown.min(e / peak - 1.0);
    }

    let wins = trades.iter().filter(|t| t.net_return > 0.0).count();
    let win_rate = if trades.is_empty() {
        0.0
    } else {
        wins as f64 / trades.len() as f64
    };

    let gross_profit: f64 = trades
        .iter()
        .filter(|t| t.net_return > 0.0)
        .map(|t| t.net_return)
        .sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.net_return < 0.0)
        .map(|t| -t.net_return)
        .sum();
    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else {
        0.0
    };

    let buy_and_hold_return = match (usable.first(), usable.last()) {
        (Some(&(_, first, _)), Some(&(_, last, _))) if first > 0.0 => last / first - 1.0,
        _ => 0.0,
    };

    let in_market_fraction = if in_market.is_empty() {
        0.0
    } else {
        in_market.iter().filter(|&&p| p).count() as f64 / in_market.len() as f64
    };

    Summary {
        total_return,
        max_drawdown,
        trade_count: trades.len(),
        win_rate,
        profit_factor,
        buy_and_hold_return,
        in_market_fraction,
    }
}
