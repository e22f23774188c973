//! Per-ticker pipeline and universe fan-out.
//!
//! `run_ticker` wires the stages together for one symbol; `run_universe`
//! runs every ticker in parallel and isolates per-ticker failures so one
//! bad symbol never sinks the batch.

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::domain::backtest::{run_backtest, BacktestResult};
use crate::domain::diagnostics::{detect_sell_before_rise, PrematureSell};
use crate::domain::error::TechscoreError;
use crate::domain::indicator::compute_frame;
use crate::domain::ohlcv::PriceBar;
use crate::domain::params::Params;
use crate::domain::signal::{generate_signals, score_breakdown, SignalRow};
use crate::domain::stock_class::StockClass;
use crate::domain::universe::Universe;
use crate::ports::data_port::DataPort;

/// Coarse reading of the latest score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    Bullish,
    Neutral,
    Bearish,
}

impl Advice {
    pub fn from_score(score: u8) -> Self {
        if score >= 60 {
            Advice::Bullish
        } else if score <= 30 {
            Advice::Bearish
        } else {
            Advice::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Advice::Bullish => "bullish",
            Advice::Neutral => "neutral",
            Advice::Bearish => "bearish",
        }
    }
}

/// Everything the reporting layer needs for one ticker.
#[derive(Debug, Clone)]
pub struct TickerReport {
    pub ticker: String,
    pub class: StockClass,
    pub days: usize,
    pub latest_date: NaiveDate,
    pub latest: SignalRow,
    pub advice: Advice,
    /// Itemized score contributions for the latest valid day.
    pub breakdown: Vec<(&'static str, i32)>,
    pub backtest: BacktestResult,
    pub premature_sells: Vec<PrematureSell>,
}

pub struct UniverseReport {
    pub reports: Vec<TickerReport>,
    pub failures: Vec<(String, TechscoreError)>,
}

/// Run the full pipeline for one ticker over already-fetched bars.
///
/// Bars are sorted by date and de-duplicated (last wins) before anything
/// is computed, so upstream ordering quirks cannot change results.
pub fn run_ticker(
    ticker: &str,
    class: StockClass,
    mut bars: Vec<PriceBar>,
    params: &Params,
) -> Result<TickerReport, TechscoreError> {
    if bars.is_empty() {
        return Err(TechscoreError::NoData {
            ticker: ticker.to_string(),
        });
    }

    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);

    let frame = compute_frame(&bars, params);
    let rows = generate_signals(&bars, &frame, params, class);
    let backtest = run_backtest(&bars, &rows, params);
    let premature_sells = detect_sell_before_rise(&bars, &rows, params);

    let latest_index = rows
        .iter()
        .rposition(|r| r.valid)
        .ok_or_else(|| TechscoreError::NoData {
            ticker: ticker.to_string(),
        })?;
    let latest = rows[latest_index].clone();
    let breakdown = score_breakdown(&bars, &frame, &rows, latest_index);
    let advice = Advice::from_score(latest.score);

    Ok(TickerReport {
        ticker: ticker.to_string(),
        class,
        days: bars.len(),
        latest_date: bars[latest_index].date,
        latest,
        advice,
        breakdown,
        backtest,
        premature_sells,
    })
}

/// Fetch and score every ticker in the universe in parallel. Failures are
/// collected rather than propagated; the caller decides whether a partial
/// batch is acceptable.
pub fn run_universe(
    data: &(dyn DataPort + Sync),
    universe: &Universe,
    params: &Params,
) -> UniverseReport {
    let outcomes: Vec<Result<TickerReport, (String, TechscoreError)>> = universe
        .entries
        .par_iter()
        .map(|entry| {
            let bars = data
                .fetch_ohlcv(&entry.ticker)
                .map_err(|e| (entry.ticker.clone(), e))?;
            run_ticker(&entry.ticker, entry.class, bars, params)
                .map_err(|e| (entry.ticker.clone(), e))
        })
        .collect();

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err((ticker, err)) => {
                log::warn!("skipping {ticker}: {err}");
                failures.push((ticker, err));
            }
        }
    }
    reports.sort_by(|a, b| a.ticker.cmp(&b.ticker));

    UniverseReport { reports, failures }
}
