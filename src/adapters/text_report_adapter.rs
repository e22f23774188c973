//! Plain-text report adapter.
//!
//! Renders one score card per ticker plus a batch summary. Meant for a
//! terminal or a file; no markup.

use std::fmt::Write;

use crate::domain::runner::{TickerReport, UniverseReport};
use crate::domain::signal::SellReason;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

fn pct(value: f64) -> String {
    format!("{:+.2}%", value * 100.0)
}

fn render_ticker(out: &mut String, report: &TickerReport) {
    let _ = writeln!(
        out,
        "== {} ({}) {}",
        report.ticker,
        report.class.label(),
        "=".repeat(40usize.saturating_sub(report.ticker.len() + report.class.label().len())),
    );
    let _ = writeln!(
        out,
        "  as of {}  score {:>3}  advice: {}",
        report.latest_date,
        report.latest.score,
        report.advice.label()
    );

    for (label, points) in &report.breakdown {
        let _ = writeln!(out, "    {points:+4}  {label}");
    }

    let stop_line = report.class.stop_line();
    let mut flags = Vec::new();
    if report.latest.below_stop_line {
        flags.push(format!("below {}", stop_line.label()));
    }
    if report.latest.near_stop_warn {
        flags.push("near stop-line breakdown".to_string());
    }
    if report.latest.in_protection {
        flags.push("protection active".to_string());
    }
    if report.latest.sell_reason != SellReason::None {
        flags.push(format!("sell: {}", report.latest.sell_reason.label()));
    } else if report.latest.buy {
        flags.push(format!("buy: {}", report.latest.buy_reason.label()));
    }
    if !flags.is_empty() {
        let _ = writeln!(out, "  flags: {}", flags.join(", "));
    }

    let s = &report.backtest.summary;
    let _ = writeln!(
        out,
        "  backtest ({} days): return {}  drawdown {}  trades {}",
        report.days,
        pct(s.total_return),
        pct(s.max_drawdown),
        s.trade_count
    );
    let _ = writeln!(
        out,
        "    win rate {:.1}%  profit factor {:.2}  buy&hold {}  in-market {:.0}%",
        s.win_rate * 100.0,
        s.profit_factor,
        pct(s.buy_and_hold_return),
        s.in_market_fraction * 100.0
    );
    if !report.premature_sells.is_empty() {
        let _ = writeln!(
            out,
            "  premature sells: {} (exits followed by a quick rebound)",
            report.premature_sells.len()
        );
    }
    let _ = writeln!(out);
}

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &UniverseReport) -> String {
        let mut out = String::new();

        for ticker in &report.reports {
            render_ticker(&mut out, ticker);
        }

        let _ = writeln!(
            out,
            "{} of {} tickers scored",
            report.reports.len(),
            report.reports.len() + report.failures.len()
        );
        for (ticker, err) in &report.failures {
            let _ = writeln!(out, "  skipped {ticker}: {err}");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::{BacktestResult, Summary};
    use crate::domain::error::TechscoreError;
    use crate::domain::runner::Advice;
    use crate::domain::signal::{BuyReason, SellTriggers, SignalRow};
    use crate::domain::stock_class::StockClass;
    use chrono::NaiveDate;

    fn sample_report() -> TickerReport {
        TickerReport {
            ticker: "2330.TW".into(),
            class: StockClass::Weight,
            days: 300,
            latest_date: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
            latest: SignalRow {
                valid: true,
                buy: true,
                buy_reason: BuyReason::FourSeas,
                sell: false,
                sell_reason: SellReason::None,
                triggers: SellTriggers::default(),
                in_protection: false,
                near_stop_warn: false,
                trend_up: true,
                below_stop_line: false,
                bias: Some(0.02),
                score: 85,
            },
            advice: Advice::Bullish,
            breakdown: vec![
                ("three suns (close above MA5/10/20)", 20),
                ("four seas (also above MA60)", 10),
            ],
            backtest: BacktestResult {
                equity: vec![1.0, 1.1],
                in_market: vec![false, true],
                trades: Vec::new(),
                summary: Summary {
                    total_return: 0.342,
                    max_drawdown: -0.121,
                    trade_count: 8,
                    win_rate: 0.625,
                    profit_factor: 2.1,
                    buy_and_hold_return: 0.28,
                    in_market_fraction: 0.54,
                },
            },
            premature_sells: Vec::new(),
        }
    }

    #[test]
    fn renders_score_card() {
        let report = UniverseReport {
            reports: vec![sample_report()],
            failures: Vec::new(),
        };
        let text = TextReportAdapter.render(&report);

        assert!(text.contains("2330.TW (weight)"));
        assert!(text.contains("score  85"));
        assert!(text.contains("advice: bullish"));
        assert!(text.contains("three suns"));
        assert!(text.contains("return +34.20%"));
        assert!(text.contains("drawdown -12.10%"));
        assert!(text.contains("buy: FOUR_SEAS"));
        assert!(text.contains("1 of 1 tickers scored"));
    }

    #[test]
    fn renders_failures() {
        let report = UniverseReport {
            reports: Vec::new(),
            failures: vec![(
                "9999.TW".into(),
                TechscoreError::NoData {
                    ticker: "9999.TW".into(),
                },
            )],
        };
        let text = TextReportAdapter.render(&report);
        assert!(text.contains("0 of 1 tickers scored"));
        assert!(text.contains("skipped 9999.TW: no data for 9999.TW"));
    }

    #[test]
    fn sell_flag_wins_over_buy_flag() {
        let mut ticker = sample_report();
        ticker.latest.sell = true;
        ticker.latest.sell_reason = SellReason::HardStop;
        let report = UniverseReport {
            reports: vec![ticker],
            failures: Vec::new(),
        };
        let text = TextReportAdapter.render(&report);
        assert!(text.contains("sell: HARD_STOP"));
        assert!(!text.contains("buy: FOUR_SEAS"));
    }
}
