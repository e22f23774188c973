#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use techscore::domain::error::TechscoreError;
pub use techscore::domain::ohlcv::PriceBar;
use techscore::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(&self, ticker: &str) -> Result<Vec<PriceBar>, TechscoreError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TechscoreError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(day: usize, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
    PriceBar {
        date: date(2022, 1, 3) + chrono::Duration::days(day as i64),
        open,
        high,
        low,
        close,
        volume: Some(1_000.0),
    }
}

/// Steady uptrend: close rises by `step` per day from `start`.
pub fn uptrend(n: usize, start: f64, step: f64) -> Vec<PriceBar> {
    (0..n)
        .map(|i| {
            let close = start + i as f64 * step;
            make_bar(i, close - step * 0.5, close + 1.0, close - 1.0, close)
        })
        .collect()
}

/// Uptrend that collapses sharply from `crash_day` onward.
pub fn uptrend_then_crash(n: usize, crash_day: usize) -> Vec<PriceBar> {
    (0..n)
        .map(|i| {
            let close = if i < crash_day {
                100.0 + i as f64 * 0.3
            } else {
                (100.0 + crash_day as f64 * 0.3) * 0.72 - (i - crash_day) as f64 * 0.05
            };
            make_bar(i, close, close + 1.0, close - 1.0, close)
        })
        .collect()
}
