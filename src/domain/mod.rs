//! Core domain types and logic.

pub mod ohlcv;
pub mod params;
pub mod stock_class;
pub mod indicator;
pub mod signal;
pub mod backtest;
pub mod diagnostics;
pub mod universe;
pub mod runner;
pub mod error;
