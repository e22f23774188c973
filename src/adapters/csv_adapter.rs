//! CSV file data adapter.
//!
//! One file per ticker under a base directory, named `{ticker}.csv`.
//! Headers are matched case-insensitively; the volume column is optional
//! and blank or unparsable volume cells become unknown rather than errors.

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::TechscoreError;
use crate::domain::ohlcv::PriceBar;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{ticker}.csv"))
    }

    /// Tickers with a data file present, sorted.
    pub fn list_tickers(&self) -> Result<Vec<String>, TechscoreError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TechscoreError::DataSource {
            reason: format!("failed to read directory {}: {}", self.base_path.display(), e),
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TechscoreError::DataSource {
                reason: format!("directory entry error: {e}"),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".csv") {
                tickers.push(stem.to_string());
            }
        }
        tickers.sort();
        Ok(tickers)
    }
}

struct ColumnMap {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord, ticker: &str) -> Result<Self, TechscoreError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &'static str| {
            find(name).ok_or_else(|| TechscoreError::MissingField {
                ticker: ticker.to_string(),
                field: name.to_uppercase(),
            })
        };

        Ok(ColumnMap {
            date: require("date")?,
            open: require("open")?,
            high: require("high")?,
            low: require("low")?,
            close: require("close")?,
            volume: find("volume"),
        })
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(&self, ticker: &str) -> Result<Vec<PriceBar>, TechscoreError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| TechscoreError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| TechscoreError::DataSource {
            reason: format!("{ticker}: header parse error: {e}"),
        })?;
        let columns = ColumnMap::from_headers(headers, ticker)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| TechscoreError::DataSource {
                reason: format!("{ticker}: CSV parse error: {e}"),
            })?;

            let field = |idx: usize, name: &str| {
                record
                    .get(idx)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| TechscoreError::MissingField {
                        ticker: ticker.to_string(),
                        field: name.to_uppercase(),
                    })
            };
            let number = |idx: usize, name: &str| -> Result<f64, TechscoreError> {
                field(idx, name)?
                    .parse()
                    .map_err(|e| TechscoreError::DataSource {
                        reason: format!("{ticker}: invalid {name} value: {e}"),
                    })
            };

            let date_str = field(columns.date, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                TechscoreError::DataSource {
                    reason: format!("{ticker}: invalid date {date_str}: {e}"),
                }
            })?;

            let volume = columns
                .volume
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0);

            bars.push(PriceBar {
                date,
                open: number(columns.open, "open")?,
                high: number(columns.high, "high")?,
                low: number(columns.low, "low")?,
                close: number(columns.close, "close")?,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}
