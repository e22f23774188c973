//! Ticker universe: list parsing, market-suffix normalization, and the
//! per-ticker stock class assignment.

use std::collections::HashSet;

use crate::domain::stock_class::StockClass;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseEntry {
    pub ticker: String,
    pub class: StockClass,
}

#[derive(Debug, Clone, Default)]
pub struct Universe {
    pub entries: Vec<UniverseEntry>,
}

impl Universe {
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Bare numeric codes get the Taiwan exchange suffix; anything already
/// carrying a suffix passes through unchanged (uppercased).
pub fn normalize_ticker(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.contains('.') && trimmed.chars().all(|c| c.is_ascii_digit()) {
        format!("{trimmed}.TW")
    } else {
        trimmed.to_uppercase()
    }
}

pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = normalize_ticker(trimmed);
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes_get_taiwan_suffix() {
        assert_eq!(normalize_ticker("2330"), "2330.TW");
        assert_eq!(normalize_ticker(" 0050 "), "0050.TW");
    }

    #[test]
    fn suffixed_and_alpha_tickers_pass_through() {
        assert_eq!(normalize_ticker("2330.TW"), "2330.TW");
        assert_eq!(normalize_ticker("2603.two"), "2603.TWO");
        assert_eq!(normalize_ticker("aapl"), "AAPL");
    }

    #[test]
    fn parse_basic_list() {
        let out = parse_tickers("2330, 2603,0050").unwrap();
        assert_eq!(out, vec!["2330.TW", "2603.TW", "0050.TW"]);
    }

    #[test]
    fn parse_rejects_empty_token() {
        assert!(matches!(
            parse_tickers("2330,,2603"),
            Err(UniverseError::EmptyToken)
        ));
    }

    #[test]
    fn parse_rejects_duplicates_after_normalization() {
        assert!(matches!(
            parse_tickers("2330,2330.TW"),
            Err(UniverseError::DuplicateTicker(t)) if t == "2330.TW"
        ));
    }

    #[test]
    fn universe_count() {
        let universe = Universe {
            entries: vec![
                UniverseEntry {
                    ticker: "2330.TW".into(),
                    class: StockClass::Weight,
                },
                UniverseEntry {
                    ticker: "2603.TW".into(),
                    class: StockClass::Momentum,
                },
            ],
        };
        assert_eq!(universe.count(), 2);
    }
}
