//! Stock classification and stop-line ("life line") selection.

use crate::domain::params::Params;

/// Closed category attached per ticker. Selects which moving average
/// serves as the trend-following exit reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StockClass {
    #[default]
    Default,
    Weight,
    Finance,
    Momentum,
}

/// Which moving-average column acts as the stop line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopLine {
    Ma10,
    Ma20,
    Ma60,
}

impl StockClass {
    /// Unknown strings fall back to `Default` silently (not an error).
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "WEIGHT" => StockClass::Weight,
            "FINANCE" => StockClass::Finance,
            "MOMENTUM" => StockClass::Momentum,
            _ => StockClass::Default,
        }
    }

    pub fn stop_line(self) -> StopLine {
        match self {
            StockClass::Momentum => StopLine::Ma10,
            StockClass::Weight | StockClass::Default => StopLine::Ma20,
            StockClass::Finance => StopLine::Ma60,
        }
    }

    /// Finance tickers additionally require close above the yearly MA.
    pub fn requires_long_term_confirmation(self) -> bool {
        matches!(self, StockClass::Finance)
    }

    pub fn label(self) -> &'static str {
        match self {
            StockClass::Default => "default",
            StockClass::Weight => "weight",
            StockClass::Finance => "finance",
            StockClass::Momentum => "momentum",
        }
    }
}

impl StopLine {
    pub fn window(self, params: &Params) -> usize {
        match self {
            StopLine::Ma10 => params.ma10,
            StopLine::Ma20 => params.ma20,
            StopLine::Ma60 => params.ma60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StopLine::Ma10 => "MA10",
            StopLine::Ma20 => "MA20",
            StopLine::Ma60 => "MA60",
        }
    }
}
