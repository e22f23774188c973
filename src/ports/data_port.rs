//! Data access port trait.

use crate::domain::error::TechscoreError;
use crate::domain::ohlcv::PriceBar;

pub trait DataPort {
    /// Fetch the full daily history for one ticker, oldest first.
    fn fetch_ohlcv(&self, ticker: &str) -> Result<Vec<PriceBar>, TechscoreError>;
}
