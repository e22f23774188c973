//! MACD histogram: EMA(fast) - EMA(slow) minus its signal EMA.
//!
//! EMAs seed at the first close, so the histogram is defined from day one
//! (early values are dominated by the seed and settle as the EMAs warm up).

use super::ema;

pub fn macd_histogram(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<f64> {
    if closes.is_empty() {
        return Vec::new();
    }

    let alpha = |span: usize| 2.0 / (span as f64 + 1.0);
    let ema_fast = ema(closes, alpha(fast));
    let ema_slow = ema(closes, alpha(slow));

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema(&macd_line, alpha(signal));

    macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_series_histogram_is_zero() {
        let closes = vec![100.0; 50];
        let hist = macd_histogram(&closes, 12, 26, 9);
        for v in hist {
            assert!(v.abs() < 1e-12);
        }
    }

    #[test]
    fn uptrend_turns_histogram_positive() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let hist = macd_histogram(&closes, 12, 26, 9);
        assert!(*hist.last().unwrap() > 0.0);
    }

    #[test]
    fn downtrend_turns_histogram_negative() {
        let closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        let hist = macd_histogram(&closes, 12, 26, 9);
        assert!(*hist.last().unwrap() < 0.0);
    }

    #[test]
    fn empty_input() {
        assert!(macd_histogram(&[], 12, 26, 9).is_empty());
    }

    #[test]
    fn output_is_day_aligned() {
        let closes = vec![100.0, 101.0, 99.0];
        let hist = macd_histogram(&closes, 12, 26, 9);
        assert_eq!(hist.len(), 3);
    }
}
