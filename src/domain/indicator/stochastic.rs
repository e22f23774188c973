//! Stochastic %K/%D with EMA smoothing.
//!
//! RSV = (close - lowest low) / (highest high - lowest low) * 100 over the
//! lookback window; %K is an EMA of RSV and %D an EMA of %K, both with
//! smoothing factor 1/3. A zero high-low range reads neutral 50.

use crate::domain::ohlcv::PriceBar;

const KD_ALPHA: f64 = 1.0 / 3.0;

pub fn stochastic_kd(bars: &[PriceBar], period: usize) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let n = bars.len();
    if period == 0 || n < period {
        return (vec![None; n], vec![None; n]);
    }

    let mut k = vec![None; n];
    let mut d = vec![None; n];
    let mut prev_k: Option<f64> = None;
    let mut prev_d: Option<f64> = None;

    for i in (period - 1)..n {
        let window = &bars[i + 1 - period..=i];
        let low_min = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        let high_max = window
            .iter()
            .map(|b| b.high)
            .fold(f64::NEG_INFINITY, f64::max);

        let range = high_max - low_min;
        let rsv = if range > 0.0 {
            (bars[i].close - low_min) / range * 100.0
        } else {
            50.0
        };

        let k_val = match prev_k {
            None => rsv,
            Some(p) => KD_ALPHA * rsv + (1.0 - KD_ALPHA) * p,
        };
        let d_val = match prev_d {
            None => k_val,
            Some(p) => KD_ALPHA * k_val + (1.0 - KD_ALPHA) * p,
        };

        k[i] = Some(k_val);
        d[i] = Some(d_val);
        prev_k = Some(k_val);
        prev_d = Some(d_val);
    }

    (k, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bar(i: usize, high: f64, low: f64, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i as i64),
            open: close,
            high,
            low,
            close,
            volume: Some(1_000.0),
        }
    }

    #[test]
    fn warmup_is_unknown() {
        let bars: Vec<PriceBar> = (0..12)
            .map(|i| make_bar(i, 110.0, 90.0, 100.0))
            .collect();
        let (k, d) = stochastic_kd(&bars, 9);

        for i in 0..8 {
            assert!(k[i].is_none());
            assert!(d[i].is_none());
        }
        assert!(k[8].is_some());
        assert!(d[8].is_some());
    }

    #[test]
    fn close_at_window_high_reads_high() {
        let bars: Vec<PriceBar> = (0..15)
            .map(|i| {
                let c = 100.0 + i as f64;
                make_bar(i, c, c - 2.0, c)
            })
            .collect();
        let (k, _) = stochastic_kd(&bars, 9);
        let last = k.last().copied().flatten().unwrap();
        assert!(last > 70.0, "K was {}", last);
    }

    #[test]
    fn zero_range_reads_neutral() {
        let bars: Vec<PriceBar> = (0..10)
            .map(|i| make_bar(i, 100.0, 100.0, 100.0))
            .collect();
        let (k, d) = stochastic_kd(&bars, 9);
        assert_eq!(k[9], Some(50.0));
        assert_eq!(d[9], Some(50.0));
    }

    #[test]
    fn k_and_d_stay_in_range() {
        let bars: Vec<PriceBar> = (0..40)
            .map(|i| {
                let c = 100.0 + ((i * 11) % 17) as f64;
                make_bar(i, c + 1.0, c - 1.0, c)
            })
            .collect();
        let (k, d) = stochastic_kd(&bars, 9);
        for v in k.into_iter().chain(d).flatten() {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn too_few_bars() {
        let bars: Vec<PriceBar> = (0..3).map(|i| make_bar(i, 101.0, 99.0, 100.0)).collect();
        let (k, d) = stochastic_kd(&bars, 9);
        assert!(k.iter().all(|v| v.is_none()));
        assert!(d.iter().all(|v| v.is_none()));
    }
}
