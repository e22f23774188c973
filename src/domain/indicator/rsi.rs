//! RSI (Relative Strength Index), Wilder smoothing.
//!
//! - First average: simple mean of gains/losses over the first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Degeneracies resolve to defined values: a flat window (no gains and no
//! losses) reads neutral 50, zero average loss reads 100, zero average
//! gain reads 0. NaN never leaves this function.

pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || closes.len() < 2 {
        return vec![None; closes.len()];
    }

    let gains: Vec<f64> = closes
        .windows(2)
        .map(|w| (w[1] - w[0]).max(0.0))
        .collect();
    let losses: Vec<f64> = closes
        .windows(2)
        .map(|w| (w[0] - w[1]).max(0.0))
        .collect();

    let mut out = vec![None; closes.len()];
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in period..closes.len() {
        let change_idx = i - 1;
        if i == period {
            avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
            avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
        } else {
            avg_gain = (avg_gain * (period - 1) as f64 + gains[change_idx]) / period as f64;
            avg_loss = (avg_loss * (period - 1) as f64 + losses[change_idx]) / period as f64;
        }
        out[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    out
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warmup_period_is_unknown() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i % 5) as f64).collect();
        let out = rsi(&closes, 14);

        for i in 0..14 {
            assert!(out[i].is_none(), "day {} should be unknown", i);
        }
        assert!(out[14].is_some());
    }

    #[test]
    fn all_gains_reads_100() {
        let closes: Vec<f64> = (0..16).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&closes, 14);
        assert_eq!(out[15], Some(100.0));
    }

    #[test]
    fn all_losses_reads_0() {
        let closes: Vec<f64> = (0..16).map(|i| 100.0 - i as f64).collect();
        let out = rsi(&closes, 14);
        assert_eq!(out[15], Some(0.0));
    }

    #[test]
    fn flat_series_reads_neutral_50() {
        let closes = vec![100.0; 20];
        let out = rsi(&closes, 14);
        assert_eq!(out[19], Some(50.0));
    }

    #[test]
    fn values_stay_in_range() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
            .collect();
        let out = rsi(&closes, 14);
        for v in out.into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "RSI {} out of range", v);
        }
    }

    #[test]
    fn zero_period_is_unknown() {
        let out = rsi(&[100.0, 101.0, 102.0], 0);
        assert!(out.iter().all(|v| v.is_none()));
    }

    #[test]
    fn wilder_smoothing_carries_history() {
        // One big early gain should still influence the average later.
        let mut closes = vec![100.0; 5];
        closes.push(120.0);
        closes.extend(std::iter::repeat(120.0).take(10));
        let out = rsi(&closes, 5);
        let last = out.last().copied().flatten().unwrap();
        assert!(last > 50.0);
    }
}
