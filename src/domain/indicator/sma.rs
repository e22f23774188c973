//! Simple moving average over a fixed window.

/// `None` until the window is fully populated.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for (i, &v) in values.iter().enumerate() {
        running += v;
        if i >= window {
            running -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(running / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Window mean over a column with unknown cells. A window containing any
/// unknown value yields `None`.
pub fn sma_opt(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < window {
            out.push(None);
            continue;
        }
        let window_vals = &values[i + 1 - window..=i];
        if window_vals.iter().all(|v| v.is_some()) {
            let sum: f64 = window_vals.iter().map(|v| v.unwrap_or(0.0)).sum();
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_basic() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
        assert_eq!(out[4], Some(4.0));
    }

    #[test]
    fn sma_window_one() {
        let out = sma(&[5.0, 7.0], 1);
        assert_eq!(out, vec![Some(5.0), Some(7.0)]);
    }

    #[test]
    fn sma_window_larger_than_series() {
        let out = sma(&[1.0, 2.0], 5);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn sma_zero_window() {
        let out = sma(&[1.0, 2.0], 0);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn sma_opt_propagates_unknown() {
        let out = sma_opt(&[Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)], 3);
        assert_eq!(out[2], None);
        assert_eq!(out[3], None);
        assert_eq!(out[4], Some(4.0));
    }

    #[test]
    fn sma_opt_all_known() {
        let out = sma_opt(&[Some(2.0), Some(4.0), Some(6.0)], 3);
        assert_eq!(out[2], Some(4.0));
    }
}
