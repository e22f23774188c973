//! INI file configuration adapter, plus the loaders that turn raw config
//! into domain values.

use configparser::ini::Ini;
use std::path::Path;

use crate::domain::error::TechscoreError;
use crate::domain::params::Params;
use crate::domain::stock_class::StockClass;
use crate::domain::universe::{parse_tickers, Universe, UniverseEntry};
use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TechscoreError> {
        let mut config = Ini::new();
        let display = path.as_ref().display().to_string();
        config
            .load(path)
            .map_err(|e| TechscoreError::ConfigParse {
                file: display,
                reason: e,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, TechscoreError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|e| TechscoreError::ConfigParse {
                file: "<inline>".to_string(),
                reason: e,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

/// Load tunables from the `[params]` section. Absent keys keep their
/// built-in defaults; only explicitly overridden values change.
pub fn load_params(config: &dyn ConfigPort) -> Params {
    let d = Params::default();
    let f = |key: &str, default: f64| config.get_double("params", key, default);
    let i = |key: &str, default: usize| config.get_int("params", key, default as i64).max(0) as usize;

    Params {
        ma5: i("ma5", d.ma5),
        ma10: i("ma10", d.ma10),
        ma20: i("ma20", d.ma20),
        ma60: i("ma60", d.ma60),
        ma240: i("ma240", d.ma240),
        ma_slope_threshold: f("ma_slope_threshold", d.ma_slope_threshold),
        ma_slope_lookback: i("ma_slope_lookback", d.ma_slope_lookback),
        bigvol_mult: f("bigvol_mult", d.bigvol_mult),
        big_red_body_pct: f("big_red_body_pct", d.big_red_body_pct),
        gap_up_pct: f("gap_up_pct", d.gap_up_pct),
        fee_buy: f("fee_buy", d.fee_buy),
        fee_sell: f("fee_sell", d.fee_sell),
        stop_buffer_pct: f("stop_buffer_pct", d.stop_buffer_pct),
        stop_confirm_days: i("stop_confirm_days", d.stop_confirm_days),
        hard_stop_pct: f("hard_stop_pct", d.hard_stop_pct),
        bias_threshold: f("bias_threshold", d.bias_threshold),
        rsi_oversold: f("rsi_oversold", d.rsi_oversold),
        ma60_trend_lookback: i("ma60_trend_lookback", d.ma60_trend_lookback),
        ma60_support_tolerance: f("ma60_support_tolerance", d.ma60_support_tolerance),
        exit_cooldown_days: i("exit_cooldown_days", d.exit_cooldown_days),
        min_backtest_days: i("min_backtest_days", d.min_backtest_days),
        vol_ma: i("vol_ma", d.vol_ma),
        atr_n: i("atr_n", d.atr_n),
        kd_n: i("kd_n", d.kd_n),
        rsi_n: i("rsi_n", d.rsi_n),
        macd_fast: i("macd_fast", d.macd_fast),
        macd_slow: i("macd_slow", d.macd_slow),
        macd_signal: i("macd_signal", d.macd_signal),
        obv_ma: i("obv_ma", d.obv_ma),
        sell_lookahead: i("sell_lookahead", d.sell_lookahead),
        sell_premature_threshold: f("sell_premature_threshold", d.sell_premature_threshold),
        sell_premature_use_high: config.get_bool(
            "params",
            "sell_premature_use_high",
            d.sell_premature_use_high,
        ),
    }
}

/// Class override for one ticker, keyed by either the normalized ticker
/// or the bare code. Unset or unknown labels fall back to the default.
pub fn class_for(config: &dyn ConfigPort, ticker: &str) -> StockClass {
    let bare = ticker.split('.').next().unwrap_or(ticker);
    config
        .get_string("classes", ticker)
        .or_else(|| config.get_string("classes", bare))
        .map(|v| StockClass::parse(&v))
        .unwrap_or_default()
}

/// Load the ticker universe from `[universe] tickers`, with optional
/// per-ticker class overrides in `[classes]` keyed by either the
/// normalized ticker or the bare code.
pub fn load_universe(config: &dyn ConfigPort) -> Result<Universe, TechscoreError> {
    let raw = config
        .get_string("universe", "tickers")
        .ok_or_else(|| TechscoreError::ConfigMissing {
            section: "universe".to_string(),
            key: "tickers".to_string(),
        })?;

    let tickers = parse_tickers(&raw).map_err(|e| TechscoreError::ConfigInvalid {
        section: "universe".to_string(),
        key: "tickers".to_string(),
        reason: e.to_string(),
    })?;

    let entries = tickers
        .into_iter()
        .map(|ticker| {
            let class = class_for(config, &ticker);
            UniverseEntry { ticker, class }
        })
        .collect();

    Ok(Universe { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_sections() {
        let content = r#"
[data]
csv_dir = /data/prices

[universe]
tickers = 2330, 2603
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "csv_dir"),
            Some("/data/prices".to_string())
        );
    }

    #[test]
    fn typed_getters_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string("[params]\nbigvol_mult = abc\n").unwrap();
        assert_eq!(adapter.get_double("params", "bigvol_mult", 2.0), 2.0);
        assert_eq!(adapter.get_int("params", "missing", 42), 42);
        assert!(adapter.get_bool("params", "missing", true));
    }

    #[test]
    fn bool_values() {
        let adapter =
            FileConfigAdapter::from_string("[params]\na = yes\nb = 0\nc = maybe\n").unwrap();
        assert!(adapter.get_bool("params", "a", false));
        assert!(!adapter.get_bool("params", "b", true));
        assert!(adapter.get_bool("params", "c", true));
    }

    #[test]
    fn load_params_keeps_defaults_when_section_absent() {
        let adapter = FileConfigAdapter::from_string("[universe]\ntickers = 2330\n").unwrap();
        let params = load_params(&adapter);
        assert_eq!(params, Params::default());
    }

    #[test]
    fn load_params_overrides_selected_keys() {
        let content = r#"
[params]
bigvol_mult = 2.5
exit_cooldown_days = 10
sell_premature_use_high = true
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        let params = load_params(&adapter);
        assert_eq!(params.bigvol_mult, 2.5);
        assert_eq!(params.exit_cooldown_days, 10);
        assert!(params.sell_premature_use_high);
        // Untouched keys keep defaults.
        assert_eq!(params.hard_stop_pct, Params::default().hard_stop_pct);
    }

    #[test]
    fn load_universe_normalizes_and_assigns_classes() {
        let content = r#"
[universe]
tickers = 2330, 2881, 2603.TW, 9999

[classes]
2330 = weight
2881 = finance
2603.TW = momentum
9999 = spaceship
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        let universe = load_universe(&adapter).unwrap();

        assert_eq!(universe.count(), 4);
        assert_eq!(universe.entries[0].ticker, "2330.TW");
        assert_eq!(universe.entries[0].class, StockClass::Weight);
        assert_eq!(universe.entries[1].class, StockClass::Finance);
        assert_eq!(universe.entries[2].class, StockClass::Momentum);
        // Unknown class labels fall back silently.
        assert_eq!(universe.entries[3].class, StockClass::Default);
    }

    #[test]
    fn load_universe_requires_tickers_key() {
        let adapter = FileConfigAdapter::from_string("[universe]\n").unwrap();
        assert!(matches!(
            load_universe(&adapter),
            Err(TechscoreError::ConfigMissing { .. })
        ));
    }

    #[test]
    fn load_universe_rejects_malformed_list() {
        let adapter = FileConfigAdapter::from_string("[universe]\ntickers = 2330,,2603\n").unwrap();
        assert!(matches!(
            load_universe(&adapter),
            Err(TechscoreError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[data]\ncsv_dir = /prices\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "csv_dir"),
            Some("/prices".to_string())
        );
    }

    #[test]
    fn from_file_errors_on_missing_path() {
        assert!(FileConfigAdapter::from_file("/nonexistent/techscore.ini").is_err());
    }
}
