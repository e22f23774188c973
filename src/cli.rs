//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::{
    class_for, load_params, load_universe, FileConfigAdapter,
};
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::error::TechscoreError;
use crate::domain::runner::run_universe;
use crate::domain::universe::{normalize_ticker, Universe, UniverseEntry};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "techscore", about = "Technical health scoring and backtesting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score the configured universe and report
    Score {
        #[arg(short, long)]
        config: PathBuf,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Score a single ticker instead of the configured universe
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List tickers with data files available
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Score {
            config,
            output,
            ticker,
        } => run_score(&config, output.as_deref(), ticker.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListTickers { config } => run_list_tickers(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn csv_dir(config: &dyn ConfigPort) -> Result<PathBuf, TechscoreError> {
    config
        .get_string("data", "csv_dir")
        .map(PathBuf::from)
        .ok_or_else(|| TechscoreError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_dir".to_string(),
        })
}

fn run_score(config_path: &Path, output: Option<&Path>, ticker: Option<&str>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let params = load_params(&adapter);

    let universe = match ticker {
        Some(raw) => {
            let ticker = normalize_ticker(raw);
            let class = class_for(&adapter, &ticker);
            Universe {
                entries: vec![UniverseEntry { ticker, class }],
            }
        }
        None => match load_universe(&adapter) {
            Ok(u) => u,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(&e);
            }
        },
    };

    let dir = match csv_dir(&adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    let data = CsvAdapter::new(dir);

    eprintln!("Scoring {} tickers...", universe.count());
    let report = run_universe(&data, &universe, &params);
    for (ticker, err) in &report.failures {
        eprintln!("warning: skipping {ticker} ({err})");
    }
    if report.reports.is_empty() {
        eprintln!("error: no tickers scored");
        return ExitCode::from(5);
    }

    let renderer = TextReportAdapter;
    match output {
        Some(path) => {
            if let Err(e) = renderer.write(&report, &path.to_string_lossy()) {
                eprintln!("error: {e}");
                return ExitCode::from(&e);
            }
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", renderer.render(&report)),
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let universe = match load_universe(&adapter) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    let dir = match csv_dir(&adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    let mut missing = 0usize;
    for entry in &universe.entries {
        let path = dir.join(format!("{}.csv", entry.ticker));
        if path.is_file() {
            eprintln!("  {} ({}) [OK]", entry.ticker, entry.class.label());
        } else {
            eprintln!("  {} ({}) [no data file]", entry.ticker, entry.class.label());
            missing += 1;
        }
    }

    println!(
        "Config OK: {} tickers, {} missing data files",
        universe.count(),
        missing
    );
    ExitCode::SUCCESS
}

fn run_list_tickers(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let dir = match csv_dir(&adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    match CsvAdapter::new(dir).list_tickers() {
        Ok(tickers) => {
            for ticker in tickers {
                println!("{ticker}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}
