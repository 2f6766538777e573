//! CLI definition and dispatch.

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::stooq_adapter::StooqAdapter;
use crate::domain::config_validation::validate_scan_config;
use crate::domain::error::ZonewatchError;
use crate::domain::report::{Report, build_report};
use crate::domain::signal::{SignalConfig, ZoneState};
use crate::domain::universe::{default_tickers, parse_tickers};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_OUTPUT_PATH: &str = "signals.json";

#[derive(Parser, Debug)]
#[command(name = "zonewatch", about = "Daily SMA entry-zone signal scanner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch quote history and write the signal report
    Scan {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Scan these tickers (comma-separated) instead of the configured
        /// universe
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Print the tickers a scan would cover
    ListTickers {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Check a configuration file without fetching anything
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            config,
            output,
            ticker,
        } => run_scan(config.as_ref(), output.as_deref(), ticker.as_deref()),
        Command::ListTickers { config } => run_list_tickers(config.as_ref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ZonewatchError> {
    FileConfigAdapter::from_file(path).map_err(|e| ZonewatchError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ZonewatchError> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            load_config(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_signal_config(config: &dyn ConfigPort) -> SignalConfig {
    let defaults = SignalConfig::default();
    SignalConfig {
        band: config.get_double("signal", "band", defaults.band),
        stop_pct: config.get_double("signal", "stop_pct", defaults.stop_pct),
        target_pct: config.get_double("signal", "target_pct", defaults.target_pct),
        slope_lookback: config.get_int("signal", "slope_lookback", defaults.slope_lookback as i64)
            as usize,
        min_rows: config.get_int("signal", "min_rows", defaults.min_rows as i64) as usize,
    }
}

pub fn resolve_tickers(
    ticker_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, ZonewatchError> {
    if let Some(list) = ticker_override {
        return Ok(parse_tickers(list)?);
    }

    match config.get_string("universe", "tickers") {
        Some(list) => Ok(parse_tickers(&list)?),
        None => Ok(default_tickers()),
    }
}

pub fn resolve_output(cli_output: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    if let Some(path) = cli_output {
        return path.to_path_buf();
    }

    config
        .get_string("report", "output_path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
}

fn run_scan(
    config_path: Option<&PathBuf>,
    output: Option<&Path>,
    ticker: Option<&str>,
) -> ExitCode {
    // Stage 1: Load and validate config
    let adapter = match load_optional_config(config_path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Err(e) = validate_scan_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let signal_config = build_signal_config(&adapter);

    // Stage 2: Resolve the universe
    let tickers = match resolve_tickers(ticker, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Build the data adapter
    let data_port = match StooqAdapter::from_config(&adapter, signal_config.min_rows) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Fetch and compute, fail-fast
    eprintln!("Scanning {} tickers...", tickers.len());
    let report = match build_report(&data_port, &tickers, &signal_config, Utc::now()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Print console summary to stderr
    print_summary(&report);

    // Stage 6: Write the report
    let output_path = resolve_output(output, &adapter);
    match JsonReportAdapter.write(&report, &output_path) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn print_summary(report: &Report) {
    eprintln!("\n=== Signals ({}) ===", report.generated_at);
    for row in &report.rows {
        let state = match row.signal {
            ZoneState::TooLow => "TOO_LOW",
            ZoneState::TooHigh => "TOO_HIGH",
            ZoneState::InZone => "IN_ZONE",
        };
        let alert = if row.alert { "  ALERT" } else { "" };
        eprintln!(
            "  {:<6} {:>8}  close {:.2}  zone {:.2}-{:.2}  stop {:.2}  target {:.2}{}",
            row.ticker, state, row.close, row.zone_low, row.zone_high, row.stop, row.target, alert,
        );
    }
}

fn run_list_tickers(config_path: Option<&PathBuf>) -> ExitCode {
    let adapter = match load_optional_config(config_path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = match resolve_tickers(None, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for ticker in &tickers {
        println!("{ticker}");
    }
    eprintln!("{} tickers configured", tickers.len());
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Err(e) = validate_scan_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let signal_config = build_signal_config(&adapter);
    let tickers = match resolve_tickers(None, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nSignal parameters:");
    eprintln!("  band:           {:.4}", signal_config.band);
    eprintln!("  stop_pct:       {:.4}", signal_config.stop_pct);
    eprintln!("  target_pct:     {:.4}", signal_config.target_pct);
    eprintln!("  slope_lookback: {}", signal_config.slope_lookback);
    eprintln!("  min_rows:       {}", signal_config.min_rows);
    eprintln!("\nUniverse: {}", tickers.join(", "));
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
