//! Report assembly: fetch each ticker, compute its signal, stamp the result.

use crate::domain::error::ZonewatchError;
use crate::domain::signal::{SignalConfig, SignalRecord, compute_signal};
use crate::ports::data_port::DataPort;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout in the emitted report, e.g. `2026-08-04 14:30 UTC`.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: String,
    pub rows: Vec<SignalRecord>,
}

/// Runs the tickers one at a time in the given order. The first failure
/// aborts the whole run, so a written report always covers every ticker.
///
/// The timestamp is injected by the caller, keeping this clock-free.
pub fn build_report(
    data_port: &dyn DataPort,
    tickers: &[String],
    cfg: &SignalConfig,
    generated_at: DateTime<Utc>,
) -> Result<Report, ZonewatchError> {
    let mut rows = Vec::with_capacity(tickers.len());

    for ticker in tickers {
        let series = data_port.fetch_history(ticker)?;
        eprintln!("  {}: {} rows [OK]", ticker, series.len());
        rows.push(compute_signal(&series, cfg)?);
    }

    Ok(Report {
        generated_at: generated_at.format(GENERATED_AT_FORMAT).to_string(),
        rows,
    })
}
