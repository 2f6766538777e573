//! Configuration validation.
//!
//! Checks every overridable key before a scan runs, so bad values surface as
//! one clear error instead of a nonsense report.

use crate::domain::error::ZonewatchError;
use crate::domain::signal::{LONG_WINDOW, SignalConfig};
use crate::domain::universe::parse_tickers;
use crate::ports::config_port::ConfigPort;

pub fn validate_scan_config(config: &dyn ConfigPort) -> Result<(), ZonewatchError> {
    validate_band(config)?;
    validate_stop_pct(config)?;
    validate_target_pct(config)?;
    validate_slope_lookback(config)?;
    validate_min_rows(config)?;
    validate_base_url(config)?;
    validate_timeout(config)?;
    validate_tickers(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: String) -> ZonewatchError {
    ZonewatchError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn validate_band(config: &dyn ConfigPort) -> Result<(), ZonewatchError> {
    let value = config.get_double("signal", "band", SignalConfig::default().band);
    if !(0.0..1.0).contains(&value) {
        return Err(invalid(
            "signal",
            "band",
            "band must be at least 0 and below 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_stop_pct(config: &dyn ConfigPort) -> Result<(), ZonewatchError> {
    let value = config.get_double("signal", "stop_pct", SignalConfig::default().stop_pct);
    if value <= 0.0 || value >= 1.0 {
        return Err(invalid(
            "signal",
            "stop_pct",
            "stop_pct must be between 0 and 1 exclusive".to_string(),
        ));
    }
    Ok(())
}

fn validate_target_pct(config: &dyn ConfigPort) -> Result<(), ZonewatchError> {
    let value = config.get_double("signal", "target_pct", SignalConfig::default().target_pct);
    if value <= 0.0 {
        return Err(invalid(
            "signal",
            "target_pct",
            "target_pct must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_slope_lookback(config: &dyn ConfigPort) -> Result<(), ZonewatchError> {
    let defaults = SignalConfig::default();
    let value = config.get_int("signal", "slope_lookback", defaults.slope_lookback as i64);
    if value < 1 {
        return Err(invalid(
            "signal",
            "slope_lookback",
            "slope_lookback must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_min_rows(config: &dyn ConfigPort) -> Result<(), ZonewatchError> {
    let defaults = SignalConfig::default();
    let lookback = config.get_int("signal", "slope_lookback", defaults.slope_lookback as i64);
    let min_rows = config.get_int("signal", "min_rows", defaults.min_rows as i64);
    let floor = LONG_WINDOW as i64 + lookback;
    if min_rows < floor {
        return Err(invalid(
            "signal",
            "min_rows",
            format!("min_rows must be at least {floor} (long window plus slope_lookback)"),
        ));
    }
    Ok(())
}

fn validate_base_url(config: &dyn ConfigPort) -> Result<(), ZonewatchError> {
    match config.get_string("data", "base_url") {
        Some(url) if url.trim().is_empty() => Err(invalid(
            "data",
            "base_url",
            "base_url must not be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), ZonewatchError> {
    let value = config.get_int("data", "timeout_secs", 30);
    if value < 1 {
        return Err(invalid(
            "data",
            "timeout_secs",
            "timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), ZonewatchError> {
    if let Some(list) = config.get_string("universe", "tickers") {
        parse_tickers(&list)?;
    }
    Ok(())
}
