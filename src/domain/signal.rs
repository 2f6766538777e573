//! Entry-zone signal computation over a validated closing-price series.
//!
//! The engine is a pure function: it derives 50- and 200-session simple
//! moving averages, compares each against its value a few sessions back to
//! flag the trend direction, builds a symmetric entry zone around the
//! 50-session average, classifies the latest close against that zone, and
//! prices a stop and target off the entry reference.

use crate::domain::error::ZonewatchError;
use crate::domain::indicator_helpers::{calc_sma, calc_sma_offset};
use crate::domain::price_series::PriceSeries;
use serde::{Deserialize, Serialize};

/// Window of the short (zone-defining) moving average.
pub const SHORT_WINDOW: usize = 50;
/// Window of the long (context) moving average.
pub const LONG_WINDOW: usize = 200;

/// Tunable parameters of the signal engine. Defaults reproduce the reference
/// behavior; an INI file can override any of them.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    /// Fractional half-width of the entry zone around the 50-session SMA.
    pub band: f64,
    /// Fractional downside from the entry reference to the stop price.
    pub stop_pct: f64,
    /// Fractional upside from the entry reference to the target price.
    pub target_pct: f64,
    /// Sessions back for the trend-direction comparison.
    pub slope_lookback: usize,
    /// Minimum series length a provider must deliver.
    pub min_rows: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            band: 0.015,
            stop_pct: 0.05,
            target_pct: 0.05,
            slope_lookback: 5,
            min_rows: 260,
        }
    }
}

impl SignalConfig {
    /// Smallest series length the engine can work with under this config.
    pub fn required_rows(&self) -> usize {
        self.min_rows.max(LONG_WINDOW + self.slope_lookback)
    }
}

/// Where the latest close sits relative to the entry zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneState {
    TooLow,
    TooHigh,
    InZone,
}

/// One ticker's computed signal. Field order mirrors the report's JSON key
/// order; do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub ticker: String,
    pub close: f64,
    pub sma200: f64,
    pub sma200_up: bool,
    pub sma50: f64,
    pub sma50_up: bool,
    pub zone_low: f64,
    pub zone_high: f64,
    pub signal: ZoneState,
    pub entry_ref: f64,
    pub stop: f64,
    pub target: f64,
    pub alert: bool,
}

/// Computes the full signal record for one ticker.
///
/// Pure and deterministic. The series must hold at least
/// [`SignalConfig::required_rows`] points; providers guarantee that, and a
/// shorter series is refused here rather than panicking.
pub fn compute_signal(
    series: &PriceSeries,
    cfg: &SignalConfig,
) -> Result<SignalRecord, ZonewatchError> {
    let required = cfg.required_rows();
    if series.len() < required {
        return Err(ZonewatchError::InsufficientHistory {
            ticker: series.ticker().to_string(),
            rows: series.len(),
            minimum: required,
        });
    }

    let closes = series.closes();
    let close_today = closes[closes.len() - 1];

    let sma50 = calc_sma(&closes, SHORT_WINDOW);
    let sma50_prev = calc_sma_offset(&closes, SHORT_WINDOW, cfg.slope_lookback);
    // Strict comparison: a flat average does not count as trending up.
    let sma50_up = sma50 > sma50_prev;

    let sma200 = calc_sma(&closes, LONG_WINDOW);
    let sma200_prev = calc_sma_offset(&closes, LONG_WINDOW, cfg.slope_lookback);
    let sma200_up = sma200 > sma200_prev;

    let zone_low = sma50 * (1.0 - cfg.band);
    let zone_high = sma50 * (1.0 + cfg.band);

    // Strict bounds, so a close sitting exactly on a boundary is in zone.
    let (signal, entry_ref) = if close_today < zone_low {
        (ZoneState::TooLow, zone_low)
    } else if close_today > zone_high {
        (ZoneState::TooHigh, zone_high)
    } else {
        (ZoneState::InZone, close_today)
    };

    let stop = entry_ref * (1.0 - cfg.stop_pct);
    let target = entry_ref * (1.0 + cfg.target_pct);

    // Only the 50-session slope gates the alert; the 200-session slope is
    // informational.
    let alert = signal == ZoneState::InZone && sma50_up;

    Ok(SignalRecord {
        ticker: series.ticker().to_string(),
        close: close_today,
        sma200,
        sma200_up,
        sma50,
        sma50_up,
        zone_low,
        zone_high,
        signal,
        entry_ref,
        stop,
        target,
        alert,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::PricePoint;
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + Days::new(i as u64),
                close,
            })
            .collect();
        PriceSeries::new("TEST".into(), points, closes.len()).unwrap()
    }

    #[test]
    fn flat_series_with_final_drop_is_too_low() {
        let mut closes = vec![100.0; 260];
        closes[259] = 90.0;
        let record = compute_signal(&make_series(&closes), &SignalConfig::default()).unwrap();

        let sma50 = (49.0 * 100.0 + 90.0) / 50.0;
        let zone_low = sma50 * 0.985;
        assert!((record.sma50 - sma50).abs() < 1e-9);
        assert!((record.zone_low - zone_low).abs() < 1e-9);
        assert_eq!(record.close, 90.0);
        assert_eq!(record.signal, ZoneState::TooLow);
        assert!((record.entry_ref - zone_low).abs() < 1e-9);
        assert!((record.stop - zone_low * 0.95).abs() < 1e-9);
        assert!((record.target - zone_low * 1.05).abs() < 1e-9);
        assert!(!record.alert);
    }

    #[test]
    fn flat_series_is_in_zone_but_flat_slope_is_not_up() {
        let closes = vec![100.0; 260];
        let record = compute_signal(&make_series(&closes), &SignalConfig::default()).unwrap();

        assert_eq!(record.signal, ZoneState::InZone);
        assert_eq!(record.entry_ref, 100.0);
        // Equal SMA values are not "up", so no alert on a dead-flat series.
        assert!(!record.sma50_up);
        assert!(!record.sma200_up);
        assert!(!record.alert);
    }

    #[test]
    fn spike_above_zone_is_too_high_despite_rising_sma() {
        let mut closes = vec![100.0; 260];
        for close in closes.iter_mut().skip(255) {
            *close = 110.0;
        }
        let record = compute_signal(&make_series(&closes), &SignalConfig::default()).unwrap();

        assert!(record.sma50_up);
        assert!(record.sma200_up);
        assert_eq!(record.signal, ZoneState::TooHigh);
        assert!((record.entry_ref - record.zone_high).abs() < 1e-12);
        assert!(!record.alert);
    }

    #[test]
    fn gentle_uptrend_in_zone_raises_alert() {
        let closes: Vec<f64> = (0..260).map(|i| 100.0 + i as f64 * 0.01).collect();
        let record = compute_signal(&make_series(&closes), &SignalConfig::default()).unwrap();

        assert_eq!(record.signal, ZoneState::InZone);
        assert!(record.sma50_up);
        assert!(record.sma200_up);
        assert!(record.alert);
    }

    #[test]
    fn exact_boundary_counts_as_in_zone() {
        // With a zero band the zone collapses onto the SMA, so a flat series
        // puts the close exactly on both boundaries.
        let cfg = SignalConfig {
            band: 0.0,
            ..SignalConfig::default()
        };
        let closes = vec![100.0; 260];
        let record = compute_signal(&make_series(&closes), &cfg).unwrap();

        assert_eq!(record.zone_low, record.zone_high);
        assert_eq!(record.close, record.zone_low);
        assert_eq!(record.signal, ZoneState::InZone);
        assert_eq!(record.entry_ref, 100.0);
    }

    #[test]
    fn identical_input_yields_identical_record() {
        let closes: Vec<f64> = (0..300).map(|i| 50.0 + ((i * 7) % 13) as f64).collect();
        let series = make_series(&closes);
        let cfg = SignalConfig::default();

        assert_eq!(
            compute_signal(&series, &cfg).unwrap(),
            compute_signal(&series, &cfg).unwrap()
        );
    }

    #[test]
    fn scaling_the_short_window_scales_the_zone() {
        let base = vec![100.0; 260];
        let mut scaled = base.clone();
        for close in scaled.iter_mut().skip(210) {
            *close = 110.0;
        }
        let cfg = SignalConfig::default();
        let base_record = compute_signal(&make_series(&base), &cfg).unwrap();
        let scaled_record = compute_signal(&make_series(&scaled), &cfg).unwrap();

        assert!(scaled_record.sma50 > base_record.sma50);
        assert!((scaled_record.sma50 - base_record.sma50 * 1.1).abs() < 1e-9);
        assert!((scaled_record.zone_low - base_record.zone_low * 1.1).abs() < 1e-9);
        assert!((scaled_record.zone_high - base_record.zone_high * 1.1).abs() < 1e-9);
    }

    #[test]
    fn short_series_is_refused_with_observed_count() {
        let closes = vec![100.0; 100];
        let err = compute_signal(&make_series(&closes), &SignalConfig::default()).unwrap_err();
        match err {
            ZonewatchError::InsufficientHistory {
                ticker,
                rows,
                minimum,
            } => {
                assert_eq!(ticker, "TEST");
                assert_eq!(rows, 100);
                assert_eq!(minimum, 260);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn required_rows_never_drops_below_long_window_plus_lookback() {
        let cfg = SignalConfig {
            min_rows: 10,
            ..SignalConfig::default()
        };
        assert_eq!(cfg.required_rows(), LONG_WINDOW + 5);
    }

    #[test]
    fn zone_state_serializes_as_contract_strings() {
        assert_eq!(
            serde_json::to_string(&ZoneState::TooLow).unwrap(),
            "\"TOO_LOW\""
        );
        assert_eq!(
            serde_json::to_string(&ZoneState::TooHigh).unwrap(),
            "\"TOO_HIGH\""
        );
        assert_eq!(
            serde_json::to_string(&ZoneState::InZone).unwrap(),
            "\"IN_ZONE\""
        );
    }

    proptest! {
        #[test]
        fn classification_is_exhaustive_and_invariants_hold(
            closes in prop::collection::vec(1.0f64..1000.0, 260..320),
        ) {
            let record = compute_signal(&make_series(&closes), &SignalConfig::default()).unwrap();

            prop_assert!(record.zone_low <= record.zone_high);
            prop_assert!(record.stop < record.entry_ref);
            prop_assert!(record.entry_ref < record.target);

            match record.signal {
                ZoneState::TooLow => {
                    prop_assert!(record.close < record.zone_low);
                    prop_assert!(record.entry_ref == record.zone_low);
                }
                ZoneState::TooHigh => {
                    prop_assert!(record.close > record.zone_high);
                    prop_assert!(record.entry_ref == record.zone_high);
                }
                ZoneState::InZone => {
                    prop_assert!(record.close >= record.zone_low);
                    prop_assert!(record.close <= record.zone_high);
                    prop_assert!(record.entry_ref == record.close);
                }
            }

            if record.alert {
                prop_assert_eq!(record.signal, ZoneState::InZone);
                prop_assert!(record.sma50_up);
            }
        }
    }
}
