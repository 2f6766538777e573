//! Shared helper functions for moving-average calculations.

/// Arithmetic mean of the most recent `period` values.
///
/// Callers must ensure `values.len() >= period` and `period > 0`.
pub fn calc_sma(values: &[f64], period: usize) -> f64 {
    calc_sma_offset(values, period, 0)
}

/// Mean of the `period` values ending `offset` positions before the end of
/// the slice. `offset = 0` is the window ending at the latest value.
///
/// Callers must ensure `values.len() >= period + offset` and `period > 0`.
pub fn calc_sma_offset(values: &[f64], period: usize, offset: usize) -> f64 {
    let end = values.len() - offset;
    let window = &values[end - period..end];
    window.iter().sum::<f64>() / period as f64
}
