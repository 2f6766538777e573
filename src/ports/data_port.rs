//! Quote-history access port trait.

use crate::domain::error::ZonewatchError;
use crate::domain::price_series::PriceSeries;

/// A source of daily closing-price history.
///
/// Implementations must return points ordered oldest to newest and must
/// refuse series shorter than the configured minimum, so callers can hand
/// the result straight to the signal engine. Each call is a single attempt;
/// retrying is not an implementation's business.
pub trait DataPort {
    fn fetch_history(&self, ticker: &str) -> Result<PriceSeries, ZonewatchError>;
}
