//! Daily closing-price history for a single ticker.

use crate::domain::error::ZonewatchError;
use chrono::NaiveDate;

/// One trading day's closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Validated price history: oldest first, strictly increasing dates,
/// positive closes, at least `min_rows` points. The constructor is the only
/// way in, so downstream code can rely on those invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(
        ticker: String,
        points: Vec<PricePoint>,
        min_rows: usize,
    ) -> Result<Self, ZonewatchError> {
        if points.len() < min_rows {
            return Err(ZonewatchError::InsufficientHistory {
                ticker,
                rows: points.len(),
                minimum: min_rows,
            });
        }

        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(ZonewatchError::BadQuoteRow {
                    ticker,
                    reason: format!("non-positive close {} on {}", point.close, point.date),
                });
            }
        }

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ZonewatchError::BadQuoteRow {
                    ticker,
                    reason: format!("dates not strictly increasing at {}", pair[1].date),
                });
            }
        }

        Ok(Self { ticker, points })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}
