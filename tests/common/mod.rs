#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use zonewatch::domain::error::ZonewatchError;
use zonewatch::domain::price_series::{PricePoint, PriceSeries};
use zonewatch::ports::data_port::DataPort;

pub struct MockDataPort {
    pub series: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, ticker: &str, series: PriceSeries) -> Self {
        self.series.insert(ticker.to_string(), series);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_history(&self, ticker: &str) -> Result<PriceSeries, ZonewatchError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(ZonewatchError::FetchFailed {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        self.series
            .get(ticker)
            .cloned()
            .ok_or_else(|| ZonewatchError::FetchFailed {
                ticker: ticker.to_string(),
                reason: "no canned series".to_string(),
            })
    }
}

pub fn make_series(ticker: &str, closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2019, 6, 3).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: start + Days::new(i as u64),
            close,
        })
        .collect();
    PriceSeries::new(ticker.to_string(), points, closes.len()).unwrap()
}

pub fn flat_closes(len: usize, value: f64) -> Vec<f64> {
    vec![value; len]
}

pub fn trending_closes(len: usize, start: f64, step: f64) -> Vec<f64> {
    (0..len).map(|i| start + i as f64 * step).collect()
}
