//! Stooq daily-quotes HTTP adapter.
//!
//! One GET per ticker against the historical-CSV endpoint. The payload is
//! parsed by header name so column order does not matter, sorted oldest
//! first, and validated into a [`PriceSeries`] before it leaves this module.

use crate::domain::error::ZonewatchError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://stooq.com/q/d/l";
pub const DEFAULT_SYMBOL_SUFFIX: &str = ".US";
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;

/// Stooq rejects the default library User-Agent.
const USER_AGENT: &str = "Mozilla/5.0";

/// Accepted `Date` column layouts, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

pub struct StooqAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
    symbol_suffix: String,
    min_rows: usize,
}

impl StooqAdapter {
    pub fn new(
        base_url: &str,
        symbol_suffix: &str,
        timeout: Duration,
        min_rows: usize,
    ) -> Result<Self, ZonewatchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ZonewatchError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            symbol_suffix: symbol_suffix.to_string(),
            min_rows,
        })
    }

    pub fn from_config(config: &dyn ConfigPort, min_rows: usize) -> Result<Self, ZonewatchError> {
        let base_url = config
            .get_string("data", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let suffix = config
            .get_string("data", "symbol_suffix")
            .unwrap_or_else(|| DEFAULT_SYMBOL_SUFFIX.to_string());
        let timeout_secs = config
            .get_int("data", "timeout_secs", DEFAULT_TIMEOUT_SECS)
            .max(1) as u64;

        Self::new(
            &base_url,
            &suffix,
            Duration::from_secs(timeout_secs),
            min_rows,
        )
    }

    fn quote_url(&self, ticker: &str) -> String {
        format!(
            "{}/?s={}{}&i=d",
            self.base_url, ticker, self.symbol_suffix
        )
    }
}

impl DataPort for StooqAdapter {
    fn fetch_history(&self, ticker: &str) -> Result<PriceSeries, ZonewatchError> {
        let url = self.quote_url(ticker);

        let response =
            self.client
                .get(&url)
                .send()
                .map_err(|e| ZonewatchError::FetchFailed {
                    ticker: ticker.to_string(),
                    reason: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ZonewatchError::FetchFailed {
                ticker: ticker.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let body = response.text().map_err(|e| ZonewatchError::FetchFailed {
            ticker: ticker.to_string(),
            reason: e.to_string(),
        })?;

        parse_quote_csv(ticker, &body, self.min_rows)
    }
}

/// Parses a historical-quotes CSV payload into a validated series.
///
/// Only the `Date` and `Close` columns are read (located by header name,
/// case-insensitive); whatever else the provider sends is ignored.
pub fn parse_quote_csv(
    ticker: &str,
    body: &str,
    min_rows: usize,
) -> Result<PriceSeries, ZonewatchError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ZonewatchError::FetchFailed {
            ticker: ticker.to_string(),
            reason: format!("unreadable CSV header: {e}"),
        })?
        .clone();

    let (date_idx, close_idx) = match (
        find_column(&headers, "Date"),
        find_column(&headers, "Close"),
    ) {
        (Some(date_idx), Some(close_idx)) => (date_idx, close_idx),
        _ => {
            return Err(ZonewatchError::FetchFailed {
                ticker: ticker.to_string(),
                reason: "payload has no Date/Close columns".to_string(),
            });
        }
    };

    let mut points = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| bad_row(ticker, &e.to_string()))?;

        let date_str = record
            .get(date_idx)
            .ok_or_else(|| bad_row(ticker, "missing date field"))?;
        let close_str = record
            .get(close_idx)
            .ok_or_else(|| bad_row(ticker, "missing close field"))?;

        let date = parse_date(date_str)
            .ok_or_else(|| bad_row(ticker, &format!("unparseable date {date_str:?}")))?;
        let close: f64 = close_str.trim().parse().map_err(|_| {
            bad_row(ticker, &format!("unparseable close {close_str:?} on {date}"))
        })?;

        points.push(PricePoint { date, close });
    }

    points.sort_by_key(|p| p.date);
    PriceSeries::new(ticker.to_string(), points, min_rows)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value.trim(), fmt).ok())
}

fn bad_row(ticker: &str, reason: &str) -> ZonewatchError {
    ZonewatchError::BadQuoteRow {
        ticker: ticker.to_string(),
        reason: reason.to_string(),
    }
}
