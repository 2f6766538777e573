//! Ticker universe: the symbol list a scan covers.
//!
//! The default universe is a fixed set of 15 US large-caps; a config file can
//! replace it with any comma-separated list.

use std::collections::HashSet;

/// Tickers scanned when no override is configured.
pub const DEFAULT_TICKERS: [&str; 15] = [
    "AAPL", "MSFT", "AMZN", "GOOGL", "META", "TSLA", "NVDA", "AVGO", "BRK-B", "LLY", "V", "JPM",
    "XOM", "WMT", "UNH",
];

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

pub fn default_tickers() -> Vec<String> {
    DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect()
}

/// Parses a comma-separated ticker list: trimmed, uppercased, no empty
/// tokens, no duplicates.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}
