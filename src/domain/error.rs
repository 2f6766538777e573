//! Crate-wide error type.

use crate::domain::universe::UniverseError;

/// Top-level error type for zonewatch.
#[derive(Debug, thiserror::Error)]
pub enum ZonewatchError {
    #[error("failed to fetch {ticker}: {reason}")]
    FetchFailed { ticker: String, reason: String },

    #[error("insufficient history for {ticker}: have {rows} rows, need {minimum}")]
    InsufficientHistory {
        ticker: String,
        rows: usize,
        minimum: usize,
    },

    #[error("bad quote row for {ticker}: {reason}")]
    BadQuoteRow { ticker: String, reason: String },

    #[error("could not build http client: {reason}")]
    HttpClient { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error("failed to encode report: {0}")]
    ReportEncode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ZonewatchError> for std::process::ExitCode {
    fn from(err: &ZonewatchError) -> Self {
        let code: u8 = match err {
            ZonewatchError::Io(_) | ZonewatchError::ReportEncode(_) => 1,
            ZonewatchError::ConfigParse { .. }
            | ZonewatchError::ConfigInvalid { .. }
            | ZonewatchError::Universe(_) => 2,
            ZonewatchError::FetchFailed { .. } | ZonewatchError::HttpClient { .. } => 3,
            ZonewatchError::InsufficientHistory { .. } | ZonewatchError::BadQuoteRow { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
