use thiserror::Error;

/// Errors surfaced by the EIA client.
///
/// Transport, decoding and remote-reported failures all land here; the
/// underlying `reqwest`/`serde_json` error types never leak to callers.
/// `reqwest` failures are mapped in one place, `api::transport_error`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EiaError {
    /// Connection error, timeout, non-2xx status or unreadable body.
    #[error("request failed: {0}")]
    Request(String),

    /// The body was not valid JSON.
    #[error("JSON parsing failed: {0}")]
    Parse(String),

    /// The service answered with an embedded `"error"` object.
    #[error("EIA API error: {0}")]
    Api(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Writing an export file failed.
    #[error("export failed: {0}")]
    Export(String),
}

impl From<serde_json::Error> for EiaError {
    fn from(e: serde_json::Error) -> Self {
        EiaError::Parse(e.to_string())
    }
}

impl From<csv::Error> for EiaError {
    fn from(e: csv::Error) -> Self {
        EiaError::Export(e.to_string())
    }
}

impl From<std::io::Error> for EiaError {
    fn from(e: std::io::Error) -> Self {
        EiaError::Export(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EiaError>;
