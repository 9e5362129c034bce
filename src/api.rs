//! Synchronous client for the **EIA API v2**.
//!
//! Every call follows the same path: build the endpoint URL, attach `api_key`,
//! GET with a fixed timeout, decode JSON, and reject bodies that carry an
//! embedded `"error"` entry. There is no retry, paging or caching.
//!
//! ### Notes
//! - The EIA service reports logical failures (bad key, unknown series) as an
//!   HTTP 200 with an `"error"` field, so the body is always inspected.
//! - The request URL is logged at `debug` level without the key.
//!
//! Typical usage:
//! ```no_run
//! # use eia_rs::{Client, ClientConfig};
//! let client = Client::new(ClientConfig::new("YOUR_KEY"))?;
//! let result = client.series("ELEC.GEN.ALL-AK-99.A")?;
//! eia_rs::storage::export_csv(&result, "generation.csv")?;
//! # Ok::<(), eia_rs::EiaError>(())
//! ```
use crate::config::{ApiKey, ClientConfig};
use crate::endpoint::Endpoint;
use crate::error::{EiaError, Result};
use crate::models::{embedded_error, Params, QueryResult};
use log::{debug, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    api_key: ApiKey,
    http: HttpClient,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout) // total request timeout
            .connect_timeout(config.timeout) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("eia_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .map_err(|e| EiaError::Config(format!("build http client: {}", e)))?;
        Ok(Self {
            base_url: config.base_url,
            api_key: config.api_key,
            http,
        })
    }

    /// Build a client from `EIA_API_KEY` / `EIA_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Fetch one series: `GET {base}/seriesid/{series_id}`.
    pub fn series(&self, series_id: &str) -> Result<QueryResult> {
        self.get(&Endpoint::Series(series_id.to_string()))
    }

    /// Fetch several series in one call; ids are comma-joined in the given order.
    pub fn multi_series<S: AsRef<str>>(&self, series_ids: &[S]) -> Result<QueryResult> {
        let ids = series_ids.iter().map(|s| s.as_ref().to_string()).collect();
        self.get(&Endpoint::MultiSeries(ids))
    }

    /// Keyword search: `GET {base}/search/?search_value=...`.
    pub fn search(&self, search_value: &str) -> Result<QueryResult> {
        self.get(&Endpoint::Search(search_value.to_string()))
    }

    /// Query an arbitrary URL (usually a v2 route such as
    /// `https://api.eia.gov/v2/electricity/retail-sales/data/`).
    ///
    /// `params` is left untouched; the key is merged into a copy.
    pub fn query(&self, url: &str, params: Option<&Params>) -> Result<QueryResult> {
        self.get(&Endpoint::Custom {
            url: url.to_string(),
            params: params.cloned().unwrap_or_default(),
        })
    }

    /// Issue the GET for `endpoint` and return the parsed body unchanged.
    ///
    /// ### Errors
    /// - [`EiaError::Request`]: connection failure, timeout or non-2xx status
    /// - [`EiaError::Parse`]: body is not JSON
    /// - [`EiaError::Api`]: body has a top-level `"error"` entry
    pub fn get(&self, endpoint: &Endpoint) -> Result<QueryResult> {
        let url = endpoint.url(&self.base_url);
        let params = endpoint.merged_params(&self.api_key);
        debug!("GET {} ({})", url, endpoint.kind());

        let resp = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            warn!("GET {} returned HTTP {}", url, status);
            return Err(EiaError::Request(format!("HTTP {} for {}", status, url)));
        }

        let text = resp.text().map_err(transport_error)?;
        let body: Value = serde_json::from_str(&text)?;

        if let Some(msg) = embedded_error(&body) {
            warn!("GET {} reported an error: {}", url, msg);
            return Err(EiaError::Api(msg));
        }

        debug!("GET {} ok ({} bytes)", url, text.len());
        Ok(QueryResult::new(body))
    }
}

// Body-read failures count as transport errors. The URL carries the key, so drop it.
fn transport_error(e: reqwest::Error) -> EiaError {
    EiaError::Request(e.without_url().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_keeps_configured_base_url() {
        let cfg = ClientConfig::new("k")
            .with_base_url("http://127.0.0.1:9/v2/")
            .with_timeout(Duration::from_secs(1));
        let client = Client::new(cfg).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:9/v2");
    }

    #[test]
    fn connection_refused_is_a_request_error() {
        // Port 1 on loopback is not expected to accept connections.
        let cfg = ClientConfig::new("k")
            .with_base_url("http://127.0.0.1:1/v2")
            .with_timeout(Duration::from_secs(2));
        let client = Client::new(cfg).unwrap();
        let err = client.series("PET.RWTC.D").unwrap_err();
        assert!(matches!(err, EiaError::Request(_)), "got {:?}", err);
        assert!(!err.to_string().contains("api_key="));
    }
}
