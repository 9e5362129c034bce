//! URL builders for the supported EIA v2 endpoints.
//!
//! Nothing here talks to the network; [`crate::Client`] turns an [`Endpoint`]
//! into a GET request.

use crate::config::ApiKey;
use crate::models::Params;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Name of the query parameter carrying the key.
pub const API_KEY_PARAM: &str = "api_key";

// Allow -, _, . unescaped (series ids look like ELEC.GEN.ALL-AK-99.A)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, SAFE).to_string()
}

fn enc_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts.into_iter().map(enc).collect::<Vec<_>>().join(",")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `{base}/seriesid/{id}`
    Series(String),
    /// `{base}/seriesid/{id1,id2,...}`
    MultiSeries(Vec<String>),
    /// `{base}/search/?search_value=...`
    Search(String),
    /// Caller-supplied URL and parameters.
    Custom { url: String, params: Params },
}

impl Endpoint {
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Endpoint::Series(id) => format!("{}/seriesid/{}", base, enc(id)),
            Endpoint::MultiSeries(ids) => {
                format!("{}/seriesid/{}", base, enc_join(ids.iter().map(String::as_str)))
            }
            Endpoint::Search(_) => format!("{}/search/", base),
            Endpoint::Custom { url, .. } => url.clone(),
        }
    }

    /// Endpoint parameters with the API key merged in.
    ///
    /// Returns a fresh mapping; the key always overrides a caller-supplied `api_key`.
    pub fn merged_params(&self, api_key: &ApiKey) -> Params {
        let mut out = match self {
            Endpoint::Search(value) => Params::from([("search_value".to_string(), value.clone())]),
            Endpoint::Custom { params, .. } => params.clone(),
            Endpoint::Series(_) | Endpoint::MultiSeries(_) => Params::new(),
        };
        out.insert(API_KEY_PARAM.to_string(), api_key.as_str().to_string());
        out
    }

    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Endpoint::Series(_) => "series",
            Endpoint::MultiSeries(_) => "multi_series",
            Endpoint::Search(_) => "search",
            Endpoint::Custom { .. } => "query",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.eia.gov/v2";

    #[test]
    fn single_series_url() {
        let e = Endpoint::Series("ELEC.GEN.ALL-AK-99.A".into());
        assert_eq!(e.url(BASE), "https://api.eia.gov/v2/seriesid/ELEC.GEN.ALL-AK-99.A");
    }

    #[test]
    fn multi_series_joins_with_commas() {
        let ids = vec![
            "PET.RWTC.D".to_string(),
            "NG.RNGWHHD.D".to_string(),
            "ELEC.SALES.US-ALL.M".to_string(),
        ];
        let url = Endpoint::MultiSeries(ids.clone()).url(BASE);
        let tail = url.strip_prefix("https://api.eia.gov/v2/seriesid/").unwrap();
        let parts: Vec<&str> = tail.split(',').collect();
        assert_eq!(parts, ids.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn search_url_and_params() {
        let e = Endpoint::Search("crude oil".into());
        assert_eq!(e.url(BASE), "https://api.eia.gov/v2/search/");
        let p = e.merged_params(&ApiKey::new("k"));
        assert_eq!(p.get("search_value").map(String::as_str), Some("crude oil"));
        assert_eq!(p.get("api_key").map(String::as_str), Some("k"));
    }

    #[test]
    fn custom_params_are_not_mutated() {
        let params = Params::from([
            ("frequency".to_string(), "monthly".to_string()),
            ("api_key".to_string(), "caller".to_string()),
        ]);
        let e = Endpoint::Custom {
            url: format!("{}/electricity/retail-sales/data/", BASE),
            params: params.clone(),
        };
        let merged = e.merged_params(&ApiKey::new("configured"));
        assert_eq!(merged.get("api_key").map(String::as_str), Some("configured"));
        assert_eq!(merged.get("frequency").map(String::as_str), Some("monthly"));
        assert_eq!(params.get("api_key").map(String::as_str), Some("caller"));
    }

    #[test]
    fn odd_characters_in_ids_are_escaped() {
        let url = Endpoint::Series("a/b c".into()).url(BASE);
        assert!(url.ends_with("/seriesid/a%2Fb%20c"));
    }
}
