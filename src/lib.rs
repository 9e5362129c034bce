//! eia_rs
//!
//! A small, blocking Rust client for the U.S. Energy Information Administration
//! (EIA) API v2. Pairs with the `eia` CLI.
//!
//! ### Features
//! - Look up one series or several at once by series id
//! - Keyword search across EIA series
//! - Generic GET against any v2 route with caller-supplied parameters
//! - Embedded `"error"` bodies (sent with HTTP 200) surface as [`EiaError::Api`]
//! - Export `response.data` rows to CSV or JSON
//!
//! ### Example
//! ```no_run
//! use eia_rs::{Client, ClientConfig, Params};
//!
//! let client = Client::new(ClientConfig::new("YOUR_KEY"))?;
//! let both = client.multi_series(&["PET.RWTC.D", "NG.RNGWHHD.D"])?;
//! eia_rs::storage::export_csv(&both, "prices.csv")?;
//!
//! let params = Params::from([("frequency".to_string(), "monthly".to_string())]);
//! let url = "https://api.eia.gov/v2/electricity/retail-sales/data/";
//! let sales = client.query(url, Some(&params))?;
//! println!("{:?} rows", sales.total());
//! # Ok::<(), eia_rs::EiaError>(())
//! ```

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod storage;

pub use api::Client;
pub use config::{ApiKey, ClientConfig};
pub use endpoint::Endpoint;
pub use error::{EiaError, Result};
pub use models::{Params, QueryResult};
pub use storage::ExportOutcome;
