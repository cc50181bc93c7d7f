//! PowerDNS Recursor adapter using the built-in HTTP API.
//!
//! This adapter collects statistics from the Recursor's web server, which
//! listens on port 8082 by default and authenticates with the `X-API-Key`
//! header.
//!
//! ## Example
//!
//! ```rust,no_run
//! use recwatch_adapters::api::PdnsApiAdapter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = PdnsApiAdapter::builder()
//!         .host("ns1.example.net")
//!         .port(8082)
//!         .api_key("changeme")
//!         .build()?;
//!
//!     let snapshot = adapter.collect().await?;
//!
//!     for (name, value) in snapshot.iter() {
//!         println!("{}: {}", name, value);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use recwatch_types::CounterSnapshot;

use crate::normalize::{normalize_records, StatisticRecord};
use crate::AdapterError;

/// Path of the statistics endpoint.
pub const STATISTICS_PATH: &str = "/api/v1/servers/localhost/statistics";

/// Default port of the Recursor web server.
pub const DEFAULT_PORT: u16 = 8082;

/// How long a statistics request may take.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the API key.
const API_KEY_HEADER: &str = "X-API-Key";

/// PowerDNS Recursor API adapter for collecting statistics.
#[derive(Debug, Clone)]
pub struct PdnsApiAdapter {
    client: Client,
    host: String,
    port: u16,
    api_key: String,
}

impl PdnsApiAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> PdnsApiAdapterBuilder {
        PdnsApiAdapterBuilder::default()
    }

    /// Collect a snapshot of the watched counters.
    pub async fn collect(&self) -> Result<CounterSnapshot, AdapterError> {
        let records = self.fetch_statistics().await?;
        debug!(records = records.len(), "fetched statistics");
        Ok(normalize_records(&records))
    }

    /// Full URL of a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}:{}{}", self.host, self.port, path)
    }

    async fn fetch_statistics(&self) -> Result<Vec<StatisticRecord>, AdapterError> {
        let url = self.url(STATISTICS_PATH);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AdapterError::Auth);
        }

        if response.status() != StatusCode::OK {
            return Err(AdapterError::UnexpectedStatus(response.status().as_u16()));
        }

        let records: Vec<StatisticRecord> = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        Ok(records)
    }
}

// Report connection problems against the URL we asked for
fn request_error(url: &str, err: reqwest::Error) -> AdapterError {
    if err.is_timeout() {
        AdapterError::Timeout(url.to_string())
    } else if err.is_connect() {
        AdapterError::Connection(url.to_string())
    } else {
        AdapterError::from(err)
    }
}

/// Builder for PdnsApiAdapter.
#[derive(Debug, Default)]
pub struct PdnsApiAdapterBuilder {
    host: Option<String>,
    port: Option<u16>,
    api_key: Option<String>,
}

impl PdnsApiAdapterBuilder {
    /// Set the API host (default: "localhost").
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the API port (default: 8082).
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the API key sent with every request (default: empty).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<PdnsApiAdapter, AdapterError> {
        // The resolver is queried directly, never through a proxy
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .no_proxy()
            .build()
            .map_err(|e| AdapterError::Http(e.to_string()))?;

        Ok(PdnsApiAdapter {
            client,
            host: self.host.unwrap_or_else(|| "localhost".to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            api_key: self.api_key.unwrap_or_default(),
        })
    }
}
