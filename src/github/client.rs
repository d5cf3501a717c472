//! Blocking HTTP client for the hosting API

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper that issues one GET per call and decodes the JSON body
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    /// GET `url` and decode the body, failing on anything but 200 OK
    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let body = self.get_bytes(url, query)?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// GET `url` and return the raw body, failing on anything but 200 OK
    pub fn get_bytes(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>, FetchError> {
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(body.to_vec())
    }
}
