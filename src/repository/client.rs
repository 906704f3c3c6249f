// src/repository/client.rs

//! HTTP access for catalog, manifest and tarball retrieval
//!
//! Everything above this module sees the network only through the
//! [`Fetcher`] trait, so the pipeline can be driven by an in-memory fetcher
//! in tests. [`RepositoryClient`] is the production implementation on top of
//! reqwest's blocking client.
//!
//! Requests are never retried.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::io::Read;
use std::time::Duration;
use tracing::debug;

/// "Fetch bytes from URL" capability used by the pipeline
pub trait Fetcher: Send + Sync {
    /// Open the response body of `url` as a stream
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>>;

    /// Retrieve the full response body of `url`
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        self.open(url)?
            .read_to_end(&mut body)
            .map_err(|e| Error::fetch(url, format!("Failed to read response: {e}")))?;
        Ok(body)
    }
}

/// Blocking HTTP client wrapper
pub struct RepositoryClient {
    client: Client,
}

impl RepositoryClient {
    /// Create a client, optionally bounding every request by `timeout`
    ///
    /// With `None`, an unreachable host stalls the calling task indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("rosvoid/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl Fetcher for RepositoryClient {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::fetch(url, e))?;

        if !response.status().is_success() {
            return Err(Error::fetch(url, format!("HTTP {}", response.status())));
        }

        Ok(Box::new(response))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_fetch_success() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/ros/rosdistro/distribution.yaml")
            .with_status(200)
            .with_body("repositories: {}\n")
            .create();

        let client = RepositoryClient::new(None).unwrap();
        let url = format!("{}/ros/rosdistro/distribution.yaml", server.url());
        let body = client.fetch(&url).unwrap();

        assert_eq!(body, b"repositories: {}\n");
        mock.assert();
    }

    #[test]
    fn test_fetch_http_error_is_fetch_error() {
        let mut server = Server::new();
        let _mock = server.mock("GET", "/missing").with_status(404).create();

        let client = RepositoryClient::new(Some(Duration::from_secs(5))).unwrap();
        let url = format!("{}/missing", server.url());
        let err = client.fetch(&url).unwrap_err();

        match err {
            Error::Fetch { url: failed, message } => {
                assert_eq!(failed, url);
                assert!(message.contains("404"));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[test]
    fn test_unreachable_host_is_fetch_error() {
        let client = RepositoryClient::new(Some(Duration::from_secs(2))).unwrap();
        let err = client.fetch("http://127.0.0.1:1/nothing").unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }
}
