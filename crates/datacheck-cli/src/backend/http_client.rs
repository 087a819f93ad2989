//! Blocking reqwest client for the remote checkers.

use datacheck_core::{CheckError, HttpClient, HttpResponse};
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;

/// HTTP client that reports redirects instead of following them.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, CheckError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .user_agent(concat!("datacheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CheckError::Http(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse, CheckError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| CheckError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        debug!(url, status, "received response");

        let body = response
            .text()
            .map_err(|e| CheckError::Http(e.to_string()))?;

        Ok(HttpResponse::new(status, body))
    }
}
