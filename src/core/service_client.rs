// src/core/service_client.rs
//! Shared HTTP client with a bounded timeout and transport error classification

use crate::error::NavigatorError;
use anyhow::{Context, Result};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, error};

const USER_AGENT: &str = concat!("startup-navigator/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ServiceClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, timeout })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// GET `url` and return the body; non-2xx, timeouts and connection
    /// failures all come back as `Transport`.
    pub async fn get_text(&self, url: Url) -> Result<String, NavigatorError> {
        let endpoint = endpoint_for_log(&url);
        debug!("GET {}", endpoint);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            error!("{} returned HTTP {}", endpoint, status);
            return Err(NavigatorError::Transport(format!(
                "server returned HTTP {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| self.classify_transport(e))
    }

    /// The request URL may carry a credential in its query string, so the
    /// URL is stripped before the error is turned into a message.
    pub fn classify_transport(&self, err: reqwest::Error) -> NavigatorError {
        let err = err.without_url();
        if err.is_timeout() {
            NavigatorError::Transport(format!(
                "request timed out after {}s",
                self.timeout.as_secs_f32()
            ))
        } else if err.is_connect() {
            NavigatorError::Transport(format!("could not connect: {}", err))
        } else if err.is_decode() || err.is_body() {
            NavigatorError::Unclassified(format!("could not read response body: {}", err))
        } else {
            NavigatorError::Transport(err.to_string())
        }
    }
}

/// Scheme, host and path only.
pub fn endpoint_for_log(url: &Url) -> String {
    let mut stripped = url.clone();
    stripped.set_query(None);
    stripped.set_fragment(None);
    stripped.to_string()
}
