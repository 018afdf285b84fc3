// src/work24/client.rs
use super::parser::parse_job_feed;
use super::request::build_search_url;
use crate::core::service_client::endpoint_for_log;
use crate::core::ServiceClient;
use crate::session::{CredentialKind, Session};
use crate::types::{JobListingQuery, JobListingResult};
use crate::utils::truncate_for_log;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct Work24Client {
    service: ServiceClient,
    base_url: String,
}

impl Work24Client {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            service: ServiceClient::new(timeout)?,
            base_url: base_url.into(),
        })
    }

    /// One GET against the listing endpoint, classified end to end.
    /// Without a Work24 key in `session` no request is made.
    pub async fn search(&self, session: &Session, query: &JobListingQuery) -> JobListingResult {
        let auth_key = session.credential(CredentialKind::Work24AuthKey)?;
        let url = build_search_url(&self.base_url, auth_key, query)?;

        info!(
            "Searching Work24 listings at {} (startPage={}, display={}, key length {})",
            endpoint_for_log(&url),
            query.start_page(),
            query.display(),
            auth_key.len()
        );

        let body = self.service.get_text(url).await.inspect_err(|e| {
            warn!("Work24 request failed: {}", e);
        })?;
        debug!("Work24 raw response: {}", truncate_for_log(&body, 500));

        let listing = parse_job_feed(&body)?;
        info!("Work24 returned {} listings", listing.len());
        Ok(listing)
    }
}
