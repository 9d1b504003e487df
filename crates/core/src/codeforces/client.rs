//! Codeforces API client for fetching the contest list

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use super::types::*;
use crate::error::{Error, Result};

pub const CONTEST_LIST_URL: &str = "https://codeforces.com/api/contest.list";

/// Anything that can produce the full contest collection.
#[async_trait]
pub trait ContestSource: Send + Sync {
    async fn fetch_contest_list(&self) -> Result<Vec<Contest>>;
}

pub struct CodeforcesClient {
    client: Client,
    endpoint: String,
}

impl CodeforcesClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(CONTEST_LIST_URL, None)
    }

    /// No timeout is applied unless one is given.
    pub fn with_endpoint(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().default_headers(Self::headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait]
impl ContestSource for CodeforcesClient {
    async fn fetch_contest_list(&self) -> Result<Vec<Contest>> {
        debug!(endpoint = %self.endpoint, "fetching contest list");

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let contests = parse_contest_list(status, &body)?;
        debug!(count = contests.len(), "contest list fetched");
        Ok(contests)
    }
}

/// Turns a raw contest.list response into contests, keeping source order.
pub fn parse_contest_list(status: StatusCode, body: &str) -> Result<Vec<Contest>> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        warn!("contest list request was rate limited");
        return Err(Error::RateLimited);
    }

    if !status.is_success() {
        return Err(Error::FetchFailed(format!("API error: {}", status)));
    }

    let envelope: ApiResponse<Vec<Contest>> = serde_json::from_str(body)
        .map_err(|e| Error::FetchFailed(format!("malformed response: {}", e)))?;

    if envelope.status != "OK" {
        return Err(Error::FetchFailed(
            envelope.comment.unwrap_or(envelope.status),
        ));
    }

    envelope
        .result
        .ok_or_else(|| Error::FetchFailed("response has no result".to_string()))
}
