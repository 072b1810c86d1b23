use std::time::Duration;

use board_logging::{board_debug, board_info};
use futures_util::StreamExt;
use url::Url;

use crate::{extract_payload_text, parse_postings, FailureKind, FetchError, PostingRecord};

/// Path appended to the configured base URL.
pub const UPDATES_PATH: &str = "fetch_updates";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    /// `None` waits as long as the whole request takes.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout: None,
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Builds `{base_url}/fetch_updates`, tolerating a trailing slash on the base.
pub fn updates_endpoint(base_url: &str) -> Result<Url, FetchError> {
    let base = base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{base}/{UPDATES_PATH}")).map_err(|err| {
        FetchError::new(FailureKind::InvalidUrl, format!("{base_url:?}: {err}"))
    })
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues one request and returns the postings in received order.
    async fn fetch_updates(&self) -> Result<Vec<PostingRecord>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_updates(&self) -> Result<Vec<PostingRecord>, FetchError> {
        let endpoint = updates_endpoint(&self.settings.base_url)?;
        let client = self.build_client()?;

        board_debug!("POST {}", endpoint);
        let response = client
            .post(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = self.read_body(response).await?;
        let text = extract_payload_text(&body)?;
        let postings = parse_postings(&text)?;
        board_info!(
            "Fetched {} postings ({} response bytes)",
            postings.len(),
            body.len()
        );
        Ok(postings)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
