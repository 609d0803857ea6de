//! Reqwest-backed `DummyJSON` source adapter.
//!
//! This adapter owns transport details only: URL composition, timeout and
//! HTTP status mapping, and JSON decoding. Schema checks are delegated to the
//! domain validator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::ports::{DirectoryError, UserDirectorySource, UserListRequest};
use crate::domain::validation::{UserCollection, validate_collection, validate_user};
use crate::domain::{User, UserId};

const USER_AGENT: &str = concat!("user-directory/", env!("CARGO_PKG_VERSION"));

/// Errors raised while constructing [`DummyJsonHttpSource`].
#[derive(Debug, Error)]
pub enum DummyJsonSourceError {
    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("base url {url} cannot be used for HTTP requests")]
    InvalidBaseUrl { url: String },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Directory source that reads `{base}/users` and `{base}/users/{id}`.
#[derive(Debug, Clone)]
pub struct DummyJsonHttpSource {
    client: Client,
    base_url: Url,
}

impl DummyJsonHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` cannot hold a path or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, DummyJsonSourceError> {
        if base_url.cannot_be_a_base() {
            return Err(DummyJsonSourceError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DirectoryError::invalid_argument(format!(
                    "base url {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, DirectoryError> {
        debug!(%url, "requesting user directory");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(status = status.as_u16(), bytes = body.len(), "user directory responded");
        parse_json(body.as_ref())
    }
}

#[async_trait]
impl UserDirectorySource for DummyJsonHttpSource {
    async fn fetch_user_collection(
        &self,
        request: &UserListRequest,
    ) -> Result<UserCollection, DirectoryError> {
        let mut url = self.endpoint(&["users"])?;
        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        let body = self.get_json(url).await?;
        Ok(validate_collection(&body)?)
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, DirectoryError> {
        let url = self.endpoint(&["users", &id.to_string()])?;
        let body = self.get_json(url).await?;
        Ok(validate_user(&body)?)
    }
}

fn parse_json(body: &[u8]) -> Result<Value, DirectoryError> {
    serde_json::from_slice(body).map_err(|error| {
        DirectoryError::decode(format!(
            "invalid JSON payload: {error} (body: {})",
            body_preview(body)
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> DirectoryError {
    if error.is_timeout() {
        DirectoryError::timeout(error.to_string())
    } else {
        DirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DirectoryError {
    debug!(
        status = status.as_u16(),
        body = %body_preview(body),
        "user directory returned non-success status"
    );
    DirectoryError::http(status.as_u16())
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "http_source_tests.rs"]
mod tests;
