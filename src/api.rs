use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::RequestBuilder;
use thiserror::Error;

use crate::details::DetailRecord;
use crate::model::SystemDoc;

/// Failure modes of a backend request, surfaced inline in the UI.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connect failure, timeout, ...).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("request failed with HTTP {status}")]
    RequestFailed { status: u16 },
    /// The body arrived but was not valid JSON of the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Thin client for the two read endpoints the backend exposes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tree_request(&self) -> RequestBuilder {
        self.http.get(format!("{}/api/tree-data", self.base_url))
    }

    fn details_request(&self, type_tag: &str, id: &str) -> RequestBuilder {
        self.http
            .get(format!("{}/api/details", self.base_url))
            .query(&[("type", type_tag), ("id", id)])
    }

    /// Fetch the full tree document. One call per session (plus explicit
    /// reloads); the model built from it is immutable afterwards.
    pub async fn fetch_tree(&self) -> Result<Vec<SystemDoc>, ApiError> {
        log::debug!("api: GET {}/api/tree-data", self.base_url);
        Self::read_json(self.tree_request()).await
    }

    /// Fetch one item's detail record by `(type, id)`.
    pub async fn fetch_details(&self, type_tag: &str, id: &str) -> Result<DetailRecord, ApiError> {
        log::debug!("api: GET {}/api/details?type={type_tag}&id={id}", self.base_url);
        Self::read_json(self.details_request(type_tag, id)).await
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
            });
        }
        response.json().await.map_err(|err| {
            if err.is_decode() {
                ApiError::Decode(err)
            } else {
                ApiError::Network(err)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(client().base_url(), "http://localhost:8080");
    }

    #[test]
    fn details_request_targets_the_documented_endpoint() {
        let request = client().details_request("node", "n1").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/details?type=node&id=n1"
        );
    }

    #[test]
    fn details_request_encodes_query_values() {
        let request = client().details_request("signal", "a b").build().unwrap();
        assert_eq!(
            request.url().query(),
            Some("type=signal&id=a+b")
        );
    }

    #[test]
    fn tree_request_targets_the_documented_endpoint() {
        let request = client().tree_request().build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8080/api/tree-data");
    }

    #[test]
    fn failed_request_error_carries_the_status() {
        let error = ApiError::RequestFailed { status: 500 };
        assert!(error.to_string().contains("500"));
    }
}
