//! Gateway to the retrieval backend.
//!
//! [`RagClient`] is the production implementation; handlers and the
//! search session only see the [`RagGateway`] trait, so tests substitute
//! an in-process fake.
//!
//! Every failure collapses into the uniform [`ApiError`] shape: a
//! non-success status keeps its code (enriched from a JSON error body
//! when one parses), a timeout becomes 408 with the fixed timeout
//! message, and a call that never got a response becomes status 0.

use async_trait::async_trait;
use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use assist_core::{
    ApiError, DocumentDetail, FeedbackRequest, FeedbackResponse, FilterMetadata, SearchRequest,
    SearchResponse,
};

use crate::config::ClientConfig;
use crate::error::{AssistChatError, Result};

/// The four logical backend operations, plus a liveness probe.
#[async_trait]
pub trait RagGateway: Send + Sync {
    async fn search(&self, request: SearchRequest) -> std::result::Result<SearchResponse, ApiError>;
    async fn document(&self, doc_id: &str) -> std::result::Result<DocumentDetail, ApiError>;
    async fn filter_metadata(&self) -> std::result::Result<FilterMetadata, ApiError>;
    async fn submit_feedback(
        &self,
        request: FeedbackRequest,
    ) -> std::result::Result<FeedbackResponse, ApiError>;
    /// Whether the backend answers its health endpoint.
    async fn health(&self) -> bool;
}

/// HTTP client for the retrieval backend.
pub struct RagClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RagClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AssistChatError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> std::result::Result<T, ApiError> {
        debug!(path, "backend GET");
        let response = self
            .http
            .get(self.url(path))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, ApiError> {
        debug!(path, "backend POST");
        let response = self
            .http
            .post(self.url(path))
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> std::result::Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("HTTP error");
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_status(status.as_u16(), reason, &body);
            warn!(status = status.as_u16(), error = %error.error, "backend call failed");
            return Err(error);
        }
        // A 2xx with an undecodable body gives the transport sentinel, the
        // same as never hearing back.
        response.json::<T>().await.map_err(|_| ApiError::network())
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        warn!("backend call timed out");
        ApiError::timeout()
    } else {
        warn!(%error, "backend unreachable");
        ApiError::network()
    }
}

#[async_trait]
impl RagGateway for RagClient {
    async fn search(&self, request: SearchRequest) -> std::result::Result<SearchResponse, ApiError> {
        self.post_json("/api/search", &request).await
    }

    async fn document(&self, doc_id: &str) -> std::result::Result<DocumentDetail, ApiError> {
        self.get_json(&format!("/api/docs/{doc_id}")).await
    }

    async fn filter_metadata(&self) -> std::result::Result<FilterMetadata, ApiError> {
        self.get_json("/api/search/metadata").await
    }

    async fn submit_feedback(
        &self,
        request: FeedbackRequest,
    ) -> std::result::Result<FeedbackResponse, ApiError> {
        self.post_json("/api/feedback", &request).await
    }

    async fn health(&self) -> bool {
        let Ok(response) = self
            .http
            .get(self.url("/health"))
            .timeout(self.timeout)
            .send()
            .await
        else {
            return false;
        };
        response.status().is_success()
    }
}
