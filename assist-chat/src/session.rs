//! The search session: query text, filter state, and the result list,
//! driven by explicit user actions.
//!
//! State machine: `Idle → Searching → {Success, Failed}`, with the two
//! terminal phases accepting new input. Responses carry the sequence
//! number of the request that produced them; a response that is no longer
//! the latest issued is discarded, so an overlapping search can never
//! clobber a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use assist_core::{FilterChange, SearchFilters, SearchRequest, SearchResult};

use crate::client::RagGateway;
use crate::config::SearchConfig;

/// Fallback when a search failure carries no message.
pub const SEARCH_FAILED_MESSAGE: &str = "検索に失敗しました";

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Success,
    Failed,
}

#[derive(Debug, Default)]
struct SessionState {
    query: String,
    filters: SearchFilters,
    results: Vec<SearchResult>,
    phase: SearchPhase,
    error: Option<String>,
}

/// A point-in-time copy of the session for display.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub query: String,
    pub filters: SearchFilters,
    pub results: Vec<SearchResult>,
    pub phase: SearchPhase,
    pub error: Option<String>,
}

/// Search orchestrator over an injected gateway.
pub struct SearchSession {
    gateway: Arc<dyn RagGateway>,
    config: SearchConfig,
    issued: AtomicU64,
    state: RwLock<SessionState>,
}

impl SearchSession {
    pub fn new(gateway: Arc<dyn RagGateway>, config: SearchConfig) -> Self {
        Self {
            gateway,
            config,
            issued: AtomicU64::new(0),
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Replace the query text. No search is triggered.
    pub async fn update_query(&self, query: impl Into<String>) {
        self.state.write().await.query = query.into();
    }

    /// Replace the whole filter state. No search is triggered.
    pub async fn set_filters(&self, filters: SearchFilters) {
        self.state.write().await.filters = filters;
    }

    /// Apply one filter edit through the cascade reset rule. No search is
    /// triggered.
    pub async fn apply_filter(&self, change: FilterChange) {
        let mut state = self.state.write().await;
        state.filters = state.filters.apply(change);
    }

    /// Run one search with the current query and filters.
    ///
    /// A trimmed query below the configured minimum length clears results
    /// and error without touching the network. Otherwise one request goes
    /// out; on success results replace the previous list wholesale, on
    /// failure results clear and the error message is stored. Superseded
    /// responses are dropped.
    pub async fn execute_search(&self) {
        let (query, filters) = {
            let state = self.state.read().await;
            (state.query.trim().to_string(), state.filters.clone())
        };

        if query.chars().count() < self.config.min_query_length {
            let mut state = self.state.write().await;
            state.results.clear();
            state.error = None;
            state.phase = SearchPhase::Idle;
            return;
        }

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.phase = SearchPhase::Searching;
            state.error = None;
        }

        let request = SearchRequest {
            query,
            filters: Some(filters),
            k: Some(self.config.result_limit),
        };
        let outcome = self.gateway.search(request).await;

        // The staleness check must happen under the state lock: a newer
        // search increments `issued` before its gateway call, so once this
        // response passes the check while holding the lock, any fresher
        // write is guaranteed to land after it.
        let mut state = self.state.write().await;
        if self.issued.load(Ordering::SeqCst) != seq {
            debug!(seq, "discarding superseded search response");
            return;
        }
        match outcome {
            Ok(response) => {
                state.results = response.results;
                state.error = None;
                state.phase = SearchPhase::Success;
            }
            Err(error) => {
                state.results.clear();
                state.error = Some(if error.error.is_empty() {
                    SEARCH_FAILED_MESSAGE.to_string()
                } else {
                    error.error
                });
                state.phase = SearchPhase::Failed;
            }
        }
    }

    /// Reset query, filters, results, and error together.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = SessionState::default();
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            query: state.query.clone(),
            filters: state.filters.clone(),
            results: state.results.clone(),
            phase: state.phase,
            error: state.error.clone(),
        }
    }
}
