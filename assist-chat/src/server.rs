//! Thin proxy routes forwarding JSON between the browser UI and the
//! retrieval backend.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use assist_core::{
    ApiError, DocumentDetail, FeedbackRequest, FeedbackResponse, FilterMetadata, SearchRequest,
    SearchResponse,
};

use crate::client::RagGateway;
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn RagGateway>,
}

/// Uniform error carried out as an HTTP response. The body keeps the
/// gateway's `status_code` verbatim (including the sentinels); only the
/// HTTP status line needs a valid code, so 0 maps to 502.
struct GatewayError(ApiError);

impl From<ApiError> for GatewayError {
    fn from(error: ApiError) -> Self {
        Self(error)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self.0.status_code {
            0 => StatusCode::BAD_GATEWAY,
            code => StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };
        (status, Json(self.0)).into_response()
    }
}

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/search", post(search))
        .route("/api/search/metadata", get(filter_metadata))
        .route("/api/docs/{doc_id}", get(document))
        .route("/api/feedback", post(feedback))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(config: ServerConfig, gateway: Arc<dyn RagGateway>) -> anyhow::Result<()> {
    let app = app_router(AppState { gateway });
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for assist-chat server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("assist-chat listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.gateway.health().await;
    Json(json!({"status": "ok", "service": "assist-chat", "backend": backend}))
}

async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, GatewayError> {
    let response = state.gateway.search(request).await?;
    Ok(Json(response))
}

async fn document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<DocumentDetail>, GatewayError> {
    let document = state.gateway.document(&doc_id).await?;
    Ok(Json(document))
}

async fn filter_metadata(
    State(state): State<AppState>,
) -> Result<Json<FilterMetadata>, GatewayError> {
    let metadata = state.gateway.filter_metadata().await?;
    Ok(Json(metadata))
}

async fn feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, GatewayError> {
    if !(1..=5).contains(&request.rating) {
        return Err(GatewayError(
            ApiError::new("rating must be between 1 and 5", 422)
                .with_details(format!("got rating {}", request.rating)),
        ));
    }
    let response = state.gateway.submit_feedback(request).await?;
    Ok(Json(response))
}
